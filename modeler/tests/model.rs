use lather_modeler::{
    model::{Mode, ParameterIndex},
    model_document, Model, Options,
};
use lather_modeler::Diagnostics;

fn build(document: &str) -> (Model, Diagnostics) {
    build_with(document, Options::default())
}

fn build_with(document: &str, options: Options) -> (Model, Diagnostics) {
    let definitions = lather_wsdl::parse_str(document).expect("parse");
    let outcome = model_document(&definitions, options);
    for entry in outcome.diagnostics.entries() {
        eprintln!("{}", entry);
    }
    (outcome.model.expect("model"), outcome.diagnostics)
}

const CALCULATOR: &str = r#"
    <wsdl:definitions name="Calculator" targetNamespace="urn:calc"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:calc">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:calc">
                <xsd:element name="add">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="left" type="xsd:int"/>
                        <xsd:element name="right" type="xsd:int"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
                <xsd:element name="addResponse">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="sum" type="xsd:int"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="addIn">
            <wsdl:part name="parameters" element="tns:add"/>
        </wsdl:message>
        <wsdl:message name="addOut">
            <wsdl:part name="parameters" element="tns:addResponse"/>
        </wsdl:message>
        <wsdl:portType name="CalculatorPortType">
            <wsdl:operation name="add">
                <wsdl:input message="tns:addIn"/>
                <wsdl:output message="tns:addOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="CalculatorBinding" type="tns:CalculatorPortType">
            <soap:binding style="document"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="add">
                <soap:operation soapAction="urn:calc:add"/>
                <wsdl:input><soap:body use="literal"/></wsdl:input>
                <wsdl:output><soap:body use="literal"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="CalculatorService">
            <wsdl:port name="CalculatorPort" binding="tns:CalculatorBinding">
                <soap:address location="http://localhost/calc"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn wrapped_operation_dissolves_into_children() {
    let (model, diagnostics) = build(CALCULATOR);
    assert!(!diagnostics.has_errors());

    let port = &model.services[0].ports[0];
    assert!(port.wrapped);
    assert_eq!(port.address.as_deref(), Some("http://localhost/calc"));

    let operation = &port.operations[0];
    assert!(operation.wrapped);
    assert_eq!(operation.method_name, "add");
    assert_eq!(operation.soap_action.as_deref(), Some("urn:calc:add"));

    let request = &operation.request.parameters;
    assert_eq!(request.len(), 2);
    assert_eq!(request[0].name, "left");
    assert_eq!(request[0].type_name, "i32");
    assert_eq!(request[0].index, ParameterIndex::At(0));
    assert_eq!(request[1].name, "right");
    assert_eq!(request[1].index, ParameterIndex::At(1));

    let ret = operation.return_parameter().expect("return");
    assert_eq!(ret.name, "sum");
    assert_eq!(ret.type_name, "i32");
    assert_eq!(ret.mode, Mode::Out);
}

#[test]
fn wrapper_customization_turns_off_unwrapping() {
    let document = CALCULATOR.replace(
        "<wsdl:types>",
        r#"<lt:wrapper-style xmlns:lt="http://lather.rs/customizations">false</lt:wrapper-style>
           <wsdl:types>"#,
    );
    let (model, diagnostics) = build(&document);
    assert!(!diagnostics.has_errors());

    let operation = &model.services[0].ports[0].operations[0];
    assert!(!operation.wrapped);
    assert_eq!(operation.request.parameters.len(), 1);
    assert_eq!(operation.request.parameters[0].name, "parameters");
    assert_eq!(operation.request.parameters[0].type_name, "Add");

    let ret = operation.return_parameter().expect("return");
    assert_eq!(ret.type_name, "AddResponse");
}

const BANK: &str = r#"
    <wsdl:definitions name="Bank" targetNamespace="urn:bank"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:bank">
        <wsdl:message name="transferIn">
            <wsdl:part name="account" type="xsd:string"/>
            <wsdl:part name="amount" type="xsd:double"/>
            <wsdl:part name="ticket" type="xsd:string"/>
        </wsdl:message>
        <wsdl:message name="transferOut">
            <wsdl:part name="ticket" type="xsd:string"/>
            <wsdl:part name="balance" type="xsd:double"/>
        </wsdl:message>
        <wsdl:portType name="BankPortType">
            <wsdl:operation name="transfer" parameterOrder="amount account ticket">
                <wsdl:input message="tns:transferIn"/>
                <wsdl:output message="tns:transferOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="BankBinding" type="tns:BankPortType">
            <soap:binding style="rpc"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="transfer">
                <soap:operation/>
                <wsdl:input><soap:body use="literal" namespace="urn:bank"/></wsdl:input>
                <wsdl:output><soap:body use="literal" namespace="urn:bank"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="BankService">
            <wsdl:port name="BankPort" binding="tns:BankBinding">
                <soap:address location="http://localhost/bank"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn rpc_literal_honors_parameter_order_and_pairs_inout() {
    let (model, diagnostics) = build(BANK);
    assert!(!diagnostics.has_errors());

    let operation = &model.services[0].ports[0].operations[0];
    assert!(!operation.wrapped);

    let request = &operation.request.parameters;
    assert_eq!(request.len(), 3);
    assert_eq!(request[0].name, "amount");
    assert_eq!(request[1].name, "account");
    assert_eq!(request[2].name, "ticket");
    assert_eq!(request[2].mode, Mode::InOut);

    let response = operation.response.as_ref().expect("response");
    let returns: Vec<_> = response
        .parameters
        .iter()
        .filter(|parameter| parameter.index == ParameterIndex::Return)
        .collect();
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0].name, "balance");
    assert_eq!(returns[0].type_name, "f64");

    // the synthesized rpc structure wraps the body parts
    let body = &operation.request.body[0];
    assert_eq!(body.name.local, "transfer");
    assert_eq!(body.name.namespace, "urn:bank");
    match &body.content {
        lather_modeler::model::BlockContent::Rpc(structure) => {
            assert_eq!(structure.type_name, "Transfer");
            let members: Vec<&str> =
                structure.members.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(members, ["amount", "account", "ticket"]);
        }
        other => panic!("unexpected body content: {:?}", other),
    }
}

const FAULTY: &str = r#"
    <wsdl:definitions name="Registry" targetNamespace="urn:reg"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:reg">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:reg">
                <xsd:element name="req" type="xsd:string"/>
                <xsd:element name="resp" type="xsd:string"/>
                <xsd:element name="errorInfo" type="xsd:string"/>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="lookupIn">
            <wsdl:part name="body" element="tns:req"/>
        </wsdl:message>
        <wsdl:message name="lookupOut">
            <wsdl:part name="body" element="tns:resp"/>
        </wsdl:message>
        <wsdl:message name="notFound">
            <wsdl:part name="info" element="tns:errorInfo"/>
        </wsdl:message>
        <wsdl:message name="denied">
            <wsdl:part name="info" element="tns:errorInfo"/>
        </wsdl:message>
        <wsdl:portType name="RegistryPortType">
            <wsdl:operation name="lookup">
                <wsdl:input message="tns:lookupIn"/>
                <wsdl:output message="tns:lookupOut"/>
                <wsdl:fault name="notFound" message="tns:notFound"/>
                <wsdl:fault name="denied" message="tns:denied"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="RegistryBinding" type="tns:RegistryPortType">
            <soap:binding style="document"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="lookup">
                <soap:operation/>
                <wsdl:input><soap:body use="literal"/></wsdl:input>
                <wsdl:output><soap:body use="literal"/></wsdl:output>
                <wsdl:fault name="notFound"><soap:fault name="notFound" use="literal"/></wsdl:fault>
                <wsdl:fault name="denied"><soap:fault name="denied" use="literal"/></wsdl:fault>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="RegistryService">
            <wsdl:port name="RegistryPort" binding="tns:RegistryBinding">
                <soap:address location="http://localhost/reg"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn duplicate_fault_elements_collapse_into_one_exception() {
    let (model, diagnostics) = build(FAULTY);
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.warning_count() >= 1);

    let operation = &model.services[0].ports[0].operations[0];
    assert_eq!(operation.faults.len(), 1);
    assert_eq!(operation.faults[0].name, "notFound");
    assert_eq!(operation.faults[0].exception, "NotFound");

    assert_eq!(model.exceptions.len(), 1);
    assert_eq!(model.exceptions[0].element.local, "errorInfo");
    assert_eq!(model.exceptions[0].member_type, "String");

    let response = operation.response.as_ref().expect("response");
    assert_eq!(response.fault_blocks.len(), 1);
}

#[test]
fn modeling_is_deterministic() {
    let (first, _) = build(FAULTY);
    let (second, _) = build(FAULTY);
    assert_eq!(format!("{:?}", first), format!("{:?}", second));
}

const ECHO: &str = r#"
    <wsdl:definitions name="Echo" targetNamespace="urn:echo"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:lt="http://lather.rs/customizations"
            xmlns:tns="urn:echo">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:echo">
                <xsd:element name="echo">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="text" type="xsd:string"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
                <xsd:element name="echoResponse">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="return" type="xsd:string"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="echoIn">
            <wsdl:part name="parameters" element="tns:echo"/>
        </wsdl:message>
        <wsdl:message name="echoOut">
            <wsdl:part name="parameters" element="tns:echoResponse"/>
        </wsdl:message>
        <wsdl:portType name="EchoPortType">
            <wsdl:operation name="echo">
                <lt:async-mapping>true</lt:async-mapping>
                <wsdl:input message="tns:echoIn"/>
                <wsdl:output message="tns:echoOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="EchoBinding" type="tns:EchoPortType">
            <soap:binding style="document"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="echo">
                <soap:operation/>
                <wsdl:input><soap:body use="literal"/></wsdl:input>
                <wsdl:output><soap:body use="literal"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="EchoService">
            <wsdl:port name="EchoPort" binding="tns:EchoBinding">
                <soap:address location="http://localhost/echo"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn async_mapping_synthesizes_polling_and_callback() {
    let (model, diagnostics) = build(ECHO);
    assert!(!diagnostics.has_errors());

    let operations = &model.services[0].ports[0].operations;
    assert_eq!(operations.len(), 3);

    let sync = &operations[0];
    assert_eq!(sync.unique_name, "echo");
    assert!(sync.async_kind.is_none());

    let polling = &operations[1];
    assert_eq!(
        polling.async_kind,
        Some(lather_modeler::model::AsyncKind::Polling)
    );
    assert_eq!(polling.method_name, "echo_async");
    assert_eq!(polling.unique_name, "echo_async_polling");
    assert_eq!(polling.request.parameters.len(), 1);
    assert_eq!(polling.request.parameters[0].name, "text");
    let ret = polling.return_parameter().expect("return");
    assert_eq!(ret.type_name, "Response<String>");

    let callback = &operations[2];
    assert_eq!(
        callback.async_kind,
        Some(lather_modeler::model::AsyncKind::Callback)
    );
    assert_eq!(callback.unique_name, "echo_async_callback");
    let last = callback.request.parameters.last().expect("handler");
    assert_eq!(last.name, "async_handler");
    assert_eq!(last.type_name, "AsyncHandler<String>");
    assert_eq!(last.index, ParameterIndex::At(1));
}

const CLASHING: &str = r#"
    <wsdl:definitions name="Quotes" targetNamespace="urn:quotes"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:quotes">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:quotes">
                <xsd:complexType name="quote">
                    <xsd:sequence>
                        <xsd:element name="symbol" type="xsd:string"/>
                    </xsd:sequence>
                </xsd:complexType>
                <xsd:element name="req" type="xsd:string"/>
                <xsd:element name="resp" type="tns:quote"/>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="fetchIn">
            <wsdl:part name="body" element="tns:req"/>
        </wsdl:message>
        <wsdl:message name="fetchOut">
            <wsdl:part name="body" element="tns:resp"/>
        </wsdl:message>
        <wsdl:portType name="QuotePortType">
            <wsdl:operation name="fetch">
                <wsdl:input message="tns:fetchIn"/>
                <wsdl:output message="tns:fetchOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="QuoteBinding" type="tns:QuotePortType">
            <soap:binding style="document"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="fetch">
                <soap:operation/>
                <wsdl:input><soap:body use="literal"/></wsdl:input>
                <wsdl:output><soap:body use="literal"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="quote">
            <wsdl:port name="QuotePort" binding="tns:QuoteBinding">
                <soap:address location="http://localhost/quote"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn naming_conflicts_trigger_a_suffixed_retry() {
    // the service derives type name `Quote`, which the schema's
    // `quote` complex type also claims
    let (model, diagnostics) = build(CLASHING);
    assert!(!diagnostics.has_errors());
    assert_eq!(model.services[0].type_name, "Quote_Service");
}

#[test]
fn ports_sharing_a_binding_are_both_modeled() {
    let document = CALCULATOR.replace(
        "</wsdl:service>",
        r#"<wsdl:port name="BackupPort" binding="tns:CalculatorBinding">
               <soap:address location="http://backup/calc"/>
           </wsdl:port>
           </wsdl:service>"#,
    );
    let (model, diagnostics) = build(&document);
    assert!(!diagnostics.has_errors());

    let ports = &model.services[0].ports;
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].operations.len(), ports[1].operations.len());
    assert_eq!(ports[1].type_name, "BackupPort");
    assert_eq!(ports[1].address.as_deref(), Some("http://backup/calc"));
}

const FILES: &str = r#"
    <wsdl:definitions name="Files" targetNamespace="urn:files"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:mime="http://schemas.xmlsoap.org/wsdl/mime/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:files">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:files">
                <xsd:element name="photo" type="xsd:string"/>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="uploadIn">
            <wsdl:part name="label" type="xsd:string"/>
            <wsdl:part name="photo" element="tns:photo"/>
        </wsdl:message>
        <wsdl:message name="uploadOut">
            <wsdl:part name="receipt" type="xsd:string"/>
        </wsdl:message>
        <wsdl:portType name="FilesPortType">
            <wsdl:operation name="upload">
                <wsdl:input message="tns:uploadIn"/>
                <wsdl:output message="tns:uploadOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="FilesBinding" type="tns:FilesPortType">
            <soap:binding style="rpc"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="upload">
                <soap:operation/>
                <wsdl:input>
                    <soap:body use="literal" parts="label" namespace="urn:files"/>
                    <mime:content part="photo" type="image/jpeg"/>
                </wsdl:input>
                <wsdl:output><soap:body use="literal" namespace="urn:files"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="FilesService">
            <wsdl:port name="FilesPort" binding="tns:FilesBinding">
                <soap:address location="http://localhost/files"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn mime_type_drives_the_attachment_parameter_type() {
    let (model, diagnostics) = build(FILES);
    assert!(!diagnostics.has_errors());
    // element-described part bound to a non-XML mime type
    assert!(diagnostics.warning_count() >= 1);

    let operation = &model.services[0].ports[0].operations[0];
    assert_eq!(operation.request.attachments.len(), 1);
    let photo = operation
        .request
        .parameters
        .iter()
        .find(|parameter| parameter.name == "photo")
        .expect("photo");
    assert_eq!(photo.type_name, "Vec<u8>");
}

#[test]
fn mime_mapping_customization_keeps_the_schema_type() {
    let document = FILES.replace(
        "<wsdl:types>",
        r#"<lt:mime-content xmlns:lt="http://lather.rs/customizations">false</lt:mime-content>
           <wsdl:types>"#,
    );
    let (model, diagnostics) = build(&document);
    assert!(!diagnostics.has_errors());

    let operation = &model.services[0].ports[0].operations[0];
    let photo = operation
        .request
        .parameters
        .iter()
        .find(|parameter| parameter.name == "photo")
        .expect("photo");
    assert_eq!(photo.type_name, "String");
}

const ABSTRACT_ONLY: &str = r#"
    <wsdl:definitions name="Plain" targetNamespace="urn:plain"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:lt="http://lather.rs/customizations"
            xmlns:tns="urn:plain">
        <wsdl:types>
            <xsd:schema targetNamespace="urn:plain">
                <xsd:element name="add">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="left" type="xsd:int"/>
                        <xsd:element name="right" type="xsd:int"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
                <xsd:element name="addResponse">
                    <xsd:complexType><xsd:sequence>
                        <xsd:element name="sum" type="xsd:int"/>
                    </xsd:sequence></xsd:complexType>
                </xsd:element>
            </xsd:schema>
        </wsdl:types>
        <wsdl:message name="addIn">
            <wsdl:part name="parameters" element="tns:add"/>
        </wsdl:message>
        <wsdl:message name="addOut">
            <wsdl:part name="parameters" element="tns:addResponse"/>
        </wsdl:message>
        <wsdl:portType name="PlainPortType">
            <wsdl:operation name="add">
                <lt:async-mapping>true</lt:async-mapping>
                <wsdl:input message="tns:addIn"/>
                <wsdl:output message="tns:addOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="PlainBinding" type="tns:PlainPortType">
            <wsdl:operation name="add">
                <wsdl:input/>
                <wsdl:output/>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="PlainService">
            <wsdl:port name="PlainPort" binding="tns:PlainBinding">
                <soap:address location="http://localhost/plain"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn binding_without_soap_extension_models_unbound_best_effort() {
    let definitions = lather_wsdl::parse_str(ABSTRACT_ONLY).expect("parse");

    let strict = model_document(&definitions, Options::default());
    assert!(strict.model.is_none());
    assert!(strict.diagnostics.has_errors());

    let lenient = model_document(
        &definitions,
        Options {
            extension: true,
            ..Options::default()
        },
    );
    let model = lenient.model.expect("model");
    assert!(!lenient.diagnostics.has_errors());
    // no soap:binding plus ignored async mapping
    assert!(lenient.diagnostics.warning_count() >= 2);

    let operations = &model.services[0].ports[0].operations;
    assert_eq!(operations.len(), 1);

    let operation = &operations[0];
    assert!(!operation.wrapped);
    assert!(operation.async_kind.is_none());
    assert!(operation.request.body.is_empty());
    assert_eq!(operation.request.unbound.len(), 1);
    assert_eq!(operation.request.parameters[0].name, "parameters");
    assert_eq!(operation.request.parameters[0].type_name, "Add");
    let ret = operation.return_parameter().expect("return");
    assert_eq!(ret.type_name, "AddResponse");
}

const ALERTS: &str = r#"
    <wsdl:definitions name="Alerts" targetNamespace="urn:alerts"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:tns="urn:alerts">
        <wsdl:message name="alertOut">
            <wsdl:part name="body" type="xsd:string"/>
        </wsdl:message>
        <wsdl:portType name="AlertsPortType">
            <wsdl:operation name="notify">
                <wsdl:output message="tns:alertOut"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="AlertsBinding" type="tns:AlertsPortType">
            <soap:binding style="rpc"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="notify">
                <soap:operation/>
                <wsdl:output><soap:body use="literal" namespace="urn:alerts"/></wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="AlertsService">
            <wsdl:port name="AlertsPort" binding="tns:AlertsBinding">
                <soap:address location="http://localhost/alerts"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn notification_operations_error_strictly_and_skip_leniently() {
    let definitions = lather_wsdl::parse_str(ALERTS).expect("parse");

    let strict = model_document(&definitions, Options::default());
    assert!(strict.model.is_none());
    assert!(strict.diagnostics.has_errors());

    let lenient = model_document(
        &definitions,
        Options {
            extension: true,
            ..Options::default()
        },
    );
    let model = lenient.model.expect("model");
    assert!(model.services.is_empty());
    assert!(!lenient.diagnostics.has_errors());
}

const CONVERTER: &str = r#"
    <wsdl:definitions name="Converter" targetNamespace="urn:conv"
            xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
            xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
            xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:lt="http://lather.rs/customizations"
            xmlns:tns="urn:conv">
        <wsdl:message name="fromCelsius">
            <wsdl:part name="value" type="xsd:double"/>
        </wsdl:message>
        <wsdl:message name="fromFahrenheit">
            <wsdl:part name="value" type="xsd:double"/>
        </wsdl:message>
        <wsdl:message name="converted">
            <wsdl:part name="result" type="xsd:double"/>
        </wsdl:message>
        <wsdl:portType name="ConverterPortType">
            <wsdl:operation name="convert">
                <wsdl:input name="celsius" message="tns:fromCelsius"/>
                <wsdl:output name="celsiusOut" message="tns:converted"/>
            </wsdl:operation>
            <wsdl:operation name="convert">
                <lt:method name="convert_fahrenheit"/>
                <wsdl:input name="fahrenheit" message="tns:fromFahrenheit"/>
                <wsdl:output name="fahrenheitOut" message="tns:converted"/>
            </wsdl:operation>
        </wsdl:portType>
        <wsdl:binding name="ConverterBinding" type="tns:ConverterPortType">
            <soap:binding style="rpc"
                transport="http://schemas.xmlsoap.org/soap/http"/>
            <wsdl:operation name="convert">
                <soap:operation/>
                <wsdl:input name="fahrenheit">
                    <soap:body use="literal" namespace="urn:conv"/>
                </wsdl:input>
                <wsdl:output name="fahrenheitOut">
                    <soap:body use="literal" namespace="urn:conv"/>
                </wsdl:output>
            </wsdl:operation>
        </wsdl:binding>
        <wsdl:service name="ConverterService">
            <wsdl:port name="ConverterPort" binding="tns:ConverterBinding">
                <soap:address location="http://localhost/conv"/>
            </wsdl:port>
        </wsdl:service>
    </wsdl:definitions>
"#;

#[test]
fn overload_customizations_follow_the_matched_operation() {
    let (model, diagnostics) = build(CONVERTER);
    assert!(!diagnostics.has_errors());

    // the binding names its input/output, selecting the second
    // overload and its method rename
    let operations = &model.services[0].ports[0].operations;
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].method_name, "convert_fahrenheit");
}

#[test]
fn encoded_use_is_rejected_strictly_and_skipped_leniently() {
    let document = BANK.replace("use=\"literal\"", "use=\"encoded\"");

    let definitions = lather_wsdl::parse_str(&document).expect("parse");
    let strict = model_document(&definitions, Options::default());
    assert!(strict.model.is_none());
    assert!(strict.diagnostics.has_errors());

    let lenient = model_document(
        &definitions,
        Options {
            extension: true,
            ..Options::default()
        },
    );
    // the port loses its only operation and the service is dropped
    let model = lenient.model.expect("model");
    assert!(model.services.is_empty());
    assert!(!lenient.diagnostics.has_errors());
}

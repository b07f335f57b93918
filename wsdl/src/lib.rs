//! WSDL 1.1 document loading and parsing.
//!
//! [`parse`] accepts a URL or a filesystem path and produces the typed
//! document tree in [`document`], following `wsdl:import` and schema
//! imports relative to the document's own location. [`parse_str`]
//! parses in-memory text; imports are rejected there since no base URL
//! exists to resolve them against.

use std::path::PathBuf;

use url::Url;

pub mod document;
pub mod error;
pub mod parser;

pub use document::Definitions;
pub use error::Error;

pub fn parse<S: AsRef<str>>(url: S) -> Result<Definitions, Error> {
    let url = url.as_ref();

    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = PathBuf::from(url)
                .canonicalize()
                .map_err(|err| Error::PathConversionError(Some(err)))?;
            Url::from_file_path(path).map_err(|()| Error::PathConversionError(None))?
        }
        Err(err) => return Err(err.into()),
    };

    parser::parse(url)
}

pub fn parse_str(input: &str) -> Result<Definitions, Error> {
    parser::parse_str(input)
}

#[cfg(test)]
mod tests {
    use super::{
        document::{DescriptorKind, OperationFlow, SoapStyle, SoapVersion},
        parse_str,
    };

    const DOCUMENT: &str = r#"
        <wsdl:definitions name="Calculator"
                targetNamespace="urn:calc"
                xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
                xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                xmlns:tns="urn:calc">
            <wsdl:types>
                <xsd:schema targetNamespace="urn:calc">
                    <xsd:element name="add">
                        <xsd:complexType>
                            <xsd:sequence>
                                <xsd:element name="left" type="xsd:int"/>
                                <xsd:element name="right" type="xsd:int"/>
                            </xsd:sequence>
                        </xsd:complexType>
                    </xsd:element>
                    <xsd:element name="addResponse">
                        <xsd:complexType>
                            <xsd:sequence>
                                <xsd:element name="sum" type="xsd:int"/>
                            </xsd:sequence>
                        </xsd:complexType>
                    </xsd:element>
                </xsd:schema>
            </wsdl:types>
            <wsdl:message name="addRequest">
                <wsdl:part name="parameters" element="tns:add"/>
            </wsdl:message>
            <wsdl:message name="addResponse">
                <wsdl:part name="parameters" element="tns:addResponse"/>
            </wsdl:message>
            <wsdl:portType name="CalculatorPortType">
                <wsdl:operation name="add">
                    <wsdl:input message="tns:addRequest"/>
                    <wsdl:output message="tns:addResponse"/>
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
    fn parses_definitions() {
        let definitions = parse_str(DOCUMENT).unwrap();

        assert_eq!(definitions.name.as_deref(), Some("Calculator"));
        assert_eq!(definitions.target_namespace, "urn:calc");
        assert_eq!(definitions.messages.len(), 2);
        assert_eq!(definitions.port_types.len(), 1);
        assert_eq!(definitions.bindings.len(), 1);
        assert_eq!(definitions.services.len(), 1);
    }

    #[test]
    fn resolves_part_descriptors() {
        let definitions = parse_str(DOCUMENT).unwrap();

        let message = &definitions.messages[0];
        assert_eq!(message.name.local, "addRequest");
        let part = &message.parts[0];
        assert_eq!(part.name, "parameters");
        assert_eq!(part.kind, DescriptorKind::Element);
        assert_eq!(part.descriptor.namespace, "urn:calc");
        assert_eq!(part.descriptor.local, "add");
    }

    #[test]
    fn reads_operation_flow() {
        let definitions = parse_str(DOCUMENT).unwrap();

        let operation = &definitions.port_types[0].operations[0];
        assert_eq!(operation.name, "add");
        assert_eq!(operation.flow, OperationFlow::RequestResponse);
        assert!(operation.input.is_some());
        assert!(operation.output.is_some());
    }

    #[test]
    fn reads_binding_extensions() {
        let definitions = parse_str(DOCUMENT).unwrap();

        let binding = &definitions.bindings[0];
        let soap = binding.soap_binding.as_ref().unwrap();
        assert_eq!(soap.version, SoapVersion::Soap11);
        assert_eq!(soap.style, Some(SoapStyle::Document));

        let operation = &binding.operations[0];
        assert_eq!(
            operation
                .soap_operation
                .as_ref()
                .unwrap()
                .soap_action
                .as_deref(),
            Some("urn:calc:add")
        );
        assert!(operation.input.as_ref().unwrap().body.is_some());
    }

    #[test]
    fn reads_schema_shapes() {
        let definitions = parse_str(DOCUMENT).unwrap();

        assert_eq!(definitions.schema.elements.len(), 2);
        let element = &definitions.schema.elements[0];
        assert_eq!(element.name.local, "add");
        match element.inline.as_ref().unwrap() {
            super::document::SchemaShape::Sequence(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].name, "left");
                assert_eq!(fields[1].type_ref.local, "int");
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn rejects_part_with_both_descriptors() {
        let document = r#"
            <wsdl:definitions targetNamespace="urn:bad"
                    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                    xmlns:xsd="http://www.w3.org/2001/XMLSchema">
                <wsdl:message name="m">
                    <wsdl:part name="p" element="xsd:string" type="xsd:string"/>
                </wsdl:message>
            </wsdl:definitions>
        "#;

        assert!(parse_str(document).is_err());
    }

    #[test]
    fn rejects_undeclared_prefix() {
        let document = r#"
            <wsdl:definitions targetNamespace="urn:bad"
                    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/">
                <wsdl:message name="m">
                    <wsdl:part name="p" element="missing:thing"/>
                </wsdl:message>
            </wsdl:definitions>
        "#;

        assert!(parse_str(document).is_err());
    }

    #[test]
    fn rejects_import_without_base() {
        let document = r#"
            <wsdl:definitions targetNamespace="urn:imports"
                    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/">
                <wsdl:import namespace="urn:other" location="other.wsdl"/>
            </wsdl:definitions>
        "#;

        assert!(parse_str(document).is_err());
    }

    #[test]
    fn reads_customizations() {
        let document = r#"
            <wsdl:definitions targetNamespace="urn:custom"
                    xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                    xmlns:lt="http://lather.rs/customizations"
                    xmlns:tns="urn:custom">
                <lt:wrapper-style>false</lt:wrapper-style>
                <lt:package name="custom_api"/>
                <wsdl:message name="echoRequest"/>
                <wsdl:message name="echoResponse"/>
                <wsdl:portType name="EchoPortType">
                    <wsdl:operation name="echo">
                        <lt:method name="shout"/>
                        <lt:parameter part="text" name="message"/>
                        <wsdl:input message="tns:echoRequest"/>
                        <wsdl:output message="tns:echoResponse"/>
                    </wsdl:operation>
                </wsdl:portType>
            </wsdl:definitions>
        "#;

        let definitions = parse_str(document).unwrap();

        let global = definitions.customization.as_ref().unwrap();
        assert_eq!(global.wrapper_style, Some(false));
        assert_eq!(global.package_name.as_deref(), Some("custom_api"));

        let operation = &definitions.port_types[0].operations[0];
        let customization = operation.customization.as_ref().unwrap();
        assert_eq!(customization.method_name.as_deref(), Some("shout"));
        assert_eq!(customization.rename_for("text", None), Some("message"));
    }
}

//! The modeling driver: walks services, ports, and bound operations,
//! delegating to the classifier, reconciler, unwrapper, fault mapper,
//! and async synthesizer, and retries once with conflict-avoiding
//! names when generated type names collide.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use lather_wsdl::document::{
    Binding, BindingIo, BindingOperation, Customization, Definitions, DescriptorKind, Message,
    OperationFlow, PortType, PortTypeOperation, QName, SoapStyle, SoapUse, SoapVersion,
    SOAP_HTTP_TRANSPORT,
};

use super::{
    async_ops,
    binder::TypeBinder,
    classify::{self, PartBinding},
    diag::Diagnostics,
    faults, names, order, params,
    model::{
        Block, BlockContent, ExceptionEntry, MessageInfo, Mode, Model, Operation, Parameter,
        ParameterIndex, Port, Service,
    },
    wrapper,
};

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Relaxes strict WS-I conformance: many rejections become
    /// warnings and the offending construct is skipped instead.
    pub extension: bool,
    /// Model header parts from messages other than the operation's
    /// own input/output as extra parameters.
    pub additional_headers: bool,
    /// Overrides the `package` customization.
    pub package: Option<String>,
}

pub struct Outcome {
    pub model: Option<Model>,
    pub diagnostics: Diagnostics,
}

pub struct Modeler<'b> {
    binder: &'b dyn TypeBinder,
    options: Options,
}

impl<'b> Modeler<'b> {
    pub fn new(binder: &'b dyn TypeBinder, options: Options) -> Self {
        Self { binder, options }
    }

    pub fn build(&self, definitions: &Definitions) -> Outcome {
        let mut pass = Pass::new(definitions, self.binder, &self.options, None);
        let model = pass.run();

        let conflicts = self.conflicts(&model);
        let (model, mut diagnostics) = if conflicts.is_empty() {
            (model, pass.diagnostics)
        } else {
            // rebuild from scratch with avoidance suffixes; partial
            // state from the first pass is discarded wholesale
            let mut retry = Pass::new(definitions, self.binder, &self.options, Some(&conflicts));
            let model = retry.run();
            let remaining = self.conflicts(&model);
            if !remaining.is_empty() {
                let mut names: Vec<&str> = remaining.iter().map(String::as_str).collect();
                names.sort_unstable();
                retry.diagnostics.fatal(format!(
                    "unsolvable naming conflicts: {}",
                    names.join(", ")
                ));
            }
            (model, retry.diagnostics)
        };

        if diagnostics.has_errors() {
            return Outcome {
                model: None,
                diagnostics,
            };
        }

        if model.services.is_empty() {
            diagnostics.warning("document defines no modelable services");
        }

        Outcome {
            model: Some(model),
            diagnostics,
        }
    }

    /// Names claimed by more than one kind of generated construct.
    fn conflicts(&self, model: &Model) -> BTreeSet<String> {
        let services: BTreeSet<&str> = model
            .services
            .iter()
            .map(|service| service.type_name.as_str())
            .collect();
        let ports: BTreeSet<&str> = model
            .services
            .iter()
            .flat_map(|service| &service.ports)
            .map(|port| port.type_name.as_str())
            .collect();
        let exceptions: BTreeSet<&str> = model
            .exceptions
            .iter()
            .map(|exception| exception.name.as_str())
            .collect();
        let generated = self.binder.generated_names();
        let binder_names: BTreeSet<&str> = generated.iter().map(String::as_str).collect();

        let mut conflicts = BTreeSet::new();
        let sets = [&services, &ports, &exceptions, &binder_names];
        for (index, set) in sets.iter().enumerate() {
            for name in set.iter() {
                let elsewhere = sets
                    .iter()
                    .enumerate()
                    .any(|(other, set)| other != index && set.contains(name));
                if elsewhere {
                    conflicts.insert((*name).to_owned());
                }
            }
        }
        conflicts
    }
}

/// The empty-body sentinel in the per-port dispatch registry: two
/// operations that both send an empty body are indistinguishable on
/// the wire just like two operations sharing a body element.
fn void_body() -> QName {
    QName::unqualified("")
}

/// Style inference for bindings carrying no soap:binding extension:
/// type-described parts suggest rpc, element-described parts suggest
/// document, and the last part seen wins a mixed declaration.
fn infer_style(definitions: &Definitions, port_type: &PortType) -> SoapStyle {
    let mut style = SoapStyle::Document;
    for operation in &port_type.operations {
        for io in [&operation.input, &operation.output].into_iter().flatten() {
            if let Some(message) = definitions.message(&io.message) {
                for part in &message.parts {
                    style = match part.kind {
                        DescriptorKind::Type => SoapStyle::Rpc,
                        DescriptorKind::Element => SoapStyle::Document,
                    };
                }
            }
        }
    }
    style
}

/// The customization scope chain for one bound operation, innermost
/// first.
fn operation_scope<'c>(
    definitions: &'c Definitions,
    binding_operation: &'c BindingOperation,
    port_type_operation: &'c PortTypeOperation,
    port_type: &'c PortType,
) -> Vec<Option<&'c Customization>> {
    vec![
        binding_operation.customization.as_ref(),
        port_type_operation.customization.as_ref(),
        port_type.customization.as_ref(),
        definitions.customization.as_ref(),
    ]
}

struct Pass<'a> {
    definitions: &'a Definitions,
    binder: &'a dyn TypeBinder,
    options: &'a Options,
    avoid: Option<&'a BTreeSet<String>>,
    diagnostics: Diagnostics,
    exceptions: BTreeMap<String, ExceptionEntry>,
    built_bindings: HashMap<QName, Port>,
}

impl<'a> Pass<'a> {
    fn new(
        definitions: &'a Definitions,
        binder: &'a dyn TypeBinder,
        options: &'a Options,
        avoid: Option<&'a BTreeSet<String>>,
    ) -> Self {
        Self {
            definitions,
            binder,
            options,
            avoid,
            diagnostics: Diagnostics::new(),
            exceptions: BTreeMap::new(),
            built_bindings: HashMap::new(),
        }
    }

    fn run(&mut self) -> Model {
        let definitions = self.definitions;

        let mut services = Vec::new();
        for service in &definitions.services {
            let mut ports = Vec::new();
            for port in &service.ports {
                if let Some(port) = self.process_port(port) {
                    ports.push(port);
                }
            }

            if ports.is_empty() {
                self.diagnostics.warning(format!(
                    "service `{}` has no modelable ports and is dropped",
                    service.name
                ));
                continue;
            }

            let mut type_name = names::type_name(&service.name.local);
            if self.avoid.map_or(false, |avoid| avoid.contains(&type_name)) {
                type_name.push_str("_Service");
            }

            services.push(Service {
                name: service.name.clone(),
                type_name,
                ports,
            });
        }

        let package = self
            .options
            .package
            .clone()
            .or_else(|| {
                definitions
                    .customization
                    .as_ref()
                    .and_then(|customization| customization.package_name.clone())
            });

        Model {
            name: definitions.name.clone(),
            target_namespace: definitions.target_namespace.clone(),
            package,
            services,
            exceptions: self.exceptions.values().cloned().collect(),
        }
    }

    fn process_port(&mut self, port: &lather_wsdl::document::Port) -> Option<Port> {
        let definitions = self.definitions;
        let extension = self.options.extension;

        let binding = match definitions.binding(&port.binding) {
            Some(binding) => binding,
            None => {
                self.diagnostics.error(format!(
                    "port `{}` references undefined binding `{}`",
                    port.name, port.binding
                ));
                return None;
            }
        };

        let address = match &port.soap_address {
            Some(address) => Some(address.location.clone()),
            None => {
                let note = format!("port `{}` has no soap:address", port.name);
                if extension {
                    self.diagnostics.warning(note);
                    None
                } else {
                    self.diagnostics.error(note);
                    return None;
                }
            }
        };

        // a binding shared by several ports is modeled once
        if let Some(built) = self.built_bindings.get(&binding.name) {
            let mut reused = built.clone();
            reused.name = port.name.clone();
            reused.type_name = names::type_name(&port.name.local);
            reused.address = address;
            return Some(reused);
        }

        let soap_binding = match &binding.soap_binding {
            Some(soap_binding) => Some(soap_binding),
            None => {
                let note = format!(
                    "binding `{}` carries no soap:binding extension",
                    binding.name
                );
                if extension {
                    // best effort: assume document style over HTTP
                    self.diagnostics.warning(note);
                    None
                } else {
                    self.diagnostics.error(note);
                    return None;
                }
            }
        };

        if let Some(soap_binding) = soap_binding {
            if soap_binding.version == SoapVersion::Soap12 {
                let note = format!("binding `{}` uses SOAP 1.2", binding.name);
                if extension {
                    self.diagnostics.warning(note);
                } else {
                    self.diagnostics.error(note);
                    return None;
                }
            }

            match soap_binding.transport.as_deref() {
                Some(SOAP_HTTP_TRANSPORT) => (),
                other => {
                    let note = format!(
                        "binding `{}` uses unsupported transport `{}`",
                        binding.name,
                        other.unwrap_or("<none>")
                    );
                    if extension {
                        self.diagnostics.warning(note);
                    } else {
                        self.diagnostics.error(note);
                        return None;
                    }
                }
            }
        }

        let port_type = match definitions.port_type(&binding.port_type) {
            Some(port_type) => port_type,
            None => {
                self.diagnostics.error(format!(
                    "binding `{}` references undefined portType `{}`",
                    binding.name, binding.port_type
                ));
                return None;
            }
        };

        let default_style = match soap_binding {
            Some(soap_binding) => soap_binding.style.unwrap_or(SoapStyle::Document),
            None => infer_style(definitions, port_type),
        };

        let styles: BTreeSet<SoapStyle> = binding
            .operations
            .iter()
            .map(|operation| {
                operation
                    .soap_operation
                    .as_ref()
                    .and_then(|soap| soap.style)
                    .unwrap_or(default_style)
            })
            .collect();
        if styles.len() > 1 {
            let note = format!("binding `{}` mixes rpc and document styles", binding.name);
            if extension {
                self.diagnostics.warning(note);
            } else {
                self.diagnostics.error(note);
                return None;
            }
        }

        let mut operations: Vec<Operation> = Vec::new();
        let mut used_names: BTreeSet<String> = BTreeSet::new();
        let mut dispatch: HashMap<QName, String> = HashMap::new();

        let soapless = soap_binding.is_none();
        for binding_operation in &binding.operations {
            let port_type_operation =
                match self.match_port_type_operation(binding, port_type, binding_operation) {
                    Some(operation) => operation,
                    None => continue,
                };
            let built = self.process_operation(
                port_type,
                port_type_operation,
                binding_operation,
                default_style,
                soapless,
            );
            let mut operation = match built {
                Some(operation) => operation,
                None => continue,
            };

            // method names must be unique within a port; disambiguate
            // with the input message's local name
            if used_names.contains(&operation.method_name) {
                let input_name = port_type_operation
                    .input
                    .as_ref()
                    .map(|io| io.message.local.clone())
                    .unwrap_or_else(|| "input".to_owned());
                operation.unique_name =
                    format!("{}_{}", operation.method_name, names::var_name(&input_name));
            }
            used_names.insert(operation.method_name.clone());

            // document/literal dispatch is by body element; two
            // operations sharing one cannot be told apart
            if !soapless && operation.style == SoapStyle::Document {
                let body = operation
                    .request
                    .body
                    .first()
                    .map(|block| block.name.clone())
                    .unwrap_or_else(void_body);
                if let Some(other) = dispatch.get(&body) {
                    let note = format!(
                        "operations `{}` and `{}` of binding `{}` share the request body \
                         element `{}`",
                        other, operation.name, binding.name, body
                    );
                    if extension {
                        self.diagnostics.warning(note);
                    } else {
                        self.diagnostics.error(note);
                    }
                } else {
                    dispatch.insert(body, operation.name.clone());
                }
            }

            let wants_async = wrapper::resolve_flag(
                &operation_scope(definitions, binding_operation, port_type_operation, port_type),
                |customization| customization.async_mapping,
                false,
            );
            let mut synthesized = Vec::new();
            if wants_async {
                if soapless {
                    self.diagnostics.warning(format!(
                        "operation `{}` has no soap binding; asynchronous mapping is ignored",
                        operation.name
                    ));
                } else if operation.is_one_way() {
                    self.diagnostics.warning(format!(
                        "operation `{}` is one-way; asynchronous mapping is ignored",
                        operation.name
                    ));
                } else if let Some((polling, callback)) = async_ops::synthesize(
                    &format!("operation `{}`", operation.name),
                    &operation,
                    &definitions.target_namespace,
                    self.binder,
                    extension,
                    &mut self.diagnostics,
                ) {
                    synthesized.push(polling);
                    synthesized.push(callback);
                }
            }

            operations.push(operation);
            operations.extend(synthesized);
        }

        if operations.is_empty() {
            self.diagnostics.warning(format!(
                "port `{}` has no modelable operations and is dropped",
                port.name
            ));
            return None;
        }

        let wrapped = operations.iter().all(|operation| operation.wrapped);
        let built = Port {
            name: port.name.clone(),
            type_name: names::type_name(&port.name.local),
            binding: binding.name.clone(),
            port_type: port_type.name.clone(),
            address,
            style: Some(default_style),
            wrapped,
            operations,
        };

        self.built_bindings.insert(binding.name.clone(), built.clone());
        Some(built)
    }

    /// Matches a binding operation to its portType operation, using
    /// input/output name attributes to disambiguate overloads.
    fn match_port_type_operation<'c>(
        &mut self,
        binding: &Binding,
        port_type: &'c PortType,
        binding_operation: &'c BindingOperation,
    ) -> Option<&'c PortTypeOperation> {
        let candidates: Vec<&PortTypeOperation> = port_type
            .operations_named(&binding_operation.name)
            .collect();

        match candidates.len() {
            0 => {
                self.diagnostics.error(format!(
                    "binding `{}` declares operation `{}` which portType `{}` does not define",
                    binding.name, binding_operation.name, port_type.name
                ));
                None
            }
            1 => Some(candidates[0]),
            _ => {
                let input_name = binding_operation
                    .input
                    .as_ref()
                    .and_then(|io| io.name.as_deref());
                let output_name = binding_operation
                    .output
                    .as_ref()
                    .and_then(|io| io.name.as_deref());
                if input_name.is_none() && output_name.is_none() {
                    self.diagnostics.error(format!(
                        "operation `{}` of portType `{}` is overloaded; the binding must name \
                         its input and output to disambiguate",
                        binding_operation.name, port_type.name
                    ));
                    return None;
                }

                let matches: Vec<&PortTypeOperation> = candidates
                    .into_iter()
                    .filter(|candidate| {
                        let input_matches = candidate
                            .input
                            .as_ref()
                            .and_then(|io| io.name.as_deref())
                            == input_name;
                        let output_matches = candidate
                            .output
                            .as_ref()
                            .and_then(|io| io.name.as_deref())
                            == output_name;
                        input_matches && output_matches
                    })
                    .collect();

                match matches.len() {
                    1 => Some(matches[0]),
                    0 => {
                        self.diagnostics.error(format!(
                            "no overload of operation `{}` in portType `{}` matches the \
                             binding's input/output names",
                            binding_operation.name, port_type.name
                        ));
                        None
                    }
                    _ => {
                        self.diagnostics.error(format!(
                            "several overloads of operation `{}` in portType `{}` match the \
                             binding's input/output names",
                            binding_operation.name, port_type.name
                        ));
                        None
                    }
                }
            }
        }
    }

    fn process_operation(
        &mut self,
        port_type: &PortType,
        operation: &PortTypeOperation,
        binding_operation: &BindingOperation,
        default_style: SoapStyle,
        soapless: bool,
    ) -> Option<Operation> {
        let definitions = self.definitions;
        let extension = self.options.extension;

        let context = format!("operation `{}`", operation.name);

        match operation.flow {
            OperationFlow::OneWay | OperationFlow::RequestResponse => (),
            OperationFlow::SolicitResponse | OperationFlow::Notification => {
                let note = format!(
                    "{}: solicit-response and notification operations are not supported",
                    context
                );
                if extension {
                    self.diagnostics.warning(note);
                } else {
                    self.diagnostics.error(note);
                }
                return None;
            }
        }

        let style = binding_operation
            .soap_operation
            .as_ref()
            .and_then(|soap| soap.style)
            .unwrap_or(default_style);

        let input_io = binding_operation.input.clone().unwrap_or_default();
        let output_io = binding_operation.output.clone().unwrap_or_default();

        // rpc/encoded has no modern mapping
        let encoded = input_io
            .body
            .as_ref()
            .map_or(false, |body| !body.is_literal())
            || output_io
                .body
                .as_ref()
                .map_or(false, |body| !body.is_literal());
        if encoded {
            let note = format!("{}: encoded use is not supported", context);
            if extension {
                self.diagnostics.warning(note);
            } else {
                self.diagnostics.error(note);
            }
            return None;
        }

        let input_message = match operation
            .input
            .as_ref()
            .and_then(|io| definitions.message(&io.message))
        {
            Some(message) => message,
            None => {
                self.diagnostics.error(format!(
                    "{}: input message is missing or undefined",
                    context
                ));
                return None;
            }
        };

        let output_message = match &operation.output {
            Some(io) => match definitions.message(&io.message) {
                Some(message) => Some(message),
                None => {
                    self.diagnostics.error(format!(
                        "{}: output message `{}` is undefined",
                        context, io.message
                    ));
                    return None;
                }
            },
            None => None,
        };

        // without a soap binding there is nothing to classify against;
        // every part stays unbound
        let unbound = |message: &Message| -> HashMap<String, PartBinding> {
            message
                .parts
                .iter()
                .map(|part| (part.name.clone(), PartBinding::Unbound))
                .collect()
        };

        let request_bindings = if soapless {
            unbound(input_message)
        } else {
            classify::classify(
                &format!("{} input", context),
                input_message,
                &input_io,
                style,
                definitions,
                extension,
                &mut self.diagnostics,
            )?
        };

        let response_bindings = match output_message {
            Some(output_message) if soapless => Some(unbound(output_message)),
            Some(output_message) => Some(classify::classify(
                &format!("{} output", context),
                output_message,
                &output_io,
                style,
                definitions,
                extension,
                &mut self.diagnostics,
            )?),
            None => None,
        };

        let scope = operation_scope(definitions, binding_operation, operation, port_type);

        let ordered = order::reconcile(
            &operation.name,
            operation.parameter_order.as_deref(),
            input_message,
            output_message,
            &mut self.diagnostics,
        );

        let wrapped = !soapless
            && style == SoapStyle::Document
            && wrapper::is_unwrappable(
                self.binder,
                operation,
                &scope,
                input_message,
                output_message,
                &request_bindings,
                response_bindings.as_ref(),
            );

        let built = match style {
            SoapStyle::Document => params::build_doclit(
                &context,
                &operation.name,
                &scope,
                &ordered,
                input_message,
                &request_bindings,
                response_bindings.as_ref(),
                output_message.is_some(),
                wrapped,
                self.binder,
                extension,
                &mut self.diagnostics,
            )?,
            SoapStyle::Rpc => params::build_rpclit(
                &context,
                &operation.name,
                &scope,
                &ordered,
                input_io.body.as_ref(),
                output_io.body.as_ref(),
                &definitions.target_namespace,
                &request_bindings,
                response_bindings.as_ref(),
                output_message.is_some(),
                self.binder,
                extension,
                &mut self.diagnostics,
            )?,
        };

        let params::BuiltMessages {
            mut request,
            mut response,
        } = built;

        if self.options.additional_headers {
            self.add_additional_headers(
                &context,
                &input_io,
                &output_io,
                input_message,
                output_message,
                &mut request,
                response.as_mut(),
            );
        }

        let operation_faults = match response.as_mut() {
            Some(response) => faults::build_faults(
                &context,
                operation,
                binding_operation,
                definitions,
                self.binder,
                extension,
                self.avoid,
                &mut self.exceptions,
                response,
                &mut self.diagnostics,
            )?,
            None => {
                if !operation.faults.is_empty() {
                    self.diagnostics.warning(format!(
                        "{}: faults on a one-way operation are not modeled",
                        context
                    ));
                }
                Vec::new()
            }
        };

        let custom_method = scope
            .iter()
            .take(2)
            .flatten()
            .find_map(|customization| customization.method_name.as_deref());
        let method_name = match custom_method {
            Some(custom) if names::is_reserved(custom) => {
                let note = format!(
                    "{}: customized method name `{}` is a reserved word",
                    context, custom
                );
                if extension {
                    self.diagnostics.warning(note);
                    names::var_name(&operation.name)
                } else {
                    self.diagnostics.error(note);
                    return None;
                }
            }
            Some(custom) => custom.to_owned(),
            None => names::var_name(&operation.name),
        };

        let soap_action = binding_operation
            .soap_operation
            .as_ref()
            .and_then(|soap| soap.soap_action.clone());

        Some(Operation {
            name: operation.name.clone(),
            unique_name: method_name.clone(),
            method_name,
            style,
            usage: SoapUse::Literal,
            wrapped,
            soap_action,
            async_kind: None,
            documentation: operation.documentation.clone(),
            request,
            response,
            faults: operation_faults,
        })
    }

    /// Models header parts bound from foreign messages as trailing
    /// parameters, pairing request and response occurrences into
    /// INOUT.
    #[allow(clippy::too_many_arguments)]
    fn add_additional_headers(
        &mut self,
        context: &str,
        input_io: &BindingIo,
        output_io: &BindingIo,
        input_message: &Message,
        output_message: Option<&Message>,
        request: &mut MessageInfo,
        mut response: Option<&mut MessageInfo>,
    ) {
        let definitions = self.definitions;

        let mut next_index = request
            .parameters
            .iter()
            .chain(response.as_deref().map(|r| r.parameters.as_slice()).unwrap_or(&[]).iter())
            .filter(|parameter| parameter.index != ParameterIndex::Return)
            .filter_map(|parameter| match parameter.index {
                ParameterIndex::At(at) => Some(at + 1),
                ParameterIndex::Return => None,
            })
            .max()
            .unwrap_or(0);

        let mut request_extras: Vec<Parameter> = Vec::new();
        for header in &input_io.headers {
            if header.message == input_message.name {
                continue;
            }
            let part = definitions
                .message(&header.message)
                .and_then(|message| message.part(&header.part));
            let part = match part {
                Some(part) if part.kind == DescriptorKind::Element => part,
                _ => continue,
            };
            let bound = match self.binder.element(&part.descriptor) {
                Some(bound) => bound,
                None => {
                    self.diagnostics.warning(format!(
                        "{}: additional header element `{}` is not defined in the schema",
                        context, part.descriptor
                    ));
                    continue;
                }
            };

            if request.block(&bound.name).is_none() {
                request.headers.push(Block {
                    name: bound.name.clone(),
                    content: BlockContent::Bound(bound.clone()),
                });
            }
            let parameter = Parameter {
                name: names::var_name(&part.name),
                type_name: bound.type_name,
                mode: Mode::In,
                index: ParameterIndex::At(next_index),
                block: bound.name,
                element: None,
                link: None,
            };
            next_index += 1;
            request.parameters.push(parameter.clone());
            request_extras.push(parameter);
        }

        let response = match response.as_deref_mut() {
            Some(response) => response,
            None => return,
        };
        for header in &output_io.headers {
            if Some(&header.message) == output_message.map(|message| &message.name) {
                continue;
            }
            let part = definitions
                .message(&header.message)
                .and_then(|message| message.part(&header.part));
            let part = match part {
                Some(part) if part.kind == DescriptorKind::Element => part,
                _ => continue,
            };
            let bound = match self.binder.element(&part.descriptor) {
                Some(bound) => bound,
                None => {
                    self.diagnostics.warning(format!(
                        "{}: additional header element `{}` is not defined in the schema",
                        context, part.descriptor
                    ));
                    continue;
                }
            };

            if response.block(&bound.name).is_none() {
                response.headers.push(Block {
                    name: bound.name.clone(),
                    content: BlockContent::Bound(bound.clone()),
                });
            }

            // the same header in both directions is one INOUT
            // parameter
            let name = names::var_name(&part.name);
            if let Some(existing) = request_extras
                .iter()
                .find(|extra| extra.name == name && extra.block == bound.name)
            {
                for parameter in request.parameters.iter_mut() {
                    if parameter.name == existing.name && parameter.block == existing.block {
                        parameter.mode = Mode::InOut;
                        parameter.link = Some(parameter.name.clone());
                    }
                }
                response.parameters.push(Parameter {
                    mode: Mode::InOut,
                    link: Some(existing.name.clone()),
                    ..existing.clone()
                });
                continue;
            }

            response.parameters.push(Parameter {
                name,
                type_name: bound.type_name,
                mode: Mode::Out,
                index: ParameterIndex::At(next_index),
                block: bound.name,
                element: None,
                link: None,
            });
            next_index += 1;
        }
    }
}

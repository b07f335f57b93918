use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::{
    collections::HashMap,
    io::{BufRead, BufReader},
};
use url::Url;

use super::{
    document::{
        Binding, BindingFault, BindingIo, BindingOperation, Customization, Definitions,
        DescriptorKind, Message, MimeContent, OperationFlow, OperationIo, ParameterRename, Part,
        Port, PortType, PortTypeFault, PortTypeOperation, QName, SchemaElement,
        SchemaField, SchemaShape, SchemaType, Service, SoapAddress, SoapBinding, SoapBody,
        SoapFault, SoapHeader, SoapOperation, SoapStyle, SoapUse, SoapVersion,
    },
    error,
};

pub const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const SOAP12_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
pub const MIME_NS: &str = "http://schemas.xmlsoap.org/wsdl/mime/";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const CUSTOMIZATIONS_NS: &str = "http://lather.rs/customizations";

fn split_prefixed(prefixed_name: &str) -> (Option<&str>, &str) {
    let mut split = prefixed_name.split(':');
    let first = split.next().unwrap();
    let second = split.next();

    if let Some(second) = second {
        (Some(first), second)
    } else {
        (None, first)
    }
}

/// A fully-resolved start tag: namespace, local name, and its non-xmlns
/// attributes, decoded up front so nothing borrows the read buffer.
struct Element {
    namespace: String,
    local: String,
    attributes: Vec<(String, String)>,
    empty: bool,
}

impl Element {
    fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn require(&self, name: &str) -> Result<&str, error::Error> {
        self.attr(name).ok_or_else(|| {
            error::Error::Malformed(format!(
                "element `{}` is missing required attribute `{}`",
                self.local, name
            ))
        })
    }
}

pub struct Parser {
    root: Option<Url>,
    scopes: Vec<HashMap<Option<String>, String>>,
    targets: Vec<String>,
    definitions: Definitions,
}

impl Parser {
    fn new(root: Option<Url>) -> Self {
        Self {
            root,
            scopes: Vec::new(),
            targets: Vec::new(),
            definitions: Definitions::default(),
        }
    }

    fn lookup_prefix(&self, prefix: Option<&str>) -> Option<&str> {
        let key = prefix.map(ToOwned::to_owned);
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&key))
            .map(String::as_str)
    }

    fn target_namespace(&self) -> &str {
        self.targets.last().map(String::as_str).unwrap_or("")
    }

    /// Resolves a QName-valued attribute. An unprefixed value resolves
    /// to the current target namespace.
    fn resolve_qname(&self, value: &str) -> Result<QName, error::Error> {
        let (prefix, local) = split_prefixed(value);
        match prefix {
            Some(prefix) => {
                let namespace = self
                    .lookup_prefix(Some(prefix))
                    .ok_or_else(|| error::Error::UndeclaredPrefix(prefix.to_owned()))?;
                Ok(QName::new(namespace, local))
            }
            None => Ok(QName::new(self.target_namespace(), local)),
        }
    }

    fn target_qname(&self, local: &str) -> QName {
        QName::new(self.target_namespace(), local)
    }

    fn open<B: BufRead>(
        &mut self,
        reader: &Reader<B>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<Element, error::Error> {
        let mut scope = HashMap::new();
        let mut attributes = Vec::new();

        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = reader.decode(attribute.key)?;
            let value = reader.decode(attribute.value.as_ref())?.to_owned();

            match split_prefixed(key) {
                (Some("xmlns"), prefix) => {
                    scope.insert(Some(prefix.to_owned()), value);
                }
                (None, "xmlns") => {
                    scope.insert(None, value);
                }
                _ => attributes.push((key.to_owned(), value)),
            }
        }

        self.scopes.push(scope);

        let (prefix, local) = split_prefixed(reader.decode(start.name())?);
        let namespace = match prefix {
            Some(prefix) => self
                .lookup_prefix(Some(prefix))
                .ok_or_else(|| error::Error::UndeclaredPrefix(prefix.to_owned()))?
                .to_owned(),
            None => self.lookup_prefix(None).unwrap_or("").to_owned(),
        };

        Ok(Element {
            namespace,
            local: local.to_owned(),
            attributes,
            empty,
        })
    }

    /// Reads the children of the current element, calling `f` for each
    /// child start tag. `f` must consume the child's content up to and
    /// including its end tag (unless the child is empty); the namespace
    /// scope opened for the child is popped here after `f` returns.
    fn children<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        f: &mut dyn FnMut(&mut Self, &mut Reader<B>, Element) -> Result<(), error::Error>,
    ) -> Result<(), error::Error> {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            match reader.read_event(&mut buffer)? {
                Event::Start(start) => {
                    let element = self.open(reader, &start, false)?;
                    f(self, reader, element)?;
                    self.scopes.pop();
                }
                Event::Empty(start) => {
                    let element = self.open(reader, &start, true)?;
                    f(self, reader, element)?;
                    self.scopes.pop();
                }
                Event::End(..) => break,
                Event::Eof => {
                    return Err(error::Error::Malformed(
                        "unexpected end of document".to_owned(),
                    ))
                }
                _ => (),
            }
        }

        Ok(())
    }

    /// Consumes an element's content without interpreting it.
    fn skip<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        if element.empty {
            return Ok(());
        }

        let mut buffer = Vec::new();
        let mut depth = 0usize;

        loop {
            buffer.clear();
            match reader.read_event(&mut buffer)? {
                Event::Start(..) => depth += 1,
                Event::End(..) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Event::Eof => {
                    return Err(error::Error::Malformed(
                        "unexpected end of document".to_owned(),
                    ))
                }
                _ => (),
            }
        }

        Ok(())
    }

    /// Collects the text content of an element, skipping nested markup.
    fn text<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<String, error::Error> {
        let mut content = String::new();
        if element.empty {
            return Ok(content);
        }

        let mut buffer = Vec::new();
        let mut depth = 0usize;

        loop {
            buffer.clear();
            match reader.read_event(&mut buffer)? {
                Event::Text(text) => {
                    if depth == 0 {
                        content.push_str(&text.unescape_and_decode(reader)?);
                    }
                }
                Event::Start(..) => depth += 1,
                Event::End(..) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Event::Eof => {
                    return Err(error::Error::Malformed(
                        "unexpected end of document".to_owned(),
                    ))
                }
                _ => (),
            }
        }

        Ok(content)
    }

    fn bool_text<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<bool, error::Error> {
        let content = self.text(reader, element)?;
        match content.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(error::Error::Malformed(format!(
                "expected a boolean in `{}`, found `{}`",
                element.local, other
            ))),
        }
    }

    fn parse_url(&mut self, url: Url) -> Result<(), error::Error> {
        match url.scheme() {
            "file" => {
                let reader = Reader::from_file(
                    url.to_file_path()
                        .map_err(|()| error::Error::PathConversionError(None))?,
                )
                .map_err(error::Error::FileOpenError)?;
                self.parse_document(reader)
            }

            "http" | "https" => self.parse_document(Reader::from_reader(BufReader::new(
                reqwest::blocking::get(url)?,
            ))),

            other => Err(error::Error::UnsupportedScheme(other.into())),
        }
    }

    fn import(&mut self, location: &str) -> Result<(), error::Error> {
        let base = self.root.clone().ok_or(error::Error::ImportWithoutBase)?;
        self.parse_url(base.join(location)?)
    }

    fn parse_document<B: BufRead>(&mut self, mut reader: Reader<B>) -> Result<(), error::Error> {
        reader.trim_text(true);
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            match reader.read_event(&mut buffer)? {
                Event::Start(start) => {
                    let element = self.open(&reader, &start, false)?;
                    if element.is(WSDL_NS, "definitions") {
                        self.parse_definitions(&mut reader, &element)?;
                    } else if element.is(XSD_NS, "schema") {
                        // an imported document may be a bare schema
                        self.parse_schema(&mut reader, &element)?;
                    } else {
                        return Err(error::Error::Malformed(format!(
                            "expected wsdl:definitions, found `{}`",
                            element.local
                        )));
                    }
                    self.scopes.pop();
                }
                Event::Eof => break,
                _ => (),
            }
        }

        Ok(())
    }

    fn parse_definitions<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let target = element.require("targetNamespace")?.to_owned();
        if self.definitions.target_namespace.is_empty() {
            self.definitions.target_namespace = target.clone();
            self.definitions.name = element.attr("name").map(ToOwned::to_owned);
        }
        self.targets.push(target);

        self.children(reader, &mut |parser, reader, child| {
            if child.is(WSDL_NS, "documentation") {
                let text = parser.text(reader, &child)?;
                if parser.definitions.documentation.is_none() && !text.is_empty() {
                    parser.definitions.documentation = Some(text);
                }
                Ok(())
            } else if child.is(WSDL_NS, "types") {
                parser.parse_types(reader, &child)
            } else if child.is(WSDL_NS, "message") {
                parser.parse_message(reader, &child)
            } else if child.is(WSDL_NS, "portType") {
                parser.parse_port_type(reader, &child)
            } else if child.is(WSDL_NS, "binding") {
                parser.parse_binding(reader, &child)
            } else if child.is(WSDL_NS, "service") {
                parser.parse_service(reader, &child)
            } else if child.is(WSDL_NS, "import") {
                let location = child.require("location")?.to_owned();
                parser.skip(reader, &child)?;
                parser.import(&location)
            } else if child.namespace == CUSTOMIZATIONS_NS {
                let mut customization = parser.definitions.customization.take().unwrap_or_default();
                parser.parse_customization(reader, &child, &mut customization)?;
                parser.definitions.customization = Some(customization);
                Ok(())
            } else {
                parser.skip(reader, &child)
            }
        })?;

        self.targets.pop();
        Ok(())
    }

    fn parse_types<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        if element.empty {
            return Ok(());
        }

        self.children(reader, &mut |parser, reader, child| {
            if child.is(XSD_NS, "schema") {
                parser.parse_schema(reader, &child)
            } else {
                parser.skip(reader, &child)
            }
        })
    }

    fn parse_schema<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let target = element
            .attr("targetNamespace")
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| self.target_namespace().to_owned());
        self.targets.push(target);

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(XSD_NS, "element") {
                    parser.parse_schema_element(reader, &child)
                } else if child.is(XSD_NS, "complexType") {
                    let name = child.require("name")?.to_owned();
                    let shape = parser.parse_complex_type(reader, &child)?;
                    let name = parser.target_qname(&name);
                    parser.definitions.schema.types.push(SchemaType { name, shape });
                    Ok(())
                } else if child.is(XSD_NS, "import") || child.is(XSD_NS, "include") {
                    let location = child.attr("schemaLocation").map(ToOwned::to_owned);
                    parser.skip(reader, &child)?;
                    match location {
                        Some(location) => parser.import(&location),
                        None => Ok(()),
                    }
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        self.targets.pop();
        Ok(())
    }

    fn parse_schema_element<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let name = element.require("name")?.to_owned();
        let type_ref = match element.attr("type") {
            Some(value) => Some(self.resolve_qname(value)?),
            None => None,
        };

        let mut inline = None;
        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(XSD_NS, "complexType") {
                    inline = Some(parser.parse_complex_type(reader, &child)?);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        let name = self.target_qname(&name);
        self.definitions.schema.elements.push(SchemaElement {
            name,
            type_ref,
            inline,
        });
        Ok(())
    }

    fn parse_complex_type<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<SchemaShape, error::Error> {
        if element.empty {
            return Ok(SchemaShape::Sequence(Vec::new()));
        }

        let mut shape = SchemaShape::Sequence(Vec::new());

        self.children(reader, &mut |parser, reader, child| {
            if child.is(XSD_NS, "sequence") {
                shape = parser.parse_sequence(reader, &child)?;
                Ok(())
            } else if child.namespace == XSD_NS
                && matches!(
                    child.local.as_str(),
                    "choice" | "all" | "attribute" | "anyAttribute" | "complexContent"
                        | "simpleContent" | "group"
                )
            {
                shape = SchemaShape::Opaque;
                parser.skip(reader, &child)
            } else {
                parser.skip(reader, &child)
            }
        })?;

        Ok(shape)
    }

    fn parse_sequence<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<SchemaShape, error::Error> {
        let mut fields = Vec::new();
        let mut opaque = false;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(XSD_NS, "element") {
                    match (child.attr("name"), child.attr("type")) {
                        (Some(name), Some(type_ref)) => {
                            let type_ref = parser.resolve_qname(type_ref)?;
                            fields.push(SchemaField {
                                name: name.to_owned(),
                                type_ref,
                            });
                        }
                        // inline or ref-based children disqualify the
                        // sequence from unwrapping
                        _ => opaque = true,
                    }
                    parser.skip(reader, &child)
                } else {
                    opaque = true;
                    parser.skip(reader, &child)
                }
            })?;
        }

        if opaque {
            Ok(SchemaShape::Opaque)
        } else {
            Ok(SchemaShape::Sequence(fields))
        }
    }

    fn parse_message<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let name = self.target_qname(element.require("name")?);
        let mut parts = Vec::new();

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(WSDL_NS, "part") {
                    let part_name = child.require("name")?.to_owned();
                    let part = match (child.attr("element"), child.attr("type")) {
                        (Some(element_ref), None) => Part {
                            name: part_name,
                            descriptor: parser.resolve_qname(element_ref)?,
                            kind: DescriptorKind::Element,
                        },
                        (None, Some(type_ref)) => Part {
                            name: part_name,
                            descriptor: parser.resolve_qname(type_ref)?,
                            kind: DescriptorKind::Type,
                        },
                        _ => {
                            return Err(error::Error::Malformed(format!(
                                "part `{}` must carry exactly one of `element` or `type`",
                                part_name
                            )))
                        }
                    };
                    parts.push(part);
                    parser.skip(reader, &child)
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        self.definitions.messages.push(Message { name, parts });
        Ok(())
    }

    fn parse_port_type<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let name = self.target_qname(element.require("name")?);
        let mut operations = Vec::new();
        let mut customization: Option<Customization> = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(WSDL_NS, "operation") {
                    operations.push(parser.parse_port_type_operation(reader, &child)?);
                    Ok(())
                } else if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        self.definitions.port_types.push(PortType {
            name,
            operations,
            customization,
        });
        Ok(())
    }

    fn parse_port_type_operation<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<PortTypeOperation, error::Error> {
        let name = element.require("name")?.to_owned();
        let parameter_order = element.attr("parameterOrder").map(ToOwned::to_owned);

        let mut documentation = None;
        let mut input: Option<OperationIo> = None;
        let mut output: Option<OperationIo> = None;
        let mut faults = Vec::new();
        let mut customization: Option<Customization> = None;
        let mut output_first = false;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(WSDL_NS, "documentation") {
                    let text = parser.text(reader, &child)?;
                    if !text.is_empty() {
                        documentation = Some(text);
                    }
                    Ok(())
                } else if child.is(WSDL_NS, "input") {
                    input = Some(OperationIo {
                        name: child.attr("name").map(ToOwned::to_owned),
                        message: parser.resolve_qname(child.require("message")?)?,
                    });
                    parser.skip(reader, &child)
                } else if child.is(WSDL_NS, "output") {
                    if input.is_none() {
                        output_first = true;
                    }
                    output = Some(OperationIo {
                        name: child.attr("name").map(ToOwned::to_owned),
                        message: parser.resolve_qname(child.require("message")?)?,
                    });
                    parser.skip(reader, &child)
                } else if child.is(WSDL_NS, "fault") {
                    faults.push(parser.parse_port_type_fault(reader, &child)?);
                    Ok(())
                } else if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        let flow = match (&input, &output) {
            (Some(..), Some(..)) if output_first => OperationFlow::SolicitResponse,
            (Some(..), Some(..)) => OperationFlow::RequestResponse,
            (Some(..), None) => OperationFlow::OneWay,
            (None, Some(..)) => OperationFlow::Notification,
            (None, None) => {
                return Err(error::Error::Malformed(format!(
                    "operation `{}` has neither input nor output",
                    name
                )))
            }
        };

        Ok(PortTypeOperation {
            name,
            documentation,
            parameter_order,
            flow,
            input,
            output,
            faults,
            customization,
        })
    }

    fn parse_port_type_fault<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<PortTypeFault, error::Error> {
        let name = element.require("name")?.to_owned();
        let message = self.resolve_qname(element.require("message")?)?;
        let mut customization: Option<Customization> = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        Ok(PortTypeFault {
            name,
            message,
            customization,
        })
    }

    fn parse_binding<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let name = self.target_qname(element.require("name")?);
        let port_type = self.resolve_qname(element.require("type")?)?;
        let mut soap_binding = None;
        let mut operations = Vec::new();
        let mut customization: Option<Customization> = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(SOAP_NS, "binding") || child.is(SOAP12_NS, "binding") {
                    let version = if child.namespace == SOAP_NS {
                        SoapVersion::Soap11
                    } else {
                        SoapVersion::Soap12
                    };
                    soap_binding = Some(SoapBinding {
                        version,
                        style: parse_style(child.attr("style"))?,
                        transport: child.attr("transport").map(ToOwned::to_owned),
                    });
                    parser.skip(reader, &child)
                } else if child.is(WSDL_NS, "operation") {
                    operations.push(parser.parse_binding_operation(reader, &child)?);
                    Ok(())
                } else if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        self.definitions.bindings.push(Binding {
            name,
            port_type,
            soap_binding,
            operations,
            customization,
        });
        Ok(())
    }

    fn parse_binding_operation<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<BindingOperation, error::Error> {
        let name = element.require("name")?.to_owned();
        let mut soap_operation = None;
        let mut input = None;
        let mut output = None;
        let mut faults = Vec::new();
        let mut customization: Option<Customization> = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(SOAP_NS, "operation") || child.is(SOAP12_NS, "operation") {
                    soap_operation = Some(SoapOperation {
                        style: parse_style(child.attr("style"))?,
                        soap_action: child.attr("soapAction").map(ToOwned::to_owned),
                    });
                    parser.skip(reader, &child)
                } else if child.is(WSDL_NS, "input") {
                    input = Some(parser.parse_binding_io(reader, &child)?);
                    Ok(())
                } else if child.is(WSDL_NS, "output") {
                    output = Some(parser.parse_binding_io(reader, &child)?);
                    Ok(())
                } else if child.is(WSDL_NS, "fault") {
                    faults.push(parser.parse_binding_fault(reader, &child)?);
                    Ok(())
                } else if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        Ok(BindingOperation {
            name,
            soap_operation,
            input,
            output,
            faults,
            customization,
        })
    }

    fn parse_binding_io<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<BindingIo, error::Error> {
        let mut io = BindingIo {
            name: element.attr("name").map(ToOwned::to_owned),
            ..BindingIo::default()
        };

        if !element.empty {
            self.parse_binding_io_children(reader, &mut io)?;
        }

        Ok(io)
    }

    /// Shared by wsdl:input/output and the mime container elements that
    /// may nest soap:body / mime:content arbitrarily deep.
    fn parse_binding_io_children<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        io: &mut BindingIo,
    ) -> Result<(), error::Error> {
        self.children(reader, &mut |parser, reader, child| {
            if child.is(SOAP_NS, "body") || child.is(SOAP12_NS, "body") {
                io.body = Some(SoapBody {
                    parts: child.attr("parts").map(ToOwned::to_owned),
                    usage: parse_use(child.attr("use"))?,
                    namespace: child.attr("namespace").map(ToOwned::to_owned),
                });
                parser.skip(reader, &child)
            } else if child.is(SOAP_NS, "header") || child.is(SOAP12_NS, "header") {
                io.headers.push(SoapHeader {
                    message: parser.resolve_qname(child.require("message")?)?,
                    part: child.require("part")?.to_owned(),
                    usage: parse_use(child.attr("use"))?,
                    namespace: child.attr("namespace").map(ToOwned::to_owned),
                });
                parser.skip(reader, &child)
            } else if child.is(MIME_NS, "content") {
                io.mime_contents.push(MimeContent {
                    part: child.require("part")?.to_owned(),
                    mime_type: child.attr("type").map(ToOwned::to_owned),
                });
                parser.skip(reader, &child)
            } else if child.is(MIME_NS, "multipartRelated") || child.is(MIME_NS, "part") {
                if child.empty {
                    Ok(())
                } else {
                    parser.parse_binding_io_children(reader, io)
                }
            } else {
                parser.skip(reader, &child)
            }
        })
    }

    fn parse_binding_fault<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<BindingFault, error::Error> {
        let name = element.require("name")?.to_owned();
        let mut soap_fault = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(SOAP_NS, "fault") || child.is(SOAP12_NS, "fault") {
                    soap_fault = Some(SoapFault {
                        name: child.attr("name").map(ToOwned::to_owned),
                        usage: parse_use(child.attr("use"))?,
                        namespace: child.attr("namespace").map(ToOwned::to_owned),
                    });
                    parser.skip(reader, &child)
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        Ok(BindingFault { name, soap_fault })
    }

    fn parse_service<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<(), error::Error> {
        let name = self.target_qname(element.require("name")?);
        let mut ports = Vec::new();
        let mut customization: Option<Customization> = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(WSDL_NS, "port") {
                    ports.push(parser.parse_port(reader, &child)?);
                    Ok(())
                } else if child.namespace == CUSTOMIZATIONS_NS {
                    let mut built = customization.take().unwrap_or_default();
                    parser.parse_customization(reader, &child, &mut built)?;
                    customization = Some(built);
                    Ok(())
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        self.definitions.services.push(Service {
            name,
            ports,
            customization,
        });
        Ok(())
    }

    fn parse_port<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
    ) -> Result<Port, error::Error> {
        let name = self.target_qname(element.require("name")?);
        let binding = self.resolve_qname(element.require("binding")?)?;
        let mut soap_address = None;

        if !element.empty {
            self.children(reader, &mut |parser, reader, child| {
                if child.is(SOAP_NS, "address") || child.is(SOAP12_NS, "address") {
                    soap_address = Some(SoapAddress {
                        location: child.require("location")?.to_owned(),
                    });
                    parser.skip(reader, &child)
                } else {
                    parser.skip(reader, &child)
                }
            })?;
        }

        Ok(Port {
            name,
            binding,
            soap_address,
        })
    }

    fn parse_customization<B: BufRead>(
        &mut self,
        reader: &mut Reader<B>,
        element: &Element,
        customization: &mut Customization,
    ) -> Result<(), error::Error> {
        match element.local.as_str() {
            "wrapper-style" => {
                customization.wrapper_style = Some(self.bool_text(reader, element)?);
            }
            "async-mapping" => {
                customization.async_mapping = Some(self.bool_text(reader, element)?);
            }
            "mime-content" => {
                customization.mime_content = Some(self.bool_text(reader, element)?);
            }
            "method" => {
                customization.method_name = Some(element.require("name")?.to_owned());
                self.skip(reader, element)?;
            }
            "class" => {
                customization.type_name = Some(element.require("name")?.to_owned());
                self.skip(reader, element)?;
            }
            "package" => {
                customization.package_name = Some(element.require("name")?.to_owned());
                self.skip(reader, element)?;
            }
            "parameter" => {
                customization.parameter_renames.push(ParameterRename {
                    part: element.require("part")?.to_owned(),
                    child: element.attr("child").map(ToOwned::to_owned),
                    name: element.require("name")?.to_owned(),
                });
                self.skip(reader, element)?;
            }
            _ => self.skip(reader, element)?,
        }

        Ok(())
    }
}

fn parse_style(value: Option<&str>) -> Result<Option<SoapStyle>, error::Error> {
    match value {
        None => Ok(None),
        Some("rpc") => Ok(Some(SoapStyle::Rpc)),
        Some("document") => Ok(Some(SoapStyle::Document)),
        Some(other) => Err(error::Error::Malformed(format!(
            "unknown SOAP style `{}`",
            other
        ))),
    }
}

fn parse_use(value: Option<&str>) -> Result<Option<SoapUse>, error::Error> {
    match value {
        None => Ok(None),
        Some("literal") => Ok(Some(SoapUse::Literal)),
        Some("encoded") => Ok(Some(SoapUse::Encoded)),
        Some(other) => Err(error::Error::Malformed(format!(
            "unknown SOAP use `{}`",
            other
        ))),
    }
}

pub fn parse(url: Url) -> Result<Definitions, error::Error> {
    let mut parser = Parser::new(Some(url.clone()));
    parser.parse_url(url)?;
    Ok(parser.definitions)
}

pub fn parse_str(input: &str) -> Result<Definitions, error::Error> {
    let mut parser = Parser::new(None);
    parser.parse_document(Reader::from_str(input))?;
    Ok(parser.definitions)
}

//! The parsed WSDL document tree.
//!
//! Everything here is plain data produced by the parser: abstract
//! messages, port types and operations on one side, concrete bindings
//! with their SOAP/MIME extensions on the other. Protocol extensions
//! are stored as typed optional fields on the construct that carries
//! them rather than as an open-ended extension bag.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new<N: Into<String>, L: Into<String>>(namespace: N, local: L) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// A name with no namespace, used for synthesized constructs.
    pub fn unqualified<L: Into<String>>(local: L) -> Self {
        Self {
            namespace: String::new(),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SoapStyle {
    Rpc,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapUse {
    Literal,
    Encoded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapVersion {
    Soap11,
    Soap12,
}

pub const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

#[derive(Debug, Clone)]
pub struct SoapAddress {
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct SoapBinding {
    pub version: SoapVersion,
    pub style: Option<SoapStyle>,
    pub transport: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SoapOperation {
    pub style: Option<SoapStyle>,
    pub soap_action: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SoapBody {
    /// Space-separated part names from the `parts` attribute. `None`
    /// means the attribute was absent, which is different from an
    /// explicit empty list.
    pub parts: Option<String>,
    pub usage: Option<SoapUse>,
    pub namespace: Option<String>,
}

impl SoapBody {
    pub fn is_literal(&self) -> bool {
        !matches!(self.usage, Some(SoapUse::Encoded))
    }
}

#[derive(Debug, Clone)]
pub struct SoapHeader {
    pub message: QName,
    pub part: String,
    pub usage: Option<SoapUse>,
    pub namespace: Option<String>,
}

impl SoapHeader {
    pub fn is_literal(&self) -> bool {
        !matches!(self.usage, Some(SoapUse::Encoded))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoapFault {
    pub name: Option<String>,
    pub usage: Option<SoapUse>,
    pub namespace: Option<String>,
}

impl SoapFault {
    pub fn is_literal(&self) -> bool {
        !matches!(self.usage, Some(SoapUse::Encoded))
    }
}

#[derive(Debug, Clone)]
pub struct MimeContent {
    pub part: String,
    pub mime_type: Option<String>,
}

/// Vendor customizations attached to a construct, the innermost one
/// winning over outer scopes (operation over portType over definitions).
#[derive(Debug, Clone, Default)]
pub struct Customization {
    pub wrapper_style: Option<bool>,
    pub async_mapping: Option<bool>,
    pub mime_content: Option<bool>,
    pub method_name: Option<String>,
    pub type_name: Option<String>,
    pub package_name: Option<String>,
    pub parameter_renames: Vec<ParameterRename>,
}

#[derive(Debug, Clone)]
pub struct ParameterRename {
    pub part: String,
    /// For wrapper-style operations the rename targets a child element
    /// of the wrapper rather than the part itself.
    pub child: Option<String>,
    pub name: String,
}

impl Customization {
    pub fn rename_for(&self, part: &str, child: Option<&str>) -> Option<&str> {
        self.parameter_renames
            .iter()
            .find(|rename| rename.part == part && rename.child.as_deref() == child)
            .map(|rename| rename.name.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// The part references a schema element declaration.
    Element,
    /// The part references a schema type.
    Type,
}

#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub descriptor: QName,
    pub kind: DescriptorKind,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub name: QName,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.name == name)
    }
}

/// The message-exchange pattern of an abstract operation, derived from
/// which of input/output are present and their document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationFlow {
    OneWay,
    RequestResponse,
    SolicitResponse,
    Notification,
}

#[derive(Debug, Clone)]
pub struct OperationIo {
    pub name: Option<String>,
    pub message: QName,
}

#[derive(Debug, Clone)]
pub struct PortTypeFault {
    pub name: String,
    pub message: QName,
    pub customization: Option<Customization>,
}

#[derive(Debug, Clone)]
pub struct PortTypeOperation {
    pub name: String,
    pub documentation: Option<String>,
    pub parameter_order: Option<String>,
    pub flow: OperationFlow,
    pub input: Option<OperationIo>,
    pub output: Option<OperationIo>,
    pub faults: Vec<PortTypeFault>,
    pub customization: Option<Customization>,
}

#[derive(Debug, Clone)]
pub struct PortType {
    pub name: QName,
    pub operations: Vec<PortTypeOperation>,
    pub customization: Option<Customization>,
}

impl PortType {
    pub fn operations_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a PortTypeOperation> + 'a {
        self.operations.iter().filter(move |op| op.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindingIo {
    pub name: Option<String>,
    pub body: Option<SoapBody>,
    pub headers: Vec<SoapHeader>,
    pub mime_contents: Vec<MimeContent>,
}

#[derive(Debug, Clone)]
pub struct BindingFault {
    pub name: String,
    pub soap_fault: Option<SoapFault>,
}

#[derive(Debug, Clone)]
pub struct BindingOperation {
    pub name: String,
    pub soap_operation: Option<SoapOperation>,
    pub input: Option<BindingIo>,
    pub output: Option<BindingIo>,
    pub faults: Vec<BindingFault>,
    pub customization: Option<Customization>,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: QName,
    pub port_type: QName,
    pub soap_binding: Option<SoapBinding>,
    pub operations: Vec<BindingOperation>,
    pub customization: Option<Customization>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub name: QName,
    pub binding: QName,
    pub soap_address: Option<SoapAddress>,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: QName,
    pub ports: Vec<Port>,
    pub customization: Option<Customization>,
}

/// The schema subset scanned out of `wsdl:types`: just enough to answer
/// wrapper-shape queries and name lookups for the type binder.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub elements: Vec<SchemaElement>,
    pub types: Vec<SchemaType>,
}

#[derive(Debug, Clone)]
pub struct SchemaElement {
    pub name: QName,
    pub type_ref: Option<QName>,
    pub inline: Option<SchemaShape>,
}

#[derive(Debug, Clone)]
pub struct SchemaType {
    pub name: QName,
    pub shape: SchemaShape,
}

/// A complex type is either a plain `xsd:sequence` of element children
/// (the only shape eligible for wrapper-style unwrapping) or something
/// the binder treats as opaque.
#[derive(Debug, Clone)]
pub enum SchemaShape {
    Sequence(Vec<SchemaField>),
    Opaque,
}

#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    pub type_ref: QName,
}

#[derive(Debug, Clone, Default)]
pub struct Definitions {
    pub name: Option<String>,
    pub target_namespace: String,
    pub documentation: Option<String>,
    pub schema: Schema,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
    pub customization: Option<Customization>,
}

impl Definitions {
    pub fn message(&self, name: &QName) -> Option<&Message> {
        self.messages.iter().find(|message| &message.name == name)
    }

    pub fn port_type(&self, name: &QName) -> Option<&PortType> {
        self.port_types.iter().find(|pt| &pt.name == name)
    }

    pub fn binding(&self, name: &QName) -> Option<&Binding> {
        self.bindings.iter().find(|binding| &binding.name == name)
    }
}

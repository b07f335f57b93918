//! The operation model produced by a modeling run.
//!
//! This is the modeler's output contract: services containing ports,
//! ports containing operations, each operation carrying its message
//! blocks (body, headers, attachments, unbound) and the reconciled
//! parameter list that a code generator or dynamic client would
//! consume.

use lather_wsdl::document::{QName, SoapStyle, SoapUse};

use super::binder::BoundType;

#[derive(Debug, Clone)]
pub struct Model {
    pub name: Option<String>,
    pub target_namespace: String,
    /// From the `package` customization, when present.
    pub package: Option<String>,
    pub services: Vec<Service>,
    pub exceptions: Vec<ExceptionEntry>,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: QName,
    pub type_name: String,
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub name: QName,
    pub type_name: String,
    pub binding: QName,
    pub port_type: QName,
    pub address: Option<String>,
    pub style: Option<SoapStyle>,
    /// True when every operation on the port models wrapper-style.
    pub wrapped: bool,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncKind {
    Polling,
    Callback,
}

#[derive(Debug, Clone)]
pub struct Operation {
    /// The WSDL operation name.
    pub name: String,
    /// The derived (possibly customized) method name.
    pub method_name: String,
    /// Method name made unique within the port; differs from
    /// `method_name` only when two operations would collide.
    pub unique_name: String,
    pub style: SoapStyle,
    pub usage: SoapUse,
    pub wrapped: bool,
    pub soap_action: Option<String>,
    pub async_kind: Option<AsyncKind>,
    pub documentation: Option<String>,
    pub request: MessageInfo,
    pub response: Option<MessageInfo>,
    pub faults: Vec<Fault>,
}

impl Operation {
    pub fn is_one_way(&self) -> bool {
        self.response.is_none()
    }

    /// Parameters of both directions, request order first, without
    /// repeating INOUT entries.
    pub fn parameters(&self) -> Vec<&Parameter> {
        let mut result: Vec<&Parameter> = self.request.parameters.iter().collect();
        if let Some(response) = &self.response {
            for parameter in &response.parameters {
                if !result.iter().any(|existing| existing.name == parameter.name) {
                    result.push(parameter);
                }
            }
        }
        result
    }

    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.response.as_ref().and_then(|response| {
            response
                .parameters
                .iter()
                .find(|parameter| parameter.index == ParameterIndex::Return)
        })
    }
}

/// One direction of an operation: its blocks plus the parameters that
/// project into them.
#[derive(Debug, Clone, Default)]
pub struct MessageInfo {
    pub body: Vec<Block>,
    pub headers: Vec<Block>,
    pub attachments: Vec<Block>,
    pub unbound: Vec<Block>,
    /// Response-only: the fault blocks that may replace the body.
    pub fault_blocks: Vec<QName>,
    pub parameters: Vec<Parameter>,
}

impl MessageInfo {
    pub fn block(&self, name: &QName) -> Option<&Block> {
        self.body
            .iter()
            .chain(&self.headers)
            .chain(&self.attachments)
            .chain(&self.unbound)
            .find(|block| &block.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub name: QName,
    pub content: BlockContent,
}

#[derive(Debug, Clone)]
pub enum BlockContent {
    /// A schema-described payload.
    Bound(BoundType),
    /// The synthesized structure wrapping an rpc/literal body.
    Rpc(RpcStructure),
}

impl Block {
    pub fn type_name(&self) -> &str {
        match &self.content {
            BlockContent::Bound(bound) => &bound.type_name,
            BlockContent::Rpc(structure) => &structure.type_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RpcStructure {
    pub name: QName,
    pub type_name: String,
    pub members: Vec<RpcMember>,
}

#[derive(Debug, Clone)]
pub struct RpcMember {
    pub name: String,
    pub type_name: String,
    pub descriptor: QName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterIndex {
    /// Positional parameter in the method signature.
    At(usize),
    /// Modeled as the method's return value.
    Return,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub mode: Mode,
    pub index: ParameterIndex,
    /// The block this parameter projects into.
    pub block: QName,
    /// For wrapper-style children, the wrapper child element name.
    pub element: Option<String>,
    /// Name of the paired parameter when the same wire part appears
    /// in both request and response.
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Fault {
    /// The wsdl:fault name.
    pub name: String,
    /// The sole element-described part of the fault message.
    pub element: QName,
    /// Name of the exception type modeling this fault.
    pub exception: String,
}

#[derive(Debug, Clone)]
pub struct ExceptionEntry {
    pub name: String,
    pub element: QName,
    pub member_type: String,
}

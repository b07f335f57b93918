//! Wrapper-style detection for document/literal operations.

use std::collections::HashMap;

use lather_wsdl::document::{Customization, DescriptorKind, Message, PortTypeOperation};

use super::{
    binder::TypeBinder,
    classify::PartBinding,
};

/// Resolves a boolean customization through its scope chain, innermost
/// first.
pub(crate) fn resolve_flag(
    scope: &[Option<&Customization>],
    get: impl Fn(&Customization) -> Option<bool>,
    default: bool,
) -> bool {
    for customization in scope.iter().flatten() {
        if let Some(value) = get(customization) {
            return value;
        }
    }
    default
}

/// Whether a document/literal operation satisfies every wrapper-style
/// condition: single element-described body part on each side, request
/// element named after the operation, response element carrying the
/// `Response` suffix, and both elements shaped as plain sequences.
pub(crate) fn is_unwrappable(
    binder: &dyn TypeBinder,
    operation: &PortTypeOperation,
    scope: &[Option<&Customization>],
    input: &Message,
    output: Option<&Message>,
    request_bindings: &HashMap<String, PartBinding>,
    response_bindings: Option<&HashMap<String, PartBinding>>,
) -> bool {
    if !resolve_flag(scope, |c| c.wrapper_style, true) {
        return false;
    }

    if input.parts.len() != 1 {
        return false;
    }
    let request_part = &input.parts[0];
    if request_part.kind != DescriptorKind::Element
        || request_part.descriptor.local != operation.name
        || request_bindings.get(&request_part.name) != Some(&PartBinding::Body)
    {
        return false;
    }
    if binder.wrapper_children(&request_part.descriptor).is_none() {
        return false;
    }

    if let Some(output) = output {
        if output.parts.len() != 1 {
            return false;
        }
        let response_part = &output.parts[0];
        let expected = format!("{}Response", operation.name);
        if response_part.kind != DescriptorKind::Element
            || response_part.descriptor.local != expected
            || response_bindings.and_then(|b| b.get(&response_part.name))
                != Some(&PartBinding::Body)
        {
            return false;
        }
        if binder.wrapper_children(&response_part.descriptor).is_none() {
            return false;
        }
    }

    true
}

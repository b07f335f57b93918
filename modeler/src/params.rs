//! Construction of message blocks and parameter lists, for both
//! document/literal (wrapped and bare) and rpc/literal operations.

use std::collections::HashMap;

use lather_wsdl::document::{
    Customization, DescriptorKind, Message, Part, QName, SoapBody,
};

use super::{
    binder::{BoundType, TypeBinder},
    classify::PartBinding,
    diag::Diagnostics,
    model::{
        Block, BlockContent, MessageInfo, Mode, Parameter, ParameterIndex, RpcMember,
        RpcStructure,
    },
    names,
    order::OrderedPart,
    wrapper,
};

pub(crate) struct BuiltMessages {
    pub request: MessageInfo,
    pub response: Option<MessageInfo>,
}

/// Looks up a parameter rename through the customization scope chain.
fn rename_in_scope<'a>(
    scope: &[Option<&'a Customization>],
    part: &str,
    child: Option<&str>,
) -> Option<&'a str> {
    scope
        .iter()
        .flatten()
        .find_map(|customization| customization.rename_for(part, child))
}

/// Applies a customized name if present and usable; a reserved custom
/// name is rejected (warning in extension mode, error otherwise).
fn custom_or_derived(
    custom: Option<&str>,
    derived: String,
    what: &str,
    extension: bool,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    match custom {
        Some(custom) if names::is_reserved(custom) => {
            let note = format!(
                "customized name `{}` for {} is a reserved word",
                custom, what
            );
            if extension {
                diagnostics.warning(note);
                Some(derived)
            } else {
                diagnostics.error(note);
                None
            }
        }
        Some(custom) => Some(custom.to_owned()),
        None => Some(derived),
    }
}

fn is_xml_mime(mime_type: Option<&str>) -> bool {
    matches!(mime_type, Some("text/xml") | Some("application/xml"))
}

fn attachment_type(mime_type: Option<&str>) -> String {
    if is_xml_mime(mime_type) {
        "String".to_owned()
    } else {
        "Vec<u8>".to_owned()
    }
}

fn bind_part(binder: &dyn TypeBinder, part: &Part) -> Option<BoundType> {
    match part.kind {
        DescriptorKind::Element => binder.element(&part.descriptor),
        DescriptorKind::Type => binder.value_type(&part.descriptor),
    }
}

struct PendingParam {
    name: String,
    type_name: String,
    mode: Mode,
    is_return: bool,
    block: QName,
    element: Option<String>,
}

/// Assigns positional indices across the definitive order and splits
/// the sequence into per-direction parameter lists.
fn finish(
    pending: Vec<PendingParam>,
    request: &mut MessageInfo,
    mut response: Option<&mut MessageInfo>,
) {
    let mut position = 0usize;
    for param in pending {
        let index = if param.is_return {
            ParameterIndex::Return
        } else {
            let index = ParameterIndex::At(position);
            position += 1;
            index
        };

        let link = (param.mode == Mode::InOut).then(|| param.name.clone());
        let parameter = Parameter {
            name: param.name,
            type_name: param.type_name,
            mode: param.mode,
            index,
            block: param.block,
            element: param.element,
            link,
        };

        match param.mode {
            Mode::In => request.parameters.push(parameter),
            Mode::Out => {
                if let Some(response) = response.as_deref_mut() {
                    response.parameters.push(parameter);
                }
            }
            Mode::InOut => {
                request.parameters.push(parameter.clone());
                if let Some(response) = response.as_deref_mut() {
                    response.parameters.push(parameter);
                }
            }
        }
    }
}

/// Adds the blocks a classified part contributes to one direction and
/// returns the block name and bound type the part's parameter uses.
#[allow(clippy::too_many_arguments)]
fn place_part(
    context: &str,
    part: &Part,
    binding: &PartBinding,
    document_style: bool,
    mime_mapping: bool,
    binder: &dyn TypeBinder,
    info: &mut MessageInfo,
    diagnostics: &mut Diagnostics,
) -> Option<(QName, String)> {
    match binding {
        PartBinding::Body => {
            if document_style && part.kind != DescriptorKind::Element {
                diagnostics.error(format!(
                    "{}: document-style body part `{}` must be element-described",
                    context, part.name
                ));
                return None;
            }
            let bound = match bind_part(binder, part) {
                Some(bound) => bound,
                None => {
                    diagnostics.error(format!(
                        "{}: part `{}` references `{}` which is not defined in the schema",
                        context, part.name, part.descriptor
                    ));
                    return None;
                }
            };
            let name = bound.name.clone();
            let type_name = bound.type_name.clone();
            if info.block(&name).is_none() {
                info.body.push(Block {
                    name: name.clone(),
                    content: BlockContent::Bound(bound),
                });
            }
            Some((name, type_name))
        }
        PartBinding::Header => {
            let bound = match binder.element(&part.descriptor) {
                Some(bound) => bound,
                None => {
                    diagnostics.error(format!(
                        "{}: header part `{}` references `{}` which is not defined in the schema",
                        context, part.name, part.descriptor
                    ));
                    return None;
                }
            };
            let name = bound.name.clone();
            let type_name = bound.type_name.clone();
            if info.block(&name).is_none() {
                info.headers.push(Block {
                    name: name.clone(),
                    content: BlockContent::Bound(bound),
                });
            }
            Some((name, type_name))
        }
        PartBinding::Attachment { mime_type } => {
            let type_name = if mime_mapping {
                if part.kind == DescriptorKind::Element && !is_xml_mime(mime_type.as_deref()) {
                    diagnostics.warning(format!(
                        "{}: element-described part `{}` carries non-XML mime type `{}`",
                        context,
                        part.name,
                        mime_type.as_deref().unwrap_or("<none>")
                    ));
                }
                attachment_type(mime_type.as_deref())
            } else {
                // mapping disabled: the part keeps its schema type
                match bind_part(binder, part) {
                    Some(bound) => bound.type_name,
                    None => names::type_name(&part.descriptor.local),
                }
            };
            let name = QName::unqualified(&part.name);
            if info.block(&name).is_none() {
                info.attachments.push(Block {
                    name: name.clone(),
                    content: BlockContent::Bound(BoundType {
                        name: name.clone(),
                        type_name: type_name.clone(),
                    }),
                });
            }
            Some((name, type_name))
        }
        PartBinding::Unbound => {
            let bound = bind_part(binder, part).unwrap_or_else(|| BoundType {
                name: part.descriptor.clone(),
                type_name: names::type_name(&part.descriptor.local),
            });
            let name = bound.name.clone();
            let type_name = bound.type_name.clone();
            if info.block(&name).is_none() {
                info.unbound.push(Block {
                    name: name.clone(),
                    content: BlockContent::Bound(bound),
                });
            }
            Some((name, type_name))
        }
    }
}

/// Document/literal. With `wrapped`, the single body part on each side
/// dissolves into its wrapper children; otherwise each part maps to
/// one parameter.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_doclit(
    context: &str,
    operation_name: &str,
    scope: &[Option<&Customization>],
    ordered: &[OrderedPart],
    input: &Message,
    request_bindings: &HashMap<String, PartBinding>,
    response_bindings: Option<&HashMap<String, PartBinding>>,
    has_output: bool,
    wrapped: bool,
    binder: &dyn TypeBinder,
    extension: bool,
    diagnostics: &mut Diagnostics,
) -> Option<BuiltMessages> {
    let mut request = MessageInfo::default();
    let mut response = has_output.then(MessageInfo::default);
    let mime_mapping = wrapper::resolve_flag(scope, |c| c.mime_content, true);

    let mut pending: Vec<PendingParam> = Vec::new();

    for entry in ordered {
        let part = &entry.part;

        let request_side = matches!(entry.mode, Mode::In | Mode::InOut);
        let response_side = matches!(entry.mode, Mode::Out | Mode::InOut);

        let mut body_bound = false;
        let mut placed: Option<(QName, String)> = None;
        if request_side {
            let binding = request_bindings
                .get(&part.name)
                .cloned()
                .unwrap_or(PartBinding::Unbound);
            body_bound |= binding == PartBinding::Body;
            placed = Some(place_part(
                context,
                part,
                &binding,
                true,
                mime_mapping,
                binder,
                &mut request,
                diagnostics,
            )?);
        }
        if response_side {
            if let Some(response) = response.as_mut() {
                let binding = response_bindings
                    .and_then(|bindings| bindings.get(&part.name))
                    .cloned()
                    .unwrap_or(PartBinding::Unbound);
                body_bound |= binding == PartBinding::Body;
                let result = place_part(
                    context,
                    part,
                    &binding,
                    true,
                    mime_mapping,
                    binder,
                    response,
                    diagnostics,
                )?;
                if placed.is_none() {
                    placed = Some(result);
                }
            }
        }

        let (block, type_name) = placed?;

        if wrapped && body_bound {
            // handled below through the wrapper children
            continue;
        }

        let name = custom_or_derived(
            rename_in_scope(scope, &part.name, None),
            names::var_name(&part.name),
            &format!("parameter `{}` of operation `{}`", part.name, operation_name),
            extension,
            diagnostics,
        )?;

        pending.push(PendingParam {
            name,
            type_name,
            mode: entry.mode,
            is_return: entry.is_return,
            block,
            element: None,
        });
    }

    if wrapped {
        let request_part = &input.parts[0];
        let request_children = binder.wrapper_children(&request_part.descriptor)?;

        let mut wrapper_params: Vec<PendingParam> = Vec::new();
        for child in &request_children {
            let name = custom_or_derived(
                rename_in_scope(scope, &request_part.name, Some(&child.element)),
                names::var_name(&child.element),
                &format!(
                    "wrapper child `{}` of operation `{}`",
                    child.element, operation_name
                ),
                extension,
                diagnostics,
            )?;
            wrapper_params.push(PendingParam {
                name,
                type_name: child.type_name.clone(),
                mode: Mode::In,
                is_return: false,
                block: request_part.descriptor.clone(),
                element: Some(child.element.clone()),
            });
        }

        if let Some(response) = response.as_ref() {
            let response_block = response
                .body
                .first()
                .map(|block| block.name.clone())?;
            let response_children = binder.wrapper_children(&response_block)?;

            let mut leftovers: Vec<PendingParam> = Vec::new();
            let mut have_return = false;
            for child in &response_children {
                if child.element == "return" && !have_return {
                    have_return = true;
                    wrapper_params.push(PendingParam {
                        name: "_return".to_owned(),
                        type_name: child.type_name.clone(),
                        mode: Mode::Out,
                        is_return: true,
                        block: response_block.clone(),
                        element: Some(child.element.clone()),
                    });
                    continue;
                }

                // a response child mirroring a request child by name
                // and type upgrades it to INOUT
                if let Some(existing) = wrapper_params.iter_mut().find(|param| {
                    param.mode == Mode::In
                        && param.element.as_deref() == Some(child.element.as_str())
                        && param.type_name == child.type_name
                }) {
                    existing.mode = Mode::InOut;
                    existing.block = response_block.clone();
                    continue;
                }

                let name = custom_or_derived(
                    rename_in_scope(scope, &input.parts[0].name, Some(&child.element)),
                    names::var_name(&child.element),
                    &format!(
                        "wrapper child `{}` of operation `{}`",
                        child.element, operation_name
                    ),
                    extension,
                    diagnostics,
                )?;
                leftovers.push(PendingParam {
                    name,
                    type_name: child.type_name.clone(),
                    mode: Mode::Out,
                    is_return: false,
                    block: response_block.clone(),
                    element: Some(child.element.clone()),
                });
            }

            if !have_return && leftovers.len() == 1 {
                let mut only = leftovers.remove(0);
                only.is_return = true;
                wrapper_params.push(only);
            } else {
                wrapper_params.extend(leftovers);
            }
        }

        // wrapper parameters precede any header/attachment parameters
        wrapper_params.extend(pending);
        pending = wrapper_params;
    }

    finish(pending, &mut request, response.as_mut());
    Some(BuiltMessages { request, response })
}

/// Rpc/literal: body parts become members of a synthesized structure
/// named after the operation.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_rpclit(
    context: &str,
    operation_name: &str,
    scope: &[Option<&Customization>],
    ordered: &[OrderedPart],
    body: Option<&SoapBody>,
    output_body: Option<&SoapBody>,
    target_namespace: &str,
    request_bindings: &HashMap<String, PartBinding>,
    response_bindings: Option<&HashMap<String, PartBinding>>,
    has_output: bool,
    binder: &dyn TypeBinder,
    extension: bool,
    diagnostics: &mut Diagnostics,
) -> Option<BuiltMessages> {
    let mut request = MessageInfo::default();
    let mut response = has_output.then(MessageInfo::default);
    let mime_mapping = wrapper::resolve_flag(scope, |c| c.mime_content, true);

    let request_struct_name = QName::new(
        body.and_then(|body| body.namespace.as_deref())
            .unwrap_or(target_namespace),
        operation_name,
    );
    let response_struct_name = QName::new(
        output_body
            .and_then(|body| body.namespace.as_deref())
            .unwrap_or(target_namespace),
        format!("{}Response", operation_name),
    );

    let mut request_members: Vec<RpcMember> = Vec::new();
    let mut response_members: Vec<RpcMember> = Vec::new();
    let mut pending: Vec<PendingParam> = Vec::new();

    for entry in ordered {
        let part = &entry.part;
        let request_side = matches!(entry.mode, Mode::In | Mode::InOut);
        let response_side = matches!(entry.mode, Mode::Out | Mode::InOut);

        let request_binding = request_side
            .then(|| request_bindings.get(&part.name).cloned())
            .flatten()
            .unwrap_or(PartBinding::Unbound);
        let response_binding = response_side
            .then(|| {
                response_bindings
                    .and_then(|bindings| bindings.get(&part.name))
                    .cloned()
            })
            .flatten()
            .unwrap_or(PartBinding::Unbound);

        let body_bound = (request_side && request_binding == PartBinding::Body)
            || (response_side && response_binding == PartBinding::Body);

        let (block, type_name) = if body_bound {
            let bound = match bind_part(binder, part) {
                Some(bound) => bound,
                None => {
                    diagnostics.error(format!(
                        "{}: part `{}` references `{}` which is not defined in the schema",
                        context, part.name, part.descriptor
                    ));
                    return None;
                }
            };
            let member = RpcMember {
                name: part.name.clone(),
                type_name: bound.type_name.clone(),
                descriptor: part.descriptor.clone(),
            };
            if request_side && request_binding == PartBinding::Body {
                request_members.push(member.clone());
            }
            if response_side && response_binding == PartBinding::Body {
                response_members.push(member);
            }
            let block = if request_side && request_binding == PartBinding::Body {
                request_struct_name.clone()
            } else {
                response_struct_name.clone()
            };
            (block, bound.type_name)
        } else {
            let mut placed: Option<(QName, String)> = None;
            if request_side {
                placed = Some(place_part(
                    context,
                    part,
                    &request_binding,
                    false,
                    mime_mapping,
                    binder,
                    &mut request,
                    diagnostics,
                )?);
            }
            if response_side {
                if let Some(response) = response.as_mut() {
                    let result = place_part(
                        context,
                        part,
                        &response_binding,
                        false,
                        mime_mapping,
                        binder,
                        response,
                        diagnostics,
                    )?;
                    if placed.is_none() {
                        placed = Some(result);
                    }
                }
            }
            placed?
        };

        let name = custom_or_derived(
            rename_in_scope(scope, &part.name, None),
            names::var_name(&part.name),
            &format!("parameter `{}` of operation `{}`", part.name, operation_name),
            extension,
            diagnostics,
        )?;

        pending.push(PendingParam {
            name,
            type_name,
            mode: entry.mode,
            is_return: entry.is_return,
            block,
            element: None,
        });
    }

    request.body.push(Block {
        name: request_struct_name.clone(),
        content: BlockContent::Rpc(RpcStructure {
            name: request_struct_name,
            type_name: names::type_name(operation_name),
            members: request_members,
        }),
    });

    if let Some(response) = response.as_mut() {
        response.body.push(Block {
            name: response_struct_name.clone(),
            content: BlockContent::Rpc(RpcStructure {
                name: response_struct_name.clone(),
                type_name: format!("{}Response", names::type_name(operation_name)),
                members: response_members,
            }),
        });
    }

    finish(pending, &mut request, response.as_mut());
    Some(BuiltMessages { request, response })
}

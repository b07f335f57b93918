//! Synthesis of asynchronous variants for request-response operations:
//! a polling form returning `Response<T>` and a callback form taking
//! an `AsyncHandler<T>` and returning a `Future`.

use lather_wsdl::document::QName;

use super::{
    binder::TypeBinder,
    diag::Diagnostics,
    model::{AsyncKind, MessageInfo, Mode, Operation, Parameter, ParameterIndex},
    names,
};

/// Builds the polling and callback siblings of an already-modeled
/// synchronous operation. Returns `None` when the response bean type
/// cannot be determined; the synchronous operation is kept either way.
pub(crate) fn synthesize(
    context: &str,
    sync: &Operation,
    target_namespace: &str,
    binder: &dyn TypeBinder,
    extension: bool,
    diagnostics: &mut Diagnostics,
) -> Option<(Operation, Operation)> {
    let response = sync.response.as_ref()?;

    let outs: Vec<&Parameter> = response
        .parameters
        .iter()
        .filter(|parameter| matches!(parameter.mode, Mode::Out | Mode::InOut))
        .collect();

    let bean = if outs.len() == 1 {
        outs[0].type_name.clone()
    } else {
        // several outputs need a named response bean declared in the
        // schema
        let bean_element = QName::new(target_namespace, format!("{}Response", sync.name));
        match binder.element(&bean_element) {
            Some(bound) => bound.type_name,
            None => {
                let note = format!(
                    "{}: no response bean element `{}` for the asynchronous mapping",
                    context, bean_element
                );
                if extension {
                    diagnostics.warning(note);
                } else {
                    diagnostics.error(note);
                }
                return None;
            }
        }
    };

    let request_parameters: Vec<Parameter> = sync
        .request
        .parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| Parameter {
            mode: Mode::In,
            index: ParameterIndex::At(position),
            link: None,
            ..parameter.clone()
        })
        .collect();

    let response_block = response
        .body
        .first()
        .map(|block| block.name.clone())
        .unwrap_or_else(|| QName::unqualified("response"));

    let polling_response = MessageInfo {
        body: response.body.clone(),
        headers: response.headers.clone(),
        attachments: response.attachments.clone(),
        unbound: response.unbound.clone(),
        fault_blocks: response.fault_blocks.clone(),
        parameters: vec![Parameter {
            name: names::var_name(&format!("{}Response", sync.name)),
            type_name: format!("Response<{}>", bean),
            mode: Mode::Out,
            index: ParameterIndex::Return,
            block: response_block.clone(),
            element: None,
            link: None,
        }],
    };

    let polling = Operation {
        method_name: format!("{}_async", sync.method_name),
        unique_name: format!("{}_async_polling", sync.unique_name),
        async_kind: Some(AsyncKind::Polling),
        request: MessageInfo {
            body: sync.request.body.clone(),
            headers: sync.request.headers.clone(),
            attachments: sync.request.attachments.clone(),
            unbound: sync.request.unbound.clone(),
            fault_blocks: Vec::new(),
            parameters: request_parameters.clone(),
        },
        response: Some(polling_response),
        ..sync.clone()
    };

    let mut callback_parameters = request_parameters;
    callback_parameters.push(Parameter {
        name: "async_handler".to_owned(),
        type_name: format!("AsyncHandler<{}>", bean),
        mode: Mode::In,
        index: ParameterIndex::At(callback_parameters.len()),
        block: response_block.clone(),
        element: None,
        link: None,
    });

    let callback_response = MessageInfo {
        body: response.body.clone(),
        headers: response.headers.clone(),
        attachments: response.attachments.clone(),
        unbound: response.unbound.clone(),
        fault_blocks: response.fault_blocks.clone(),
        parameters: vec![Parameter {
            name: "future".to_owned(),
            type_name: "Future".to_owned(),
            mode: Mode::Out,
            index: ParameterIndex::Return,
            block: response_block,
            element: None,
            link: None,
        }],
    };

    let callback = Operation {
        method_name: format!("{}_async", sync.method_name),
        unique_name: format!("{}_async_callback", sync.unique_name),
        async_kind: Some(AsyncKind::Callback),
        request: MessageInfo {
            body: sync.request.body.clone(),
            headers: sync.request.headers.clone(),
            attachments: sync.request.attachments.clone(),
            unbound: sync.request.unbound.clone(),
            fault_blocks: Vec::new(),
            parameters: callback_parameters,
        },
        response: Some(callback_response),
        ..sync.clone()
    };

    Some((polling, callback))
}

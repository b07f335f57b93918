//! Reconciliation of input and output message parts into one ordered
//! parameter sequence, honoring the operation's `parameterOrder` hint
//! when it is usable.

use lather_wsdl::document::{Message, Part};

use super::{diag::Diagnostics, model::Mode};

/// One parameter-to-be: a part snapshot with its resolved direction.
/// Snapshots are taken per occurrence, so reconciling one operation
/// never mutates state shared with another.
#[derive(Debug, Clone)]
pub(crate) struct OrderedPart {
    pub part: Part,
    pub mode: Mode,
    pub is_return: bool,
}

fn same_descriptor(a: &Part, b: &Part) -> bool {
    a.kind == b.kind && a.descriptor == b.descriptor
}

/// Produces the definitive parameter sequence for an operation.
///
/// With a usable hint, listed parts come first in hint order; a part
/// present in both directions with the same name and descriptor is one
/// INOUT entry whether listed or not. A single unpaired unlisted
/// output becomes the return value and precedes unlisted inputs. A
/// hint naming any unknown part is discarded wholesale with a warning.
pub(crate) fn reconcile(
    operation_name: &str,
    parameter_order: Option<&str>,
    input: &Message,
    output: Option<&Message>,
    diagnostics: &mut Diagnostics,
) -> Vec<OrderedPart> {
    if let Some(hint) = parameter_order {
        let tokens: Vec<&str> = hint.split_whitespace().collect();
        let mut usable = !tokens.is_empty();

        for token in &tokens {
            let known = input.part(token).is_some()
                || output.map_or(false, |output| output.part(token).is_some());
            if !known {
                diagnostics.warning(format!(
                    "operation `{}`: parameterOrder names `{}` which is not a part of its \
                     input or output message",
                    operation_name, token
                ));
                usable = false;
            }
        }

        if usable {
            return with_hint(&tokens, input, output);
        }
        if !tokens.is_empty() {
            diagnostics.warning(format!(
                "operation `{}`: ignoring unusable parameterOrder",
                operation_name
            ));
        }
    }

    without_hint(input, output)
}

fn with_hint(tokens: &[&str], input: &Message, output: Option<&Message>) -> Vec<OrderedPart> {
    let mut ordered: Vec<OrderedPart> = Vec::new();

    // listed parts in hint order, input taking precedence over a
    // same-named output part; a part present in both directions with
    // the same descriptor is INOUT
    for token in tokens {
        if let Some(part) = input.part(token) {
            let paired = output
                .and_then(|output| output.part(token))
                .map_or(false, |other| same_descriptor(part, other));
            ordered.push(OrderedPart {
                part: part.clone(),
                mode: if paired { Mode::InOut } else { Mode::In },
                is_return: false,
            });
        } else if let Some(part) = output.and_then(|output| output.part(token)) {
            ordered.push(OrderedPart {
                part: part.clone(),
                mode: Mode::Out,
                is_return: false,
            });
        }
    }

    // an unlisted output pairing an unlisted input by name and
    // descriptor upgrades that input to INOUT instead of entering the
    // sequence a second time
    let mut inout_unlisted: Vec<&str> = Vec::new();
    let mut output_unlisted: Vec<Part> = Vec::new();
    if let Some(output) = output {
        for part in &output.parts {
            if tokens.contains(&part.name.as_str()) {
                continue;
            }
            let paired = input
                .part(&part.name)
                .map_or(false, |other| same_descriptor(other, part));
            if paired {
                inout_unlisted.push(&part.name);
            } else {
                output_unlisted.push(part.clone());
            }
        }
    }

    // exactly one unlisted, unpaired output models the return value
    // and comes ahead of unlisted inputs
    if output_unlisted.len() == 1 {
        ordered.push(OrderedPart {
            part: output_unlisted.remove(0),
            mode: Mode::Out,
            is_return: true,
        });
    }

    for part in &input.parts {
        if !tokens.contains(&part.name.as_str()) {
            let mode = if inout_unlisted.contains(&part.name.as_str()) {
                Mode::InOut
            } else {
                Mode::In
            };
            ordered.push(OrderedPart {
                part: part.clone(),
                mode,
                is_return: false,
            });
        }
    }

    for part in output_unlisted {
        ordered.push(OrderedPart {
            part,
            mode: Mode::Out,
            is_return: false,
        });
    }

    ordered
}

fn without_hint(input: &Message, output: Option<&Message>) -> Vec<OrderedPart> {
    let mut ordered: Vec<OrderedPart> = input
        .parts
        .iter()
        .map(|part| OrderedPart {
            part: part.clone(),
            mode: Mode::In,
            is_return: false,
        })
        .collect();

    let mut remaining: Vec<Part> = Vec::new();
    if let Some(output) = output {
        for part in &output.parts {
            let paired = ordered
                .iter_mut()
                .find(|entry| entry.part.name == part.name && same_descriptor(&entry.part, part));
            match paired {
                Some(entry) => entry.mode = Mode::InOut,
                None => remaining.push(part.clone()),
            }
        }
    }

    let single = remaining.len() == 1;
    for part in remaining {
        ordered.push(OrderedPart {
            part,
            mode: Mode::Out,
            is_return: single,
        });
    }

    ordered
}

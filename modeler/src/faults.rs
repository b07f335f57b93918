//! Mapping of bound faults onto exception entries.

use std::collections::{BTreeMap, BTreeSet};

use lather_wsdl::document::{
    BindingOperation, Definitions, DescriptorKind, PortTypeOperation, SoapFault,
};

use super::{
    binder::TypeBinder,
    diag::Diagnostics,
    model::{ExceptionEntry, Fault, MessageInfo},
    names,
};

/// Models the faults of one operation. Returns `None` when the
/// operation itself cannot be modeled; individual unmodelable faults
/// are skipped with a diagnostic instead.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_faults(
    context: &str,
    operation: &PortTypeOperation,
    binding_operation: &BindingOperation,
    definitions: &Definitions,
    binder: &dyn TypeBinder,
    extension: bool,
    avoid: Option<&BTreeSet<String>>,
    exceptions: &mut BTreeMap<String, ExceptionEntry>,
    response: &mut MessageInfo,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<Fault>> {
    for binding_fault in &binding_operation.faults {
        let declared = operation
            .faults
            .iter()
            .filter(|fault| fault.name == binding_fault.name)
            .count();
        if declared == 0 {
            diagnostics.error(format!(
                "{}: binding declares fault `{}` which the portType operation does not",
                context, binding_fault.name
            ));
            return None;
        }
        let bound = binding_operation
            .faults
            .iter()
            .filter(|other| other.name == binding_fault.name)
            .count();
        if bound > 1 {
            diagnostics.error(format!(
                "{}: fault `{}` is bound more than once",
                context, binding_fault.name
            ));
            return None;
        }
    }

    let mut faults = Vec::new();
    let mut seen: Vec<lather_wsdl::document::QName> = Vec::new();

    for fault in &operation.faults {
        let binding_fault = match binding_operation
            .faults
            .iter()
            .find(|bound| bound.name == fault.name)
        {
            Some(found) => found,
            None => {
                diagnostics.warning(format!(
                    "{}: fault `{}` has no binding and is not modeled",
                    context, fault.name
                ));
                continue;
            }
        };

        let soap_fault = match &binding_fault.soap_fault {
            Some(soap_fault) => soap_fault.clone(),
            None => {
                let note = format!(
                    "{}: fault `{}` has no soap:fault extension",
                    context, fault.name
                );
                if extension {
                    diagnostics.warning(note);
                    SoapFault {
                        name: Some(fault.name.clone()),
                        ..SoapFault::default()
                    }
                } else {
                    diagnostics.error(note);
                    continue;
                }
            }
        };

        if !soap_fault.is_literal() {
            let note = format!(
                "{}: fault `{}` uses encoded; only literal faults are supported",
                context, fault.name
            );
            if extension {
                diagnostics.warning(note);
            } else {
                diagnostics.error(note);
            }
            continue;
        }

        if let Some(soap_name) = &soap_fault.name {
            if soap_name != &fault.name {
                diagnostics.warning(format!(
                    "{}: soap:fault name `{}` does not match wsdl:fault name `{}`",
                    context, soap_name, fault.name
                ));
            }
        }
        if soap_fault.namespace.is_some() {
            diagnostics.warning(format!(
                "{}: soap:fault for `{}` carries a namespace attribute, which is ignored \
                 for literal faults",
                context, fault.name
            ));
        }

        let message = match definitions.message(&fault.message) {
            Some(found) => found,
            None => {
                diagnostics.error(format!(
                    "{}: fault `{}` references undefined message `{}`",
                    context, fault.name, fault.message
                ));
                continue;
            }
        };

        if message.parts.is_empty() {
            diagnostics.error(format!(
                "{}: fault message `{}` has no parts",
                context, message.name
            ));
            continue;
        }
        if message.parts.len() > 1 {
            diagnostics.error(format!(
                "{}: fault message `{}` has {} parts; exactly one is required",
                context,
                message.name,
                message.parts.len()
            ));
            continue;
        }

        let part = &message.parts[0];
        if part.kind != DescriptorKind::Element {
            let note = format!(
                "{}: fault message part `{}` must be element-described",
                context, part.name
            );
            if extension {
                diagnostics.warning(note);
            } else {
                diagnostics.error(note);
            }
            continue;
        }

        // a second fault carrying the same element adds nothing the
        // first did not
        if seen.contains(&part.descriptor) {
            diagnostics.warning(format!(
                "{}: fault `{}` duplicates element `{}` and is not modeled",
                context, fault.name, part.descriptor
            ));
            continue;
        }
        seen.push(part.descriptor.clone());

        let member_type = match binder.element(&part.descriptor) {
            Some(bound) => bound.type_name,
            None => {
                diagnostics.error(format!(
                    "{}: fault element `{}` is not defined in the schema",
                    context, part.descriptor
                ));
                continue;
            }
        };

        let mut exception = fault
            .customization
            .as_ref()
            .and_then(|customization| customization.type_name.clone())
            .unwrap_or_else(|| names::type_name(&fault.message.local));

        if avoid.map_or(false, |avoid| avoid.contains(&exception)) {
            exception.push_str("_Fault");
        }

        // reuse an identical entry across operations; a clashing name
        // over a different element gets a numeric suffix
        let exception = match exceptions.get(&exception) {
            Some(existing) if existing.element == part.descriptor => existing.name.clone(),
            Some(_) => {
                let mut counter = 2usize;
                let unique = loop {
                    let candidate = format!("{}{}", exception, counter);
                    match exceptions.get(&candidate) {
                        Some(existing) if existing.element == part.descriptor => break candidate,
                        Some(_) => counter += 1,
                        None => break candidate,
                    }
                };
                exceptions
                    .entry(unique.clone())
                    .or_insert_with(|| ExceptionEntry {
                        name: unique.clone(),
                        element: part.descriptor.clone(),
                        member_type,
                    });
                unique
            }
            None => {
                exceptions.insert(
                    exception.clone(),
                    ExceptionEntry {
                        name: exception.clone(),
                        element: part.descriptor.clone(),
                        member_type,
                    },
                );
                exception
            }
        };

        if !response.fault_blocks.contains(&part.descriptor) {
            response.fault_blocks.push(part.descriptor.clone());
        }

        faults.push(Fault {
            name: fault.name.clone(),
            element: part.descriptor.clone(),
            exception,
        });
    }

    Some(faults)
}

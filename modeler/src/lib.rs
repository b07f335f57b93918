//! Turns a parsed WSDL document into an operation model: services,
//! ports, operations with reconciled parameter lists, fault-derived
//! exceptions, and optional asynchronous variants.
//!
//! The usual entry point is [`model_document`], which binds schema
//! types through the built-in [`ElementCatalog`]. A custom
//! [`TypeBinder`] can be supplied through [`Modeler`] directly.

use lather_wsdl::Definitions;

pub mod binder;
pub mod builder;
pub mod diag;
pub mod model;
pub mod names;

mod async_ops;
mod classify;
mod faults;
mod order;
mod params;
mod wrapper;

pub use binder::{BoundType, ElementCatalog, TypeBinder, WrapperChild};
pub use builder::{Modeler, Options, Outcome};
pub use diag::{Diagnostic, Diagnostics, Severity};
pub use model::Model;

pub fn model_document(definitions: &Definitions, options: Options) -> Outcome {
    let catalog = ElementCatalog::from_definitions(definitions);
    Modeler::new(&catalog, options).build(definitions)
}

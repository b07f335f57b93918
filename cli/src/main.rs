use std::process::ExitCode;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use lather_modeler::{
    model::{Mode, Model, Operation, ParameterIndex},
    model_document, Options,
};

/// Builds an operation model from a WSDL document and prints it.
#[derive(StructOpt)]
#[structopt(name = "lather")]
struct Args {
    /// URL or path of the WSDL document
    input: String,

    /// Relax strict conformance checks to warnings where possible
    #[structopt(long)]
    extension: bool,

    /// Model headers from foreign messages as extra parameters
    #[structopt(long = "additional-headers")]
    additional_headers: bool,

    /// Override the package customization
    #[structopt(long)]
    package: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::from_args();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let definitions = match lather_wsdl::parse(&args.input) {
        Ok(definitions) => definitions,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let outcome = model_document(
        &definitions,
        Options {
            extension: args.extension,
            additional_headers: args.additional_headers,
            package: args.package,
        },
    );

    for diagnostic in outcome.diagnostics.entries() {
        eprintln!("{}", diagnostic);
    }

    match outcome.model {
        Some(model) => {
            print_model(&model);
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

fn print_model(model: &Model) {
    if let Some(name) = &model.name {
        println!("model {} ({})", name, model.target_namespace);
    } else {
        println!("model ({})", model.target_namespace);
    }
    if let Some(package) = &model.package {
        println!("package {}", package);
    }

    for service in &model.services {
        println!("service {} [{}]", service.type_name, service.name);
        for port in &service.ports {
            let address = port.address.as_deref().unwrap_or("<no address>");
            println!("  port {} -> {}", port.type_name, address);
            for operation in &port.operations {
                print_operation(operation);
            }
        }
    }

    for exception in &model.exceptions {
        println!(
            "exception {} ({} of {})",
            exception.name, exception.member_type, exception.element
        );
    }
}

fn print_operation(operation: &Operation) {
    let kind = match operation.async_kind {
        Some(lather_modeler::model::AsyncKind::Polling) => " [async polling]",
        Some(lather_modeler::model::AsyncKind::Callback) => " [async callback]",
        None => "",
    };

    let mut signature = String::new();
    for parameter in operation.parameters() {
        if parameter.index == ParameterIndex::Return {
            continue;
        }
        if !signature.is_empty() {
            signature.push_str(", ");
        }
        let mode = match parameter.mode {
            Mode::In => "",
            Mode::Out => "out ",
            Mode::InOut => "inout ",
        };
        signature.push_str(&format!("{}{}: {}", mode, parameter.name, parameter.type_name));
    }

    let returns = operation
        .return_parameter()
        .map(|parameter| format!(" -> {}", parameter.type_name))
        .unwrap_or_default();

    println!("    fn {}({}){}{}", operation.unique_name, signature, returns, kind);

    for fault in &operation.faults {
        println!("      ! {} ({})", fault.exception, fault.element);
    }
}

//! Orchestration: descriptors → one namespace of declarations.
//!
//! Fragment order is fixed:
//! 1. struct catalog
//! 2. inputs interface (`in` + `uniform`)
//! 3. outputs interface (`out`)
//! 4. aggregate interface extending both
//! 5. optional `parseResult` dump
//! 6. optional base type catalog
use std::fmt;

use crate::error::{GenerateError, ParseError};
use crate::interface::{assemble_interface, build_struct_catalog};
use crate::ir::{Role, Variable};
use crate::options::{validate_namespace, GenerateOptions};
use crate::parser::{GlslParser, ShaderParser};

pub const PARSE_RESULT_NAME: &str = "parseResult";

/// Non-fatal findings, returned next to the generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    EmptyInterfaceMembers { interface: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyInterfaceMembers { interface } => {
                write!(f, "interface `{interface}` has no members")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse GLSL `source` and generate declarations inside `namespace`.
pub fn generate(
    source: &str,
    namespace: &str,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    generate_with(&GlslParser, source, namespace, options)
}

pub fn generate_with<P: ShaderParser + ?Sized>(
    parser: &P,
    source: &str,
    namespace: &str,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    check_options(namespace, options)?;
    let vars = parser.parse(source).map_err(|e| match e {
        ParseError::Decl(d) => GenerateError::Decl(d),
        other => GenerateError::Parse(other),
    })?;
    log::debug!("namespace `{namespace}`: {} descriptor(s)", vars.len());
    render(&vars, namespace, options)
}

pub fn generate_from_variables(
    vars: &[Variable],
    namespace: &str,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    check_options(namespace, options)?;
    render(vars, namespace, options)
}

fn check_options(namespace: &str, options: &GenerateOptions) -> Result<(), GenerateError> {
    validate_namespace(namespace)?;
    options.validate()?;
    Ok(())
}

fn render(
    vars: &[Variable],
    namespace: &str,
    options: &GenerateOptions,
) -> Result<Generated, GenerateError> {
    let mut diagnostics = Vec::new();

    let structs = build_struct_catalog(vars, &mut diagnostics);
    let inputs = assemble_interface(
        &options.inputs_interface_name,
        vars.iter().filter(|v| matches!(v.role, Some(Role::In | Role::Uniform))),
        true,
        &mut diagnostics,
    );
    let outputs = assemble_interface(
        &options.outputs_interface_name,
        vars.iter().filter(|v| v.role == Some(Role::Out)),
        true,
        &mut diagnostics,
    );

    if options.strict {
        if let Some(Diagnostic::EmptyInterfaceMembers { interface }) = diagnostics.first() {
            return Err(GenerateError::EmptyInterface { name: interface.clone() });
        }
    }

    let inputs = stub_if_empty(inputs, &options.inputs_interface_name, options);
    let outputs = stub_if_empty(outputs, &options.outputs_interface_name, options);

    let aggregate = format!(
        "export interface {} extends {},{} {{}}\n",
        options.interface_name, options.inputs_interface_name, options.outputs_interface_name,
    );

    let parse_result = if options.generate_parse_result {
        let json = serde_json::to_string(&crate::raw::to_raw(vars))?;
        format!("export const {PARSE_RESULT_NAME} = {json};\n")
    } else {
        String::new()
    };

    let glsl_types = if options.generate_glsl_types {
        crate::catalog::render()
    } else {
        ""
    };

    let text = format!(
        "export namespace {namespace} {{\n{structs}{inputs}{outputs}{aggregate}{parse_result}{glsl_types}}}\n"
    );
    Ok(Generated { text, diagnostics })
}

/// The diagnostic is already recorded; this only keeps the aggregate resolvable.
fn stub_if_empty(text: String, name: &str, options: &GenerateOptions) -> String {
    if text.is_empty() && options.declare_empty_interfaces {
        return format!("export interface {name} {{}}\n");
    }
    text
}

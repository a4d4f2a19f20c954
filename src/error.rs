//! Error taxonomy.
//!
//! Everything here is fatal for the generation call that raised it. Non-fatal
//! conditions are reported as [`crate::generate::Diagnostic`] instead.
use thiserror::Error;

/// A descriptor that cannot be turned into a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("variable `{name}` is struct-typed but names no struct")]
    MissingStructAlias { name: String },
    #[error("block `{name}` has no members")]
    EmptyBlock { name: String },
    #[error("variable `{name}` has array length 0")]
    InvalidArrayLength { name: String },
}

impl DeclError {
    /// Name of the offending descriptor.
    pub fn name(&self) -> &str {
        match self {
            DeclError::MissingStructAlias { name }
            | DeclError::EmptyBlock { name }
            | DeclError::InvalidArrayLength { name } => name,
        }
    }
}

/// Failure while extracting descriptors from shader source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("failed to parse GLSL: {0}")]
    Syntax(String),
    #[error("invalid descriptor JSON: {0}")]
    Descriptors(String),
    #[error("`{name}` is an unsized array")]
    UnsizedArray { name: String },
    #[error("`{name}` is a multi-dimensional array")]
    MultiDimensionalArray { name: String },
    #[error("array size of `{name}` is not an integer literal")]
    NonLiteralArraySize { name: String },
    #[error("`{name}` has unsupported type `{ty}`")]
    UnsupportedType { name: String, ty: String },
    #[error(transparent)]
    Decl(#[from] DeclError),
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("`{field}` must be an identifier, got `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("interface name `{value}` is used twice")]
    DuplicateInterfaceName { value: String },
    #[error("`{value}` is not a valid namespace")]
    InvalidNamespace { value: String },
    #[error("invalid options: {0}")]
    Json(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decl(#[from] DeclError),
    #[error("interface `{name}` has no members")]
    EmptyInterface { name: String },
    #[error("failed to serialize parse result: {0}")]
    Serialize(#[from] serde_json::Error),
}

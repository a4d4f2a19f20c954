//! Generation options.
//!
//! Wire names are the camelCase keys build pipelines already pass around
//! (`generateParseResult`, `generateGLSLTypes`, ...). Every key is optional.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex is valid")
});

static NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("namespace regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenerateOptions {
    /// Dump the descriptor list as `export const parseResult`.
    pub generate_parse_result: bool,
    /// Append the base type alias catalog.
    #[serde(rename = "generateGLSLTypes")]
    pub generate_glsl_types: bool,
    pub inputs_interface_name: String,
    pub outputs_interface_name: String,
    /// Aggregate interface extending inputs and outputs.
    pub interface_name: String,
    /// Treat an empty interface as an error instead of a diagnostic.
    pub strict: bool,
    /// Declare `export interface <name> {}` for an empty inputs or outputs
    /// interface, so the aggregate never extends an undeclared name.
    pub declare_empty_interfaces: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            generate_parse_result: true,
            generate_glsl_types: true,
            inputs_interface_name: "Inputs".to_owned(),
            outputs_interface_name: "Outputs".to_owned(),
            interface_name: "Variables".to_owned(),
            strict: false,
            declare_empty_interfaces: false,
        }
    }
}

impl GenerateOptions {
    pub fn from_json_str(src: &str) -> Result<Self, OptionsError> {
        let options = crate::raw::from_str_with_path::<Self>(src).map_err(OptionsError::Json)?;
        options.validate()?;
        Ok(options)
    }

    /// Options file contents as read from disk.
    pub fn from_json_slice(src: &[u8]) -> Result<Self, OptionsError> {
        let options = crate::raw::from_slice_with_path::<Self>(src).map_err(OptionsError::Json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let names = [
            ("inputsInterfaceName", &self.inputs_interface_name),
            ("outputsInterfaceName", &self.outputs_interface_name),
            ("interfaceName", &self.interface_name),
        ];
        for (field, value) in names {
            if !IDENT.is_match(value) {
                return Err(OptionsError::InvalidIdentifier { field, value: value.clone() });
            }
        }
        for (i, (_, a)) in names.iter().enumerate() {
            if names[i + 1..].iter().any(|(_, b)| a == b) {
                return Err(OptionsError::DuplicateInterfaceName { value: (*a).clone() });
            }
        }
        Ok(())
    }
}

pub fn validate_namespace(ns: &str) -> Result<(), OptionsError> {
    if NAMESPACE.is_match(ns) {
        Ok(())
    } else {
        Err(OptionsError::InvalidNamespace { value: ns.to_owned() })
    }
}

//! Generate host-language type declarations for a GLSL shader's inputs,
//! outputs, uniform blocks and structs.
//!
//! ```no_run
//! use glsl_dts::{generate, GenerateOptions};
//!
//! let src = "in vec2 v_texcoord;\nout vec4 outColor;";
//! let out = generate(src, "Basic", &GenerateOptions::default()).unwrap();
//! println!("{}", out.text);
//! ```
pub mod catalog;
pub mod decl;
pub mod error;
pub mod generate;
pub mod interface;
pub mod ir;
pub mod logging;
pub mod options;
pub mod parser;
pub mod raw;

pub use error::{DeclError, GenerateError, OptionsError, ParseError};
pub use generate::{generate, generate_from_variables, generate_with, Diagnostic, Generated};
pub use ir::{Block, Role, StructRef, VarType, Variable};
pub use options::GenerateOptions;
pub use parser::{GlslParser, ShaderParser};
pub use raw::{DescriptorJson, RawVariable};

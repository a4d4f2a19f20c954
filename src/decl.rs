//! Declaration writer: one descriptor → one `name: type;` line.
//!
//! Array policy:
//! - length 1 → the bare type
//! - length 2..=4 → fixed tuple, `[T,T,T]`, so wrong lengths are caught by the type checker
//! - length ≥ 5 → open array, `T[]`
use crate::ir::{VarType, Variable};

// ------------------------------- Policy ---------------------------------- //

/// Longest array still written as an explicit tuple.
pub const TUPLE_MAX_LEN: u32 = 4;

// ------------------------------- Writer ---------------------------------- //

pub fn write_declaration(var: &Variable) -> String {
    let ty = shape_array(type_text(&var.ty), var.array_len);
    format!("{}: {};", var.name, ty)
}

/// Element type text, before array shaping. Recurses into blocks.
pub fn type_text(ty: &VarType) -> String {
    match ty {
        VarType::Base(name) => name.clone(),
        VarType::Struct(r) => r.alias().to_owned(),
        VarType::Block(b) => {
            let lines = b.members().iter().map(write_declaration).collect::<Vec<_>>();
            format!("{{ {} }}", lines.join(" "))
        }
    }
}

pub fn shape_array(ty: String, len: u32) -> String {
    match len {
        0 | 1 => ty,
        2..=TUPLE_MAX_LEN => {
            let elems = vec![ty.as_str(); len as usize];
            format!("[{}]", elems.join(","))
        }
        _ => format!("{ty}[]"),
    }
}

/// Force the first character to upper case; leave the rest alone.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

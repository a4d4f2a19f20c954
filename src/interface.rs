//! Interface assembly: a named group of declaration lines, and the struct
//! catalog built from it.
use crate::decl::{capitalize, write_declaration};
use crate::generate::Diagnostic;
use crate::ir::{Role, Variable};

/// Separator between member lines inside an interface body.
const MEMBER_SEP: &str = "\n  ";

/// Render `[export ]interface <name> { ... }`.
///
/// An empty member list is not an error: a [`Diagnostic::EmptyInterfaceMembers`]
/// is pushed and the interface is left out (empty string).
pub fn assemble_interface<'a, I>(
    name: &str,
    vars: I,
    exported: bool,
    diags: &mut Vec<Diagnostic>,
) -> String
where
    I: IntoIterator<Item = &'a Variable>,
{
    let lines = vars.into_iter().map(write_declaration).collect::<Vec<_>>();
    if lines.is_empty() {
        let diag = Diagnostic::EmptyInterfaceMembers { interface: name.to_owned() };
        log::warn!("{diag}");
        diags.push(diag);
        return String::new();
    }
    let export = if exported { "export " } else { "" };
    format!("{export}interface {name} {{{MEMBER_SEP}{}\n}}\n", lines.join(MEMBER_SEP))
}

/// One non-exported interface per `struct` descriptor, in input order.
///
/// A definition without a body goes through [`assemble_interface`] with no
/// members, so it ends up as a diagnostic like any other empty interface.
pub fn build_struct_catalog(vars: &[Variable], diags: &mut Vec<Diagnostic>) -> String {
    let mut out = String::new();
    for var in vars.iter().filter(|v| v.role == Some(Role::Struct)) {
        let members = var.members().unwrap_or_default();
        log::debug!("struct `{}`: {} field(s)", var.name, members.len());
        out.push_str(&assemble_interface(&capitalize(&var.name), members, false, diags));
    }
    out
}

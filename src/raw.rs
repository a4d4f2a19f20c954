//! Wire shape of the descriptor list, as produced by the parsing collaborator
//! and as dumped into `parseResult`.
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::{DeclError, ParseError};
use crate::ir::{Block, Role, StructRef, VarType, Variable};
use crate::parser::ShaderParser;

pub const STRUCT_TAG: &str = "struct";
pub const BLOCK_TAG: &str = "block";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawQualifier {
    In,
    Out,
    Uniform,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub qualifier: Option<RawQualifier>,
    #[serde(default = "one")]
    pub array_length: u32,
    #[serde(default, alias = "structName", skip_serializing_if = "Option::is_none")]
    pub struct_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<RawVariable>>,
}

fn one() -> u32 {
    1
}

impl From<RawQualifier> for Role {
    fn from(q: RawQualifier) -> Self {
        match q {
            RawQualifier::In => Role::In,
            RawQualifier::Out => Role::Out,
            RawQualifier::Uniform => Role::Uniform,
            RawQualifier::Struct => Role::Struct,
        }
    }
}

impl From<Role> for RawQualifier {
    fn from(r: Role) -> Self {
        match r {
            Role::In => RawQualifier::In,
            Role::Out => RawQualifier::Out,
            Role::Uniform => RawQualifier::Uniform,
            Role::Struct => RawQualifier::Struct,
        }
    }
}

impl TryFrom<RawVariable> for Variable {
    type Error = DeclError;

    fn try_from(raw: RawVariable) -> Result<Self, Self::Error> {
        let RawVariable { name, type_tag, qualifier, array_length, struct_alias, members } = raw;
        if array_length == 0 {
            return Err(DeclError::InvalidArrayLength { name });
        }
        let role = qualifier.map(Role::from);
        let body = match members {
            Some(members) => Block::new(
                members
                    .into_iter()
                    .map(Variable::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let ty = if type_tag == STRUCT_TAG {
            let r = struct_alias
                .and_then(StructRef::new)
                .ok_or_else(|| DeclError::MissingStructAlias { name: name.clone() })?;
            VarType::Struct(match body {
                Some(b) => r.with_body(b),
                None => r,
            })
        } else if type_tag == BLOCK_TAG {
            let b = body.ok_or_else(|| DeclError::EmptyBlock { name: name.clone() })?;
            VarType::Block(b)
        } else {
            match body {
                // a struct definition is its body, whatever tag the collaborator used
                Some(b) if role == Some(Role::Struct) => VarType::Block(b),
                _ => VarType::Base(type_tag),
            }
        };
        Ok(Variable {
            name,
            ty,
            role,
            array_len: array_length,
        })
    }
}

impl From<&Variable> for RawVariable {
    fn from(v: &Variable) -> Self {
        let (type_tag, struct_alias, members) = match &v.ty {
            VarType::Base(name) => (name.clone(), None, None),
            VarType::Struct(r) => (
                STRUCT_TAG.to_owned(),
                Some(r.alias().to_owned()),
                r.body().map(|b| b.members().iter().map(RawVariable::from).collect()),
            ),
            VarType::Block(b) => (
                BLOCK_TAG.to_owned(),
                None,
                Some(b.members().iter().map(RawVariable::from).collect()),
            ),
        };
        RawVariable {
            name: v.name.clone(),
            type_tag,
            qualifier: v.role.map(RawQualifier::from),
            array_length: v.array_len,
            struct_alias,
            members,
        }
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Same as [`from_str_with_path`], for bytes read straight from disk.
pub fn from_slice_with_path<T: DeserializeOwned>(src: &[u8]) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_slice(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Decode a JSON descriptor list into typed variables.
pub fn variables_from_str(src: &str) -> Result<Vec<Variable>, ParseError> {
    let raw = from_str_with_path::<Vec<RawVariable>>(src).map_err(ParseError::Descriptors)?;
    lower_all(raw)
}

pub fn variables_from_slice(src: &[u8]) -> Result<Vec<Variable>, ParseError> {
    let raw = from_slice_with_path::<Vec<RawVariable>>(src).map_err(ParseError::Descriptors)?;
    lower_all(raw)
}

fn lower_all(raw: Vec<RawVariable>) -> Result<Vec<Variable>, ParseError> {
    let vars = raw
        .into_iter()
        .map(Variable::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vars)
}

pub fn to_raw(vars: &[Variable]) -> Vec<RawVariable> {
    vars.iter().map(RawVariable::from).collect()
}

/// Parser that reads an already-extracted descriptor list (JSON) instead of GLSL.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorJson;

impl ShaderParser for DescriptorJson {
    fn parse(&self, source: &str) -> Result<Vec<Variable>, ParseError> {
        variables_from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_collaborator_shape() {
        let src = r#"[
            { "name": "v_texcoord", "type": "vec2", "qualifier": "in" },
            { "name": "Matrices", "type": "block", "qualifier": "uniform", "arrayLength": 1,
              "members": [
                { "name": "projection", "type": "mat4" },
                { "name": "view", "type": "mat4" }
              ] },
            { "name": "lights", "type": "struct", "structName": "Light", "arrayLength": 4, "qualifier": "uniform" }
        ]"#;
        let vars = variables_from_str(src).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0], Variable::base("v_texcoord", "vec2").with_role(Role::In));
        assert_eq!(vars[1].members().unwrap()[1].name, "view");
        assert_eq!(vars[1].members().unwrap()[1].role, None);
        assert_eq!(vars[2].ty, VarType::Struct(StructRef::new("Light").unwrap()));
        assert_eq!(vars[2].array_len, 4);
    }

    #[test]
    fn struct_without_alias_fails() {
        let src = r#"[{ "name": "light", "type": "struct", "qualifier": "uniform" }]"#;
        let err = variables_from_str(src).unwrap_err();
        assert_eq!(
            err,
            ParseError::Decl(DeclError::MissingStructAlias { name: "light".into() })
        );

        let src = r#"[{ "name": "light", "type": "struct", "structAlias": "" }]"#;
        assert!(matches!(
            variables_from_str(src),
            Err(ParseError::Decl(DeclError::MissingStructAlias { .. }))
        ));
    }

    #[test]
    fn block_without_members_fails() {
        for src in [
            r#"[{ "name": "Matrices", "type": "block" }]"#,
            r#"[{ "name": "Matrices", "type": "block", "members": [] }]"#,
        ] {
            let err = variables_from_str(src).unwrap_err();
            assert_eq!(err, ParseError::Decl(DeclError::EmptyBlock { name: "Matrices".into() }));
        }
    }

    #[test]
    fn nested_member_errors_name_the_member() {
        let src = r#"[{ "name": "Lights", "type": "block", "members": [
            { "name": "main", "type": "struct" }
        ] }]"#;
        let err = variables_from_str(src).unwrap_err();
        assert_eq!(err, ParseError::Decl(DeclError::MissingStructAlias { name: "main".into() }));
    }

    #[test]
    fn zero_array_length_fails() {
        let src = r#"[{ "name": "w", "type": "float", "arrayLength": 0 }]"#;
        assert!(matches!(
            variables_from_str(src),
            Err(ParseError::Decl(DeclError::InvalidArrayLength { .. }))
        ));
    }

    #[test]
    fn malformed_json_reports_path() {
        let src = r#"[{ "name": "w", "type": "float" }, { "name": 3, "type": "float" }]"#;
        let ParseError::Descriptors(msg) = variables_from_str(src).unwrap_err() else {
            panic!("expected a descriptor error");
        };
        assert!(msg.contains("[1].name"), "{msg}");
    }

    #[test]
    fn struct_definition_keeps_its_members() {
        let src = r#"[
            { "name": "material", "type": "struct", "qualifier": "struct", "structAlias": "Material",
              "members": [{ "name": "ambient", "type": "vec3" }] },
            { "name": "light", "type": "Light", "qualifier": "struct",
              "members": [{ "name": "color", "type": "vec3" }] },
            { "name": "fog", "type": "struct", "qualifier": "struct", "structAlias": "Fog", "members": [] }
        ]"#;
        let vars = variables_from_str(src).unwrap();
        assert_eq!(vars[0].members().unwrap()[0].name, "ambient");
        assert!(matches!(&vars[0].ty, VarType::Struct(r) if r.alias() == "Material"));
        assert_eq!(vars[1].members().unwrap()[0].name, "color");
        assert!(vars[2].members().is_none());

        // the body survives the dump next to the alias
        let value = serde_json::to_value(to_raw(&vars[..1])).unwrap();
        assert_eq!(value[0]["structAlias"], "Material");
        assert_eq!(value[0]["members"][0]["name"], "ambient");
    }

    #[test]
    fn byte_input_matches_text_input() {
        let src = r#"[{ "name": "uv", "type": "vec2", "qualifier": "in", "arrayLength": 2 }]"#;
        assert_eq!(variables_from_slice(src.as_bytes()), variables_from_str(src));

        let bad = br#"[{ "name": "uv", "type": "vec2", "arrayLength": "two" }]"#;
        let ParseError::Descriptors(msg) = variables_from_slice(bad).unwrap_err() else {
            panic!("expected a descriptor error");
        };
        assert!(msg.contains("[0].arrayLength"), "{msg}");
    }

    #[test]
    fn dump_keeps_structure() {
        let light = Variable::struct_ref("light", "Light").unwrap().with_role(Role::Uniform);
        let value = serde_json::to_value(to_raw(&[light])).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "name": "light",
                "type": "struct",
                "qualifier": "uniform",
                "arrayLength": 1,
                "structAlias": "Light"
            }])
        );
    }
}

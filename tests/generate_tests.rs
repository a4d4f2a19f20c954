use glsl_dts::{
    generate, generate_from_variables, generate_with, DeclError, DescriptorJson, Diagnostic,
    GenerateError, GenerateOptions, Role, Variable,
};
use rayon::prelude::*;

fn bare() -> GenerateOptions {
    GenerateOptions {
        generate_parse_result: false,
        generate_glsl_types: false,
        ..Default::default()
    }
}

#[test]
fn struct_becomes_interface() {
    let src = "
        struct Material {
            vec3 ambient;
            vec3 diffuse;
            vec3 specular;
            float shininess;
        };
        uniform Material material;
        out vec4 outColor;
    ";
    let out = generate(src, "Lit", &bare()).unwrap();
    assert!(out.text.starts_with(
        "export namespace Lit {\n\
         interface Material {\n  ambient: vec3;\n  diffuse: vec3;\n  specular: vec3;\n  shininess: float;\n}\n"
    ), "{}", out.text);
    assert!(out.text.contains("export interface Inputs {\n  material: Material;\n}\n"));
}

#[test]
fn inputs_outputs_and_aggregate() {
    let src = "
        in vec2 v_texcoord;
        uniform sampler2D u_texture;
        out vec4 outColor;
        void main() {
            outColor = texture(u_texture, v_texcoord);
        }
    ";
    let out = generate(src, "Basic", &bare()).unwrap();
    assert_eq!(
        out.text,
        "export namespace Basic {\n\
         export interface Inputs {\n  v_texcoord: vec2;\n  u_texture: sampler2D;\n}\n\
         export interface Outputs {\n  outColor: vec4;\n}\n\
         export interface Variables extends Inputs,Outputs {}\n\
         }\n"
    );
    assert!(out.diagnostics.is_empty());

    let options = GenerateOptions { interface_name: "IVariables".into(), ..bare() };
    let out = generate(src, "Basic", &options).unwrap();
    assert!(out.text.contains("export interface IVariables extends Inputs,Outputs {}\n"));
}

#[test]
fn uniform_block_is_inline() {
    let src = "uniform Matrices { mat4 projection; mat4 view; };";
    let out = generate(src, "Camera", &bare()).unwrap();
    assert!(out.text.contains(
        "export interface Inputs {\n  Matrices: { projection: mat4; view: mat4; };\n}\n"
    ));
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::EmptyInterfaceMembers { interface: "Outputs".into() }]
    );
}

#[test]
fn array_thresholds() {
    let out = generate("in vec4 a_position[12];", "A", &bare()).unwrap();
    assert!(out.text.contains("  a_position: vec4[];\n"));

    let out = generate("in vec4 a_position[4];", "A", &bare()).unwrap();
    assert!(out.text.contains("  a_position: [vec4,vec4,vec4,vec4];\n"));

    let out = generate("in vec4 a_position;", "A", &bare()).unwrap();
    assert!(out.text.contains("  a_position: vec4;\n"));
}

#[test]
fn nested_block_with_struct_members() {
    let src = "
        struct Light { vec3 position; vec3 color; };
        uniform Scene {
            Light sun;
            Light lamps[6];
            Light pair[2];
        };
        out vec4 outColor;
    ";
    let out = generate(src, "Scene", &bare()).unwrap();
    assert!(out.text.contains("interface Light {\n  position: vec3;\n  color: vec3;\n}\n"));
    assert!(out.text.contains(
        "  Scene: { sun: Light; lamps: Light[]; pair: [Light,Light]; };\n"
    ), "{}", out.text);
}

#[test]
fn base_type_catalog_is_appended_last() {
    let out = generate("in vec2 uv;\nout vec4 color;", "A", &GenerateOptions::default()).unwrap();
    for line in [
        "type vec2 = [number, number];",
        "type vec3 = [number, number, number];",
        "type vec4 = [number, number, number, number];",
        "type float = number;",
        "type mat2 = number[];",
        "type mat3 = number[];",
        "type mat4 = number[];",
        "type sampler2D = number;",
    ] {
        assert!(out.text.lines().any(|l| l == line), "missing `{line}`");
    }
    assert!(out.text.ends_with("type atomic_uint = number;\n}\n"));

    let parse_result = out.text.find("export const parseResult = ").unwrap();
    let aggregate = out.text.find("export interface Variables").unwrap();
    let catalog = out.text.find("type bool = boolean;").unwrap();
    assert!(aggregate < parse_result && parse_result < catalog);
}

#[test]
fn double_matrices_and_extended_samplers() {
    for (src, line) in [
        ("uniform dmat4 m;", "  m: dmat4;\n"),
        ("uniform sampler2DMS s;", "  s: sampler2DMS;\n"),
        ("uniform samplerCubeArray s;", "  s: samplerCubeArray;\n"),
        ("uniform isampler1D s;", "  s: isampler1D;\n"),
        ("uniform usamplerBuffer s;", "  s: usamplerBuffer;\n"),
    ] {
        let out = generate(src, "A", &GenerateOptions::default())
            .unwrap_or_else(|e| panic!("{src}: {e}"));
        assert!(out.text.contains(line), "{}", out.text);
    }
    let out = generate("uniform dmat4 m;", "A", &GenerateOptions::default()).unwrap();
    assert!(out.text.lines().any(|l| l == "type dmat4 = number[];"));
    assert!(out.text.lines().any(|l| l == "type sampler2DMS = number;"));
}

#[test]
fn descriptor_struct_definition_with_alias() {
    let src = r#"[
        { "name": "material", "type": "struct", "qualifier": "struct", "structAlias": "Material",
          "members": [{ "name": "ambient", "type": "vec3" }] },
        { "name": "outColor", "type": "vec4", "qualifier": "out" }
    ]"#;
    let out = generate_with(&DescriptorJson, src, "Lit", &bare()).unwrap();
    assert!(out.text.starts_with(
        "export namespace Lit {\ninterface Material {\n  ambient: vec3;\n}\n"
    ), "{}", out.text);
    assert_eq!(
        out.diagnostics,
        vec![Diagnostic::EmptyInterfaceMembers { interface: "Inputs".into() }]
    );

    // a definition that arrives without fields is reported, not fatal
    let src = r#"[
        { "name": "fog", "type": "struct", "qualifier": "struct", "structAlias": "Fog" },
        { "name": "outColor", "type": "vec4", "qualifier": "out" }
    ]"#;
    let out = generate_with(&DescriptorJson, src, "Lit", &bare()).unwrap();
    assert!(!out.text.contains("interface Fog"));
    assert!(out.diagnostics.contains(&Diagnostic::EmptyInterfaceMembers { interface: "Fog".into() }));
}

#[test]
fn descriptor_json_input() {
    let src = r#"[
        { "name": "Matrices", "type": "block", "qualifier": "uniform", "members": [
            { "name": "projection", "type": "mat4" },
            { "name": "view", "type": "mat4" }
        ] },
        { "name": "outColor", "type": "vec4", "qualifier": "out" }
    ]"#;
    let out = generate_with(&DescriptorJson, src, "Camera", &GenerateOptions::default()).unwrap();
    assert!(out.text.contains("  Matrices: { projection: mat4; view: mat4; };\n"));
    // parseResult round-trips the collaborator shape
    let start = out.text.find("export const parseResult = ").unwrap() + "export const parseResult = ".len();
    let end = start + out.text[start..].find(";\n").unwrap();
    let dumped: serde_json::Value = serde_json::from_str(&out.text[start..end]).unwrap();
    assert_eq!(dumped[0]["members"][1]["name"], "view");
    assert_eq!(dumped[1]["qualifier"], "out");
}

#[test]
fn malformed_descriptors_abort() {
    let src = r#"[{ "name": "light", "type": "struct", "qualifier": "uniform" }]"#;
    let err = generate_with(&DescriptorJson, src, "A", &bare()).unwrap_err();
    match err {
        GenerateError::Decl(e) => {
            assert_eq!(e, DeclError::MissingStructAlias { name: "light".into() });
            assert_eq!(e.name(), "light");
        }
        other => panic!("unexpected error: {other}"),
    }

    let src = r#"[{ "name": "Matrices", "type": "block", "qualifier": "uniform" }]"#;
    let err = generate_with(&DescriptorJson, src, "A", &bare()).unwrap_err();
    assert!(matches!(err, GenerateError::Decl(DeclError::EmptyBlock { .. })));
}

#[test]
fn parse_errors_abort() {
    let err = generate("in vec2", "A", &bare()).unwrap_err();
    assert!(matches!(err, GenerateError::Parse(_)));
}

#[test]
fn output_is_deterministic_across_threads() {
    let vars = vec![
        Variable::base("uv", "vec2").with_role(Role::In),
        Variable::struct_ref("lights", "Light").unwrap().with_role(Role::Uniform).with_array_len(3),
        Variable::base("color", "vec4").with_role(Role::Out),
    ];
    let expected = generate_from_variables(&vars, "A", &GenerateOptions::default()).unwrap();
    let outputs = (0..32)
        .into_par_iter()
        .map(|_| generate_from_variables(&vars, "A", &GenerateOptions::default()).unwrap())
        .collect::<Vec<_>>();
    assert!(outputs.iter().all(|out| *out == expected));
}

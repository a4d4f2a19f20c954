//! Fixed GLSL base type → host type aliases.
//!
//! The table is data, not computed: bump [`CATALOG_VERSION`] whenever a row
//! changes, since generated files embed these lines verbatim.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub const CATALOG_VERSION: u32 = 2;

const NUM: &str = "number";
const BOOL: &str = "boolean";
const VEC2: &str = "[number, number]";
const VEC3: &str = "[number, number, number]";
const VEC4: &str = "[number, number, number, number]";
const BVEC2: &str = "[boolean, boolean]";
const BVEC3: &str = "[boolean, boolean, boolean]";
const BVEC4: &str = "[boolean, boolean, boolean, boolean]";
const MAT: &str = "number[]";
const SAMPLER: &str = "number";
const IMAGE: &str = "number";

pub static BASE_TYPES: &[(&str, &str)] = &[
    // scalars
    ("bool", BOOL),
    ("int", NUM),
    ("uint", NUM),
    ("float", NUM),
    ("double", NUM),
    // vectors
    ("vec2", VEC2),
    ("vec3", VEC3),
    ("vec4", VEC4),
    ("dvec2", VEC2),
    ("dvec3", VEC3),
    ("dvec4", VEC4),
    ("ivec2", VEC2),
    ("ivec3", VEC3),
    ("ivec4", VEC4),
    ("uvec2", VEC2),
    ("uvec3", VEC3),
    ("uvec4", VEC4),
    ("bvec2", BVEC2),
    ("bvec3", BVEC3),
    ("bvec4", BVEC4),
    // matrices (column-major, flat)
    ("mat2", MAT),
    ("mat3", MAT),
    ("mat4", MAT),
    ("mat2x3", MAT),
    ("mat2x4", MAT),
    ("mat3x2", MAT),
    ("mat3x4", MAT),
    ("mat4x2", MAT),
    ("mat4x3", MAT),
    ("dmat2", MAT),
    ("dmat3", MAT),
    ("dmat4", MAT),
    ("dmat2x3", MAT),
    ("dmat2x4", MAT),
    ("dmat3x2", MAT),
    ("dmat3x4", MAT),
    ("dmat4x2", MAT),
    ("dmat4x3", MAT),
    // opaque handles
    ("sampler1D", SAMPLER),
    ("sampler2D", SAMPLER),
    ("sampler3D", SAMPLER),
    ("samplerCube", SAMPLER),
    ("sampler2DRect", SAMPLER),
    ("sampler1DArray", SAMPLER),
    ("sampler2DArray", SAMPLER),
    ("samplerBuffer", SAMPLER),
    ("sampler2DMS", SAMPLER),
    ("sampler2DMSArray", SAMPLER),
    ("samplerCubeArray", SAMPLER),
    ("sampler1DShadow", SAMPLER),
    ("sampler2DShadow", SAMPLER),
    ("sampler2DRectShadow", SAMPLER),
    ("sampler1DArrayShadow", SAMPLER),
    ("sampler2DArrayShadow", SAMPLER),
    ("samplerCubeShadow", SAMPLER),
    ("samplerCubeArrayShadow", SAMPLER),
    ("isampler1D", SAMPLER),
    ("isampler2D", SAMPLER),
    ("isampler3D", SAMPLER),
    ("isamplerCube", SAMPLER),
    ("isampler2DRect", SAMPLER),
    ("isampler1DArray", SAMPLER),
    ("isampler2DArray", SAMPLER),
    ("isamplerBuffer", SAMPLER),
    ("isampler2DMS", SAMPLER),
    ("isampler2DMSArray", SAMPLER),
    ("isamplerCubeArray", SAMPLER),
    ("usampler1D", SAMPLER),
    ("usampler2D", SAMPLER),
    ("usampler3D", SAMPLER),
    ("usamplerCube", SAMPLER),
    ("usampler2DRect", SAMPLER),
    ("usampler1DArray", SAMPLER),
    ("usampler2DArray", SAMPLER),
    ("usamplerBuffer", SAMPLER),
    ("usampler2DMS", SAMPLER),
    ("usampler2DMSArray", SAMPLER),
    ("usamplerCubeArray", SAMPLER),
    ("image1D", IMAGE),
    ("image2D", IMAGE),
    ("image3D", IMAGE),
    ("imageCube", IMAGE),
    ("image2DRect", IMAGE),
    ("image1DArray", IMAGE),
    ("image2DArray", IMAGE),
    ("imageBuffer", IMAGE),
    ("image2DMS", IMAGE),
    ("image2DMSArray", IMAGE),
    ("imageCubeArray", IMAGE),
    ("iimage1D", IMAGE),
    ("iimage2D", IMAGE),
    ("iimage3D", IMAGE),
    ("iimageCube", IMAGE),
    ("iimage2DRect", IMAGE),
    ("iimage1DArray", IMAGE),
    ("iimage2DArray", IMAGE),
    ("iimageBuffer", IMAGE),
    ("iimage2DMS", IMAGE),
    ("iimage2DMSArray", IMAGE),
    ("iimageCubeArray", IMAGE),
    ("uimage1D", IMAGE),
    ("uimage2D", IMAGE),
    ("uimage3D", IMAGE),
    ("uimageCube", IMAGE),
    ("uimage2DRect", IMAGE),
    ("uimage1DArray", IMAGE),
    ("uimage2DArray", IMAGE),
    ("uimageBuffer", IMAGE),
    ("uimage2DMS", IMAGE),
    ("uimage2DMSArray", IMAGE),
    ("uimageCubeArray", IMAGE),
    ("atomic_uint", NUM),
];

static BY_NAME: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| BASE_TYPES.iter().copied().collect());

static RENDERED: Lazy<String> = Lazy::new(|| {
    BASE_TYPES
        .iter()
        .map(|(glsl, host)| format!("type {glsl} = {host};\n"))
        .collect()
});

pub fn lookup(glsl_name: &str) -> Option<&'static str> {
    BY_NAME.get(glsl_name).copied()
}

/// The whole catalog as `type <glsl> = <host>;` lines.
pub fn render() -> &'static str {
    RENDERED.as_str()
}

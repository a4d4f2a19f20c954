//! Descriptor extraction from GLSL source.
//!
//! [`ShaderParser`] is the seam the orchestrator depends on; [`GlslParser`]
//! walks a `glsl` translation unit and keeps only what declarations need:
//! global `in`/`out`/`uniform` variables, named structs and interface blocks.
use glsl::parser::Parse;
use glsl::syntax::{
    ArraySpecifier, ArraySpecifierDimension, Block as GlslBlock, Declaration, Expr,
    ExternalDeclaration, InitDeclaratorList, StorageQualifier, StructFieldSpecifier,
    StructSpecifier, TranslationUnit, TypeQualifier, TypeQualifierSpec, TypeSpecifier,
    TypeSpecifierNonArray,
};

use crate::error::{DeclError, ParseError};
use crate::ir::{Block, Role, StructRef, VarType, Variable};

pub trait ShaderParser {
    fn parse(&self, source: &str) -> Result<Vec<Variable>, ParseError>;
}

impl<F> ShaderParser for F
where
    F: Fn(&str) -> Result<Vec<Variable>, ParseError>,
{
    fn parse(&self, source: &str) -> Result<Vec<Variable>, ParseError> {
        self(source)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlslParser;

impl ShaderParser for GlslParser {
    fn parse(&self, source: &str) -> Result<Vec<Variable>, ParseError> {
        let unit = TranslationUnit::parse(source)
            .map_err(|e| ParseError::Syntax(format!("{e:?}")))?;

        let mut out = Vec::new();
        for decl in unit.0.0.iter() {
            let ExternalDeclaration::Declaration(decl) = decl else {
                continue;
            };
            match decl {
                Declaration::InitDeclaratorList(list) => lower_declarator_list(list, &mut out)?,
                Declaration::Block(block) => {
                    if let Some(var) = lower_block(block)? {
                        out.push(var);
                    }
                }
                // precision statements, prototypes, `invariant x;` ...
                _ => {}
            }
        }
        Ok(out)
    }
}

// ------------------------------ Declarations ------------------------------ //

fn lower_declarator_list(
    list: &InitDeclaratorList,
    out: &mut Vec<Variable>,
) -> Result<(), ParseError> {
    let head = &list.head;
    let role = head.ty.qualifier.as_ref().and_then(storage_role);

    // `struct Light { ... };` (optionally followed by declarators)
    if let TypeSpecifierNonArray::Struct(spec) = &head.ty.ty.ty {
        if let Some(def) = lower_struct_definition(spec)? {
            out.push(def);
        }
    }

    let Some(role) = role else {
        return Ok(());
    };

    let mut declarators = Vec::new();
    if let Some(name) = &head.name {
        declarators.push((name.0.as_str(), head.array_specifier.as_ref()));
    }
    for item in &list.tail {
        declarators.push((item.ident.ident.0.as_str(), item.ident.array_spec.as_ref()));
    }

    for (name, array) in declarators {
        let ty = lower_type(name, &head.ty.ty)?;
        let len = combined_array_len(name, head.ty.ty.array_specifier.as_ref(), array)?;
        out.push(Variable { name: name.to_owned(), ty, role: Some(role), array_len: len });
    }
    Ok(())
}

fn lower_struct_definition(spec: &StructSpecifier) -> Result<Option<Variable>, ParseError> {
    let Some(name) = &spec.name else {
        return Ok(None);
    };
    let members = lower_fields(spec.fields.0.iter())?;
    let block = Block::new(members).ok_or_else(|| DeclError::EmptyBlock { name: name.0.clone() })?;
    Ok(Some(Variable::new(name.0.clone(), VarType::Block(block)).with_role(Role::Struct)))
}

fn lower_block(block: &GlslBlock) -> Result<Option<Variable>, ParseError> {
    let Some(role) = storage_role(&block.qualifier) else {
        return Ok(None);
    };
    let (name, array) = match &block.identifier {
        Some(inst) => (inst.ident.0.clone(), inst.array_spec.as_ref()),
        None => (block.name.0.clone(), None),
    };
    let members = lower_fields(block.fields.iter())?;
    let body = Block::new(members).ok_or_else(|| DeclError::EmptyBlock { name: name.clone() })?;
    let len = array_len(&name, array)?;
    Ok(Some(Variable { name, ty: VarType::Block(body), role: Some(role), array_len: len }))
}

fn lower_fields<'a, I>(fields: I) -> Result<Vec<Variable>, ParseError>
where
    I: Iterator<Item = &'a StructFieldSpecifier>,
{
    let mut members = Vec::new();
    for field in fields {
        for ident in field.identifiers.0.iter() {
            let name = ident.ident.0.as_str();
            let ty = lower_type(name, &field.ty)?;
            let len = combined_array_len(name, field.ty.array_specifier.as_ref(), ident.array_spec.as_ref())?;
            members.push(Variable { name: name.to_owned(), ty, role: None, array_len: len });
        }
    }
    Ok(members)
}

// --------------------------------- Types ---------------------------------- //

fn lower_type(name: &str, spec: &TypeSpecifier) -> Result<VarType, ParseError> {
    match &spec.ty {
        TypeSpecifierNonArray::TypeName(t) => StructRef::new(t.0.clone())
            .map(VarType::Struct)
            .ok_or_else(|| DeclError::MissingStructAlias { name: name.to_owned() }.into()),
        TypeSpecifierNonArray::Struct(s) => match &s.name {
            Some(t) => StructRef::new(t.0.clone())
                .map(VarType::Struct)
                .ok_or_else(|| DeclError::MissingStructAlias { name: name.to_owned() }.into()),
            // anonymous struct: inline its fields
            None => {
                let members = lower_fields(s.fields.0.iter())?;
                Block::new(members)
                    .map(VarType::Block)
                    .ok_or_else(|| DeclError::EmptyBlock { name: name.to_owned() }.into())
            }
        },
        other => base_type_name(other)
            .map(|n| VarType::Base(n.to_owned()))
            .ok_or_else(|| ParseError::UnsupportedType {
                name: name.to_owned(),
                ty: format!("{other:?}"),
            }),
    }
}

/// Canonical GLSL spelling; every name returned here has a row in the type catalog.
pub fn base_type_name(ty: &TypeSpecifierNonArray) -> Option<&'static str> {
    use TypeSpecifierNonArray as T;
    let name = match ty {
        T::Bool => "bool",
        T::Int => "int",
        T::UInt => "uint",
        T::Float => "float",
        T::Double => "double",
        T::Vec2 => "vec2",
        T::Vec3 => "vec3",
        T::Vec4 => "vec4",
        T::DVec2 => "dvec2",
        T::DVec3 => "dvec3",
        T::DVec4 => "dvec4",
        T::BVec2 => "bvec2",
        T::BVec3 => "bvec3",
        T::BVec4 => "bvec4",
        T::IVec2 => "ivec2",
        T::IVec3 => "ivec3",
        T::IVec4 => "ivec4",
        T::UVec2 => "uvec2",
        T::UVec3 => "uvec3",
        T::UVec4 => "uvec4",
        T::Mat2 => "mat2",
        T::Mat3 => "mat3",
        T::Mat4 => "mat4",
        T::Mat23 => "mat2x3",
        T::Mat24 => "mat2x4",
        T::Mat32 => "mat3x2",
        T::Mat34 => "mat3x4",
        T::Mat42 => "mat4x2",
        T::Mat43 => "mat4x3",
        T::DMat2 => "dmat2",
        T::DMat3 => "dmat3",
        T::DMat4 => "dmat4",
        T::DMat23 => "dmat2x3",
        T::DMat24 => "dmat2x4",
        T::DMat32 => "dmat3x2",
        T::DMat34 => "dmat3x4",
        T::DMat42 => "dmat4x2",
        T::DMat43 => "dmat4x3",
        T::Sampler1D => "sampler1D",
        T::Sampler2D => "sampler2D",
        T::Sampler3D => "sampler3D",
        T::SamplerCube => "samplerCube",
        T::Sampler2DRect => "sampler2DRect",
        T::Sampler1DArray => "sampler1DArray",
        T::Sampler2DArray => "sampler2DArray",
        T::SamplerBuffer => "samplerBuffer",
        T::Sampler2DMS => "sampler2DMS",
        T::Sampler2DMSArray => "sampler2DMSArray",
        T::SamplerCubeArray => "samplerCubeArray",
        T::Sampler1DShadow => "sampler1DShadow",
        T::Sampler2DShadow => "sampler2DShadow",
        T::Sampler2DRectShadow => "sampler2DRectShadow",
        T::Sampler1DArrayShadow => "sampler1DArrayShadow",
        T::Sampler2DArrayShadow => "sampler2DArrayShadow",
        T::SamplerCubeShadow => "samplerCubeShadow",
        T::SamplerCubeArrayShadow => "samplerCubeArrayShadow",
        T::ISampler1D => "isampler1D",
        T::ISampler2D => "isampler2D",
        T::ISampler3D => "isampler3D",
        T::ISamplerCube => "isamplerCube",
        T::ISampler2DRect => "isampler2DRect",
        T::ISampler1DArray => "isampler1DArray",
        T::ISampler2DArray => "isampler2DArray",
        T::ISamplerBuffer => "isamplerBuffer",
        T::ISampler2DMS => "isampler2DMS",
        T::ISampler2DMSArray => "isampler2DMSArray",
        T::ISamplerCubeArray => "isamplerCubeArray",
        T::USampler1D => "usampler1D",
        T::USampler2D => "usampler2D",
        T::USampler3D => "usampler3D",
        T::USamplerCube => "usamplerCube",
        T::USampler2DRect => "usampler2DRect",
        T::USampler1DArray => "usampler1DArray",
        T::USampler2DArray => "usampler2DArray",
        T::USamplerBuffer => "usamplerBuffer",
        T::USampler2DMS => "usampler2DMS",
        T::USampler2DMSArray => "usampler2DMSArray",
        T::USamplerCubeArray => "usamplerCubeArray",
        T::Image1D => "image1D",
        T::Image2D => "image2D",
        T::Image3D => "image3D",
        T::ImageCube => "imageCube",
        T::Image2DRect => "image2DRect",
        T::Image1DArray => "image1DArray",
        T::Image2DArray => "image2DArray",
        T::ImageBuffer => "imageBuffer",
        T::Image2DMS => "image2DMS",
        T::Image2DMSArray => "image2DMSArray",
        T::ImageCubeArray => "imageCubeArray",
        T::IImage1D => "iimage1D",
        T::IImage2D => "iimage2D",
        T::IImage3D => "iimage3D",
        T::IImageCube => "iimageCube",
        T::IImage2DRect => "iimage2DRect",
        T::IImage1DArray => "iimage1DArray",
        T::IImage2DArray => "iimage2DArray",
        T::IImageBuffer => "iimageBuffer",
        T::IImage2DMS => "iimage2DMS",
        T::IImage2DMSArray => "iimage2DMSArray",
        T::IImageCubeArray => "iimageCubeArray",
        T::UImage1D => "uimage1D",
        T::UImage2D => "uimage2D",
        T::UImage3D => "uimage3D",
        T::UImageCube => "uimageCube",
        T::UImage2DRect => "uimage2DRect",
        T::UImage1DArray => "uimage1DArray",
        T::UImage2DArray => "uimage2DArray",
        T::UImageBuffer => "uimageBuffer",
        T::UImage2DMS => "uimage2DMS",
        T::UImage2DMSArray => "uimage2DMSArray",
        T::UImageCubeArray => "uimageCubeArray",
        T::AtomicUInt => "atomic_uint",
        T::Void | T::Struct(_) | T::TypeName(_) => return None,
    };
    Some(name)
}

fn storage_role(q: &TypeQualifier) -> Option<Role> {
    q.qualifiers.0.iter().find_map(|spec| match spec {
        TypeQualifierSpec::Storage(StorageQualifier::In) => Some(Role::In),
        TypeQualifierSpec::Storage(StorageQualifier::Out) => Some(Role::Out),
        TypeQualifierSpec::Storage(StorageQualifier::Uniform) => Some(Role::Uniform),
        _ => None,
    })
}

// --------------------------------- Arrays --------------------------------- //

/// `float[3] x` and `float x[3]` both mean three elements; both at once is
/// an array of arrays.
fn combined_array_len(
    name: &str,
    on_type: Option<&ArraySpecifier>,
    on_name: Option<&ArraySpecifier>,
) -> Result<u32, ParseError> {
    match (on_type, on_name) {
        (Some(_), Some(_)) => Err(ParseError::MultiDimensionalArray { name: name.to_owned() }),
        (Some(spec), None) | (None, Some(spec)) => array_len(name, Some(spec)),
        (None, None) => Ok(1),
    }
}

fn array_len(name: &str, spec: Option<&ArraySpecifier>) -> Result<u32, ParseError> {
    let Some(spec) = spec else {
        return Ok(1);
    };
    let dims = &spec.dimensions.0;
    if dims.len() > 1 {
        return Err(ParseError::MultiDimensionalArray { name: name.to_owned() });
    }
    let literal = match dims.first() {
        Some(ArraySpecifierDimension::ExplicitlySized(expr)) => match expr.as_ref() {
            Expr::IntConst(n) => u32::try_from(*n).ok(),
            Expr::UIntConst(n) => Some(*n),
            _ => return Err(ParseError::NonLiteralArraySize { name: name.to_owned() }),
        },
        Some(ArraySpecifierDimension::Unsized) | None => {
            return Err(ParseError::UnsizedArray { name: name.to_owned() });
        }
    };
    match literal {
        Some(n) if n >= 1 => Ok(n),
        _ => Err(DeclError::InvalidArrayLength { name: name.to_owned() }.into()),
    }
}

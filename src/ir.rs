// Strongly-typed descriptor model. No serde here; see `raw` for the wire shape.

/// What a variable is used for. Only drives partitioning, never text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    In,
    Out,
    Uniform,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarType {
    Base(String),            // vec4, mat3, sampler2D, ...
    Struct(StructRef),       // reference to a named struct
    Block(Block),            // inline aggregate (uniform block, struct body)
}

/// Name of a referenced struct type. Never empty.
///
/// Descriptor lists may carry the struct body next to the alias; it is kept so
/// the definition can still be cataloged and dumped as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructRef {
    alias: String,
    body: Option<Block>,
}

impl StructRef {
    pub fn new(alias: impl Into<String>) -> Option<Self> {
        let alias = alias.into();
        if alias.is_empty() {
            return None;
        }
        Some(Self { alias, body: None })
    }

    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn body(&self) -> Option<&Block> {
        self.body.as_ref()
    }
}

/// Ordered, non-empty member list of an inline aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    members: Vec<Variable>,
}

impl Block {
    pub fn new(members: Vec<Variable>) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        Some(Self { members })
    }

    pub fn members(&self) -> &[Variable] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: VarType,
    pub role: Option<Role>,
    pub array_len: u32,      // 1 = not an array
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: VarType) -> Self {
        Self { name: name.into(), ty, role: None, array_len: 1 }
    }
    pub fn base(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, VarType::Base(ty.into()))
    }
    /// `None` when `alias` is empty.
    pub fn struct_ref(name: impl Into<String>, alias: impl Into<String>) -> Option<Self> {
        StructRef::new(alias).map(|r| Self::new(name, VarType::Struct(r)))
    }
    /// `None` when `members` is empty.
    pub fn block(name: impl Into<String>, members: Vec<Variable>) -> Option<Self> {
        Block::new(members).map(|b| Self::new(name, VarType::Block(b)))
    }
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
    /// Lengths below 1 are clamped to 1.
    pub fn with_array_len(mut self, len: u32) -> Self {
        self.array_len = len.max(1);
        self
    }
    /// Body of an inline block, or of a struct that arrived with its fields.
    pub fn members(&self) -> Option<&[Variable]> {
        match &self.ty {
            VarType::Block(b) => Some(b.members()),
            VarType::Struct(r) => r.body().map(Block::members),
            VarType::Base(_) => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_len > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payloads_are_unrepresentable() {
        assert!(StructRef::new("").is_none());
        assert!(Block::new(Vec::new()).is_none());
        assert!(Variable::struct_ref("light", "").is_none());
        assert!(Variable::block("Matrices", Vec::new()).is_none());
    }

    #[test]
    fn members_come_from_bodies_only() {
        let block = Variable::block("Matrices", vec![Variable::base("view", "mat4")]).unwrap();
        assert_eq!(block.members().map(<[Variable]>::len), Some(1));
        assert!(Variable::base("uv", "vec2").members().is_none());
        assert!(Variable::struct_ref("light", "Light").unwrap().members().is_none());
    }

    #[test]
    fn struct_ref_may_carry_its_body() {
        let body = Block::new(vec![Variable::base("color", "vec3")]).unwrap();
        let light = StructRef::new("Light").unwrap().with_body(body);
        assert_eq!(light.alias(), "Light");
        let var = Variable::new("light", VarType::Struct(light));
        assert_eq!(var.members().map(|m| m[0].name.as_str()), Some("color"));
    }

    #[test]
    fn array_len_is_at_least_one() {
        let v = Variable::base("weights", "float").with_array_len(0);
        assert_eq!(v.array_len, 1);
        assert!(!v.is_array());
        assert!(Variable::base("weights", "float").with_array_len(3).is_array());
    }
}

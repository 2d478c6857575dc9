//! Immutable AST nodes.
//!
//! Nodes are only created through the builders in [`crate::builder`] and are
//! never mutated afterwards. Children are owned by their parent and kept in
//! declaration order; nothing is deduplicated or cross-checked.

use crate::types::{OctetsShape, Type};

/// Root of one compiled schema: its top-level scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    pub(crate) scopes: Vec<Scope>,
}

impl Specification {
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

/// A named, possibly nested namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) enums: Vec<Enum>,
    pub(crate) structs: Vec<Struct>,
    pub(crate) unions: Vec<Union>,
}

impl Scope {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting level, `0` for a top-level scope.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    pub fn structs(&self) -> &[Struct] {
        &self.structs
    }

    pub fn unions(&self) -> &[Union] {
        &self.unions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub(crate) name: String,
    pub(crate) values: Vec<Value>,
}

impl Enum {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An enum member. The ordinal is its zero-based declaration index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub(crate) name: String,
    pub(crate) ordinal: usize,
}

impl Value {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub(crate) name: String,
    pub(crate) type_id: i32,
    pub(crate) supertype: Option<String>,
    pub(crate) members: Vec<Member>,
}

impl Struct {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric type identifier, `0` when the schema omits it.
    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    /// Scoped name of the parent struct, unresolved.
    pub fn supertype(&self) -> Option<&str> {
        self.supertype.as_deref()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// A typed field of a struct or union case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub(crate) name: String,
    pub(crate) ty: Type,
    pub(crate) octets: Option<OctetsShape>,
}

impl Member {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Wider signed representation of an unsigned member type.
    pub fn unsigned_type(&self) -> Option<Type> {
        self.ty.widened()
    }

    pub fn octets(&self) -> Option<&OctetsShape> {
        self.octets.as_ref()
    }

    /// Fixed octets length.
    pub fn size(&self) -> Option<u32> {
        self.octets.as_ref().and_then(OctetsShape::size)
    }

    /// Name of the sibling member carrying the octets length.
    pub fn size_name(&self) -> Option<&str> {
        self.octets.as_ref().and_then(OctetsShape::size_name)
    }
}

/// A tagged union; cases keep their declared discriminants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Union {
    pub(crate) name: String,
    pub(crate) cases: Vec<Case>,
}

impl Union {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub(crate) value: i32,
    pub(crate) members: Vec<Member>,
}

impl Case {
    /// Discriminant exactly as declared.
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// A type declared directly inside a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Enum(Enum),
    Struct(Struct),
    Union(Union),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(e) => e.name(),
            Self::Struct(s) => s.name(),
            Self::Union(u) => u.name(),
        }
    }
}

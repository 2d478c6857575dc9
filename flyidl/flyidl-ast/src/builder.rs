//! Accumulating builders for AST nodes.
//!
//! Every builder is consumed by `build`, so a logical node can only be frozen
//! once. Builders do no semantic checking; the ones with fields that the tree
//! walk must supply ([`ValueBuilder`], [`MemberBuilder`]) report a
//! [`AstError::ContractViolation`] when finalized without them.

use crate::{
    AstError,
    ast::{Case, Declaration, Enum, Member, Scope, Specification, Struct, Union, Value},
    types::{OctetsShape, Type},
};

#[derive(Debug, Default)]
pub struct SpecificationBuilder {
    scopes: Vec<Scope>,
}

impl SpecificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&mut self, scope: Scope) -> &mut Self {
        self.scopes.push(scope);
        self
    }

    pub fn build(self) -> Specification {
        Specification {
            scopes: self.scopes,
        }
    }
}

#[derive(Debug)]
pub struct ScopeBuilder {
    name: String,
    depth: usize,
    scopes: Vec<Scope>,
    enums: Vec<Enum>,
    structs: Vec<Struct>,
    unions: Vec<Union>,
}

impl ScopeBuilder {
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
            scopes: Vec::new(),
            enums: Vec::new(),
            structs: Vec::new(),
            unions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn scope(&mut self, scope: Scope) -> &mut Self {
        self.scopes.push(scope);
        self
    }

    pub fn enumeration(&mut self, enumeration: Enum) -> &mut Self {
        self.enums.push(enumeration);
        self
    }

    pub fn structure(&mut self, structure: Struct) -> &mut Self {
        self.structs.push(structure);
        self
    }

    pub fn union(&mut self, union: Union) -> &mut Self {
        self.unions.push(union);
        self
    }

    /// Append a type declaration to the collection matching its kind.
    pub fn declaration(&mut self, declaration: Declaration) -> &mut Self {
        match declaration {
            Declaration::Enum(e) => self.enumeration(e),
            Declaration::Struct(s) => self.structure(s),
            Declaration::Union(u) => self.union(u),
        }
    }

    pub fn build(self) -> Scope {
        Scope {
            name: self.name,
            depth: self.depth,
            scopes: self.scopes,
            enums: self.enums,
            structs: self.structs,
            unions: self.unions,
        }
    }
}

#[derive(Debug)]
pub struct EnumBuilder {
    name: String,
    values: Vec<Value>,
}

impl EnumBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn value(&mut self, value: Value) -> &mut Self {
        self.values.push(value);
        self
    }

    /// Number of values added so far; the ordinal of the next value.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn build(self) -> Enum {
        Enum {
            name: self.name,
            values: self.values,
        }
    }
}

#[derive(Debug, Default)]
pub struct ValueBuilder {
    name: Option<String>,
    ordinal: Option<usize>,
}

impl ValueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn ordinal(&mut self, ordinal: usize) -> &mut Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn build(self) -> Result<Value, AstError> {
        Ok(Value {
            name: self.name.ok_or(AstError::ContractViolation {
                node: "value",
                field: "name",
            })?,
            ordinal: self.ordinal.ok_or(AstError::ContractViolation {
                node: "value",
                field: "ordinal",
            })?,
        })
    }
}

#[derive(Debug)]
pub struct StructBuilder {
    name: String,
    type_id: i32,
    supertype: Option<String>,
    members: Vec<Member>,
}

impl StructBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: 0,
            supertype: None,
            members: Vec::new(),
        }
    }

    pub fn type_id(&mut self, type_id: i32) -> &mut Self {
        self.type_id = type_id;
        self
    }

    pub fn supertype(&mut self, supertype: impl Into<String>) -> &mut Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn member(&mut self, member: Member) -> &mut Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> Struct {
        Struct {
            name: self.name,
            type_id: self.type_id,
            supertype: self.supertype,
            members: self.members,
        }
    }
}

/// Builder for [`Member`].
///
/// The octets size setters share one slot: whichever of [`size`](Self::size)
/// and [`size_name`](Self::size_name) runs last decides the shape.
#[derive(Debug, Default)]
pub struct MemberBuilder {
    name: Option<String>,
    ty: Option<Type>,
    octets: Option<OctetsShape>,
}

impl MemberBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn ty(&mut self, ty: Type) -> &mut Self {
        self.ty = Some(ty);
        self
    }

    pub fn size(&mut self, size: u32) -> &mut Self {
        self.octets(OctetsShape::Fixed(size))
    }

    pub fn size_name(&mut self, size_name: impl Into<String>) -> &mut Self {
        self.octets(OctetsShape::Sized(size_name.into()))
    }

    pub fn octets(&mut self, shape: OctetsShape) -> &mut Self {
        self.octets = Some(shape);
        self
    }

    pub fn build(self) -> Result<Member, AstError> {
        Ok(Member {
            name: self.name.ok_or(AstError::ContractViolation {
                node: "member",
                field: "name",
            })?,
            ty: self.ty.ok_or(AstError::ContractViolation {
                node: "member",
                field: "type",
            })?,
            octets: self.octets,
        })
    }
}

#[derive(Debug)]
pub struct UnionBuilder {
    name: String,
    cases: Vec<Case>,
}

impl UnionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(&mut self, case: Case) -> &mut Self {
        self.cases.push(case);
        self
    }

    pub fn build(self) -> Union {
        Union {
            name: self.name,
            cases: self.cases,
        }
    }
}

#[derive(Debug)]
pub struct CaseBuilder {
    value: i32,
    members: Vec<Member>,
}

impl CaseBuilder {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            members: Vec::new(),
        }
    }

    pub fn member(&mut self, member: Member) -> &mut Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> Case {
        Case {
            value: self.value,
            members: self.members,
        }
    }
}

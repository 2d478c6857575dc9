//! AST-construction stage.
//!
//! Walks a [`SpecificationNode`] depth-first. Each node's builder is created
//! when its production is entered, filled from its children, frozen when the
//! subtree is done and handed to exactly one parent:
//!
//! - scopes go to the enclosing scope on the scope stack, or to the specification;
//! - enums, structs and unions go to the enclosing scope;
//! - members go to the [`MemberOwner`] passed down by their struct or case.
//!
//! Named references (supertypes, dynamic member types, octets size fields) are
//! copied as text; resolving them is a later pass.

use flyidl_ast::{
    AstError, Case, CaseBuilder, Declaration, Enum, EnumBuilder, Member, MemberBuilder,
    PrimitiveKind, Scope, ScopeBuilder, Specification, SpecificationBuilder, Struct,
    StructBuilder, Type, Union, UnionBuilder, Value, ValueBuilder, classify_octets,
    classify_primitive, parse_int_literal, parse_positive_literal,
};
use tracing::{debug, trace};

use crate::cst::{
    CaseMemberNode, DeclaratorNode, EnumTypeNode, EnumValueNode, MemberNode, ScopeMemberNode,
    ScopeNode, SpecificationNode, StructTypeNode, Token, TypeDeclNode, TypeSpecNode,
    UnionTypeNode,
};

/// Builds AST trees from parse trees.
///
/// Holds the stack of scopes currently being built. The stack is cleared
/// before and after every top-level build, so one instance can process any
/// number of independent compile units (sequentially).
#[derive(Debug, Default)]
pub struct AstBuilder {
    scopes: Vec<ScopeBuilder>,
}

/// The builder a finished member is appended to.
enum MemberOwner<'b> {
    Struct(&'b mut StructBuilder),
    Case(&'b mut CaseBuilder),
}

impl MemberOwner<'_> {
    fn append(&mut self, member: Member) {
        match self {
            Self::Struct(builder) => {
                builder.member(member);
            }
            Self::Case(builder) => {
                builder.member(member);
            }
        }
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the whole tree for one compile unit.
    ///
    /// A malformed literal anywhere aborts the build; no partial tree is returned.
    pub fn build(&mut self, node: &SpecificationNode) -> Result<Specification, AstError> {
        self.reset();
        let built = self.specification(node);
        self.reset();
        built
    }

    /// Build a single scope on its own, at depth `0`.
    pub fn build_scope(&mut self, node: &ScopeNode) -> Result<Scope, AstError> {
        self.reset();
        let built = self.scope(node);
        self.reset();
        built
    }

    /// Build a single enum, struct or union that is not attached to any scope.
    ///
    /// Declarations never touch the scope stack; it is still cleared so the
    /// builder is left in the same state as after [`AstBuilder::build`].
    pub fn build_declaration(&mut self, node: &TypeDeclNode) -> Result<Declaration, AstError> {
        self.reset();
        declaration(node)
    }

    /// Number of scopes currently being built.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn reset(&mut self) {
        self.scopes.clear();
    }

    fn specification(&mut self, node: &SpecificationNode) -> Result<Specification, AstError> {
        let mut builder = SpecificationBuilder::new();
        for scope in node.scopes() {
            let scope = self.scope(scope)?;
            builder.scope(scope);
        }
        Ok(builder.build())
    }

    fn scope(&mut self, node: &ScopeNode) -> Result<Scope, AstError> {
        let name = node.id().text();
        let depth = self.scopes.len();
        debug!(scope = name, depth, "entering scope");

        self.scopes.push(ScopeBuilder::new(name, depth));
        let visited = node
            .members()
            .iter()
            .try_for_each(|member| self.scope_member(member));
        let builder = self.scopes.pop().ok_or(AstError::ContractViolation {
            node: "scope",
            field: "builder",
        })?;
        visited?;

        let scope = builder.build();
        debug!(
            scope = name,
            depth,
            scopes = scope.scopes().len(),
            enums = scope.enums().len(),
            structs = scope.structs().len(),
            unions = scope.unions().len(),
            "leaving scope"
        );
        Ok(scope)
    }

    fn scope_member(&mut self, node: &ScopeMemberNode) -> Result<(), AstError> {
        match node {
            ScopeMemberNode::Scope(child) => {
                let child = self.scope(child)?;
                self.current_scope()?.scope(child);
            }
            ScopeMemberNode::Type(decl) => {
                let decl = declaration(decl)?;
                let scope = self.current_scope()?;
                trace!(
                    scope = scope.name(),
                    depth = scope.depth(),
                    declaration = decl.name(),
                    "attaching declaration"
                );
                scope.declaration(decl);
            }
        }
        Ok(())
    }

    fn current_scope(&mut self) -> Result<&mut ScopeBuilder, AstError> {
        self.scopes.last_mut().ok_or(AstError::ContractViolation {
            node: "scope member",
            field: "enclosing scope",
        })
    }
}

fn declaration(node: &TypeDeclNode) -> Result<Declaration, AstError> {
    Ok(match node {
        TypeDeclNode::Enum(node) => Declaration::Enum(enum_type(node)?),
        TypeDeclNode::Struct(node) => Declaration::Struct(struct_type(node)?),
        TypeDeclNode::Union(node) => Declaration::Union(union_type(node)?),
    })
}

fn enum_type(node: &EnumTypeNode) -> Result<Enum, AstError> {
    let mut builder = EnumBuilder::new(node.id().text());
    for value in node.values() {
        let value = enum_value(value, builder.size())?;
        builder.value(value);
    }
    let built = builder.build();
    trace!(name = built.name(), values = built.values().len(), "built enum");
    Ok(built)
}

/// Ordinals are positional; a literal written next to the value is ignored.
fn enum_value(node: &EnumValueNode, ordinal: usize) -> Result<Value, AstError> {
    let mut builder = ValueBuilder::new();
    builder.name(node.id().text()).ordinal(ordinal);
    builder.build()
}

fn struct_type(node: &StructTypeNode) -> Result<Struct, AstError> {
    let mut builder = StructBuilder::new(node.id().text());
    builder.type_id(int_literal(node.int_literal())?);
    if let Some(supertype) = node.scoped_name() {
        builder.supertype(supertype.text());
    }

    let mut owner = MemberOwner::Struct(&mut builder);
    for member_node in node.members() {
        member(member_node, &mut owner)?;
    }

    let built = builder.build();
    trace!(
        name = built.name(),
        type_id = built.type_id(),
        supertype = built.supertype(),
        members = built.members().len(),
        "built struct"
    );
    Ok(built)
}

fn union_type(node: &UnionTypeNode) -> Result<Union, AstError> {
    let mut builder = UnionBuilder::new(node.id().text());
    for case in node.cases() {
        builder.case(case_member(case)?);
    }
    let built = builder.build();
    trace!(name = built.name(), cases = built.cases().len(), "built union");
    Ok(built)
}

/// The discriminant is taken from the literal as is, never renumbered.
fn case_member(node: &CaseMemberNode) -> Result<Case, AstError> {
    let mut builder = CaseBuilder::new(int_literal(Some(node.int_literal()))?);

    let mut owner = MemberOwner::Case(&mut builder);
    for member_node in node.members() {
        member(member_node, &mut owner)?;
    }

    let built = builder.build();
    trace!(value = built.value(), members = built.members().len(), "built case");
    Ok(built)
}

fn member(node: &MemberNode, owner: &mut MemberOwner<'_>) -> Result<(), AstError> {
    let mut builder = MemberBuilder::new();
    type_spec(node.type_spec(), &mut builder)?;
    declarator(node.declarator(), &mut builder);

    let built = builder.build()?;
    trace!(name = built.name(), ty = %built.ty(), "built member");
    owner.append(built);
    Ok(())
}

fn declarator(node: &DeclaratorNode, member: &mut MemberBuilder) {
    member.name(node.id().text());
}

fn type_spec(node: &TypeSpecNode, member: &mut MemberBuilder) -> Result<(), AstError> {
    match node {
        TypeSpecNode::Primitive(primitive) if primitive.kind() == PrimitiveKind::Octets => {
            // A bare `octets` keyword carries neither size form.
            let shape = classify_octets(None, None)
                .map_err(|e| e.at(primitive.keyword().position()))?;
            member.ty(Type::Octets).octets(shape);
        }
        TypeSpecNode::Primitive(primitive) => {
            member.ty(classify_primitive(primitive.kind()));
        }
        TypeSpecNode::Octets(octets) => {
            member.ty(classify_primitive(PrimitiveKind::Octets));
            let size = octets
                .positive_int_const()
                .map(|token| {
                    parse_positive_literal(token.text()).map_err(|e| e.at(token.position()))
                })
                .transpose()?;
            let shape = classify_octets(size, octets.id().map(Token::text))
                .map_err(|e| e.at(octets.keyword().position()))?;
            member.octets(shape);
        }
        TypeSpecNode::ScopedName(name) => {
            member.ty(Type::Dynamic(name.text().to_string()));
        }
    }
    Ok(())
}

fn int_literal(token: Option<&Token>) -> Result<i32, AstError> {
    match token {
        Some(token) => parse_int_literal(Some(token.text())).map_err(|e| e.at(token.position())),
        None => parse_int_literal(None),
    }
}

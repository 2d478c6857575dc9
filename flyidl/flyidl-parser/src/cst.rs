//! Concrete syntax tree handed from the recognizer to the AST stage.
//!
//! Each node only exposes the narrow accessors of its grammar production
//! (its identifier token, its optional literal, its children). Terminals keep
//! their exact source text and position.

use flyidl_ast::{Position, PrimitiveKind};

/// A terminal: source text plus where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    position: Position,
}

impl Token {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// `specification := scope+`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationNode {
    scopes: Vec<ScopeNode>,
}

impl SpecificationNode {
    pub fn new(scopes: Vec<ScopeNode>) -> Self {
        Self { scopes }
    }

    pub fn scopes(&self) -> &[ScopeNode] {
        &self.scopes
    }
}

/// `scope ID { scope_member* }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeNode {
    id: Token,
    members: Vec<ScopeMemberNode>,
}

impl ScopeNode {
    pub fn new(id: Token, members: Vec<ScopeMemberNode>) -> Self {
        Self { id, members }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn members(&self) -> &[ScopeMemberNode] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeMemberNode {
    Scope(ScopeNode),
    Type(TypeDeclNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDeclNode {
    Enum(EnumTypeNode),
    Struct(StructTypeNode),
    Union(UnionTypeNode),
}

/// `enum ID { enum_value, ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTypeNode {
    id: Token,
    values: Vec<EnumValueNode>,
}

impl EnumTypeNode {
    pub fn new(id: Token, values: Vec<EnumValueNode>) -> Self {
        Self { id, values }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn values(&self) -> &[EnumValueNode] {
        &self.values
    }
}

/// `ID (= int_literal)?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueNode {
    id: Token,
    int_literal: Option<Token>,
}

impl EnumValueNode {
    pub fn new(id: Token, int_literal: Option<Token>) -> Self {
        Self { id, int_literal }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn int_literal(&self) -> Option<&Token> {
        self.int_literal.as_ref()
    }
}

/// `struct ID ([int_literal])? (extends scoped_name)? { member* }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTypeNode {
    id: Token,
    int_literal: Option<Token>,
    scoped_name: Option<Token>,
    members: Vec<MemberNode>,
}

impl StructTypeNode {
    pub fn new(
        id: Token,
        int_literal: Option<Token>,
        scoped_name: Option<Token>,
        members: Vec<MemberNode>,
    ) -> Self {
        Self {
            id,
            int_literal,
            scoped_name,
            members,
        }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn int_literal(&self) -> Option<&Token> {
        self.int_literal.as_ref()
    }

    pub fn scoped_name(&self) -> Option<&Token> {
        self.scoped_name.as_ref()
    }

    pub fn members(&self) -> &[MemberNode] {
        &self.members
    }
}

/// `union ID (switch (ID))? { case_member* }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionTypeNode {
    id: Token,
    switch_type: Option<Token>,
    cases: Vec<CaseMemberNode>,
}

impl UnionTypeNode {
    pub fn new(id: Token, switch_type: Option<Token>, cases: Vec<CaseMemberNode>) -> Self {
        Self {
            id,
            switch_type,
            cases,
        }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }

    pub fn switch_type(&self) -> Option<&Token> {
        self.switch_type.as_ref()
    }

    pub fn cases(&self) -> &[CaseMemberNode] {
        &self.cases
    }
}

/// `case int_literal : member*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMemberNode {
    int_literal: Token,
    members: Vec<MemberNode>,
}

impl CaseMemberNode {
    pub fn new(int_literal: Token, members: Vec<MemberNode>) -> Self {
        Self {
            int_literal,
            members,
        }
    }

    pub fn int_literal(&self) -> &Token {
        &self.int_literal
    }

    pub fn members(&self) -> &[MemberNode] {
        &self.members
    }
}

/// `type_spec declarator ;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNode {
    type_spec: TypeSpecNode,
    declarator: DeclaratorNode,
}

impl MemberNode {
    pub fn new(type_spec: TypeSpecNode, declarator: DeclaratorNode) -> Self {
        Self {
            type_spec,
            declarator,
        }
    }

    pub fn type_spec(&self) -> &TypeSpecNode {
        &self.type_spec
    }

    pub fn declarator(&self) -> &DeclaratorNode {
        &self.declarator
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaratorNode {
    id: Token,
}

impl DeclaratorNode {
    pub fn new(id: Token) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Token {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpecNode {
    Primitive(PrimitiveTypeNode),
    Octets(OctetsTypeNode),
    ScopedName(Token),
}

/// A built-in type keyword such as `uint16` or `string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveTypeNode {
    kind: PrimitiveKind,
    keyword: Token,
}

impl PrimitiveTypeNode {
    pub fn new(kind: PrimitiveKind, keyword: Token) -> Self {
        Self { kind, keyword }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }
}

/// `octets [ positive_int_const | ID ]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetsTypeNode {
    keyword: Token,
    positive_int_const: Option<Token>,
    id: Option<Token>,
}

impl OctetsTypeNode {
    pub fn new(keyword: Token, positive_int_const: Option<Token>, id: Option<Token>) -> Self {
        Self {
            keyword,
            positive_int_const,
            id,
        }
    }

    pub fn keyword(&self) -> &Token {
        &self.keyword
    }

    pub fn positive_int_const(&self) -> Option<&Token> {
        self.positive_int_const.as_ref()
    }

    pub fn id(&self) -> Option<&Token> {
        self.id.as_ref()
    }
}

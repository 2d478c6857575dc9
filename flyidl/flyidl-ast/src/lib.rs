//! Abstract syntax tree for flyweight IDL schemas.
//!
//! Key components:
//! - [`types`]: member type system, unsigned widening and literal parsing
//! - [`ast`]: immutable nodes (`Specification` down to `Member`)
//! - [`builder`]: accumulating builders that freeze into those nodes
//!
//! Named references (struct supertypes, dynamic member types, octets size fields)
//! are stored verbatim and left for a later resolution pass.

pub mod ast;
pub mod builder;
mod error;
mod position;
pub mod types;

pub use ast::{Case, Declaration, Enum, Member, Scope, Specification, Struct, Union, Value};
pub use builder::{
    CaseBuilder, EnumBuilder, MemberBuilder, ScopeBuilder, SpecificationBuilder, StructBuilder,
    UnionBuilder, ValueBuilder,
};
pub use error::AstError;
pub use position::Position;
pub use types::{
    HEX_PREFIX, OctetsShape, PrimitiveKind, Type, classify_octets, classify_primitive,
    parse_int_literal, parse_positive_literal,
};

//! Recognizer and AST-construction stage for flyweight IDL schemas.
//!
//! # Pipeline
//!
//! ```text
//! schema text
//!   └─ parse_specification  – nom recognizer → cst::SpecificationNode
//!       └─ AstBuilder::build – tree walk → flyidl_ast::Specification
//! ```
//!
//! The AST stage only reads the parse tree through the per-production
//! accessors in [`cst`], so any recognizer producing that tree can feed it.

mod ast_builder;
pub mod cst;
mod error;
mod grammar;
mod lex;

pub use ast_builder::AstBuilder;
pub use error::SyntaxError;
pub use grammar::parse_specification;

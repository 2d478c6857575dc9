//! Error types for the compiler facade.

use flyidl_ast::{AstError, Position};
use flyidl_parser::SyntaxError;

/// Errors produced by [`Compiler`](crate::Compiler).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The schema text does not match the grammar.
    #[error("failed to parse schema '{source_name}': {source}")]
    Syntax {
        source_name: String,
        #[source]
        source: SyntaxError,
    },

    /// The parse tree could not be turned into an AST (e.g. a malformed literal).
    #[error("failed to build schema '{source_name}': {source}")]
    Ast {
        source_name: String,
        #[source]
        source: AstError,
    },
}

impl CompileError {
    pub fn source_name(&self) -> &str {
        match self {
            Self::Syntax { source_name, .. } | Self::Ast { source_name, .. } => source_name,
        }
    }

    /// Location of the offending token, when known.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { source, .. } => Some(source.position),
            Self::Ast { source, .. } => source.position(),
        }
    }
}

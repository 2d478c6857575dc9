use flyidl_ast::Position;

/// The schema text does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at {position}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub position: Position,
    pub expected: String,
    pub found: String,
}

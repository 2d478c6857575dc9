//! Error type for the AST-construction stage.

use crate::Position;

/// Failure raised while turning a parse tree into an AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    /// An integer literal (struct type id, case discriminant, octets size) is
    /// not valid for its base or does not fit its range.
    #[error("malformed integer literal `{literal}`{}: {reason}", located(.position))]
    MalformedLiteral {
        literal: String,
        position: Option<Position>,
        reason: String,
    },

    /// A builder was finalized before a mandatory field was supplied.
    ///
    /// This points at a bug in the tree walk, not at the schema.
    #[error("builder contract violated: {node} finalized without `{field}`")]
    ContractViolation {
        node: &'static str,
        field: &'static str,
    },

    /// An octets type carried both a fixed size and a size field, or neither.
    #[error("ambiguous octets size{}: {detail}", located(.position))]
    AmbiguousOctets {
        detail: String,
        position: Option<Position>,
    },
}

impl AstError {
    pub(crate) fn malformed(literal: &str, reason: impl Into<String>) -> Self {
        Self::MalformedLiteral {
            literal: literal.to_string(),
            position: None,
            reason: reason.into(),
        }
    }

    /// Attach a source position to a positional error, keeping any position
    /// it already carries.
    pub fn at(self, at: Position) -> Self {
        match self {
            Self::MalformedLiteral {
                literal,
                position,
                reason,
            } => Self::MalformedLiteral {
                literal,
                position: position.or(Some(at)),
                reason,
            },
            Self::AmbiguousOctets { detail, position } => Self::AmbiguousOctets {
                detail,
                position: position.or(Some(at)),
            },
            other => other,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Self::MalformedLiteral { position, .. } | Self::AmbiguousOctets { position, .. } => {
                *position
            }
            Self::ContractViolation { .. } => None,
        }
    }
}

fn located(position: &Option<Position>) -> String {
    position.map(|p| format!(" at {p}")).unwrap_or_default()
}

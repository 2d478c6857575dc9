//! Member type system and literal classification.
//!
//! Unsigned kinds are kept nominally (`uint8` stays `uint8`) but also expose a
//! wider signed representation that code generators use for arithmetic:
//!
//! | nominal  | widened  |
//! |----------|----------|
//! | `uint8`  | `int32`  |
//! | `uint16` | `int32`  |
//! | `uint32` | `int64`  |
//! | `uint64` | none     |

use std::fmt;

use crate::AstError;

/// Prefix selecting base 16 for integer literals.
pub const HEX_PREFIX: &str = "0x";

/// Built-in type productions of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    String,
    Octets,
    List,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 11] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::String,
        Self::Octets,
        Self::List,
    ];

    /// The production spelled `keyword`, if any.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Keyword spelling of the production in schema text.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::String => "string",
            Self::Octets => "octets",
            Self::List => "list",
        }
    }
}

/// The type of a struct or case member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    String,
    Octets,
    List,
    /// Reference to a user-defined type, exactly as written (e.g. `outer::Inner`).
    Dynamic(String),
}

impl Type {
    /// Signed representation wide enough to hold every value of an unsigned kind.
    ///
    /// `None` for signed kinds, non-numeric kinds and `uint64`.
    pub fn widened(&self) -> Option<Type> {
        match self {
            Self::Uint8 | Self::Uint16 => Some(Self::Int32),
            Self::Uint32 => Some(Self::Int64),
            _ => None,
        }
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Referenced type name for [`Type::Dynamic`].
    pub fn dynamic_name(&self) -> Option<&str> {
        match self {
            Self::Dynamic(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::String => "string",
            Self::Octets => "octets",
            Self::List => "list",
            Self::Dynamic(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

/// Map a built-in type production onto its member [`Type`].
pub fn classify_primitive(kind: PrimitiveKind) -> Type {
    match kind {
        PrimitiveKind::Int8 => Type::Int8,
        PrimitiveKind::Int16 => Type::Int16,
        PrimitiveKind::Int32 => Type::Int32,
        PrimitiveKind::Int64 => Type::Int64,
        PrimitiveKind::Uint8 => Type::Uint8,
        PrimitiveKind::Uint16 => Type::Uint16,
        PrimitiveKind::Uint32 => Type::Uint32,
        PrimitiveKind::Uint64 => Type::Uint64,
        PrimitiveKind::String => Type::String,
        PrimitiveKind::Octets => Type::Octets,
        PrimitiveKind::List => Type::List,
    }
}

/// Parse a signed 32-bit integer literal.
///
/// Absent text yields `0`. Text starting with [`HEX_PREFIX`] is read as base 16
/// (no sign allowed after the prefix); anything else as base 10 with an
/// optional sign.
pub fn parse_int_literal(text: Option<&str>) -> Result<i32, AstError> {
    let Some(text) = text else {
        return Ok(0);
    };

    let (digits, radix) = match text.strip_prefix(HEX_PREFIX) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    if radix == 16 && digits.starts_with(['+', '-']) {
        return Err(AstError::malformed(text, "sign after hex prefix"));
    }

    i32::from_str_radix(digits, radix).map_err(|e| AstError::malformed(text, e.to_string()))
}

/// Parse the decimal, strictly positive size of a fixed-length octets type.
///
/// Only ASCII digits are accepted; a leading sign is rejected.
pub fn parse_positive_literal(text: &str) -> Result<u32, AstError> {
    if text.starts_with(['+', '-']) {
        return Err(AstError::malformed(text, "sign not allowed in size"));
    }
    match text.parse::<u32>() {
        Ok(0) => Err(AstError::malformed(text, "size must be positive")),
        Ok(size) => Ok(size),
        Err(e) => Err(AstError::malformed(text, e.to_string())),
    }
}

/// How the length of an octets member is determined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OctetsShape {
    /// Fixed number of bytes.
    Fixed(u32),
    /// Length supplied at runtime by the named sibling member.
    Sized(String),
}

impl OctetsShape {
    pub fn size(&self) -> Option<u32> {
        match self {
            Self::Fixed(size) => Some(*size),
            Self::Sized(_) => None,
        }
    }

    pub fn size_name(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Sized(name) => Some(name),
        }
    }
}

/// Combine the two optional size forms of an octets type.
///
/// Exactly one must be present.
pub fn classify_octets(
    size: Option<u32>,
    size_name: Option<&str>,
) -> Result<OctetsShape, AstError> {
    match (size, size_name) {
        (Some(size), None) => Ok(OctetsShape::Fixed(size)),
        (None, Some(name)) => Ok(OctetsShape::Sized(name.to_string())),
        (Some(size), Some(name)) => Err(AstError::AmbiguousOctets {
            detail: format!("both fixed size {size} and size field `{name}` given"),
            position: None,
        }),
        (None, None) => Err(AstError::AmbiguousOctets {
            detail: "neither fixed size nor size field given".to_string(),
            position: None,
        }),
    }
}

//! Token-level recognizers shared by the grammar productions.

use flyidl_ast::Position;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace1},
    combinator::{opt, recognize, value, verify},
    error::{ErrorKind, ParseError, VerboseError},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

pub type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Words that can never be identifiers.
pub const RESERVED: &[&str] = &[
    "scope", "enum", "struct", "union", "case", "switch", "extends", "octets", "list", "string",
    "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32", "uint64",
];

/// Skip whitespace, `//` line comments and `/* */` block comments.
pub fn ws(input: &str) -> Res<'_, ()> {
    value((), many0(alt((multispace1, line_comment, block_comment))))(input)
}

fn line_comment(input: &str) -> Res<'_, &str> {
    recognize(pair(tag("//"), take_while(|c: char| c != '\n')))(input)
}

fn block_comment(input: &str) -> Res<'_, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

/// Identifier shape (alphanumeric + underscore, starting with alpha or `_`),
/// reserved or not.
pub fn word(input: &str) -> Res<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

pub fn identifier(input: &str) -> Res<'_, &str> {
    verify(word, |w: &str| !RESERVED.iter().any(|r| *r == w))(input)
}

/// `ID (("::" | ".") ID)*`, recognized as one token.
pub fn scoped_name(input: &str) -> Res<'_, &str> {
    recognize(pair(
        identifier,
        many0(pair(alt((tag("::"), tag("."))), identifier)),
    ))(input)
}

/// An integer literal as far as the recognizer is concerned: optional `-`,
/// a leading digit, then any run of alphanumerics. Digit validity is checked
/// by the AST stage so bad literals are reported with their full text.
pub fn int_literal(input: &str) -> Res<'_, &str> {
    recognize(tuple((
        opt(char('-')),
        digit1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    )))(input)
}

pub fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> Res<'a, &'a str> {
    move |input| preceded(ws, terminated(tag(kw), keyword_boundary))(input)
}

pub fn symbol<'a>(sym: &'static str) -> impl FnMut(&'a str) -> Res<'a, &'a str> {
    move |input| preceded(ws, tag(sym))(input)
}

pub fn keyword_boundary(input: &str) -> Res<'_, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets of line starts, for turning offsets into [`Position`]s.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub fn position(&self, source: &str, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];
        let column = source
            .get(start..offset)
            .map_or(1, |prefix| prefix.chars().count() + 1);
        Position::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_skips_comments() {
        let (rest, ()) = ws("  // note\n /* block\n */ struct").expect("ws should succeed");
        assert_eq!(rest, "struct");
    }

    #[test]
    fn identifier_rejects_reserved_words() {
        assert!(identifier("struct").is_err());
        assert_eq!(identifier("structure rest"), Ok((" rest", "structure")));
    }

    #[test]
    fn scoped_name_accepts_both_separators() {
        assert_eq!(scoped_name("a::b.C x"), Ok((" x", "a::b.C")));
    }

    #[test]
    fn int_literal_takes_whole_alphanumeric_run() {
        assert_eq!(int_literal("0xZZ]"), Ok(("]", "0xZZ")));
        assert_eq!(int_literal("-12:"), Ok((":", "-12")));
        assert!(int_literal("x12").is_err());
    }

    #[test]
    fn line_index_maps_offsets() {
        let src = "ab\ncde\n\nf";
        let index = LineIndex::new(src);
        assert_eq!(index.position(src, 0), Position::new(1, 1));
        assert_eq!(index.position(src, 4), Position::new(2, 2));
        assert_eq!(index.position(src, 8), Position::new(4, 1));
    }
}

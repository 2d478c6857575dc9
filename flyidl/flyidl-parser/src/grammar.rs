//! nom recognizer producing the [`crate::cst`] parse tree.
//!
//! The grammar commits (`cut`) right after each declaration keyword so a
//! broken declaration is reported where it breaks rather than as a generic
//! failure of the enclosing scope.

use flyidl_ast::PrimitiveKind;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{cut, eof, map, map_opt, opt},
    error::{VerboseError, VerboseErrorKind, context},
    multi::{many0, many1, separated_list1},
    sequence::{preceded, terminated},
};

use crate::{
    cst::{
        CaseMemberNode, DeclaratorNode, EnumTypeNode, EnumValueNode, MemberNode, OctetsTypeNode,
        PrimitiveTypeNode, ScopeMemberNode, ScopeNode, SpecificationNode, StructTypeNode, Token,
        TypeDeclNode, TypeSpecNode, UnionTypeNode,
    },
    error::SyntaxError,
    lex::{
        LineIndex, Res, identifier, int_literal, keyword, keyword_boundary, scoped_name, symbol,
        word, ws,
    },
};

/// Recognize schema text into its parse tree.
pub fn parse_specification(source: &str) -> Result<SpecificationNode, SyntaxError> {
    let grammar = Grammar::new(source);
    match grammar.specification(source) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(grammar.syntax_error(e)),
        Err(nom::Err::Incomplete(_)) => Err(grammar.error_at("", "more input".to_string())),
    }
}

struct Grammar<'a> {
    source: &'a str,
    lines: LineIndex,
}

impl<'a> Grammar<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
        }
    }

    /// Build a token for `text`, which starts at the beginning of `start`.
    fn token(&self, start: &'a str, text: &'a str) -> Token {
        let offset = self.source.len() - start.len();
        Token::new(text, self.lines.position(self.source, offset))
    }

    fn lexeme(
        &self,
        input: &'a str,
        mut parser: impl FnMut(&'a str) -> Res<'a, &'a str>,
    ) -> Res<'a, Token> {
        let (input, ()) = ws(input)?;
        let (rest, text) = parser(input)?;
        Ok((rest, self.token(input, text)))
    }

    fn ident(&self, input: &'a str) -> Res<'a, Token> {
        self.lexeme(input, identifier)
    }

    fn literal(&self, input: &'a str) -> Res<'a, Token> {
        self.lexeme(input, int_literal)
    }

    fn scoped(&self, input: &'a str) -> Res<'a, Token> {
        self.lexeme(input, scoped_name)
    }

    fn specification(&self, input: &'a str) -> Res<'a, SpecificationNode> {
        let (input, scopes) = context("scope", many1(|i| self.scope(i)))(input)?;
        let (input, _) = context("scope or end of input", preceded(ws, eof))(input)?;
        Ok((input, SpecificationNode::new(scopes)))
    }

    fn scope(&self, input: &'a str) -> Res<'a, ScopeNode> {
        let (input, _) = keyword("scope")(input)?;
        cut(|i| self.scope_body(i))(input)
    }

    fn scope_body(&self, input: &'a str) -> Res<'a, ScopeNode> {
        let (input, id) = context("scope name", |i| self.ident(i))(input)?;
        let (input, _) = context("`{`", symbol("{"))(input)?;
        let (input, members) = many0(|i| self.scope_member(i))(input)?;
        let (input, _) = context("declaration or `}`", symbol("}"))(input)?;
        Ok((input, ScopeNode::new(id, members)))
    }

    fn scope_member(&self, input: &'a str) -> Res<'a, ScopeMemberNode> {
        alt((
            map(|i| self.scope(i), ScopeMemberNode::Scope),
            map(|i| self.type_decl(i), ScopeMemberNode::Type),
        ))(input)
    }

    fn type_decl(&self, input: &'a str) -> Res<'a, TypeDeclNode> {
        let (input, decl) = alt((
            map(|i| self.enum_type(i), TypeDeclNode::Enum),
            map(|i| self.struct_type(i), TypeDeclNode::Struct),
            map(|i| self.union_type(i), TypeDeclNode::Union),
        ))(input)?;
        let (input, _) = opt(symbol(";"))(input)?;
        Ok((input, decl))
    }

    fn enum_type(&self, input: &'a str) -> Res<'a, EnumTypeNode> {
        let (input, _) = keyword("enum")(input)?;
        cut(|i| self.enum_body(i))(input)
    }

    fn enum_body(&self, input: &'a str) -> Res<'a, EnumTypeNode> {
        let (input, id) = context("enum name", |i| self.ident(i))(input)?;
        let (input, _) = context("`{`", symbol("{"))(input)?;
        let (input, values) = context(
            "enum value",
            separated_list1(symbol(","), |i| self.enum_value(i)),
        )(input)?;
        let (input, _) = opt(symbol(","))(input)?;
        let (input, _) = context("`,` or `}`", symbol("}"))(input)?;
        Ok((input, EnumTypeNode::new(id, values)))
    }

    fn enum_value(&self, input: &'a str) -> Res<'a, EnumValueNode> {
        let (input, id) = self.ident(input)?;
        let (input, literal) = opt(preceded(
            symbol("="),
            cut(context("integer literal", |i| self.literal(i))),
        ))(input)?;
        Ok((input, EnumValueNode::new(id, literal)))
    }

    fn struct_type(&self, input: &'a str) -> Res<'a, StructTypeNode> {
        let (input, _) = keyword("struct")(input)?;
        cut(|i| self.struct_body(i))(input)
    }

    fn struct_body(&self, input: &'a str) -> Res<'a, StructTypeNode> {
        let (input, id) = context("struct name", |i| self.ident(i))(input)?;
        let (input, type_id) = opt(preceded(
            symbol("["),
            cut(terminated(
                context("type id", |i| self.literal(i)),
                context("`]`", symbol("]")),
            )),
        ))(input)?;
        let (input, supertype) = opt(preceded(
            keyword("extends"),
            cut(context("supertype name", |i| self.scoped(i))),
        ))(input)?;
        let (input, _) = context("`{`", symbol("{"))(input)?;
        let (input, members) = many0(|i| self.member(i))(input)?;
        let (input, _) = context("member or `}`", symbol("}"))(input)?;
        Ok((input, StructTypeNode::new(id, type_id, supertype, members)))
    }

    fn union_type(&self, input: &'a str) -> Res<'a, UnionTypeNode> {
        let (input, _) = keyword("union")(input)?;
        cut(|i| self.union_body(i))(input)
    }

    fn union_body(&self, input: &'a str) -> Res<'a, UnionTypeNode> {
        let (input, id) = context("union name", |i| self.ident(i))(input)?;
        let (input, switch_type) = opt(preceded(
            keyword("switch"),
            cut(terminated(
                preceded(
                    context("`(`", symbol("(")),
                    context("discriminant type", |i| self.lexeme(i, word)),
                ),
                context("`)`", symbol(")")),
            )),
        ))(input)?;
        let (input, _) = context("`{`", symbol("{"))(input)?;
        let (input, cases) = many0(|i| self.case_member(i))(input)?;
        let (input, _) = context("case or `}`", symbol("}"))(input)?;
        Ok((input, UnionTypeNode::new(id, switch_type, cases)))
    }

    fn case_member(&self, input: &'a str) -> Res<'a, CaseMemberNode> {
        let (input, _) = keyword("case")(input)?;
        cut(|i| self.case_body(i))(input)
    }

    fn case_body(&self, input: &'a str) -> Res<'a, CaseMemberNode> {
        let (input, literal) = context("case discriminant", |i| self.literal(i))(input)?;
        let (input, _) = context("`:`", symbol(":"))(input)?;
        let (input, members) = many0(|i| self.member(i))(input)?;
        Ok((input, CaseMemberNode::new(literal, members)))
    }

    fn member(&self, input: &'a str) -> Res<'a, MemberNode> {
        let (input, type_spec) = self.type_spec(input)?;
        let (input, declarator) = cut(context("member name", |i| self.ident(i)))(input)?;
        let (input, _) = cut(context("`;`", symbol(";")))(input)?;
        Ok((
            input,
            MemberNode::new(type_spec, DeclaratorNode::new(declarator)),
        ))
    }

    fn type_spec(&self, input: &'a str) -> Res<'a, TypeSpecNode> {
        alt((
            map(|i| self.primitive_type(i), TypeSpecNode::Primitive),
            map(|i| self.octets_type(i), TypeSpecNode::Octets),
            map(|i| self.scoped(i), TypeSpecNode::ScopedName),
        ))(input)
    }

    fn primitive_type(&self, input: &'a str) -> Res<'a, PrimitiveTypeNode> {
        let (input, ()) = ws(input)?;
        // `octets` has its own production with a mandatory size.
        let (rest, kind) = map_opt(word, |w| {
            PrimitiveKind::from_keyword(w).filter(|kind| *kind != PrimitiveKind::Octets)
        })(input)?;
        let text = &input[..input.len() - rest.len()];
        Ok((rest, PrimitiveTypeNode::new(kind, self.token(input, text))))
    }

    fn octets_type(&self, input: &'a str) -> Res<'a, OctetsTypeNode> {
        let (input, octets) =
            self.lexeme(input, |i| terminated(tag("octets"), keyword_boundary)(i))?;
        let (input, _) = cut(context("`[`", symbol("[")))(input)?;
        let (input, (size, size_name)) = cut(context(
            "octets size or size field",
            alt((
                map(|i| self.literal(i), |t| (Some(t), None)),
                map(|i| self.ident(i), |t| (None, Some(t))),
            )),
        ))(input)?;
        let (input, _) = cut(context("`]`", symbol("]")))(input)?;
        Ok((input, OctetsTypeNode::new(octets, size, size_name)))
    }

    fn syntax_error(&self, error: VerboseError<&'a str>) -> SyntaxError {
        let at = error.errors.first().map_or("", |(input, _)| *input);
        let expected = error
            .errors
            .iter()
            .find_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(label) => Some((*label).to_string()),
                _ => None,
            })
            .or_else(|| {
                error.errors.first().map(|(_, kind)| match kind {
                    VerboseErrorKind::Char(c) => format!("`{c}`"),
                    VerboseErrorKind::Nom(kind) => kind.description().to_string(),
                    VerboseErrorKind::Context(label) => (*label).to_string(),
                })
            })
            .unwrap_or_else(|| "valid schema".to_string());
        self.error_at(at, expected)
    }

    fn error_at(&self, at: &'a str, expected: String) -> SyntaxError {
        let at = ws(at).map_or(at, |(rest, ())| rest);
        let offset = self.source.len() - at.len();
        let found = match at.split_whitespace().next() {
            Some(word) => format!("`{}`", word.chars().take(16).collect::<String>()),
            None => "end of input".to_string(),
        };
        SyntaxError {
            position: self.lines.position(self.source, offset),
            expected,
            found,
        }
    }
}

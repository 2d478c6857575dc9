use std::fmt::{Error, Result, Write as _};

use flyidl_ast::{Case, Enum, Member, Scope, Specification, Struct, Union};

const INDENT: usize = 4;

/// Render a specification as indented text.
///
/// Within a scope, enums come first, then structs, unions and nested scopes,
/// each in declaration order. Unsigned members show their widened type.
pub fn format_specification(spec: &Specification) -> std::result::Result<String, Error> {
    let mut out = String::new();
    for scope in spec.scopes() {
        format_scope(scope, 0, &mut out)?;
    }
    Ok(out)
}

fn format_scope(scope: &Scope, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}scope {} (depth {})", scope.name(), scope.depth())?;

    let inner = indent + INDENT;
    for e in scope.enums() {
        format_enum(e, inner, out)?;
    }
    for s in scope.structs() {
        format_struct(s, inner, out)?;
    }
    for u in scope.unions() {
        format_union(u, inner, out)?;
    }
    for child in scope.scopes() {
        format_scope(child, inner, out)?;
    }
    Ok(())
}

fn format_enum(e: &Enum, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}enum {}", e.name())?;
    for value in e.values() {
        writeln!(out, "{pad}    {} = {}", value.name(), value.ordinal())?;
    }
    Ok(())
}

fn format_struct(s: &Struct, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    write!(out, "{pad}struct {} [", s.name())?;
    // Hex literals are unsigned, so negative ids stay decimal.
    if s.type_id() < 0 {
        write!(out, "{}]", s.type_id())?;
    } else {
        write!(out, "{:#x}]", s.type_id())?;
    }
    if let Some(supertype) = s.supertype() {
        write!(out, " extends {supertype}")?;
    }
    writeln!(out)?;
    for member in s.members() {
        format_member(member, indent + INDENT, out)?;
    }
    Ok(())
}

fn format_union(u: &Union, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}union {}", u.name())?;
    for case in u.cases() {
        format_case(case, indent + INDENT, out)?;
    }
    Ok(())
}

fn format_case(case: &Case, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}case {}:", case.value())?;
    for member in case.members() {
        format_member(member, indent + INDENT, out)?;
    }
    Ok(())
}

fn format_member(member: &Member, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    write!(out, "{pad}{}: {}", member.name(), member.ty())?;
    if let Some(size) = member.size() {
        write!(out, "[{size}]")?;
    } else if let Some(size_name) = member.size_name() {
        write!(out, "[{size_name}]")?;
    }
    if let Some(widened) = member.unsigned_type() {
        write!(out, " (as {widened})")?;
    }
    writeln!(out)
}

use flyidl_ast::{AstError, Declaration, OctetsShape, Position, PrimitiveKind, Type};
use flyidl_parser::{
    AstBuilder,
    cst::{
        DeclaratorNode, MemberNode, OctetsTypeNode, PrimitiveTypeNode, ScopeMemberNode, ScopeNode,
        SpecificationNode, StructTypeNode, Token, TypeDeclNode, TypeSpecNode,
    },
    parse_specification,
};

fn build(schema: &str) -> Result<flyidl_ast::Specification, AstError> {
    let tree = parse_specification(schema).expect("schema should parse");
    AstBuilder::new().build(&tree)
}

fn token(text: &str) -> Token {
    Token::new(text, Position::new(1, 1))
}

#[test]
fn single_struct_round_trip_shape() {
    let spec = build("scope s { struct S [0x10] { int32 field1; } }").expect("build should succeed");

    let s = &spec.scopes()[0].structs()[0];
    assert_eq!(s.type_id(), 16);
    assert_eq!(s.supertype(), None);
    assert_eq!(s.members().len(), 1);
    assert_eq!(s.members()[0].name(), "field1");
    assert_eq!(s.members()[0].ty(), &Type::Int32);
    assert_eq!(s.members()[0].octets(), None);
}

#[test]
fn struct_type_id_defaults_to_zero_and_accepts_decimal() {
    let spec = build("scope s { struct A {} struct B [42] {} }").expect("build should succeed");
    let ids: Vec<_> = spec.scopes()[0]
        .structs()
        .iter()
        .map(|s| s.type_id())
        .collect();
    assert_eq!(ids, vec![0, 42]);
}

#[test]
fn supertype_is_stored_verbatim() {
    let spec = build("scope s { struct Derived extends outer::Base {} }")
        .expect("build should succeed");
    assert_eq!(
        spec.scopes()[0].structs()[0].supertype(),
        Some("outer::Base")
    );
}

#[test]
fn enum_ordinals_follow_declaration_order() {
    let spec = build("scope s { enum Color { RED = 7, GREEN = 3, BLUE } }")
        .expect("build should succeed");
    let color = &spec.scopes()[0].enums()[0];
    assert_eq!(color.name(), "Color");
    for (i, value) in color.values().iter().enumerate() {
        assert_eq!(value.ordinal(), i, "{}", value.name());
    }
    assert_eq!(color.values()[2].name(), "BLUE");
}

#[test]
fn case_discriminants_keep_declared_values() {
    let spec = build(
        "scope s { union U { case 5: int8 a; case 2: int16 b; case 9: int32 c; case 0x10: int64 d; } }",
    )
    .expect("build should succeed");
    let values: Vec<_> = spec.scopes()[0].unions()[0]
        .cases()
        .iter()
        .map(|c| c.value())
        .collect();
    assert_eq!(values, vec![5, 2, 9, 16]);
}

#[test]
fn negative_case_discriminant() {
    let spec = build("scope s { union U { case -1: string s; } }").expect("build should succeed");
    assert_eq!(spec.scopes()[0].unions()[0].cases()[0].value(), -1);
}

#[test]
fn scope_depth_tracks_nesting() {
    let spec = build("scope a { scope b { scope c {} } scope d {} } scope e {}")
        .expect("build should succeed");
    let a = &spec.scopes()[0];
    assert_eq!(a.depth(), 0);
    let b = &a.scopes()[0];
    assert_eq!(b.depth(), a.depth() + 1);
    assert_eq!(b.scopes()[0].depth(), 2);
    assert_eq!(a.scopes()[1].name(), "d");
    assert_eq!(a.scopes()[1].depth(), 1);
    assert_eq!(spec.scopes()[1].depth(), 0);
}

#[test]
fn declarations_attach_to_their_own_scope() {
    let spec = build(
        "scope a { struct Outer {} scope b { enum E { X } union U { case 1: int8 x; } } struct Later {} }",
    )
    .expect("build should succeed");
    let a = &spec.scopes()[0];
    let names: Vec<_> = a.structs().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Outer", "Later"]);
    assert!(a.enums().is_empty());
    assert!(a.unions().is_empty());

    let b = &a.scopes()[0];
    assert_eq!(b.enums()[0].name(), "E");
    assert_eq!(b.unions()[0].name(), "U");
    assert!(b.structs().is_empty());
}

#[test]
fn members_route_to_struct_or_case() {
    let spec = build(
        r#"
scope s {
    struct Holder [1] {
        int32 first;
        uint8 second;
    }
    union Choice {
        case 1: string text; int64 extra;
        case 2: octets[8] raw;
    }
    struct After { int16 last; }
}
"#,
    )
    .expect("build should succeed");
    let scope = &spec.scopes()[0];

    let holder: Vec<_> = scope.structs()[0]
        .members()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(holder, vec!["first", "second"]);

    let cases = scope.unions()[0].cases();
    let first: Vec<_> = cases[0].members().iter().map(|m| m.name()).collect();
    assert_eq!(first, vec!["text", "extra"]);
    assert_eq!(cases[1].members()[0].size(), Some(8));

    let after: Vec<_> = scope.structs()[1]
        .members()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(after, vec!["last"]);
}

#[test]
fn member_types_are_classified() {
    let spec = build(
        r#"
scope s {
    struct All {
        int8 a; int16 b; int32 c; int64 d;
        uint8 e; uint16 f; uint32 g; uint64 h;
        string i; list j;
        octets[16] k;
        uint32 length;
        octets[length] l;
        outer.Inner m;
        Local n;
    }
}
"#,
    )
    .expect("build should succeed");
    let members = spec.scopes()[0].structs()[0].members();
    let types: Vec<_> = members.iter().map(|m| m.ty().clone()).collect();
    assert_eq!(
        types,
        vec![
            Type::Int8,
            Type::Int16,
            Type::Int32,
            Type::Int64,
            Type::Uint8,
            Type::Uint16,
            Type::Uint32,
            Type::Uint64,
            Type::String,
            Type::List,
            Type::Octets,
            Type::Uint32,
            Type::Octets,
            Type::Dynamic("outer.Inner".into()),
            Type::Dynamic("Local".into()),
        ]
    );

    assert_eq!(members[4].unsigned_type(), Some(Type::Int32));
    assert_eq!(members[5].unsigned_type(), Some(Type::Int32));
    assert_eq!(members[6].unsigned_type(), Some(Type::Int64));
    assert_eq!(members[7].unsigned_type(), None);

    assert_eq!(members[10].octets(), Some(&OctetsShape::Fixed(16)));
    assert_eq!(members[12].size(), None);
    assert_eq!(members[12].size_name(), Some("length"));
}

#[test]
fn malformed_type_id_reports_literal_and_position() {
    let err = build("scope s {\n  struct S [0xZZ] {}\n}").expect_err("0xZZ should be rejected");
    assert_eq!(
        err,
        AstError::MalformedLiteral {
            literal: "0xZZ".into(),
            position: Some(Position::new(2, 13)),
            reason: "invalid digit found in string".into(),
        }
    );
}

#[test]
fn overflowing_case_discriminant_is_malformed() {
    let err = build("scope s { union U { case 4294967296: int8 a; } }")
        .expect_err("discriminant out of range");
    assert!(matches!(err, AstError::MalformedLiteral { ref literal, .. } if literal == "4294967296"));
}

#[test]
fn zero_octets_size_is_malformed() {
    let err = build("scope s { struct S { octets[0] raw; } }").expect_err("zero size");
    assert!(matches!(err, AstError::MalformedLiteral { .. }));
    assert_eq!(err.position().map(|p| p.column), Some(29));
}

#[test]
fn octets_with_both_size_forms_is_rejected() {
    let member = MemberNode::new(
        TypeSpecNode::Octets(OctetsTypeNode::new(
            Token::new("octets", Position::new(4, 9)),
            Some(token("16")),
            Some(token("length")),
        )),
        DeclaratorNode::new(token("payload")),
    );
    let decl = TypeDeclNode::Struct(StructTypeNode::new(token("S"), None, None, vec![member]));

    let err = AstBuilder::new()
        .build_declaration(&decl)
        .expect_err("ambiguous octets should fail");
    assert!(matches!(err, AstError::AmbiguousOctets { .. }));
    assert_eq!(err.position(), Some(Position::new(4, 9)));
}

#[test]
fn bare_octets_keyword_without_size_is_rejected() {
    let member = MemberNode::new(
        TypeSpecNode::Primitive(PrimitiveTypeNode::new(
            PrimitiveKind::Octets,
            Token::new("octets", Position::new(2, 5)),
        )),
        DeclaratorNode::new(token("blob")),
    );
    let decl = TypeDeclNode::Struct(StructTypeNode::new(token("S"), None, None, vec![member]));

    let err = AstBuilder::new()
        .build_declaration(&decl)
        .expect_err("octets without a size should fail");
    assert!(matches!(err, AstError::AmbiguousOctets { .. }));
    assert_eq!(err.position(), Some(Position::new(2, 5)));
}

#[test]
fn plus_signed_octets_size_is_malformed() {
    let member = MemberNode::new(
        TypeSpecNode::Octets(OctetsTypeNode::new(
            token("octets"),
            Some(Token::new("+16", Position::new(3, 12))),
            None,
        )),
        DeclaratorNode::new(token("payload")),
    );
    let decl = TypeDeclNode::Struct(StructTypeNode::new(token("S"), None, None, vec![member]));

    let err = AstBuilder::new()
        .build_declaration(&decl)
        .expect_err("signed size should fail");
    assert!(matches!(
        &err,
        AstError::MalformedLiteral { literal, .. } if literal == "+16"
    ));
    assert_eq!(err.position(), Some(Position::new(3, 12)));
}

#[test]
fn standalone_declaration_after_failed_unit() {
    let bad = parse_specification("scope a { scope b { struct S [0xQ] {} } }")
        .expect("schema should parse");
    let decl = TypeDeclNode::Struct(StructTypeNode::new(token("Lone"), None, None, vec![]));

    let mut builder = AstBuilder::new();
    builder.build(&bad).expect_err("unit should fail");
    let lone = builder
        .build_declaration(&decl)
        .expect("declaration should build");
    assert!(matches!(lone, Declaration::Struct(_)));
    assert_eq!(lone.name(), "Lone");
    assert_eq!(builder.depth(), 0);
}

#[test]
fn standalone_declaration_is_returned_detached() {
    let member = MemberNode::new(
        TypeSpecNode::Primitive(PrimitiveTypeNode::new(PrimitiveKind::Uint16, token("uint16"))),
        DeclaratorNode::new(token("port")),
    );
    let decl = TypeDeclNode::Struct(StructTypeNode::new(
        token("Endpoint"),
        Some(token("0x2")),
        Some(token("net::Base")),
        vec![member],
    ));

    let mut builder = AstBuilder::new();
    let Declaration::Struct(endpoint) = builder
        .build_declaration(&decl)
        .expect("declaration should build")
    else {
        panic!("expected a struct");
    };
    assert_eq!(endpoint.type_id(), 2);
    assert_eq!(endpoint.supertype(), Some("net::Base"));
    assert_eq!(endpoint.members()[0].unsigned_type(), Some(Type::Int32));
    assert_eq!(builder.depth(), 0);
}

#[test]
fn builder_is_reusable_after_failure() {
    let bad = parse_specification("scope a { scope b { struct S [0xQ] {} } }")
        .expect("schema should parse");
    let good = SpecificationNode::new(vec![ScopeNode::new(
        token("fresh"),
        vec![ScopeMemberNode::Scope(ScopeNode::new(token("child"), vec![]))],
    )]);

    let mut builder = AstBuilder::new();
    builder.build(&bad).expect_err("first unit should fail");
    assert_eq!(builder.depth(), 0);

    let spec = builder.build(&good).expect("second unit should build");
    assert_eq!(spec.scopes()[0].depth(), 0);
    assert_eq!(spec.scopes()[0].scopes()[0].depth(), 1);
    assert_eq!(builder.depth(), 0);
}

#[test]
fn standalone_scope_starts_at_depth_zero() {
    let scope = ScopeNode::new(
        token("lonely"),
        vec![ScopeMemberNode::Scope(ScopeNode::new(token("inner"), vec![]))],
    );
    let built = AstBuilder::new()
        .build_scope(&scope)
        .expect("scope should build");
    assert_eq!(built.depth(), 0);
    assert_eq!(built.scopes()[0].depth(), 1);
}

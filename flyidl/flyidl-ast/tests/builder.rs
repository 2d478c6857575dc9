use flyidl_ast::{
    AstError, CaseBuilder, Declaration, EnumBuilder, MemberBuilder, Position, ScopeBuilder,
    SpecificationBuilder, StructBuilder, Type, UnionBuilder, ValueBuilder,
};

fn member(name: &str, ty: Type) -> flyidl_ast::Member {
    let mut builder = MemberBuilder::new();
    builder.name(name).ty(ty);
    builder.build().expect("member should build")
}

#[test]
fn member_without_name_violates_contract() {
    let mut builder = MemberBuilder::new();
    builder.ty(Type::Int32);
    assert_eq!(
        builder.build(),
        Err(AstError::ContractViolation {
            node: "member",
            field: "name",
        })
    );
}

#[test]
fn member_without_type_violates_contract() {
    let mut builder = MemberBuilder::new();
    builder.name("field1");
    assert_eq!(
        builder.build(),
        Err(AstError::ContractViolation {
            node: "member",
            field: "type",
        })
    );
}

#[test]
fn value_without_ordinal_violates_contract() {
    let mut builder = ValueBuilder::new();
    builder.name("RED");
    assert!(matches!(
        builder.build(),
        Err(AstError::ContractViolation {
            node: "value",
            field: "ordinal",
        })
    ));
}

#[test]
fn octets_size_setters_last_write_wins() {
    let mut builder = MemberBuilder::new();
    builder
        .name("payload")
        .ty(Type::Octets)
        .size(16)
        .size_name("length");
    let member = builder.build().expect("member should build");
    assert_eq!(member.size(), None);
    assert_eq!(member.size_name(), Some("length"));

    let mut builder = MemberBuilder::new();
    builder
        .name("payload")
        .ty(Type::Octets)
        .size_name("length")
        .size(16);
    let member = builder.build().expect("member should build");
    assert_eq!(member.size(), Some(16));
    assert_eq!(member.size_name(), None);
}

#[test]
fn member_reports_unsigned_widening() {
    assert_eq!(member("a", Type::Uint8).unsigned_type(), Some(Type::Int32));
    assert_eq!(member("b", Type::Uint32).unsigned_type(), Some(Type::Int64));
    assert_eq!(member("c", Type::Uint64).unsigned_type(), None);
    assert_eq!(member("d", Type::Int32).unsigned_type(), None);
}

#[test]
fn enum_builder_size_tracks_added_values() {
    let mut builder = EnumBuilder::new("Color");
    assert_eq!(builder.size(), 0);
    for name in ["RED", "GREEN"] {
        let mut value = ValueBuilder::new();
        value.name(name).ordinal(builder.size());
        builder.value(value.build().expect("value should build"));
    }
    assert_eq!(builder.size(), 2);

    let color = builder.build();
    assert_eq!(color.values()[1].name(), "GREEN");
    assert_eq!(color.values()[1].ordinal(), 1);
}

#[test]
fn scope_tree_assembles_in_declaration_order() {
    let mut point = StructBuilder::new("Point");
    point
        .type_id(3)
        .supertype("base::Shape")
        .member(member("x", Type::Int32))
        .member(member("y", Type::Int32));

    let mut case = CaseBuilder::new(5);
    case.member(member("text", Type::String));
    let mut choice = UnionBuilder::new("Choice");
    choice.case(case.build());

    let mut inner = ScopeBuilder::new("inner", 1);
    inner
        .declaration(Declaration::Struct(point.build()))
        .declaration(Declaration::Union(choice.build()));

    let mut outer = ScopeBuilder::new("outer", 0);
    outer
        .enumeration(EnumBuilder::new("Empty").build())
        .scope(inner.build());

    let mut spec = SpecificationBuilder::new();
    spec.scope(outer.build());
    let spec = spec.build();

    let outer = &spec.scopes()[0];
    assert_eq!(outer.name(), "outer");
    assert_eq!(outer.enums()[0].name(), "Empty");
    let inner = &outer.scopes()[0];
    assert_eq!(inner.depth(), 1);
    let point = &inner.structs()[0];
    assert_eq!(point.type_id(), 3);
    assert_eq!(point.supertype(), Some("base::Shape"));
    assert_eq!(
        point
            .members()
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>(),
        vec!["x", "y"]
    );
    assert_eq!(inner.unions()[0].cases()[0].value(), 5);
}

#[test]
fn positional_errors_keep_first_position() {
    let err = flyidl_ast::parse_int_literal(Some("0xZZ"))
        .expect_err("literal should be malformed")
        .at(Position::new(3, 14))
        .at(Position::new(9, 1));
    assert_eq!(err.position(), Some(Position::new(3, 14)));
    assert_eq!(
        err.to_string(),
        "malformed integer literal `0xZZ` at 3:14: invalid digit found in string"
    );
}

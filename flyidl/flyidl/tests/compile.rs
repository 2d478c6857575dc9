use flyidl::{
    CompileError, Compiler,
    ast::{AstError, Position, Type},
    compile_str,
};

const SCHEMA: &str = r#"
scope example
{
    enum Kind { BEGIN, DATA, END }

    struct Frame [0x01]
    {
        uint32 streamId;
        uint16 length;
        octets[length] payload;
    }

    scope control
    {
        struct Reset [0x02] extends example::Frame
        {
            int64 code;
        }

        union Command switch (uint8)
        {
            case 7: string name;
            case 3: control.Reset reset;
        }
    }
}
"#;

#[test]
fn compiles_complete_schema() {
    let spec = compile_str("example.idl", SCHEMA).expect("schema should compile");
    let example = &spec.scopes()[0];
    assert_eq!(example.name(), "example");
    assert_eq!(example.enums()[0].values().len(), 3);

    let frame = &example.structs()[0];
    assert_eq!(frame.type_id(), 1);
    assert_eq!(frame.members()[0].unsigned_type(), Some(Type::Int64));
    assert_eq!(frame.members()[2].size_name(), Some("length"));

    let control = &example.scopes()[0];
    assert_eq!(control.depth(), 1);
    assert_eq!(control.structs()[0].supertype(), Some("example::Frame"));

    let command = &control.unions()[0];
    assert_eq!(command.cases()[0].value(), 7);
    assert_eq!(command.cases()[1].value(), 3);
    assert_eq!(
        command.cases()[1].members()[0].ty(),
        &Type::Dynamic("control.Reset".into())
    );
}

#[test]
fn syntax_errors_carry_source_name_and_position() {
    let err = compile_str("broken.idl", "scope a {\n  struct {}\n}").expect_err("missing name");
    assert!(matches!(err, CompileError::Syntax { .. }));
    assert_eq!(err.source_name(), "broken.idl");
    assert_eq!(err.position(), Some(Position::new(2, 10)));
    assert_eq!(
        err.to_string(),
        "failed to parse schema 'broken.idl': syntax error at 2:10: expected struct name, found `{}`"
    );
}

#[test]
fn malformed_literal_fails_the_whole_unit() {
    let err = compile_str("bad.idl", "scope a { struct Ok [1] {} struct Bad [0xZZ] {} }")
        .expect_err("malformed literal");
    match &err {
        CompileError::Ast {
            source: AstError::MalformedLiteral { literal, .. },
            ..
        } => assert_eq!(literal, "0xZZ"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "failed to build schema 'bad.idl': malformed integer literal `0xZZ` at 1:40: invalid digit found in string"
    );
}

#[test]
fn compiler_is_reusable_across_units() {
    let mut compiler = Compiler::builder().with_source_name("units").build();
    assert_eq!(compiler.source_name(), "units");

    compiler
        .compile("scope a { scope b { struct S [0xG] {} } }")
        .expect_err("first unit should fail");

    let spec = compiler
        .compile("scope c { scope d {} }")
        .expect("second unit should compile");
    assert_eq!(spec.scopes()[0].depth(), 0);
    assert_eq!(spec.scopes()[0].scopes()[0].depth(), 1);
}

#[test]
fn default_source_name() {
    let err = Compiler::new()
        .compile("")
        .expect_err("empty input should fail");
    assert_eq!(err.source_name(), "<input>");
}

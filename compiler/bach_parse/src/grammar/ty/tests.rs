#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::parse_type;
use bach_diagnostic::ErrorCode;
use bach_types::{Name, Type};
use pretty_assertions::assert_eq;

fn ty(source: &str) -> Type {
    parse_type(source).unwrap()
}

#[test]
fn test_primitives_and_unions() {
    assert_eq!(ty("Num"), Type::Num);
    assert_eq!(ty("Str|Num"), Type::union([Type::Num, Type::Str]));
    assert_eq!(ty("Num|Any"), Type::Any);
}

#[test]
fn test_array_types() {
    assert_eq!(ty("Arr<>"), Type::empty_arr());
    assert_eq!(ty("Arr<Num...>"), Type::arr(Type::Num));
    assert_eq!(ty("Arr<Num, Str>"), Type::tuple(vec![Type::Num, Type::Str]));
    assert_eq!(
        ty("Arr<Num, Str...>"),
        Type::prefixed(vec![Type::Num], Type::arr(Type::Str))
    );
    assert_eq!(ty("Arr<Arr<Num...>...>"), Type::arr(Type::arr(Type::Num)));
}

#[test]
fn test_record_types() {
    assert_eq!(ty("Obj<a: Num>"), Type::record([("a", Type::Num)]));
    assert_eq!(ty("Obj<>"), Type::record(Vec::<(&str, Type)>::new()));
    assert_eq!(ty("Obj<Any>"), Type::any_obj());
    assert_eq!(
        ty(r#"Obj<"b c": Str, a: Num, Any>"#),
        Type::obj(
            [(Name::from("a"), Type::Num), (Name::from("b c"), Type::Str)].into_iter().collect(),
            Type::Any
        )
    );
}

#[test]
fn test_type_variables() {
    assert_eq!(ty("<A>"), Type::var("A", Type::Any));
    assert_eq!(ty("<A Num>"), Type::var("A", Type::Num));
    assert_eq!(ty("Arr<<A>...>"), Type::arr(Type::var("A", Type::Any)));
    assert_eq!(
        ty("Arr<<A Num|Str>...>"),
        Type::arr(Type::var("A", Type::union([Type::Num, Type::Str])))
    );
}

#[test]
fn test_type_display_round_trips() {
    for source in ["Arr<Num, Str...>", "Obj<a: Num, Any>", "Num|Str", "<A Num>", "Arr<>"] {
        assert_eq!(ty(source).to_string(), source);
    }
}

#[test]
fn test_type_errors() {
    assert_eq!(parse_type("Int").unwrap_err().code, ErrorCode::UnknownType);
    assert_eq!(parse_type("Arr<Num").unwrap_err().code, ErrorCode::UnexpectedToken);
    assert_eq!(parse_type("Num Str").unwrap_err().code, ErrorCode::UnexpectedToken);
}

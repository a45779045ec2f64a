#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use bach_diagnostic::{internal, ErrorCode};
use bach_types::Bindings;
use pretty_assertions::assert_eq;

fn nums(ns: &[f64]) -> Value {
    Value::Arr(ArrValue::from_values(ns.iter().map(|&n| Value::Num(n)).collect()))
}

fn rec(fields: Vec<(&str, Value)>) -> Value {
    Value::Obj(ObjValue::from_values(fields))
}

fn no_bindings() -> BindingStack {
    BindingStack::new()
}

#[test]
fn test_repr_literals() {
    assert_eq!(Value::Num(42.0).repr().unwrap(), "42");
    assert_eq!(Value::Num(-3.0).repr().unwrap(), "-3");
    assert_eq!(Value::Num(0.5).repr().unwrap(), "0.5");
    assert_eq!(Value::str("ab\"c").repr().unwrap(), r#""ab\"c""#);
    assert_eq!(Value::Null.repr().unwrap(), "null");
    assert_eq!(nums(&[1.0, 2.0, 3.0]).repr().unwrap(), "[1, 2, 3]");
    assert_eq!(nums(&[]).repr().unwrap(), "[]");
}

#[test]
fn test_repr_record_sorts_and_quotes_keys() {
    let value = rec(vec![
        ("b", Value::Num(2.0)),
        ("a", Value::Num(1.0)),
        ("two words", Value::Bool(true)),
    ]);
    assert_eq!(value.repr().unwrap(), r#"{a: 1, b: 2, "two words": true}"#);
}

#[test]
fn test_render_writes_strings_raw() {
    assert_eq!(Value::str("a\"b").render().unwrap(), "a\"b");
    assert_eq!(Value::Num(1.5).render().unwrap(), "1.5");
    assert_eq!(
        Value::Arr(ArrValue::from_values(vec![Value::str("x")])).render().unwrap(),
        r#"["x"]"#
    );
}

#[test]
fn test_equals() {
    assert!(nums(&[1.0, 2.0]).equals(&nums(&[1.0, 2.0])).unwrap());
    assert!(!nums(&[1.0, 2.0]).equals(&nums(&[1.0])).unwrap());
    assert!(!nums(&[1.0]).equals(&nums(&[1.0, 2.0])).unwrap());
    assert!(!Value::Num(1.0).equals(&Value::str("1")).unwrap());

    let a = rec(vec![("x", nums(&[1.0])), ("y", Value::Null)]);
    let b = rec(vec![("y", Value::Null), ("x", nums(&[1.0]))]);
    let c = rec(vec![("x", nums(&[1.0]))]);
    assert!(a.equals(&b).unwrap());
    assert!(!a.equals(&c).unwrap());
}

#[test]
fn test_inhabits_primitives_and_unions() {
    let num_or_str = Type::union([Type::Num, Type::Str]);
    assert!(Value::Num(1.0).inhabits(&num_or_str, &no_bindings()).unwrap());
    assert!(!Value::Null.inhabits(&num_or_str, &no_bindings()).unwrap());
    assert!(Value::Null.inhabits(&Type::Any, &no_bindings()).unwrap());
    assert!(!Value::Null.inhabits(&Type::Void, &no_bindings()).unwrap());
}

#[test]
fn test_inhabits_arrays() {
    let value = nums(&[1.0, 2.0]);
    assert!(value.inhabits(&Type::arr(Type::Num), &no_bindings()).unwrap());
    assert!(!value.inhabits(&Type::arr(Type::Str), &no_bindings()).unwrap());
    assert!(value.inhabits(&Type::tuple(vec![Type::Num, Type::Num]), &no_bindings()).unwrap());
    assert!(!value.inhabits(&Type::tuple(vec![Type::Num]), &no_bindings()).unwrap());
    assert!(value
        .inhabits(&Type::prefixed(vec![Type::Num], Type::arr(Type::Any)), &no_bindings())
        .unwrap());
    assert!(!nums(&[]).inhabits(&Type::prefixed(vec![Type::Num], Type::arr(Type::Any)), &no_bindings()).unwrap());
}

#[test]
fn test_inhabits_records() {
    let value = rec(vec![("a", Value::Num(1.0)), ("b", Value::str("x"))]);
    let closed = Type::record([("a", Type::Num)]);
    let open = Type::obj([(Name::from("a"), Type::Num)].into_iter().collect(), Type::Any);
    let str_rest = Type::obj([(Name::from("a"), Type::Num)].into_iter().collect(), Type::Str);
    assert!(!value.inhabits(&closed, &no_bindings()).unwrap());
    assert!(value.inhabits(&open, &no_bindings()).unwrap());
    assert!(value.inhabits(&str_rest, &no_bindings()).unwrap());
    assert!(!rec(vec![]).inhabits(&closed, &no_bindings()).unwrap());
}

#[test]
fn test_inhabits_var_uses_bindings() {
    let var = Type::var("A", Type::Any);
    assert!(Value::Num(1.0).inhabits(&var, &no_bindings()).unwrap());

    let mut frame = Bindings::default();
    frame.insert("A".into(), Type::Str);
    let bindings = BindingStack::new().push(frame);
    assert!(!Value::Num(1.0).inhabits(&var, &bindings).unwrap());
    assert!(Value::str("s").inhabits(&var, &bindings).unwrap());

    let bounded = Type::var("B", Type::Num);
    assert!(!Value::str("s").inhabits(&bounded, &bindings).unwrap());
}

#[test]
fn test_iteration_forces_tails_on_demand() {
    let broken = Thunk::error(internal("boom"));
    let arr = ArrValue::cons(Value::Num(1.0), broken);
    let mut iter = arr.iter();
    assert_eq!(iter.next().unwrap().unwrap().repr().unwrap(), "1");
    assert_eq!(iter.next().unwrap().unwrap_err().code, ErrorCode::Internal);
    assert!(iter.next().is_none());

    // the array type check never looks past the head for `Arr<Any...>`
    assert!(Value::Arr(arr).inhabits(&Type::arr(Type::Any), &no_bindings()).unwrap());
}

#[test]
fn test_long_arrays_drop_without_recursion() {
    let values = (0..1_000_000).map(|i| Value::Num(f64::from(i))).collect();
    let arr = ArrValue::from_values(values);
    assert_eq!(arr.iter().count(), 1_000_000);
    drop(arr);
}

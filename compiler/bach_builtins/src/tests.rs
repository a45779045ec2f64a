#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::test_support::{error_code, run_ok, value_of};
use bach_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

#[test]
fn test_every_builtin_is_on_the_initial_stack() {
    let mut builtins = Vec::new();
    register_all(&mut builtins);
    assert_eq!(builtin_funcers().len(), builtins.len());
    assert_eq!(initial_shape(Type::Num).ty, Type::Num);
}

#[test]
fn test_basic_operations() {
    assert_eq!(run_ok("3 id"), ("Num".to_string(), "3".to_string()));
    assert_eq!(value_of("[1, {a: \"x\"}] repr"), "\"[1, {a: \\\"x\\\"}]\"");
    assert_eq!(value_of("[1, 2] ==[1, 2]"), "true");
    assert_eq!(value_of("1 !=\"1\""), "true");
    assert_eq!(error_code("1 reject"), ErrorCode::Rejected);
}

#[test]
fn test_logic() {
    assert_eq!(value_of("true not"), "false");
    assert_eq!(value_of("true and(false)"), "false");
    assert_eq!(value_of("false or(true)"), "true");
}

#[test]
fn test_connectives_skip_a_decided_argument() {
    assert_eq!(value_of("false and(reject)"), "false");
    assert_eq!(value_of("true or(reject)"), "true");
    assert_eq!(error_code("true and(reject)"), ErrorCode::Rejected);
}

#[test]
fn test_arithmetic_has_no_precedence() {
    assert_eq!(value_of("1 +2 *3"), "9");
    assert_eq!(value_of("7 %4 /2"), "1.5");
    assert_eq!(value_of("1 -3"), "-2");
}

#[test]
fn test_comparisons_are_overloaded() {
    assert_eq!(value_of("1 <2"), "true");
    assert_eq!(value_of("2 <=1"), "false");
    assert_eq!(value_of("\"b\" >\"a\""), "true");
    assert_eq!(value_of("\"ab\" >=\"b\""), "false");
    assert_eq!(error_code("1 <\"a\""), ErrorCode::ArgHasWrongOutputType);
}

#[test]
fn test_text() {
    assert_eq!(value_of("\"ab\" +\"cd\""), "\"abcd\"");
    assert_eq!(value_of("\"héllo\" len"), "5");
    assert_eq!(value_of("[\"a\", \"b\", \"c\"] join(\", \")"), "\"a, b, c\"");
    assert_eq!(value_of("[] join(\"-\")"), "\"\"");
}

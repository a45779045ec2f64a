#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::test_support::{error_code, run_ok, type_of, value_of};
use bach_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn ok(ty: &str, value: &str) -> (String, String) {
    (ty.to_string(), value.to_string())
}

#[test]
fn test_len_and_concat() {
    assert_eq!(value_of("[1, 2, 3] len"), "3");
    assert_eq!(value_of("[] len"), "0");
    assert_eq!(
        run_ok("[1, 2] +[\"a\"]"),
        ok("Arr<Num|Str...>", "[1, 2, \"a\"]")
    );
}

#[test]
fn test_range() {
    assert_eq!(run_ok("range(0, 4)"), ok("Arr<Num...>", "[0, 1, 2, 3]"));
    assert_eq!(value_of("range(3, 1)"), "[]");
}

#[test]
fn test_each_maps_and_skips_drops() {
    assert_eq!(run_ok("[1, 2, 3] each(*2)"), ok("Arr<Num...>", "[2, 4, 6]"));
    assert_eq!(
        value_of("[1, 2, 3] each(if ==2 then drop else id ok)"),
        "[1, 3]"
    );
}

#[test]
fn test_each_element_sees_the_outer_scope() {
    assert_eq!(value_of("10 =n [1, 2] each(+n)"), "[11, 12]");
}

#[test]
fn test_keep() {
    assert_eq!(value_of("range(0, 10) keep(%3 ==0)"), "[0, 3, 6, 9]");
}

#[test]
fn test_take_and_drop() {
    assert_eq!(value_of("range(0, 5) take(2)"), "[0, 1]");
    assert_eq!(value_of("range(0, 5) drop(3)"), "[3, 4]");
    assert_eq!(value_of("range(0, 2) drop(5)"), "[]");
    assert_eq!(value_of("range(0, 2) take(5)"), "[0, 1]");
}

#[test]
fn test_take_and_drop_with_unbounded_counts() {
    assert_eq!(value_of("range(0, 3) take(1 /0)"), "[0, 1, 2]");
    assert_eq!(value_of("range(0, 3) drop(1 /0)"), "[]");
    assert_eq!(error_code("[1, 2, 3] take(0 /0)"), ErrorCode::UnexpectedValue);
    assert_eq!(error_code("1 repeat take(0 /0)"), ErrorCode::UnexpectedValue);
    assert_eq!(error_code("[1, 2, 3] drop(0 /0)"), ErrorCode::UnexpectedValue);
}

#[test]
fn test_infinite_streams_are_consumed_lazily() {
    assert_eq!(run_ok("1 repeat take(3)"), ok("Arr<Num...>", "[1, 1, 1]"));
    assert_eq!(
        value_of("0 repeat each(+1) drop(2) take(2)"),
        "[1, 1]"
    );
    assert_eq!(
        value_of("range(0, 1000000000) keep(%2 ==0) each(*3) take(3)"),
        "[0, 6, 12]"
    );
}

#[test]
fn test_fold() {
    assert_eq!(run_ok("[1, 2, 3, 4] fold(0, +)"), ok("Num", "10"));
    assert_eq!(
        value_of("[\"a\", \"b\"] fold(\">\", +)"),
        "\">ab\""
    );
    assert_eq!(value_of("[] fold(5, +)"), "5");
}

#[test]
fn test_get_on_arrays() {
    assert_eq!(run_ok("[1, \"a\"] get(1)"), ok("Num|Str", "\"a\""));
    assert_eq!(error_code("[1] get(4)"), ErrorCode::NoSuchIndex);
    assert_eq!(error_code("[1] get(0.5)"), ErrorCode::NoSuchIndex);
}

#[test]
fn test_get_on_records() {
    assert_eq!(run_ok("{a: 1, b: \"x\"} get(\"b\")"), ok("Num|Str", "\"x\""));
    assert_eq!(value_of("{0: true} get(0)"), "true");
    assert_eq!(error_code("{a: 1} get(\"c\")"), ErrorCode::NoSuchProperty);
}

#[test]
fn test_get_on_an_empty_record_is_void() {
    assert_eq!(type_of("{} get(0)"), "Void");
    assert_eq!(error_code("{} get(0)"), ErrorCode::NoSuchProperty);
}

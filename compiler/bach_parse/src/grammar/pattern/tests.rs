#![allow(clippy::unwrap_used, clippy::expect_used)]

use bach_diagnostic::ErrorCode;
use bach_ir::{ExprKind, Pattern, PatternKind};
use bach_types::Type;
use pretty_assertions::assert_eq;

use crate::parse;

/// The pattern of a program of the form `=pattern`.
fn pattern(source: &str) -> Pattern {
    match parse(&format!("={source}")).unwrap().kind {
        ExprKind::Assign(pattern) => pattern,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

fn bind(name: &str) -> Pattern {
    let kind = PatternKind::Type {
        ty: Type::Any,
        name: Some(name.into()),
    };
    Pattern::new(kind, bach_ir::Span::DUMMY)
}

fn strip(p: Pattern) -> Pattern {
    let kind = match p.kind {
        PatternKind::Array { elems, rest, name } => PatternKind::Array {
            elems: elems.into_iter().map(strip).collect(),
            rest: rest.map(|r| Box::new(strip(*r))),
            name,
        },
        PatternKind::Record { props, name } => PatternKind::Record {
            props: props.into_iter().map(|(k, v)| (k, strip(v))).collect(),
            name,
        },
        kind @ PatternKind::Type { .. } => kind,
    };
    Pattern::new(kind, bach_ir::Span::DUMMY)
}

#[test]
fn test_name_pattern() {
    let p = pattern("n");
    assert_eq!(p.name().map(|n| &**n), Some("n"));
    assert_eq!(p.span, bach_ir::Span::new(1, 2));
}

#[test]
fn test_typed_name_pattern() {
    let p = pattern("Num|Str x");
    assert_eq!(
        p.kind,
        PatternKind::Type {
            ty: Type::union([Type::Num, Type::Str]),
            name: Some("x".into()),
        }
    );
}

#[test]
fn test_array_pattern_with_rest() {
    let p = strip(pattern("[head;tail]"));
    assert_eq!(
        p.kind,
        PatternKind::Array {
            elems: vec![bind("head")],
            rest: Some(Box::new(bind("tail"))),
            name: None,
        }
    );
}

#[test]
fn test_nested_record_pattern_with_name() {
    let p = strip(pattern("{a: [Num, x], \"b c\": y} whole"));
    let PatternKind::Record { props, name } = p.kind else {
        panic!("expected a record pattern");
    };
    assert_eq!(name.as_deref(), Some("whole"));
    let keys: Vec<&str> = props.iter().map(|(k, _)| &**k).collect();
    assert_eq!(keys, vec!["a", "b c"]);
    assert!(matches!(props[0].1.kind, PatternKind::Array { ref elems, .. } if elems.len() == 2));
}

#[test]
fn test_empty_patterns() {
    assert!(matches!(pattern("[]").kind, PatternKind::Array { ref elems, rest: None, .. } if elems.is_empty()));
    assert!(matches!(pattern("[;r]").kind, PatternKind::Array { ref elems, rest: Some(_), .. } if elems.is_empty()));
    assert!(matches!(pattern("{}").kind, PatternKind::Record { ref props, .. } if props.is_empty()));
}

#[test]
fn test_pattern_errors() {
    assert_eq!(parse("=").unwrap_err().code, ErrorCode::UnexpectedToken);
    assert_eq!(parse("=[a").unwrap_err().code, ErrorCode::UnexpectedToken);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bach_diagnostic::ErrorCode;
use bach_ir::{ExprKind, Key, TemplatePart};
use bach_types::{Parameter, Type};
use pretty_assertions::assert_eq;

use super::*;

/// Flatten a left-nested composition back into its components.
fn components(expr: Expr) -> Vec<ExprKind> {
    match expr.kind {
        ExprKind::Compose(left, right) => {
            let mut out = components(*left);
            out.push(right.kind);
            out
        }
        ExprKind::Identity => Vec::new(),
        kind => vec![kind],
    }
}

fn call_name(kind: &ExprKind) -> &str {
    match kind {
        ExprKind::Call { name, .. } => name,
        other => panic!("expected a call, got {other:?}"),
    }
}

#[test]
fn test_pipeline_has_no_precedence() {
    let parts = components(parse("1 +2 *3").unwrap());
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], ExprKind::Num(1.0));
    assert_eq!(call_name(&parts[1]), "+");
    assert_eq!(call_name(&parts[2]), "*");
    let ExprKind::Call { args, .. } = &parts[2] else {
        unreachable!()
    };
    assert_eq!(args[0].kind, ExprKind::Num(3.0));
}

#[test]
fn test_operator_needs_adjacent_argument() {
    let parts = components(parse("1 + 2").unwrap());
    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[1], ExprKind::Call { args, .. } if args.is_empty()));
}

#[test]
fn test_call_arguments() {
    let parts = components(parse("range(0, 10) each(*2)").unwrap());
    let ExprKind::Call { name, args } = &parts[0] else {
        panic!("expected a call")
    };
    assert_eq!(&**name, "range");
    assert_eq!(args.len(), 2);
    let ExprKind::Call { args, .. } = &parts[1] else {
        panic!("expected a call")
    };
    assert_eq!(call_name(&args[0].kind), "*");
}

#[test]
fn test_empty_program_is_identity() {
    assert_eq!(parse("  # nothing\n").unwrap().kind, ExprKind::Identity);
}

#[test]
fn test_definition() {
    let parts = components(
        parse("for Num def fac Num as if ==0 then 1 else =n -1 fac *n ok ok 3 fac").unwrap(),
    );
    assert_eq!(parts.len(), 3);
    let ExprKind::Def(def) = &parts[0] else {
        panic!("expected a definition")
    };
    assert_eq!(def.input, Type::Num);
    assert_eq!(&*def.name, "fac");
    assert!(def.params.is_empty());
    assert_eq!(def.output, Type::Num);
    assert!(matches!(def.body.kind, ExprKind::If { .. }));
}

#[test]
fn test_definition_with_parameters() {
    let expr = parse("def twice(for Num f Num) Arr<Num...> as [f, f] ok").unwrap();
    let ExprKind::Def(def) = expr.kind else {
        panic!("expected a definition")
    };
    assert_eq!(def.input, Type::Any);
    assert_eq!(
        def.params,
        vec![Parameter::with_input(Type::Num, Type::Num).named("f")]
    );

    let expr = parse("def apply(f (Num) Num) Num as f(1) ok").unwrap();
    let ExprKind::Def(def) = expr.kind else {
        panic!("expected a definition")
    };
    assert_eq!(
        def.params[0],
        Parameter::simple(Type::Num)
            .named("f")
            .with_params(vec![Parameter::simple(Type::Num)])
    );
}

#[test]
fn test_operator_definition() {
    let expr = parse("for Str def +(b Str) Str as ok").unwrap();
    let ExprKind::Def(def) = expr.kind else {
        panic!("expected a definition")
    };
    assert_eq!(&*def.name, "+");
    assert_eq!(def.params.len(), 1);
}

#[test]
fn test_conditional() {
    let expr = parse("if ==1 then \"a\" elif ==2 then \"b\" else \"c\" ok").unwrap();
    let ExprKind::If { branches, otherwise } = expr.kind else {
        panic!("expected a conditional")
    };
    assert_eq!(branches.len(), 2);
    assert_eq!(otherwise.kind, ExprKind::Str("c".into()));
}

#[test]
fn test_match() {
    let expr = parse("is Num with >0 then 1 elis Str then 2 else 3 ok").unwrap();
    assert_eq!(expr.span, Span::new(0, 47));
    let ExprKind::Match(m) = expr.kind else {
        panic!("expected a match")
    };
    assert_eq!(m.clauses.len(), 2);
    assert!(m.clauses[0].guard.is_some());
    assert!(m.clauses[1].guard.is_none());
    assert!(m.otherwise.is_some());
}

#[test]
fn test_array_and_record_literals() {
    let expr = parse("[1, 2; [3]]").unwrap();
    let ExprKind::Array { elems, rest } = expr.kind else {
        panic!("expected an array")
    };
    assert_eq!(elems.len(), 2);
    assert!(rest.is_some());

    assert_eq!(parse("[]").unwrap().kind, ExprKind::Array { elems: vec![], rest: None });

    let expr = parse("{a: 1, \"b c\": 2, 3: null}").unwrap();
    let ExprKind::Record(fields) = expr.kind else {
        panic!("expected a record")
    };
    let keys: Vec<&str> = fields.iter().map(|(k, _)| &**k).collect();
    assert_eq!(keys, vec!["a", "b c", "3"]);
}

#[test]
fn test_getters() {
    assert_eq!(parse("@a").unwrap().kind, ExprKind::Get(Key::Prop("a".into())));
    assert_eq!(parse("@\"a b\"").unwrap().kind, ExprKind::Get(Key::Prop("a b".into())));
    assert_eq!(parse("@2").unwrap().kind, ExprKind::Get(Key::Index(2)));
    assert_eq!(parse("@1.5").unwrap_err().code, ErrorCode::InvalidNumber);
}

#[test]
fn test_template() {
    let expr = parse(r#""n = {1 +2}.""#).unwrap();
    let ExprKind::Template(parts) = expr.kind else {
        panic!("expected a template")
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], TemplatePart::Lit("n = ".into()));
    let TemplatePart::Expr(inner) = &parts[1] else {
        panic!("expected an interpolation")
    };
    assert_eq!(inner.span, Span::new(6, 10));
}

#[test]
fn test_plain_string() {
    assert_eq!(parse(r#""a{{b}}""#).unwrap().kind, ExprKind::Str("a{b}".into()));
}

#[test]
fn test_parenthesized_composition() {
    let parts = components(parse("(1 +2) *3").unwrap());
    assert_eq!(parts.len(), 2);
    assert!(matches!(parts[0], ExprKind::Compose(..)));
}

#[test]
fn test_syntax_errors() {
    let err = parse("1 )").unwrap_err();
    assert_eq!(err.code, ErrorCode::ExpectedExpression);
    assert_eq!(err.span, Some(Span::new(2, 3)));

    assert_eq!(parse("if true then 1 ok").unwrap_err().code, ErrorCode::UnexpectedToken);
    assert_eq!(parse("def f as ok").unwrap_err().code, ErrorCode::UnexpectedToken);
    assert_eq!(parse("is Foo then 1 ok").unwrap_err().code, ErrorCode::UnknownType);
    assert_eq!(parse(r#""{1 )}""#).unwrap_err().code, ErrorCode::ExpectedExpression);
}

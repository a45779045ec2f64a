#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::test_support::prelude;
use crate::{BuiltinFuncer, FuncerStack};
use bach_diagnostic::ErrorCode;
use bach_eval::Value;
use bach_ir::ExprKind;
use pretty_assertions::assert_eq;

fn num(n: f64) -> Expr {
    Expr::new(ExprKind::Num(n), Span::DUMMY)
}

fn resolved(name: &str, args: &[Expr], shape: &Shape) -> Resolved {
    match resolve(name, args, Span::DUMMY, shape, &[]) {
        Ok(resolved) => resolved,
        Err(err) => panic!("`{name}` did not resolve: {err:?}"),
    }
}

fn tagged(input: Type, tag: &'static str) -> Rc<dyn Funcer> {
    Rc::new(BuiltinFuncer::value(input, "f", Vec::new(), Type::Str, move |_, _| {
        Ok(Value::str(tag))
    }))
}

#[test]
fn test_newest_accepting_funcer_wins() {
    let funcers = FuncerStack::new()
        .push(tagged(Type::Any, "any"))
        .push(tagged(Type::Num, "num"));

    let on_num = resolved("f", &[], &Shape::new(Type::Num, funcers.clone()));
    assert_eq!(on_num.funcer.signature().input, Type::Num);

    let on_str = resolved("f", &[], &Shape::new(Type::Str, funcers));
    assert_eq!(on_str.funcer.signature().input, Type::Any);
}

#[test]
fn test_arity_counts_supplied_parameters() {
    let shape = Shape::new(Type::Num, prelude());
    let with_arg = resolved("+", &[num(1.0)], &shape);
    assert_eq!(with_arg.args.len(), 1);
    assert_eq!(with_arg.output, Type::Num);

    let open = resolve("+", &[], Span::DUMMY, &shape, &[Parameter::simple(Type::Num)]);
    assert!(open.is_ok());
}

#[test]
fn test_generic_output_is_instantiated() {
    let shape = Shape::new(Type::Str, prelude());
    let id = resolved("id", &[], &shape);
    assert_eq!(id.output, Type::Str);
    assert_eq!(id.bindings.get("A"), Some(&Type::Str));
}

#[test]
fn test_unknown_call_reports_what_was_asked() {
    let shape = Shape::new(Type::Str, prelude());
    let err = resolve("+", &[num(1.0)], Span::new(3, 5), &shape, &[])
        .err()
        .unwrap();
    assert_eq!(err.code, ErrorCode::NoSuchFunction);
    assert_eq!(err.name.as_deref(), Some("+"));
    assert_eq!(err.arity, Some(1));
    assert_eq!(err.got_type, Some(Type::Str));
    assert_eq!(err.span, Some(Span::new(3, 5)));
}

#[test]
fn test_no_fallback_after_a_match() {
    let unary = |param: Type| -> Rc<dyn Funcer> {
        Rc::new(BuiltinFuncer::value(
            Type::Any,
            "f",
            vec![Parameter::simple(param)],
            Type::Str,
            |_, _| Ok(Value::str("one")),
        ))
    };
    let funcers = FuncerStack::new()
        .push(unary(Type::Str))
        .push(unary(Type::Num));
    let shape = Shape::new(Type::Null, funcers);
    let arg = Expr::new(ExprKind::Str("a".into()), Span::DUMMY);
    let err = resolve("f", &[arg], Span::DUMMY, &shape, &[]).err().unwrap();
    assert_eq!(err.code, ErrorCode::ArgHasWrongOutputType);
}

#[test]
fn test_supplied_parameter_with_wrong_output_is_rejected() {
    let shape = Shape::new(Type::Num, prelude());
    let err = resolve(
        "+",
        &[],
        Span::DUMMY,
        &shape,
        &[Parameter::with_input(Type::Null, Type::Str)],
    )
    .err()
    .unwrap();
    assert_eq!(err.code, ErrorCode::ParamDoesNotMatch);
}

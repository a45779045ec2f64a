//! A small operation set and a runner for typechecker tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::rc::Rc;

use bach_diagnostic::{internal, Diagnostic};
use bach_eval::{Action, Outcome, State, Value};
use bach_types::{Parameter, Type};

use crate::{typecheck, BuiltinFuncer, Funcer, FuncerStack, Shape};

fn num_op(name: &str, op: fn(f64, f64) -> f64) -> BuiltinFuncer {
    BuiltinFuncer::value(
        Type::Num,
        name,
        vec![Parameter::simple(Type::Num)],
        Type::Num,
        move |input, args| match (input, &args[0]) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(op(*a, *b))),
            _ => Err(internal("bad operands")),
        },
    )
}

fn var(name: &str) -> Type {
    Type::var(name, Type::Any)
}

/// `+ - *` on numbers, `==`, `id`, `drop` and `apply(for <A> <B>)`.
pub(crate) fn prelude() -> FuncerStack {
    let funcers: Vec<Rc<dyn Funcer>> = vec![
        Rc::new(num_op("+", |a, b| a + b)),
        Rc::new(num_op("-", |a, b| a - b)),
        Rc::new(num_op("*", |a, b| a * b)),
        Rc::new(BuiltinFuncer::value(
            Type::Any,
            "==",
            vec![Parameter::simple(Type::Any)],
            Type::Bool,
            |input, args| input.equals(&args[0]).map(Value::Bool),
        )),
        Rc::new(BuiltinFuncer::value(var("A"), "id", Vec::new(), var("A"), |input, _| {
            Ok(input.clone())
        })),
        Rc::new(BuiltinFuncer::action(Type::Any, "drop", Vec::new(), Type::Void, |_, _| {
            Outcome::Drop
        })),
        Rc::new(BuiltinFuncer::action(
            var("A"),
            "apply",
            vec![Parameter::with_input(var("A"), var("B"))],
            var("B"),
            |state: &State, args: &[Action]| args[0].call(state.clone(), &[]).force(),
        )),
    ];
    FuncerStack::new().extend(funcers)
}

/// Parse, typecheck against [`prelude`] with a `Null` input, and run.
pub(crate) fn run(source: &str) -> Result<(String, String), Diagnostic> {
    let expr = bach_parse::parse(source)?;
    let checked = typecheck(&expr, &Shape::new(Type::Null, prelude()), &[])?;
    let state = checked.action.run(State::of(Value::Null)).into_state()?;
    Ok((checked.shape.ty.to_string(), state.value.repr()?))
}

/// The type a program checks to.
pub(crate) fn type_of(source: &str) -> Result<String, Diagnostic> {
    let expr = bach_parse::parse(source)?;
    let checked = typecheck(&expr, &Shape::new(Type::Null, prelude()), &[])?;
    Ok(checked.shape.ty.to_string())
}

pub(crate) fn run_ok(source: &str) -> (String, String) {
    run(source).unwrap_or_else(|err| panic!("`{source}` failed: {err:?}"))
}

pub(crate) fn error_code(source: &str) -> bach_diagnostic::ErrorCode {
    match run(source) {
        Ok(out) => panic!("`{source}` succeeded with {out:?}"),
        Err(err) => err.code,
    }
}

//! Running programs against the builtins.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bach_diagnostic::{Diagnostic, ErrorCode};
use bach_eval::{State, Value};
use bach_types::Type;

use crate::initial_shape;

pub(crate) fn run(source: &str) -> Result<(String, String), Diagnostic> {
    let expr = bach_parse::parse(source)?;
    let checked = bach_typeck::typecheck(&expr, &initial_shape(Type::Null), &[])?;
    let state = checked.action.run(State::of(Value::Null)).into_state()?;
    Ok((checked.shape.ty.to_string(), state.value.repr()?))
}

pub(crate) fn type_of(source: &str) -> String {
    let expr = bach_parse::parse(source).unwrap();
    let checked = bach_typeck::typecheck(&expr, &initial_shape(Type::Null), &[]).unwrap();
    checked.shape.ty.to_string()
}

/// Type and value of a program that must succeed.
pub(crate) fn run_ok(source: &str) -> (String, String) {
    run(source).unwrap_or_else(|err| panic!("`{source}` failed: {err:?}"))
}

pub(crate) fn value_of(source: &str) -> String {
    run_ok(source).1
}

pub(crate) fn error_code(source: &str) -> ErrorCode {
    match run(source) {
        Ok(out) => panic!("`{source}` succeeded with {out:?}"),
        Err(err) => err.code,
    }
}

//! Builtin operations of the Bach interpreter.
//!
//! Every builtin is a [`BuiltinFuncer`]: a signature plus a kernel. The
//! modules below each contribute one family of operations; [`register_all`]
//! collects them in a fixed order and [`initial_shape`] puts them on the
//! funcer stack programs start from.
//!
//! # Module Organization
//!
//! - `basic`: identity, equality, `drop`, `reject`, `repr`
//! - `logic`: boolean connectives
//! - `num`: arithmetic and comparisons
//! - `text`: string operations
//! - `seq`: arrays, streams and `get`

mod basic;
mod logic;
mod num;
mod seq;
mod text;

use std::rc::Rc;

use bach_diagnostic::{internal, Diagnostic};
use bach_eval::{ArrValue, Value};
use bach_typeck::{BuiltinFuncer, Funcer, FuncerStack, Shape};
use bach_types::{Name, Type};

/// Append every builtin to `out`.
pub fn register_all(out: &mut Vec<BuiltinFuncer>) {
    basic::register(out);
    logic::register(out);
    num::register(out);
    text::register(out);
    seq::register(out);
}

/// The builtins as a funcer stack, later registrations on top.
pub fn builtin_funcers() -> FuncerStack {
    let mut builtins = Vec::new();
    register_all(&mut builtins);
    tracing::debug!(count = builtins.len(), "registered builtins");
    FuncerStack::new().extend(
        builtins
            .into_iter()
            .map(|builtin| Rc::new(builtin) as Rc<dyn Funcer>),
    )
}

/// The shape a program with input type `input` is checked against.
pub fn initial_shape(input: Type) -> Shape {
    Shape::new(input, builtin_funcers())
}

fn var(name: &str) -> Type {
    Type::var(name, Type::Any)
}

// Kernels only see values of the types their signatures admit; a mismatch
// here is an interpreter bug rather than a user error.

fn num(value: &Value) -> Result<f64, Diagnostic> {
    match value {
        Value::Num(n) => Ok(*n),
        other => Err(mismatch("number", other)),
    }
}

fn text(value: &Value) -> Result<Name, Diagnostic> {
    match value {
        Value::Str(s) => Ok(Rc::clone(s)),
        other => Err(mismatch("string", other)),
    }
}

fn boolean(value: &Value) -> Result<bool, Diagnostic> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch("boolean", other)),
    }
}

fn array(value: &Value) -> Result<ArrValue, Diagnostic> {
    match value {
        Value::Arr(arr) => Ok(arr.clone()),
        other => Err(mismatch("array", other)),
    }
}

fn mismatch(want: &str, got: &Value) -> Diagnostic {
    internal(format!("builtin expected a {want}, got a {}", got.kind()))
}

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

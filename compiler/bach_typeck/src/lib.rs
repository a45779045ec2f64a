//! Bach Typeck - the static half of the interpreter.
//!
//! Typechecking walks the expression tree once, threading a [`Shape`] (the
//! type of the value flowing through the program plus the funcers visible
//! at that point) from left to right. Each node yields its output shape and
//! the [`Action`](bach_eval::Action) that computes it, so a program that
//! typechecks is ready to run.
//!
//! # Module Organization
//!
//! - `shape`: shapes and the persistent funcer stack
//! - `funcer`: builtin operations, definitions and bound variables behind
//!   one matching protocol
//! - `resolve`: overload resolution of calls
//! - `pattern`: type, array and record patterns and their matchers
//! - `check`: the per-node driver

mod check;
mod funcer;
mod pattern;
mod resolve;
mod shape;

#[cfg(test)]
mod test_support;

pub use check::{typecheck, Checked};
pub use funcer::{
    BuiltinFuncer, DefinitionFuncer, Funcer, Kernel, OutputFn, Signature, VariableFuncer,
};
pub use shape::{FuncerStack, Shape};

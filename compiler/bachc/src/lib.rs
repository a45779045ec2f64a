//! The Bach interpreter.
//!
//! [`interpret_program`] is the whole pipeline: parse, typecheck against the
//! builtins with a `Null` input, then run. The `bach` binary wraps it with
//! [`Config`] handling and diagnostic rendering.

mod config;
mod tracing_setup;

use bach_diagnostic::{void_program, Diagnostic};
use bach_eval::{State, Value};
use bach_typeck::Checked;
use bach_types::Type;

pub use config::{Config, Input, Invocation, UsageError, USAGE};
pub use tracing_setup::init_tracing;

/// Run a program to completion, returning its output type and value.
///
/// The value's arrays and records may still hold unevaluated parts; render
/// it with [`Value::repr`] to force them.
#[tracing::instrument(level = "debug", skip_all)]
pub fn interpret_program(source: &str) -> Result<(Type, Value), Diagnostic> {
    let checked = check(source)?;
    let state = checked.action.run(State::of(Value::Null)).into_state()?;
    tracing::debug!("evaluated");
    Ok((checked.shape.ty, state.value))
}

/// Parse and typecheck a program without running it.
pub fn check_program(source: &str) -> Result<Type, Diagnostic> {
    Ok(check(source)?.shape.ty)
}

fn check(source: &str) -> Result<Checked, Diagnostic> {
    let expr = bach_parse::parse(source)?;
    let shape = bach_builtins::initial_shape(Type::Null);
    let checked = bach_typeck::typecheck(&expr, &shape, &[])?;
    if checked.shape.ty.is_void() {
        return Err(void_program(expr.span));
    }
    tracing::debug!(ty = %checked.shape.ty, "typechecked");
    Ok(checked)
}

//! Calls: `name`, `name(args)`, `+2`.

use bach_diagnostic::Diagnostic;
use bach_eval::Action;
use bach_ir::{Expr, Span};
use bach_types::Parameter;
use smallvec::SmallVec;

use super::Checked;
use crate::resolve::resolve;
use crate::Shape;

pub(super) fn check_call(
    name: &str,
    args: &[Expr],
    span: Span,
    shape: &Shape,
    supplied: &[Parameter],
) -> Result<Checked, Diagnostic> {
    let resolved = resolve(name, args, span, shape, supplied)?;
    let target = resolved.funcer.action(&resolved.bindings);
    let own = resolved.args;

    // The callee runs argument actions from inside its own body, so each
    // is closed over the scope of this call first. Parameters supplied by
    // our caller arrive already closed over theirs.
    let action = Action::new(move |state, passed| {
        let mut args: SmallVec<[Action; 4]> = own.iter().map(|arg| arg.closed_over(&state)).collect();
        args.extend(passed.iter().cloned());
        target.call(state, &args)
    });

    let shape = shape.with_type(resolved.output);
    Ok(if resolved.funcer.keeps_scope() {
        Checked::keeping(shape, action)
    } else {
        Checked::foreign(shape, action)
    })
}

//! Overload resolution.
//!
//! A call is resolved against the funcer stack from the top down. The
//! first funcer accepting the name, the arity (own arguments plus the
//! parameters the caller supplies) and the input type wins; there is no
//! backtracking once a funcer has accepted, so an argument that does not
//! fit is an error rather than a reason to try an older funcer.

use std::rc::Rc;

use bach_diagnostic::{
    arg_has_wrong_output_type, no_such_function, param_does_not_match, Diagnostic,
};
use bach_eval::Action;
use bach_ir::{Expr, Span};
use bach_types::{Bindings, Parameter, Type};

use crate::{typecheck, Funcer, Shape};

/// A call bound to the funcer that handles it.
pub(crate) struct Resolved {
    pub funcer: Rc<dyn Funcer>,
    /// What the signature's type variables were bound to.
    pub bindings: Bindings,
    /// One action per argument written at the call site.
    pub args: Vec<Action>,
    pub output: Type,
}

#[tracing::instrument(level = "debug", skip_all, fields(name = %name, input = %shape.ty))]
pub(crate) fn resolve(
    name: &str,
    args: &[Expr],
    span: Span,
    shape: &Shape,
    supplied: &[Parameter],
) -> Result<Resolved, Diagnostic> {
    let arity = args.len() + supplied.len();
    let matched = shape
        .funcers
        .iter()
        .find_map(|funcer| Some((funcer, funcer.try_match(&shape.ty, name, arity)?)));
    let Some((funcer, mut bindings)) = matched else {
        return Err(no_such_function(span, name, &shape.ty, arity));
    };
    tracing::trace!(signature = %funcer.signature(), "resolved");

    let params = &funcer.signature().params;
    let (own, leftover) = params.split_at(args.len());

    let mut actions = Vec::with_capacity(args.len());
    for (param, arg) in own.iter().zip(args) {
        actions.push(check_arg(param, arg, shape, &mut bindings)?);
    }

    for (want, got) in leftover.iter().zip(supplied) {
        // Bind first so variables only fixed by the supplied parameters
        // are known when comparing.
        let bound = want.output.bind(&got.output, &mut bindings);
        let want = want.instantiate(&bindings);
        if !bound || !want.subsumes(got) {
            return Err(param_does_not_match(span, &want, got));
        }
    }

    let output = funcer.output_type(&shape.ty, &bindings);
    Ok(Resolved {
        funcer: Rc::clone(funcer),
        bindings,
        args: actions,
        output,
    })
}

/// Check one argument in the caller's scope, against the parameter's input
/// type and with the parameter's own parameters supplied.
fn check_arg(
    param: &Parameter,
    arg: &Expr,
    shape: &Shape,
    bindings: &mut Bindings,
) -> Result<Action, Diagnostic> {
    let input = param.input.instantiate(bindings);
    let supplied: Vec<Parameter> = param.params.iter().map(|p| p.instantiate(bindings)).collect();
    let checked = typecheck(arg, &shape.with_type(input), &supplied)?;
    if !param.output.bind(&checked.shape.ty, bindings) {
        return Err(arg_has_wrong_output_type(
            arg.span,
            &param.output.instantiate(bindings),
            &checked.shape.ty,
        ));
    }
    Ok(checked.action)
}

#[cfg(test)]
mod tests;

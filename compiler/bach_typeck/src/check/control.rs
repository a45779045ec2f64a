//! Conditionals, pattern matches and assignments.

use std::rc::Rc;

use bach_diagnostic::{
    condition_must_be_bool, internal, non_exhaustive_match, unexpected_value, unreachable_elis,
    unreachable_else, Diagnostic,
};
use bach_eval::{Action, Outcome, State, Thunk, Value};
use bach_ir::{Expr, Match, Pattern, Span};
use bach_types::Type;

use super::{typecheck, Checked};
use crate::pattern::{check_pattern, Matcher};
use crate::Shape;

/// Check a condition or guard: it sees the same input and must produce
/// `Bool`.
fn check_condition(cond: &Expr, shape: &Shape) -> Result<Action, Diagnostic> {
    let checked = typecheck(cond, shape, &[])?;
    if !Type::Bool.subsumes(&checked.shape.ty) {
        return Err(condition_must_be_bool(cond.span, &checked.shape.ty));
    }
    Ok(checked.action)
}

/// Run a condition. `Err` carries the thunk to return instead when the
/// condition dropped or failed.
fn test(cond: &Action, state: State) -> Result<bool, Thunk> {
    match cond.call(state, &[]).force() {
        Outcome::Value(out) => match out.value {
            Value::Bool(b) => Ok(b),
            other => Err(Thunk::error(internal(format!(
                "condition produced a {}",
                other.kind()
            )))),
        },
        Outcome::Drop => Err(Thunk::drop()),
        Outcome::Error(err) => Err(Thunk::error(err)),
    }
}

/// `if c then a elif c2 then b else d ok`: the output is the union of the
/// branches.
pub(super) fn check_if(
    branches: &[(Expr, Expr)],
    otherwise: &Expr,
    shape: &Shape,
) -> Result<Checked, Diagnostic> {
    let mut arms = Vec::with_capacity(branches.len());
    let mut outputs = Vec::with_capacity(branches.len() + 1);
    for (cond, body) in branches {
        let cond = check_condition(cond, shape)?;
        let body = typecheck(body, shape, &[])?;
        outputs.push(body.shape.ty);
        arms.push((cond, body.action));
    }
    let otherwise = typecheck(otherwise, shape, &[])?;
    outputs.push(otherwise.shape.ty);
    let otherwise = otherwise.action;

    let action = Action::new(move |state, _| {
        for (cond, body) in &arms {
            match test(cond, state.clone()) {
                Ok(true) => return body.call(state, &[]),
                Ok(false) => {}
                Err(stop) => return stop,
            }
        }
        otherwise.call(state, &[])
    });
    Ok(Checked::foreign(shape.with_type(Type::union(outputs)), action))
}

struct Arm {
    matcher: Matcher,
    guard: Option<Action>,
    body: Action,
}

/// `is p then a elis q with g then b else c ok`.
///
/// Each clause sees what the clauses before it did not match; a guarded
/// clause may decline after matching, so it narrows nothing for the rest.
pub(super) fn check_match(m: &Match, span: Span, shape: &Shape) -> Result<Checked, Diagnostic> {
    let mut remaining = shape.ty.clone();
    let mut arms = Vec::with_capacity(m.clauses.len());
    let mut outputs = Vec::with_capacity(m.clauses.len() + 1);

    for (i, clause) in m.clauses.iter().enumerate() {
        if i > 0 && remaining.is_void() {
            return Err(unreachable_elis(clause.span));
        }
        let pattern = check_pattern(&clause.pattern, &shape.with_type(remaining.clone()))?;
        let inner = Shape::new(pattern.ty, pattern.funcers);
        let guard = match &clause.guard {
            Some(guard) => Some(check_condition(guard, &inner)?),
            None => None,
        };
        let body = typecheck(&clause.body, &inner, &[])?;
        outputs.push(body.shape.ty);
        if guard.is_none() {
            remaining = pattern.complement;
        }
        arms.push(Arm {
            matcher: pattern.matcher,
            guard,
            body: body.action,
        });
    }

    let otherwise = match &m.otherwise {
        Some(otherwise) => {
            if remaining.is_void() {
                return Err(unreachable_else(otherwise.span));
            }
            let checked = typecheck(otherwise, &shape.with_type(remaining), &[])?;
            outputs.push(checked.shape.ty);
            Some(checked.action)
        }
        None if !remaining.is_void() => return Err(non_exhaustive_match(span, &remaining)),
        None => None,
    };

    let action = Action::new(move |state, _| {
        for arm in &arms {
            let stack = match (arm.matcher)(&state.value, &state.stack, &state.bindings) {
                Ok(Some(stack)) => stack,
                Ok(None) => continue,
                Err(err) => return Thunk::error(err),
            };
            let inner = State {
                value: state.value.clone(),
                stack,
                bindings: state.bindings.clone(),
            };
            if let Some(guard) = &arm.guard {
                match test(guard, inner.clone()) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(stop) => return stop,
                }
            }
            return arm.body.call(inner, &[]);
        }
        match &otherwise {
            Some(otherwise) => otherwise.call(state, &[]),
            None => Thunk::error(unmatched(&state.value)),
        }
    });
    Ok(Checked::foreign(shape.with_type(Type::union(outputs)), action))
}

/// `=pattern`: the pattern must accept every input.
pub(super) fn check_assign(pattern: &Pattern, shape: &Shape) -> Result<Checked, Diagnostic> {
    let checked = check_pattern(pattern, shape)?;
    if !checked.complement.is_void() {
        return Err(non_exhaustive_match(pattern.span, &checked.complement));
    }
    let matcher = Rc::clone(&checked.matcher);
    let action = Action::new(move |state, _| {
        match matcher(&state.value, &state.stack, &state.bindings) {
            Ok(Some(stack)) => Thunk::value(State { stack, ..state }),
            Ok(None) => Thunk::error(unmatched(&state.value)),
            Err(err) => Thunk::error(err),
        }
    });
    Ok(Checked::binding(Shape::new(shape.ty.clone(), checked.funcers), action))
}

fn unmatched(value: &Value) -> Diagnostic {
    match value.repr() {
        Ok(repr) => unexpected_value(repr),
        Err(err) => err,
    }
}

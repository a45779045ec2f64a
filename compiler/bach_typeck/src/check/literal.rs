//! Literals and constructors.

use std::collections::BTreeMap;
use std::rc::Rc;

use bach_diagnostic::{rest_requires_array, unexpected_drop, Diagnostic};
use bach_eval::{stream, Action, ArrIter, ObjValue, Outcome, Thunk, Value};
use bach_ir::{Expr, ExprKind, TemplatePart};
use bach_types::{Name, Type};

use super::{typecheck, Checked};
use crate::Shape;

pub(super) fn check_scalar(kind: &ExprKind, shape: &Shape) -> Checked {
    let (ty, value) = match kind {
        ExprKind::Bool(b) => (Type::Bool, Value::Bool(*b)),
        ExprKind::Num(n) => (Type::Num, Value::Num(*n)),
        ExprKind::Str(s) => (Type::Str, Value::Str(Rc::clone(s))),
        _ => (Type::Null, Value::Null),
    };
    Checked::keeping(shape.with_type(ty), Action::constant(value))
}

/// `"a{expr}b"`: every interpolation sees the template's input.
pub(super) fn check_template(parts: &[TemplatePart], shape: &Shape) -> Result<Checked, Diagnostic> {
    enum Part {
        Lit(Name),
        Expr(Action),
    }
    let parts = parts
        .iter()
        .map(|part| match part {
            TemplatePart::Lit(s) => Ok(Part::Lit(s.clone())),
            TemplatePart::Expr(expr) => Ok(Part::Expr(typecheck(expr, shape, &[])?.action)),
        })
        .collect::<Result<Vec<_>, Diagnostic>>()?;

    let action = Action::new(move |state, _| {
        let mut out = String::new();
        for part in &parts {
            match part {
                Part::Lit(s) => out.push_str(s),
                Part::Expr(action) => {
                    let rendered = action
                        .call(state.clone(), &[])
                        .force_value()
                        .and_then(|value| value.render());
                    match rendered {
                        Ok(text) => out.push_str(&text),
                        Err(err) => return Thunk::error(err),
                    }
                }
            }
        }
        Thunk::value(state.with_value(Value::str(&out)))
    });
    Ok(Checked::keeping(shape.with_type(Type::Str), action))
}

/// `[a, b; rest]`.
///
/// Elements are evaluated one at a time as the array is consumed. An
/// element typed `Void` is left out of the type and its drop is skipped;
/// any other element that drops is an `UnexpectedDrop`, so the tuple type
/// always has the length of the value.
pub(super) fn check_array(
    elems: &[Expr],
    rest: Option<&Expr>,
    shape: &Shape,
) -> Result<Checked, Diagnostic> {
    let mut types = Vec::with_capacity(elems.len());
    let mut actions = Vec::with_capacity(elems.len());
    for elem in elems {
        let checked = typecheck(elem, shape, &[])?;
        let skipped = checked.shape.ty.is_void();
        if !skipped {
            types.push(checked.shape.ty);
        }
        actions.push((checked.action, skipped));
    }
    let (tail_ty, rest) = match rest {
        Some(rest) => {
            let checked = typecheck(rest, shape, &[])?;
            if !checked.shape.ty.is_array() {
                return Err(rest_requires_array(rest.span, &checked.shape.ty));
            }
            (checked.shape.ty, Some(checked.action))
        }
        None => (Type::empty_arr(), None),
    };
    let actions: Rc<[(Action, bool)]> = actions.into();

    let action = Action::new(move |state, _| {
        let elems = Rc::clone(&actions);
        let rest = rest.clone();
        let input = state.clone();
        let mut next = 0;
        let mut tail: Option<ArrIter> = None;
        let items = stream(move || loop {
            if let Some(iter) = &mut tail {
                return iter.next().transpose();
            }
            if let Some((elem, skipped)) = elems.get(next) {
                next += 1;
                match elem.call(input.clone(), &[]).force() {
                    Outcome::Value(out) => return Ok(Some(out.value)),
                    Outcome::Drop if *skipped => continue,
                    Outcome::Drop => return Err(unexpected_drop()),
                    Outcome::Error(err) => return Err(err),
                }
            }
            match &rest {
                Some(rest) => tail = Some(rest.call(input.clone(), &[]).force_arr()?.iter()),
                None => return Ok(None),
            }
        });
        items.rescoped(state)
    });
    Ok(Checked::keeping(
        shape.with_type(Type::prefixed(types, tail_ty)),
        action,
    ))
}

/// `{a: x, b: y}`: a closed record whose fields are evaluated on first
/// read.
pub(super) fn check_record(fields: &[(Name, Expr)], shape: &Shape) -> Result<Checked, Diagnostic> {
    let mut props = BTreeMap::new();
    let mut actions = Vec::with_capacity(fields.len());
    for (key, expr) in fields {
        let checked = typecheck(expr, shape, &[])?;
        props.insert(key.clone(), checked.shape.ty);
        actions.push((key.clone(), checked.action));
    }

    let action = Action::new(move |state, _| {
        let fields = actions
            .iter()
            .map(|(key, action)| {
                let action = action.clone();
                let input = state.clone();
                let field = Thunk::pending(move || match action.call(input, &[]).force() {
                    Outcome::Drop => Thunk::error(unexpected_drop()),
                    other => Thunk::done(other),
                });
                (key.clone(), field)
            })
            .collect();
        Thunk::value(state.with_value(Value::Obj(ObjValue::new(fields))))
    });
    Ok(Checked::keeping(
        shape.with_type(Type::obj(props, Type::Void)),
        action,
    ))
}

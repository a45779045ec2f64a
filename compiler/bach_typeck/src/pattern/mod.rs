//! Patterns: static narrowing and run-time matchers.
//!
//! Checking a pattern against an input type partitions the type into the
//! part the pattern accepts and the complement, which is what the next
//! clause of a match gets to see. Each name the pattern binds becomes a
//! [`VariableFuncer`] typed by the narrowed part.

use std::collections::BTreeMap;
use std::rc::Rc;

use bach_diagnostic::{impossible_match, Diagnostic};
use bach_eval::{Action, BindingStack, Value, VarId, VarStack};
use bach_ir::{Pattern, PatternKind, Span};
use bach_types::{Name, Type};

use crate::{FuncerStack, Shape, VariableFuncer};

/// Tests a value and, on a match, returns the variable stack extended with
/// the pattern's bindings.
pub(crate) type Matcher =
    Rc<dyn Fn(&Value, &VarStack, &BindingStack) -> Result<Option<VarStack>, Diagnostic>>;

pub(crate) struct CheckedPattern {
    /// The part of the input type the pattern accepts.
    pub ty: Type,
    /// The part it rejects.
    pub complement: Type,
    /// Input funcers plus the pattern's bindings.
    pub funcers: FuncerStack,
    pub matcher: Matcher,
}

/// The type of all values `pattern` can accept, before looking at any input.
pub(crate) fn pattern_type(pattern: &Pattern) -> Type {
    match &pattern.kind {
        PatternKind::Type { ty, .. } => ty.clone(),
        PatternKind::Array { elems, rest, .. } => {
            let elems = elems.iter().map(pattern_type).collect();
            match rest {
                Some(rest) => Type::prefixed(elems, rest_type(rest)),
                None => Type::tuple(elems),
            }
        }
        PatternKind::Record { props, .. } => Type::obj(
            props
                .iter()
                .map(|(key, p)| (key.clone(), pattern_type(p)))
                .collect::<BTreeMap<_, _>>(),
            Type::Any,
        ),
    }
}

/// A rest pattern only ever sees arrays.
fn rest_type(rest: &Pattern) -> Type {
    Type::arr(Type::Any).partition(&pattern_type(rest)).0
}

pub(crate) fn check_pattern(pattern: &Pattern, shape: &Shape) -> Result<CheckedPattern, Diagnostic> {
    bach_stack::with_stack(|| {
        let whole = pattern_type(pattern);
        let (ty, complement) = shape.ty.partition(&whole);
        if ty.is_void() {
            return Err(impossible_match(pattern.span, &shape.ty, &whole));
        }
        let narrowed = shape.with_type(ty.clone());
        let (funcers, matcher) = match &pattern.kind {
            PatternKind::Type { ty: want, name } => {
                check_type(want, name.as_ref(), &narrowed, &shape.ty)
            }
            PatternKind::Array { elems, rest, name } => {
                check_array(elems, rest.as_deref(), name.as_ref(), &narrowed, pattern.span)?
            }
            PatternKind::Record { props, name } => {
                check_record(props, name.as_ref(), &narrowed, pattern.span)?
            }
        };
        Ok(CheckedPattern {
            ty,
            complement,
            funcers,
            matcher,
        })
    })
}

/// Push `name`, if any, bound to the narrowed type.
fn bind_name(name: Option<&Name>, shape: &Shape) -> (FuncerStack, Option<VarId>) {
    match name {
        Some(name) => {
            let id = VarId::fresh();
            let funcer = VariableFuncer::value(id, name.clone(), shape.ty.clone());
            (shape.funcers.push(Rc::new(funcer)), Some(id))
        }
        None => (shape.funcers.clone(), None),
    }
}

fn push_value(stack: &VarStack, id: Option<VarId>, value: &Value) -> VarStack {
    match id {
        Some(id) => stack.push(id, Action::constant(value.clone())),
        None => stack.clone(),
    }
}

/// `T name`. The membership test is skipped when the input type alone
/// guarantees it.
fn check_type(
    want: &Type,
    name: Option<&Name>,
    narrowed: &Shape,
    input: &Type,
) -> (FuncerStack, Matcher) {
    let (funcers, id) = bind_name(name, narrowed);
    let want = (!want.subsumes(input)).then(|| want.clone());
    let matcher: Matcher = Rc::new(move |value, stack, bindings| {
        if let Some(want) = &want {
            if !value.inhabits(want, bindings)? {
                return Ok(None);
            }
        }
        Ok(Some(push_value(stack, id, value)))
    });
    (funcers, matcher)
}

/// `[p1, p2; rest] name`.
fn check_array(
    elems: &[Pattern],
    rest: Option<&Pattern>,
    name: Option<&Name>,
    narrowed: &Shape,
    span: Span,
) -> Result<(FuncerStack, Matcher), Diagnostic> {
    let Some((elem_types, rest_ty)) = narrowed.ty.spread(elems.len()) else {
        return Err(impossible_match(span, &narrowed.ty, &Type::arr(Type::Any)));
    };

    let mut funcers = narrowed.funcers.clone();
    let mut elem_matchers = Vec::with_capacity(elems.len());
    for (elem, ty) in elems.iter().zip(elem_types) {
        let checked = check_pattern(elem, &Shape::new(ty, funcers))?;
        funcers = checked.funcers;
        elem_matchers.push(checked.matcher);
    }
    let rest_matcher = match rest {
        Some(rest) => {
            let checked = check_pattern(rest, &Shape::new(rest_ty, funcers))?;
            funcers = checked.funcers;
            Some(checked.matcher)
        }
        None => None,
    };
    let (funcers, id) = bind_name(name, &Shape::new(narrowed.ty.clone(), funcers));

    let matcher: Matcher = Rc::new(move |value, stack, bindings| {
        let Value::Arr(arr) = value else {
            return Ok(None);
        };
        let mut stack = stack.clone();
        let mut cur = arr.clone();
        for elem in &elem_matchers {
            let Some((head, tail)) = cur.uncons() else {
                return Ok(None);
            };
            let tail = tail.clone();
            match elem(head, &stack, bindings)? {
                Some(extended) => stack = extended,
                None => return Ok(None),
            }
            cur = tail.force_arr()?;
        }
        match &rest_matcher {
            Some(rest) => match rest(&Value::Arr(cur), &stack, bindings)? {
                Some(extended) => stack = extended,
                None => return Ok(None),
            },
            None if !cur.is_empty() => return Ok(None),
            None => {}
        }
        Ok(Some(push_value(&stack, id, value)))
    });
    Ok((funcers, matcher))
}

/// `{a: p1, b: p2} name`.
fn check_record(
    props: &[(Name, Pattern)],
    name: Option<&Name>,
    narrowed: &Shape,
    span: Span,
) -> Result<(FuncerStack, Matcher), Diagnostic> {
    let mut funcers = narrowed.funcers.clone();
    let mut prop_matchers = Vec::with_capacity(props.len());
    for (key, prop) in props {
        let Some(ty) = narrowed.ty.prop_type(key) else {
            return Err(impossible_match(span, &narrowed.ty, &pattern_type(prop)));
        };
        let checked = check_pattern(prop, &Shape::new(ty, funcers))?;
        funcers = checked.funcers;
        prop_matchers.push((key.clone(), checked.matcher));
    }
    let (funcers, id) = bind_name(name, &Shape::new(narrowed.ty.clone(), funcers));

    let matcher: Matcher = Rc::new(move |value, stack, bindings| {
        let Value::Obj(obj) = value else {
            return Ok(None);
        };
        let mut stack = stack.clone();
        for (key, prop) in &prop_matchers {
            let Some(field) = obj.get(key) else {
                return Ok(None);
            };
            let field = field.force_value()?;
            match prop(&field, &stack, bindings)? {
                Some(extended) => stack = extended,
                None => return Ok(None),
            }
        }
        Ok(Some(push_value(&stack, id, value)))
    });
    Ok((funcers, matcher))
}

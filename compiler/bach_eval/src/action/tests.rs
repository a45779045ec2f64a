#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::Cell;

use super::*;
use crate::{BindingStack, VarId, VarStack};
use pretty_assertions::assert_eq;

fn repr(outcome: Outcome) -> String {
    outcome.into_state().unwrap().value.repr().unwrap()
}

/// Pushes a variable, the way an assignment does.
fn binder(id: VarId) -> Action {
    Action::new(move |state, _| {
        let stack = state.stack.push(id, Action::constant(state.value.clone()));
        Thunk::value(State { stack, ..state })
    })
}

fn countdown() -> Action {
    Action::new(|state, _| match state.value {
        Value::Num(n) if n > 0.0 => Action::constant(Value::Num(n - 1.0))
            .then(&countdown(), false)
            .call(state, &[]),
        _ => Thunk::value(state),
    })
}

#[test]
fn test_constant_and_identity() {
    let input = State::of(Value::Num(3.0));
    assert_eq!(repr(Action::identity().run(input.clone())), "3");
    assert_eq!(repr(Action::constant(Value::Bool(false)).run(input)), "false");
}

#[test]
fn test_then_restores_input_scope() {
    let id = VarId::fresh();
    let probe = Action::new(move |state, _| {
        Thunk::value(state.with_value(Value::Bool(state.stack.lookup(id).is_some())))
    });

    let scoped = binder(id).then(&probe, false);
    assert_eq!(repr(scoped.run(State::of(Value::Null))), "false");

    let kept = binder(id).then(&probe, true);
    assert_eq!(repr(kept.run(State::of(Value::Null))), "true");
}

#[test]
fn test_then_skips_right_after_drop() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let right = Action::new(move |state, _| {
        counter.set(counter.get() + 1);
        Thunk::value(state)
    });
    let dropper = Action::new(|_, _| Thunk::drop());

    assert!(matches!(dropper.then(&right, false).run(State::of(Value::Null)), Outcome::Drop));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_args_reach_only_the_right_side() {
    let count_args = |tag: f64| {
        Action::new(move |state, args: &[Action]| {
            let n = tag * 10.0 + f64::from(u32::try_from(args.len()).unwrap());
            Thunk::value(state.with_value(Value::Num(n)))
        })
    };
    let composed = count_args(1.0).then(&count_args(2.0), false);
    let out = composed.call(State::of(Value::Null), &[Action::identity(), Action::identity()]);
    assert_eq!(repr(out.force()), "22");
}

#[test]
fn test_tail_recursive_action_runs_in_constant_stack() {
    let out = countdown().run(State {
        value: Value::Num(100_000.0),
        stack: VarStack::new(),
        bindings: BindingStack::new(),
    });
    assert_eq!(repr(out), "0");
}

#[test]
fn test_closed_over_runs_in_captured_scope() {
    let id = VarId::fresh();
    let caller = State {
        value: Value::Null,
        stack: VarStack::new().push(id, Action::constant(Value::Num(7.0))),
        bindings: BindingStack::new(),
    };
    let lookup = Action::new(move |state, _| match state.stack.lookup(id) {
        Some(found) => found.call(state.clone(), &[]),
        None => Thunk::value(state.with_value(Value::str("missing"))),
    });

    let arg = lookup.closed_over(&caller);
    assert_eq!(repr(arg.run(State::of(Value::Bool(true)))), "7");
    assert_eq!(repr(lookup.run(State::of(Value::Bool(true)))), "\"missing\"");
}

#[test]
fn test_in_input_scope_discards_inner_bindings() {
    let id = VarId::fresh();
    let probe = Action::new(move |state, _| {
        Thunk::value(state.with_value(Value::Bool(state.stack.lookup(id).is_some())))
    });
    let leaky = binder(id).then(&Action::identity(), true);

    let kept = leaky.then(&probe, true);
    assert_eq!(repr(kept.run(State::of(Value::Null))), "true");

    let sealed = leaky.in_input_scope().then(&probe, true);
    assert_eq!(repr(sealed.run(State::of(Value::Null))), "false");
}

use std::fmt;
use std::rc::Rc;

use crate::{Outcome, State, Thunk, Value};

/// The run-time half of a typechecked expression: a function from an input
/// state to a thunk of the output state.
///
/// The argument slice carries actions for parameters the expression still
/// expects from its caller (a bare `+` passed where a one-argument function
/// is wanted receives its argument this way).
#[derive(Clone)]
pub struct Action(Rc<dyn Fn(State, &[Action]) -> Thunk>);

impl Action {
    pub fn new(f: impl Fn(State, &[Action]) -> Thunk + 'static) -> Self {
        Action(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, state: State, args: &[Action]) -> Thunk {
        (self.0)(state, args)
    }

    pub fn identity() -> Self {
        Action::new(|state, _| Thunk::value(state))
    }

    /// Replace the input value by `value`, keeping the scope.
    pub fn constant(value: Value) -> Self {
        Action::new(move |state, _| Thunk::value(state.with_value(value.clone())))
    }

    /// Sequence `self` then `next`.
    ///
    /// The left side runs with no arguments and is forced before `next`
    /// starts; `next` runs in the input scope unless `keep_stack` is set,
    /// which is how bindings introduced by the left side (assignments,
    /// definitions) become visible to the right. Drops and errors skip
    /// `next`.
    #[must_use]
    pub fn then(&self, next: &Action, keep_stack: bool) -> Action {
        let left = self.clone();
        let right = next.clone();
        Action::new(move |state, args| {
            let left = left.clone();
            let right = right.clone();
            let args = args.to_vec();
            Thunk::pending(move || match left.call(state.clone(), &[]).force() {
                Outcome::Value(out) => {
                    let input = if keep_stack {
                        out
                    } else {
                        State {
                            value: out.value,
                            stack: state.stack,
                            bindings: state.bindings,
                        }
                    };
                    right.call(input, &args)
                }
                Outcome::Drop => Thunk::drop(),
                Outcome::Error(err) => Thunk::error(err),
            })
        })
    }

    /// Run in the scope of `scope` whatever value the caller supplies.
    ///
    /// Arguments are closed over the scope of the call that passes them,
    /// since the callee invokes them from inside its own body.
    #[must_use]
    pub fn closed_over(&self, scope: &State) -> Action {
        let inner = self.clone();
        let stack = scope.stack.clone();
        let bindings = scope.bindings.clone();
        Action::new(move |state, args| {
            inner.call(
                State {
                    value: state.value,
                    stack: stack.clone(),
                    bindings: bindings.clone(),
                },
                args,
            )
        })
    }

    /// Like `self`, but the output carries the input scope instead of
    /// whatever scope `self` finished in.
    #[must_use]
    pub fn in_input_scope(&self) -> Action {
        let inner = self.clone();
        Action::new(move |state, args| {
            let scope = state.clone();
            inner.call(state, args).rescoped(scope)
        })
    }

    /// Run `self` on `input` to completion.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, input: State) -> Outcome {
        self.call(input, &[]).force()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[cfg(test)]
mod tests;

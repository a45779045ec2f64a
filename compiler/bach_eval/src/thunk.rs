//! Memoizing suspensions and the trampoline that forces them.
//!
//! A thunk is either resolved or holds a continuation returning the next
//! thunk. `force` follows continuations in a loop, so a tail call (an action
//! whose last step is another action) costs one loop iteration instead of a
//! native stack frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bach_diagnostic::{internal, unexpected_drop, Diagnostic};
use smallvec::SmallVec;

use crate::{ArrValue, State, Value};

/// How a forced thunk resolved.
#[derive(Clone)]
pub enum Outcome {
    Value(State),
    /// The value was dropped from the pipeline.
    Drop,
    Error(Diagnostic),
}

impl Outcome {
    /// The state, treating a drop as an error.
    pub fn into_state(self) -> Result<State, Diagnostic> {
        match self {
            Outcome::Value(state) => Ok(state),
            Outcome::Drop => Err(unexpected_drop()),
            Outcome::Error(err) => Err(err),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(state) => write!(f, "Value({:?})", state.value),
            Outcome::Drop => f.write_str("Drop"),
            Outcome::Error(err) => write!(f, "Error({:?})", err.code),
        }
    }
}

type Continuation = Box<dyn FnOnce() -> Thunk>;

enum ThunkState {
    Pending(Continuation),
    Forcing,
    Done(Outcome),
}

/// A shared, memoizing suspended computation.
#[derive(Clone)]
pub struct Thunk(Rc<RefCell<ThunkState>>);

impl Thunk {
    pub fn done(outcome: Outcome) -> Self {
        Thunk(Rc::new(RefCell::new(ThunkState::Done(outcome))))
    }

    pub fn value(state: State) -> Self {
        Thunk::done(Outcome::Value(state))
    }

    pub fn error(err: Diagnostic) -> Self {
        Thunk::done(Outcome::Error(err))
    }

    pub fn drop() -> Self {
        Thunk::done(Outcome::Drop)
    }

    /// Defer `k` until the thunk is forced.
    pub fn pending(k: impl FnOnce() -> Thunk + 'static) -> Self {
        Thunk(Rc::new(RefCell::new(ThunkState::Pending(Box::new(k)))))
    }

    pub fn is_done(&self) -> bool {
        matches!(*self.0.borrow(), ThunkState::Done(_))
    }

    /// Run continuations until one resolves, then memoize the outcome.
    ///
    /// Intermediate thunks that nobody else holds are discarded as the loop
    /// advances; shared ones are remembered and resolved together with this
    /// one so they are never run twice.
    pub fn force(&self) -> Outcome {
        let mut shared: SmallVec<[Thunk; 4]> = SmallVec::new();
        let mut cur = self.clone();
        let outcome = loop {
            let state = std::mem::replace(&mut *cur.0.borrow_mut(), ThunkState::Forcing);
            match state {
                ThunkState::Done(outcome) => {
                    *cur.0.borrow_mut() = ThunkState::Done(outcome.clone());
                    break outcome;
                }
                ThunkState::Forcing => {
                    break Outcome::Error(internal("thunk depends on its own value"));
                }
                ThunkState::Pending(k) => {
                    let next = bach_stack::with_stack(k);
                    if Rc::ptr_eq(&cur.0, &self.0) || Rc::strong_count(&cur.0) > 1 {
                        shared.push(cur);
                    }
                    cur = next;
                }
            }
        };
        for thunk in shared {
            *thunk.0.borrow_mut() = ThunkState::Done(outcome.clone());
        }
        outcome
    }

    pub fn force_state(&self) -> Result<State, Diagnostic> {
        self.force().into_state()
    }

    pub fn force_value(&self) -> Result<Value, Diagnostic> {
        Ok(self.force_state()?.value)
    }

    /// The same outcome, but a value carries `scope` instead of the scope it
    /// was produced in.
    #[must_use]
    pub fn rescoped(self, scope: State) -> Thunk {
        Thunk::pending(move || match self.force() {
            Outcome::Value(done) => Thunk::value(scope.with_value(done.value)),
            other => Thunk::done(other),
        })
    }

    /// Force a thunk known to hold an array.
    pub fn force_arr(&self) -> Result<ArrValue, Diagnostic> {
        match self.force_value()? {
            Value::Arr(arr) => Ok(arr),
            other => Err(internal(format!("expected an array, got {}", other.kind()))),
        }
    }

    /// The array this thunk resolved to, if nothing else holds the thunk.
    pub(crate) fn into_unique_arr(self) -> Option<ArrValue> {
        let cell = Rc::try_unwrap(self.0).ok()?;
        match cell.into_inner() {
            ThunkState::Done(Outcome::Value(State {
                value: Value::Arr(arr),
                ..
            })) => Some(arr),
            _ => None,
        }
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            ThunkState::Pending(_) => f.write_str("Thunk(<pending>)"),
            ThunkState::Forcing => f.write_str("Thunk(<forcing>)"),
            ThunkState::Done(outcome) => write!(f, "Thunk({outcome:?})"),
        }
    }
}

//! Arrays produced one element at a time.
//!
//! A stream pairs a single producer with the single consumer that forces
//! the array's tails. Each forced tail runs the producer exactly once, so at
//! most one element is in flight and an abandoned consumer simply stops
//! pulling.

use std::cell::RefCell;
use std::rc::Rc;

use bach_diagnostic::{internal, Diagnostic};

use crate::{ArrValue, State, Thunk, Value};

type Producer = Rc<RefCell<dyn FnMut() -> Result<Option<Value>, Diagnostic>>>;

/// A thunk of the array whose elements `producer` yields, in order, until it
/// returns `Ok(None)`. An error ends the array with that error.
pub fn stream(producer: impl FnMut() -> Result<Option<Value>, Diagnostic> + 'static) -> Thunk {
    let producer: Producer = Rc::new(RefCell::new(producer));
    next_cell(producer)
}

fn next_cell(producer: Producer) -> Thunk {
    Thunk::pending(move || {
        let item = match producer.try_borrow_mut() {
            Ok(mut produce) => (&mut *produce)(),
            Err(_) => Err(internal("stream producer re-entered while producing")),
        };
        match item {
            Ok(Some(value)) => {
                tracing::trace!(?value, "stream element");
                let tail = next_cell(producer);
                Thunk::value(State::of(Value::Arr(ArrValue::cons(value, tail))))
            }
            Ok(None) => Thunk::value(State::of(Value::Arr(ArrValue::empty()))),
            Err(err) => Thunk::error(err),
        }
    })
}

/// A producer pulling elements from `arr`, for operations that consume one
/// array while producing another.
pub fn elements(arr: &ArrValue) -> impl FnMut() -> Result<Option<Value>, Diagnostic> {
    let mut iter = arr.iter();
    move || iter.next().transpose()
}

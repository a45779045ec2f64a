//! Lazy evaluation core for Bach.
//!
//! Typechecking turns every expression into an [`Action`]: a function from
//! an input [`State`] to a [`Thunk`] of the output state. Nothing runs until
//! a thunk is forced, and forcing is a trampoline, so tail calls in Bach
//! programs run in constant native stack.
//!
//! # Architecture
//!
//! - [`Value`]: run-time values; arrays are lazy cons lists and record
//!   fields are thunks
//! - [`Thunk`] / [`Outcome`]: memoizing suspensions resolving to a state,
//!   a drop signal, or an error
//! - [`Action`]: composable run-time halves of typechecked expressions
//! - [`State`]: the current value plus the variable and type-binding stacks
//! - [`stream`]: one-element-at-a-time array production

mod action;
mod state;
mod stream;
mod thunk;
mod value;

pub use action::Action;
pub use state::{BindingStack, State, VarId, VarStack};
pub use stream::{elements, stream};
pub use thunk::{Outcome, Thunk};
pub use value::{ArrIter, ArrValue, ObjValue, Value};

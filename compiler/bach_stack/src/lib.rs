//! On-demand stack growth.
//!
//! The parser and typechecker recurse over the expression tree, and
//! evaluation recurses whenever a value is needed before the current
//! computation can continue (a condition, an argument, an array element).
//! Tail calls do not recurse; everything else may nest as deep as the
//! program does. Those recursion points go through [`with_stack`], which
//! switches to a freshly allocated segment when the current one runs low.
//!
//! On `wasm32` the closure is called directly.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

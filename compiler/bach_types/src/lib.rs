//! Structural type algebra for Bach.
//!
//! Types are shapes rather than named classes: primitives, arrays and tuples,
//! open or closed records, unions and bounded type variables. Every operation
//! the interpreter needs from its type system lives here:
//!
//! - [`Type::subsumes`]: the structural supertype test that drives overload
//!   resolution and argument checking
//! - [`Type::partition`]: intersection/complement splitting that types
//!   pattern-matching branches and detects unreachable or missing clauses
//! - [`Type::bind`] and [`Type::instantiate`]: generic parameter matching
//! - [`Type::element_type`], [`Type::spread`], [`Type::prop_type`]: access to
//!   the parts of sequence and record types
//! - [`Parameter::subsumes`]: compatibility of function-valued arguments
//!
//! Types are immutable and structurally shared through `Rc`; cloning a type
//! is cheap.

mod access;
mod bind;
mod display;
mod param;
mod partition;
mod subsumes;
mod ty;
mod union;

pub use bind::Bindings;
pub use display::{is_plain_key, write_key, write_quoted};
pub use param::{signature_vars, Parameter};
pub use ty::{Name, ObjType, Type, VarType};

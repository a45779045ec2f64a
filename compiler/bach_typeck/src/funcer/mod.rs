//! Funcers: every named operation a call can resolve to.
//!
//! Builtins, user definitions, parameters and pattern-bound names all sit
//! on the same [`FuncerStack`](crate::FuncerStack) and answer the same
//! question: given the input type, a name and an argument count, do you
//! apply, and under which type-variable bindings?

mod builtin;
mod definition;
mod variable;

use std::fmt;

use bach_eval::Action;
use bach_types::{signature_vars, Bindings, Name, Parameter, Type};

pub use builtin::{BuiltinFuncer, Kernel, OutputFn};
pub use definition::DefinitionFuncer;
pub(crate) use definition::define;
pub use variable::VariableFuncer;

/// `for input name(params) output`.
#[derive(Clone, PartialEq, Debug)]
pub struct Signature {
    pub input: Type,
    pub name: Name,
    pub params: Vec<Parameter>,
    pub output: Type,
}

impl Signature {
    pub fn new(input: Type, name: impl Into<Name>, params: Vec<Parameter>, output: Type) -> Self {
        Signature {
            input,
            name: name.into(),
            params,
            output,
        }
    }

    /// Every type variable of the signature bound to `Void`, the starting
    /// point for binding a call against it.
    pub fn seed_bindings(&self) -> Bindings {
        signature_vars(&self.input, &self.params, &self.output)
            .into_iter()
            .map(|name| (name, Type::Void))
            .collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for {} {}", self.input, self.name)?;
        if !self.params.is_empty() {
            f.write_str("(")?;
            for (i, p) in self.params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{p}")?;
            }
            f.write_str(")")?;
        }
        write!(f, " {}", self.output)
    }
}

pub trait Funcer {
    fn signature(&self) -> &Signature;

    /// Bindings under which this funcer accepts a call of `name` with
    /// `arity` arguments on input type `input`, or `None` to decline.
    fn try_match(&self, input: &Type, name: &str, arity: usize) -> Option<Bindings> {
        let sig = self.signature();
        if *sig.name != *name || sig.params.len() != arity {
            return None;
        }
        let mut bindings = sig.seed_bindings();
        sig.input.bind(input, &mut bindings).then_some(bindings)
    }

    /// Output type of a matched call once all arguments are bound.
    fn output_type(&self, _input: &Type, bindings: &Bindings) -> Type {
        self.signature().output.instantiate(bindings)
    }

    /// The action performing a matched call.
    ///
    /// It receives the call's input state and one ready-to-run action per
    /// parameter. `frame` holds what the signature's type variables were
    /// bound to at the call site.
    fn action(&self, frame: &Bindings) -> Action;

    /// Whether the action's output keeps the scope of its input.
    fn keeps_scope(&self) -> bool {
        false
    }
}

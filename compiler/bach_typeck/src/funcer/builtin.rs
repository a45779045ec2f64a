use std::rc::Rc;

use bach_diagnostic::Diagnostic;
use bach_eval::{Action, Outcome, State, Thunk, Value};
use bach_types::{Bindings, Name, Parameter, Type};

use super::{Funcer, Signature};

/// Computes the output type from the call's input type, for operations whose
/// result cannot be written as a signature.
pub type OutputFn = fn(&Type) -> Type;

type ValueKernel = dyn Fn(&Value, &[Value]) -> Result<Value, Diagnostic>;
type ActionKernel = dyn Fn(&State, &[Action]) -> Outcome;

/// The run-time half of a builtin.
#[derive(Clone)]
pub enum Kernel {
    /// Arguments are evaluated against the call's input value first.
    Value(Rc<ValueKernel>),
    /// Arguments are passed as actions, for operations that call them per
    /// element or not at all.
    Action(Rc<ActionKernel>),
}

/// An operation provided by the interpreter.
#[derive(Clone)]
pub struct BuiltinFuncer {
    signature: Signature,
    output_of: Option<OutputFn>,
    kernel: Kernel,
}

impl BuiltinFuncer {
    pub fn value(
        input: Type,
        name: impl Into<Name>,
        params: Vec<Parameter>,
        output: Type,
        kernel: impl Fn(&Value, &[Value]) -> Result<Value, Diagnostic> + 'static,
    ) -> Self {
        BuiltinFuncer {
            signature: Signature::new(input, name, params, output),
            output_of: None,
            kernel: Kernel::Value(Rc::new(kernel)),
        }
    }

    pub fn action(
        input: Type,
        name: impl Into<Name>,
        params: Vec<Parameter>,
        output: Type,
        kernel: impl Fn(&State, &[Action]) -> Outcome + 'static,
    ) -> Self {
        BuiltinFuncer {
            signature: Signature::new(input, name, params, output),
            output_of: None,
            kernel: Kernel::Action(Rc::new(kernel)),
        }
    }

    /// Derive the output type from the input type instead of the signature.
    #[must_use]
    pub fn with_output_of(mut self, output_of: OutputFn) -> Self {
        self.output_of = Some(output_of);
        self
    }
}

impl Funcer for BuiltinFuncer {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn output_type(&self, input: &Type, bindings: &Bindings) -> Type {
        match self.output_of {
            Some(output_of) => output_of(input),
            None => self.signature.output.instantiate(bindings),
        }
    }

    fn action(&self, _frame: &Bindings) -> Action {
        match &self.kernel {
            Kernel::Value(kernel) => {
                let kernel = Rc::clone(kernel);
                Action::new(move |state, args| {
                    let mut values = Vec::with_capacity(args.len());
                    for arg in args {
                        match arg.call(state.clone(), &[]).force_value() {
                            Ok(value) => values.push(value),
                            Err(err) => return Thunk::error(err),
                        }
                    }
                    match kernel(&state.value, &values) {
                        Ok(value) => Thunk::value(state.with_value(value)),
                        Err(err) => Thunk::error(err),
                    }
                })
            }
            Kernel::Action(kernel) => {
                let kernel = Rc::clone(kernel);
                Action::new(move |state, args| match kernel(&state, args) {
                    Outcome::Value(out) => Thunk::value(state.with_value(out.value)),
                    other => Thunk::done(other),
                })
            }
        }
    }

    fn keeps_scope(&self) -> bool {
        true
    }
}

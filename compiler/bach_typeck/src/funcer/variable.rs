use bach_diagnostic::internal;
use bach_eval::{Action, Thunk, VarId};
use bach_types::{Bindings, Name, Parameter, Type};

use super::{Funcer, Signature};

/// A name bound by a pattern or a definition's parameter.
///
/// Its run-time action lives on the variable stack under `id`: a constant
/// for pattern bindings, the caller's argument for parameters.
pub struct VariableFuncer {
    signature: Signature,
    id: VarId,
}

impl VariableFuncer {
    /// A value bound by a pattern.
    pub fn value(id: VarId, name: Name, ty: Type) -> Self {
        VariableFuncer {
            signature: Signature::new(Type::Any, name, Vec::new(), ty),
            id,
        }
    }

    /// A named parameter of a definition.
    pub fn param(id: VarId, name: Name, param: &Parameter) -> Self {
        VariableFuncer {
            signature: Signature::new(
                param.input.clone(),
                name,
                param.params.clone(),
                param.output.clone(),
            ),
            id,
        }
    }
}

impl Funcer for VariableFuncer {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn action(&self, _frame: &Bindings) -> Action {
        let id = self.id;
        let name = self.signature.name.clone();
        Action::new(move |state, args| match state.stack.lookup(id).cloned() {
            Some(bound) => bound.call(state, args),
            None => Thunk::error(internal(format!("variable `{name}` is not in scope"))),
        })
    }
}

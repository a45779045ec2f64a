use std::rc::Rc;

use bach_diagnostic::internal;
use bach_eval::{Action, BindingStack, State, Thunk, VarId, VarStack};
use bach_types::Bindings;

use super::{Funcer, Signature};

/// A user definition: `for I def name(params) O as body ok`.
///
/// The definition node pushes a closure under `id` when it runs; calls look
/// the closure up there, so the body always sees the scope it was written
/// in.
pub struct DefinitionFuncer {
    signature: Signature,
    id: VarId,
}

impl DefinitionFuncer {
    pub fn new(signature: Signature, id: VarId) -> Self {
        DefinitionFuncer { signature, id }
    }
}

impl Funcer for DefinitionFuncer {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn action(&self, frame: &Bindings) -> Action {
        let id = self.id;
        let name = self.signature.name.clone();
        let frame = frame.clone();
        Action::new(move |state, args| {
            let Some(closure) = state.stack.lookup(id).cloned() else {
                return Thunk::error(internal(format!("definition `{name}` is not in scope")));
            };
            let resolved = state.bindings.resolve_frame(&frame);
            let bindings = state.bindings.push(resolved);
            closure.call(
                State {
                    value: state.value,
                    stack: state.stack,
                    bindings,
                },
                args,
            )
        })
    }
}

/// A definition captured together with the scope it was evaluated in.
struct Closure {
    id: VarId,
    params: Rc<[VarId]>,
    body: Action,
    stack: VarStack,
    bindings: BindingStack,
}

/// The action of a definition node: bind a closure over the current scope
/// and pass the value through.
pub(crate) fn define(id: VarId, params: Vec<VarId>, body: Action) -> Action {
    let params: Rc<[VarId]> = params.into();
    Action::new(move |state, _| {
        let closure = Rc::new(Closure {
            id,
            params: Rc::clone(&params),
            body: body.clone(),
            stack: state.stack.clone(),
            bindings: state.bindings.clone(),
        });
        let stack = state.stack.push(id, invoke(closure));
        Thunk::value(State { stack, ..state })
    })
}

/// Calling a closure: the top binding frame of the caller holds the call
/// site's type bindings, the arguments are already closed over the caller.
fn invoke(closure: Rc<Closure>) -> Action {
    Action::new(move |state, args| {
        if args.len() != closure.params.len() {
            return Thunk::error(internal(format!(
                "definition called with {} arguments, expects {}",
                args.len(),
                closure.params.len()
            )));
        }
        let mut stack = closure.stack.push(closure.id, invoke(Rc::clone(&closure)));
        for (id, arg) in closure.params.iter().zip(args) {
            stack = stack.push(*id, arg.clone());
        }
        let bindings = match state.bindings.top() {
            Some(frame) if !frame.is_empty() => closure.bindings.push(frame.clone()),
            _ => closure.bindings.clone(),
        };
        closure.body.call(
            State {
                value: state.value,
                stack,
                bindings,
            },
            &[],
        )
    })
}

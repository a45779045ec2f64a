//! Run-time state threaded through actions.
//!
//! Both stacks are persistent singly-linked lists: pushing returns a new
//! stack and leaves the old one valid, so closures capture a stack simply by
//! cloning its head pointer.

use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use bach_types::{Bindings, Type};

use crate::{Action, Value};

/// Identity of a run-time variable: a definition, a parameter, or a
/// pattern-bound name. Assigned once, at typecheck time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarId(u32);

impl VarId {
    /// A variable id never handed out before.
    pub fn fresh() -> VarId {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        VarId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Variables visible to an action, most recent first.
#[derive(Clone, Default)]
pub struct VarStack(Option<Rc<VarNode>>);

struct VarNode {
    id: VarId,
    action: Action,
    next: VarStack,
}

impl VarStack {
    pub fn new() -> Self {
        VarStack(None)
    }

    #[must_use]
    pub fn push(&self, id: VarId, action: Action) -> VarStack {
        VarStack(Some(Rc::new(VarNode {
            id,
            action,
            next: self.clone(),
        })))
    }

    /// The action bound to `id`, searching from the top.
    pub fn lookup(&self, id: VarId) -> Option<&Action> {
        let mut cur = self.0.as_deref();
        while let Some(node) = cur {
            if node.id == id {
                return Some(&node.action);
            }
            cur = node.next.0.as_deref();
        }
        None
    }

    pub fn len(&self) -> usize {
        let mut n = 0;
        let mut cur = self.0.as_deref();
        while let Some(node) = cur {
            n += 1;
            cur = node.next.0.as_deref();
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl Drop for VarStack {
    // Unlink uniquely owned nodes one at a time so long stacks do not drop
    // recursively.
    fn drop(&mut self) {
        let mut cur = self.0.take();
        while let Some(node) = cur {
            match Rc::try_unwrap(node) {
                Ok(mut node) => cur = node.next.0.take(),
                Err(_) => break,
            }
        }
    }
}

/// What each generic type variable was bound to at the calls that are
/// currently executing, innermost first.
///
/// Values do not carry types, so membership tests against a type variable
/// look the variable up here.
#[derive(Clone, Default)]
pub struct BindingStack(Option<Rc<BindingNode>>);

struct BindingNode {
    frame: Bindings,
    next: BindingStack,
}

impl BindingStack {
    pub fn new() -> Self {
        BindingStack(None)
    }

    #[must_use]
    pub fn push(&self, frame: Bindings) -> BindingStack {
        BindingStack(Some(Rc::new(BindingNode {
            frame,
            next: self.clone(),
        })))
    }

    /// The innermost frame.
    pub fn top(&self) -> Option<&Bindings> {
        self.0.as_deref().map(|node| &node.frame)
    }

    /// The type `name` is bound to in the innermost frame that binds it.
    pub fn lookup(&self, name: &str) -> Option<&Type> {
        let mut cur = self.0.as_deref();
        while let Some(node) = cur {
            if let Some(ty) = node.frame.get(name) {
                return Some(ty);
            }
            cur = node.next.0.as_deref();
        }
        None
    }

    /// Replace every bound variable in `ty` by what it is bound to here.
    pub fn resolve(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        let mut cur = self.0.as_deref();
        while let Some(node) = cur {
            if !ty.has_vars() {
                break;
            }
            ty = ty.instantiate(&node.frame);
            cur = node.next.0.as_deref();
        }
        ty
    }

    /// Resolve every type in `frame` against this stack.
    pub fn resolve_frame(&self, frame: &Bindings) -> Bindings {
        frame
            .iter()
            .map(|(name, ty)| (name.clone(), self.resolve(ty)))
            .collect()
    }
}

/// Input and output of every action.
#[derive(Clone)]
pub struct State {
    pub value: Value,
    pub stack: VarStack,
    pub bindings: BindingStack,
}

impl State {
    /// A state holding `value` with nothing in scope.
    pub fn of(value: Value) -> Self {
        State {
            value,
            stack: VarStack::new(),
            bindings: BindingStack::new(),
        }
    }

    /// The same scope, holding a different value.
    #[must_use]
    pub fn with_value(&self, value: Value) -> Self {
        State {
            value,
            stack: self.stack.clone(),
            bindings: self.bindings.clone(),
        }
    }
}

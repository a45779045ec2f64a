//! Shapes: the static state threaded through typechecking.

use std::fmt;
use std::rc::Rc;

use bach_types::Type;

use crate::Funcer;

/// The type of the current value together with the funcers in scope.
#[derive(Clone)]
pub struct Shape {
    pub ty: Type,
    pub funcers: FuncerStack,
}

impl Shape {
    pub fn new(ty: Type, funcers: FuncerStack) -> Self {
        Shape { ty, funcers }
    }

    /// Same funcers, different type.
    #[must_use]
    pub fn with_type(&self, ty: Type) -> Shape {
        Shape {
            ty,
            funcers: self.funcers.clone(),
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({}, {} funcers)", self.ty, self.funcers.len())
    }
}

/// Visible funcers, most recently pushed first.
///
/// Persistent: pushing returns a new stack sharing the old one as its tail,
/// so a definition keeps seeing exactly the funcers that were in scope where
/// it was written.
#[derive(Clone, Default)]
pub struct FuncerStack(Option<Rc<FuncerNode>>);

struct FuncerNode {
    funcer: Rc<dyn Funcer>,
    next: FuncerStack,
}

impl FuncerStack {
    pub fn new() -> Self {
        FuncerStack(None)
    }

    #[must_use]
    pub fn push(&self, funcer: Rc<dyn Funcer>) -> FuncerStack {
        FuncerStack(Some(Rc::new(FuncerNode {
            funcer,
            next: self.clone(),
        })))
    }

    /// Push every funcer of `funcers` in order, so the last ends on top.
    #[must_use]
    pub fn extend(&self, funcers: impl IntoIterator<Item = Rc<dyn Funcer>>) -> FuncerStack {
        funcers
            .into_iter()
            .fold(self.clone(), |stack, funcer| stack.push(funcer))
    }

    /// Funcers from the top down.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Funcer>> {
        let mut cur = self.0.as_deref();
        std::iter::from_fn(move || {
            let node = cur?;
            cur = node.next.0.as_deref();
            Some(&node.funcer)
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl Drop for FuncerStack {
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

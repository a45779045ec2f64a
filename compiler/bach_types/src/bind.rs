//! Matching generic types against concrete ones.

use rustc_hash::FxHashMap;

use crate::{Name, Type};

/// Type each variable has been bound to so far.
pub type Bindings = FxHashMap<Name, Type>;

impl Type {
    /// Structurally match `other` against `self`, recording in `bindings`
    /// the types that flow into each variable of `self`.
    ///
    /// A variable accumulates the union of everything bound to it and
    /// rejects anything outside its bound. On failure `bindings` may hold
    /// partial results; callers that backtrack should bind into a copy.
    pub fn bind(&self, other: &Type, bindings: &mut Bindings) -> bool {
        match (self, other) {
            (_, Type::Void) => true,
            (Type::Var(v), _) => {
                if !v.bound.subsumes(other) {
                    return false;
                }
                let bound = match bindings.get(&v.name) {
                    Some(prev) => prev.or(other),
                    None => other.clone(),
                };
                bindings.insert(v.name.clone(), bound);
                true
            }
            _ if !self.has_vars() => self.subsumes(other),
            (_, Type::Union(ds)) => ds.iter().all(|d| self.bind(d, bindings)),
            (Type::Union(ds), _) => {
                if ds.iter().any(|d| !d.has_vars() && d.subsumes(other)) {
                    return true;
                }
                for d in ds.iter().filter(|d| d.has_vars()) {
                    let mut attempt = bindings.clone();
                    if d.bind(other, &mut attempt) {
                        *bindings = attempt;
                        return true;
                    }
                }
                false
            }
            (Type::Arr(e), Type::Arr(e2)) => e.bind(e2, bindings),
            (Type::Arr(e), Type::Nearr(h, t)) => e.bind(h, bindings) && self.bind(t, bindings),
            (Type::Nearr(h, t), Type::Nearr(h2, t2)) => {
                h.bind(h2, bindings) && t.bind(t2, bindings)
            }
            (Type::Obj(a), Type::Obj(b)) => {
                a.props.iter().all(|(key, ty)| {
                    b.props
                        .get(key)
                        .is_some_and(|other_ty| ty.bind(other_ty, bindings))
                }) && b
                    .props
                    .iter()
                    .filter(|(key, _)| !a.props.contains_key(*key))
                    .all(|(_, other_ty)| a.rest.bind(other_ty, bindings))
                    && a.rest.bind(&b.rest, bindings)
            }
            (Type::Any, _) => true,
            _ => false,
        }
    }

    /// Substitute bound variables. Unbound variables are left in place.
    pub fn instantiate(&self, bindings: &Bindings) -> Type {
        if bindings.is_empty() || !self.has_vars() {
            return self.clone();
        }
        match self {
            Type::Var(v) => bindings.get(&v.name).cloned().unwrap_or_else(|| self.clone()),
            Type::Arr(e) => Type::arr(e.instantiate(bindings)),
            Type::Nearr(h, t) => Type::nearr(h.instantiate(bindings), t.instantiate(bindings)),
            Type::Obj(o) => Type::obj(
                o.props
                    .iter()
                    .map(|(key, ty)| (key.clone(), ty.instantiate(bindings)))
                    .collect(),
                o.rest.instantiate(bindings),
            ),
            Type::Union(ds) => Type::union(ds.iter().map(|d| d.instantiate(bindings))),
            Type::Void | Type::Null | Type::Bool | Type::Num | Type::Str | Type::Any => {
                self.clone()
            }
        }
    }
}

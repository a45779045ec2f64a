//! The structural supertype relation.

use crate::Type;

/// How many times a union may split the other side into cases before
/// giving up. Splitting arrays is unbounded otherwise.
const SPLIT_FUEL: u32 = 6;

impl Type {
    /// Whether every value of `other` is also a value of `self`.
    pub fn subsumes(&self, other: &Type) -> bool {
        self.subsumes_with(other, SPLIT_FUEL)
    }

    fn subsumes_with(&self, other: &Type, fuel: u32) -> bool {
        match (self, other) {
            (_, Type::Void) => true,
            (_, Type::Union(ds)) => ds.iter().all(|d| self.subsumes_with(d, fuel)),
            (Type::Any, _) => true,
            (Type::Var(a), Type::Var(b)) if a.name == b.name && a.bound.subsumes_with(&b.bound, fuel) => {
                true
            }
            (Type::Union(ds), _) if ds.iter().any(|d| d.subsumes_with(other, fuel)) => true,
            (_, Type::Var(v)) => self.subsumes_with(&v.bound, fuel),
            (Type::Union(_), _) => {
                fuel > 0
                    && other.splits().iter().any(|cases| {
                        cases.iter().all(|case| self.subsumes_with(case, fuel - 1))
                    })
            }

            (Type::Null, Type::Null)
            | (Type::Bool, Type::Bool)
            | (Type::Num, Type::Num)
            | (Type::Str, Type::Str) => true,

            (Type::Arr(e), Type::Arr(e2)) => e.subsumes_with(e2, fuel),
            (Type::Arr(e), Type::Nearr(h, t)) => {
                e.subsumes_with(h, fuel) && self.subsumes_with(t, fuel)
            }
            (Type::Nearr(h, t), Type::Nearr(h2, t2)) => {
                h.subsumes_with(h2, fuel) && t.subsumes_with(t2, fuel)
            }

            (Type::Obj(a), Type::Obj(b)) => {
                let declared = a.props.iter().all(|(key, ty)| {
                    b.props
                        .get(key)
                        .is_some_and(|other_ty| ty.subsumes_with(other_ty, fuel))
                });
                let extra = b
                    .props
                    .iter()
                    .filter(|(key, _)| !a.props.contains_key(*key))
                    .all(|(_, other_ty)| a.rest.subsumes_with(other_ty, fuel));
                declared && extra && a.rest.subsumes_with(&b.rest, fuel)
            }

            _ => false,
        }
    }
}

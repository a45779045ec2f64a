//! Intersection and complement.
//!
//! `t.partition(u)` returns `(i, c)` where `i` is the part of `t` that
//! overlaps `u` and `c` the part that does not. `i | c` is always
//! equivalent to `t`. The complement is exact where the type language can
//! express it and falls back to `t` itself where it cannot (for example
//! "arrays of `Num|Str` that contain at least one `Str`").

use std::collections::{BTreeMap, BTreeSet};

use crate::{Name, Type};

impl Type {
    pub fn partition(&self, other: &Type) -> (Type, Type) {
        match (self, other) {
            (Type::Void, _) => (Type::Void, Type::Void),
            (_, Type::Void) => (Type::Void, self.clone()),

            (_, Type::Any) => (self.clone(), Type::Void),
            _ if other.subsumes(self) => (self.clone(), Type::Void),

            (_, Type::Var(v)) => {
                let (inter, _) = self.partition(&v.bound);
                (narrowed_var(&v.name, inter), self.clone())
            }
            (Type::Var(v), _) => {
                let (inter, _) = v.bound.partition(other);
                (narrowed_var(&v.name, inter), self.clone())
            }

            (Type::Union(ds), _) => {
                let (inters, comps): (Vec<Type>, Vec<Type>) =
                    ds.iter().map(|d| d.partition(other)).unzip();
                (Type::union(inters), Type::union(comps))
            }
            (_, Type::Union(ds)) => {
                let mut remaining = self.clone();
                let mut inters = Vec::with_capacity(ds.len());
                for d in ds.iter() {
                    let (inter, comp) = remaining.partition(d);
                    inters.push(inter);
                    remaining = comp;
                    if remaining.is_void() {
                        break;
                    }
                }
                (Type::union(inters), remaining)
            }

            (Type::Any, _) => (other.clone(), Type::Any),

            (Type::Arr(e), Type::Arr(e2)) => {
                let (inter, _) = e.partition(e2);
                if inter.is_void() {
                    (Type::empty_arr(), Type::nearr((**e).clone(), self.clone()))
                } else {
                    (Type::arr(inter), self.clone())
                }
            }
            (Type::Arr(e), Type::Nearr(..)) => {
                let (inter, comp) = Type::nearr((**e).clone(), self.clone()).partition(other);
                (inter, Type::union([Type::empty_arr(), comp]))
            }
            (Type::Nearr(..), Type::Arr(e2)) => {
                self.partition(&Type::nearr((**e2).clone(), other.clone()))
            }
            (Type::Nearr(h, t), Type::Nearr(h2, t2)) => {
                let (head_inter, head_comp) = h.partition(h2);
                let (tail_inter, tail_comp) = t.partition(t2);
                let inter = Type::nearr(head_inter.clone(), tail_inter);
                let comp = Type::union([
                    Type::nearr(head_comp, (**t).clone()),
                    Type::nearr(head_inter, tail_comp),
                ]);
                (inter, comp)
            }

            (Type::Obj(a), Type::Obj(b)) => {
                let keys: BTreeSet<&Name> = a.props.keys().chain(b.props.keys()).collect();
                let mut props = BTreeMap::new();
                let mut comps = Vec::with_capacity(keys.len());
                for key in keys {
                    let (inter, comp) = a.prop_or_rest(key).partition(b.prop_or_rest(key));
                    if inter.is_void() {
                        return (Type::Void, self.clone());
                    }
                    props.insert(key.clone(), inter);
                    comps.push((key.clone(), comp));
                }
                let (rest, _) = a.rest.partition(&b.rest);
                let inter = Type::obj(props, rest);

                // Removing `b` from `a` is expressible only when every
                // property `b` constrains is declared in `a` and `b` admits
                // whatever else `a` may carry.
                let exact = b.props.keys().all(|k| a.props.contains_key(k))
                    && b.rest.subsumes(&a.rest);
                if !exact {
                    return (inter, self.clone());
                }
                let comp = Type::union(
                    comps
                        .into_iter()
                        .filter(|(key, _)| a.props.contains_key(key))
                        .map(|(key, comp)| {
                            let mut props = a.props.clone();
                            props.insert(key, comp);
                            Type::obj(props, a.rest.clone())
                        }),
                );
                (inter, comp)
            }

            _ => (Type::Void, self.clone()),
        }
    }
}

fn narrowed_var(name: &Name, bound: Type) -> Type {
    if bound.is_void() {
        Type::Void
    } else {
        Type::var(name.clone(), bound)
    }
}

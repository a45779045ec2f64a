//! Type representation and normalizing constructors.

use std::collections::BTreeMap;
use std::rc::Rc;

/// Interned-by-sharing identifier for record keys and type variables.
pub type Name = Rc<str>;

/// A structural type.
///
/// The derived ordering is the canonical order used to sort union
/// disjuncts: `Void < Null < Bool < Num < Str < Arr < Nearr < Obj < Union
/// < Var < Any`, then structurally.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Type {
    /// The uninhabited type. Identity for union, absorbing for intersection.
    Void,
    Null,
    Bool,
    Num,
    Str,
    /// Homogeneous array of any length. `Arr(Void)` is the empty array.
    Arr(Rc<Type>),
    /// Non-empty array: a known head followed by a tail array type.
    Nearr(Rc<Type>, Rc<Type>),
    Obj(Rc<ObjType>),
    /// Normalized union; see [`Type::union`].
    Union(Rc<[Type]>),
    Var(Rc<VarType>),
    /// The top type.
    Any,
}

/// Record type: declared properties plus the type of every undeclared one.
///
/// `rest == Void` means the record is closed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjType {
    pub props: BTreeMap<Name, Type>,
    pub rest: Type,
}

/// Generic placeholder with an upper bound.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VarType {
    pub name: Name,
    pub bound: Type,
}

impl ObjType {
    /// The type of `key`: the declared property type, or the rest type.
    pub fn prop_or_rest(&self, key: &str) -> &Type {
        self.props.get(key).unwrap_or(&self.rest)
    }
}

impl Type {
    /// `Arr(elem)`.
    pub fn arr(elem: Type) -> Type {
        Type::Arr(Rc::new(elem))
    }

    /// The empty array type `Arr<>`.
    pub fn empty_arr() -> Type {
        Type::Arr(Rc::new(Type::Void))
    }

    /// `Nearr(head, tail)`, normalized.
    ///
    /// A `Void` head or tail makes the whole type `Void`; a union tail is
    /// distributed so that tails are never unions.
    pub fn nearr(head: Type, tail: Type) -> Type {
        if head.is_void() || tail.is_void() {
            return Type::Void;
        }
        if let Type::Union(tails) = &tail {
            return Type::union(
                tails
                    .iter()
                    .map(|t| Type::nearr(head.clone(), t.clone())),
            );
        }
        Type::Nearr(Rc::new(head), Rc::new(tail))
    }

    /// Exact-length tuple `Arr<A, B, ...>`.
    pub fn tuple(elems: Vec<Type>) -> Type {
        Type::prefixed(elems, Type::empty_arr())
    }

    /// `elems` followed by an arbitrary `tail` array type.
    pub fn prefixed(elems: Vec<Type>, tail: Type) -> Type {
        elems
            .into_iter()
            .rev()
            .fold(tail, |acc, elem| Type::nearr(elem, acc))
    }

    /// Record type, `Void` if any declared property is `Void`.
    pub fn obj(props: BTreeMap<Name, Type>, rest: Type) -> Type {
        if props.values().any(Type::is_void) {
            return Type::Void;
        }
        Type::Obj(Rc::new(ObjType { props, rest }))
    }

    /// Closed record type with exactly the given properties.
    pub fn record<K: Into<Name>>(props: impl IntoIterator<Item = (K, Type)>) -> Type {
        Type::obj(
            props.into_iter().map(|(k, t)| (k.into(), t)).collect(),
            Type::Void,
        )
    }

    /// Any record: `Obj<Any>`.
    pub fn any_obj() -> Type {
        Type::Obj(Rc::new(ObjType {
            props: BTreeMap::new(),
            rest: Type::Any,
        }))
    }

    pub fn var(name: impl Into<Name>, bound: Type) -> Type {
        Type::Var(Rc::new(VarType {
            name: name.into(),
            bound,
        }))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    /// The disjuncts of a union; a single-element slice otherwise, empty for `Void`.
    pub fn disjuncts(&self) -> &[Type] {
        match self {
            Type::Void => &[],
            Type::Union(ds) => &ds[..],
            other => std::slice::from_ref(other),
        }
    }

    /// Whether a type variable occurs anywhere in this type.
    pub fn has_vars(&self) -> bool {
        match self {
            Type::Void | Type::Null | Type::Bool | Type::Num | Type::Str | Type::Any => false,
            Type::Var(_) => true,
            Type::Arr(e) => e.has_vars(),
            Type::Nearr(h, t) => h.has_vars() || t.has_vars(),
            Type::Obj(o) => o.props.values().any(Type::has_vars) || o.rest.has_vars(),
            Type::Union(ds) => ds.iter().any(Type::has_vars),
        }
    }

    /// Names of all type variables in this type, in first-occurrence order.
    pub fn vars(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    pub(crate) fn collect_vars(&self, out: &mut Vec<Name>) {
        match self {
            Type::Void | Type::Null | Type::Bool | Type::Num | Type::Str | Type::Any => {}
            Type::Var(v) => {
                if !out.contains(&v.name) {
                    out.push(v.name.clone());
                }
                v.bound.collect_vars(out);
            }
            Type::Arr(e) => e.collect_vars(out),
            Type::Nearr(h, t) => {
                h.collect_vars(out);
                t.collect_vars(out);
            }
            Type::Obj(o) => {
                for t in o.props.values() {
                    t.collect_vars(out);
                }
                o.rest.collect_vars(out);
            }
            Type::Union(ds) => {
                for d in ds.iter() {
                    d.collect_vars(out);
                }
            }
        }
    }

    /// Alternative ways of covering this type by a list of cases, used as a
    /// last resort when a union must be shown to subsume a type that no
    /// single disjunct does.
    ///
    /// Each inner list covers `self` on its own. A tuple yields one
    /// alternative per splittable position, a record one per splittable
    /// property.
    pub(crate) fn splits(&self) -> Vec<Vec<Type>> {
        match self {
            Type::Union(ds) => vec![ds.to_vec()],
            Type::Arr(e) if !e.is_void() => vec![vec![
                Type::empty_arr(),
                Type::Nearr(e.clone(), Rc::new(self.clone())),
            ]],
            Type::Nearr(h, t) => {
                let by_head = h.splits().into_iter().map(|heads| {
                    heads
                        .into_iter()
                        .map(|h| Type::Nearr(Rc::new(h), t.clone()))
                        .collect::<Vec<_>>()
                });
                let by_tail = t.splits().into_iter().map(|tails| {
                    tails
                        .into_iter()
                        .map(|t| Type::Nearr(h.clone(), Rc::new(t)))
                        .collect::<Vec<_>>()
                });
                by_head.chain(by_tail).collect()
            }
            Type::Obj(o) => o
                .props
                .iter()
                .flat_map(|(key, ty)| {
                    ty.splits().into_iter().map(move |cases| {
                        cases
                            .into_iter()
                            .map(|case| {
                                let mut props = o.props.clone();
                                props.insert(key.clone(), case);
                                Type::Obj(Rc::new(ObjType {
                                    props,
                                    rest: o.rest.clone(),
                                }))
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

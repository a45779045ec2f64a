//! Element, index and property types of sequences and records.

use crate::Type;

impl Type {
    /// The union of all element types of a sequence type.
    ///
    /// `None` if some value of this type is not an array.
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Void => Some(Type::Void),
            Type::Arr(e) => Some((**e).clone()),
            Type::Nearr(h, t) => Some(h.or(&t.element_type()?)),
            Type::Union(ds) => ds
                .iter()
                .map(Type::element_type)
                .collect::<Option<Vec<_>>>()
                .map(Type::union),
            Type::Var(v) => v.bound.element_type(),
            _ => None,
        }
    }

    /// The types of the first `n` elements and of the remaining tail.
    ///
    /// Unions are distributed position by position. `None` if some value of
    /// this type is not an array.
    pub fn spread(&self, n: usize) -> Option<(Vec<Type>, Type)> {
        match self {
            Type::Void => Some((vec![Type::Void; n], Type::Void)),
            Type::Arr(e) => Some((vec![(**e).clone(); n], self.clone())),
            Type::Nearr(..) if n == 0 => Some((Vec::new(), self.clone())),
            Type::Nearr(h, t) => {
                let (mut elems, rest) = t.spread(n - 1)?;
                elems.insert(0, (**h).clone());
                Some((elems, rest))
            }
            Type::Union(ds) => {
                let mut elems = vec![Type::Void; n];
                let mut rest = Type::Void;
                for d in ds.iter() {
                    let (d_elems, d_rest) = d.spread(n)?;
                    for (acc, elem) in elems.iter_mut().zip(d_elems) {
                        *acc = acc.or(&elem);
                    }
                    rest = rest.or(&d_rest);
                }
                Some((elems, rest))
            }
            Type::Var(v) => v.bound.spread(n),
            _ => None,
        }
    }

    /// The type of the element at `index`.
    ///
    /// `None` if no value of this type has such an element.
    pub fn index_type(&self, index: usize) -> Option<Type> {
        match self {
            Type::Arr(e) if e.is_void() => None,
            Type::Arr(e) => Some((**e).clone()),
            Type::Nearr(h, _) if index == 0 => Some((**h).clone()),
            Type::Nearr(_, t) => t.index_type(index - 1),
            Type::Union(ds) => {
                let found: Vec<Type> = ds.iter().filter_map(|d| d.index_type(index)).collect();
                (!found.is_empty()).then(|| Type::union(found))
            }
            Type::Var(v) => v.bound.index_type(index),
            Type::Any => Some(Type::Any),
            _ => None,
        }
    }

    /// The type of property `key`: declared, or covered by the rest type.
    ///
    /// `None` if no value of this type may carry such a property.
    pub fn prop_type(&self, key: &str) -> Option<Type> {
        match self {
            Type::Obj(o) => {
                let ty = o.prop_or_rest(key);
                (!ty.is_void()).then(|| ty.clone())
            }
            Type::Union(ds) => {
                let found: Vec<Type> = ds.iter().filter_map(|d| d.prop_type(key)).collect();
                (!found.is_empty()).then(|| Type::union(found))
            }
            Type::Var(v) => v.bound.prop_type(key),
            Type::Any => Some(Type::Any),
            _ => None,
        }
    }

    /// Union of every property type, including the rest type.
    pub fn value_types(&self) -> Option<Type> {
        match self {
            Type::Void => Some(Type::Void),
            Type::Obj(o) => Some(Type::union(
                o.props.values().cloned().chain([o.rest.clone()]),
            )),
            Type::Union(ds) => ds
                .iter()
                .map(Type::value_types)
                .collect::<Option<Vec<_>>>()
                .map(Type::union),
            Type::Var(v) => v.bound.value_types(),
            _ => None,
        }
    }

    /// Whether every value of this type is an array.
    pub fn is_array(&self) -> bool {
        Type::arr(Type::Any).subsumes(self)
    }

    /// Whether every value of this type is a record.
    pub fn is_record(&self) -> bool {
        Type::any_obj().subsumes(self)
    }
}

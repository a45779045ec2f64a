//! Union normalization.

use crate::Type;

impl Type {
    /// Normalized union of `types`.
    ///
    /// Nested unions are flattened, `Void` is dropped, `Any` absorbs
    /// everything, and any disjunct subsumed by another is removed. The
    /// remaining disjuncts are kept in canonical order, so the result does
    /// not depend on grouping or argument order.
    pub fn union(types: impl IntoIterator<Item = Type>) -> Type {
        let mut flat = Vec::new();
        for ty in types {
            match ty {
                Type::Void => {}
                Type::Any => return Type::Any,
                Type::Union(ds) => flat.extend(ds.iter().cloned()),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();

        let mut kept: Vec<Type> = Vec::with_capacity(flat.len());
        for ty in flat {
            if kept.iter().any(|k| k.subsumes(&ty)) {
                continue;
            }
            kept.retain(|k| !ty.subsumes(k));
            kept.push(ty);
        }
        kept.sort();

        match kept.len() {
            0 => Type::Void,
            1 => kept.swap_remove(0),
            _ => Type::Union(kept.into()),
        }
    }

    /// `self | other`.
    pub fn or(&self, other: &Type) -> Type {
        Type::union([self.clone(), other.clone()])
    }
}

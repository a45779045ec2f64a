//! Property-based tests for the type algebra.
//!
//! Types are generated from primitives, arrays, short tuples, small records
//! and unions of those, then checked against the algebraic laws the
//! typechecker relies on:
//! 1. Subsumption is reflexive and transitive
//! 2. Partitioning loses nothing and stays inside both operands
//! 3. Union normalization does not depend on grouping or order

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeMap;

use bach_types::{Name, Type};
use proptest::prelude::*;

// -- Strategies --

fn leaf() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Void),
        Just(Type::Null),
        Just(Type::Bool),
        Just(Type::Num),
        Just(Type::Str),
        Just(Type::Any),
    ]
}

fn key() -> impl Strategy<Value = Name> {
    prop_oneof![Just("a"), Just("b")].prop_map(Name::from)
}

fn ty() -> impl Strategy<Value = Type> {
    leaf().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::arr),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Type::tuple),
            (
                prop::collection::btree_map(key(), inner.clone(), 0..2),
                prop_oneof![Just(Type::Void), Just(Type::Any)],
            )
                .prop_map(|(props, rest): (BTreeMap<Name, Type>, Type)| Type::obj(props, rest)),
            prop::collection::vec(inner, 2..4).prop_map(Type::union),
        ]
    })
}

fn equivalent(a: &Type, b: &Type) -> bool {
    a.subsumes(b) && b.subsumes(a)
}

// -- Subsumption --

proptest! {
    #[test]
    fn subsumption_is_reflexive(t in ty()) {
        prop_assert!(t.subsumes(&t), "{t} does not subsume itself");
    }

    #[test]
    fn subsumption_is_transitive(a in ty(), b in ty(), c in ty()) {
        if a.subsumes(&b) && b.subsumes(&c) {
            prop_assert!(a.subsumes(&c), "{a} >= {b} >= {c} but not {a} >= {c}");
        }
    }

    #[test]
    fn void_and_any_bound_everything(t in ty()) {
        prop_assert!(t.subsumes(&Type::Void));
        prop_assert!(Type::Any.subsumes(&t));
    }
}

// -- Partition --

proptest! {
    #[test]
    fn partition_covers_self(t in ty(), u in ty()) {
        let (inter, comp) = t.partition(&u);
        let joined = inter.or(&comp);
        prop_assert!(
            equivalent(&joined, &t),
            "{t} partitioned by {u} into {inter} and {comp}"
        );
    }

    #[test]
    fn intersection_is_inside_both(t in ty(), u in ty()) {
        let (inter, _) = t.partition(&u);
        prop_assert!(t.subsumes(&inter), "{inter} escapes {t}");
        prop_assert!(u.subsumes(&inter), "{inter} escapes {u}");
    }

    #[test]
    fn subsumed_pattern_leaves_nothing(t in ty(), u in ty()) {
        if u.subsumes(&t) {
            let (_, comp) = t.partition(&u);
            prop_assert_eq!(comp, Type::Void);
        }
    }
}

// -- Union normalization --

proptest! {
    #[test]
    fn union_is_independent_of_grouping(a in ty(), b in ty(), c in ty()) {
        let left = Type::union([Type::union([a.clone(), b.clone()]), c.clone()]);
        let right = Type::union([a.clone(), Type::union([b.clone(), c.clone()])]);
        let flat = Type::union([c, a, b]);
        prop_assert_eq!(&left, &flat);
        prop_assert_eq!(&right, &flat);
    }

    #[test]
    fn union_is_idempotent(a in ty(), b in ty()) {
        let once = Type::union([a, b]);
        let twice = Type::union([once.clone(), once.clone()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn union_subsumes_its_parts(a in ty(), b in ty()) {
        let u = a.or(&b);
        prop_assert!(u.subsumes(&a));
        prop_assert!(u.subsumes(&b));
    }
}

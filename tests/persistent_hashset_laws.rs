#![cfg(feature = "persistent")]
//! Property-based tests for PersistentHashSet laws.

use hermit::hashing::hash_of;
use hermit::persistent::{InsertionOrderSet, PersistentHashSet};
use proptest::prelude::*;
use std::collections::HashSet;

fn persistent(elements: &HashSet<i16>) -> PersistentHashSet<i16> {
    elements.iter().copied().collect()
}

proptest! {
    /// Union, intersection and difference agree with `HashSet`.
    #[test]
    fn prop_algebra_matches_reference(
        left in prop::collection::hash_set(any::<i16>(), 0..200),
        right in prop::collection::hash_set(any::<i16>(), 0..200),
    ) {
        let union: HashSet<i16> = left.union(&right).copied().collect();
        let intersection: HashSet<i16> = left.intersection(&right).copied().collect();
        let difference: HashSet<i16> = left.difference(&right).copied().collect();

        let (l, r) = (persistent(&left), persistent(&right));
        prop_assert_eq!(l.union(&r), union);
        prop_assert_eq!(l.intersection(&r), intersection);
        prop_assert_eq!(l.difference(&r), difference);
    }

    /// Put-Contains Law: a put element is a member, others are unaffected.
    #[test]
    fn prop_put_contains_law(
        elements in prop::collection::hash_set(any::<i16>(), 0..200),
        element: i16,
    ) {
        let set = persistent(&elements).put(element);
        prop_assert!(set.contains(&element));
        prop_assert_eq!(set.len(), elements.len() + usize::from(!elements.contains(&element)));
    }

    /// Both persistent set kinds agree on equality and hash with each other.
    #[test]
    fn prop_set_kinds_hash_alike(elements in prop::collection::vec(any::<i16>(), 0..200)) {
        let hashed: PersistentHashSet<i16> = elements.iter().copied().collect();
        let ordered: InsertionOrderSet<i16> = elements.iter().rev().copied().collect();
        prop_assert_eq!(&hashed, &ordered);
        prop_assert_eq!(hash_of(&hashed), hash_of(&ordered));
    }
}

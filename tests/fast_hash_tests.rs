#![cfg(feature = "persistent")]
//! Tests for the selectable key hashers.
//!
//! Whichever of the default, `fxhash` or `ahash` hashers is compiled in, key
//! hashing must be deterministic within a process so that lookups and
//! value-equality stay consistent.

use hermit::hashing::{hash_of, ordered_hash, unordered_hash};
use hermit::persistent::{PersistentHashMap, PersistentHashSet};
use rstest::rstest;

// =============================================================================
// Determinism
// =============================================================================

#[rstest]
fn test_same_key_produces_same_hash() {
    assert_eq!(hash_of(&"key"), hash_of(&"key"));
    assert_eq!(hash_of(&42_u64), hash_of(&42_u64));
    assert_eq!(hash_of(&String::from("key")), hash_of(&"key"));
}

#[rstest]
fn test_identical_maps_answer_identically() {
    let entries: Vec<(String, i32)> = ["alpha", "beta", "gamma", "delta"]
        .iter()
        .zip(1..)
        .map(|(name, value)| ((*name).to_owned(), value))
        .collect();

    let first: PersistentHashMap<String, i32> = entries.iter().cloned().collect();
    let second: PersistentHashMap<String, i32> = entries.iter().rev().cloned().collect();

    for (key, expected) in &entries {
        assert_eq!(first.get(key.as_str()), Some(expected));
        assert_eq!(second.get(key.as_str()), Some(expected));
    }
    assert_eq!(hash_of(&first), hash_of(&second));
}

#[rstest]
fn test_many_keys_survive_any_hasher() {
    let set: PersistentHashSet<u64> = (0..20_000).collect();
    assert_eq!(set.len(), 20_000);
    assert!((0..20_000).all(|key| set.contains(&key)));
    assert!(!set.contains(&20_000));
}

// =============================================================================
// Combinators
// =============================================================================

#[rstest]
fn test_ordered_hash_depends_on_order() {
    let forward = ordered_hash([1, 2, 3].iter());
    let backward = ordered_hash([3, 2, 1].iter());
    assert_ne!(forward, backward);
    assert_eq!(forward, ordered_hash(vec![1, 2, 3].iter()));
}

#[rstest]
fn test_unordered_hash_ignores_order() {
    assert_eq!(
        unordered_hash(["x", "y", "z"].iter()),
        unordered_hash(["z", "x", "y"].iter())
    );
}

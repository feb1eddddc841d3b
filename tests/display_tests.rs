//! Integration tests for Display implementations.
//!
//! Every collection renders as its type tag followed by its elements in
//! parentheses, each element in `Debug` form and separated by commas.

#![cfg(all(feature = "persistent", feature = "tuple"))]

use hermit::persistent::{InsertionOrderSet, PersistentHashMap, PersistentHashSet, PersistentVector};
use hermit::transform::Range;
use hermit::tuple::{Tuple1, Tuple2};

// =============================================================================
// Ordered Collections
// =============================================================================

#[test]
fn test_empty_vector_display() {
    let vector: PersistentVector<i32> = PersistentVector::new();
    assert_eq!(format!("{vector}"), "PersistentVector()");
}

#[test]
fn test_vector_display() {
    let vector: PersistentVector<i32> = (1..=3).collect();
    assert_eq!(format!("{vector}"), "PersistentVector(1,2,3)");
}

#[test]
fn test_vector_of_strings_display() {
    let vector: PersistentVector<&str> = ["a", "b"].into_iter().collect();
    assert_eq!(format!("{vector}"), r#"PersistentVector("a","b")"#);
}

#[test]
fn test_insertion_order_set_display() {
    let set: InsertionOrderSet<char> = "cab".chars().collect();
    assert_eq!(format!("{set}"), "InsertionOrderSet('c','a','b')");
}

#[test]
fn test_range_display() {
    assert_eq!(format!("{}", Range::new(0, 256)), "Range(0,256)");
}

// =============================================================================
// Hashed Collections
// =============================================================================

#[test]
fn test_single_entry_map_display() {
    let map = PersistentHashMap::new().assoc("k", 1);
    assert_eq!(format!("{map}"), r#"PersistentHashMap(kv("k",1))"#);
}

#[test]
fn test_single_element_set_display() {
    let set: PersistentHashSet<i32> = std::iter::once(42).collect();
    assert_eq!(format!("{set}"), "PersistentHashSet(42)");
}

#[test]
fn test_empty_hashed_collections_display() {
    let map: PersistentHashMap<i32, i32> = PersistentHashMap::new();
    let set: PersistentHashSet<i32> = PersistentHashSet::new();
    assert_eq!(format!("{map}"), "PersistentHashMap()");
    assert_eq!(format!("{set}"), "PersistentHashSet()");
}

#[test]
fn test_multi_element_set_display_lists_every_element() {
    let set: PersistentHashSet<i32> = (1..=3).collect();
    let rendered = format!("{set}");
    assert!(rendered.starts_with("PersistentHashSet("));
    assert!(rendered.ends_with(')'));
    let inner = &rendered["PersistentHashSet(".len()..rendered.len() - 1];
    let mut elements: Vec<&str> = inner.split(',').collect();
    elements.sort_unstable();
    assert_eq!(elements, vec!["1", "2", "3"]);
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn test_nested_display_uses_debug_for_elements() {
    let nested: PersistentVector<Tuple2<i32, char>> =
        [Tuple2::new(1, 'a'), Tuple2::new(2, 'b')].into_iter().collect();
    assert_eq!(
        format!("{nested}"),
        "PersistentVector(Tuple2(1,'a'),Tuple2(2,'b'))"
    );
    assert_eq!(format!("{}", Tuple1::new(nested.len())), "Tuple1(2)");
}

#![cfg(feature = "tuple")]
//! Integration tests for the tuple family.

use hermit::hashing::hash_of;
use hermit::tuple;
use hermit::tuple::{Tuple2, Tuple9};
use rstest::{fixture, rstest};
use std::collections::HashSet;

type Ordinals = Tuple9<&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str>;

#[fixture]
fn ordinals() -> Ordinals {
    Tuple9::new("1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th")
}

// =============================================================================
// Value Semantics
// =============================================================================

#[rstest]
fn test_separate_instances_are_equal(ordinals: Ordinals) {
    let rebuilt = tuple!("1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th");
    assert_eq!(ordinals, rebuilt);
    assert_eq!(hash_of(&ordinals), hash_of(&rebuilt));
}

#[rstest]
#[case(0)]
#[case(4)]
#[case(8)]
fn test_changing_one_slot_breaks_equality(ordinals: Ordinals, #[case] slot: usize) {
    let (a, b, c, d, e, f, g, h, i) = ordinals.into_tuple();
    let mut slots = [a, b, c, d, e, f, g, h, i];
    slots[slot] = "changed";
    let [a, b, c, d, e, f, g, h, i] = slots;
    let changed = Tuple9::new(a, b, c, d, e, f, g, h, i);

    assert_ne!(ordinals, changed);
    assert_ne!(hash_of(&ordinals), hash_of(&changed));
}

#[rstest]
fn test_tuples_as_set_members() {
    let members: HashSet<Tuple2<i32, char>> =
        [Tuple2::new(1, 'a'), Tuple2::new(1, 'a'), Tuple2::new(2, 'a')]
            .into_iter()
            .collect();
    assert_eq!(members.len(), 2);
}

// =============================================================================
// Rendering and Conversion
// =============================================================================

#[rstest]
fn test_display_lists_slots_in_order(ordinals: Ordinals) {
    assert_eq!(
        ordinals.to_string(),
        r#"Tuple9("1st","2nd","3rd","4th","5th","6th","7th","8th","9th")"#
    );
    assert_eq!(tuple!(1, 'x').to_string(), "Tuple2(1,'x')");
}

#[rstest]
fn test_conversion_from_standard_tuple() {
    let pair: Tuple2<&str, u8> = ("age", 42).into();
    assert_eq!(pair.first(), &"age");
    assert_eq!(pair.second(), &42);
    assert_eq!(pair.into_tuple(), ("age", 42));
}

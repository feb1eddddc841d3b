#![cfg(feature = "persistent")]
//! Integration tests for PersistentVector.

use hermit::error::CollectionError;
use hermit::persistent::PersistentVector;
use rstest::rstest;

// =============================================================================
// Construction and Access
// =============================================================================

#[rstest]
fn test_new_creates_empty_vector() {
    let vector: PersistentVector<i32> = PersistentVector::new();
    assert!(vector.is_empty());
    assert_eq!(vector.len(), 0);
    assert_eq!(vector.get(0), None);
    assert_eq!(vector.first(), None);
    assert_eq!(vector.last(), None);
}

#[rstest]
fn test_singleton() {
    let vector = PersistentVector::singleton("only");
    assert_eq!(vector.len(), 1);
    assert_eq!(vector.first(), Some(&"only"));
    assert_eq!(vector.last(), Some(&"only"));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(31)]
#[case(32)]
#[case(33)]
#[case(1024)]
#[case(1025)]
#[case(1056)]
#[case(1057)]
#[case(32_768)]
#[case(32_800)]
fn test_every_index_is_reachable(#[case] size: usize) {
    let vector: PersistentVector<usize> = (0..size).collect();
    assert_eq!(vector.len(), size);
    for index in 0..size {
        assert_eq!(vector.get(index), Some(&index));
    }
    assert_eq!(vector.get(size), None);
}

#[rstest]
fn test_element_at_out_of_range() {
    let vector: PersistentVector<i32> = (0..3).collect();
    assert_eq!(vector.element_at(2), Ok(&2));
    assert_eq!(
        vector.element_at(3),
        Err(CollectionError::IndexOutOfRange {
            index: 3,
            length: 3
        })
    );
}

#[rstest]
#[should_panic(expected = "index out of bounds")]
fn test_index_panics_out_of_range() {
    let vector: PersistentVector<i32> = (0..3).collect();
    let _ = vector[3];
}

// =============================================================================
// Derived Versions
// =============================================================================

#[rstest]
fn test_push_back_leaves_original_untouched() {
    let original: PersistentVector<i32> = (0..100).collect();
    let extended = original.push_back(100);

    assert_eq!(original.len(), 100);
    assert_eq!(extended.len(), 101);
    assert_eq!(extended.last(), Some(&100));
    assert_eq!(original.last(), Some(&99));
}

#[rstest]
fn test_pop_back_on_empty() {
    let vector: PersistentVector<i32> = PersistentVector::new();
    assert!(vector.pop_back().is_none());
}

#[rstest]
fn test_pop_back_drains_across_levels() {
    let mut vector: PersistentVector<usize> = (0..1100).collect();
    for expected in (0..1100).rev() {
        let (shorter, popped) = vector.pop_back().expect("vector is not empty");
        assert_eq!(popped, expected);
        assert_eq!(shorter.len(), expected);
        vector = shorter;
    }
    assert!(vector.is_empty());
}

#[rstest]
fn test_update_and_assoc() {
    let vector: PersistentVector<char> = "abcd".chars().collect();

    let updated = vector.update(2, 'z').expect("index in range");
    assert_eq!(updated, vec!['a', 'b', 'z', 'd']);
    assert_eq!(vector, vec!['a', 'b', 'c', 'd']);

    assert!(vector.update(4, 'z').is_none());
    assert_eq!(
        vector.assoc(9, 'z'),
        Err(CollectionError::IndexOutOfRange {
            index: 9,
            length: 4
        })
    );
}

#[rstest]
fn test_update_inside_trie_and_tail() {
    let vector: PersistentVector<usize> = (0..2000).collect();
    let updated = vector
        .update(5, 0)
        .and_then(|next| next.update(1500, 0))
        .and_then(|next| next.update(1999, 0))
        .expect("indices in range");

    assert_eq!(updated.get(5), Some(&0));
    assert_eq!(updated.get(1500), Some(&0));
    assert_eq!(updated.get(1999), Some(&0));
    assert_eq!(updated.get(6), Some(&6));
    assert_eq!(vector.get(1500), Some(&1500));
}

#[rstest]
fn test_concat() {
    let left: PersistentVector<i32> = (0..40).collect();
    let joined = left.concat(40..90);
    assert_eq!(joined.len(), 90);
    assert!(joined.iter().copied().eq(0..90));
}

#[rstest]
fn test_map_and_flat_map() {
    let vector: PersistentVector<i32> = (1..=4).collect();
    assert_eq!(vector.map(|n| n * 10), vec![10, 20, 30, 40]);
    assert_eq!(vector.map(ToString::to_string).get(3), Some(&String::from("4")));
    assert_eq!(
        vector.flat_map(|&n| vec![n; 2]),
        vec![1, 1, 2, 2, 3, 3, 4, 4]
    );
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_iter_is_exact_size() {
    let vector: PersistentVector<i32> = (0..70).collect();
    let mut iterator = vector.iter();
    assert_eq!(iterator.len(), 70);
    iterator.next();
    assert_eq!(iterator.len(), 69);
}

#[rstest]
fn test_into_iter_yields_owned_elements_in_order() {
    let vector: PersistentVector<String> = (0..50).map(|n| n.to_string()).collect();
    let owned: Vec<String> = vector.clone().into_iter().collect();
    assert_eq!(owned.len(), 50);
    assert_eq!(owned[49], "49");
    assert_eq!(vector, owned);
}

#[rstest]
fn test_fold_left_sees_index_order() {
    let vector: PersistentVector<char> = "persistent".chars().collect();
    let folded = vector.fold_left(String::new(), |mut text, letter| {
        text.push(*letter);
        text
    });
    assert_eq!(folded, "persistent");
}

// =============================================================================
// Equality
// =============================================================================

#[rstest]
fn test_equality_ignores_construction_history() {
    let collected: PersistentVector<i32> = (0..64).collect();
    let pushed = (0..64).fold(PersistentVector::new(), |vector, n| vector.push_back(n));
    let popped = collected
        .push_back(999)
        .pop_back()
        .map(|(vector, _)| vector)
        .expect("not empty");

    assert_eq!(collected, pushed);
    assert_eq!(collected, popped);
}

#[rstest]
fn test_equality_with_standard_sequences() {
    let vector: PersistentVector<i32> = (1..=3).collect();
    assert_eq!(vector, vec![1, 2, 3]);
    assert_eq!(vec![1, 2, 3], vector);
    assert_eq!(vector, [1, 2, 3][..]);
    assert_ne!(vector, vec![1, 2]);
}

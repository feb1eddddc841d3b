//! Fixed-arity tuples with value semantics.
//!
//! [`Tuple1`] through [`Tuple9`] hold one to nine independently typed slots,
//! read through the ordinal accessors `first()` to `ninth()`. Equality,
//! ordering and hashing are structural, and `Display` renders the type tag
//! followed by each slot's `Debug` form:
//!
//! ```rust
//! use hermit::tuple::Tuple3;
//!
//! let triple = Tuple3::new("1st", 2, '3');
//! assert_eq!(triple.first(), &"1st");
//! assert_eq!(triple.to_string(), "Tuple3(\"1st\",2,'3')");
//! assert_eq!(triple, Tuple3::from(("1st", 2, '3')));
//! ```
//!
//! Homogeneous tuples can also be built from a `Vec` or a
//! [`PersistentVector`](crate::persistent::PersistentVector) of exactly the
//! right length:
//!
//! ```rust
//! use hermit::error::CollectionError;
//! use hermit::tuple::Tuple2;
//!
//! assert_eq!(Tuple2::try_from(vec![1, 2]), Ok(Tuple2::new(1, 2)));
//! assert_eq!(
//!     Tuple2::<i32, i32>::try_from(vec![1, 2, 3]),
//!     Err(CollectionError::ArityMismatch { expected: 2, actual: 3 })
//! );
//! ```

hermit_derive::tuple_family!(9);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use crate::hashing::hash_of;
    use rstest::rstest;

    #[rstest]
    fn test_accessors_follow_slot_order() {
        let tuple = Tuple9::new(1, "two", 3.0, '4', 5_u8, 6_i64, [7], (8,), "nine");
        assert_eq!(tuple.first(), &1);
        assert_eq!(tuple.second(), &"two");
        assert_eq!(tuple.fourth(), &'4');
        assert_eq!(tuple.eighth(), &(8,));
        assert_eq!(tuple.ninth(), &"nine");
    }

    #[rstest]
    fn test_display_of_nine_strings() {
        let tuple = Tuple9::new("1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th");
        assert_eq!(
            tuple.to_string(),
            "Tuple9(\"1st\",\"2nd\",\"3rd\",\"4th\",\"5th\",\"6th\",\"7th\",\"8th\",\"9th\")"
        );
    }

    #[rstest]
    fn test_equal_tuples_hash_equal() {
        let left = Tuple2::new(String::from("a"), 1);
        let right = Tuple2::from((String::from("a"), 1));
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
        assert_ne!(left, Tuple2::new(String::from("a"), 2));
    }

    #[rstest]
    fn test_ordering_is_lexicographic() {
        assert!(Tuple2::new(1, 9) < Tuple2::new(2, 0));
        assert!(Tuple2::new(1, 1) < Tuple2::new(1, 2));
    }

    #[rstest]
    #[case(vec![], 0)]
    #[case(vec![1, 2], 2)]
    #[case(vec![1, 2, 3, 4], 4)]
    fn test_try_from_vec_rejects_wrong_arity(#[case] elements: Vec<i32>, #[case] actual: usize) {
        assert_eq!(
            Tuple3::<i32, i32, i32>::try_from(elements),
            Err(CollectionError::ArityMismatch {
                expected: 3,
                actual
            })
        );
    }

    #[cfg(feature = "persistent")]
    #[rstest]
    fn test_try_from_persistent_vector() {
        use crate::persistent::PersistentVector;

        let vector: PersistentVector<char> = "abc".chars().collect();
        assert_eq!(Tuple3::try_from(vector.clone()), Ok(Tuple3::new('a', 'b', 'c')));
        assert_eq!(
            Tuple2::<char, char>::try_from(vector),
            Err(CollectionError::ArityMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[rstest]
    fn test_into_tuple_round_trips() {
        let tuple = Tuple1::new(42);
        assert_eq!(tuple.into_tuple(), (42,));
        assert_eq!(Tuple1::from((42,)), tuple);
    }
}

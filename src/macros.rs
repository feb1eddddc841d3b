//! Literal constructors for hermit collections.
//!
//! [`persistent_vector!`](crate::persistent_vector!),
//! [`persistent_hash_map!`](crate::persistent_hash_map!),
//! [`persistent_hash_set!`](crate::persistent_hash_set!) and
//! [`tuple!`](crate::tuple!) build values the way `vec!` builds a `Vec`.

/// Creates a [`PersistentVector`](crate::persistent::PersistentVector) from
/// its elements.
///
/// # Syntax
///
/// - `persistent_vector![]` - The empty vector
/// - `persistent_vector![a, b, c]` - The listed elements, in order
/// - `persistent_vector![value; count]` - `count` clones of `value`
///
/// # Examples
///
/// ```
/// use hermit::persistent_vector;
///
/// let letters = persistent_vector!['a', 'b', 'c'];
/// assert_eq!(letters.len(), 3);
/// assert_eq!(letters.get(2), Some(&'c'));
///
/// let zeros = persistent_vector![0; 40];
/// assert_eq!(zeros.len(), 40);
/// ```
#[macro_export]
macro_rules! persistent_vector {
    () => {
        $crate::persistent::PersistentVector::new()
    };

    ($value:expr; $count:expr) => {
        ::core::iter::repeat($value)
            .take($count)
            .collect::<$crate::persistent::PersistentVector<_>>()
    };

    ($($element:expr),+ $(,)?) => {
        [$($element),+]
            .into_iter()
            .collect::<$crate::persistent::PersistentVector<_>>()
    };
}

/// Creates a [`PersistentHashMap`](crate::persistent::PersistentHashMap) from
/// `key => value` pairs.
///
/// A key listed more than once keeps its last value.
///
/// # Examples
///
/// ```
/// use hermit::persistent_hash_map;
///
/// let scores = persistent_hash_map! {
///     "ada" => 3,
///     "grace" => 5,
///     "ada" => 4,
/// };
/// assert_eq!(scores.len(), 2);
/// assert_eq!(scores.get("ada"), Some(&4));
/// ```
#[macro_export]
macro_rules! persistent_hash_map {
    () => {
        $crate::persistent::PersistentHashMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {
        [$(($key, $value)),+]
            .into_iter()
            .collect::<$crate::persistent::PersistentHashMap<_, _>>()
    };
}

/// Creates a [`PersistentHashSet`](crate::persistent::PersistentHashSet) from
/// its elements. Duplicates collapse.
///
/// # Examples
///
/// ```
/// use hermit::persistent_hash_set;
///
/// let primes = persistent_hash_set![2, 3, 5, 3];
/// assert_eq!(primes.len(), 3);
/// assert!(primes.contains(&5));
/// ```
#[macro_export]
macro_rules! persistent_hash_set {
    () => {
        $crate::persistent::PersistentHashSet::new()
    };

    ($($element:expr),+ $(,)?) => {
        [$($element),+]
            .into_iter()
            .collect::<$crate::persistent::PersistentHashSet<_>>()
    };
}

/// Creates a tuple of the matching arity, from `Tuple1` to `Tuple9`.
///
/// # Examples
///
/// ```
/// use hermit::tuple;
/// use hermit::tuple::Tuple3;
///
/// let record = tuple!("id", 7, true);
/// assert_eq!(record, Tuple3::new("id", 7, true));
/// assert_eq!(record.to_string(), "Tuple3(\"id\",7,true)");
/// ```
#[macro_export]
macro_rules! tuple {
    ($a:expr $(,)?) => {
        $crate::tuple::Tuple1::new($a)
    };
    ($a:expr, $b:expr $(,)?) => {
        $crate::tuple::Tuple2::new($a, $b)
    };
    ($a:expr, $b:expr, $c:expr $(,)?) => {
        $crate::tuple::Tuple3::new($a, $b, $c)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr $(,)?) => {
        $crate::tuple::Tuple4::new($a, $b, $c, $d)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr $(,)?) => {
        $crate::tuple::Tuple5::new($a, $b, $c, $d, $e)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr $(,)?) => {
        $crate::tuple::Tuple6::new($a, $b, $c, $d, $e, $f)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr $(,)?) => {
        $crate::tuple::Tuple7::new($a, $b, $c, $d, $e, $f, $g)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr, $h:expr $(,)?) => {
        $crate::tuple::Tuple8::new($a, $b, $c, $d, $e, $f, $g, $h)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr, $h:expr, $i:expr $(,)?) => {
        $crate::tuple::Tuple9::new($a, $b, $c, $d, $e, $f, $g, $h, $i)
    };
}

#[cfg(all(test, feature = "persistent", feature = "tuple"))]
mod tests {
    use crate::persistent::{PersistentHashMap, PersistentHashSet, PersistentVector};
    use crate::tuple::{Tuple1, Tuple9};

    #[test]
    fn test_persistent_vector_empty() {
        let vector: PersistentVector<u8> = persistent_vector![];
        assert!(vector.is_empty());
    }

    #[test]
    fn test_persistent_vector_repeat() {
        let vector = persistent_vector!["x"; 33];
        assert_eq!(vector.len(), 33);
        assert!(vector.iter().all(|element| *element == "x"));
    }

    #[test]
    fn test_persistent_vector_listed() {
        let vector = persistent_vector![1, 2, 3,];
        assert_eq!(vector, vec![1, 2, 3]);
    }

    #[test]
    fn test_persistent_hash_map_last_binding_wins() {
        let map = persistent_hash_map! { 1 => "a", 2 => "b", 1 => "c" };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), Some(&"c"));

        let empty: PersistentHashMap<u8, u8> = persistent_hash_map! {};
        assert!(empty.is_empty());
    }

    #[test]
    fn test_persistent_hash_set_collapses_duplicates() {
        let set = persistent_hash_set!['a', 'b', 'a'];
        assert_eq!(set.len(), 2);

        let empty: PersistentHashSet<char> = persistent_hash_set![];
        assert!(empty.is_empty());
    }

    #[test]
    fn test_tuple_arities() {
        assert_eq!(tuple!(1), Tuple1::new(1));
        assert_eq!(
            tuple!(1, 2, 3, 4, 5, 6, 7, 8, 9),
            Tuple9::new(1, 2, 3, 4, 5, 6, 7, 8, 9)
        );
    }
}

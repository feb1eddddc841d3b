//! Capability views shared by persistent and standard collections.
//!
//! The read traits [`ListView`], [`MapView`] and [`SetView`] describe what a
//! consumer may rely on: size, lookup and traversal. They are implemented by
//! the persistent collections and by `Vec`, `HashMap` and `HashSet`, so code
//! written against a view accepts either, and [`value_hash`](ListView::value_hash)
//! agrees between a persistent collection and a standard one with the same
//! contents.
//!
//! The mutable shapes [`MutableList`], [`MutableMap`] and [`MutableSet`]
//! extend the read traits with in-place mutators. Standard collections
//! perform the mutation. Persistent collections and [`ReadOnly`] wrappers
//! implement the shapes too, but every mutator returns
//! [`CollectionError::Immutable`] on every call.
//!
//! # Examples
//!
//! ```rust
//! use hermit::persistent::PersistentVector;
//! use hermit::view::{ListView, MutableList};
//!
//! fn append_zero<L: MutableList<i32>>(list: &mut L) -> bool {
//!     list.push(0).is_ok()
//! }
//!
//! let mut standard = vec![1, 2];
//! let mut persistent: PersistentVector<i32> = (1..=2).collect();
//!
//! assert!(append_zero(&mut standard));
//! assert!(!append_zero(&mut persistent));
//! assert_eq!(ListView::len(&persistent), 2);
//! ```

mod persistent;
mod read_only;
mod standard;

pub use read_only::ReadOnly;

use std::hash::Hash;

use crate::error::CollectionError;
use crate::hashing::{ordered_hash, unordered_hash};

// =============================================================================
// Read Contracts
// =============================================================================

/// Read access to an index-addressed sequence.
pub trait ListView<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<&T>;

    /// Returns the element at `index`, failing when out of range.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] when `index >= len()`.
    fn element_at(&self, index: usize) -> Result<&T, CollectionError> {
        self.get(index).ok_or(CollectionError::IndexOutOfRange {
            index,
            length: self.len(),
        })
    }

    /// Returns the elements in index order.
    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    /// Returns `true` if some element equals `element`.
    fn contains_element(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements().any(|candidate| candidate == element)
    }

    /// Order-sensitive hash of the contents.
    fn value_hash(&self) -> u64
    where
        T: Hash,
    {
        ordered_hash(self.elements())
    }
}

/// Read access to a key-value mapping.
pub trait MapView<K, V> {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` when there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value bound to `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is bound.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the value bound to `key`, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when `key` is absent.
    fn value_of(&self, key: &K) -> Result<&V, CollectionError> {
        self.get(key).ok_or(CollectionError::KeyNotFound)
    }

    /// Returns the value bound to `key`, or `default`.
    fn get_or_else<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns every entry, in an implementation-defined order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Order-independent hash of the contents.
    fn value_hash(&self) -> u64
    where
        K: Hash,
        V: Hash,
    {
        unordered_hash(self.entries())
    }
}

/// Read access to a set of unique elements.
pub trait SetView<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `element` is present.
    fn contains(&self, element: &T) -> bool;

    /// Returns every element, in an implementation-defined order.
    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    /// Order-independent hash of the contents.
    fn value_hash(&self) -> u64
    where
        T: Hash,
    {
        unordered_hash(self.elements())
    }
}

// =============================================================================
// Mutable Shapes
// =============================================================================

/// A list that can be changed in place.
///
/// Persistent and read-only implementors refuse every call with
/// [`CollectionError::Immutable`].
pub trait MutableList<T>: ListView<T> {
    /// Appends `element`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn push(&mut self, element: T) -> Result<(), CollectionError>;

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors, otherwise
    /// [`CollectionError::IndexOutOfRange`] when `index >= len()`.
    fn set(&mut self, index: usize, element: T) -> Result<T, CollectionError>;

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors, otherwise
    /// [`CollectionError::IndexOutOfRange`] when `index >= len()`.
    fn remove_at(&mut self, index: usize) -> Result<T, CollectionError>;

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn clear(&mut self) -> Result<(), CollectionError>;
}

/// A map that can be changed in place.
///
/// Persistent and read-only implementors refuse every call with
/// [`CollectionError::Immutable`].
pub trait MutableMap<K, V>: MapView<K, V> {
    /// Binds `key` to `value`, returning the previous value.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>, CollectionError>;

    /// Unbinds `key`, returning its value.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn remove(&mut self, key: &K) -> Result<Option<V>, CollectionError>;

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn clear(&mut self) -> Result<(), CollectionError>;
}

/// A set that can be changed in place.
///
/// Persistent and read-only implementors refuse every call with
/// [`CollectionError::Immutable`].
pub trait MutableSet<T>: SetView<T> {
    /// Adds `element`, returning `true` if it was absent.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn add(&mut self, element: T) -> Result<bool, CollectionError>;

    /// Removes `element`, returning `true` if it was present.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn remove(&mut self, element: &T) -> Result<bool, CollectionError>;

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::Immutable`] for immutable implementors.
    fn clear(&mut self) -> Result<(), CollectionError>;
}

// =============================================================================
// Cross-implementation Equality
// =============================================================================

/// Returns `true` when both lists hold equal elements in the same order.
pub fn list_eq<T, L, R>(left: &L, right: &R) -> bool
where
    T: PartialEq,
    L: ListView<T> + ?Sized,
    R: ListView<T> + ?Sized,
{
    left.len() == right.len() && left.elements().eq(right.elements())
}

/// Returns `true` when both maps bind the same keys to equal values.
pub fn map_eq<K, V, L, R>(left: &L, right: &R) -> bool
where
    V: PartialEq,
    L: MapView<K, V> + ?Sized,
    R: MapView<K, V> + ?Sized,
{
    left.len() == right.len()
        && left
            .entries()
            .all(|(key, value)| right.get(key) == Some(value))
}

/// Returns `true` when both sets hold the same elements.
pub fn set_eq<T, L, R>(left: &L, right: &R) -> bool
where
    L: SetView<T> + ?Sized,
    R: SetView<T> + ?Sized,
{
    left.len() == right.len() && left.elements().all(|element| right.contains(element))
}

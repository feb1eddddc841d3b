//! Persistent (immutable) hash set based on HAMT.
//!
//! [`PersistentHashSet`] is a [`PersistentHashMap`] whose values carry no
//! information, so it inherits the map's structural sharing and
//! O(log32 N) operations.
//!
//! # Examples
//!
//! ```rust
//! use hermit::persistent::PersistentHashSet;
//!
//! let set = PersistentHashSet::new().put(1).put(2).put(3);
//! assert!(set.contains(&2));
//!
//! let other: PersistentHashSet<i32> = [2, 3, 4].into_iter().collect();
//! assert_eq!(set.union(&other).len(), 4);
//! assert_eq!(set.intersection(&other).len(), 2);
//! assert_eq!(set.difference(&other).len(), 1);
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;

use super::hashmap::{PersistentHashMap, PersistentHashMapIntoIterator, PersistentHashMapIterator};
use super::insertion_order_set::InsertionOrderSet;
use crate::hashing::unordered_hash;
use crate::render::write_tagged;
use crate::transform::Source;

/// A persistent (immutable) hash set.
///
/// Equality and hashing ignore iteration order: two sets are equal when they
/// hold the same elements.
pub struct PersistentHashSet<T> {
    map: PersistentHashMap<T, ()>,
}

impl<T> Clone for PersistentHashSet<T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T> PersistentHashSet<T> {
    /// Creates a new empty set. No allocation takes place.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: PersistentHashMap::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the elements in trie order.
    #[must_use]
    pub fn iter(&self) -> PersistentHashSetIterator<'_, T> {
        PersistentHashSetIterator {
            entries: self.map.iter(),
        }
    }
}

impl<T: Hash + Eq> PersistentHashSet<T> {
    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(element)
    }

    /// Returns `true` if every element of this set is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq + Clone> PersistentHashSet<T> {
    /// Returns a set that also contains `element`.
    ///
    /// Putting an element that is already present returns an equal set.
    #[must_use]
    pub fn put(&self, element: T) -> Self {
        if self.contains(&element) {
            return self.clone();
        }
        Self {
            map: self.map.assoc(element, ()),
        }
    }

    /// Returns a set without `element`.
    ///
    /// Removing an absent element returns an equal set.
    #[must_use]
    pub fn without<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self {
            map: self.map.without(element),
        }
    }

    /// Returns the elements present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let (larger, smaller) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .iter()
            .fold(larger.clone(), |union, element| union.put(element.clone()))
    }

    /// Returns the elements present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let (larger, smaller) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        smaller
            .iter()
            .filter(|element| larger.contains(*element))
            .cloned()
            .collect()
    }

    /// Returns the elements of this set that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        other
            .iter()
            .fold(self.clone(), |difference, element| difference.without(element))
    }

    /// Starts a lazy transform pipeline over the elements.
    #[must_use]
    pub fn transform(&self) -> Source<Self> {
        Source::new(self.clone())
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`PersistentHashSet`].
pub struct PersistentHashSetIterator<'a, T> {
    entries: PersistentHashMapIterator<'a, T, ()>,
}

impl<'a, T> Iterator for PersistentHashSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentHashSetIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentHashSet`].
pub struct PersistentHashSetIntoIterator<T> {
    entries: PersistentHashMapIntoIterator<T, ()>,
}

impl<T> Iterator for PersistentHashSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentHashSetIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for PersistentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Self {
            map: iterable.into_iter().map(|element| (element, ())).collect(),
        }
    }
}

impl<T: Clone> IntoIterator for PersistentHashSet<T> {
    type Item = T;
    type IntoIter = PersistentHashSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentHashSetIntoIterator {
            entries: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentHashSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq> PartialEq for PersistentHashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Hash + Eq> Eq for PersistentHashSet<T> {}

impl<T: Hash + Eq, S: BuildHasher> PartialEq<HashSet<T, S>> for PersistentHashSet<T> {
    fn eq(&self, other: &HashSet<T, S>) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq<PersistentHashSet<T>> for HashSet<T, S> {
    fn eq(&self, other: &PersistentHashSet<T>) -> bool {
        other == self
    }
}

impl<T: Hash + Eq> PartialEq<InsertionOrderSet<T>> for PersistentHashSet<T> {
    fn eq(&self, other: &InsertionOrderSet<T>) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq> PartialEq<PersistentHashSet<T>> for InsertionOrderSet<T> {
    fn eq(&self, other: &PersistentHashSet<T>) -> bool {
        other == self
    }
}

/// Hashes the length and an order-independent combination of the elements.
///
/// Agrees with [`InsertionOrderSet`] for equal contents.
impl<T: Hash> Hash for PersistentHashSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        unordered_hash(self.iter()).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

/// Renders `PersistentHashSet(e1,e2,...)` in iteration order.
impl<T: fmt::Debug> fmt::Display for PersistentHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tagged(formatter, "PersistentHashSet", self.iter())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentHashSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct PersistentHashSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentHashSetVisitor<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
{
    type Value = PersistentHashSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut sequence: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = PersistentHashSet::new();
        while let Some(element) = sequence.next_element()? {
            set = set.put(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentHashSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentHashSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

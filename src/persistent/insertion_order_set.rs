//! Persistent set that remembers the order in which elements were first added.
//!
//! [`InsertionOrderSet`] pairs a [`PersistentHashMap`] from element to
//! sequence number with a [`PersistentVector`] of slots indexed by that
//! number. Lookups go through the map; iteration walks the slots.
//!
//! Removing an element leaves an empty slot behind so that the remaining
//! sequence numbers stay valid. Empty slots at the end are dropped at once;
//! when empty slots outnumber the elements, the slots are rebuilt densely and
//! the elements renumbered in their existing order.
//!
//! # Examples
//!
//! ```rust
//! use hermit::persistent::InsertionOrderSet;
//!
//! let set = InsertionOrderSet::new().put("b").put("a").put("c");
//! let reordered = set.without("b").put("b");
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a", "c"]);
//! assert_eq!(reordered.iter().copied().collect::<Vec<_>>(), vec!["a", "c", "b"]);
//! assert_eq!(set, reordered);
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;

use super::hashmap::PersistentHashMap;
use super::vector::{PersistentVector, PersistentVectorIterator};
use crate::hashing::unordered_hash;
use crate::render::write_tagged;
use crate::transform::Source;

/// A persistent hash set that iterates in first-insertion order.
///
/// Re-inserting an element that is already present keeps its original
/// position. Equality and hashing ignore order, exactly as for
/// [`PersistentHashSet`](super::PersistentHashSet).
pub struct InsertionOrderSet<T> {
    positions: PersistentHashMap<T, usize>,
    slots: PersistentVector<Option<T>>,
}

impl<T> Clone for InsertionOrderSet<T> {
    fn clone(&self) -> Self {
        Self {
            positions: self.positions.clone(),
            slots: self.slots.clone(),
        }
    }
}

impl<T> InsertionOrderSet<T> {
    /// Creates a new empty set. No allocation takes place.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: PersistentHashMap::new(),
            slots: PersistentVector::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns an iterator over the elements in insertion order.
    #[must_use]
    pub fn iter(&self) -> InsertionOrderSetIterator<'_, T> {
        InsertionOrderSetIterator {
            slots: self.slots.iter(),
            remaining: self.len(),
        }
    }

    /// Returns the earliest inserted element still present.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }
}

impl<T: Hash + Eq> InsertionOrderSet<T> {
    /// Returns `true` if the set contains `element`.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(element)
    }

    /// Returns the sequence number recorded for `element`.
    ///
    /// Numbers increase with insertion order. They are stable across `put`
    /// and across removals of other elements, except that a compaction after
    /// many removals renumbers the survivors without reordering them.
    #[must_use]
    pub fn sequence_number<Q>(&self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(element).copied()
    }
}

impl<T: Hash + Eq + Clone> InsertionOrderSet<T> {
    /// Returns a set that also contains `element`, placed after every element
    /// already present.
    ///
    /// Putting an element that is already present returns an equal set with
    /// the same iteration order.
    #[must_use]
    pub fn put(&self, element: T) -> Self {
        if self.contains(&element) {
            return self.clone();
        }
        let sequence = self.slots.len();
        Self {
            positions: self.positions.assoc(element.clone(), sequence),
            slots: self.slots.push_back(Some(element)),
        }
    }

    /// Returns a set without `element`; the others keep their order.
    ///
    /// Removing an absent element returns an equal set.
    #[must_use]
    pub fn without<Q>(&self, element: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&sequence) = self.positions.get(element) else {
            return self.clone();
        };
        let Some(mut slots) = self.slots.update(sequence, None) else {
            return self.clone();
        };
        while matches!(slots.last(), Some(None)) {
            match slots.pop_back() {
                Some((shorter, _)) => slots = shorter,
                None => break,
            }
        }
        let reduced = Self {
            positions: self.positions.without(element),
            slots,
        };
        if reduced.slots.len() - reduced.len() > reduced.len() {
            reduced.compacted()
        } else {
            reduced
        }
    }

    /// Rebuilds the slots without holes, renumbering in iteration order.
    fn compacted(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Starts a lazy transform pipeline over the elements in insertion order.
    #[must_use]
    pub fn transform(&self) -> Source<Self> {
        Source::new(self.clone())
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of an [`InsertionOrderSet`], in insertion
/// order.
pub struct InsertionOrderSetIterator<'a, T> {
    slots: PersistentVectorIterator<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for InsertionOrderSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.slots.find_map(Option::as_ref)?;
        self.remaining -= 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InsertionOrderSetIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for InsertionOrderSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for InsertionOrderSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        iterable.into_iter().fold(Self::new(), |set, element| set.put(element))
    }
}

impl<'a, T> IntoIterator for &'a InsertionOrderSet<T> {
    type Item = &'a T;
    type IntoIter = InsertionOrderSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Hash + Eq> PartialEq for InsertionOrderSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq> Eq for InsertionOrderSet<T> {}

impl<T: Hash + Eq, S: BuildHasher> PartialEq<HashSet<T, S>> for InsertionOrderSet<T> {
    fn eq(&self, other: &HashSet<T, S>) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq<InsertionOrderSet<T>> for HashSet<T, S> {
    fn eq(&self, other: &InsertionOrderSet<T>) -> bool {
        other == self
    }
}

/// Hashes exactly like a [`PersistentHashSet`](super::PersistentHashSet) with
/// the same elements.
impl<T: Hash> Hash for InsertionOrderSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        unordered_hash(self.iter()).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for InsertionOrderSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

/// Renders `InsertionOrderSet(e1,e2,...)` in insertion order.
impl<T: fmt::Debug> fmt::Display for InsertionOrderSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tagged(formatter, "InsertionOrderSet", self.iter())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for InsertionOrderSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct InsertionOrderSetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for InsertionOrderSetVisitor<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
{
    type Value = InsertionOrderSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut sequence: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = InsertionOrderSet::new();
        while let Some(element) = sequence.next_element()? {
            set = set.put(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for InsertionOrderSet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(InsertionOrderSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ordered<T: Clone>(set: &InsertionOrderSet<T>) -> Vec<T> {
        set.iter().cloned().collect()
    }

    #[rstest]
    fn test_iteration_follows_first_insertion() {
        let set: InsertionOrderSet<i32> = [5, 3, 9, 3, 5, 1].into_iter().collect();
        assert_eq!(ordered(&set), vec![5, 3, 9, 1]);
        assert_eq!(set.len(), 4);
    }

    #[rstest]
    fn test_reinsertion_keeps_sequence_number() {
        let set = InsertionOrderSet::new().put("a").put("b");
        let again = set.put("a");
        assert_eq!(again.sequence_number("a"), Some(0));
        assert_eq!(ordered(&again), vec!["a", "b"]);
    }

    #[rstest]
    fn test_removal_keeps_relative_order() {
        let set: InsertionOrderSet<i32> = (0..10).collect();
        let reduced = set.without(&4).without(&0).without(&9);
        assert_eq!(ordered(&reduced), vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(reduced.sequence_number(&5), Some(5));
        assert_eq!(ordered(&set), (0..10).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_trailing_holes_are_trimmed() {
        let set: InsertionOrderSet<i32> = (0..5).collect();
        let reduced = set.without(&3).without(&4);
        assert_eq!(reduced.slots.len(), 3);
        assert_eq!(reduced.put(7).sequence_number(&7), Some(3));
    }

    #[rstest]
    fn test_compaction_renumbers_in_order() {
        let set: InsertionOrderSet<i32> = (0..10).collect();
        let reduced = (0..6).fold(set, |set, element| set.without(&element));
        assert_eq!(reduced.slots.len(), 4);
        assert_eq!(ordered(&reduced), vec![6, 7, 8, 9]);
        assert_eq!(reduced.sequence_number(&6), Some(0));
    }

    #[rstest]
    fn test_removing_everything_leaves_no_slots() {
        let set: InsertionOrderSet<i32> = (0..40).collect();
        let emptied = (0..40).rev().fold(set, |set, element| set.without(&element));
        assert!(emptied.is_empty());
        assert!(emptied.slots.is_empty());
    }

    #[rstest]
    fn test_display() {
        assert_eq!(InsertionOrderSet::<&str>::new().to_string(), "InsertionOrderSet()");
        assert_eq!(
            InsertionOrderSet::new().put("hello").to_string(),
            "InsertionOrderSet(\"hello\")"
        );
    }
}

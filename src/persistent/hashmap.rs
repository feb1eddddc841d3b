//! Persistent (immutable) hash map based on HAMT.
//!
//! This module provides [`PersistentHashMap`], an immutable hash map
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentHashMap` is a Hash Array Mapped Trie (HAMT) in the style of
//! Clojure's `PersistentHashMap`:
//!
//! - O(log32 N) `get`, `assoc` and `without` (effectively O(1) in practice)
//! - O(1) `len`, `is_empty` and `clone`
//!
//! # Internal Structure
//!
//! Each level of the trie consumes 5 bits of the key hash, least significant
//! bits first. Leaves are buckets of entries sharing one full 64-bit hash; a
//! bucket holding more than one entry is a collision node. Removing entries
//! lifts a lone bucket into its parent and drops empty branches, so the trie
//! stays as shallow as its contents allow.
//!
//! # Examples
//!
//! ```rust
//! use hermit::persistent::PersistentHashMap;
//!
//! let map = PersistentHashMap::new()
//!     .assoc("one".to_string(), 1)
//!     .assoc("two".to_string(), 2);
//!
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(map.get("three"), None);
//!
//! let updated = map.without("one");
//! assert_eq!(map.len(), 2);
//! assert_eq!(updated.len(), 1);
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FromIterator;

use smallvec::{SmallVec, smallvec};

use super::ReferenceCounter;
use super::trie::{BITS_PER_LEVEL, Branch, Leaves, Node, lookup, slot_at};
use crate::error::CollectionError;
use crate::hashing::{hash_of, unordered_hash};
use crate::render::{KeyValue, write_tagged};
use crate::transform::Source;

/// Number of trie levels needed to consume a 64-bit hash.
const HASH_LEVELS: usize = 13;

/// The slots a hash selects, from the root down.
fn hash_slots(hash: u64) -> impl Iterator<Item = usize> {
    (0..HASH_LEVELS).map(move |depth| slot_at(hash, depth * BITS_PER_LEVEL))
}

// =============================================================================
// Bucket Definition
// =============================================================================

/// Leaf payload: every entry whose key hashes to `hash`.
#[derive(Clone)]
struct Bucket<K, V> {
    hash: u64,
    entries: SmallVec<[(K, V); 1]>,
}

impl<K, V> Bucket<K, V> {
    fn single(hash: u64, key: K, value: V) -> Self {
        Self {
            hash,
            entries: smallvec![(key, value)],
        }
    }

    fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .position(|(candidate, _)| candidate.borrow() == key)
    }
}

impl<K: Eq + Clone, V: Clone> Bucket<K, V> {
    /// Returns the bucket with `key` bound to `value`, and whether `key` is new.
    fn with_entry(&self, key: K, value: V) -> (Self, bool) {
        let mut entries = self.entries.clone();
        let added = match self.position_of(&key) {
            Some(position) => {
                entries[position] = (key, value);
                false
            }
            None => {
                entries.push((key, value));
                true
            }
        };
        (
            Self {
                hash: self.hash,
                entries,
            },
            added,
        )
    }

    fn without_position(&self, position: usize) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(position);
        Self {
            hash: self.hash,
            entries,
        }
    }
}

type MapNode<K, V> = Node<Bucket<K, V>>;

/// Outcome of removing a key from a subtree.
enum Removal<K, V> {
    /// The key was not present; the subtree is unchanged.
    Absent,
    /// The key was removed; `None` when the subtree became empty.
    Removed(Option<ReferenceCounter<MapNode<K, V>>>),
}

// =============================================================================
// PersistentHashMap Definition
// =============================================================================

/// A persistent (immutable) hash map based on HAMT.
///
/// Keys are hashed with [`hash_of`](crate::hashing::hash_of). Equality is
/// value based: two maps are equal when they hold the same mappings, whatever
/// order the entries were inserted in.
///
/// # Time Complexity
///
/// | Operation     | Complexity            |
/// |---------------|-----------------------|
/// | `new`         | O(1), no allocation   |
/// | `get`         | O(log32 N)            |
/// | `assoc`       | O(log32 N)            |
/// | `without`     | O(log32 N)            |
/// | `len`         | O(1)                  |
///
/// # Examples
///
/// ```rust
/// use hermit::persistent::PersistentHashMap;
///
/// let map = PersistentHashMap::new()
///     .assoc('R', "red")
///     .assoc('G', "green")
///     .assoc('B', "blue");
///
/// assert_eq!(map.get(&'R'), Some(&"red"));
/// assert_eq!(map.get(&'x'), None);
/// assert_eq!(map.get_or_else(&'x', &"none"), &"none");
/// ```
pub struct PersistentHashMap<K, V> {
    root: Option<ReferenceCounter<MapNode<K, V>>>,
    length: usize,
}

impl<K, V> Clone for PersistentHashMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
        }
    }
}

impl<K, V> PersistentHashMap<K, V> {
    /// Creates a new empty map. No allocation takes place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let map: PersistentHashMap<String, i32> = PersistentHashMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns an iterator over the entries.
    ///
    /// The order follows the trie layout: deterministic for a given set of
    /// keys, but otherwise unspecified.
    #[must_use]
    pub fn iter(&self) -> PersistentHashMapIterator<'_, K, V> {
        PersistentHashMapIterator {
            buckets: Leaves::new(self.root.as_deref()),
            entries: [].iter(),
            remaining: self.length,
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Folds every entry into an accumulator.
    ///
    /// Each entry is visited exactly once, in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let map: PersistentHashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// assert_eq!(map.fold_left(0, |sum, _, value| sum + value), 3);
    /// ```
    pub fn fold_left<A, F>(&self, seed: A, mut function: F) -> A
    where
        F: FnMut(A, &K, &V) -> A,
    {
        self.iter()
            .fold(seed, |accumulator, (key, value)| function(accumulator, key, value))
    }
}

impl<K: Hash + Eq, V> PersistentHashMap<K, V> {
    /// Returns a reference to the value bound to `key`.
    ///
    /// The key may be any borrowed form of the map's key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc("key".to_string(), 42);
    /// assert_eq!(map.get("key"), Some(&42));
    /// assert_eq!(map.get("other"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = hash_of(key);
        let bucket = lookup(self.root.as_deref()?, hash_slots(hash))?;
        if bucket.hash != hash {
            return None;
        }
        bucket
            .position_of(key)
            .map(|position| &bucket.entries[position].1)
    }

    /// Returns the value bound to `key`, or `default` when it is absent.
    #[must_use]
    pub fn get_or_else<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value bound to `key`, failing when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::KeyNotFound`] when `key` is absent.
    pub fn value_of<Q>(&self, key: &Q) -> Result<&V, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(CollectionError::KeyNotFound)
    }

    /// Returns `true` if the map binds `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> PersistentHashMap<K, V> {
    /// Returns a new map with `key` bound to `value`.
    ///
    /// An existing binding for `key` is replaced; the length grows only when
    /// `key` was absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc("a", 1);
    /// let replaced = map.assoc("a", 2);
    /// assert_eq!(replaced.len(), 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(replaced.get("a"), Some(&2));
    /// ```
    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> Self {
        let hash = hash_of(&key);
        match &self.root {
            None => Self {
                root: Some(ReferenceCounter::new(Node::Leaf(Bucket::single(
                    hash, key, value,
                )))),
                length: 1,
            },
            Some(root) => {
                let (root, added) = Self::assoc_in(root, 0, hash, key, value);
                Self {
                    root: Some(root),
                    length: self.length + usize::from(added),
                }
            }
        }
    }

    fn assoc_in(
        node: &ReferenceCounter<MapNode<K, V>>,
        shift: usize,
        hash: u64,
        key: K,
        value: V,
    ) -> (ReferenceCounter<MapNode<K, V>>, bool) {
        match &**node {
            Node::Branch(branch) => {
                let slot = slot_at(hash, shift);
                let (child, added) = match branch.child(slot) {
                    Some(child) => {
                        Self::assoc_in(child, shift + BITS_PER_LEVEL, hash, key, value)
                    }
                    None => (
                        ReferenceCounter::new(Node::Leaf(Bucket::single(hash, key, value))),
                        true,
                    ),
                };
                (
                    ReferenceCounter::new(Node::Branch(branch.with_child(slot, child))),
                    added,
                )
            }
            Node::Leaf(bucket) if bucket.hash == hash => {
                let (bucket, added) = bucket.with_entry(key, value);
                (ReferenceCounter::new(Node::Leaf(bucket)), added)
            }
            Node::Leaf(bucket) => {
                // Push the occupant one level down and retry at this level.
                let branch = Branch::single(slot_at(bucket.hash, shift), ReferenceCounter::clone(node));
                let split = ReferenceCounter::new(Node::Branch(branch));
                Self::assoc_in(&split, shift, hash, key, value)
            }
        }
    }

    /// Returns a new map without `key`.
    ///
    /// Removing an absent key returns a map equal to this one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc(1, "one").assoc(2, "two");
    /// assert_eq!(map.without(&1).len(), 1);
    /// assert_eq!(map.without(&3), map);
    /// ```
    #[must_use]
    pub fn without<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(root) = &self.root else {
            return self.clone();
        };
        match Self::without_in(root, 0, hash_of(key), key) {
            Removal::Absent => self.clone(),
            Removal::Removed(root) => Self {
                root,
                length: self.length - 1,
            },
        }
    }

    fn without_in<Q>(
        node: &ReferenceCounter<MapNode<K, V>>,
        shift: usize,
        hash: u64,
        key: &Q,
    ) -> Removal<K, V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match &**node {
            Node::Leaf(bucket) => {
                if bucket.hash != hash {
                    return Removal::Absent;
                }
                match bucket.position_of(key) {
                    None => Removal::Absent,
                    Some(_) if bucket.entries.len() == 1 => Removal::Removed(None),
                    Some(position) => Removal::Removed(Some(ReferenceCounter::new(Node::Leaf(
                        bucket.without_position(position),
                    )))),
                }
            }
            Node::Branch(branch) => {
                let slot = slot_at(hash, shift);
                let Some(child) = branch.child(slot) else {
                    return Removal::Absent;
                };
                match Self::without_in(child, shift + BITS_PER_LEVEL, hash, key) {
                    Removal::Absent => Removal::Absent,
                    Removal::Removed(Some(child)) => {
                        Removal::Removed(Some(Self::compact(branch.with_child(slot, child))))
                    }
                    Removal::Removed(None) => {
                        let remaining = branch.without_child(slot);
                        if remaining.is_empty() {
                            Removal::Removed(None)
                        } else {
                            Removal::Removed(Some(Self::compact(remaining)))
                        }
                    }
                }
            }
        }
    }

    /// Replaces a branch whose only child is a bucket by that bucket.
    fn compact(branch: Branch<Bucket<K, V>>) -> ReferenceCounter<MapNode<K, V>> {
        match branch.sole_child() {
            Some(child) if child.is_leaf() => ReferenceCounter::clone(child),
            _ => ReferenceCounter::new(Node::Branch(branch)),
        }
    }

    /// Returns a map holding the entries of both maps; `other` wins on
    /// conflicting keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentHashMap;
    ///
    /// let left = PersistentHashMap::new().assoc("a", 1).assoc("b", 2);
    /// let right = PersistentHashMap::new().assoc("b", 20).assoc("c", 30);
    /// let merged = left.merge(&right);
    /// assert_eq!(merged.len(), 3);
    /// assert_eq!(merged.get("b"), Some(&20));
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        other.iter().fold(self.clone(), |merged, (key, value)| {
            merged.assoc(key.clone(), value.clone())
        })
    }

    /// Starts a lazy transform pipeline over the entries as owned pairs.
    #[must_use]
    pub fn transform(&self) -> Source<Self> {
        Source::new(self.clone())
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`PersistentHashMap`].
pub struct PersistentHashMapIterator<'a, K, V> {
    buckets: Leaves<'a, Bucket<K, V>>,
    entries: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for PersistentHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.entries.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.entries = self.buckets.next()?.entries.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PersistentHashMapIterator<'_, K, V> {}

/// An owning iterator over the entries of a [`PersistentHashMap`].
pub struct PersistentHashMapIntoIterator<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for PersistentHashMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for PersistentHashMapIntoIterator<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for PersistentHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for PersistentHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        iterable
            .into_iter()
            .fold(Self::new(), |map, (key, value)| map.assoc(key, value))
    }
}

impl<K: Clone, V: Clone> IntoIterator for PersistentHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = PersistentHashMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let entries: Vec<_> = self
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        PersistentHashMapIntoIterator {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for PersistentHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        let shares_root = match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        };
        shares_root
            || self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for PersistentHashMap<K, V> {}

impl<K, V, S> PartialEq<HashMap<K, V, S>> for PersistentHashMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<K, V, S>) -> bool {
        self.length == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> PartialEq<PersistentHashMap<K, V>> for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &PersistentHashMap<K, V>) -> bool {
        other == self
    }
}

/// Hashes the length and an order-independent combination of the entries,
/// so maps built in different orders hash alike.
impl<K: Hash, V: Hash> Hash for PersistentHashMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        unordered_hash(self.iter()).hash(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentHashMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `PersistentHashMap(kv(k1,v1),kv(k2,v2),...)` in iteration order.
impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for PersistentHashMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tagged(
            formatter,
            "PersistentHashMap",
            self.iter().map(|(key, value)| KeyValue(key, value)),
        )
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for PersistentHashMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentHashMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for PersistentHashMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentHashMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = PersistentHashMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map = map.assoc(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for PersistentHashMap<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq + Clone,
    V: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentHashMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// A key whose hash depends only on `hash`, so distinct labels collide.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct FixedHashKey {
        label: &'static str,
        hash: u64,
    }

    impl Hash for FixedHashKey {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.hash.hash(state);
        }
    }

    fn key(label: &'static str, hash: u64) -> FixedHashKey {
        FixedHashKey { label, hash }
    }

    // =========================================================================
    // Basic Operations
    // =========================================================================

    #[rstest]
    fn test_new_map_is_empty() {
        let map: PersistentHashMap<i32, i32> = PersistentHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        assert_eq!(map.iter().count(), 0);
    }

    #[rstest]
    fn test_assoc_many_then_get() {
        let map: PersistentHashMap<i32, i32> = (0..5000).map(|n| (n, n * 2)).collect();
        assert_eq!(map.len(), 5000);
        for n in 0..5000 {
            assert_eq!(map.get(&n), Some(&(n * 2)));
        }
        assert_eq!(map.get(&5000), None);
    }

    #[rstest]
    fn test_assoc_replaces_without_growing() {
        let map = PersistentHashMap::new().assoc("a", 1).assoc("a", 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&2));
    }

    #[rstest]
    fn test_without_every_key_empties_map() {
        let map: PersistentHashMap<i32, i32> = (0..1000).map(|n| (n, n)).collect();
        let emptied = (0..1000).fold(map.clone(), |map, n| map.without(&n));
        assert!(emptied.is_empty());
        assert!(emptied.root.is_none());
        assert_eq!(map.len(), 1000);
    }

    #[rstest]
    fn test_value_of_reports_missing_key() {
        let map = PersistentHashMap::new().assoc("a", 1);
        assert_eq!(map.value_of("a"), Ok(&1));
        assert_eq!(map.value_of("b"), Err(CollectionError::KeyNotFound));
    }

    // =========================================================================
    // Collisions and Compaction
    // =========================================================================

    #[rstest]
    fn test_full_hash_collision_shares_a_bucket() {
        let map = PersistentHashMap::new()
            .assoc(key("first", 7), 1)
            .assoc(key("second", 7), 2)
            .assoc(key("third", 7), 3);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&key("second", 7)), Some(&2));
        assert_eq!(map.get(&key("fourth", 7)), None);

        let reduced = map.without(&key("second", 7));
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced.get(&key("second", 7)), None);
        assert_eq!(reduced.get(&key("third", 7)), Some(&3));
    }

    /// Finds a key whose hash agrees with `hash_of(&0)` in the lowest
    /// `bits` bits but differs above them.
    fn partially_colliding_key(bits: u32) -> u64 {
        let mask = (1_u64 << bits) - 1;
        let target = hash_of(&0_u64);
        (1_u64..)
            .find(|candidate| {
                let hash = hash_of(candidate);
                hash & mask == target & mask && hash != target
            })
            .unwrap()
    }

    fn depth_of(map: &PersistentHashMap<u64, i32>) -> usize {
        fn depth(node: &MapNode<u64, i32>) -> usize {
            match node {
                Node::Leaf(_) => 0,
                Node::Branch(branch) => {
                    1 + branch
                        .children()
                        .iter()
                        .map(|child| depth(child))
                        .max()
                        .unwrap_or(0)
                }
            }
        }
        map.root.as_deref().map_or(0, depth)
    }

    #[rstest]
    fn test_partial_collision_nests_branches() {
        let other = partially_colliding_key(10);
        let map = PersistentHashMap::new().assoc(0_u64, 1).assoc(other, 2);
        assert_eq!(map.get(&0), Some(&1));
        assert_eq!(map.get(&other), Some(&2));
        assert!(depth_of(&map) >= 3);
    }

    #[rstest]
    fn test_removal_lifts_lone_bucket() {
        let other = partially_colliding_key(10);
        let map = PersistentHashMap::new().assoc(0_u64, 1).assoc(other, 2);
        let reduced = map.without(&other);
        assert_eq!(depth_of(&reduced), 0);
        assert_eq!(reduced.get(&0), Some(&1));
        assert_eq!(map.get(&other), Some(&2));
    }

    // =========================================================================
    // Equality, Hashing and Rendering
    // =========================================================================

    #[rstest]
    fn test_equality_ignores_insertion_order() {
        let forward: PersistentHashMap<i32, i32> = (0..200).map(|n| (n, n)).collect();
        let backward: PersistentHashMap<i32, i32> = (0..200).rev().map(|n| (n, n)).collect();
        assert_eq!(forward, backward);
        assert_eq!(hash_of(&forward), hash_of(&backward));
    }

    #[rstest]
    fn test_equality_with_std_hash_map() {
        let persistent = PersistentHashMap::new().assoc("a", 1).assoc("b", 2);
        let standard: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(persistent, standard);
        assert_eq!(standard, persistent);
        assert_ne!(persistent.assoc("c", 3), standard);
    }

    #[rstest]
    fn test_display() {
        let empty: PersistentHashMap<i32, &str> = PersistentHashMap::new();
        assert_eq!(empty.to_string(), "PersistentHashMap()");
        let single = PersistentHashMap::new().assoc(1, "one");
        assert_eq!(single.to_string(), "PersistentHashMap(kv(1,\"one\"))");
    }

    #[rstest]
    fn test_fold_left_visits_every_entry_once() {
        let map: PersistentHashMap<i32, i32> = (1..=100).map(|n| (n, n)).collect();
        assert_eq!(map.fold_left(0, |sum, _, value| sum + value), 5050);
        assert_eq!(map.keys().count(), 100);
        assert_eq!(map.values().sum::<i32>(), 5050);
    }
}

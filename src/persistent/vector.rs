//! Persistent (immutable) vector based on a 32-way trie.
//!
//! This module provides [`PersistentVector`], an immutable indexed sequence
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! The vector stores full 32-element chunks as the leaves of the shared trie
//! and keeps the last 1 to 32 elements in a separate tail chunk:
//!
//! - O(log32 N) random access and update (effectively O(1) in practice)
//! - Amortized O(1) `push_back`: only the tail is copied until it fills, then
//!   it is committed as a new leaf, copying the path to its insertion point
//! - O(log32 N) `pop_back`
//! - O(1) `len`, `is_empty` and `clone`
//!
//! # Examples
//!
//! ```rust
//! use hermit::persistent::PersistentVector;
//!
//! let vector = PersistentVector::new()
//!     .push_back(1)
//!     .push_back(2)
//!     .push_back(3);
//!
//! assert_eq!(vector.get(0), Some(&1));
//! assert_eq!(vector.get(3), None);
//!
//! // Structural sharing: the original vector is preserved
//! let extended = vector.push_back(4);
//! assert_eq!(vector.len(), 3);
//! assert_eq!(extended.len(), 4);
//! assert_eq!(extended.to_string(), "PersistentVector(1,2,3,4)");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;

use super::ReferenceCounter;
use super::trie::{BITS_PER_LEVEL, BRANCHING_FACTOR, Branch, Leaves, Node, lookup, slot_at};
use crate::error::CollectionError;
use crate::render::write_tagged;
use crate::transform::{Source, Transformable};

/// Offset of an element inside its chunk.
const CHUNK_MASK: usize = BRANCHING_FACTOR - 1;

/// A shared run of elements: a trie leaf or the tail.
type Chunk<T> = ReferenceCounter<[T]>;

type VectorNode<T> = Node<Chunk<T>>;

// =============================================================================
// PersistentVector Definition
// =============================================================================

/// A persistent (immutable) vector based on a 32-way trie.
///
/// # Time Complexity
///
/// | Operation    | Complexity                  |
/// |--------------|-----------------------------|
/// | `new`        | O(1), no allocation         |
/// | `get`        | O(log32 N)                  |
/// | `push_back`  | O(log32 N), amortized O(1)  |
/// | `pop_back`   | O(log32 N)                  |
/// | `assoc`      | O(log32 N)                  |
/// | `len`        | O(1)                        |
/// | `iter`       | O(1) to create, O(N) total  |
///
/// # Examples
///
/// ```rust
/// use hermit::persistent::PersistentVector;
///
/// let vector: PersistentVector<i32> = (0..100).collect();
/// assert_eq!(vector.len(), 100);
/// assert_eq!(vector.get(50), Some(&50));
/// assert!(vector.element_at(100).is_err());
/// ```
pub struct PersistentVector<T> {
    /// Total number of elements
    length: usize,
    /// Bit offset of the root level (5 for a single level of branches)
    shift: usize,
    /// Committed chunks; `None` while every element fits in the tail
    root: Option<ReferenceCounter<VectorNode<T>>>,
    /// Trailing 1..=32 elements; `None` only when the vector is empty
    tail: Option<Chunk<T>>,
}

impl<T> Clone for PersistentVector<T> {
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            shift: self.shift,
            root: self.root.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    ///
    /// Empty vectors allocate nothing, so every empty vector is as cheap as a
    /// shared singleton.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = PersistentVector::new();
    /// assert!(vector.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            length: 0,
            shift: BITS_PER_LEVEL,
            root: None,
            tail: None,
        }
    }

    /// Creates a vector containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            length: 1,
            shift: BITS_PER_LEVEL,
            root: None,
            tail: Some(ReferenceCounter::from(vec![element])),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Index of the first element stored in the tail.
    #[inline]
    const fn tail_offset(&self) -> usize {
        if self.length < BRANCHING_FACTOR {
            0
        } else {
            ((self.length - 1) >> BITS_PER_LEVEL) << BITS_PER_LEVEL
        }
    }

    /// Returns the shared chunk holding `index`.
    fn shared_chunk_for(&self, index: usize) -> Option<&Chunk<T>> {
        if index >= self.length {
            return None;
        }
        if index >= self.tail_offset() {
            return self.tail.as_ref();
        }
        let levels = (1..=self.shift / BITS_PER_LEVEL).rev();
        let slots = levels.map(|level| slot_at(index as u64, level * BITS_PER_LEVEL));
        lookup(self.root.as_deref()?, slots)
    }

    #[inline]
    fn chunk_for(&self, index: usize) -> Option<&[T]> {
        self.shared_chunk_for(index).map(|chunk| &**chunk)
    }

    /// Returns a reference to the element at `index`, or `None` when out of
    /// range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (0..10).collect();
    /// assert_eq!(vector.get(5), Some(&5));
    /// assert_eq!(vector.get(10), None);
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.chunk_for(index)?.get(index & CHUNK_MASK)
    }

    /// Returns the element at `index`, failing when it is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] when `index >= len()`.
    pub fn element_at(&self, index: usize) -> Result<&T, CollectionError> {
        self.get(index).ok_or(CollectionError::IndexOutOfRange {
            index,
            length: self.length,
        })
    }

    /// Returns the first element.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tail.as_deref().and_then(<[T]>::last)
    }

    /// Returns an iterator over references to the elements, front to back.
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator {
            leaves: Leaves::new(self.root.as_deref()),
            tail: self.tail.as_deref(),
            current: [].iter(),
            remaining: self.length,
        }
    }

    /// Folds the elements from left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=4).collect();
    /// assert_eq!(vector.fold_left(0, |sum, element| sum + element), 10);
    /// ```
    pub fn fold_left<A, F>(&self, seed: A, function: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(seed, function)
    }

    /// Adds `chunk` as the leaf starting at index `leaf_start`.
    ///
    /// Returns the new root and its shift. A new root level is added when the
    /// current trie has no room left.
    fn commit_leaf(
        root: Option<&ReferenceCounter<VectorNode<T>>>,
        shift: usize,
        leaf_start: usize,
        chunk: Chunk<T>,
    ) -> (ReferenceCounter<VectorNode<T>>, usize) {
        let leaf = ReferenceCounter::new(Node::Leaf(chunk));
        let Some(root) = root else {
            let branch = Branch::single(0, leaf);
            return (ReferenceCounter::new(Node::Branch(branch)), BITS_PER_LEVEL);
        };
        let Some(branch) = root.as_branch() else {
            unreachable!("vector roots are always branches");
        };
        if (leaf_start >> BITS_PER_LEVEL) >= (1 << shift) {
            let grown = Branch::single(0, ReferenceCounter::clone(root))
                .with_child(1, Self::new_path(shift, leaf));
            (
                ReferenceCounter::new(Node::Branch(grown)),
                shift + BITS_PER_LEVEL,
            )
        } else {
            let branch = Self::push_leaf_into(shift, branch, leaf_start, leaf);
            (ReferenceCounter::new(Node::Branch(branch)), shift)
        }
    }

    fn push_leaf_into(
        shift: usize,
        branch: &Branch<Chunk<T>>,
        leaf_start: usize,
        leaf: ReferenceCounter<VectorNode<T>>,
    ) -> Branch<Chunk<T>> {
        let slot = slot_at(leaf_start as u64, shift);
        if shift == BITS_PER_LEVEL {
            return branch.with_child(slot, leaf);
        }
        let child = match branch.child(slot).and_then(|child| child.as_branch()) {
            Some(child) => ReferenceCounter::new(Node::Branch(Self::push_leaf_into(
                shift - BITS_PER_LEVEL,
                child,
                leaf_start,
                leaf,
            ))),
            None => Self::new_path(shift - BITS_PER_LEVEL, leaf),
        };
        branch.with_child(slot, child)
    }

    /// Wraps `leaf` in single-child branches up to the level at `shift`.
    fn new_path(shift: usize, leaf: ReferenceCounter<VectorNode<T>>) -> ReferenceCounter<VectorNode<T>> {
        (0..shift / BITS_PER_LEVEL).fold(leaf, |node, _| {
            ReferenceCounter::new(Node::Branch(Branch::single(0, node)))
        })
    }

    /// Removes the rightmost leaf, which holds `last_index`.
    ///
    /// Returns `None` when the branch becomes empty.
    fn pop_leaf_from(
        shift: usize,
        branch: &Branch<Chunk<T>>,
        last_index: usize,
    ) -> Option<Branch<Chunk<T>>> {
        let slot = slot_at(last_index as u64, shift);
        if shift > BITS_PER_LEVEL {
            let child = branch.child(slot).and_then(|child| child.as_branch())?;
            match Self::pop_leaf_from(shift - BITS_PER_LEVEL, child, last_index) {
                Some(remaining) => Some(
                    branch.with_child(slot, ReferenceCounter::new(Node::Branch(remaining))),
                ),
                None if slot == 0 => None,
                None => Some(branch.without_child(slot)),
            }
        } else if slot == 0 {
            None
        } else {
            Some(branch.without_child(slot))
        }
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Appends an element, returning the new vector.
    ///
    /// # Complexity
    ///
    /// O(log32 N) worst case, amortized O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector = PersistentVector::new().push_back(1).push_back(2);
    /// assert_eq!(vector.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        match &self.tail {
            None => Self::singleton(element),
            Some(tail) if tail.len() < BRANCHING_FACTOR => {
                let mut elements = Vec::with_capacity(tail.len() + 1);
                elements.extend_from_slice(tail);
                elements.push(element);
                Self {
                    length: self.length + 1,
                    shift: self.shift,
                    root: self.root.clone(),
                    tail: Some(ReferenceCounter::from(elements)),
                }
            }
            Some(tail) => {
                let (root, shift) = Self::commit_leaf(
                    self.root.as_ref(),
                    self.shift,
                    self.tail_offset(),
                    ReferenceCounter::clone(tail),
                );
                Self {
                    length: self.length + 1,
                    shift,
                    root: Some(root),
                    tail: Some(ReferenceCounter::from(vec![element])),
                }
            }
        }
    }

    /// Removes the last element.
    ///
    /// Returns the shortened vector together with the removed element, or
    /// `None` when the vector is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let (rest, last) = vector.pop_back().unwrap();
    /// assert_eq!(last, 3);
    /// assert_eq!(rest, vec![1, 2]);
    /// ```
    #[must_use]
    pub fn pop_back(&self) -> Option<(Self, T)> {
        let tail = self.tail.as_ref()?;
        let last = tail.last()?.clone();
        if self.length == 1 {
            return Some((Self::new(), last));
        }
        if tail.len() > 1 {
            let shortened = Self {
                length: self.length - 1,
                shift: self.shift,
                root: self.root.clone(),
                tail: Some(ReferenceCounter::from(&tail[..tail.len() - 1])),
            };
            return Some((shortened, last));
        }

        let last_index = self.length - 2;
        let new_tail = ReferenceCounter::clone(self.shared_chunk_for(last_index)?);
        let branch = self.root.as_deref().and_then(Node::as_branch)?;
        let (root, shift) = match Self::pop_leaf_from(self.shift, branch, last_index) {
            None => (None, BITS_PER_LEVEL),
            Some(remaining) => match remaining.sole_child() {
                Some(child) if self.shift > BITS_PER_LEVEL => {
                    (Some(ReferenceCounter::clone(child)), self.shift - BITS_PER_LEVEL)
                }
                _ => (
                    Some(ReferenceCounter::new(Node::Branch(remaining))),
                    self.shift,
                ),
            },
        };
        let shortened = Self {
            length: self.length - 1,
            shift,
            root,
            tail: Some(new_tail),
        };
        Some((shortened, last))
    }

    /// Returns a new vector with `index` replaced by `element`, or `None` when
    /// `index` is out of range.
    ///
    /// Only the path to the affected chunk is copied.
    #[must_use]
    pub fn update(&self, index: usize, element: T) -> Option<Self> {
        if index >= self.length {
            return None;
        }
        if index >= self.tail_offset() {
            let mut elements = self.tail.as_deref()?.to_vec();
            *elements.get_mut(index & CHUNK_MASK)? = element;
            return Some(Self {
                length: self.length,
                shift: self.shift,
                root: self.root.clone(),
                tail: Some(ReferenceCounter::from(elements)),
            });
        }
        let root = Self::replace_in(self.root.as_ref()?, self.shift, index, element);
        Some(Self {
            length: self.length,
            shift: self.shift,
            root: Some(root),
            tail: self.tail.clone(),
        })
    }

    fn replace_in(
        node: &ReferenceCounter<VectorNode<T>>,
        shift: usize,
        index: usize,
        element: T,
    ) -> ReferenceCounter<VectorNode<T>> {
        match &**node {
            Node::Leaf(chunk) => {
                let mut elements = chunk.to_vec();
                elements[index & CHUNK_MASK] = element;
                ReferenceCounter::new(Node::Leaf(ReferenceCounter::from(elements)))
            }
            Node::Branch(branch) => {
                let slot = slot_at(index as u64, shift);
                match branch.child(slot) {
                    Some(child) => {
                        let child = Self::replace_in(child, shift - BITS_PER_LEVEL, index, element);
                        ReferenceCounter::new(Node::Branch(branch.with_child(slot, child)))
                    }
                    None => ReferenceCounter::clone(node),
                }
            }
        }
    }

    /// Associates `element` with `index`.
    ///
    /// Replaces the element at `index`, or appends when `index == len()`.
    /// The original vector is unchanged in every case.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfRange`] when `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<char> = "abc".chars().collect();
    /// assert_eq!(vector.assoc(1, 'x').unwrap(), vec!['a', 'x', 'c']);
    /// assert_eq!(vector.assoc(3, 'd').unwrap(), vec!['a', 'b', 'c', 'd']);
    /// assert!(vector.assoc(5, 'z').is_err());
    /// ```
    pub fn assoc(&self, index: usize, element: T) -> Result<Self, CollectionError> {
        if index == self.length {
            return Ok(self.push_back(element));
        }
        self.update(index, element)
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                length: self.length,
            })
    }

    /// Appends every element of `elements`.
    #[must_use]
    pub fn concat<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        elements
            .into_iter()
            .fold(self.clone(), |vector, element| vector.push_back(element))
    }

    /// Starts a lazy transform pipeline over the elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    /// use hermit::transform::Transformable;
    ///
    /// let vector: PersistentVector<i32> = (1..=5).collect();
    /// let evens = vector.transform().filter(|n| n % 2 == 0).map(|n| n * 10);
    /// assert_eq!(evens.to_vec(), vec![20, 40]);
    /// ```
    #[must_use]
    pub fn transform(&self) -> Source<Self> {
        Source::new(self.clone())
    }

    /// Applies `function` to every element, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// assert_eq!(vector.map(|n| n * 2), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> PersistentVector<U>
    where
        F: Fn(&T) -> U,
    {
        self.transform()
            .map(move |element| function(&element))
            .to_vector()
    }

    /// Applies `function` to every element and concatenates the results.
    ///
    /// Outer elements are visited in order, and each inner sequence is
    /// flattened in order before the next outer element is visited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let repeated = vector.flat_map(|&n| std::iter::repeat_n(n, n as usize));
    /// assert_eq!(repeated, vec![1, 2, 2, 3, 3, 3]);
    /// ```
    #[must_use]
    pub fn flat_map<U, I, F>(&self, function: F) -> PersistentVector<U>
    where
        I: IntoIterator<Item = U>,
        F: Fn(&T) -> I,
    {
        self.transform()
            .flat_map(move |element| function(&element))
            .to_vector()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to the elements of a [`PersistentVector`].
pub struct PersistentVectorIterator<'a, T> {
    leaves: Leaves<'a, Chunk<T>>,
    tail: Option<&'a [T]>,
    current: std::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.current.next() {
                self.remaining -= 1;
                return Some(element);
            }
            self.current = match self.leaves.next() {
                Some(chunk) => chunk.iter(),
                None => self.tail.take()?.iter(),
            };
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentVector`].
///
/// Elements are cloned out of the shared chunks one chunk at a time.
pub struct PersistentVectorIntoIterator<T> {
    vector: PersistentVector<T>,
    next_chunk: usize,
    buffer: std::vec::IntoIter<T>,
}

impl<T: Clone> Iterator for PersistentVectorIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.buffer.next() {
            return Some(element);
        }
        let chunk = self.vector.chunk_for(self.next_chunk)?;
        self.next_chunk += chunk.len();
        self.buffer = chunk.to_vec().into_iter();
        self.buffer.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len() + (self.vector.len() - self.next_chunk);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentVectorIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut root = None;
        let mut shift = BITS_PER_LEVEL;
        let mut committed = 0;
        let mut pending: Vec<T> = Vec::with_capacity(BRANCHING_FACTOR);

        for element in iterable {
            if pending.len() == BRANCHING_FACTOR {
                let chunk = ReferenceCounter::from(std::mem::take(&mut pending));
                let (new_root, new_shift) = Self::commit_leaf(root.as_ref(), shift, committed, chunk);
                root = Some(new_root);
                shift = new_shift;
                committed += BRANCHING_FACTOR;
                pending.reserve(BRANCHING_FACTOR);
            }
            pending.push(element);
        }

        if pending.is_empty() {
            return Self::new();
        }
        Self {
            length: committed + pending.len(),
            shift,
            root,
            tail: Some(ReferenceCounter::from(pending)),
        }
    }
}

impl<T: Clone> IntoIterator for PersistentVector<T> {
    type Item = T;
    type IntoIter = PersistentVectorIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentVectorIntoIterator {
            vector: self,
            next_chunk: 0,
            buffer: Vec::new().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Index<usize> for PersistentVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(element) => element,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.length
            ),
        }
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for PersistentVector<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.length == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<PersistentVector<T>> for Vec<T> {
    fn eq(&self, other: &PersistentVector<T>) -> bool {
        other == self
    }
}

impl<T: PartialEq> PartialEq<[T]> for PersistentVector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.length == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<PersistentVector<T>> for [T] {
    fn eq(&self, other: &PersistentVector<T>) -> bool {
        other == self
    }
}

/// Hashes the length followed by every element in order, so equal vectors
/// hash alike regardless of how they were built.
impl<T: Hash> Hash for PersistentVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

/// Renders `PersistentVector(e1,e2,...)`.
impl<T: fmt::Debug> fmt::Display for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tagged(formatter, "PersistentVector", self.iter())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentVectorVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentVectorVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = PersistentVector<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut sequence: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        std::iter::from_fn(|| sequence.next_element::<T>().transpose()).collect()
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentVector<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentVectorVisitor {
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

    // =========================================================================
    // Construction and Access
    // =========================================================================

    #[rstest]
    fn test_new_is_empty() {
        let vector: PersistentVector<i32> = PersistentVector::new();
        assert!(vector.is_empty());
        assert_eq!(vector.get(0), None);
        assert_eq!(vector.last(), None);
    }

    #[rstest]
    #[case(1)]
    #[case(32)]
    #[case(33)]
    #[case(64)]
    #[case(65)]
    #[case(1056)]
    #[case(1057)]
    #[case(33_000)]
    fn test_push_back_then_get_at_level_boundaries(#[case] size: usize) {
        let vector = (0..size).fold(PersistentVector::new(), |vector, element| {
            vector.push_back(element)
        });
        assert_eq!(vector.len(), size);
        for index in 0..size {
            assert_eq!(vector.get(index), Some(&index));
        }
        assert_eq!(vector.get(size), None);
    }

    #[rstest]
    #[case(31)]
    #[case(32)]
    #[case(1025)]
    #[case(32 * 32 * 32 + 1)]
    fn test_from_iter_matches_push_back(#[case] size: usize) {
        let collected: PersistentVector<usize> = (0..size).collect();
        let pushed = (0..size).fold(PersistentVector::new(), |vector, element| {
            vector.push_back(element)
        });
        assert_eq!(collected, pushed);
        assert_eq!(collected.shift, pushed.shift);
    }

    #[rstest]
    fn test_element_at_reports_range() {
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
    fn test_index_out_of_range_panics() {
        let vector: PersistentVector<i32> = (0..3).collect();
        let _ = vector[3];
    }

    // =========================================================================
    // Updates
    // =========================================================================

    #[rstest]
    #[case(0)]
    #[case(31)]
    #[case(32)]
    #[case(999)]
    #[case(1999)]
    fn test_update_leaves_original_untouched(#[case] index: usize) {
        let vector: PersistentVector<usize> = (0..2000).collect();
        let updated = vector.update(index, usize::MAX).unwrap();
        assert_eq!(vector.get(index), Some(&index));
        assert_eq!(updated.get(index), Some(&usize::MAX));
        assert_eq!(updated.len(), vector.len());
    }

    #[rstest]
    fn test_assoc_at_length_appends() {
        let vector: PersistentVector<i32> = (0..32).collect();
        let extended = vector.assoc(32, 32).unwrap();
        assert_eq!(extended.len(), 33);
        assert_eq!(extended.get(32), Some(&32));
    }

    #[rstest]
    fn test_assoc_past_length_fails() {
        let vector: PersistentVector<i32> = (0..4).collect();
        assert_eq!(
            vector.assoc(6, 0),
            Err(CollectionError::IndexOutOfRange {
                index: 6,
                length: 4
            })
        );
    }

    #[rstest]
    fn test_update_shares_untouched_leaves() {
        let vector: PersistentVector<usize> = (0..100).collect();
        let updated = vector.update(70, 0).unwrap();
        let original_chunk = vector.root.as_deref().and_then(|root| lookup(root, [0]));
        let updated_chunk = updated.root.as_deref().and_then(|root| lookup(root, [0]));
        assert!(matches!(
            (original_chunk, updated_chunk),
            (Some(before), Some(after)) if ReferenceCounter::ptr_eq(before, after)
        ));
    }

    // =========================================================================
    // Pop
    // =========================================================================

    #[rstest]
    #[case(1)]
    #[case(33)]
    #[case(65)]
    #[case(1057)]
    fn test_pop_back_to_empty(#[case] size: usize) {
        let mut vector: PersistentVector<usize> = (0..size).collect();
        for expected in (0..size).rev() {
            let (rest, last) = vector.pop_back().unwrap();
            assert_eq!(last, expected);
            assert_eq!(rest.len(), expected);
            assert_eq!(rest.last(), expected.checked_sub(1).as_ref());
            vector = rest;
        }
        assert!(vector.pop_back().is_none());
        assert!(vector.root.is_none());
    }

    #[rstest]
    fn test_pop_back_collapses_root_level() {
        let vector: PersistentVector<usize> = (0..1057).collect();
        assert_eq!(vector.shift, 10);
        let (rest, _) = vector.pop_back().unwrap();
        assert_eq!(rest.shift, 5);
        assert_eq!(rest, (0..1056).collect::<Vec<_>>());
    }

    // =========================================================================
    // Iteration and Transforms
    // =========================================================================

    #[rstest]
    fn test_iter_is_exact_size() {
        let vector: PersistentVector<i32> = (0..100).collect();
        let mut iterator = vector.iter();
        assert_eq!(iterator.len(), 100);
        iterator.next();
        assert_eq!(iterator.len(), 99);
    }

    #[rstest]
    fn test_into_iter_yields_every_element() {
        let vector: PersistentVector<String> = (0..70).map(|n| n.to_string()).collect();
        let owned: Vec<String> = vector.clone().into_iter().collect();
        assert_eq!(vector, owned);
    }

    #[rstest]
    fn test_map_and_flat_map_preserve_order() {
        let vector: PersistentVector<i32> = (1..=3).collect();
        assert_eq!(vector.map(|n| n * n), vec![1, 4, 9]);
        assert_eq!(
            vector.flat_map(|&n| vec![n, -n]),
            vec![1, -1, 2, -2, 3, -3]
        );
    }

    #[rstest]
    fn test_concat() {
        let vector: PersistentVector<i32> = (0..30).collect();
        assert_eq!(vector.concat(30..40), (0..40).collect::<Vec<_>>());
    }

    // =========================================================================
    // Rendering and Equality
    // =========================================================================

    #[rstest]
    #[case(PersistentVector::new(), "PersistentVector()")]
    #[case(PersistentVector::singleton("one"), "PersistentVector(\"one\")")]
    #[case(["a", "b"].into_iter().collect(), "PersistentVector(\"a\",\"b\")")]
    fn test_display(#[case] vector: PersistentVector<&str>, #[case] expected: &str) {
        assert_eq!(vector.to_string(), expected);
    }

    #[rstest]
    fn test_equality_with_std_sequences() {
        let vector: PersistentVector<i32> = (1..=3).collect();
        assert_eq!(vector, vec![1, 2, 3]);
        assert_eq!(vec![1, 2, 3], vector);
        assert_eq!(vector, [1, 2, 3][..]);
        assert_ne!(vector, vec![1, 2]);
    }
}

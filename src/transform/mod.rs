//! Lazy, restartable transform pipelines.
//!
//! A [`Transformable`] describes a sequence without holding its elements.
//! Adapters such as [`map`](Transformable::map) and
//! [`flat_map`](Transformable::flat_map) only record a step and return a new
//! description; no intermediate collection is ever built. A terminal
//! operation ([`to_vector`](Transformable::to_vector),
//! [`fold_left`](Transformable::fold_left), ...) walks the source once,
//! applying every recorded step to each element in turn.
//!
//! Because sources are immutable, a pipeline can be run any number of times
//! and always yields the same sequence.
//!
//! # Sources
//!
//! - [`Range`]: the integers `start..end`
//! - [`Source`]: a persistent collection (obtained with `transform()`) or a
//!   `Vec`, yielding owned clones of its elements
//!
//! # Examples
//!
//! ```rust
//! use hermit::transform::{Range, Transformable};
//!
//! let pairs = Range::new(0, 3).flat_map(|i| Range::new(0, i).into_iter().map(move |j| (i, j)));
//! assert_eq!(pairs.to_vec(), vec![(1, 0), (2, 0), (2, 1)]);
//!
//! // The pipeline can be run again.
//! assert_eq!(pairs.count(), 3);
//! ```

mod range;

pub use range::Range;

use std::hash::Hash;

use crate::persistent::{
    InsertionOrderSet, InsertionOrderSetIterator, PersistentHashMap, PersistentHashMapIterator,
    PersistentHashSet, PersistentHashSetIterator, PersistentVector, PersistentVectorIterator,
};

// =============================================================================
// Transformable Trait
// =============================================================================

/// A restartable description of a sequence of owned items.
///
/// Implementors only need to provide [`iter`](Self::iter); every adapter and
/// terminal operation is derived from it.
pub trait Transformable {
    /// The type of the items produced.
    type Item;

    /// The iterator produced by one run of the pipeline.
    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// Starts a fresh run over the sequence.
    fn iter(&self) -> Self::Iter<'_>;

    /// Records a step applying `function` to every item.
    fn map<U, F>(self, function: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Map {
            source: self,
            function,
        }
    }

    /// Records a step replacing every item with the items of
    /// `function(item)`, keeping outer-then-inner order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::transform::{Range, Transformable};
    ///
    /// let doubled = Range::new(1, 4).flat_map(|n| vec![n; 2]);
    /// assert_eq!(doubled.to_vec(), vec![1, 1, 2, 2, 3, 3]);
    /// ```
    fn flat_map<I, F>(self, function: F) -> FlatMap<Self, F>
    where
        Self: Sized,
        I: IntoIterator,
        F: Fn(Self::Item) -> I,
    {
        FlatMap {
            source: self,
            function,
        }
    }

    /// Records a step keeping only the items satisfying `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter {
            source: self,
            predicate,
        }
    }

    /// Records a step keeping at most the first `count` items.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take {
            source: self,
            count,
        }
    }

    /// Records a step dropping the first `count` items.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip {
            source: self,
            count,
        }
    }

    /// Runs the pipeline, folding every item into an accumulator from left
    /// to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::transform::{Range, Transformable};
    ///
    /// let sum = Range::new(1, 101).fold_left(0, |total, n| total + n);
    /// assert_eq!(sum, 5050);
    /// ```
    fn fold_left<A, F>(&self, seed: A, function: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.iter().fold(seed, function)
    }

    /// Runs the pipeline and counts the items.
    fn count(&self) -> usize {
        self.iter().count()
    }

    /// Runs the pipeline into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.iter().collect()
    }

    /// Runs the pipeline into a [`PersistentVector`], preserving order.
    fn to_vector(&self) -> PersistentVector<Self::Item> {
        self.iter().collect()
    }

    /// Runs the pipeline into a [`PersistentHashSet`].
    fn to_hash_set(&self) -> PersistentHashSet<Self::Item>
    where
        Self::Item: Hash + Eq + Clone,
    {
        self.iter().collect()
    }

    /// Runs the pipeline into an [`InsertionOrderSet`], keeping the order in
    /// which items first appear.
    fn to_insertion_order_set(&self) -> InsertionOrderSet<Self::Item>
    where
        Self::Item: Hash + Eq + Clone,
    {
        self.iter().collect()
    }

    /// Runs the pipeline into a [`PersistentHashMap`], turning every item
    /// into an entry with `function`. Later entries win on equal keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hermit::transform::{Range, Transformable};
    ///
    /// let squares = Range::new(0, 5).to_hash_map(|n| (n, n * n));
    /// assert_eq!(squares.get(&3), Some(&9));
    /// ```
    fn to_hash_map<K, V, F>(&self, function: F) -> PersistentHashMap<K, V>
    where
        K: Hash + Eq + Clone,
        V: Clone,
        F: FnMut(Self::Item) -> (K, V),
    {
        self.iter().map(function).collect()
    }
}

// =============================================================================
// Adapters
// =============================================================================

/// Pipeline step created by [`Transformable::map`].
#[derive(Clone)]
pub struct Map<S, F> {
    source: S,
    function: F,
}

impl<S, F, U> Transformable for Map<S, F>
where
    S: Transformable,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Iter<'a>
        = std::iter::Map<S::Iter<'a>, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter().map(&self.function)
    }
}

/// Pipeline step created by [`Transformable::flat_map`].
#[derive(Clone)]
pub struct FlatMap<S, F> {
    source: S,
    function: F,
}

impl<S, F, I> Transformable for FlatMap<S, F>
where
    S: Transformable,
    I: IntoIterator,
    F: Fn(S::Item) -> I,
{
    type Item = I::Item;
    type Iter<'a>
        = std::iter::FlatMap<S::Iter<'a>, I, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter().flat_map(&self.function)
    }
}

/// Pipeline step created by [`Transformable::filter`].
#[derive(Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Transformable for Filter<S, P>
where
    S: Transformable,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Filter<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter().filter(&self.predicate)
    }
}

/// Pipeline step created by [`Transformable::take`].
#[derive(Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S: Transformable> Transformable for Take<S> {
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Take<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter().take(self.count)
    }
}

/// Pipeline step created by [`Transformable::skip`].
#[derive(Clone)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S: Transformable> Transformable for Skip<S> {
    type Item = S::Item;
    type Iter<'a>
        = std::iter::Skip<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.source.iter().skip(self.count)
    }
}

// =============================================================================
// Collection Sources
// =============================================================================

/// A collection at the head of a pipeline.
///
/// Created by the `transform()` method of each persistent collection or by
/// [`Source::new`]. Holding a persistent collection is O(1): only the root
/// is shared.
#[derive(Clone, Debug)]
pub struct Source<C> {
    collection: C,
}

impl<C> Source<C> {
    /// Wraps `collection` as the head of a pipeline.
    #[inline]
    #[must_use]
    pub const fn new(collection: C) -> Self {
        Self { collection }
    }

    /// Returns the wrapped collection.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> C {
        self.collection
    }
}

impl<T: Clone> Transformable for Source<PersistentVector<T>> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<PersistentVectorIterator<'a, T>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.collection.iter().cloned()
    }
}

impl<T: Clone> Transformable for Source<Vec<T>> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.collection.iter().cloned()
    }
}

impl<T: Clone> Transformable for Source<PersistentHashSet<T>> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<PersistentHashSetIterator<'a, T>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.collection.iter().cloned()
    }
}

impl<T: Clone> Transformable for Source<InsertionOrderSet<T>> {
    type Item = T;
    type Iter<'a>
        = std::iter::Cloned<InsertionOrderSetIterator<'a, T>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.collection.iter().cloned()
    }
}

fn clone_entry<K: Clone, V: Clone>((key, value): (&K, &V)) -> (K, V) {
    (key.clone(), value.clone())
}

impl<K: Clone, V: Clone> Transformable for Source<PersistentHashMap<K, V>> {
    type Item = (K, V);
    type Iter<'a>
        = std::iter::Map<PersistentHashMapIterator<'a, K, V>, fn((&'a K, &'a V)) -> (K, V)>
    where
        Self: 'a;

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        self.collection
            .iter()
            .map(clone_entry as fn((&'a K, &'a V)) -> (K, V))
    }
}

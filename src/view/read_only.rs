//! A read-only wrapper over any viewable collection.

use super::{ListView, MapView, MutableList, MutableMap, MutableSet, SetView};
use crate::error::CollectionError;

const READ_ONLY: &str = "ReadOnly";

/// Exposes the read side of a collection and refuses all mutation.
///
/// The wrapper forwards every read to the inner collection, so a
/// `ReadOnly<Vec<T>>` answers `len`, `get` and `elements` exactly like the
/// vector, while `push`, `set`, `remove_at` and `clear` fail with
/// [`CollectionError::Immutable`] even though `Vec` itself would accept them.
///
/// # Examples
///
/// ```rust
/// use hermit::view::{ListView, MutableList, ReadOnly};
///
/// let mut guarded = ReadOnly::new(vec![1, 2, 3]);
/// assert_eq!(guarded.get(1), Some(&2));
/// assert!(guarded.push(4).unwrap_err().is_immutable());
/// assert_eq!(guarded.into_inner(), vec![1, 2, 3]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReadOnly<C> {
    inner: C,
}

impl<C> ReadOnly<C> {
    /// Wraps `inner`.
    #[inline]
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// Borrows the wrapped collection.
    #[inline]
    #[must_use]
    pub const fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwraps the collection.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> From<C> for ReadOnly<C> {
    fn from(inner: C) -> Self {
        Self::new(inner)
    }
}

// =============================================================================
// Forwarded Reads
// =============================================================================

impl<T, C: ListView<T>> ListView<T> for ReadOnly<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.inner.get(index)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        self.inner.elements()
    }
}

impl<K, V, C: MapView<K, V>> MapView<K, V> for ReadOnly<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        self.inner.entries()
    }
}

impl<T, C: SetView<T>> SetView<T> for ReadOnly<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, element: &T) -> bool {
        self.inner.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        self.inner.elements()
    }
}

// =============================================================================
// Refused Mutation
// =============================================================================

impl<T, C: ListView<T>> MutableList<T> for ReadOnly<C> {
    fn push(&mut self, _element: T) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "push"))
    }

    fn set(&mut self, _index: usize, _element: T) -> Result<T, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "set"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<T, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "remove_at"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "clear"))
    }
}

impl<K, V, C: MapView<K, V>> MutableMap<K, V> for ReadOnly<C> {
    fn put(&mut self, _key: K, _value: V) -> Result<Option<V>, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "put"))
    }

    fn remove(&mut self, _key: &K) -> Result<Option<V>, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "remove"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "clear"))
    }
}

impl<T, C: SetView<T>> MutableSet<T> for ReadOnly<C> {
    fn add(&mut self, _element: T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "add"))
    }

    fn remove(&mut self, _element: &T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "remove"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(READ_ONLY, "clear"))
    }
}

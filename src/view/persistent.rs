//! Capability views for the persistent collections.
//!
//! Reads delegate to the inherent methods. Every mutator refuses with
//! [`CollectionError::Immutable`] and leaves the collection untouched.

use std::hash::Hash;

use super::{ListView, MapView, MutableList, MutableMap, MutableSet, SetView};
use crate::error::CollectionError;
use crate::persistent::{InsertionOrderSet, PersistentHashMap, PersistentHashSet, PersistentVector};

const VECTOR: &str = "PersistentVector";
const HASH_MAP: &str = "PersistentHashMap";
const HASH_SET: &str = "PersistentHashSet";
const INSERTION_ORDER_SET: &str = "InsertionOrderSet";

// =============================================================================
// PersistentVector
// =============================================================================

impl<T> ListView<T> for PersistentVector<T> {
    fn len(&self) -> usize {
        PersistentVector::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        PersistentVector::get(self, index)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T> MutableList<T> for PersistentVector<T> {
    fn push(&mut self, _element: T) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(VECTOR, "push"))
    }

    fn set(&mut self, _index: usize, _element: T) -> Result<T, CollectionError> {
        Err(CollectionError::immutable(VECTOR, "set"))
    }

    fn remove_at(&mut self, _index: usize) -> Result<T, CollectionError> {
        Err(CollectionError::immutable(VECTOR, "remove_at"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(VECTOR, "clear"))
    }
}

// =============================================================================
// PersistentHashMap
// =============================================================================

impl<K: Hash + Eq, V> MapView<K, V> for PersistentHashMap<K, V> {
    fn len(&self) -> usize {
        PersistentHashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        PersistentHashMap::get(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K: Hash + Eq, V> MutableMap<K, V> for PersistentHashMap<K, V> {
    fn put(&mut self, _key: K, _value: V) -> Result<Option<V>, CollectionError> {
        Err(CollectionError::immutable(HASH_MAP, "put"))
    }

    fn remove(&mut self, _key: &K) -> Result<Option<V>, CollectionError> {
        Err(CollectionError::immutable(HASH_MAP, "remove"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(HASH_MAP, "clear"))
    }
}

// =============================================================================
// PersistentHashSet / InsertionOrderSet
// =============================================================================

impl<T: Hash + Eq> SetView<T> for PersistentHashSet<T> {
    fn len(&self) -> usize {
        PersistentHashSet::len(self)
    }

    fn contains(&self, element: &T) -> bool {
        PersistentHashSet::contains(self, element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: Hash + Eq> MutableSet<T> for PersistentHashSet<T> {
    fn add(&mut self, _element: T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(HASH_SET, "add"))
    }

    fn remove(&mut self, _element: &T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(HASH_SET, "remove"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(HASH_SET, "clear"))
    }
}

impl<T: Hash + Eq> SetView<T> for InsertionOrderSet<T> {
    fn len(&self) -> usize {
        InsertionOrderSet::len(self)
    }

    fn contains(&self, element: &T) -> bool {
        InsertionOrderSet::contains(self, element)
    }

    /// Elements come out in insertion order.
    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: Hash + Eq> MutableSet<T> for InsertionOrderSet<T> {
    fn add(&mut self, _element: T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(INSERTION_ORDER_SET, "add"))
    }

    fn remove(&mut self, _element: &T) -> Result<bool, CollectionError> {
        Err(CollectionError::immutable(INSERTION_ORDER_SET, "remove"))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::immutable(INSERTION_ORDER_SET, "clear"))
    }
}

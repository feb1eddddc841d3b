//! Capability views for the standard library collections.
//!
//! These are the fully mutable implementors of the mutable shapes.

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use super::{ListView, MapView, MutableList, MutableMap, MutableSet, SetView};
use crate::error::CollectionError;

impl<T> ListView<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T> MutableList<T> for Vec<T> {
    fn push(&mut self, element: T) -> Result<(), CollectionError> {
        Vec::push(self, element);
        Ok(())
    }

    fn set(&mut self, index: usize, element: T) -> Result<T, CollectionError> {
        let length = Vec::len(self);
        self.get_mut(index)
            .map(|slot| std::mem::replace(slot, element))
            .ok_or(CollectionError::IndexOutOfRange { index, length })
    }

    fn remove_at(&mut self, index: usize) -> Result<T, CollectionError> {
        let length = Vec::len(self);
        if index < length {
            Ok(Vec::remove(self, index))
        } else {
            Err(CollectionError::IndexOutOfRange { index, length })
        }
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Vec::clear(self);
        Ok(())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MapView<K, V> for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MutableMap<K, V> for HashMap<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<Option<V>, CollectionError> {
        Ok(self.insert(key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>, CollectionError> {
        Ok(HashMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        HashMap::clear(self);
        Ok(())
    }
}

impl<T: Hash + Eq, S: BuildHasher> SetView<T> for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn contains(&self, element: &T) -> bool {
        HashSet::contains(self, element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T: Hash + Eq, S: BuildHasher> MutableSet<T> for HashSet<T, S> {
    fn add(&mut self, element: T) -> Result<bool, CollectionError> {
        Ok(self.insert(element))
    }

    fn remove(&mut self, element: &T) -> Result<bool, CollectionError> {
        Ok(HashSet::remove(self, element))
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        HashSet::clear(self);
        Ok(())
    }
}

//! Persistent (immutable) collections.
//!
//! Every collection here shares structure between versions: an update copies
//! only the path from the root to the changed leaf and reuses everything else.
//!
//! - [`PersistentVector`]: Index-addressed sequence (32-way trie plus tail)
//! - [`PersistentHashMap`]: Hash array mapped trie (HAMT)
//! - [`PersistentHashSet`]: Set backed by [`PersistentHashMap`]
//! - [`InsertionOrderSet`]: Set that iterates in first-insertion order
//!
//! The vector and the map are both built on one private trie of bitmap
//! compressed branches.
//!
//! # Examples
//!
//! ## `PersistentVector`
//!
//! ```rust
//! use hermit::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..100).collect();
//! let updated = vector.assoc(50, 999).unwrap();
//!
//! assert_eq!(vector.get(50), Some(&50));
//! assert_eq!(updated.get(50), Some(&999));
//! ```
//!
//! ## `PersistentHashMap`
//!
//! ```rust
//! use hermit::persistent::PersistentHashMap;
//!
//! let map = PersistentHashMap::new()
//!     .assoc("one".to_string(), 1)
//!     .assoc("two".to_string(), 2);
//! let updated = map.assoc("one".to_string(), 100);
//!
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(updated.get("one"), Some(&100));
//! ```
//!
//! ## `InsertionOrderSet`
//!
//! ```rust
//! use hermit::persistent::InsertionOrderSet;
//!
//! let set = InsertionOrderSet::new().put("c").put("a").put("b").put("c");
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
//! assert_eq!(set.to_string(), r#"InsertionOrderSet("c","a","b")"#);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer used for every shared node.
///
/// With the `arc` feature (default) this is `std::sync::Arc`, making the
/// collections `Send + Sync`. Without it, `std::rc::Rc` is used, which is
/// cheaper but confined to one thread.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod hashmap;
mod hashset;
mod insertion_order_set;
mod trie;
mod vector;

pub use hashmap::PersistentHashMap;
pub use hashmap::PersistentHashMapIntoIterator;
pub use hashmap::PersistentHashMapIterator;
pub use hashset::PersistentHashSet;
pub use hashset::PersistentHashSetIntoIterator;
pub use hashset::PersistentHashSetIterator;
pub use insertion_order_set::InsertionOrderSet;
pub use insertion_order_set::InsertionOrderSetIterator;
pub use vector::PersistentVector;
pub use vector::PersistentVectorIntoIterator;
pub use vector::PersistentVectorIterator;

// =============================================================================
// Thread Safety
// =============================================================================

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentVector<String>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentHashMap<String, i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentHashSet<String>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(InsertionOrderSet<String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentVector<String>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentHashMap<String, i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

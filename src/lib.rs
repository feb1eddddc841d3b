//! # hermit
//!
//! Persistent (immutable, structurally shared) collections for Rust.
//!
//! ## Overview
//!
//! Every collection in this crate is a value: "modifying" it returns a new
//! version that shares all untouched structure with the old one, and the old
//! version stays valid. The crate provides:
//!
//! - **Persistent Collections**: [`PersistentVector`](persistent::PersistentVector),
//!   [`PersistentHashMap`](persistent::PersistentHashMap),
//!   [`PersistentHashSet`](persistent::PersistentHashSet) and
//!   [`InsertionOrderSet`](persistent::InsertionOrderSet), all built on one
//!   32-way trie with path copying
//! - **Lazy Transforms**: [`Transformable`](transform::Transformable) pipelines
//!   (`map`, `flat_map`, `filter`, ...) and [`Range`](transform::Range), which
//!   materialize only when collected
//! - **Tuples**: [`Tuple1`](tuple::Tuple1) through [`Tuple9`](tuple::Tuple9)
//! - **Capability Views**: [`ListView`](view::ListView), [`MapView`](view::MapView)
//!   and [`SetView`](view::SetView), shared with the standard collections so
//!   persistent and mutable values compare and hash alike
//!
//! ## Feature Flags
//!
//! - `persistent`: Persistent collections, transforms and views
//! - `tuple`: The tuple family
//! - `arc`: Share nodes through `Arc` so collections are `Send + Sync` (default)
//! - `serde`: Serialization for every collection and tuple
//! - `fxhash` / `ahash`: Alternative key hashers
//! - `full`: Enable all features except the alternative hashers
//!
//! ## Example
//!
//! ```rust
//! use hermit::persistent::PersistentHashMap;
//!
//! let colors = PersistentHashMap::new()
//!     .assoc('R', "red")
//!     .assoc('G', "green");
//! let extended = colors.assoc('1', "red");
//!
//! assert_eq!(colors.get(&'1'), None);
//! assert_eq!(extended.get(&'1'), Some(&"red"));
//! assert_eq!(extended.get(&'R'), Some(&"red"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use hermit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CollectionError;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "persistent")]
    pub use crate::transform::*;

    #[cfg(feature = "persistent")]
    pub use crate::view::*;

    #[cfg(feature = "tuple")]
    pub use crate::tuple::*;
}

pub mod error;
pub mod hashing;
mod macros;

#[cfg(feature = "persistent")]
mod render;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "persistent")]
pub mod transform;

#[cfg(feature = "persistent")]
pub mod view;

#[cfg(feature = "tuple")]
pub mod tuple;

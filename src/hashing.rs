//! Key hashing and hash combination.
//!
//! All collections route keys through [`hash_of`], so the trie layout and the
//! value hashes reported by the capability views come from the same,
//! deterministic hasher:
//!
//! - default: `std::hash::DefaultHasher` with its fixed keys
//! - `fxhash`: `rustc_hash::FxHasher`
//! - `ahash`: `ahash::AHasher` seeded with fixed constants
//!
//! When both alternative features are enabled, `fxhash` wins.
//!
//! [`ordered_hash`] and [`unordered_hash`] fold element hashes into one value
//! for sequences and for sets/maps respectively.

use std::hash::{Hash, Hasher};

#[cfg(feature = "fxhash")]
type KeyHasher = rustc_hash::FxHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type KeyHasher = ahash::AHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type KeyHasher = std::hash::DefaultHasher;

#[cfg(feature = "fxhash")]
#[inline]
fn key_hasher() -> KeyHasher {
    rustc_hash::FxHasher::default()
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
#[inline]
fn key_hasher() -> KeyHasher {
    use std::hash::BuildHasher;

    const SEEDS: [u64; 4] = [
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    ];
    ahash::RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]).build_hasher()
}

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
#[inline]
fn key_hasher() -> KeyHasher {
    std::hash::DefaultHasher::new()
}

/// Hashes a single value with the crate's key hasher.
///
/// The result is stable for the lifetime of the process.
///
/// # Examples
///
/// ```rust
/// use hermit::hashing::hash_of;
///
/// assert_eq!(hash_of("key"), hash_of(&"key".to_string()));
/// ```
#[inline]
#[must_use]
pub fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = key_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Combines element hashes so that order matters.
///
/// Used for list-like values: `[a, b]` and `[b, a]` generally differ.
///
/// # Examples
///
/// ```rust
/// use hermit::hashing::ordered_hash;
///
/// assert_eq!(ordered_hash([1, 2, 3]), ordered_hash(vec![1, 2, 3]));
/// ```
#[must_use]
pub fn ordered_hash<I>(items: I) -> u64
where
    I: IntoIterator,
    I::Item: Hash,
{
    items.into_iter().fold(1, |accumulator: u64, item| {
        accumulator.wrapping_mul(31).wrapping_add(hash_of(&item))
    })
}

/// Combines element hashes so that order does not matter.
///
/// Used for sets and maps, whose equality ignores iteration order.
///
/// # Examples
///
/// ```rust
/// use hermit::hashing::unordered_hash;
///
/// assert_eq!(unordered_hash([1, 2, 3]), unordered_hash([3, 1, 2]));
/// ```
#[must_use]
pub fn unordered_hash<I>(items: I) -> u64
where
    I: IntoIterator,
    I::Item: Hash,
{
    items
        .into_iter()
        .fold(0, |accumulator: u64, item| accumulator.wrapping_add(hash_of(&item)))
}

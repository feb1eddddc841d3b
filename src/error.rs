//! Error type shared by every collection.
//!
//! Uses `thiserror` for the `Display` and `Error` implementations.

use thiserror::Error;

/// The failure signals raised by hermit collections.
///
/// Safe accessors (`get`, `contains`, ...) never produce these; they are
/// reserved for "must exist" accessors, arity-checked construction, and the
/// mutable-collection methods that persistent values refuse.
///
/// # Examples
///
/// ```rust
/// use hermit::error::CollectionError;
///
/// let error = CollectionError::immutable("PersistentVector", "push");
/// assert!(error.is_immutable());
/// assert_eq!(
///     error.to_string(),
///     "PersistentVector does not support push: the collection is immutable"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An index fell outside `0..length`.
    #[error("index {index} is out of range for length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the collection at the time of the request.
        length: usize,
    },

    /// A key required to be present was absent.
    #[error("key not found")]
    KeyNotFound,

    /// A mutating method was called on a persistent or read-only value.
    #[error("{collection} does not support {operation}: the collection is immutable")]
    Immutable {
        /// Type tag of the receiving collection.
        collection: &'static str,
        /// Name of the refused method.
        operation: &'static str,
    },

    /// A fixed-arity value was built from the wrong number of elements.
    #[error("expected {expected} elements, found {actual}")]
    ArityMismatch {
        /// Number of slots of the target type.
        expected: usize,
        /// Number of elements supplied.
        actual: usize,
    },
}

impl CollectionError {
    /// Creates the immutability-violation signal for `operation` on `collection`.
    #[inline]
    #[must_use]
    pub const fn immutable(collection: &'static str, operation: &'static str) -> Self {
        Self::Immutable {
            collection,
            operation,
        }
    }

    /// Returns `true` for the immutability-violation signal.
    #[inline]
    #[must_use]
    pub const fn is_immutable(&self) -> bool {
        matches!(self, Self::Immutable { .. })
    }
}

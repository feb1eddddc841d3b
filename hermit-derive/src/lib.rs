//! Code generation for hermit.
//!
//! This crate provides the procedural macro that emits hermit's family of
//! fixed-arity tuple types. Every arity is structurally identical, so the
//! family is generated from one template instead of being written out by hand.
//!
//! # Available Function-like Macros
//!
//! - [`tuple_family!`]: Emits `Tuple1` through `TupleN`
//!
//! # Example
//!
//! ```rust,ignore
//! // Inside hermit's `tuple` module:
//! hermit_derive::tuple_family!(9);
//!
//! let pair = Tuple2::new("one", 1);
//! assert_eq!(pair.first(), &"one");
//! assert_eq!(pair.to_string(), "Tuple2(\"one\",1)");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod tuple;

use proc_macro::TokenStream;

/// Generates the tuple family `Tuple1` through `TupleN`.
///
/// The single argument is the largest arity to emit, an integer literal in
/// `1..=12`. The macro must be invoked inside the `hermit` crate because the
/// generated conversions refer to `crate::error::CollectionError` and
/// `crate::persistent::PersistentVector`.
///
/// # Generated Code
///
/// For each arity `n`, with type parameters `A`, `B`, ...:
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// pub struct TupleN<A, B, ...> { first: A, second: B, ... }
///
/// impl<A, B, ...> TupleN<A, B, ...> {
///     pub const fn new(first: A, second: B, ...) -> Self { ... }
///     pub const fn first(&self) -> &A { ... }
///     // one accessor per slot
///     pub fn into_tuple(self) -> (A, B, ...) { ... }
/// }
///
/// impl<A, B, ...> From<(A, B, ...)> for TupleN<A, B, ...> { ... }
/// impl<A: Debug, B: Debug, ...> Debug for TupleN<A, B, ...> { ... }     // TupleN(a,b,...)
/// impl<A: Debug, B: Debug, ...> Display for TupleN<A, B, ...> { ... }   // same as Debug
/// impl<T> TryFrom<Vec<T>> for TupleN<T, T, ...> { ... }                 // arity-checked
/// impl<T: Clone> TryFrom<PersistentVector<T>> for TupleN<T, T, ...> { ... }
/// // with feature "serde": Serialize / Deserialize as a fixed-length tuple
/// ```
///
/// # Errors
///
/// Produces a compile error when the argument is not an integer literal or
/// lies outside the supported range.
#[proc_macro]
pub fn tuple_family(input: TokenStream) -> TokenStream {
    tuple::tuple_family_impl(input.into()).into()
}

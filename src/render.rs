//! Canonical string rendering: `TypeTag(elem1,elem2,...)`.
//!
//! Elements are written with their `Debug` form, so strings come out quoted
//! and numbers bare. There is no whitespace, and an empty collection renders
//! as `TypeTag()`.

use std::fmt;

pub(crate) fn write_tagged<I>(
    formatter: &mut fmt::Formatter<'_>,
    tag: &str,
    items: I,
) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Debug,
{
    formatter.write_str(tag)?;
    formatter.write_str("(")?;
    for (position, item) in items.into_iter().enumerate() {
        if position > 0 {
            formatter.write_str(",")?;
        }
        write!(formatter, "{item:?}")?;
    }
    formatter.write_str(")")
}

/// A map entry rendered as `kv(key,value)`.
pub(crate) struct KeyValue<'a, K, V>(pub(crate) &'a K, pub(crate) &'a V);

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyValue<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "kv({:?},{:?})", self.0, self.1)
    }
}

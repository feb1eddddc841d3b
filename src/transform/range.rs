//! Lazy integer ranges.

use std::fmt;

use super::Transformable;

/// The integers from `start` (inclusive) to `end` (exclusive).
///
/// A range stores only its bounds; values are produced on demand. A range
/// whose `end` does not exceed its `start` is empty.
///
/// # Examples
///
/// ```rust
/// use hermit::transform::{Range, Transformable};
///
/// let range = Range::new(2, 6);
/// assert_eq!(range.len(), 4);
/// assert_eq!(range.get(1), Some(3));
/// assert_eq!(range.map(|n| n * n).to_vec(), vec![4, 9, 16, 25]);
///
/// assert!(Range::new(5, 1).is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(i64, i64)", into = "(i64, i64)"))]
pub struct Range {
    start: i64,
    end: i64,
}

impl Range {
    /// Creates the range `start..end`.
    ///
    /// An `end` at or below `start` yields an empty range.
    #[inline]
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: if end < start { start } else { end },
        }
    }

    /// The first value, inclusive.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// The bound after the last value, exclusive.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Returns the number of values.
    ///
    /// Saturates at `usize::MAX` on targets where the span does not fit.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.end.abs_diff(self.start)).unwrap_or(usize::MAX)
    }

    /// Returns `true` if the range produces no values.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the value at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i64> {
        let offset = i64::try_from(index).ok()?;
        self.start
            .checked_add(offset)
            .filter(|value| *value < self.end)
    }

    /// Returns `true` if `value` lies in the range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.start <= value && value < self.end
    }

    /// Returns an iterator over the values in ascending order.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> std::ops::Range<i64> {
        self.start..self.end
    }
}

impl Transformable for Range {
    type Item = i64;
    type Iter<'a> = std::ops::Range<i64>;

    fn iter(&self) -> Self::Iter<'_> {
        self.start..self.end
    }
}

impl IntoIterator for Range {
    type Item = i64;
    type IntoIter = std::ops::Range<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..self.end
    }
}

impl From<(i64, i64)> for Range {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

impl From<Range> for (i64, i64) {
    fn from(range: Range) -> Self {
        (range.start, range.end)
    }
}

/// Renders `Range(start,end)`.
impl fmt::Display for Range {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Range({},{})", self.start, self.end)
    }
}

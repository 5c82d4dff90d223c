//! Interval-run style storage.
//!
//! An [`IntervalStore`] keeps an ordered list of non-overlapping [`Run`]s,
//! each mapping a half-open range of text offsets to the [`Style`] that
//! applies there. It supports three operations:
//!
//! - splicing runs when the text is edited ([`IntervalStore::replace_style`]),
//! - building a minimal run list from overlapping highlight spans
//!   ([`IntervalStore::build`]),
//! - computing the minimal update set between two stores
//!   ([`IntervalStore::diff`]).
//!
//! Offsets are in whatever unit the host uses consistently (UTF-16 code
//! units for most text views).

mod build;
mod diff;
mod store;

pub use store::IntervalStore;

use std::fmt;

use crate::style::Style;

/// A half-open range `[start, start + length)`.
///
/// Offsets are signed so that a bad edit from the host can be reported as
/// an error instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    pub start: i64,
    pub length: i64,
}

impl TextRange {
    pub const fn new(start: i64, length: i64) -> Self {
        Self { start, length }
    }

    /// Build a range from its two endpoints.
    pub const fn from_bounds(start: i64, end: i64) -> Self {
        Self {
            start,
            length: end - start,
        }
    }

    /// Exclusive upper bound.
    pub const fn end(&self) -> i64 {
        self.start + self.length
    }

    /// Exclusive upper bound, or `None` when it does not fit in an `i64`.
    pub const fn checked_end(&self) -> Option<i64> {
        self.start.checked_add(self.length)
    }

    pub const fn is_empty(&self) -> bool {
        self.length <= 0
    }

    /// Length of the overlap between two ranges (zero when disjoint).
    pub fn intersection_len(&self, other: &TextRange) -> i64 {
        (self.end().min(other.end()) - self.start.max(other.start)).max(0)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl From<std::ops::Range<i64>> for TextRange {
    fn from(range: std::ops::Range<i64>) -> Self {
        TextRange::from_bounds(range.start, range.end)
    }
}

/// A range of text and the style applied to every offset in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub range: TextRange,
    pub style: Style,
}

impl Run {
    pub fn new(range: impl Into<TextRange>, style: Style) -> Self {
        Self {
            range: range.into(),
            style,
        }
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.range, self.style)
    }
}

/// Sorted, deduplicated boundary points of a set of ranges.
///
/// Empty ranges contribute nothing.
fn boundary_points<'a>(ranges: impl Iterator<Item = &'a TextRange>) -> Vec<i64> {
    let mut points: Vec<i64> = ranges
        .filter(|range| !range.is_empty())
        .flat_map(|range| [range.start, range.end()])
        .collect();
    points.sort_unstable();
    points.dedup();
    points
}

//! The highlighter boundary.
//!
//! A [`Highlighter`] turns the full text of a buffer into labeled spans.
//! The overlay never looks inside: it only maps labels to styles through
//! a [`StyleTable`](crate::config::StyleTable).

pub mod query;

pub use query::QueryHighlighter;

use serde::{Deserialize, Serialize};

use crate::error::OverlayResult;
use crate::interval::TextRange;

/// A labeled range emitted by a highlighter, in host offset units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub start: i64,
    pub end: i64,
    pub label: String,
}

impl HighlightSpan {
    pub fn new(start: i64, end: i64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        TextRange::from_bounds(self.start, self.end)
    }
}

/// Produces labeled spans for a full text snapshot.
///
/// Failures should be reported as
/// [`OverlayError::HighlightUnavailable`](crate::error::OverlayError::HighlightUnavailable);
/// the scheduler then keeps the previous overlay for that cycle.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, text: &str) -> OverlayResult<Vec<HighlightSpan>>;
}

impl<F> Highlighter for F
where
    F: Fn(&str) -> OverlayResult<Vec<HighlightSpan>> + Send + Sync,
{
    fn highlight(&self, text: &str) -> OverlayResult<Vec<HighlightSpan>> {
        self(text)
    }
}

//! Incremental style overlay for syntax-highlighted text.
//!
//! The overlay maps every offset of a text buffer to a [`Style`] through a
//! minimal list of non-overlapping runs ([`IntervalStore`]). Edits splice
//! the runs in place; after a debounce the [`RenderScheduler`] re-highlights
//! the text, rebuilds the runs and hands the host only the ranges whose
//! style changed.

pub mod config;
pub mod error;
pub mod highlight;
pub mod interval;
pub mod render;
pub mod style;
pub mod text;

pub use config::{OverlaySettings, StyleTable, UnknownLabels};
pub use error::{OverlayError, OverlayResult};
pub use highlight::{HighlightSpan, Highlighter, QueryHighlighter};
pub use interval::{IntervalStore, Run, TextRange};
pub use render::{RenderScheduler, RenderSettings, StyleUpdate, TextHost};
pub use style::{Color, Emphasis, Style, StyleAttributes, Weight};

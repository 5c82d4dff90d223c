//! Tree-sitter backed highlighter.
//!
//! Parses the full text with a tree-sitter grammar, runs a highlights
//! query and reports every capture as a span labeled with the capture
//! name. Offsets are converted from UTF-8 bytes to UTF-16 code units.

use std::sync::Mutex;

use tree_sitter::{Language, Parser, Query, QueryCursor, StreamingIterator};

use super::{HighlightSpan, Highlighter};
use crate::error::{LockResultExt, OverlayError, OverlayResult};
use crate::text::Utf16Offsets;

const LOG_TARGET: &str = "style_overlay::highlight";

pub struct QueryHighlighter {
    query: Query,
    parser: Mutex<Parser>,
}

impl QueryHighlighter {
    /// Create a highlighter for `language` using the given highlights query source.
    pub fn new(language: &Language, highlights: &str) -> OverlayResult<Self> {
        let query = Query::new(language, highlights).map_err(|e| {
            OverlayError::highlight_unavailable(format!("invalid highlights query: {e}"))
        })?;

        let mut parser = Parser::new();
        parser.set_language(language).map_err(|e| {
            OverlayError::highlight_unavailable(format!("incompatible grammar: {e}"))
        })?;

        Ok(Self {
            query,
            parser: Mutex::new(parser),
        })
    }

    /// Capture names the query can emit, in query order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.query.capture_names().iter().copied()
    }
}

impl Highlighter for QueryHighlighter {
    fn highlight(&self, text: &str) -> OverlayResult<Vec<HighlightSpan>> {
        let tree = self
            .parser
            .lock()
            .recover_poison("QueryHighlighter::parser")
            .parse(text, None)
            .ok_or_else(|| OverlayError::highlight_unavailable("parser produced no tree"))?;

        let offsets = Utf16Offsets::new(text);
        let capture_names = self.query.capture_names();
        let mut spans = Vec::new();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), text.as_bytes());
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let name = capture_names[capture.index as usize];
                // Captures starting with an underscore are query helpers, not highlights
                if name.starts_with('_') {
                    continue;
                }

                let start = offsets.to_utf16(capture.node.start_byte());
                let end = offsets.to_utf16(capture.node.end_byte());
                if end > start {
                    spans.push(HighlightSpan::new(start as i64, end as i64, name));
                }
            }
        }

        log::trace!(
            target: LOG_TARGET,
            "Collected {} spans from {} bytes",
            spans.len(),
            text.len()
        );

        Ok(spans)
    }
}

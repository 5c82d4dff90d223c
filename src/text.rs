//! Text offset utilities.
//!
//! Highlighters that work on UTF-8 bytes (tree-sitter) report byte offsets,
//! while text views usually count UTF-16 code units. This module converts
//! between the two.

pub mod offsets;

pub use offsets::{Utf16Offsets, convert_byte_to_utf16};

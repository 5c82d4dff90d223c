//! Translation of a [`Style`] into concrete rendering attributes.

use std::collections::BTreeSet;

use super::{Color, Emphasis, Style, Weight};

/// Fully resolved attributes for a run, ready for the host's text storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleAttributes {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Absolute font size in host units.
    pub font_size: f32,
    pub font_weight: Weight,
    pub italic: bool,
    pub strikethrough: bool,
    pub monospace: bool,
    /// Labels the host can attach to the text (e.g. for typing-attribute lookups).
    pub labels: BTreeSet<String>,
}

impl Style {
    /// Resolve this style against the host's base font size and weight.
    ///
    /// A `size` is a multiplier of `base_size` (unset means 1). The `CLEAR`
    /// emphasis flag suppresses italic, strikethrough and monospace.
    pub fn resolve(&self, base_size: f32, base_weight: Weight) -> StyleAttributes {
        let clear = self.emphasis.contains(Emphasis::CLEAR);
        let decorated = |flag: Emphasis| !clear && self.emphasis.contains(flag);

        StyleAttributes {
            foreground: self.foreground,
            background: self.background,
            font_size: self.size.unwrap_or(1.0) * base_size,
            font_weight: self.weight.unwrap_or(base_weight),
            italic: decorated(Emphasis::ITALIC),
            strikethrough: decorated(Emphasis::STRIKETHROUGH),
            monospace: decorated(Emphasis::MONOSPACE),
            labels: self.labels.clone(),
        }
    }
}

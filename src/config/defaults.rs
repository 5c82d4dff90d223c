//! Default configuration values for style-overlay.
//!
//! The default style table covers the Markdown highlight captures
//! (`text.title.h1` .. `text.strong`, `punctuation.*`).

use super::settings::{EmphasisFlag, OverlaySettings, StyleEntry};
use crate::style::{Color, Weight};
use std::collections::HashMap;

pub const DEFAULT_BASE_SIZE: f32 = 16.0;
pub const DEFAULT_BASE_WEIGHT: Weight = Weight::Regular;
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Returns the default OverlaySettings.
pub fn default_settings() -> OverlaySettings {
    OverlaySettings {
        base_size: Some(DEFAULT_BASE_SIZE),
        base_weight: Some(DEFAULT_BASE_WEIGHT),
        debounce_ms: Some(DEFAULT_DEBOUNCE_MS),
        styles: default_markdown_styles(),
    }
}

/// Returns the default style table for Markdown highlight captures.
pub fn default_markdown_styles() -> HashMap<String, StyleEntry> {
    let heading = |size: f32, weight: Weight| StyleEntry {
        foreground: Some(Color::Text),
        background: Some(Color::Clear),
        size: Some(size),
        weight: Some(weight),
        priority: 1,
        ..Default::default()
    };
    let emphasis = |flag: EmphasisFlag, priority: i32| StyleEntry {
        emphasis: vec![flag],
        priority,
        ..Default::default()
    };
    let colored = |color: Color, priority: i32| StyleEntry {
        foreground: Some(color),
        priority,
        ..Default::default()
    };

    let entries = [
        // Headings
        ("text.title.h1", heading(1.4, Weight::Bold)),
        ("text.title.h2", heading(1.4, Weight::Semibold)),
        ("text.title.h3", heading(1.2, Weight::Semibold)),
        ("text.title.h4", heading(1.2, Weight::Medium)),
        ("text.title.h5", heading(1.125, Weight::Medium)),
        ("text.title.h6", heading(1.0, Weight::Medium)),
        // Inline markup
        (
            "text.strong",
            StyleEntry {
                weight: Some(Weight::Bold),
                priority: 1,
                ..Default::default()
            },
        ),
        ("text.emphasis", emphasis(EmphasisFlag::Italic, 2)),
        ("text.strikethrough", emphasis(EmphasisFlag::Strikethrough, 0)),
        ("text.code", emphasis(EmphasisFlag::Monospace, 0)),
        // Links
        ("text.uri", colored(Color::Link, 0)),
        ("text.reference", colored(Color::Text, 0)),
        // Markup punctuation
        ("punctuation.delimiter", colored(Color::Gray, 10)),
        ("punctuation.special", colored(Color::Gray, 10)),
    ];

    entries
        .into_iter()
        .map(|(label, entry)| (label.to_string(), entry))
        .collect()
}

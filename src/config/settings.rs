use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::HashMap;

use crate::style::{Color, Emphasis, Style, Weight};

/// Overlay configuration as read from TOML.
///
/// ```toml
/// baseSize = 16.0
/// debounceMs = 50
///
/// [styles."text.strong"]
/// weight = "bold"
/// priority = 1
///
/// [styles."text.emphasis"]
/// emphasis = ["italic"]
/// priority = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySettings {
    /// Font size that style `size` factors multiply.
    #[serde(default, deserialize_with = "positive_finite")]
    pub base_size: Option<f32>,
    pub base_weight: Option<Weight>,
    /// Delay between the last edit and re-highlighting.
    pub debounce_ms: Option<u64>,
    /// Label to style table.
    #[serde(default)]
    pub styles: HashMap<String, StyleEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    #[serde(default, deserialize_with = "positive_finite")]
    pub size: Option<f32>,
    pub weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emphasis: Vec<EmphasisFlag>,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisFlag {
    Clear,
    Italic,
    Strikethrough,
    Monospace,
}

impl From<EmphasisFlag> for Emphasis {
    fn from(flag: EmphasisFlag) -> Self {
        match flag {
            EmphasisFlag::Clear => Emphasis::CLEAR,
            EmphasisFlag::Italic => Emphasis::ITALIC,
            EmphasisFlag::Strikethrough => Emphasis::STRIKETHROUGH,
            EmphasisFlag::Monospace => Emphasis::MONOSPACE,
        }
    }
}

/// Sizes must be usable as multipliers; NaN would also break style equality.
fn positive_finite<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f32>::deserialize(deserializer)? {
        Some(size) if !size.is_finite() || size <= 0.0 => Err(de::Error::custom(format!(
            "size must be a positive finite number, got {size}"
        ))),
        size => Ok(size),
    }
}

impl StyleEntry {
    /// Build the style for `label`; the label itself joins the style's label set.
    pub fn to_style(&self, label: &str) -> Style {
        Style {
            foreground: self.foreground,
            background: self.background,
            size: self.size,
            weight: self.weight,
            emphasis: self
                .emphasis
                .iter()
                .fold(Emphasis::NONE, |acc, &flag| acc | Emphasis::from(flag)),
            labels: [label.to_string()].into(),
            priority: self.priority,
        }
    }
}

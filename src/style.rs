//! Mergeable visual style values.
//!
//! A [`Style`] is what the overlay stores per run: optional visual fields,
//! the set of highlight labels that contributed to it, and a priority used
//! to resolve conflicts when overlapping spans are merged.

pub mod attributes;

pub use attributes::StyleAttributes;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::BitOr;
use thiserror::Error;

/// A color understood by the host renderer.
///
/// The named variants follow the host's theme; `Rgba` is an absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// The host's default text color.
    Text,
    /// The host's link color.
    Link,
    /// Fully transparent.
    Clear,
    /// A neutral gray used for markup punctuation.
    Gray,
    Rgba(u8, u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?} (expected text, link, clear, gray, #rrggbb or #rrggbbaa)")]
pub struct InvalidColor(pub String);

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => return Ok(Color::Text),
            "link" => return Ok(Color::Link),
            "clear" => return Ok(Color::Clear),
            "gray" | "grey" => return Ok(Color::Gray),
            _ => {}
        }

        let invalid = || InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Color::Rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Text => f.write_str("text"),
            Color::Link => f.write_str("link"),
            Color::Clear => f.write_str("clear"),
            Color::Gray => f.write_str("gray"),
            Color::Rgba(r, g, b, 0xff) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Rgba(r, g, b, a) => write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}"),
        }
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Font weight, lightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    UltraLight,
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

/// Independent emphasis flags.
///
/// `CLEAR` is a sentinel: when present, resolution drops every other
/// decoration and renders the base look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Emphasis(u8);

impl Emphasis {
    pub const NONE: Emphasis = Emphasis(0);
    pub const CLEAR: Emphasis = Emphasis(1 << 0);
    pub const ITALIC: Emphasis = Emphasis(1 << 1);
    pub const STRIKETHROUGH: Emphasis = Emphasis(1 << 2);
    pub const MONOSPACE: Emphasis = Emphasis(1 << 3);

    pub const fn union(self, other: Emphasis) -> Emphasis {
        Emphasis(self.0 | other.0)
    }

    pub const fn contains(self, other: Emphasis) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Emphasis {
    type Output = Emphasis;

    fn bitor(self, rhs: Emphasis) -> Emphasis {
        self.union(rhs)
    }
}

impl fmt::Display for Emphasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Emphasis::CLEAR, "clear"),
            (Emphasis::ITALIC, "italic"),
            (Emphasis::STRIKETHROUGH, "strikethrough"),
            (Emphasis::MONOSPACE, "monospace"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The visual attributes applied to a run of text.
///
/// Equality compares the visual fields and the label set; `priority` only
/// matters while merging, so two styles reached through different
/// precedence paths but looking the same compare equal and coalesce.
#[derive(Debug, Clone, Default)]
pub struct Style {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Scale factor relative to the host's base font size.
    pub size: Option<f32>,
    pub weight: Option<Weight>,
    pub emphasis: Emphasis,
    /// Highlight labels that contributed to this style.
    pub labels: BTreeSet<String>,
    pub priority: i32,
}

impl Style {
    /// The default look of unstyled text.
    pub const BASE: Style = Style {
        foreground: Some(Color::Text),
        background: Some(Color::Clear),
        size: Some(1.0),
        weight: None,
        emphasis: Emphasis::NONE,
        labels: BTreeSet::new(),
        priority: 0,
    };

    /// Placeholder for an edited region whose style is not known yet.
    pub const EMPTY: Style = Style {
        foreground: None,
        background: None,
        size: None,
        weight: None,
        emphasis: Emphasis::NONE,
        labels: BTreeSet::new(),
        priority: -1,
    };

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = self.emphasis | emphasis;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Combine two styles.
    ///
    /// For every scalar field the higher-priority side wins, falling back
    /// to the other side when the winner leaves the field unset. On equal
    /// priority `self` wins. Emphasis flags and labels are unioned, and the
    /// result carries the higher priority.
    pub fn merge(&self, other: &Style) -> Style {
        let (winner, loser) = if other.priority > self.priority {
            (other, self)
        } else {
            (self, other)
        };

        Style {
            foreground: winner.foreground.or(loser.foreground),
            background: winner.background.or(loser.background),
            size: winner.size.or(loser.size),
            weight: winner.weight.or(loser.weight),
            emphasis: self.emphasis | other.emphasis,
            labels: self.labels.union(&other.labels).cloned().collect(),
            priority: winner.priority,
        }
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.foreground == other.foreground
            && self.background == other.background
            && self.size == other.size
            && self.weight == other.weight
            && self.emphasis == other.emphasis
            && self.labels == other.labels
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for label in &self.labels {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(label)?;
            first = false;
        }
        f.write_str("}")?;

        if let Some(color) = self.foreground {
            write!(f, " fg={color}")?;
        }
        if let Some(color) = self.background {
            write!(f, " bg={color}")?;
        }
        if let Some(size) = self.size {
            write!(f, " size={size}")?;
        }
        if let Some(weight) = self.weight {
            write!(f, " weight={weight:?}")?;
        }
        if !self.emphasis.is_empty() {
            write!(f, " emphasis={}", self.emphasis)?;
        }
        Ok(())
    }
}

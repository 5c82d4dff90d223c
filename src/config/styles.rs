//! Label to style lookup.

use std::collections::{BTreeSet, HashMap};

use super::OverlaySettings;
use crate::error::OverlayError;
use crate::highlight::HighlightSpan;
use crate::interval::{IntervalStore, TextRange};
use crate::style::Style;

const LOG_TARGET: &str = "style_overlay::styles";

/// Immutable mapping from highlight label to style.
///
/// Every style in the table carries its own label, so runs produced from
/// different labels never coalesce even when they look alike.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<String, Style>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &OverlaySettings) -> Self {
        let styles = settings
            .styles
            .iter()
            .map(|(label, entry)| (label.clone(), entry.to_style(label)))
            .collect();
        Self { styles }
    }

    /// Add or replace the style for `label`.
    pub fn insert(&mut self, label: impl Into<String>, style: Style) {
        let label = label.into();
        let style = style.with_label(label.clone());
        self.styles.insert(label, style);
    }

    pub fn get(&self, label: &str) -> Option<&Style> {
        self.styles.get(label)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Map labeled spans to styled spans.
    ///
    /// Labels missing from the table fall back to [`Style::BASE`] and are
    /// reported to `unknown`.
    pub fn resolve(
        &self,
        spans: &[HighlightSpan],
        unknown: &mut UnknownLabels,
    ) -> Vec<(TextRange, Style)> {
        spans
            .iter()
            .map(|span| {
                let style = match self.styles.get(&span.label) {
                    Some(style) => style.clone(),
                    None => {
                        unknown.record(&span.label);
                        Style::BASE
                    }
                };
                (span.range(), style)
            })
            .collect()
    }

    /// Resolve `spans` and build the run list in one step.
    pub fn build_store(
        &self,
        spans: &[HighlightSpan],
        unknown: &mut UnknownLabels,
    ) -> IntervalStore {
        IntervalStore::build(self.resolve(spans, unknown))
    }
}

impl<S: Into<String>> FromIterator<(S, Style)> for StyleTable {
    fn from_iter<I: IntoIterator<Item = (S, Style)>>(iter: I) -> Self {
        let mut table = StyleTable::new();
        for (label, style) in iter {
            table.insert(label, style);
        }
        table
    }
}

/// Labels seen without a style table entry.
///
/// Each distinct label is logged once.
#[derive(Debug, Clone, Default)]
pub struct UnknownLabels {
    seen: BTreeSet<String>,
}

impl UnknownLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a miss; returns true the first time `label` is seen.
    pub fn record(&mut self, label: &str) -> bool {
        if self.seen.contains(label) {
            return false;
        }
        log::warn!(
            target: LOG_TARGET,
            "{}; falling back to the base style",
            OverlayError::unknown_label(label)
        );
        self.seen.insert(label.to_string());
        true
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.seen.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

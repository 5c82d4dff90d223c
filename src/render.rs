//! Rendering the overlay onto a text host.
//!
//! The host reports edits and exposes its text; the [`RenderScheduler`]
//! decides when to re-highlight and hands back only the runs whose style
//! changed.

mod scheduler;

pub use scheduler::RenderScheduler;

use std::time::Duration;

use crate::config::OverlaySettings;
use crate::config::defaults::{DEFAULT_BASE_SIZE, DEFAULT_BASE_WEIGHT, DEFAULT_DEBOUNCE_MS};
use crate::interval::TextRange;
use crate::style::{StyleAttributes, Weight};

/// The text view the overlay is rendered onto.
///
/// All offsets exchanged with the host are in the host's own unit
/// (typically UTF-16 code units).
pub trait TextHost: Send + Sync + 'static {
    /// Snapshot of the full buffer text.
    fn current_full_text(&self) -> String;

    /// Whether an input-method composition (uncommitted text) is in progress.
    fn has_provisional_composition(&self) -> bool;

    /// Apply resolved attributes to the given ranges.
    ///
    /// Called while the scheduler holds its state lock, so edits reported
    /// concurrently wait until the batch is applied. Implementations must
    /// not call back into the [`RenderScheduler`] from here.
    fn apply_updates(&self, updates: Vec<StyleUpdate>);
}

/// One attribute change for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleUpdate {
    pub range: TextRange,
    pub attributes: StyleAttributes,
}

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Quiet period after the last edit before re-highlighting.
    pub debounce: Duration,
    pub base_size: f32,
    pub base_weight: Weight,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            base_size: DEFAULT_BASE_SIZE,
            base_weight: DEFAULT_BASE_WEIGHT,
        }
    }
}

impl From<&OverlaySettings> for RenderSettings {
    fn from(settings: &OverlaySettings) -> Self {
        let defaults = RenderSettings::default();
        Self {
            debounce: settings
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce),
            base_size: settings.base_size.unwrap_or(defaults.base_size),
            base_weight: settings.base_weight.unwrap_or(defaults.base_weight),
        }
    }
}

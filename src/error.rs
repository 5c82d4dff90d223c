//! Error handling types for style-overlay
//!
//! This module provides the error types shared by the interval store,
//! the highlighter boundary and the render scheduler.

use std::sync::PoisonError;
use thiserror::Error;

/// Error type for overlay operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// An edit was out of bounds or carried a negative size.
    #[error(
        "Invalid range: {start}+{length} -> {new_length} (store covers 0..{covered})"
    )]
    InvalidRange {
        start: i64,
        length: i64,
        new_length: i64,
        covered: i64,
    },

    /// Two consecutive runs do not touch.
    #[error("Non-contiguous runs at index {index}: expected start {expected}, found {found}")]
    NonContiguousRanges {
        index: usize,
        expected: i64,
        found: i64,
    },

    /// The highlighter could not produce spans (grammar missing, parse failure).
    #[error("Highlight unavailable: {message}")]
    HighlightUnavailable { message: String },

    /// A label had no entry in the style table.
    #[error("Unknown label: {label}")]
    UnknownLabel { label: String },
}

/// Result type for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;

impl OverlayError {
    /// Create an invalid range error
    pub fn invalid_range(start: i64, length: i64, new_length: i64, covered: i64) -> Self {
        OverlayError::InvalidRange {
            start,
            length,
            new_length,
            covered,
        }
    }

    /// Create a highlight unavailable error
    pub fn highlight_unavailable(message: impl Into<String>) -> Self {
        OverlayError::HighlightUnavailable {
            message: message.into(),
        }
    }

    /// Create an unknown label error
    pub fn unknown_label(label: impl Into<String>) -> Self {
        OverlayError::UnknownLabel {
            label: label.into(),
        }
    }
}

/// Helper trait to recover a guard from a poisoned lock
pub trait LockResultExt<T> {
    /// Take the guard out of a `PoisonError`, logging which lock was recovered.
    fn recover_poison(self, context: &str) -> T;
}

impl<T> LockResultExt<T> for Result<T, PoisonError<T>> {
    fn recover_poison(self, context: &str) -> T {
        match self {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!(
                    target: "style_overlay::lock_recovery",
                    "Recovered from poisoned lock in {}",
                    context
                );
                poisoned.into_inner()
            }
        }
    }
}

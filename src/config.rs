pub mod defaults;
pub mod settings;
pub mod styles;
pub mod user;

pub use settings::{EmphasisFlag, OverlaySettings, StyleEntry};
pub use styles::{StyleTable, UnknownLabels};
pub use user::{UserConfigError, UserConfigResult, load_user_config, user_config_path};

/// Merge two OverlaySettings, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<OverlaySettings>,
    primary: Option<OverlaySettings>,
) -> Option<OverlaySettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(mut fallback), Some(primary)) => {
            // Merge styles: start with fallback, override with primary
            fallback.styles.extend(primary.styles);

            Some(OverlaySettings {
                base_size: primary.base_size.or(fallback.base_size),
                base_weight: primary.base_weight.or(fallback.base_weight),
                debounce_ms: primary.debounce_ms.or(fallback.debounce_ms),
                styles: fallback.styles,
            })
        }
    }
}

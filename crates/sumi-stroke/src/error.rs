/// Configuration validation error.
///
/// These indicate a static misconfiguration (a settings panel or preset file
/// producing out-of-range values), so they are surfaced by `validate()` before
/// a pipeline object is built. The processing hot path itself never produces
/// recoverable errors; internal invariant violations there are contract
/// failures (`assert!`/`debug_assert!`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("interpolator spacing must be positive, got {0}")]
    NonPositiveSpacing(f32),

    #[error("stabilization must lie in [0, 1], got {0}")]
    StabilizationOutOfRange(f32),

    #[error("smoothing alpha must lie in [0, 1], got {0}")]
    AlphaOutOfRange(f32),

    #[error("moving-average window size must be at least 1")]
    EmptyWindow,

    #[error("brush {name} must lie in [0, 1], got {value}")]
    UnitRange { name: &'static str, value: f32 },

    #[error("brush {name} range is inverted: min {min} > max {max}")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
}

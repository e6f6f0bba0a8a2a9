//! Input stabilization strategies.
//!
//! A stabilizer owns the raw point buffer of the active gesture and smooths
//! pointer jitter before interpolation. Two sub-contracts exist:
//!
//! - **Incremental** stabilizers (EMA, moving average, passthrough) keep
//!   running state; `processed_curve` drains only the points added since the
//!   last call and remembers its last emitted point so the next call's
//!   interpolation stitches seamlessly.
//! - **Batched** stabilizers (box filter) reprocess their entire raw buffer on
//!   every call, because the weighting depends on each point's distance to the
//!   stroke's current endpoints. Batched stabilizers additionally act as the
//!   partitioner that keeps any single processed batch under a caller-supplied
//!   point cap.

mod box_filter;
mod ema;
mod moving_average;
mod passthrough;

pub use box_filter::BoxFilterStabilizer;
pub use ema::EmaStabilizer;
pub use moving_average::MovingAverageStabilizer;
pub use passthrough::PassthroughStabilizer;

use crate::error::SettingsError;
use crate::geom::BrushPoint;
use crate::interpolate::InterpolatorSettings;

/// Stabilization strategy plus its parameters.
///
/// Every variant carries the interpolator used on its smoothed output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilizerSettings {
    /// Multi-pass box filter with boundary-aware exponential weighting.
    Box {
        /// Smoothing amount in `[0, 1]`, scaled linearly into the filter
        /// window radius.
        stabilization: f32,
        interpolator: InterpolatorSettings,
    },
    /// Exponential moving average of positions.
    ExponentialMovingAverage {
        /// `1` = no smoothing, `0` = output frozen at the running average.
        alpha: f32,
        interpolator: InterpolatorSettings,
    },
    /// Arithmetic mean over a trailing window of positions.
    MovingAverage {
        window_size: usize,
        interpolator: InterpolatorSettings,
    },
    /// Identity passthrough (stabilization disabled).
    Nothing { interpolator: InterpolatorSettings },
}

impl StabilizerSettings {
    pub fn interpolator(&self) -> &InterpolatorSettings {
        match self {
            Self::Box { interpolator, .. }
            | Self::ExponentialMovingAverage { interpolator, .. }
            | Self::MovingAverage { interpolator, .. }
            | Self::Nothing { interpolator } => interpolator,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        match *self {
            Self::Box { stabilization, .. } => {
                if !(0.0..=1.0).contains(&stabilization) {
                    return Err(SettingsError::StabilizationOutOfRange(stabilization));
                }
            }
            Self::ExponentialMovingAverage { alpha, .. } => {
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(SettingsError::AlphaOutOfRange(alpha));
                }
            }
            Self::MovingAverage { window_size, .. } => {
                if window_size == 0 {
                    return Err(SettingsError::EmptyWindow);
                }
            }
            Self::Nothing { .. } => {}
        }
        self.interpolator().validate()
    }
}

/// Closed strategy set; selected once per brush-configuration change.
#[derive(Debug, Clone)]
pub enum Stabilizer {
    Box(BoxFilterStabilizer),
    Ema(EmaStabilizer),
    MovingAverage(MovingAverageStabilizer),
    Nothing(PassthroughStabilizer),
}

impl Stabilizer {
    /// Builds the stabilizer selected by `settings`.
    ///
    /// Settings are expected to be validated beforehand; see
    /// [`StabilizerSettings::validate`].
    pub fn new(settings: &StabilizerSettings) -> Self {
        debug_assert!(settings.validate().is_ok(), "invalid stabilizer settings");
        match *settings {
            StabilizerSettings::Box {
                stabilization,
                interpolator,
            } => Self::Box(BoxFilterStabilizer::new(stabilization, &interpolator)),
            StabilizerSettings::ExponentialMovingAverage {
                alpha,
                interpolator,
            } => Self::Ema(EmaStabilizer::new(alpha, &interpolator)),
            StabilizerSettings::MovingAverage {
                window_size,
                interpolator,
            } => Self::MovingAverage(MovingAverageStabilizer::new(window_size, &interpolator)),
            StabilizerSettings::Nothing { interpolator } => {
                Self::Nothing(PassthroughStabilizer::new(&interpolator))
            }
        }
    }

    /// Appends one raw pointer sample, in arrival order.
    pub fn add_point(&mut self, point: BrushPoint) {
        match self {
            Self::Box(s) => s.add_point(point),
            Self::Ema(s) => s.add_point(point),
            Self::MovingAverage(s) => s.add_point(point),
            Self::Nothing(s) => s.add_point(point),
        }
    }

    /// Returns the stabilized, resampled curve.
    ///
    /// Incremental variants drain points added since the last call; the
    /// batched variant restates the whole current stroke.
    pub fn processed_curve(&mut self) -> Vec<BrushPoint> {
        match self {
            Self::Box(s) => s.processed_curve(),
            Self::Ema(s) => s.processed_curve(),
            Self::MovingAverage(s) => s.processed_curve(),
            Self::Nothing(s) => s.processed_curve(),
        }
    }

    /// Discards all buffered raw points and carried context.
    pub fn reset(&mut self) {
        match self {
            Self::Box(s) => s.reset(),
            Self::Ema(s) => s.reset(),
            Self::MovingAverage(s) => s.reset(),
            Self::Nothing(s) => s.reset(),
        }
    }

    pub fn is_batched(&self) -> bool {
        matches!(self, Self::Box(_))
    }

    /// Predicted interpolated output count, batched variants only.
    pub fn predict_output_size(&self) -> Option<f32> {
        match self {
            Self::Box(s) => Some(s.predict_output_size()),
            _ => None,
        }
    }

    /// Splits off and processes a prefix of the stroke that fits under
    /// `max_points`; batched variants only.
    ///
    /// See [`BoxFilterStabilizer::partition`].
    pub fn partition(&mut self, max_points: usize) -> Option<Vec<BrushPoint>> {
        match self {
            Self::Box(s) => Some(s.partition(max_points)),
            _ => None,
        }
    }
}

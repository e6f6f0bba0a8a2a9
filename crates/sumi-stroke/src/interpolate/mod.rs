//! Arc-length resampling of stabilized point lists.
//!
//! An interpolator takes an ordered point list and re-emits it at (close to)
//! uniform arc-length spacing, either along the raw polyline (`Linear`) or
//! along a Catmull-Rom-family spline fitted through the points (`Smoothed`).

mod linear;
mod spline;

pub use linear::LinearInterpolator;
pub use spline::SmoothedInterpolator;

use crate::error::SettingsError;
use crate::geom::BrushPoint;

/// Resampling strategy plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolatorSettings {
    Linear {
        spacing: f32,
    },
    Smoothed {
        tension: f32,
        alpha: f32,
        spacing: f32,
    },
}

impl InterpolatorSettings {
    pub fn spacing(&self) -> f32 {
        match *self {
            Self::Linear { spacing } | Self::Smoothed { spacing, .. } => spacing,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let spacing = self.spacing();
        if !(spacing > 0.0) {
            return Err(SettingsError::NonPositiveSpacing(spacing));
        }
        Ok(())
    }
}

/// Closed strategy set; selected once per brush-configuration change.
#[derive(Debug, Clone)]
pub enum Interpolator {
    Linear(LinearInterpolator),
    Smoothed(SmoothedInterpolator),
}

impl Interpolator {
    pub fn new(settings: &InterpolatorSettings) -> Self {
        debug_assert!(settings.validate().is_ok());
        match *settings {
            InterpolatorSettings::Linear { spacing } => {
                Self::Linear(LinearInterpolator::new(spacing))
            }
            InterpolatorSettings::Smoothed {
                tension,
                alpha,
                spacing,
            } => Self::Smoothed(SmoothedInterpolator::new(tension, alpha, spacing)),
        }
    }

    /// Resamples `points` at the configured spacing.
    ///
    /// Degenerate input (one point or fewer) is returned unchanged.
    pub fn process(&self, points: &[BrushPoint]) -> Vec<BrushPoint> {
        match self {
            Self::Linear(lin) => lin.process(points),
            Self::Smoothed(sm) => sm.process(points),
        }
    }

    /// Resamples `points` continuing from `context` (the final output point of
    /// the previous batch).
    ///
    /// The context is prepended before processing and its corresponding output
    /// sample is dropped afterwards, so consecutive batches stitch without
    /// duplicated geometry.
    pub fn process_with_context(
        &self,
        points: &[BrushPoint],
        context: Option<BrushPoint>,
    ) -> Vec<BrushPoint> {
        let Some(ctx) = context else {
            return self.process(points);
        };

        let mut extended = Vec::with_capacity(points.len() + 1);
        extended.push(ctx);
        extended.extend_from_slice(points);

        let mut out = self.process(&extended);
        if !out.is_empty() {
            out.remove(0);
        }
        out
    }

    /// Predicted output count for an input of the given arc length.
    ///
    /// This is the cost model the batcher consults before committing to the
    /// full resampling work; see the partitioner for the accompanying safety
    /// factor.
    pub fn estimate_output_size(&self, input_arc_length: f32) -> f32 {
        let spacing = match self {
            Self::Linear(lin) => lin.spacing(),
            Self::Smoothed(sm) => sm.spacing(),
        };
        input_arc_length / spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vec2;

    fn pt(x: f32, y: f32) -> BrushPoint {
        BrushPoint::new(Vec2::new(x, y), 1.0)
    }

    // ── settings validation ───────────────────────────────────────────────

    #[test]
    fn rejects_zero_spacing() {
        let s = InterpolatorSettings::Linear { spacing: 0.0 };
        assert_eq!(s.validate(), Err(SettingsError::NonPositiveSpacing(0.0)));
    }

    #[test]
    fn rejects_nan_spacing() {
        let s = InterpolatorSettings::Smoothed {
            tension: 0.5,
            alpha: 0.5,
            spacing: f32::NAN,
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn accepts_positive_spacing() {
        let s = InterpolatorSettings::Linear { spacing: 0.5 };
        assert!(s.validate().is_ok());
    }

    // ── context stitching ─────────────────────────────────────────────────

    #[test]
    fn context_stitch_matches_unsplit_processing() {
        let interp = Interpolator::new(&InterpolatorSettings::Linear { spacing: 1.0 });
        let all: Vec<BrushPoint> = (0..8).map(|i| pt(i as f32 * 3.0, 0.0)).collect();

        let whole = interp.process(&all);

        let (head, tail) = all.split_at(4);
        let mut stitched = interp.process(head);
        stitched.extend(interp.process_with_context(tail, head.last().copied()));

        assert_eq!(whole.len(), stitched.len());
        for (a, b) in whole.iter().zip(&stitched) {
            assert!(a.position.distance(b.position) < 1e-4);
        }
    }

    #[test]
    fn context_output_is_not_duplicated() {
        let interp = Interpolator::new(&InterpolatorSettings::Linear { spacing: 2.0 });
        let out = interp.process_with_context(&[pt(4.0, 0.0)], Some(pt(0.0, 0.0)));
        // Samples at 2 and 4; the context sample at 0 is dropped.
        assert_eq!(out.len(), 2);
        assert!((out[0].position.x - 2.0).abs() < 1e-5);
        assert!((out[1].position.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn no_context_falls_back_to_plain_processing() {
        let interp = Interpolator::new(&InterpolatorSettings::Linear { spacing: 2.0 });
        let pts = [pt(0.0, 0.0), pt(4.0, 0.0)];
        assert_eq!(
            interp.process_with_context(&pts, None),
            interp.process(&pts)
        );
    }

    // ── output estimate ───────────────────────────────────────────────────

    #[test]
    fn estimate_is_length_over_spacing() {
        let interp = Interpolator::new(&InterpolatorSettings::Linear { spacing: 0.5 });
        assert!((interp.estimate_output_size(10.0) - 20.0).abs() < 1e-6);
    }
}

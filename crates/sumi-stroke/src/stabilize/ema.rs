use crate::geom::{BrushPoint, Vec2};
use crate::interpolate::{Interpolator, InterpolatorSettings};

/// Exponential-moving-average stabilizer.
///
/// Positions are folded into a running average, `avg' = avg·(1−α) + p·α`;
/// pressure passes through unsmoothed. `α = 1` disables smoothing entirely,
/// `α → 0` freezes the output at the running average.
///
/// Incremental: `processed_curve` drains only the points added since the last
/// call, remembering the last emitted point as interpolation context so
/// consecutive drains stitch seamlessly.
#[derive(Debug, Clone)]
pub struct EmaStabilizer {
    alpha: f32,
    avg: Option<Vec2>,
    output: Vec<BrushPoint>,
    last_output: Option<BrushPoint>,
    interpolator: Interpolator,
}

impl EmaStabilizer {
    pub fn new(alpha: f32, interpolator: &InterpolatorSettings) -> Self {
        debug_assert!((0.0..=1.0).contains(&alpha));
        Self {
            alpha,
            avg: None,
            output: Vec::new(),
            last_output: None,
            interpolator: Interpolator::new(interpolator),
        }
    }

    pub fn add_point(&mut self, point: BrushPoint) {
        let prev = self.avg.unwrap_or(point.position);
        let avg = prev * (1.0 - self.alpha) + point.position * self.alpha;
        self.avg = Some(avg);
        self.output.push(BrushPoint::new(avg, point.pressure));
    }

    pub fn processed_curve(&mut self) -> Vec<BrushPoint> {
        let processed = self
            .interpolator
            .process_with_context(&self.output, self.last_output);

        if let Some(last) = self.output.last() {
            self.last_output = Some(*last);
        }
        self.output.clear();

        processed
    }

    pub fn reset(&mut self) {
        self.avg = None;
        self.output.clear();
        self.last_output = None;
    }
}

use crate::geom::BrushPoint;
use crate::interpolate::{Interpolator, InterpolatorSettings};

/// Identity stabilizer, used when stabilization is disabled.
///
/// Points pass through unmodified, but the drain still runs the configured
/// interpolator so downstream consumers always see evenly spaced output.
#[derive(Debug, Clone)]
pub struct PassthroughStabilizer {
    points: Vec<BrushPoint>,
    last_output: Option<BrushPoint>,
    interpolator: Interpolator,
}

impl PassthroughStabilizer {
    pub fn new(interpolator: &InterpolatorSettings) -> Self {
        Self {
            points: Vec::new(),
            last_output: None,
            interpolator: Interpolator::new(interpolator),
        }
    }

    pub fn add_point(&mut self, point: BrushPoint) {
        self.points.push(point);
    }

    pub fn processed_curve(&mut self) -> Vec<BrushPoint> {
        let processed = self
            .interpolator
            .process_with_context(&self.points, self.last_output);

        if let Some(last) = self.points.last() {
            self.last_output = Some(*last);
        }
        self.points.clear();

        processed
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.last_output = None;
    }
}

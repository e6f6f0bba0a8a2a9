use std::collections::VecDeque;

use crate::geom::{BrushPoint, Vec2};
use crate::interpolate::{Interpolator, InterpolatorSettings};

/// Trailing moving-average stabilizer.
///
/// Keeps a bounded FIFO of the last `window_size` raw positions; each output
/// point is the arithmetic mean of the window, paired with the newest sample's
/// pressure. Incremental drain semantics match [`EmaStabilizer`].
///
/// [`EmaStabilizer`]: super::EmaStabilizer
#[derive(Debug, Clone)]
pub struct MovingAverageStabilizer {
    window_size: usize,
    window: VecDeque<Vec2>,
    output: Vec<BrushPoint>,
    last_output: Option<BrushPoint>,
    interpolator: Interpolator,
}

impl MovingAverageStabilizer {
    pub fn new(window_size: usize, interpolator: &InterpolatorSettings) -> Self {
        debug_assert!(window_size > 0);
        Self {
            window_size,
            window: VecDeque::with_capacity(window_size),
            output: Vec::new(),
            last_output: None,
            interpolator: Interpolator::new(interpolator),
        }
    }

    pub fn add_point(&mut self, point: BrushPoint) {
        if self.window.len() >= self.window_size {
            self.window.pop_front();
        }
        self.window.push_back(point.position);

        let mut sum = Vec2::zero();
        for &p in &self.window {
            sum += p;
        }
        let avg = sum / self.window.len() as f32;
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
        self.window.clear();
        self.output.clear();
        self.last_output = None;
    }
}

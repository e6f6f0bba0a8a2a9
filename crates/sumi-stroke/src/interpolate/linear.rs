use crate::geom::{BrushPoint, Vec2, lerp_f32};

/// Piecewise-linear resampler.
///
/// For each consecutive input pair at distance `d` it emits
/// `ceil(d / spacing) - 1` intermediate points at uniform arc-length steps,
/// linearly interpolating pressure, so consecutive outputs are never farther
/// apart than `spacing` (the final step of a segment carries the remainder).
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    spacing: f32,
}

impl LinearInterpolator {
    pub fn new(spacing: f32) -> Self {
        debug_assert!(spacing > 0.0);
        Self { spacing }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn process(&self, points: &[BrushPoint]) -> Vec<BrushPoint> {
        if points.len() <= 1 {
            return points.to_vec();
        }

        let mut out = Vec::with_capacity(points.len());
        out.push(points[0]);

        for pair in points.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let dist = start.position.distance(end.position);
            if dist <= f32::EPSILON {
                // Coincident samples add no geometry.
                continue;
            }

            let steps = (dist / self.spacing).ceil() as usize;
            for j in 1..steps {
                let along = self.spacing * j as f32;
                let t = along / dist;
                out.push(BrushPoint::new(
                    Vec2::lerp_by_distance(start.position, end.position, along),
                    lerp_f32(start.pressure, end.pressure, t),
                ));
            }
            out.push(end);
        }

        out
    }
}

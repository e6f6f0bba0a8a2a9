use super::Vec2;

/// One pointer sample along a stroke: a position plus pen pressure in `[0, 1]`.
///
/// Produced once per raw pointer event and once per resampled output sample.
/// Immutable value type; no ownership beyond the buffer holding it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BrushPoint {
    pub position: Vec2,
    pub pressure: f32,
}

impl BrushPoint {
    #[inline]
    pub const fn new(position: Vec2, pressure: f32) -> Self {
        Self { position, pressure }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.pressure.is_finite()
    }
}

/// Sum of consecutive Euclidean distances along `points`.
///
/// Zero for fewer than two points.
pub fn path_length(points: &[BrushPoint]) -> f32 {
    points
        .windows(2)
        .map(|w| w[0].position.distance(w[1].position))
        .sum()
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

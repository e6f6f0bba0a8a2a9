use crate::geom::Vec2;

/// Placement of one quad: a center anchor, full extents, and a rotation
/// about the center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadTransform {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl QuadTransform {
    pub fn square(center: Vec2, size: f32, rotation: f32) -> Self {
        Self { center, width: size, height: size, rotation }
    }

    /// Corner positions in counter-clockwise order starting at the bottom
    /// left: `[bl, br, tr, tl]`.
    pub fn corners(&self) -> [Vec2; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let c = self.center;
        [
            Vec2::new(c.x - hw, c.y - hh),
            Vec2::new(c.x + hw, c.y - hh),
            Vec2::new(c.x + hw, c.y + hh),
            Vec2::new(c.x - hw, c.y + hh),
        ]
        .map(|p| p.rotate_about(c, self.rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn unrotated_square_corners() {
        let t = QuadTransform::square(Vec2::new(1.0, 1.0), 2.0, 0.0);
        let [bl, br, tr, tl] = t.corners();
        assert_eq!(bl, Vec2::new(0.0, 0.0));
        assert_eq!(br, Vec2::new(2.0, 0.0));
        assert_eq!(tr, Vec2::new(2.0, 2.0));
        assert_eq!(tl, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn quarter_turn_permutes_square_corners() {
        let t = QuadTransform::square(Vec2::zero(), 2.0, FRAC_PI_2);
        let [bl, br, tr, tl] = t.corners();
        // Rotating a centered square by 90° maps each corner onto its
        // counter-clockwise neighbor's position.
        assert!(close(bl, Vec2::new(1.0, -1.0)));
        assert!(close(br, Vec2::new(1.0, 1.0)));
        assert!(close(tr, Vec2::new(-1.0, 1.0)));
        assert!(close(tl, Vec2::new(-1.0, -1.0)));
    }

    #[test]
    fn rotation_preserves_center_and_extent() {
        let t = QuadTransform::square(Vec2::new(5.0, -3.0), 4.0, 1.234);
        let corners = t.corners();
        let centroid = corners.iter().fold(Vec2::zero(), |acc, &p| acc + p) / 4.0;
        assert!(close(centroid, t.center));
        for p in corners {
            let half_diag = (2.0f32 * 2.0 + 2.0 * 2.0).sqrt();
            assert!((p.distance(t.center) - half_diag).abs() < 1e-4);
        }
    }
}

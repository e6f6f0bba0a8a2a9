use core::f32::consts::FRAC_PI_2;

use crate::brush::BrushAttributes;
use crate::geom::{BrushPoint, Vec2};
use crate::vertex::transform::QuadTransform;
use crate::vertex::vertex::FLOATS_PER_QUAD;

/// Writes stroke quads as interleaved floats into a caller-provided buffer.
///
/// Every `emplace_*` method takes the buffer plus a float offset and returns
/// the offset past what it wrote, so batches can be packed back to back
/// without intermediate allocation. The buffer must be pre-sized by the
/// caller (see [`floats_for_quads`]); offsets past the end are a contract
/// violation checked by `debug_assert`.
///
/// Eraser brushes emplace white quads with inverted opacity, so erasing
/// composites as inverse alpha instead of needing a separate blend mode.
///
/// [`floats_for_quads`]: super::floats_for_quads
#[derive(Debug, Copy, Clone)]
pub struct QuadEmplacer<'a> {
    brush: &'a BrushAttributes,
}

// Corner order is [bl, br, tr, tl]; a quad is the two counter-clockwise
// triangles (bl, br, tr) and (bl, tr, tl).
const QUAD_CORNER_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

const UNIT_SQUARE_TEX: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

impl<'a> QuadEmplacer<'a> {
    pub fn new(brush: &'a BrushAttributes) -> Self {
        Self { brush }
    }

    // ── single quads ──────────────────────────────────────────────────────

    /// Emplaces one stamped square centered on `point`, sized and faded by
    /// its pressure, rotated by `rotation` about the center.
    pub fn emplace_square(
        &self,
        buf: &mut [f32],
        offset: usize,
        point: BrushPoint,
        rotation: f32,
    ) -> usize {
        let size = self.brush.size_for_pressure(point.pressure);
        let opacity = self.opacity_at(point.pressure);
        let corners = QuadTransform::square(point.position, size, rotation).corners();
        self.write_quad(buf, offset, corners, UNIT_SQUARE_TEX, [opacity; 4])
    }

    /// Emplaces one stretched rectangle spanning `start → end`.
    ///
    /// Width follows the pressure-mapped brush size at each end; texture V
    /// runs `v_start → v_end` along the segment so textures stay continuous
    /// across consecutive quads.
    pub fn emplace_line(
        &self,
        buf: &mut [f32],
        offset: usize,
        start: BrushPoint,
        end: BrushPoint,
        v_start: f32,
        v_end: f32,
    ) -> usize {
        let dir = (end.position - start.position).normalized();
        let n = dir.perp();
        let h0 = self.brush.size_for_pressure(start.pressure) / 2.0;
        let h1 = self.brush.size_for_pressure(end.pressure) / 2.0;

        let corners = [
            start.position - n * h0,
            end.position - n * h1,
            end.position + n * h1,
            start.position + n * h0,
        ];
        let tex = [
            [0.0, v_start],
            [0.0, v_end],
            [1.0, v_end],
            [1.0, v_start],
        ];
        let o0 = self.opacity_at(start.pressure);
        let o1 = self.opacity_at(end.pressure);
        self.write_quad(buf, offset, corners, tex, [o0, o1, o1, o0])
    }

    // ── stroke drivers ────────────────────────────────────────────────────

    /// Emplaces one rotated stamp per point.
    ///
    /// Each stamp faces the direction of travel toward the next point,
    /// offset a quarter turn so the texture's "up" crosses the stroke; the
    /// final point reuses the direction it was approached from.
    pub fn emplace_stamped_stroke(
        &self,
        buf: &mut [f32],
        mut offset: usize,
        points: &[BrushPoint],
    ) -> usize {
        let mut ang = 0.0;
        for (i, &p) in points.iter().enumerate() {
            if let Some(next) = points.get(i + 1) {
                let disp = next.position - p.position;
                if disp.length() > f32::EPSILON {
                    ang = disp.angle();
                }
            }
            offset = self.emplace_square(buf, offset, p, ang + FRAC_PI_2);
        }
        offset
    }

    /// Emplaces one rectangle per consecutive point pair, with texture V
    /// accumulating in units of the brush width so dashes and paper grain
    /// keep their aspect along the stroke.
    pub fn emplace_line_stroke(
        &self,
        buf: &mut [f32],
        mut offset: usize,
        points: &[BrushPoint],
    ) -> usize {
        let mut v = 0.0;
        for pair in points.windows(2) {
            let [start, end] = [pair[0], pair[1]];
            let seg_len = start.position.distance(end.position);
            if seg_len <= f32::EPSILON {
                continue;
            }
            let width = self.brush.size_for_pressure(start.pressure).max(f32::EPSILON);
            let v_end = v + seg_len / width;
            offset = self.emplace_line(buf, offset, start, end, v, v_end);
            v = v_end;
        }
        offset
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn opacity_at(&self, pressure: f32) -> f32 {
        let opacity = self.brush.opacity_for_pressure(pressure);
        if self.brush.is_eraser { 1.0 - opacity } else { opacity }
    }

    fn write_quad(
        &self,
        buf: &mut [f32],
        offset: usize,
        corners: [Vec2; 4],
        tex: [[f32; 2]; 4],
        opacity: [f32; 4],
    ) -> usize {
        debug_assert!(
            offset + FLOATS_PER_QUAD <= buf.len(),
            "vertex buffer overflow: offset {offset}, capacity {}",
            buf.len()
        );
        let color = if self.brush.is_eraser {
            crate::brush::Color::WHITE
        } else {
            self.brush.color
        };

        let mut i = offset;
        for &c in &QUAD_CORNER_INDICES {
            buf[i] = corners[c].x;
            buf[i + 1] = corners[c].y;
            buf[i + 2] = color.r;
            buf[i + 3] = color.g;
            buf[i + 4] = color.b;
            buf[i + 5] = tex[c][0];
            buf[i + 6] = tex[c][1];
            buf[i + 7] = opacity[c];
            i += 8;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::Color;
    use crate::vertex::vertex::{floats_for_quads, vertices_of};

    fn brush(size: f32) -> BrushAttributes {
        BrushAttributes {
            size,
            opacity: 1.0,
            min_size: 1.0,
            max_size: 1.0,
            min_opacity: 1.0,
            max_opacity: 1.0,
            color: Color::new(0.2, 0.4, 0.6),
            ..Default::default()
        }
    }

    fn pt(x: f32, y: f32) -> BrushPoint {
        BrushPoint::new(Vec2::new(x, y), 1.0)
    }

    // ── emplace_square ────────────────────────────────────────────────────

    #[test]
    fn square_writes_one_quad_and_advances_offset() {
        let b = brush(2.0);
        let mut buf = vec![0.0; floats_for_quads(1)];
        let next = QuadEmplacer::new(&b).emplace_square(&mut buf, 0, pt(0.0, 0.0), 0.0);
        assert_eq!(next, FLOATS_PER_QUAD);

        let verts = vertices_of(&buf);
        assert_eq!(verts.len(), 6);
        // First vertex is the bottom-left corner of a 2×2 square at origin.
        assert_eq!(verts[0].pos, [-1.0, -1.0]);
        assert_eq!(verts[0].color, [0.2, 0.4, 0.6]);
        assert_eq!(verts[0].tex, [0.0, 0.0]);
        assert_eq!(verts[0].opacity, 1.0);
    }

    #[test]
    fn square_triangles_share_the_diagonal() {
        let b = brush(2.0);
        let mut buf = vec![0.0; floats_for_quads(1)];
        QuadEmplacer::new(&b).emplace_square(&mut buf, 0, pt(3.0, 5.0), 0.0);
        let verts = vertices_of(&buf);
        // (bl, br, tr), (bl, tr, tl): vertices 0/3 and 2/4 coincide.
        assert_eq!(verts[0].pos, verts[3].pos);
        assert_eq!(verts[2].pos, verts[4].pos);
    }

    #[test]
    fn square_size_follows_pressure() {
        let b = BrushAttributes {
            size: 4.0,
            min_size: 0.5,
            max_size: 1.0,
            ..brush(4.0)
        };
        let mut buf = vec![0.0; floats_for_quads(1)];
        let half = BrushPoint::new(Vec2::zero(), 0.0);
        QuadEmplacer::new(&b).emplace_square(&mut buf, 0, half, 0.0);
        // Pressure 0 → size 4·0.5 = 2, so corners sit at ±1.
        assert_eq!(vertices_of(&buf)[0].pos, [-1.0, -1.0]);
    }

    // ── emplace_line ──────────────────────────────────────────────────────

    #[test]
    fn horizontal_line_quad_spans_segment_at_brush_width() {
        let b = brush(2.0);
        let mut buf = vec![0.0; floats_for_quads(1)];
        QuadEmplacer::new(&b).emplace_line(&mut buf, 0, pt(0.0, 0.0), pt(10.0, 0.0), 0.0, 5.0);

        let verts = vertices_of(&buf);
        let xs: Vec<f32> = verts.iter().map(|v| v.pos[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.pos[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 10.0);
        // Width 2 → ±1 either side of the axis.
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }

    #[test]
    fn line_texture_v_matches_endpoints() {
        let b = brush(2.0);
        let mut buf = vec![0.0; floats_for_quads(1)];
        QuadEmplacer::new(&b).emplace_line(&mut buf, 0, pt(0.0, 0.0), pt(4.0, 0.0), 0.25, 0.75);
        let verts = vertices_of(&buf);
        for v in verts {
            let expected = if v.pos[0] == 0.0 { 0.25 } else { 0.75 };
            assert_eq!(v.tex[1], expected);
        }
    }

    // ── stroke drivers ────────────────────────────────────────────────────

    #[test]
    fn stamped_stroke_emits_one_quad_per_point() {
        let b = brush(1.0);
        let points = [pt(0.0, 0.0), pt(2.0, 0.0), pt(4.0, 1.0)];
        let mut buf = vec![0.0; floats_for_quads(points.len())];
        let end = QuadEmplacer::new(&b).emplace_stamped_stroke(&mut buf, 0, &points);
        assert_eq!(end, floats_for_quads(3));
    }

    #[test]
    fn stamps_stay_centered_on_their_points() {
        let b = brush(2.0);
        let points = [pt(0.0, 0.0), pt(5.0, 5.0)];
        let mut buf = vec![0.0; floats_for_quads(points.len())];
        QuadEmplacer::new(&b).emplace_stamped_stroke(&mut buf, 0, &points);

        let verts = vertices_of(&buf);
        for (quad, point) in verts.chunks_exact(6).zip(&points) {
            for v in quad {
                let d = Vec2::new(v.pos[0], v.pos[1]).distance(point.position);
                // Rotation moves corners around the center, never away from it.
                assert!(d <= 2.0f32.sqrt() + 1e-4);
            }
        }
    }

    #[test]
    fn line_stroke_accumulates_texture_v() {
        let b = brush(2.0);
        // Two 4-long segments at width 2: v runs 0 → 2 → 4.
        let points = [pt(0.0, 0.0), pt(4.0, 0.0), pt(8.0, 0.0)];
        let mut buf = vec![0.0; floats_for_quads(2)];
        QuadEmplacer::new(&b).emplace_line_stroke(&mut buf, 0, &points);

        let verts = vertices_of(&buf);
        let v_max_first = verts[..6].iter().map(|v| v.tex[1]).fold(f32::MIN, f32::max);
        let v_max_second = verts[6..].iter().map(|v| v.tex[1]).fold(f32::MIN, f32::max);
        assert_eq!(v_max_first, 2.0);
        assert_eq!(v_max_second, 4.0);
    }

    #[test]
    fn line_stroke_skips_zero_length_segments() {
        let b = brush(1.0);
        let points = [pt(0.0, 0.0), pt(0.0, 0.0), pt(3.0, 0.0)];
        let mut buf = vec![0.0; floats_for_quads(2)];
        let end = QuadEmplacer::new(&b).emplace_line_stroke(&mut buf, 0, &points);
        assert_eq!(end, floats_for_quads(1));
    }

    // ── eraser ────────────────────────────────────────────────────────────

    #[test]
    fn eraser_writes_white_with_inverted_opacity() {
        let b = BrushAttributes {
            is_eraser: true,
            opacity: 1.0,
            min_opacity: 0.3,
            max_opacity: 0.3,
            ..brush(2.0)
        };
        let mut buf = vec![0.0; floats_for_quads(1)];
        QuadEmplacer::new(&b).emplace_square(&mut buf, 0, pt(0.0, 0.0), 0.0);
        let v = vertices_of(&buf)[0];
        assert_eq!(v.color, [1.0, 1.0, 1.0]);
        assert!((v.opacity - 0.7).abs() < 1e-6);
    }
}

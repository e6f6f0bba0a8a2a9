use crate::geom::{BrushPoint, Vec2, lerp_f32, path_length};

/// Subdivisions per spline segment used to build the arc-length table.
///
/// 16 keeps the length error well under a percent for the gentle curvature
/// pointer input produces at typical sample rates.
const ARC_SAMPLES: usize = 16;

/// Knot intervals below this are treated as degenerate (coincident points).
const MIN_KNOT: f32 = 1e-4;

/// Spline resampler over a Catmull-Rom-family curve.
///
/// `alpha` selects the knot parameterization (0 = uniform, 0.5 = centripetal,
/// 1 = chordal); `tension` scales the tangents (1 collapses every segment to a
/// straight line). Output samples are taken at uniform arc-length steps using
/// the spline's own length table, not the raw polyline length.
#[derive(Debug, Clone)]
pub struct SmoothedInterpolator {
    tension: f32,
    alpha: f32,
    spacing: f32,
}

impl SmoothedInterpolator {
    pub fn new(tension: f32, alpha: f32, spacing: f32) -> Self {
        debug_assert!(spacing > 0.0);
        Self {
            tension,
            alpha,
            spacing,
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn process(&self, points: &[BrushPoint]) -> Vec<BrushPoint> {
        if points.len() <= 1 {
            return points.to_vec();
        }

        let positions: Vec<Vec2> = points.iter().map(|p| p.position).collect();
        let spline = CatmullRom::fit(&positions, self.tension, self.alpha);
        let total = spline.total_length();
        if total <= f32::EPSILON {
            // All samples coincident; nothing to resample.
            return points.to_vec();
        }

        let raw_total = path_length(points);
        let steps = (total / self.spacing).ceil() as usize;

        let mut out = Vec::with_capacity(steps);
        for i in 0..steps {
            let s = (self.spacing * i as f32).min(total);
            let position = spline.point_at_length(s);
            // Pressure rides along separately: linear along the raw polyline
            // at the same arc-length fraction.
            let pressure = pressure_at_fraction(points, raw_total, s / total);
            out.push(BrushPoint::new(position, pressure));
        }

        out
    }
}

/// Linear pressure lookup at `fraction` of the raw polyline's length.
fn pressure_at_fraction(points: &[BrushPoint], raw_total: f32, fraction: f32) -> f32 {
    debug_assert!(points.len() >= 2);
    if raw_total <= f32::EPSILON {
        return points[0].pressure;
    }

    let target = fraction.clamp(0.0, 1.0) * raw_total;
    let mut walked = 0.0;
    for pair in points.windows(2) {
        let seg = pair[0].position.distance(pair[1].position);
        if walked + seg >= target {
            let t = if seg <= f32::EPSILON {
                0.0
            } else {
                (target - walked) / seg
            };
            return lerp_f32(pair[0].pressure, pair[1].pressure, t);
        }
        walked += seg;
    }
    points[points.len() - 1].pressure
}

// ── spline internals ──────────────────────────────────────────────────────

/// One cubic segment in Hermite form plus its cumulative arc-length table.
#[derive(Debug, Clone)]
struct Segment {
    a: Vec2,
    b: Vec2,
    c: Vec2,
    d: Vec2,
    /// Cumulative length at `t = j / ARC_SAMPLES` for `j = 0..=ARC_SAMPLES`.
    arc: [f32; ARC_SAMPLES + 1],
    /// Arc length of the whole spline before this segment starts.
    start_len: f32,
}

impl Segment {
    fn eval(&self, t: f32) -> Vec2 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    fn len(&self) -> f32 {
        self.arc[ARC_SAMPLES]
    }

    /// Maps a length local to this segment back to a curve parameter.
    fn t_at_local_length(&self, local: f32) -> f32 {
        let local = local.clamp(0.0, self.len());
        // partition_point: first table entry strictly beyond `local`.
        let hi = self.arc.partition_point(|&l| l <= local).min(ARC_SAMPLES);
        let lo = hi - 1;
        let span = self.arc[hi] - self.arc[lo];
        let frac = if span <= f32::EPSILON {
            0.0
        } else {
            (local - self.arc[lo]) / span
        };
        (lo as f32 + frac) / ARC_SAMPLES as f32
    }
}

/// Catmull-Rom-family spline through a list of control points, with an
/// arc-length-to-parameter inverse built from per-segment sampling.
#[derive(Debug, Clone)]
struct CatmullRom {
    segments: Vec<Segment>,
}

impl CatmullRom {
    /// Fits the spline through `points` (at least 2).
    ///
    /// End segments duplicate their boundary control point, the usual trick to
    /// make the curve start and end exactly at the input endpoints.
    fn fit(points: &[Vec2], tension: f32, alpha: f32) -> Self {
        debug_assert!(points.len() >= 2);

        let n = points.len();
        let mut segments = Vec::with_capacity(n - 1);
        let mut start_len = 0.0;

        for i in 0..n - 1 {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(n - 1)];

            let mut seg = make_segment(p0, p1, p2, p3, tension, alpha);
            seg.start_len = start_len;
            start_len += seg.len();
            segments.push(seg);
        }

        Self { segments }
    }

    fn total_length(&self) -> f32 {
        self.segments
            .last()
            .map_or(0.0, |seg| seg.start_len + seg.len())
    }

    /// Evaluates the curve at cumulative arc length `s`, clamped to the curve.
    fn point_at_length(&self, s: f32) -> Vec2 {
        let s = s.clamp(0.0, self.total_length());

        // First segment whose start lies beyond s, minus one.
        let idx = self
            .segments
            .partition_point(|seg| seg.start_len <= s)
            .saturating_sub(1);
        let seg = &self.segments[idx];
        seg.eval(seg.t_at_local_length(s - seg.start_len))
    }
}

fn make_segment(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, tension: f32, alpha: f32) -> Segment {
    // Knot intervals under the chosen parameterization. Degenerate intervals
    // (duplicated endpoints, coincident samples) fall back to the middle one.
    let mut dt1 = p1.distance(p2).powf(alpha);
    if dt1 < MIN_KNOT {
        dt1 = 1.0;
    }
    let mut dt0 = p0.distance(p1).powf(alpha);
    if dt0 < MIN_KNOT {
        dt0 = dt1;
    }
    let mut dt2 = p2.distance(p3).powf(alpha);
    if dt2 < MIN_KNOT {
        dt2 = dt1;
    }

    // Non-uniform Catmull-Rom tangents, rescaled to the [0,1] segment domain.
    let t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
    let t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
    let m1 = t1 * dt1 * (1.0 - tension);
    let m2 = t2 * dt1 * (1.0 - tension);

    let a = (p1 - p2) * 2.0 + m1 + m2;
    let b = (p2 - p1) * 3.0 - m1 * 2.0 - m2;

    let mut seg = Segment {
        a,
        b,
        c: m1,
        d: p1,
        arc: [0.0; ARC_SAMPLES + 1],
        start_len: 0.0,
    };

    let mut acc = 0.0;
    let mut prev = seg.eval(0.0);
    for j in 1..=ARC_SAMPLES {
        let next = seg.eval(j as f32 / ARC_SAMPLES as f32);
        acc += prev.distance(next);
        seg.arc[j] = acc;
        prev = next;
    }

    seg
}

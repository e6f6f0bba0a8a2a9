use crate::geom::{BrushPoint, path_length};
use crate::interpolate::{Interpolator, InterpolatorSettings};

/// Sequential convolution passes applied to the curve. More passes, more
/// smoothing.
const NUM_PASSES: usize = 3;

/// Window radius at `stabilization = 1`.
const MAX_RADIUS: f32 = 20.0;

/// Falloff of the endpoint weighting. Larger values bias the average toward
/// the center point, keeping endpoints near their original positions.
const POINT_IMPORTANCE: f32 = 10.0;

/// How many points from each stroke end receive the endpoint weighting.
const DIST_END_FIX: usize = 10;

/// Exponent controlling how quickly the endpoint weights converge to a plain
/// uniform average as a point gets farther from the end.
const UNIFORMITY_EXP: i32 = 4;

/// Margin applied to the raw path length when predicting interpolated output
/// size. The spline's arc length exceeds the straight-line length, so the
/// plain `length / spacing` estimate is not an upper bound on its own.
const SAFETY_FACTOR: f32 = 2.0;

/// Batched box-filter stabilizer.
///
/// Averaging a curve shrinks it toward its interior, which visibly pulls the
/// drawn line away from the pointer at both ends. The filter counters this
/// with a softmax-style weight near the endpoints: a point close to a stroke
/// end keeps most of its own weight, and the weighting decays to uniform over
/// the first [`DIST_END_FIX`] points.
///
/// Each pass holds back the newest point as unconfirmed (output length is one
/// less than input length), so the freshest sample never jitters the curve
/// until a successor arrives.
///
/// This type also owns the stroke partitioner: it tracks the raw path length
/// incrementally and can split off a processed prefix guaranteed to stay under
/// a caller-supplied output cap, carrying the retained raw tail as context so
/// the next batch continues seamlessly.
#[derive(Debug, Clone)]
pub struct BoxFilterStabilizer {
    radius: f32,
    points: Vec<BrushPoint>,
    /// Raw tail of the previously partitioned batch. Window samples reaching
    /// before index 0 pull from here; its last point doubles as interpolation
    /// context.
    context: Vec<BrushPoint>,
    path_length: f32,
    interpolator: Interpolator,
}

impl BoxFilterStabilizer {
    pub fn new(stabilization: f32, interpolator: &InterpolatorSettings) -> Self {
        debug_assert!((0.0..=1.0).contains(&stabilization));
        Self {
            radius: stabilization * MAX_RADIUS,
            points: Vec::new(),
            context: Vec::new(),
            path_length: 0.0,
            interpolator: Interpolator::new(interpolator),
        }
    }

    pub fn add_point(&mut self, point: BrushPoint) {
        if let Some(last) = self.points.last() {
            self.path_length += last.position.distance(point.position);
        }
        self.points.push(point);
    }

    /// Smooths and resamples the entire current raw buffer.
    ///
    /// Batched semantics: nothing is drained; the same stroke is restated on
    /// every call, growing as points arrive.
    pub fn processed_curve(&mut self) -> Vec<BrushPoint> {
        process_with(
            &self.points,
            &self.context,
            self.radius,
            &self.interpolator,
        )
    }

    /// Predicted interpolated output count for the current raw buffer.
    ///
    /// Upper-bound heuristic: raw path length times [`SAFETY_FACTOR`], divided
    /// by the interpolator spacing.
    pub fn predict_output_size(&self) -> f32 {
        self.interpolator
            .estimate_output_size(self.path_length * SAFETY_FACTOR)
    }

    /// Splits the stroke so the processed result stays under `max_points`.
    ///
    /// Raw points are popped off the end (cheapest removal; the retained
    /// prefix is the oldest part of the stroke) until the prediction fits,
    /// then the prefix is processed and returned. The prefix becomes the next
    /// batch's context and the popped overflow, restored to forward order,
    /// becomes the new active buffer.
    ///
    /// Panics if even a single remaining point predicts above the cap; that is
    /// a static misconfiguration (the cap is smaller than one point's rendered
    /// footprint), not a runtime condition.
    pub fn partition(&mut self, max_points: usize) -> Vec<BrushPoint> {
        let cap = max_points as f32;
        let mut predicted = self.predict_output_size();
        let mut overflow: Vec<BrushPoint> = Vec::new();

        while predicted > cap && self.points.len() > 1 {
            let Some(popped) = self.points.pop() else { break };
            if let Some(last) = self.points.last() {
                self.path_length -= last.position.distance(popped.position);
            }
            overflow.push(popped);
            predicted = self.predict_output_size();
        }

        assert!(
            predicted <= cap,
            "batch cap {max_points} is too small for a single stroke point"
        );

        log::debug!(
            "partitioning stroke: keeping {} raw points, deferring {}",
            self.points.len(),
            overflow.len()
        );

        let processed = process_with(
            &self.points,
            &self.context,
            self.radius,
            &self.interpolator,
        );

        self.context = std::mem::take(&mut self.points);
        overflow.reverse();
        self.path_length = path_length(&overflow);
        self.points = overflow;

        processed
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.context.clear();
        self.path_length = 0.0;
    }
}

fn process_with(
    points: &[BrushPoint],
    context: &[BrushPoint],
    radius: f32,
    interpolator: &Interpolator,
) -> Vec<BrushPoint> {
    let smoothed = smooth(points, context, radius);
    interpolator.process_with_context(&smoothed, context.last().copied())
}

/// Runs all smoothing passes over `points`.
fn smooth(points: &[BrushPoint], context: &[BrushPoint], radius: f32) -> Vec<BrushPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut curve = points.to_vec();
    for _ in 0..NUM_PASSES {
        curve = box_filter_pass(&curve, context, radius);
    }
    curve
}

/// One exponentially-weighted box-filter pass.
///
/// Interior points use a plain `1 / (2r + 1)` average over the window. Points
/// within [`DIST_END_FIX`] of either end use normalized exponential weights
/// whose falloff decays to uniform with distance from the end. Window samples
/// before index 0 pull from the previous batch's raw tail when available and
/// clamp otherwise; samples past the end clamp.
fn box_filter_pass(curve: &[BrushPoint], context: &[BrushPoint], radius: f32) -> Vec<BrushPoint> {
    if curve.len() <= 1 {
        return curve.to_vec();
    }

    let window = radius as usize;
    let last = curve.len() - 1;

    // The newest point is withheld until the next sample confirms it.
    let mut out = Vec::with_capacity(last);
    for i in 0..last {
        let mut avg = curve[i].position * weight(curve.len(), i, 0, radius);

        for d in 1..=window {
            let w = weight(curve.len(), i, d, radius);
            let left = sample(curve, context, i as isize - d as isize);
            let right = curve[(i + d).min(last)];
            avg += left.position * w;
            avg += right.position * w;
        }

        out.push(BrushPoint::new(avg, curve[i].pressure));
    }

    out
}

/// Weight of the sample at window offset `d` from point `i`.
fn weight(len: usize, i: usize, d: usize, radius: f32) -> f32 {
    let dist_from_end = i.min(len - 1 - i);
    if dist_from_end <= DIST_END_FIX {
        endpoint_weight(dist_from_end, d, radius)
    } else {
        1.0 / (2.0 * radius + 1.0)
    }
}

/// Softmax-style endpoint weight.
///
/// `decay` runs from 1 at the exact endpoint to 0 at [`DIST_END_FIX`] points
/// in; at 0 the exponential collapses to the uniform average.
fn endpoint_weight(dist_from_end: usize, d: usize, radius: f32) -> f32 {
    let decay = ((DIST_END_FIX - dist_from_end) as f32 / DIST_END_FIX as f32).powi(UNIFORMITY_EXP);

    let mut denom = 1.0;
    let window = radius as usize;
    for k in 1..=window {
        denom += 2.0 * (-(k as f32) * POINT_IMPORTANCE * decay).exp();
    }

    (-(d as f32) * POINT_IMPORTANCE * decay).exp() / denom
}

/// Window sample at (possibly negative) index, pulling from the previous
/// batch's tail when the index reaches before the current curve.
fn sample(curve: &[BrushPoint], context: &[BrushPoint], index: isize) -> BrushPoint {
    if index < 0 {
        let ctx_index = context.len() as isize + index;
        if (0..context.len() as isize).contains(&ctx_index) {
            return context[ctx_index as usize];
        }
    }
    curve[index.clamp(0, curve.len() as isize - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vec2;

    fn pt(x: f32, y: f32) -> BrushPoint {
        BrushPoint::new(Vec2::new(x, y), 1.0)
    }

    fn linear(spacing: f32) -> InterpolatorSettings {
        InterpolatorSettings::Linear { spacing }
    }

    fn feed(stab: &mut BoxFilterStabilizer, points: &[BrushPoint]) {
        for &p in points {
            stab.add_point(p);
        }
    }

    // ── smoothing passes ──────────────────────────────────────────────────

    #[test]
    fn collinear_input_stays_collinear() {
        // Curvature must only emerge from directional variation in the input.
        let pts: Vec<BrushPoint> = (0..60).map(|i| pt(i as f32, 0.0)).collect();
        let context: Vec<BrushPoint> = Vec::new();

        let mut curve = pts;
        for _ in 0..NUM_PASSES {
            curve = box_filter_pass(&curve, &context, 10.0);
            for p in &curve {
                assert!(p.position.y.abs() < 1e-4, "left the line: {:?}", p.position);
            }
        }
    }

    #[test]
    fn collinear_interior_keeps_even_spacing() {
        let pts: Vec<BrushPoint> = (0..80).map(|i| pt(i as f32 * 2.0, 0.0)).collect();
        let out = box_filter_pass(&pts, &[], 10.0);

        // Interior points (full symmetric window, uniform weights) must not
        // move; spacing there stays exactly 2.
        let margin = DIST_END_FIX + 10 + 1;
        for pair in out[margin..out.len() - margin].windows(2) {
            let d = pair[0].position.distance(pair[1].position);
            assert!((d - 2.0).abs() < 1e-3, "spacing drifted to {d}");
        }
    }

    #[test]
    fn each_pass_withholds_newest_point() {
        let pts: Vec<BrushPoint> = (0..10).map(|i| pt(i as f32, 0.0)).collect();
        let out = box_filter_pass(&pts, &[], 5.0);
        assert_eq!(out.len(), pts.len() - 1);
    }

    #[test]
    fn short_input_is_untouched() {
        let pts = [pt(0.0, 0.0), pt(5.0, 5.0)];
        assert_eq!(smooth(&pts, &[], 10.0), pts.to_vec());
    }

    #[test]
    fn zero_radius_only_drops_tail_points() {
        // radius 0 makes every weight collapse to the point's own weight of 1.
        let pts: Vec<BrushPoint> = (0..8).map(|i| pt(i as f32, i as f32 * 0.5)).collect();
        let out = smooth(&pts, &[], 0.0);
        assert_eq!(out.len(), pts.len() - NUM_PASSES);
        for (a, b) in out.iter().zip(&pts) {
            assert!(a.position.distance(b.position) < 1e-6);
        }
    }

    #[test]
    fn endpoint_resists_shrinkage() {
        // A stroke along x with heavy smoothing: the first output point must
        // stay close to the raw start, not get pulled toward the interior mean.
        let pts: Vec<BrushPoint> = (0..40).map(|i| pt(i as f32, 0.0)).collect();
        let out = smooth(&pts, &[], MAX_RADIUS);
        let drift = out[0].position.distance(pts[0].position);
        assert!(drift < 1.0, "start drifted {drift} from its raw position");
    }

    #[test]
    fn endpoint_weights_sum_to_one_over_full_window() {
        for e in 0..=DIST_END_FIX {
            let radius = 8.0;
            let mut sum = endpoint_weight(e, 0, radius);
            for d in 1..=8 {
                sum += 2.0 * endpoint_weight(e, d, radius);
            }
            assert!((sum - 1.0).abs() < 1e-4, "weights at e={e} sum to {sum}");
        }
    }

    #[test]
    fn out_of_range_window_samples_use_context() {
        let context = vec![pt(-2.0, 7.0), pt(-1.0, 7.0)];
        let curve = vec![pt(0.0, 0.0), pt(1.0, 0.0)];
        assert_eq!(sample(&curve, &context, -1), context[1]);
        assert_eq!(sample(&curve, &context, -2), context[0]);
        // Deeper than the context: clamp to the curve start.
        assert_eq!(sample(&curve, &context, -3), curve[0]);
        assert_eq!(sample(&curve, &[], -1), curve[0]);
        assert_eq!(sample(&curve, &[], 5), curve[1]);
    }

    // ── prediction and partitioning ───────────────────────────────────────

    #[test]
    fn prediction_tracks_path_length_incrementally() {
        let mut stab = BoxFilterStabilizer::new(0.0, &linear(0.5));
        feed(&mut stab, &[pt(0.0, 0.0), pt(3.0, 4.0), pt(3.0, 10.0)]);
        // Path length 11, safety factor 2, spacing 0.5 → 44.
        assert!((stab.predict_output_size() - 44.0).abs() < 1e-3);
    }

    #[test]
    fn partition_never_exceeds_cap() {
        let mut stab = BoxFilterStabilizer::new(0.0, &linear(0.5));
        let pts: Vec<BrushPoint> = (0..64).map(|i| pt(i as f32, 0.0)).collect();
        feed(&mut stab, &pts);

        let cap = 16;
        while stab.predict_output_size() > cap as f32 {
            let batch = stab.partition(cap);
            assert!(batch.len() <= cap, "batch of {} exceeds cap {cap}", batch.len());
            assert!(!batch.is_empty());
        }
    }

    #[test]
    fn partitioned_batches_concatenate_seamlessly() {
        // Tiny cap forces every batch down to its 2-point prefix, which the
        // smoothing passes leave untouched; concatenating the batch outputs
        // must then reproduce one unpartitioned resampling of the whole
        // stroke, with no seam and no duplicated geometry.
        let spacing = 0.5;
        let pts: Vec<BrushPoint> = (0..7).map(|i| pt(i as f32, 0.0)).collect();

        let mut stab = BoxFilterStabilizer::new(0.0, &linear(spacing));
        feed(&mut stab, &pts);

        let cap = 4;
        let mut collected = Vec::new();
        while stab.predict_output_size() > cap as f32 {
            collected.extend(stab.partition(cap));
        }
        collected.extend(stab.processed_curve());

        let reference =
            Interpolator::new(&linear(spacing)).process(&pts);

        assert_eq!(collected.len(), reference.len());
        for (a, b) in collected.iter().zip(&reference) {
            assert!(
                a.position.distance(b.position) < 1e-4,
                "{:?} != {:?}",
                a.position,
                b.position
            );
        }
    }

    #[test]
    fn roomy_cap_partitions_whole_stroke_at_once() {
        let mut stab = BoxFilterStabilizer::new(0.0, &linear(0.5));
        let pts: Vec<BrushPoint> = (0..10).map(|i| pt(i as f32, 0.0)).collect();
        feed(&mut stab, &pts);

        let batch = stab.partition(10_000);
        assert!(!batch.is_empty());
        // Everything was retained; nothing is pending for a next batch.
        assert!((stab.predict_output_size() - 0.0).abs() < 1e-6);
        assert!(stab.processed_curve().is_empty());
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_behaves_like_fresh_stabilizer() {
        let mut used = BoxFilterStabilizer::new(0.5, &linear(1.0));
        feed(&mut used, &[pt(0.0, 0.0), pt(5.0, 0.0), pt(9.0, 2.0)]);
        let _ = used.partition(1000);
        used.reset();

        let mut fresh = BoxFilterStabilizer::new(0.5, &linear(1.0));

        used.add_point(pt(1.0, 1.0));
        fresh.add_point(pt(1.0, 1.0));
        assert_eq!(used.processed_curve(), fresh.processed_curve());
        assert_eq!(used.predict_output_size(), fresh.predict_output_size());
    }
}

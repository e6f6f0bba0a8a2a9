//! Feeds a synthetic gesture through the full stroke pipeline and reports
//! what each stage produced. Useful for eyeballing batch sizes and buffer
//! footprints without a GPU attached.

use anyhow::ensure;

use sumi_stroke::brush::BrushAttributes;
use sumi_stroke::geom::{BrushPoint, Vec2};
use sumi_stroke::interpolate::InterpolatorSettings;
use sumi_stroke::logging::{LoggingConfig, init_logging};
use sumi_stroke::stabilize::StabilizerSettings;
use sumi_stroke::stroke::{BatchPhase, StrokeEngine};
use sumi_stroke::vertex::{FLOATS_PER_QUAD, QuadEmplacer, floats_for_quads};

/// Cap chosen low enough that the synthetic stroke must be partitioned.
const MAX_POINTS_PER_BATCH: usize = 64;

const SAMPLES: usize = 400;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig {
        env_filter: Some("info".into()),
        ..Default::default()
    });

    let settings = StabilizerSettings::Box {
        stabilization: 0.35,
        interpolator: InterpolatorSettings::Smoothed {
            tension: 0.0,
            alpha: 0.5,
            spacing: 1.5,
        },
    };
    let mut engine = StrokeEngine::new(&settings)?;
    let brush = BrushAttributes {
        size: 6.0,
        ..Default::default()
    };
    let emplacer = QuadEmplacer::new(&brush);

    // ── gesture ───────────────────────────────────────────────────────────

    let samples = jittered_sine(SAMPLES);
    log::info!(
        "synthesized {} samples over {:.1} units of travel",
        samples.len(),
        sumi_stroke::geom::path_length(&samples)
    );

    engine.pointer_down(samples[0]);
    for &p in &samples[1..] {
        engine.pointer_move(p);
    }
    engine.pointer_up();

    // ── drain + emplace ───────────────────────────────────────────────────

    let mut total_points = 0usize;
    let mut total_floats = 0usize;
    let batches = engine.drain(MAX_POINTS_PER_BATCH);
    ensure!(!batches.is_empty(), "a finished gesture must emit geometry");

    for (i, batch) in batches.iter().enumerate() {
        ensure!(
            batch.points.len() <= MAX_POINTS_PER_BATCH,
            "batch {i} exceeds the configured cap: {} > {MAX_POINTS_PER_BATCH}",
            batch.points.len()
        );

        let mut buf = vec![0.0f32; floats_for_quads(batch.points.len())];
        let written = emplacer.emplace_stamped_stroke(&mut buf, 0, &batch.points);
        ensure!(
            written == batch.points.len() * FLOATS_PER_QUAD,
            "emplacement wrote {written} floats for {} points",
            batch.points.len()
        );

        log::info!(
            "batch {i}: {:?}, {} points, {} floats ({} KiB)",
            batch.phase,
            batch.points.len(),
            written,
            written * 4 / 1024,
        );
        total_points += batch.points.len();
        total_floats += written;
    }

    let last = batches.last().map(|b| b.phase);
    ensure!(
        last == Some(BatchPhase::Finished),
        "drain after pointer-up must close with a finished batch, got {last:?}"
    );

    println!(
        "{} batches, {total_points} processed points, {total_floats} vertex floats",
        batches.len()
    );
    Ok(())
}

/// A sine sweep with deterministic pseudo-random jitter, roughly what a
/// shaky hand produces on a tablet.
fn jittered_sine(n: usize) -> Vec<BrushPoint> {
    let mut rng = 0x2545f491u32;
    let mut noise = move || {
        // xorshift32; amplitude well under the stabilizer's smoothing reach.
        rng ^= rng << 13;
        rng ^= rng >> 17;
        rng ^= rng << 5;
        (rng as f32 / u32::MAX as f32 - 0.5) * 1.2
    };

    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let x = t * 600.0 + noise();
            let y = 120.0 * (t * std::f32::consts::TAU).sin() + noise();
            let pressure = (t * std::f32::consts::PI).sin().clamp(0.05, 1.0);
            BrushPoint::new(Vec2::new(x, y), pressure)
        })
        .collect()
}

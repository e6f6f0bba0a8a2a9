//! Gesture-level driver tying the pipeline together.
//!
//! A [`StrokeEngine`] owns one [`Stabilizer`] for the lifetime of a gesture
//! (pointer-down through pointer-up or cancel) and turns pointer events into
//! capped batches of processed points, ready for quad emplacement.

use crate::error::SettingsError;
use crate::geom::BrushPoint;
use crate::stabilize::{Stabilizer, StabilizerSettings};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StrokeState {
    Idle,
    Drawing,
    /// Pointer released; final geometry not yet drained.
    Finished,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchPhase {
    /// Preview of the in-progress stroke. Batched stabilizers restate the
    /// whole retained stroke each drain, so consumers should redraw rather
    /// than append; incremental stabilizers emit only new points.
    Continued,
    /// A committed prefix split off because the stroke outgrew the cap.
    /// Append-once; it will not be restated.
    Partitioned,
    /// The final geometry of a completed gesture.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBatch {
    pub points: Vec<BrushPoint>,
    pub phase: BatchPhase,
}

/// One pointer gesture's stabilization, resampling, and partitioning state.
///
/// Single-threaded by construction: the engine is exclusively owned by the
/// active tool instance and every method runs synchronously on the event
/// thread.
#[derive(Debug, Clone)]
pub struct StrokeEngine {
    stabilizer: Stabilizer,
    state: StrokeState,
}

impl StrokeEngine {
    pub fn new(settings: &StabilizerSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            stabilizer: Stabilizer::new(settings),
            state: StrokeState::Idle,
        })
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    // ── pointer events ────────────────────────────────────────────────────

    /// Starts a new gesture. Any undrained state from a previous gesture is
    /// discarded.
    pub fn pointer_down(&mut self, point: BrushPoint) {
        self.stabilizer.reset();
        self.stabilizer.add_point(point);
        self.state = StrokeState::Drawing;
    }

    /// Appends one sample to the active gesture. Ignored while idle.
    pub fn pointer_move(&mut self, point: BrushPoint) {
        if self.state == StrokeState::Drawing {
            self.stabilizer.add_point(point);
        }
    }

    /// Ends the active gesture; the final batch is produced by the next
    /// [`drain`](Self::drain).
    pub fn pointer_up(&mut self) {
        if self.state == StrokeState::Drawing {
            self.state = StrokeState::Finished;
        }
    }

    /// Aborts the gesture, discarding all buffered points without emitting
    /// geometry.
    pub fn cancel(&mut self) {
        self.stabilizer.reset();
        self.state = StrokeState::Idle;
    }

    // ── output ────────────────────────────────────────────────────────────

    /// Produces the batches currently owed to the renderer, none longer than
    /// `max_points`.
    ///
    /// While drawing, a batched stabilizer is partitioned proactively
    /// whenever its predicted output exceeds the cap, then the retained
    /// remainder is emitted as a `Continued` preview. After pointer-up the
    /// same partitioning runs one last time, the `Finished` batch closes the
    /// gesture, and the engine returns to idle.
    pub fn drain(&mut self, max_points: usize) -> Vec<StrokeBatch> {
        match self.state {
            StrokeState::Idle => Vec::new(),
            StrokeState::Drawing => {
                let mut batches = self.partition_overflow(max_points);
                let points = self.stabilizer.processed_curve();
                if !points.is_empty() {
                    batches.push(StrokeBatch {
                        points,
                        phase: BatchPhase::Continued,
                    });
                }
                batches
            }
            StrokeState::Finished => {
                let mut batches = self.partition_overflow(max_points);
                batches.push(StrokeBatch {
                    points: self.stabilizer.processed_curve(),
                    phase: BatchPhase::Finished,
                });
                self.stabilizer.reset();
                self.state = StrokeState::Idle;
                batches
            }
        }
    }

    fn partition_overflow(&mut self, max_points: usize) -> Vec<StrokeBatch> {
        let mut batches = Vec::new();
        while let Some(predicted) = self.stabilizer.predict_output_size() {
            if predicted <= max_points as f32 {
                break;
            }
            let Some(points) = self.stabilizer.partition(max_points) else {
                break;
            };
            log::debug!(
                "stroke exceeded cap {max_points}: committed a {}-point partition",
                points.len()
            );
            batches.push(StrokeBatch {
                points,
                phase: BatchPhase::Partitioned,
            });
        }
        batches
    }
}

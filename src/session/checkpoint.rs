//! Checkpoint events and the emission policy.
//!
//! A checkpoint is emitted each time reps reach a multiple of the rep
//! interval, or whole plank seconds reach a multiple of the hold interval.
//! Each crossing is emitted once, however many frames report it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exercises::types::{ExerciseState, ExerciseType};
use crate::storage::config::CheckpointSettings;

/// Batched progress notification for the persistence layer.
///
/// Exactly one of `reps_delta` and `duration_seconds_delta` is non-zero.
/// Consumers should add deltas rather than overwrite totals, since delivery
/// may be reordered or arrive after the session was reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub session_id: Uuid,
    pub exercise_type: ExerciseType,
    pub reps_delta: u32,
    pub duration_seconds_delta: u32,
    pub emitted_at: DateTime<Utc>,
}

impl Checkpoint {
    /// A rep-batch checkpoint.
    pub fn reps(session_id: Uuid, exercise_type: ExerciseType, reps: u32) -> Self {
        Self {
            session_id,
            exercise_type,
            reps_delta: reps,
            duration_seconds_delta: 0,
            emitted_at: Utc::now(),
        }
    }

    /// A hold-time checkpoint.
    pub fn duration(session_id: Uuid, exercise_type: ExerciseType, seconds: u32) -> Self {
        Self {
            session_id,
            exercise_type,
            reps_delta: 0,
            duration_seconds_delta: seconds,
            emitted_at: Utc::now(),
        }
    }
}

/// Remembers which thresholds have already been checkpointed.
#[derive(Debug, Clone, Default)]
pub struct CheckpointTracker {
    settings: CheckpointSettings,
    last_reps: u32,
    last_hold_secs: u32,
}

impl CheckpointTracker {
    pub fn new(settings: CheckpointSettings) -> Self {
        Self {
            settings,
            last_reps: 0,
            last_hold_secs: 0,
        }
    }

    /// Decide whether `state` crosses a new threshold, recording it if so.
    pub fn evaluate(
        &mut self,
        session_id: Uuid,
        exercise: ExerciseType,
        state: &ExerciseState,
    ) -> Option<Checkpoint> {
        if exercise.is_timed() {
            let held = state.whole_hold_secs();
            if crosses(held, self.last_hold_secs, self.settings.hold_interval_secs) {
                self.last_hold_secs = held;
                return Some(Checkpoint::duration(
                    session_id,
                    exercise,
                    self.settings.hold_interval_secs,
                ));
            }
        } else if crosses(state.reps, self.last_reps, self.settings.rep_interval) {
            self.last_reps = state.reps;
            return Some(Checkpoint::reps(
                session_id,
                exercise,
                self.settings.rep_interval,
            ));
        }
        None
    }

    /// Forget all recorded thresholds.
    pub fn reset(&mut self) {
        self.last_reps = 0;
        self.last_hold_secs = 0;
    }

    pub fn settings(&self) -> &CheckpointSettings {
        &self.settings
    }
}

fn crosses(value: u32, last: u32, interval: u32) -> bool {
    interval > 0 && value > 0 && value % interval == 0 && value != last
}

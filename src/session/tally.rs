//! Additive workout totals.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use crate::exercises::types::ExerciseType;
use crate::session::checkpoint::Checkpoint;
use crate::session::dispatch::{CheckpointRecorder, RecordError};

/// Accumulated totals for one exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseTotals {
    pub reps: u64,
    pub duration_seconds: u64,
    pub checkpoints: u64,
}

/// In-memory recorder summing checkpoint deltas per exercise.
///
/// Totals depend only on the set of checkpoints applied, not their order.
#[derive(Debug, Default)]
pub struct WorkoutTally {
    totals: Mutex<HashMap<ExerciseType, ExerciseTotals>>,
}

impl WorkoutTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a checkpoint's deltas.
    pub fn apply(&self, checkpoint: &Checkpoint) {
        let mut totals = self.totals.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = totals.entry(checkpoint.exercise_type).or_default();
        entry.reps += u64::from(checkpoint.reps_delta);
        entry.duration_seconds += u64::from(checkpoint.duration_seconds_delta);
        entry.checkpoints += 1;
    }

    /// Totals for one exercise.
    pub fn totals(&self, exercise: ExerciseType) -> ExerciseTotals {
        self.totals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&exercise)
            .copied()
            .unwrap_or_default()
    }

    /// Totals for every exercise seen so far.
    pub fn snapshot(&self) -> HashMap<ExerciseType, ExerciseTotals> {
        self.totals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CheckpointRecorder for WorkoutTally {
    fn record(&self, checkpoint: Checkpoint) -> BoxFuture<'static, Result<(), RecordError>> {
        self.apply(&checkpoint);
        future::ready(Ok(())).boxed()
    }
}

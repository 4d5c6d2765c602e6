//! Session state manager.
//!
//! Owns the authoritative [`ExerciseState`] for the active exercise, feeds
//! each frame through the matching analyzer and applies checkpoint policy.
//! Called synchronously once per video frame; never blocks.

use crossbeam::channel::{Receiver, Sender};
use thiserror::Error;
use uuid::Uuid;

use crate::exercises::analyzer::analyze;
use crate::exercises::types::{ExerciseState, ExerciseType};
use crate::pose::types::{LandmarkFrame, Point, PoseError};
use crate::session::checkpoint::{Checkpoint, CheckpointTracker};
use crate::session::dispatch::CheckpointSink;
use crate::storage::config::{AppConfig, CheckpointSettings, CoachSettings};

/// Opening feedback before any frame has been analyzed.
pub const AWAITING_POSE_FEEDBACK: &str = "Show your whole body to the camera";

/// Result of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub state: ExerciseState,
    pub checkpoint: Option<Checkpoint>,
}

/// Session-level errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Detector output was malformed
    #[error("Invalid input: {0}")]
    InputError(#[from] PoseError),
}

/// Drives classification for one user's workout.
pub struct SessionManager {
    session_id: Uuid,
    exercise: ExerciseType,
    state: ExerciseState,
    settings: CoachSettings,
    tracker: CheckpointTracker,
    sink: Option<Box<dyn CheckpointSink>>,
    subscribers: Vec<Sender<ExerciseState>>,
}

impl SessionManager {
    /// Create a manager with default settings.
    pub fn new(exercise: ExerciseType) -> Self {
        Self::with_settings(
            exercise,
            CoachSettings::default(),
            CheckpointSettings::default(),
        )
    }

    /// Create a manager from application config.
    pub fn from_config(exercise: ExerciseType, config: &AppConfig) -> Self {
        Self::with_settings(exercise, config.coach, config.checkpoints)
    }

    /// Create a manager with explicit settings.
    pub fn with_settings(
        exercise: ExerciseType,
        settings: CoachSettings,
        checkpoints: CheckpointSettings,
    ) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, %exercise, "Session created");

        Self {
            session_id,
            exercise,
            state: ExerciseState::with_feedback(AWAITING_POSE_FEEDBACK, 0.0),
            settings,
            tracker: CheckpointTracker::new(checkpoints),
            sink: None,
            subscribers: Vec::new(),
        }
    }

    /// Forward emitted checkpoints to `sink`.
    pub fn set_sink(&mut self, sink: Box<dyn CheckpointSink>) {
        self.sink = Some(sink);
    }

    /// Builder-style [`Self::set_sink`].
    pub fn with_sink(mut self, sink: Box<dyn CheckpointSink>) -> Self {
        self.set_sink(sink);
        self
    }

    /// Receive a state snapshot after every update.
    pub fn subscribe(&mut self) -> Receiver<ExerciseState> {
        let (tx, rx) = crossbeam::channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Switch exercise.
    ///
    /// A different exercise starts from a fresh state anchored at
    /// `timestamp_ms` and clears checkpoint bookkeeping. Re-selecting the
    /// active exercise is a no-op. Returns whether anything changed.
    pub fn select_exercise(&mut self, exercise: ExerciseType, timestamp_ms: f64) -> bool {
        if exercise == self.exercise {
            return false;
        }

        tracing::info!(from = %self.exercise, to = %exercise, "Exercise changed");
        self.exercise = exercise;
        self.state = ExerciseState::new(timestamp_ms);
        self.tracker.reset();
        self.notify();
        true
    }

    /// Classify one frame.
    pub fn process_frame(&mut self, frame: &LandmarkFrame, timestamp_ms: f64) -> FrameOutcome {
        self.state = analyze(
            self.exercise,
            frame,
            &self.state,
            timestamp_ms,
            &self.settings,
        );
        self.notify();

        let checkpoint = self
            .tracker
            .evaluate(self.session_id, self.exercise, &self.state);
        if let Some(checkpoint) = &checkpoint {
            tracing::info!(
                exercise = %self.exercise,
                reps = checkpoint.reps_delta,
                seconds = checkpoint.duration_seconds_delta,
                "Checkpoint reached"
            );
            if let Some(sink) = &self.sink {
                sink.submit(checkpoint.clone());
            }
        }

        FrameOutcome {
            state: self.state.clone(),
            checkpoint,
        }
    }

    /// Validate raw detector output, then classify it.
    pub fn process_points(
        &mut self,
        points: &[Point],
        timestamp_ms: f64,
    ) -> Result<FrameOutcome, SessionError> {
        let frame = LandmarkFrame::from_points(points)?;
        Ok(self.process_frame(&frame, timestamp_ms))
    }

    fn notify(&mut self) {
        let state = &self.state;
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }

    /// Current state.
    pub fn state(&self) -> &ExerciseState {
        &self.state
    }

    /// Active exercise.
    pub fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Identifier stamped on every checkpoint from this manager.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Classification settings in use.
    pub fn settings(&self) -> &CoachSettings {
        &self.settings
    }
}

//! Session state, checkpoint policy and checkpoint delivery.

pub mod checkpoint;
pub mod dispatch;
pub mod manager;
pub mod tally;

pub use checkpoint::{Checkpoint, CheckpointTracker};
pub use dispatch::{
    CheckpointDispatcher, CheckpointRecorder, CheckpointSink, DispatchSink, DispatchStats,
    RecordError,
};
pub use manager::{FrameOutcome, SessionError, SessionManager, AWAITING_POSE_FEEDBACK};
pub use tally::{ExerciseTotals, WorkoutTally};

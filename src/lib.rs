//! RepCoach - Pose-based exercise coaching core
//!
//! Turns a per-frame stream of 33 body landmarks into repetition counts,
//! plank hold time and live coaching feedback for squats, push-ups,
//! sit-ups and planks, and emits batched checkpoints for persistence.

pub mod exercises;
pub mod pose;
pub mod replay;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use exercises::{ExerciseState, ExerciseType, Stage};
pub use pose::{LandmarkFrame, Point};
pub use session::{Checkpoint, SessionManager};
pub use storage::config::AppConfig;

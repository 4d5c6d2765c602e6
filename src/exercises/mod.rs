//! Exercise classification: profiles and the per-frame state machine.

pub mod analyzer;
pub mod profiles;
pub mod types;

pub use analyzer::{analyze, analyze_plank, analyze_pushup, analyze_situp, analyze_squat};
pub use profiles::{ExerciseProfile, Motion};
pub use types::{
    ExerciseState, ExerciseType, ParseExerciseError, Stage, READY_FEEDBACK, REP_COMPLETE_FEEDBACK,
};

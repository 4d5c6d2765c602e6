//! Exercise types, stages and per-frame state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Squat,
    Pushup,
    Situp,
    Plank,
}

impl ExerciseType {
    /// All exercises, in profile-table order.
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Squat,
        ExerciseType::Pushup,
        ExerciseType::Situp,
        ExerciseType::Plank,
    ];

    /// Stable identifier used in checkpoints and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::Pushup => "pushup",
            ExerciseType::Situp => "situp",
            ExerciseType::Plank => "plank",
        }
    }

    /// Whether progress is measured as hold time rather than reps.
    pub fn is_timed(&self) -> bool {
        matches!(self, ExerciseType::Plank)
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseType::Squat => write!(f, "Squat"),
            ExerciseType::Pushup => write!(f, "Push-up"),
            ExerciseType::Situp => write!(f, "Sit-up"),
            ExerciseType::Plank => write!(f, "Plank"),
        }
    }
}

impl std::str::FromStr for ExerciseType {
    type Err = ParseExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "squat" => Ok(ExerciseType::Squat),
            "pushup" => Ok(ExerciseType::Pushup),
            "situp" => Ok(ExerciseType::Situp),
            "plank" => Ok(ExerciseType::Plank),
            _ => Err(ParseExerciseError(s.to_string())),
        }
    }
}

/// Unknown exercise name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown exercise type: {0}")]
pub struct ParseExerciseError(pub String);

/// Phase within an exercise's motion cycle.
///
/// Squat and push-up use `Up`/`Down` literally. Sit-up reuses them with
/// `Down` meaning lying back and `Up` meaning sat up. Plank only uses
/// `Hold` and `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Up,
    Down,
    Hold,
    /// Nothing detected yet, or plank form broken.
    #[default]
    Unknown,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Up => write!(f, "up"),
            Stage::Down => write!(f, "down"),
            Stage::Hold => write!(f, "hold"),
            Stage::Unknown => write!(f, "unknown"),
        }
    }
}

/// Feedback shown on the frame a rep is completed.
pub const REP_COMPLETE_FEEDBACK: &str = "Good!";

/// Feedback for a freshly selected exercise.
pub const READY_FEEDBACK: &str = "All set. Ready when you are!";

/// Classification state carried from frame to frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseState {
    /// Completed repetitions, never decreasing within a session
    pub reps: u32,
    /// Current motion phase
    pub stage: Stage,
    /// Advisory coaching text, never empty
    pub feedback: String,
    /// Accumulated plank hold time in seconds
    pub hold_time_secs: f64,
    /// Timestamp of the previous frame in milliseconds
    pub last_frame_time_ms: f64,
    /// Extended-zone frames seen since the rep-complete feedback was set
    #[serde(default)]
    pub celebration_frames: u32,
}

impl ExerciseState {
    /// Fresh state anchored at `timestamp_ms`.
    pub fn new(timestamp_ms: f64) -> Self {
        Self::with_feedback(READY_FEEDBACK, timestamp_ms)
    }

    /// Fresh state with a custom opening message.
    pub fn with_feedback(feedback: impl Into<String>, timestamp_ms: f64) -> Self {
        Self {
            reps: 0,
            stage: Stage::Unknown,
            feedback: feedback.into(),
            hold_time_secs: 0.0,
            last_frame_time_ms: timestamp_ms,
            celebration_frames: 0,
        }
    }

    /// Whether the current feedback marks a just-completed rep.
    pub fn is_celebrating(&self) -> bool {
        self.feedback == REP_COMPLETE_FEEDBACK
    }

    /// Whole seconds held, as displayed and checkpointed.
    pub fn whole_hold_secs(&self) -> u32 {
        self.hold_time_secs.floor() as u32
    }
}

impl Default for ExerciseState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

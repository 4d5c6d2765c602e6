//! Recorded landmark streams.
//!
//! One JSON object per line:
//! `{"timestamp_ms": 33.4, "landmarks": [{"x":..,"y":..,"visibility":..}, ...]}`.
//! A line may also carry `"exercise": "plank"` to switch exercise before
//! that frame is classified. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exercises::types::ExerciseType;
use crate::pose::types::Point;
use crate::session::checkpoint::Checkpoint;
use crate::session::manager::{SessionError, SessionManager};

/// One recorded detector frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: f64,
    pub landmarks: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseType>,
}

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to open {path}: {message}")]
    Open { path: String, message: String },

    #[error("Read error on line {line}: {message}")]
    Io { line: usize, message: String },

    #[error("Invalid frame on line {line}: {message}")]
    Decode { line: usize, message: String },
}

/// Iterate frames from a JSON-lines reader.
pub fn read_frames<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<RecordedFrame, ReplayError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line_no = i + 1;
            match line {
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(serde_json::from_str::<RecordedFrame>(&text).map_err(|e| {
                    ReplayError::Decode {
                        line: line_no,
                        message: e.to_string(),
                    }
                })),
                Err(e) => Some(Err(ReplayError::Io {
                    line: line_no,
                    message: e.to_string(),
                })),
            }
        })
}

/// Open a JSON-lines recording.
pub fn open_recording(
    path: &Path,
) -> Result<impl Iterator<Item = Result<RecordedFrame, ReplayError>>, ReplayError> {
    let file = File::open(path).map_err(|e| ReplayError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(read_frames(BufReader::new(file)))
}

/// Outcome of a replay run.
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    /// Frames classified
    pub frames: usize,
    /// Frames rejected as malformed
    pub rejected: usize,
    /// Checkpoints emitted, in order
    pub checkpoints: Vec<Checkpoint>,
}

/// Drive `manager` with every frame, skipping malformed ones.
///
/// Decode errors abort the replay; malformed landmark sets are counted and
/// skipped, the way a live loop would skip a bad detector frame.
pub fn replay<I>(manager: &mut SessionManager, frames: I) -> Result<ReplaySummary, ReplayError>
where
    I: IntoIterator<Item = Result<RecordedFrame, ReplayError>>,
{
    let mut summary = ReplaySummary::default();

    for frame in frames {
        let frame = frame?;
        if let Some(exercise) = frame.exercise {
            manager.select_exercise(exercise, frame.timestamp_ms);
        }

        match manager.process_points(&frame.landmarks, frame.timestamp_ms) {
            Ok(outcome) => {
                summary.frames += 1;
                summary.checkpoints.extend(outcome.checkpoint);
            }
            Err(SessionError::InputError(e)) => {
                summary.rejected += 1;
                tracing::warn!(timestamp_ms = frame.timestamp_ms, "Skipping frame: {}", e);
            }
        }
    }

    Ok(summary)
}

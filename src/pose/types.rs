//! Landmark types supplied by the upstream pose detector.
//!
//! Indices follow the 33-point BlazePose topology used by MediaPipe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks in every frame.
pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// A single tracked landmark.
///
/// `x`/`y` are normalized image coordinates. `z` and `visibility` are
/// optional because not every detector reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Point {
    /// Create a 2D point without visibility.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    /// Builder-style visibility setter.
    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Visibility with absence treated as zero confidence.
    pub fn confidence(&self) -> f32 {
        self.visibility.unwrap_or(0.0)
    }
}

/// One detector frame: exactly [`LANDMARK_COUNT`] points in anatomical order.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Build a frame from detector output.
    ///
    /// Rejects anything that is not exactly 33 points, or points with
    /// non-finite coordinates.
    pub fn from_points(points: &[Point]) -> Result<Self, PoseError> {
        let points: [Point; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| PoseError::InvalidFrameLength {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;

        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(PoseError::NonFiniteCoordinate { index });
        }

        Ok(Self { points })
    }

    /// Get a landmark by index.
    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Replace a landmark in place.
    pub fn set(&mut self, index: usize, point: Point) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    /// All landmarks in index order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self {
            points: [Point::default(); LANDMARK_COUNT],
        }
    }
}

impl TryFrom<Vec<Point>> for LandmarkFrame {
    type Error = PoseError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::from_points(&points)
    }
}

/// Errors for malformed detector input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    /// Frame did not contain exactly 33 landmarks
    #[error("Invalid frame: expected {expected} landmarks, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },

    /// Landmark coordinates were NaN or infinite
    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

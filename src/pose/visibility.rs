//! Body side selection and the visibility gate.
//!
//! The detector often sees one side of the body far better than the other
//! (side-on push-ups, planks). Selection always picks a side; the gate then
//! decides whether that side can be trusted.

use serde::{Deserialize, Serialize};

use crate::pose::types::{LandmarkFrame, Point};

/// Default minimum confidence for a landmark to be trusted.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Body side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Landmark indices of a three-joint chain, vertex in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointTriple {
    pub proximal: usize,
    pub vertex: usize,
    pub distal: usize,
}

impl JointTriple {
    pub const fn new(proximal: usize, vertex: usize, distal: usize) -> Self {
        Self {
            proximal,
            vertex,
            distal,
        }
    }
}

/// Mirrored joint chains for both sides of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointPair {
    pub left: JointTriple,
    pub right: JointTriple,
}

/// Points resolved from a frame for the chosen side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedJoints {
    pub side: Side,
    pub points: [Point; 3],
}

impl SelectedJoints {
    /// Whether every point strictly exceeds `threshold`.
    pub fn is_visible(&self, threshold: f32) -> bool {
        are_points_visible(&self.points, threshold)
    }
}

/// Mean visibility of a set of points, absent visibility counting as 0.
pub fn mean_visibility(points: &[Point]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(Point::confidence).sum::<f32>() / points.len() as f32
}

/// Visibility gate: every point must be strictly above `threshold`.
pub fn are_points_visible(points: &[Point], threshold: f32) -> bool {
    points.iter().all(|p| p.confidence() > threshold)
}

/// Pick the triple with the higher mean visibility.
///
/// Ties go to the right side.
pub fn select_side(left: [Point; 3], right: [Point; 3]) -> SelectedJoints {
    if mean_visibility(&left) > mean_visibility(&right) {
        SelectedJoints {
            side: Side::Left,
            points: left,
        }
    } else {
        SelectedJoints {
            side: Side::Right,
            points: right,
        }
    }
}

/// Resolve `pair` against `frame` and pick the better side.
pub fn select_joints(frame: &LandmarkFrame, pair: &JointPair) -> SelectedJoints {
    select_side(resolve(frame, &pair.left), resolve(frame, &pair.right))
}

fn resolve(frame: &LandmarkFrame, triple: &JointTriple) -> [Point; 3] {
    // Profile indices are all < LANDMARK_COUNT
    let at = |index| frame.get(index).copied().unwrap_or_default();
    [at(triple.proximal), at(triple.vertex), at(triple.distal)]
}

//! Pose landmark types, joint geometry and side selection.

pub mod geometry;
pub mod types;
pub mod visibility;

pub use geometry::{angle_at, joint_angle};
pub use types::{LandmarkFrame, Point, PoseError, LANDMARK_COUNT};
pub use visibility::{
    are_points_visible, mean_visibility, select_joints, select_side, JointPair, JointTriple,
    SelectedJoints, Side, DEFAULT_VISIBILITY_THRESHOLD,
};

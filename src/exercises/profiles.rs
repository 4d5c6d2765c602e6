//! Per-exercise joint mappings, thresholds and coaching text.
//!
//! Every analyzer runs the same skeleton; what differs between exercises
//! lives here as data, looked up by [`ExerciseType::profile`].

use crate::exercises::types::{ExerciseType, Stage};
use crate::pose::types::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE,
    RIGHT_ELBOW, RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::pose::visibility::{JointPair, JointTriple};

/// Thresholds for a repetition exercise.
///
/// Above `extended_above` the joint is open and the stage becomes
/// `extended_stage`; below `flexed_below` it becomes `flexed_stage`.
/// A rep is credited on entering `extended_stage` from `flexed_stage`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepThresholds {
    pub extended_above: f32,
    pub flexed_below: f32,
    pub extended_stage: Stage,
    pub flexed_stage: Stage,
}

/// Coaching text for a repetition exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepFeedback {
    /// Shown in the extended position, prompting the next flex
    pub extended: &'static str,
    /// Shown in the flexed position, prompting the return
    pub flexed: &'static str,
    /// Shown between the thresholds
    pub dead_zone: &'static str,
}

/// Alignment window for a hold exercise: `min_exclusive < angle <= max_inclusive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldThresholds {
    pub min_exclusive: f32,
    pub max_inclusive: f32,
}

impl HoldThresholds {
    pub fn contains(&self, angle: f32) -> bool {
        angle > self.min_exclusive && angle <= self.max_inclusive
    }
}

/// Coaching text for a hold exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldFeedback {
    pub holding: &'static str,
    pub broken_form: &'static str,
}

/// How an exercise is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Reps {
        thresholds: RepThresholds,
        feedback: RepFeedback,
    },
    Hold {
        thresholds: HoldThresholds,
        feedback: HoldFeedback,
    },
}

/// Everything an analyzer needs to know about one exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseProfile {
    pub exercise: ExerciseType,
    pub joints: JointPair,
    /// Shown when the selected joints fail the visibility gate
    pub hidden_feedback: &'static str,
    pub motion: Motion,
}

static PROFILES: [ExerciseProfile; 4] = [
    ExerciseProfile {
        exercise: ExerciseType::Squat,
        joints: JointPair {
            left: JointTriple::new(LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
            right: JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
        },
        hidden_feedback: "Show your whole lower body (hips to ankles) to the camera",
        motion: Motion::Reps {
            thresholds: RepThresholds {
                extended_above: 160.0,
                flexed_below: 90.0,
                extended_stage: Stage::Up,
                flexed_stage: Stage::Down,
            },
            feedback: RepFeedback {
                extended: "Lower your hips",
                flexed: "Now stand back up",
                dead_zone: "Squat a little deeper",
            },
        },
    },
    ExerciseProfile {
        exercise: ExerciseType::Pushup,
        joints: JointPair {
            left: JointTriple::new(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
            right: JointTriple::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
        },
        hidden_feedback: "Show your upper body (shoulders to wrists) to the camera",
        motion: Motion::Reps {
            thresholds: RepThresholds {
                extended_above: 160.0,
                flexed_below: 90.0,
                extended_stage: Stage::Up,
                flexed_stage: Stage::Down,
            },
            feedback: RepFeedback {
                extended: "Lower your body",
                flexed: "Push yourself back up",
                dead_zone: "Bend your elbows further",
            },
        },
    },
    ExerciseProfile {
        exercise: ExerciseType::Situp,
        joints: JointPair {
            left: JointTriple::new(LEFT_SHOULDER, LEFT_HIP, LEFT_KNEE),
            right: JointTriple::new(RIGHT_SHOULDER, RIGHT_HIP, RIGHT_KNEE),
        },
        hidden_feedback: "Turn sideways and show your shoulders to knees to the camera",
        motion: Motion::Reps {
            thresholds: RepThresholds {
                extended_above: 140.0,
                flexed_below: 70.0,
                // Lying back is the open position, so it counts the rep
                extended_stage: Stage::Down,
                flexed_stage: Stage::Up,
            },
            feedback: RepFeedback {
                extended: "Sit up",
                flexed: "Slowly lower your back",
                dead_zone: "Go all the way through the movement",
            },
        },
    },
    ExerciseProfile {
        exercise: ExerciseType::Plank,
        joints: JointPair {
            left: JointTriple::new(LEFT_SHOULDER, LEFT_HIP, LEFT_ANKLE),
            right: JointTriple::new(RIGHT_SHOULDER, RIGHT_HIP, RIGHT_ANKLE),
        },
        hidden_feedback: "Turn sideways and show your whole body to the camera",
        motion: Motion::Hold {
            thresholds: HoldThresholds {
                min_exclusive: 160.0,
                max_inclusive: 180.0,
            },
            feedback: HoldFeedback {
                holding: "Great form! Keep holding!",
                broken_form: "Hips are sagging or raised. Keep your body in a straight line",
            },
        },
    },
];

impl ExerciseType {
    /// Profile for this exercise.
    pub fn profile(self) -> &'static ExerciseProfile {
        &PROFILES[self as usize]
    }
}

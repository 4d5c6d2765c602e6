//! Per-frame exercise state transitions.
//!
//! All four exercises share one skeleton: pick the better-tracked side,
//! bail out with an instruction if it is not visible, measure the joint
//! angle, then apply the profile's thresholds. Each call takes the prior
//! state by reference and returns the next one.

use crate::exercises::profiles::{
    ExerciseProfile, HoldFeedback, HoldThresholds, Motion, RepFeedback, RepThresholds,
};
use crate::exercises::types::{ExerciseState, ExerciseType, Stage, REP_COMPLETE_FEEDBACK};
use crate::pose::geometry::joint_angle;
use crate::pose::types::LandmarkFrame;
use crate::pose::visibility::select_joints;
use crate::storage::config::CoachSettings;

/// Advance `prior` by one frame of `exercise`.
pub fn analyze(
    exercise: ExerciseType,
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    analyze_with_profile(exercise.profile(), frame, prior, timestamp_ms, settings)
}

/// Advance `prior` by one frame using an explicit profile.
pub fn analyze_with_profile(
    profile: &ExerciseProfile,
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    let mut next = prior.clone();
    next.last_frame_time_ms = timestamp_ms;

    let joints = select_joints(frame, &profile.joints);
    if !joints.is_visible(settings.visibility_threshold) {
        next.feedback = profile.hidden_feedback.to_string();
        next.celebration_frames = 0;
        if let Motion::Hold { .. } = profile.motion {
            // Re-anchored above so recovery does not see a huge delta
            next.stage = Stage::Unknown;
        }
        return next;
    }

    let [a, b, c] = joints.points;
    let angle = joint_angle(&a, &b, &c);
    tracing::trace!(
        exercise = %profile.exercise,
        side = ?joints.side,
        angle,
        "Joint angle"
    );

    match profile.motion {
        Motion::Reps {
            thresholds,
            feedback,
        } => step_reps(&mut next, prior, angle, &thresholds, &feedback, settings),
        Motion::Hold {
            thresholds,
            feedback,
        } => step_hold(
            &mut next,
            prior,
            angle,
            timestamp_ms,
            &thresholds,
            &feedback,
            settings,
        ),
    }

    if next.stage != prior.stage {
        tracing::debug!(
            exercise = %profile.exercise,
            "Stage {} -> {}",
            prior.stage,
            next.stage
        );
    }

    next
}

fn step_reps(
    next: &mut ExerciseState,
    prior: &ExerciseState,
    angle: f32,
    thresholds: &RepThresholds,
    feedback: &RepFeedback,
    settings: &CoachSettings,
) {
    if angle > thresholds.extended_above {
        if prior.stage == thresholds.flexed_stage {
            next.reps += 1;
            next.feedback = REP_COMPLETE_FEEDBACK.to_string();
            next.celebration_frames = 0;
            tracing::debug!(reps = next.reps, "Rep completed");
        } else if prior.is_celebrating()
            && settings.celebration.keeps(prior.celebration_frames + 1)
        {
            next.celebration_frames = prior.celebration_frames + 1;
        } else {
            next.feedback = feedback.extended.to_string();
            next.celebration_frames = 0;
        }
        next.stage = thresholds.extended_stage;
    } else if angle < thresholds.flexed_below {
        next.stage = thresholds.flexed_stage;
        next.feedback = feedback.flexed.to_string();
        next.celebration_frames = 0;
    } else {
        next.feedback = feedback.dead_zone.to_string();
        next.celebration_frames = 0;
    }
}

fn step_hold(
    next: &mut ExerciseState,
    prior: &ExerciseState,
    angle: f32,
    timestamp_ms: f64,
    thresholds: &HoldThresholds,
    feedback: &HoldFeedback,
    settings: &CoachSettings,
) {
    if thresholds.contains(angle) {
        next.stage = Stage::Hold;
        next.feedback = feedback.holding.to_string();

        let delta_ms = timestamp_ms - prior.last_frame_time_ms;
        if delta_ms > 0.0 && delta_ms < settings.max_frame_gap_ms {
            next.hold_time_secs += delta_ms / 1000.0;
        } else {
            tracing::trace!(delta_ms, "Dropped frame gap from hold time");
        }
    } else if angle <= thresholds.min_exclusive {
        next.stage = Stage::Unknown;
        next.feedback = feedback.broken_form.to_string();
    }
}

/// Squat, measured at the knee.
pub fn analyze_squat(
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    analyze(ExerciseType::Squat, frame, prior, timestamp_ms, settings)
}

/// Push-up, measured at the elbow.
pub fn analyze_pushup(
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    analyze(ExerciseType::Pushup, frame, prior, timestamp_ms, settings)
}

/// Sit-up, measured at the hip.
pub fn analyze_situp(
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    analyze(ExerciseType::Situp, frame, prior, timestamp_ms, settings)
}

/// Plank, measured at the hip against shoulder and ankle.
pub fn analyze_plank(
    frame: &LandmarkFrame,
    prior: &ExerciseState,
    timestamp_ms: f64,
    settings: &CoachSettings,
) -> ExerciseState {
    analyze(ExerciseType::Plank, frame, prior, timestamp_ms, settings)
}

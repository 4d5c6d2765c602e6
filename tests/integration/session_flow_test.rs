//! Integration tests for the session manager driving full workouts.

use repcoach::exercises::{ExerciseType, Stage};
use repcoach::pose::{LandmarkFrame, Point};
use repcoach::session::{Checkpoint, SessionManager};
use repcoach::storage::config::{CheckpointSettings, CoachSettings};

fn frame_for(exercise: ExerciseType, angle: f32, visibility: f32) -> LandmarkFrame {
    let mut frame = LandmarkFrame::default();
    let joints = exercise.profile().joints;
    let theta = angle.to_radians();
    for triple in [joints.left, joints.right] {
        frame.set(triple.proximal, Point::new(1.0, 0.0).with_visibility(visibility));
        frame.set(triple.vertex, Point::new(0.0, 0.0).with_visibility(visibility));
        frame.set(
            triple.distal,
            Point::new(theta.cos(), theta.sin()).with_visibility(visibility),
        );
    }
    frame
}

/// Simulated 30 Hz clock.
struct Clock(f64);

impl Clock {
    fn tick(&mut self) -> f64 {
        self.0 += 1000.0 / 30.0;
        self.0
    }
}

#[test]
fn test_squat_workout_with_occlusion() {
    let mut manager = SessionManager::new(ExerciseType::Squat);
    let mut clock = Clock(0.0);
    let mut checkpoints: Vec<Checkpoint> = Vec::new();
    let mut last_reps = 0;

    for rep in 0..12 {
        let mut angles = vec![(170.0, 0.9), (120.0, 0.9), (80.0, 0.9)];
        if rep % 3 == 0 {
            // Athlete walks half out of frame at the bottom
            angles.push((80.0, 0.2));
        }
        angles.push((170.0, 0.9));

        for (angle, visibility) in angles {
            let outcome = manager.process_frame(
                &frame_for(ExerciseType::Squat, angle, visibility),
                clock.tick(),
            );
            assert!(outcome.state.reps >= last_reps);
            last_reps = outcome.state.reps;
            checkpoints.extend(outcome.checkpoint);
        }
    }

    assert_eq!(manager.state().reps, 12);
    assert_eq!(checkpoints.len(), 2);
    assert!(checkpoints.iter().all(|c| c.reps_delta == 5 && c.duration_seconds_delta == 0));
}

#[test]
fn test_plank_checkpoints_every_ten_seconds() {
    let mut manager = SessionManager::new(ExerciseType::Plank);
    let mut clock = Clock(0.0);
    let frame = frame_for(ExerciseType::Plank, 176.0, 0.9);

    let mut checkpoints = Vec::new();
    // 25 seconds at 30 Hz
    for _ in 0..750 {
        checkpoints.extend(manager.process_frame(&frame, clock.tick()).checkpoint);
    }

    assert_eq!(manager.state().stage, Stage::Hold);
    assert!(manager.state().hold_time_secs > 24.0);
    assert_eq!(checkpoints.len(), 2);
    assert!(checkpoints
        .iter()
        .all(|c| c.duration_seconds_delta == 10 && c.reps_delta == 0));
}

#[test]
fn test_switching_exercise_mid_set() {
    let mut manager = SessionManager::new(ExerciseType::Pushup);
    let mut clock = Clock(0.0);

    for angle in [170.0, 80.0, 170.0, 80.0, 170.0] {
        manager.process_frame(&frame_for(ExerciseType::Pushup, angle, 0.9), clock.tick());
    }
    assert_eq!(manager.state().reps, 2);

    let switched_at = clock.tick();
    manager.select_exercise(ExerciseType::Situp, switched_at);
    assert_eq!(manager.state().reps, 0);
    assert_eq!(manager.state().last_frame_time_ms, switched_at);

    for angle in [150.0, 60.0, 150.0] {
        manager.process_frame(&frame_for(ExerciseType::Situp, angle, 0.9), clock.tick());
    }
    assert_eq!(manager.state().reps, 1);
    assert_eq!(manager.state().stage, Stage::Down);
}

#[test]
fn test_custom_intervals() {
    let mut manager = SessionManager::with_settings(
        ExerciseType::Squat,
        CoachSettings::default(),
        CheckpointSettings {
            rep_interval: 2,
            hold_interval_secs: 10,
        },
    );
    let mut clock = Clock(0.0);
    let mut checkpoints = Vec::new();

    for _ in 0..4 {
        for angle in [80.0, 170.0] {
            let outcome =
                manager.process_frame(&frame_for(ExerciseType::Squat, angle, 0.9), clock.tick());
            checkpoints.extend(outcome.checkpoint);
        }
    }

    assert_eq!(checkpoints.len(), 2);
    assert!(checkpoints.iter().all(|c| c.reps_delta == 2));
}

#[test]
fn test_malformed_frame_leaves_state_untouched() {
    let mut manager = SessionManager::new(ExerciseType::Squat);
    manager.process_frame(&frame_for(ExerciseType::Squat, 80.0, 0.9), 0.0);
    let before = manager.state().clone();

    let result = manager.process_points(&[Point::new(0.5, 0.5); 10], 33.0);
    assert!(result.is_err());
    assert_eq!(manager.state(), &before);
}

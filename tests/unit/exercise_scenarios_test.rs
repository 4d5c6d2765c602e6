//! Unit tests for the per-exercise state machines.

use repcoach::exercises::{analyze, ExerciseState, ExerciseType, Stage, REP_COMPLETE_FEEDBACK};
use repcoach::pose::{LandmarkFrame, Point};
use repcoach::storage::config::CoachSettings;

/// Build a fully visible frame whose joint chain for `exercise` forms `angle`.
fn frame_for(exercise: ExerciseType, angle: f32) -> LandmarkFrame {
    let mut frame = LandmarkFrame::default();
    let joints = exercise.profile().joints;
    let theta = angle.to_radians();
    for triple in [joints.left, joints.right] {
        frame.set(triple.proximal, Point::new(0.5, 0.3).with_visibility(0.99));
        frame.set(triple.vertex, Point::new(0.3, 0.3).with_visibility(0.99));
        frame.set(
            triple.distal,
            Point::new(0.3 + 0.2 * theta.cos(), 0.3 + 0.2 * theta.sin()).with_visibility(0.99),
        );
    }
    frame
}

fn run(exercise: ExerciseType, frames: &[(f32, f64)]) -> Vec<ExerciseState> {
    let settings = CoachSettings::default();
    let mut state = ExerciseState::new(0.0);
    frames
        .iter()
        .map(|(angle, t)| {
            state = analyze(exercise, &frame_for(exercise, *angle), &state, *t, &settings);
            state.clone()
        })
        .collect()
}

#[test]
fn test_squat_scenario() {
    let states = run(
        ExerciseType::Squat,
        &[(170.0, 0.0), (80.0, 33.0), (170.0, 66.0)],
    );
    let last = states.last().unwrap();
    assert_eq!(last.reps, 1);
    assert_eq!(last.stage, Stage::Up);
    assert_eq!(states[1].stage, Stage::Down);
}

#[test]
fn test_pushup_scenario() {
    let states = run(
        ExerciseType::Pushup,
        &[(170.0, 0.0), (85.0, 33.0), (165.0, 66.0)],
    );
    assert_eq!(states.last().unwrap().reps, 1);
    assert_eq!(states.last().unwrap().feedback, REP_COMPLETE_FEEDBACK);
}

#[test]
fn test_situp_scenario() {
    let states = run(
        ExerciseType::Situp,
        &[(150.0, 0.0), (60.0, 33.0), (150.0, 66.0)],
    );
    let last = states.last().unwrap();
    assert_eq!(last.reps, 1);
    assert_eq!(last.stage, Stage::Down);
    assert_eq!(states[1].stage, Stage::Up);
}

#[test]
fn test_plank_scenario() {
    let states = run(
        ExerciseType::Plank,
        &[(175.0, 0.0), (175.0, 500.0), (175.0, 1400.0), (175.0, 4400.0)],
    );
    assert!((states[2].hold_time_secs - 1.4).abs() < 1e-9);
    assert!((states[3].hold_time_secs - 1.4).abs() < 1e-9);
    assert!(states.iter().all(|s| s.stage == Stage::Hold));
    assert_eq!(states[3].reps, 0);
}

#[test]
fn test_reps_never_decrease() {
    let angles = [
        170.0, 100.0, 80.0, 120.0, 170.0, 175.0, 85.0, 40.0, 165.0, 130.0, 60.0, 170.0,
    ];
    let frames: Vec<(f32, f64)> = angles
        .iter()
        .enumerate()
        .map(|(i, a)| (*a, i as f64 * 33.0))
        .collect();

    for exercise in [ExerciseType::Squat, ExerciseType::Pushup, ExerciseType::Situp] {
        let states = run(exercise, &frames);
        assert!(states.windows(2).all(|w| w[1].reps >= w[0].reps));
        assert!(states.iter().all(|s| !s.feedback.is_empty()));
        assert!(states.iter().all(|s| s.hold_time_secs == 0.0));
    }

    let squat = run(ExerciseType::Squat, &frames);
    assert_eq!(squat.last().unwrap().reps, 3);
}

#[test]
fn test_hold_time_never_decreases() {
    let frames = [
        (175.0, 0.0),
        (175.0, 300.0),
        (120.0, 600.0),
        (175.0, 900.0),
        (175.0, 3000.0),
        (178.0, 3200.0),
    ];
    let states = run(ExerciseType::Plank, &frames);
    assert!(states
        .windows(2)
        .all(|w| w[1].hold_time_secs >= w[0].hold_time_secs));
    // 0.3 + 0.3 (900 after the broken frame at 600) + 0.2
    assert!((states.last().unwrap().hold_time_secs - 0.8).abs() < 1e-9);
}

//! Integration tests for asynchronous checkpoint delivery.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use repcoach::exercises::ExerciseType;
use repcoach::pose::{LandmarkFrame, Point};
use repcoach::session::{
    Checkpoint, CheckpointDispatcher, CheckpointRecorder, RecordError, SessionManager,
    WorkoutTally,
};

fn frame_for(exercise: ExerciseType, angle: f32) -> LandmarkFrame {
    let mut frame = LandmarkFrame::default();
    let joints = exercise.profile().joints;
    let theta = angle.to_radians();
    for triple in [joints.left, joints.right] {
        frame.set(triple.proximal, Point::new(1.0, 0.0).with_visibility(0.9));
        frame.set(triple.vertex, Point::new(0.0, 0.0).with_visibility(0.9));
        frame.set(
            triple.distal,
            Point::new(theta.cos(), theta.sin()).with_visibility(0.9),
        );
    }
    frame
}

fn squat_reps(manager: &mut SessionManager, reps: usize, t: &mut f64) {
    for _ in 0..reps {
        for angle in [80.0, 170.0] {
            *t += 33.0;
            manager.process_frame(&frame_for(ExerciseType::Squat, angle), *t);
        }
    }
}

#[tokio::test]
async fn test_checkpoints_reach_tally() {
    let tally = Arc::new(WorkoutTally::new());
    let dispatcher = CheckpointDispatcher::spawn(Arc::clone(&tally));
    let mut manager =
        SessionManager::new(ExerciseType::Squat).with_sink(Box::new(dispatcher.sink()));

    let mut t = 0.0;
    squat_reps(&mut manager, 11, &mut t);
    manager.select_exercise(ExerciseType::Plank, t);

    let plank = frame_for(ExerciseType::Plank, 175.0);
    for _ in 0..400 {
        t += 33.0;
        manager.process_frame(&plank, t);
    }
    drop(manager);

    let stats = dispatcher.shutdown().await;
    assert_eq!(stats.delivered, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(tally.totals(ExerciseType::Squat).reps, 10);
    assert_eq!(tally.totals(ExerciseType::Plank).duration_seconds, 10);
}

/// Recorder that always fails.
struct OfflineRecorder {
    attempts: AtomicUsize,
}

impl CheckpointRecorder for OfflineRecorder {
    fn record(&self, _checkpoint: Checkpoint) -> BoxFuture<'static, Result<(), RecordError>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        async { Err(RecordError::Unavailable("no network".to_string())) }.boxed()
    }
}

#[tokio::test]
async fn test_failures_do_not_affect_classification() {
    let recorder = Arc::new(OfflineRecorder {
        attempts: AtomicUsize::new(0),
    });
    let dispatcher = CheckpointDispatcher::spawn(Arc::clone(&recorder));
    let mut manager =
        SessionManager::new(ExerciseType::Squat).with_sink(Box::new(dispatcher.sink()));

    let mut t = 0.0;
    squat_reps(&mut manager, 10, &mut t);
    assert_eq!(manager.state().reps, 10);
    drop(manager);

    let stats = dispatcher.shutdown().await;
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.delivered, 0);
    // At most once: no retries
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 2);
}

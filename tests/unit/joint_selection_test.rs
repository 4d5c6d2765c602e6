//! Unit tests for joint angles and side selection on full frames.

use repcoach::pose::types::{
    LEFT_ANKLE, LEFT_HIP, LEFT_KNEE, RIGHT_ANKLE, RIGHT_HIP, RIGHT_KNEE,
};
use repcoach::pose::{angle_at, select_joints, JointPair, JointTriple, LandmarkFrame, Point, Side};

const LEGS: JointPair = JointPair {
    left: JointTriple::new(LEFT_HIP, LEFT_KNEE, LEFT_ANKLE),
    right: JointTriple::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE),
};

fn leg_frame(left_visibility: f32, right_visibility: f32) -> LandmarkFrame {
    let mut frame = LandmarkFrame::default();
    // Left leg bent at 90°, right leg straight
    frame.set(LEFT_HIP, Point::new(0.4, 0.4).with_visibility(left_visibility));
    frame.set(LEFT_KNEE, Point::new(0.4, 0.6).with_visibility(left_visibility));
    frame.set(LEFT_ANKLE, Point::new(0.6, 0.6).with_visibility(left_visibility));
    frame.set(RIGHT_HIP, Point::new(0.6, 0.4).with_visibility(right_visibility));
    frame.set(RIGHT_KNEE, Point::new(0.6, 0.6).with_visibility(right_visibility));
    frame.set(RIGHT_ANKLE, Point::new(0.6, 0.8).with_visibility(right_visibility));
    frame
}

#[test]
fn test_angle_follows_selected_side() {
    let frame = leg_frame(0.95, 0.6);
    let selected = select_joints(&frame, &LEGS);
    assert_eq!(selected.side, Side::Left);
    let [a, b, c] = selected.points;
    assert!((angle_at(Some(&a), Some(&b), Some(&c)) - 90.0).abs() < 0.01);

    let frame = leg_frame(0.6, 0.95);
    let selected = select_joints(&frame, &LEGS);
    assert_eq!(selected.side, Side::Right);
    let [a, b, c] = selected.points;
    assert!((angle_at(Some(&a), Some(&b), Some(&c)) - 180.0).abs() < 0.01);
}

#[test]
fn test_gate_at_exact_threshold() {
    let frame = leg_frame(0.5, 0.5);
    assert!(!select_joints(&frame, &LEGS).is_visible(0.5));

    let frame = leg_frame(0.50001, 0.2);
    assert!(select_joints(&frame, &LEGS).is_visible(0.5));
}

#[test]
fn test_frame_lookup_out_of_range() {
    let frame = LandmarkFrame::default();
    assert!(frame.get(32).is_some());
    assert!(frame.get(33).is_none());
    assert_eq!(angle_at(frame.get(40), frame.get(0), frame.get(1)), 0.0);
}

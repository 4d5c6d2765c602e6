//! Joint angle computation.

use crate::pose::types::Point;

/// Angle in degrees at vertex `b` formed by the rays `b→a` and `b→c`.
///
/// Uses the difference of the two rays' polar angles and reflects anything
/// above 180°, so the result is always in `[0, 180]`.
pub fn joint_angle(a: &Point, b: &Point, c: &Point) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// [`joint_angle`] over optional landmarks.
///
/// Returns `0.0` when any point is absent or has a non-finite coordinate.
/// Callers that need to distinguish that case must validate first.
pub fn angle_at(a: Option<&Point>, b: Option<&Point>, c: Option<&Point>) -> f32 {
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) if [a, b, c].iter().all(|p| is_finite(p)) => {
            joint_angle(a, b, c)
        }
        _ => 0.0,
    }
}

fn is_finite(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

//! Angle helpers for the absolute-orientation action

use std::f64::consts::PI;

/// Signed shortest-path difference between two angles, in [-PI, PI].
///
/// Wrap-around aware: two representations of the same physical angle 2*PI
/// apart differ by 0.
pub fn anglediff(a1: f64, a2: f64) -> f64 {
    ((a2 - a1) + PI).rem_euclid(2.0 * PI) - PI
}

/// Converts a unit quaternion (vector part `q0..q2`, scalar part `q3`) to
/// pitch/yaw/roll Euler angles.
pub fn quat2euler(q0: f64, q1: f64, q2: f64, q3: f64) -> [f64; 3] {
    let pitch = (2.0 * (q3 * q0 + q1 * q2)).atan2(1.0 - 2.0 * (q0 * q0 + q1 * q1));
    let yaw = (2.0 * (q3 * q1 - q2 * q0)).clamp(-1.0, 1.0).asin();
    let roll = (2.0 * (q3 * q2 + q0 * q1)).atan2(1.0 - 2.0 * (q1 * q1 + q2 * q2));
    [pitch, yaw, roll]
}

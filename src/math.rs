//! 2D math helpers for angle-based motion and steering.
//!
//! Angles are in degrees, normalized to `[0, 360)`, matching the convention
//! used by the steering and staging code. [`is_equal_360`] is the arrival
//! detector primitive: it compares two bearings under wrap-around with a
//! tolerance band.

use glam::Vec2;

/// Build a velocity vector from a speed and a direction in degrees.
pub fn vec_from_angle(speed: f32, degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(speed * rad.cos(), speed * rad.sin())
}

/// Direction of a vector in degrees, normalized to `[0, 360)`.
///
/// The zero vector reports `0.0`.
pub fn angle_deg(v: Vec2) -> f32 {
    let deg = v.y.atan2(v.x).to_degrees();
    normalize_deg(deg)
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_deg(deg: f32) -> f32 {
    let wrapped = deg % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

/// Angular equality under 360-degree wrap-around.
///
/// Returns true when the shortest arc between `a` and `b` is within
/// `tolerance` degrees.
pub fn is_equal_360(a: f32, b: f32, tolerance: f32) -> bool {
    let diff = (normalize_deg(a) - normalize_deg(b)).abs();
    let arc = if diff > 180.0 { 360.0 - diff } else { diff };
    arc <= tolerance
}

/// Circle-out easing. Fast start, decelerating into the end.
///
/// Used by the sound fader volume ramp.
pub fn circle_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    (1.0 - t * t).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_vec_from_angle_cardinals() {
        let right = vec_from_angle(5.0, 0.0);
        assert!(approx_eq(right.x, 5.0));
        assert!(approx_eq(right.y, 0.0));

        let up = vec_from_angle(2.0, 90.0);
        assert!(approx_eq(up.x, 0.0));
        assert!(approx_eq(up.y, 2.0));

        let left = vec_from_angle(1.0, 180.0);
        assert!(approx_eq(left.x, -1.0));
        assert!(approx_eq(left.y, 0.0));
    }

    #[test]
    fn test_angle_deg_quadrants() {
        assert!(approx_eq(angle_deg(Vec2::new(1.0, 0.0)), 0.0));
        assert!(approx_eq(angle_deg(Vec2::new(0.0, 1.0)), 90.0));
        assert!(approx_eq(angle_deg(Vec2::new(-1.0, 0.0)), 180.0));
        assert!(approx_eq(angle_deg(Vec2::new(0.0, -1.0)), 270.0));
    }

    #[test]
    fn test_angle_deg_zero_vector() {
        assert!(approx_eq(angle_deg(Vec2::ZERO), 0.0));
    }

    #[test]
    fn test_normalize_deg() {
        assert!(approx_eq(normalize_deg(370.0), 10.0));
        assert!(approx_eq(normalize_deg(-10.0), 350.0));
        assert!(approx_eq(normalize_deg(0.0), 0.0));
        assert!(approx_eq(normalize_deg(720.0), 0.0));
    }

    #[test]
    fn test_is_equal_360_within_tolerance() {
        assert!(is_equal_360(10.0, 20.0, 30.0));
        assert!(is_equal_360(350.0, 10.0, 30.0)); // across the wrap
        assert!(is_equal_360(0.0, 360.0, 1.0));
    }

    #[test]
    fn test_is_equal_360_outside_tolerance() {
        assert!(!is_equal_360(0.0, 90.0, 30.0));
        assert!(!is_equal_360(170.0, 350.0, 30.0)); // opposite bearings
    }

    #[test]
    fn test_circle_out_endpoints() {
        assert!(approx_eq(circle_out(0.0), 0.0));
        assert!(approx_eq(circle_out(1.0), 1.0));
        // clamped outside [0, 1]
        assert!(approx_eq(circle_out(2.0), 1.0));
        assert!(approx_eq(circle_out(-1.0), 0.0));
    }

    #[test]
    fn test_circle_out_monotonic() {
        let mut prev = 0.0;
        for i in 1..=10 {
            let v = circle_out(i as f32 / 10.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}

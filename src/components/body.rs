//! Kinematic body component: velocity plus a constant gravity acceleration.
//!
//! The integration system applies gravity to velocity and velocity to
//! position once per fixed tick, in that order. Angle-based setters mirror
//! the motion helpers the narrative staging code uses.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::math::{angle_deg, vec_from_angle};

/// Velocity and gravity for Euler-integrated motion.
///
/// # Fields
/// - `velocity` - current velocity in world units per second
/// - `gravity` - constant acceleration applied every tick before the
///   position update
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Body {
    pub velocity: Vec2,
    pub gravity: Vec2,
}

impl Body {
    /// Create a body at rest with no gravity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a body with a gravity acceleration.
    pub fn with_gravity(gx: f32, gy: f32) -> Self {
        Body {
            velocity: Vec2::ZERO,
            gravity: Vec2::new(gx, gy),
        }
    }

    /// Set velocity from a speed and a direction in degrees.
    pub fn set_motion(&mut self, speed: f32, direction: f32) {
        self.velocity = vec_from_angle(speed, direction);
    }

    /// Add a speed/direction pair to the current velocity.
    pub fn add_motion(&mut self, speed: f32, direction: f32) {
        self.velocity += vec_from_angle(speed, direction);
    }

    /// Current speed (velocity magnitude).
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Current movement direction in degrees, `[0, 360)`.
    pub fn direction(&self) -> f32 {
        angle_deg(self.velocity)
    }

    /// Set gravity from a magnitude and a direction in degrees.
    pub fn set_gravity(&mut self, magnitude: f32, direction: f32) {
        self.gravity = vec_from_angle(magnitude, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_body_new_at_rest() {
        let body = Body::new();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.gravity, Vec2::ZERO);
    }

    #[test]
    fn test_with_gravity() {
        let body = Body::with_gravity(0.0, -980.0);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(approx_eq(body.gravity.y, -980.0));
    }

    #[test]
    fn test_set_motion() {
        let mut body = Body::new();
        body.set_motion(10.0, 90.0);
        assert!(approx_eq(body.velocity.x, 0.0));
        assert!(approx_eq(body.velocity.y, 10.0));
        assert!(approx_eq(body.speed(), 10.0));
        assert!(approx_eq(body.direction(), 90.0));
    }

    #[test]
    fn test_set_motion_replaces_previous() {
        let mut body = Body::new();
        body.set_motion(10.0, 0.0);
        body.set_motion(5.0, 180.0);
        assert!(approx_eq(body.velocity.x, -5.0));
        assert!(approx_eq(body.velocity.y, 0.0));
    }

    #[test]
    fn test_add_motion_accumulates() {
        let mut body = Body::new();
        body.add_motion(3.0, 0.0);
        body.add_motion(4.0, 90.0);
        assert!(approx_eq(body.velocity.x, 3.0));
        assert!(approx_eq(body.velocity.y, 4.0));
        assert!(approx_eq(body.speed(), 5.0));
    }

    #[test]
    fn test_set_gravity_from_angle() {
        let mut body = Body::new();
        body.set_gravity(100.0, 270.0);
        assert!(approx_eq(body.gravity.x, 0.0));
        assert!(approx_eq(body.gravity.y, -100.0));
    }
}

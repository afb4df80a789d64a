//! Straight-line pursuit of a target position.
//!
//! Each fixed tick the steering system advances the entity by
//! `speed * delta` toward `target` using angle-based motion. Arrival is
//! overshoot detection, not a distance check: when the post-move bearing to
//! the target leaves a ±30° band around the pre-move bearing, the position
//! snaps to the target, the component is removed and one
//! [`ArrivalEvent`](crate::events::arrival::ArrivalEvent) fires. Removing
//! the component directly cancels pursuit without the event.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Bearing tolerance band for overshoot detection, in degrees.
pub const ARRIVAL_TOLERANCE_DEG: f32 = 30.0;

/// Active follow-target steering state.
#[derive(Component, Clone, Copy, Debug)]
pub struct Follow {
    /// Destination in world units.
    pub target: Vec2,
    /// Pursuit speed in world units per second.
    pub speed: f32,
}

impl Follow {
    pub fn new(target: Vec2, speed: f32) -> Self {
        Follow { target, speed }
    }
}

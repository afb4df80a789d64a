//! Steering arrival notification.

use bevy_ecs::prelude::*;
use glam::Vec2;

/// Fired exactly once when a following entity reaches its target and its
/// position snaps there. Cancelling pursuit does not fire this event.
#[derive(Event, Debug, Clone, Copy)]
pub struct ArrivalEvent {
    pub entity: Entity,
    /// The target that was reached.
    pub target: Vec2,
}

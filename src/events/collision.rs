//! Collision event emitted by the pairwise collision pass.
//!
//! The collision system tests every unique unordered pair of active
//! colliders once per tick and triggers exactly one [`CollisionEvent`] per
//! overlapping pair. Delivery is symmetric by contract: an observer that
//! cares about a specific entity must check both fields.

use bevy_ecs::prelude::*;

/// Fired once per overlapping collider pair per fixed tick.
///
/// No ordering guarantee between `a` and `b`.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

impl CollisionEvent {
    /// True when `entity` participates in this collision.
    pub fn involves(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }

    /// The other participant, or `None` when `entity` is not involved.
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}

//! Destroy notification fired by the reaper system.
//!
//! Triggered exactly once per destroyed entity, after the entity has been
//! excluded from the tick's simulation phases and immediately before its
//! despawn. Observers may read the entity's components one last time.

use bevy_ecs::prelude::*;

/// Fired once for each entity marked
/// [`Destroyed`](crate::components::destroyed::Destroyed), just before it
/// is despawned.
#[derive(Event, Debug, Clone, Copy)]
pub struct DestroyedEvent {
    pub entity: Entity,
}

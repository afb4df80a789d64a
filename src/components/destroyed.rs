//! Destroy mark for deferred entity removal.
//!
//! Destroying an entity is cooperative: game logic inserts [`Destroyed`] at
//! any time (idempotent, inserting twice changes nothing), and the reaper
//! system at the end of the same tick triggers one
//! [`DestroyedEvent`](crate::events::destroyed::DestroyedEvent) and
//! despawns the entity. Between the mark and the reap the entity is skipped
//! by integration, collision and draw ordering, so callbacks that may still
//! reference it must re-check for this component.

use bevy_ecs::prelude::Component;

/// Tag component marking an entity for removal at the end of the tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Destroyed;

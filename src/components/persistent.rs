//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive a
//! [`Stage::clear`](crate::stage::Stage::clear) with `clear_persistent`
//! set to false. Use this for overlays or bookkeeping entities that must
//! outlive a scene reset.

use bevy_ecs::prelude::Component;

/// Tag component for entities that survive non-forced scene clears.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;

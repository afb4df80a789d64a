//! Depth component for draw ordering.
//!
//! Depth orders the painter's algorithm back-to-front: entities with a
//! *higher* depth value are further back and drawn first, so lower depths
//! end up on top. This is the inverse of a plain z-index.

use bevy_ecs::prelude::Component;

/// Draw-order hint. Higher values are drawn earlier (further back).
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Depth(pub i32);

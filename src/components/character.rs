//! Narrative character component.
//!
//! A [`CharacterRig`] ties a stage entity to a skeletal-animation instance
//! owned by the playback backend, and gives it a name the staging scripts
//! use for lookup through the [`Cast`](crate::resources::cast::Cast)
//! registry. Characters are spawned by
//! [`Stage::spawn_character`](crate::stage::Stage::spawn_character) and
//! destroyed like any other entity.

use bevy_ecs::prelude::Component;

use crate::resources::playback::SkeletonHandle;

/// A named character driven by an external skeletal-animation instance.
#[derive(Component, Clone, Debug)]
pub struct CharacterRig {
    /// Unique lookup key within the stage's cast.
    pub name: String,
    /// Handle into the playback backend.
    pub skeleton: SkeletonHandle,
    /// Horizontal mirroring, mirrored into the backend.
    pub flipped_x: bool,
    /// Active skin name, `None` for the skeleton default.
    pub skin: Option<String>,
}

impl CharacterRig {
    pub fn new(name: impl Into<String>, skeleton: SkeletonHandle) -> Self {
        CharacterRig {
            name: name.into(),
            skeleton,
            flipped_x: false,
            skin: None,
        }
    }
}

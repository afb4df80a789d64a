//! Skeleton playback sync, once per fixed tick.
//!
//! Pushes character positions into the playback backend, advances it,
//! and drains its notices. Track completions are recorded inside
//! [`Playback`] for the staging scripts; named animation events are only
//! logged for now.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::character::CharacterRig;
use crate::components::destroyed::Destroyed;
use crate::components::position::Position;
use crate::resources::playback::{Playback, PlaybackNotice};
use crate::resources::worldtime::WorldTime;

pub fn sync_skeletons(
    time: Res<WorldTime>,
    mut playback: ResMut<Playback>,
    query: Query<(&Position, &CharacterRig), Without<Destroyed>>,
) {
    for (position, rig) in &query {
        playback.set_position(rig.skeleton, position.pos.x, position.pos.y);
    }
    for notice in playback.update(time.delta) {
        if let PlaybackNotice::Event {
            handle,
            track,
            name,
        } = notice
        {
            debug!("animation event '{}' on {:?} track {}", name, handle, track);
        }
    }
}

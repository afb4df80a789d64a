//! Semi-implicit Euler integration, once per fixed tick.

use bevy_ecs::prelude::*;

use crate::components::body::Body;
use crate::components::destroyed::Destroyed;
use crate::components::position::Position;
use crate::resources::worldtime::WorldTime;

/// Apply gravity to velocity, then velocity to position. Entities marked
/// [`Destroyed`] stop moving immediately, before the reaper runs.
pub fn integrate(
    time: Res<WorldTime>,
    mut query: Query<(&mut Position, &mut Body), Without<Destroyed>>,
) {
    let delta = time.delta;
    for (mut position, mut body) in &mut query {
        let gravity = body.gravity;
        body.velocity += gravity * delta;
        position.pos += body.velocity * delta;
    }
}

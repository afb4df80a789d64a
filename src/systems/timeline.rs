//! Exclusive timeline driver.

use bevy_ecs::prelude::*;

use crate::timeline::queue::TimelineQueue;

/// Drive the narrative queue for one fixed tick. Exclusive because the
/// events need the whole world; the queue is lifted out with
/// `resource_scope` so they never alias it.
pub fn drive_timeline(world: &mut World) {
    world.resource_scope(|world, mut queue: Mut<TimelineQueue>| {
        queue.drive(world);
    });
}

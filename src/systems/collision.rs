//! Pairwise AABB collision pass.
//!
//! Every unique pair of live, active colliders is tested once per fixed
//! tick; an overlapping pair produces exactly one [`CollisionEvent`].
//! Pair order within the event is unspecified, so handlers match with
//! [`CollisionEvent::involves`] rather than on field position.

use bevy_ecs::prelude::*;

use crate::components::collider::Collider;
use crate::components::destroyed::Destroyed;
use crate::components::position::Position;
use crate::events::collision::CollisionEvent;

pub fn detect_collisions(
    mut commands: Commands,
    query: Query<(Entity, &Position, &Collider), Without<Destroyed>>,
) {
    for [(entity_a, pos_a, col_a), (entity_b, pos_b, col_b)] in query.iter_combinations() {
        if !col_a.active || !col_b.active {
            continue;
        }
        if col_a.overlaps(pos_a.pos, col_b, pos_b.pos) {
            commands.trigger(CollisionEvent {
                a: entity_a,
                b: entity_b,
            });
        }
    }
}

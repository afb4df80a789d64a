//! Depth-sorted draw order.

use bevy_ecs::prelude::*;

use crate::components::depth::Depth;
use crate::components::destroyed::Destroyed;

/// Entities in the order the host should draw them: higher [`Depth`]
/// first (further back), ties kept stable. Destroyed entities never
/// appear, even before the reaper has run.
pub fn draw_order(world: &mut World) -> Vec<Entity> {
    let mut query = world.query_filtered::<(Entity, &Depth), Without<Destroyed>>();
    let mut items: Vec<(Entity, i32)> = query.iter(world).map(|(e, d)| (e, d.0)).collect();
    items.sort_by_key(|&(_, depth)| std::cmp::Reverse(depth));
    items.into_iter().map(|(entity, _)| entity).collect()
}

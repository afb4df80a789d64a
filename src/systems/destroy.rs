//! End-of-tick reaper for entities marked [`Destroyed`].
//!
//! Destruction is deferred: gameplay code inserts the marker, and this
//! system, last in the tick, fires one [`DestroyedEvent`] per entity,
//! releases its cast entry and skeleton, and despawns it. Marking an
//! entity twice in one tick still yields a single event because the
//! marker is a tag, not a counter.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::character::CharacterRig;
use crate::components::destroyed::Destroyed;
use crate::events::destroyed::DestroyedEvent;
use crate::resources::cast::Cast;
use crate::resources::playback::Playback;

pub fn reap_destroyed(
    mut commands: Commands,
    mut cast: ResMut<Cast>,
    mut playback: ResMut<Playback>,
    query: Query<(Entity, Option<&CharacterRig>), With<Destroyed>>,
) {
    for (entity, rig) in &query {
        debug!("reaping {:?}", entity);
        if let Some(rig) = rig {
            playback.unload(rig.skeleton);
        }
        // by entity, not by name: a restaged name may already map to a
        // live replacement that must stay registered
        cast.remove_entity(entity);
        commands.trigger(DestroyedEvent { entity });
        commands.entity(entity).try_despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::playback::{SkeletonHandle, SkeletonLibrary};

    #[derive(Resource, Default)]
    struct Reaped(Vec<Entity>);

    fn world_with_observer() -> World {
        let mut world = World::new();
        world.insert_resource(Cast::new());
        world.insert_resource(Playback::scripted(SkeletonLibrary::new()));
        world.insert_resource(Reaped::default());
        world.add_observer(|trigger: On<DestroyedEvent>, mut reaped: ResMut<Reaped>| {
            reaped.0.push(trigger.event().entity);
        });
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(reap_destroyed);
        schedule.run(world);
    }

    #[test]
    fn test_marked_entity_reaped_with_one_event() {
        let mut world = world_with_observer();
        let doomed = world.spawn(Destroyed).id();
        let survivor = world.spawn_empty().id();

        run(&mut world);
        assert_eq!(world.resource::<Reaped>().0, vec![doomed]);
        assert!(world.get_entity(doomed).is_err());
        assert!(world.get_entity(survivor).is_ok());

        // a second pass finds nothing
        run(&mut world);
        assert_eq!(world.resource::<Reaped>().0.len(), 1);
    }

    #[test]
    fn test_cast_entry_released() {
        let mut world = world_with_observer();
        let doomed = world.spawn(Destroyed).id();
        world.resource_mut::<Cast>().insert("doctor", doomed);

        run(&mut world);
        assert!(world.resource::<Cast>().is_empty());
    }

    #[test]
    fn test_reaping_superseded_character_keeps_replacement() {
        let mut world = world_with_observer();
        let old = world
            .spawn((
                CharacterRig::new("captain".to_string(), SkeletonHandle(0)),
                Destroyed,
            ))
            .id();
        let replacement = world
            .spawn(CharacterRig::new("captain".to_string(), SkeletonHandle(1)))
            .id();
        world.resource_mut::<Cast>().insert("captain", old);
        world.resource_mut::<Cast>().insert("captain", replacement);

        run(&mut world);
        assert!(world.get_entity(old).is_err());
        assert_eq!(world.resource::<Cast>().find("captain"), Some(replacement));
    }
}

//! Follow-target steering with overshoot arrival detection.
//!
//! Runs right before integration, so an aim takes effect on the same
//! tick. Each tick the system points the body's velocity at the target;
//! arrival is detected either by the remaining distance fitting inside
//! one tick's travel, or by the bearing to the target flipping outside
//! the tolerance band after the last move (the entity sailed past). On arrival the position snaps to the target, the
//! [`Follow`] component comes off, the body stops, and exactly one
//! [`ArrivalEvent`] fires.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::body::Body;
use crate::components::destroyed::Destroyed;
use crate::components::follow::{ARRIVAL_TOLERANCE_DEG, Follow};
use crate::components::position::Position;
use crate::events::arrival::ArrivalEvent;
use crate::math::{angle_deg, is_equal_360};
use crate::resources::worldtime::WorldTime;

pub fn follow_targets(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Position, &mut Body, &Follow), Without<Destroyed>>,
) {
    let delta = time.delta;
    for (entity, mut position, mut body, follow) in &mut query {
        let to = follow.target - position.pos;
        let distance = to.length();

        let overshot = body.speed() > 0.0
            && distance > 0.0
            && !is_equal_360(angle_deg(to), body.direction(), ARRIVAL_TOLERANCE_DEG);

        if distance <= follow.speed * delta || overshot {
            trace!("{:?} arrived at {:?}", entity, follow.target);
            position.pos = follow.target;
            body.velocity = Vec2::ZERO;
            commands.entity(entity).remove::<Follow>();
            commands.trigger(ArrivalEvent {
                entity,
                target: follow.target,
            });
        } else {
            body.set_motion(follow.speed, angle_deg(to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::movement::integrate;

    const EPSILON: f32 = 1e-3;

    fn tick(world: &mut World, delta: f32) {
        world.resource_mut::<WorldTime>().delta = delta;
        let mut schedule = Schedule::default();
        schedule.add_systems((follow_targets, integrate).chain());
        schedule.run(world);
    }

    #[test]
    fn test_moves_toward_target_each_tick() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let entity = world
            .spawn((
                Position::new(0.0, 0.0),
                Body::new(),
                Follow::new(Vec2::new(100.0, 0.0), 50.0),
            ))
            .id();

        tick(&mut world, 0.1);
        tick(&mut world, 0.1);
        let position = world.get::<Position>(entity).unwrap();
        // each tick aims then moves 5 units
        assert!((position.pos.x - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_arrives_and_snaps_exactly() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let target = Vec2::new(7.0, 3.0);
        let entity = world
            .spawn((Position::new(0.0, 0.0), Body::new(), Follow::new(target, 60.0)))
            .id();

        for _ in 0..100 {
            tick(&mut world, 0.01);
            if world.get::<Follow>(entity).is_none() {
                break;
            }
        }
        assert!(world.get::<Follow>(entity).is_none(), "never arrived");
        let position = world.get::<Position>(entity).unwrap();
        assert_eq!(position.pos, target);
        assert_eq!(world.get::<Body>(entity).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_single_arrival_event() {
        #[derive(Resource, Default)]
        struct Arrivals(u32);

        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(Arrivals::default());
        world.add_observer(
            |_trigger: On<ArrivalEvent>, mut arrivals: ResMut<Arrivals>| {
                arrivals.0 += 1;
            },
        );

        world.spawn((
            Position::new(0.0, 0.0),
            Body::new(),
            Follow::new(Vec2::new(2.0, 0.0), 10.0),
        ));

        for _ in 0..50 {
            tick(&mut world, 0.05);
        }
        assert_eq!(world.resource::<Arrivals>().0, 1);
    }

    #[test]
    fn test_overshoot_snaps_to_target() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let target = Vec2::new(10.0, 0.0);
        // already past the target, still moving away from it
        let entity = world
            .spawn((
                Position::new(10.5, 0.0),
                Body {
                    velocity: Vec2::new(1.0, 0.0),
                    gravity: Vec2::ZERO,
                },
                Follow::new(target, 1.0),
            ))
            .id();

        // the bearing to the target flipped, so this counts as arrival
        tick(&mut world, 0.1);
        let position = world.get::<Position>(entity).unwrap();
        assert_eq!(position.pos, target);
        assert!(world.get::<Follow>(entity).is_none());
    }

    #[test]
    fn test_removing_follow_cancels_pursuit() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        let entity = world
            .spawn((
                Position::new(0.0, 0.0),
                Body::new(),
                Follow::new(Vec2::new(100.0, 0.0), 50.0),
            ))
            .id();

        tick(&mut world, 0.1);
        world.entity_mut(entity).remove::<Follow>();
        let x_before = world.get::<Position>(entity).unwrap().pos.x;

        // still drifts on its residual velocity, but never re-aims
        tick(&mut world, 0.1);
        let position = world.get::<Position>(entity).unwrap();
        assert!(position.pos.x > x_before);
    }
}

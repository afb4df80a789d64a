//! Integration tests for the stage's fixed-tick entity mechanics:
//! steering arrival, the collision pass and deferred destruction, all
//! exercised through the public `Stage` API.

use bevy_ecs::prelude::*;
use glam::Vec2;

use keyline::components::body::Body;
use keyline::components::collider::Collider;
use keyline::components::depth::Depth;
use keyline::components::destroyed::Destroyed;
use keyline::components::follow::Follow;
use keyline::components::position::Position;
use keyline::events::arrival::ArrivalEvent;
use keyline::events::collision::CollisionEvent;
use keyline::events::destroyed::DestroyedEvent;
use keyline::resources::playback::{Playback, SkeletonLibrary};
use keyline::Stage;

fn library() -> SkeletonLibrary {
    let mut library = SkeletonLibrary::new();
    library.register("spine/game/player.json", [("stand", 1.0)]);
    library
}

fn stage() -> Stage {
    Stage::new(Playback::scripted(library()))
}

#[derive(Resource, Default)]
struct Counter(u32);

#[test]
fn test_arrival_within_expected_ticks() {
    let mut stage = stage();
    stage
        .world_mut()
        .insert_resource(Counter::default());
    stage.world_mut().add_observer(
        |_trigger: On<ArrivalEvent>, mut counter: ResMut<Counter>| {
            counter.0 += 1;
        },
    );

    let target = Vec2::new(30.0, 40.0); // 50 units away
    let entity = stage
        .world_mut()
        .spawn((Position::new(0.0, 0.0), Body::new(), Follow::new(target, 100.0)))
        .id();

    // 50 units at 100 u/s on a 10 ms tick is 50 ticks of travel, plus
    // one tick of float slack
    let budget = 51;
    let mut arrived_at = None;
    for tick in 0..budget {
        stage.tick();
        if stage.world().get::<Follow>(entity).is_none() {
            arrived_at = Some(tick);
            break;
        }
    }
    assert!(arrived_at.is_some(), "did not arrive within {} ticks", budget);
    assert_eq!(stage.world().get::<Position>(entity).unwrap().pos, target);
    assert_eq!(stage.world().resource::<Counter>().0, 1);

    // no further events after arrival
    for _ in 0..10 {
        stage.tick();
    }
    assert_eq!(stage.world().resource::<Counter>().0, 1);
}

#[test]
fn test_collision_fires_once_per_overlapping_pair_per_tick() {
    let mut stage = stage();
    stage.world_mut().insert_resource(Counter::default());
    stage.world_mut().add_observer(
        |_trigger: On<CollisionEvent>, mut counter: ResMut<Counter>| {
            counter.0 += 1;
        },
    );

    stage
        .world_mut()
        .spawn((Position::new(0.0, 0.0), Collider::new(10.0, 10.0)));
    stage
        .world_mut()
        .spawn((Position::new(5.0, 0.0), Collider::new(10.0, 10.0)));

    stage.tick();
    assert_eq!(stage.world().resource::<Counter>().0, 1);
    stage.tick();
    assert_eq!(stage.world().resource::<Counter>().0, 2);
}

#[test]
fn test_collision_handler_destroying_both_reaps_same_tick() {
    let mut stage = stage();
    stage.world_mut().insert_resource(Counter::default());
    stage.world_mut().add_observer(
        |trigger: On<CollisionEvent>, mut commands: Commands| {
            commands.entity(trigger.event().a).insert(Destroyed);
            commands.entity(trigger.event().b).insert(Destroyed);
        },
    );
    stage.world_mut().add_observer(
        |_trigger: On<DestroyedEvent>, mut counter: ResMut<Counter>| {
            counter.0 += 1;
        },
    );

    let a = stage
        .world_mut()
        .spawn((Position::new(0.0, 0.0), Collider::new(10.0, 10.0)))
        .id();
    let b = stage
        .world_mut()
        .spawn((Position::new(5.0, 0.0), Collider::new(10.0, 10.0)))
        .id();

    stage.tick();
    assert_eq!(stage.world().resource::<Counter>().0, 2);
    assert!(stage.world().get_entity(a).is_err());
    assert!(stage.world().get_entity(b).is_err());

    // nothing left to collide or reap
    stage.tick();
    assert_eq!(stage.world().resource::<Counter>().0, 2);
}

#[test]
fn test_double_marking_yields_single_destroyed_event() {
    let mut stage = stage();
    stage.world_mut().insert_resource(Counter::default());
    stage.world_mut().add_observer(
        |_trigger: On<DestroyedEvent>, mut counter: ResMut<Counter>| {
            counter.0 += 1;
        },
    );

    let entity = stage.world_mut().spawn(Position::new(0.0, 0.0)).id();
    stage.destroy(entity);
    stage.destroy(entity);
    stage.tick();
    assert_eq!(stage.world().resource::<Counter>().0, 1);
}

#[test]
fn test_draw_order_spans_spawned_characters() {
    let mut stage = stage();
    let far = stage
        .spawn_character("far", "spine/game/player.json", "stand", Vec2::ZERO, 100)
        .unwrap();
    let near = stage
        .spawn_character("near", "spine/game/player.json", "stand", Vec2::ZERO, 1)
        .unwrap();
    let mid = stage.world_mut().spawn((Position::new(0.0, 0.0), Depth(50))).id();

    assert_eq!(stage.draw_order(), vec![far, mid, near]);
}

#[test]
fn test_advance_with_odd_frame_deltas_keeps_tick_rate() {
    let mut stage = stage();
    // 16.7 ms frames against a 10 ms tick
    for _ in 0..60 {
        stage.advance(0.0167);
    }
    let ticks = stage
        .world()
        .resource::<keyline::resources::worldtime::WorldTime>()
        .tick_count;
    // one second of wall time, about a hundred ticks
    assert!((95..=105).contains(&ticks), "tick count {}", ticks);
}

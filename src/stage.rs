//! Stage: the simulation world plus its schedules and fixed-step clock.
//!
//! The host owns a [`Stage`] and calls [`Stage::advance`] once per
//! rendered frame with the real frame delta. The stage accumulates lag
//! and runs zero or more fixed ticks of 10 ms (scaled by the world's
//! time scale), then one frame step for the frame-rate actions, and
//! returns the interpolation alpha for rendering. Input arrives through
//! [`Stage::key_down`] and [`Stage::key_typed`]; output leaves through
//! [`Stage::draw_order`] and the audio/grade mailboxes.

use bevy_ecs::message::Messages;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::character::CharacterRig;
use crate::components::depth::Depth;
use crate::components::destroyed::Destroyed;
use crate::components::persistent::Persistent;
use crate::components::position::Position;
use crate::events::audio::AudioCmd;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::grade::GradeCallout;
use crate::resources::actions::ActionScheduler;
use crate::resources::cast::Cast;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputBuffer, KeyCode};
use crate::resources::playback::{Playback, PlaybackError};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::actions::run_actions;
use crate::systems::collision::detect_collisions;
use crate::systems::destroy::reap_destroyed;
use crate::systems::draw::draw_order;
use crate::systems::follow::follow_targets;
use crate::systems::input::age_input;
use crate::systems::movement::integrate;
use crate::systems::skeleton::sync_skeletons;
use crate::systems::timeline::drive_timeline;
use crate::timeline::queue::TimelineQueue;

/// Fixed simulation step, in seconds.
pub const TICK_SECONDS: f32 = 0.01;

pub struct Stage {
    world: World,
    tick_schedule: Schedule,
    frame_schedule: Schedule,
    tick_seconds: f32,
    lag: f32,
}

impl Stage {
    /// Build a stage around a playback backend, with the default tick.
    pub fn new(playback: Playback) -> Self {
        Stage::with_tick(playback, TICK_SECONDS)
    }

    /// Build a stage with a custom fixed tick, for hosts that want a
    /// coarser simulation rate.
    pub fn with_tick(playback: Playback, tick_seconds: f32) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(InputBuffer::new());
        world.insert_resource(Cast::new());
        world.insert_resource(WorldSignals::default());
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(ActionScheduler::new());
        world.insert_resource(TimelineQueue::new());
        world.insert_resource(playback);
        world.init_resource::<Messages<AudioCmd>>();
        world.init_resource::<Messages<GradeCallout>>();

        world.spawn((
            Observer::new(observe_gamestate_change_event),
            Persistent,
        ));
        world.flush();

        let mut tick_schedule = Schedule::default();
        tick_schedule.add_systems(
            (
                drive_timeline,
                follow_targets,
                integrate,
                sync_skeletons,
                detect_collisions,
                reap_destroyed,
                age_input,
            )
                .chain(),
        );

        let mut frame_schedule = Schedule::default();
        frame_schedule.add_systems(run_actions);

        Stage {
            world,
            tick_schedule,
            frame_schedule,
            tick_seconds,
            lag: 0.0,
        }
    }

    /// Advance by one rendered frame: run the fixed ticks the lag covers,
    /// then the frame step. Returns the interpolation alpha in `[0, 1)`.
    pub fn advance(&mut self, frame_delta: f32) -> f32 {
        self.lag += frame_delta;
        while self.lag >= self.tick_seconds {
            self.tick();
            self.lag -= self.tick_seconds;
        }
        self.frame(frame_delta);
        self.lag / self.tick_seconds
    }

    /// Run exactly one fixed tick.
    pub fn tick(&mut self) {
        {
            let mut time = self.world.resource_mut::<WorldTime>();
            let scaled = self.tick_seconds * time.time_scale;
            time.delta = scaled;
            time.elapsed += scaled;
            time.tick_count += 1;
        }
        self.tick_schedule.run(&mut self.world);
    }

    /// Run the frame-rate step only. Mailbox messages stay buffered until
    /// the host drains them.
    pub fn frame(&mut self, delta: f32) {
        {
            let mut time = self.world.resource_mut::<WorldTime>();
            time.delta = delta * time.time_scale;
        }
        self.frame_schedule.run(&mut self.world);
    }

    /// Record a raw key-down from the host input layer.
    pub fn key_down(&mut self, key: KeyCode) {
        self.world.resource_mut::<InputBuffer>().key_down(key);
    }

    /// Route a typed character to the current timeline event.
    pub fn key_typed(&mut self, ch: char) {
        self.world
            .resource_scope(|world, mut queue: Mut<TimelineQueue>| {
                queue.key_typed(world, ch);
            });
    }

    /// Spawn a named character and register it in the cast.
    pub fn spawn_character(
        &mut self,
        name: &str,
        skeleton: &str,
        animation: &str,
        position: Vec2,
        depth: i32,
    ) -> Result<Entity, PlaybackError> {
        let handle = self
            .world
            .resource_mut::<Playback>()
            .load_skeleton(skeleton, animation)?;
        let entity = self
            .world
            .spawn((
                Position::new(position.x, position.y),
                Depth(depth),
                CharacterRig::new(name.to_string(), handle),
            ))
            .id();
        self.world.resource_mut::<Cast>().insert(name, entity);
        info!("spawned '{}' as {:?}", name, entity);
        Ok(entity)
    }

    /// Look up a cast member by name.
    pub fn find_character(&self, name: &str) -> Option<Entity> {
        self.world.resource::<Cast>().find(name)
    }

    /// Mark an entity for destruction at the end of the current tick.
    pub fn destroy(&mut self, entity: Entity) {
        if let Ok(mut e) = self.world.get_entity_mut(entity) {
            e.insert(Destroyed);
        }
    }

    /// Mark every stage entity for destruction; the reaper finalizes them
    /// on the next tick with the usual destruction events and cast
    /// cleanup. Entities tagged [`Persistent`] survive unless
    /// `clear_persistent`.
    pub fn clear(&mut self, clear_persistent: bool) {
        let mut doomed = Vec::new();
        let mut query = self
            .world
            .query_filtered::<(Entity, Option<&Persistent>), Or<(With<Position>, With<Depth>)>>();
        for (entity, persistent) in query.iter(&self.world) {
            if persistent.is_some() && !clear_persistent {
                continue;
            }
            doomed.push(entity);
        }
        info!("clearing {} entities", doomed.len());
        for entity in doomed {
            self.world.entity_mut(entity).insert(Destroyed);
        }
    }

    /// Entities in back-to-front draw order for the host renderer.
    pub fn draw_order(&mut self) -> Vec<Entity> {
        draw_order(&mut self.world)
    }

    /// Take all pending audio commands.
    pub fn drain_audio(&mut self) -> Vec<AudioCmd> {
        self.world
            .resource_mut::<Messages<AudioCmd>>()
            .drain()
            .collect()
    }

    /// Take all pending grade callouts.
    pub fn drain_grades(&mut self) -> Vec<GradeCallout> {
        self.world
            .resource_mut::<Messages<GradeCallout>>()
            .drain()
            .collect()
    }

    /// Whether the run has reached its terminal state.
    pub fn is_finished(&self) -> bool {
        *self.world.resource::<GameState>().get() == GameStates::Finished
    }

    pub fn timeline(&self) -> &TimelineQueue {
        self.world.resource::<TimelineQueue>()
    }

    pub fn timeline_mut(&mut self) -> Mut<'_, TimelineQueue> {
        self.world.resource_mut::<TimelineQueue>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::playback::SkeletonLibrary;

    fn library() -> SkeletonLibrary {
        let mut library = SkeletonLibrary::new();
        library.register("spine/game/player.json", [("stand", 1.0)]);
        library
    }

    #[test]
    fn test_advance_runs_whole_ticks_and_reports_alpha() {
        let mut stage = Stage::new(Playback::scripted(library()));
        let alpha = stage.advance(0.035);
        let time = stage.world().resource::<WorldTime>();
        assert_eq!(time.tick_count, 3);
        assert!((alpha - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_find_destroy_character() {
        let mut stage = Stage::new(Playback::scripted(library()));
        let entity = stage
            .spawn_character("player", "spine/game/player.json", "stand", Vec2::ZERO, 10)
            .unwrap();
        assert_eq!(stage.find_character("player"), Some(entity));

        stage.destroy(entity);
        stage.tick();
        assert_eq!(stage.find_character("player"), None);
        assert!(stage.world().get_entity(entity).is_err());
    }

    #[test]
    fn test_clear_respects_persistent() {
        let mut stage = Stage::new(Playback::scripted(library()));
        let transient = stage.world_mut().spawn(Depth(0)).id();
        let keeper = stage.world_mut().spawn((Depth(0), Persistent)).id();

        stage.clear(false);
        stage.tick();
        assert!(stage.world().get_entity(transient).is_err());
        assert!(stage.world().get_entity(keeper).is_ok());

        stage.clear(true);
        stage.tick();
        assert!(stage.world().get_entity(keeper).is_err());
    }

    #[test]
    fn test_unknown_skeleton_fails_spawn() {
        let mut stage = Stage::new(Playback::scripted(library()));
        let result =
            stage.spawn_character("ghost", "spine/game/ghost.json", "stand", Vec2::ZERO, 0);
        assert!(result.is_err());
    }
}

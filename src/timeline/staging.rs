//! Scene staging events.
//!
//! A staging event runs an explicit list of [`StagingStep`]s: spawn a
//! character, send it somewhere, play an animation, wait. Instant steps
//! run back to back; the three `Await*` steps suspend the list until
//! their condition holds, polled once per fixed tick. Steps address
//! characters through the [`Cast`] registry; referencing a name that was
//! never staged is a scripting bug and trips a debug assertion.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::{Entity, World};
use glam::Vec2;
use log::{debug, error};

use crate::components::body::Body;
use crate::components::character::CharacterRig;
use crate::components::depth::Depth;
use crate::components::destroyed::Destroyed;
use crate::components::follow::Follow;
use crate::components::position::Position;
use crate::events::audio::AudioCmd;
use crate::resources::cast::Cast;
use crate::resources::playback::Playback;
use crate::resources::worldtime::WorldTime;
use crate::timeline::event::Advance;

/// One instruction in a staging script.
#[derive(Debug, Clone)]
pub enum StagingStep {
    /// Load `skeleton` looping `animation`, spawn the character at
    /// `position` and register it under `name`.
    Spawn {
        name: String,
        skeleton: String,
        animation: String,
        position: Vec2,
        depth: i32,
    },
    /// Steer the named character toward `target` at `speed`.
    MoveTo {
        name: String,
        target: Vec2,
        speed: f32,
    },
    /// Suspend until the named character finishes its current move.
    AwaitArrival { name: String },
    /// Replace the animation on the named character's `track`.
    SetAnimation {
        name: String,
        track: i32,
        animation: String,
        looped: bool,
    },
    /// Queue an animation behind the current one on `track`, starting
    /// `delay` seconds after it ends plus up to `jitter` random seconds.
    /// The jitter keeps layered idle animations (blinks, sways) from
    /// phase-locking across characters.
    AddAnimation {
        name: String,
        track: i32,
        animation: String,
        looped: bool,
        delay: f32,
        jitter: f32,
    },
    /// Stop whatever plays on the named character's `track`.
    ClearTrack { name: String, track: i32 },
    /// Switch the named character's skin.
    SetSkin { name: String, skin: String },
    /// Suspend until a non-looping animation on `track` completes.
    AwaitAnimation { name: String, track: i32 },
    /// Suspend for a fixed time.
    AwaitSeconds(f32),
    /// Mirror the named character horizontally.
    FlipX { name: String, flipped: bool },
    /// Teleport the named character.
    Reposition { name: String, position: Vec2 },
    /// Fire a sound without waiting on it.
    PlaySound { sound: String },
    /// Mark the named character for destruction.
    Despawn { name: String },
}

/// A sequential staging script with suspension points.
#[derive(Debug, Clone)]
pub struct StagingEvent {
    steps: Vec<StagingStep>,
    index: usize,
    wait_timer: f32,
    timer_armed: bool,
    hold_at_end: bool,
}

impl StagingEvent {
    pub fn new(steps: Vec<StagingStep>) -> Self {
        StagingEvent {
            steps,
            index: 0,
            wait_timer: 0.0,
            timer_armed: false,
            hold_at_end: false,
        }
    }

    /// Keep the script on this event after the last step instead of
    /// advancing, until something else requests the advance.
    pub fn held(mut self) -> Self {
        self.hold_at_end = true;
        self
    }

    pub(crate) fn begin(&mut self, world: &mut World) -> Advance {
        self.index = 0;
        self.timer_armed = false;
        self.run(world, 0.0)
    }

    pub(crate) fn step(&mut self, world: &mut World) -> Advance {
        let delta = world.resource::<WorldTime>().delta;
        self.run(world, delta)
    }

    fn run(&mut self, world: &mut World, delta: f32) -> Advance {
        // the tick's delta feeds at most one timed wait
        let mut delta = delta;

        while self.index < self.steps.len() {
            let step = self.steps[self.index].clone();
            match step {
                StagingStep::Spawn {
                    name,
                    skeleton,
                    animation,
                    position,
                    depth,
                } => {
                    self.spawn(world, name, &skeleton, &animation, position, depth);
                }
                StagingStep::MoveTo {
                    name,
                    target,
                    speed,
                } => {
                    if let Some(entity) = self.member(world, &name) {
                        let mut e = world.entity_mut(entity);
                        e.insert_if_new(Body::new());
                        e.insert(Follow::new(target, speed));
                    }
                }
                StagingStep::AwaitArrival { name } => {
                    let moving = self
                        .member(world, &name)
                        .is_some_and(|e| world.get::<Follow>(e).is_some());
                    if moving {
                        return Advance::Pause;
                    }
                }
                StagingStep::SetAnimation {
                    name,
                    track,
                    animation,
                    looped,
                } => {
                    if let Some(handle) = self.rig(world, &name) {
                        if let Err(e) = world
                            .resource_mut::<Playback>()
                            .set_animation(handle, track, &animation, looped)
                        {
                            error!("staging: {}", e);
                        }
                    }
                }
                StagingStep::AddAnimation {
                    name,
                    track,
                    animation,
                    looped,
                    delay,
                    jitter,
                } => {
                    if let Some(handle) = self.rig(world, &name) {
                        let delay = delay + fastrand::f32() * jitter;
                        if let Err(e) = world
                            .resource_mut::<Playback>()
                            .add_animation(handle, track, &animation, looped, delay)
                        {
                            error!("staging: {}", e);
                        }
                    }
                }
                StagingStep::ClearTrack { name, track } => {
                    if let Some(handle) = self.rig(world, &name) {
                        world.resource_mut::<Playback>().clear_track(handle, track);
                    }
                }
                StagingStep::SetSkin { name, skin } => {
                    if let Some(entity) = self.member(world, &name) {
                        let handle = world.get_mut::<CharacterRig>(entity).map(|mut rig| {
                            rig.skin = Some(skin.clone());
                            rig.skeleton
                        });
                        if let Some(handle) = handle {
                            world.resource_mut::<Playback>().set_skin(handle, &skin);
                        }
                    }
                }
                StagingStep::AwaitAnimation { name, track } => {
                    let finished = match self.rig(world, &name) {
                        Some(handle) => world
                            .resource_mut::<Playback>()
                            .take_complete(handle, track),
                        // character gone, nothing left to wait for
                        None => true,
                    };
                    if !finished {
                        return Advance::Pause;
                    }
                }
                StagingStep::AwaitSeconds(seconds) => {
                    if !self.timer_armed {
                        self.wait_timer = seconds;
                        self.timer_armed = true;
                    }
                    self.wait_timer -= delta;
                    delta = 0.0;
                    if self.wait_timer > 0.0 {
                        return Advance::Pause;
                    }
                    self.timer_armed = false;
                }
                StagingStep::FlipX { name, flipped } => {
                    if let Some(entity) = self.member(world, &name) {
                        let handle = world.get_mut::<CharacterRig>(entity).map(|mut rig| {
                            rig.flipped_x = flipped;
                            rig.skeleton
                        });
                        if let Some(handle) = handle {
                            world.resource_mut::<Playback>().set_flip_x(handle, flipped);
                        }
                    }
                }
                StagingStep::Reposition { name, position } => {
                    if let Some(entity) = self.member(world, &name) {
                        if let Some(mut pos) = world.get_mut::<Position>(entity) {
                            pos.pos = position;
                        }
                    }
                }
                StagingStep::PlaySound { sound } => {
                    world
                        .resource_mut::<Messages<AudioCmd>>()
                        .write(AudioCmd::PlaySound { id: sound });
                }
                StagingStep::Despawn { name } => {
                    if let Some(entity) = self.member(world, &name) {
                        world.entity_mut(entity).insert(Destroyed);
                    }
                }
            }
            self.index += 1;
        }
        if self.hold_at_end {
            Advance::Pause
        } else {
            Advance::Now
        }
    }

    fn spawn(
        &self,
        world: &mut World,
        name: String,
        skeleton: &str,
        animation: &str,
        position: Vec2,
        depth: i32,
    ) {
        let handle = match world
            .resource_mut::<Playback>()
            .load_skeleton(skeleton, animation)
        {
            Ok(handle) => handle,
            Err(e) => {
                error!("staging: cannot spawn '{}': {}", name, e);
                return;
            }
        };
        let entity = world
            .spawn((
                Position::new(position.x, position.y),
                Depth(depth),
                CharacterRig::new(name.clone(), handle),
            ))
            .id();
        debug!("staged '{}' as {:?} at {:?}", name, entity, position);
        world.resource_mut::<Cast>().insert(name, entity);
    }

    fn member(&self, world: &World, name: &str) -> Option<Entity> {
        let entity = world.resource::<Cast>().find(name);
        debug_assert!(
            entity.is_some(),
            "staging references unknown character '{}'",
            name
        );
        entity
    }

    fn rig(
        &self,
        world: &World,
        name: &str,
    ) -> Option<crate::resources::playback::SkeletonHandle> {
        self.member(world, name)
            .and_then(|e| world.get::<CharacterRig>(e))
            .map(|rig| rig.skeleton)
    }
}

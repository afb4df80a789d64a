//! Skeletal-animation playback service.
//!
//! The real playback runtime (skeleton loading, mixing, rendering) is an
//! external collaborator. The simulation talks to it through the
//! [`SkeletonPlayback`] trait: load a skeleton by path, set or queue named
//! animations on numbered tracks, and receive completion/event notices.
//! Notices travel back over a crossbeam channel and are drained once per
//! fixed tick by the skeleton sync system, which records track completions
//! for the staging scripts to poll.
//!
//! [`ScriptedPlayback`] is a headless backend with fixed per-animation
//! durations, used by the demo binary and the test suites.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;

/// Opaque handle to a loaded skeleton instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeletonHandle(pub u32);

/// Notices emitted by the playback backend.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackNotice {
    /// A non-looping animation on `track` finished.
    Complete { handle: SkeletonHandle, track: i32 },
    /// A named user event keyed into the animation fired.
    Event {
        handle: SkeletonHandle,
        track: i32,
        name: String,
    },
}

/// Load-time configuration errors. Requesting an unregistered skeleton or
/// animation is fatal; there is no recovery path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    UnknownSkeleton(String),
    UnknownAnimation { skeleton: String, animation: String },
    StaleHandle(SkeletonHandle),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::UnknownSkeleton(path) => {
                write!(f, "unknown skeleton '{}'", path)
            }
            PlaybackError::UnknownAnimation {
                skeleton,
                animation,
            } => {
                write!(f, "unknown animation '{}' on skeleton '{}'", animation, skeleton)
            }
            PlaybackError::StaleHandle(handle) => {
                write!(f, "stale skeleton handle {:?}", handle)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Backend contract for skeletal-animation playback.
pub trait SkeletonPlayback: Send + Sync {
    /// Load a skeleton instance by logical path and start `animation`
    /// looping on track 0.
    fn load_skeleton(
        &mut self,
        path: &str,
        animation: &str,
    ) -> Result<SkeletonHandle, PlaybackError>;

    /// Replace whatever plays on `track`.
    fn set_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
    ) -> Result<(), PlaybackError>;

    /// Queue an animation on `track` to start `delay` seconds after the
    /// current one ends.
    fn add_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
        delay: f32,
    ) -> Result<(), PlaybackError>;

    fn clear_track(&mut self, handle: SkeletonHandle, track: i32);

    fn clear_all_tracks(&mut self, handle: SkeletonHandle);

    fn set_skin(&mut self, handle: SkeletonHandle, skin: &str);

    fn set_flip_x(&mut self, handle: SkeletonHandle, flipped: bool);

    /// Push the owning entity's world position into the skeleton.
    fn set_position(&mut self, handle: SkeletonHandle, x: f32, y: f32);

    fn unload(&mut self, handle: SkeletonHandle);

    /// Advance playback by `delta` seconds. Completion/event notices are
    /// posted through the notice channel given at construction.
    fn update(&mut self, delta: f32);
}

/// Playback service resource: backend plus the notice bridge and the
/// per-track completion bookkeeping the staging scripts poll.
#[derive(Resource)]
pub struct Playback {
    backend: Box<dyn SkeletonPlayback>,
    rx_notice: Receiver<PlaybackNotice>,
    completed: FxHashSet<(SkeletonHandle, i32)>,
}

impl Playback {
    /// Wrap a backend built around the sender half of `channel`.
    pub fn new(backend: Box<dyn SkeletonPlayback>, rx_notice: Receiver<PlaybackNotice>) -> Self {
        Playback {
            backend,
            rx_notice,
            completed: FxHashSet::default(),
        }
    }

    /// Convenience constructor for the scripted backend.
    pub fn scripted(library: SkeletonLibrary) -> Self {
        let (tx, rx) = unbounded();
        Playback::new(Box::new(ScriptedPlayback::new(library, tx)), rx)
    }

    pub fn load_skeleton(
        &mut self,
        path: &str,
        animation: &str,
    ) -> Result<SkeletonHandle, PlaybackError> {
        self.backend.load_skeleton(path, animation)
    }

    pub fn set_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
    ) -> Result<(), PlaybackError> {
        // a fresh animation invalidates any stale completion on the track
        self.completed.remove(&(handle, track));
        self.backend.set_animation(handle, track, animation, looped)
    }

    pub fn add_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
        delay: f32,
    ) -> Result<(), PlaybackError> {
        self.backend.add_animation(handle, track, animation, looped, delay)
    }

    pub fn clear_track(&mut self, handle: SkeletonHandle, track: i32) {
        self.completed.remove(&(handle, track));
        self.backend.clear_track(handle, track);
    }

    pub fn clear_all_tracks(&mut self, handle: SkeletonHandle) {
        self.completed.retain(|(h, _)| *h != handle);
        self.backend.clear_all_tracks(handle);
    }

    pub fn set_skin(&mut self, handle: SkeletonHandle, skin: &str) {
        self.backend.set_skin(handle, skin);
    }

    pub fn set_flip_x(&mut self, handle: SkeletonHandle, flipped: bool) {
        self.backend.set_flip_x(handle, flipped);
    }

    pub fn set_position(&mut self, handle: SkeletonHandle, x: f32, y: f32) {
        self.backend.set_position(handle, x, y);
    }

    pub fn unload(&mut self, handle: SkeletonHandle) {
        self.completed.retain(|(h, _)| *h != handle);
        self.backend.unload(handle);
    }

    /// Advance the backend and drain its notices into the completion set.
    /// Returns the raw notices for observers that care about named events.
    pub fn update(&mut self, delta: f32) -> Vec<PlaybackNotice> {
        self.backend.update(delta);
        let notices: Vec<PlaybackNotice> = self.rx_notice.try_iter().collect();
        for notice in &notices {
            if let PlaybackNotice::Complete { handle, track } = notice {
                self.completed.insert((*handle, *track));
            }
        }
        notices
    }

    /// Consume a recorded completion for `(handle, track)`. Returns true
    /// at most once per completed animation.
    pub fn take_complete(&mut self, handle: SkeletonHandle, track: i32) -> bool {
        self.completed.remove(&(handle, track))
    }
}

/// Registered skeletons for the scripted backend: path -> animation name
/// -> duration in seconds.
#[derive(Debug, Clone, Default)]
pub struct SkeletonLibrary {
    skeletons: FxHashMap<String, FxHashMap<String, f32>>,
}

impl SkeletonLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skeleton with its animations and durations.
    pub fn register<'a>(
        &mut self,
        path: impl Into<String>,
        animations: impl IntoIterator<Item = (&'a str, f32)>,
    ) {
        let map = animations
            .into_iter()
            .map(|(name, duration)| (name.to_string(), duration))
            .collect();
        self.skeletons.insert(path.into(), map);
    }

    fn duration(&self, path: &str, animation: &str) -> Result<f32, PlaybackError> {
        let animations = self
            .skeletons
            .get(path)
            .ok_or_else(|| PlaybackError::UnknownSkeleton(path.to_string()))?;
        animations
            .get(animation)
            .copied()
            .ok_or_else(|| PlaybackError::UnknownAnimation {
                skeleton: path.to_string(),
                animation: animation.to_string(),
            })
    }
}

struct TrackState {
    animation: String,
    looped: bool,
    remaining: f32,
    /// Queued follow-ups: (animation, looped, delay before start).
    queue: Vec<(String, bool, f32)>,
    /// Delay still to elapse before the current animation starts.
    lead_in: f32,
}

struct Instance {
    path: String,
    tracks: FxHashMap<i32, TrackState>,
}

/// Headless playback backend with scripted per-animation durations.
pub struct ScriptedPlayback {
    library: SkeletonLibrary,
    instances: FxHashMap<SkeletonHandle, Instance>,
    next_handle: u32,
    tx_notice: Sender<PlaybackNotice>,
}

impl ScriptedPlayback {
    pub fn new(library: SkeletonLibrary, tx_notice: Sender<PlaybackNotice>) -> Self {
        ScriptedPlayback {
            library,
            instances: FxHashMap::default(),
            next_handle: 0,
            tx_notice,
        }
    }

    fn instance_mut(&mut self, handle: SkeletonHandle) -> Result<&mut Instance, PlaybackError> {
        self.instances
            .get_mut(&handle)
            .ok_or(PlaybackError::StaleHandle(handle))
    }
}

impl SkeletonPlayback for ScriptedPlayback {
    fn load_skeleton(
        &mut self,
        path: &str,
        animation: &str,
    ) -> Result<SkeletonHandle, PlaybackError> {
        let duration = self.library.duration(path, animation)?;
        let handle = SkeletonHandle(self.next_handle);
        self.next_handle += 1;

        let mut tracks = FxHashMap::default();
        tracks.insert(
            0,
            TrackState {
                animation: animation.to_string(),
                looped: true,
                remaining: duration,
                queue: Vec::new(),
                lead_in: 0.0,
            },
        );
        self.instances.insert(
            handle,
            Instance {
                path: path.to_string(),
                tracks,
            },
        );
        Ok(handle)
    }

    fn set_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
    ) -> Result<(), PlaybackError> {
        let path = self.instance_mut(handle)?.path.clone();
        let duration = self.library.duration(&path, animation)?;
        let instance = self.instance_mut(handle)?;
        instance.tracks.insert(
            track,
            TrackState {
                animation: animation.to_string(),
                looped,
                remaining: duration,
                queue: Vec::new(),
                lead_in: 0.0,
            },
        );
        Ok(())
    }

    fn add_animation(
        &mut self,
        handle: SkeletonHandle,
        track: i32,
        animation: &str,
        looped: bool,
        delay: f32,
    ) -> Result<(), PlaybackError> {
        let path = self.instance_mut(handle)?.path.clone();
        // validate up front so a bad name fails at queue time, not mid-scene
        let duration = self.library.duration(&path, animation)?;
        let instance = self.instance_mut(handle)?;
        match instance.tracks.get_mut(&track) {
            Some(state) => state.queue.push((animation.to_string(), looped, delay)),
            None => {
                instance.tracks.insert(
                    track,
                    TrackState {
                        animation: animation.to_string(),
                        looped,
                        remaining: duration,
                        queue: Vec::new(),
                        lead_in: delay,
                    },
                );
            }
        }
        Ok(())
    }

    fn clear_track(&mut self, handle: SkeletonHandle, track: i32) {
        if let Some(instance) = self.instances.get_mut(&handle) {
            instance.tracks.remove(&track);
        }
    }

    fn clear_all_tracks(&mut self, handle: SkeletonHandle) {
        if let Some(instance) = self.instances.get_mut(&handle) {
            instance.tracks.clear();
        }
    }

    fn set_skin(&mut self, _handle: SkeletonHandle, _skin: &str) {}

    fn set_flip_x(&mut self, _handle: SkeletonHandle, _flipped: bool) {}

    fn set_position(&mut self, _handle: SkeletonHandle, _x: f32, _y: f32) {}

    fn unload(&mut self, handle: SkeletonHandle) {
        self.instances.remove(&handle);
    }

    fn update(&mut self, delta: f32) {
        for (&handle, instance) in self.instances.iter_mut() {
            for (&track, state) in instance.tracks.iter_mut() {
                // only the part of the tick left after the lead-in counts
                let delta = if state.lead_in > 0.0 {
                    state.lead_in -= delta;
                    if state.lead_in > 0.0 {
                        continue;
                    }
                    let leftover = -state.lead_in;
                    state.lead_in = 0.0;
                    leftover
                } else {
                    delta
                };

                state.remaining -= delta;
                if state.remaining > 0.0 {
                    continue;
                }

                if state.looped {
                    let duration = self
                        .library
                        .duration(&instance.path, &state.animation)
                        .unwrap_or(0.0)
                        .max(1e-3);
                    while state.remaining <= 0.0 {
                        state.remaining += duration;
                    }
                    continue;
                }

                let _ = self.tx_notice.send(PlaybackNotice::Complete { handle, track });

                if state.queue.is_empty() {
                    // finished, hold the last frame
                    state.remaining = f32::INFINITY;
                } else {
                    let (animation, looped, lead_in) = state.queue.remove(0);
                    let duration = self
                        .library
                        .duration(&instance.path, &animation)
                        .unwrap_or(0.0);
                    state.animation = animation;
                    state.looped = looped;
                    state.remaining = duration;
                    state.lead_in = lead_in;
                }
            }
        }
    }
}

//! Timeline event queue.
//!
//! The queue owns the narrative script and a cursor over it. Exactly one
//! event is current at a time; the driver polls it each fixed tick and
//! advances the cursor whenever the event (or an action it scheduled)
//! asks for it. Advancement is never re-entrant: events report
//! [`Advance::Now`] or set the pending flag, and the driver loop drains
//! chained advances itself, so an event that completes immediately never
//! calls back into the queue.

use bevy_ecs::prelude::{Resource, World};
use log::{debug, info};

use crate::timeline::event::{Advance, TimelineEvent};

/// Script queue with a single cursor.
#[derive(Resource, Default)]
pub struct TimelineQueue {
    events: Vec<TimelineEvent>,
    cursor: Option<usize>,
    started: bool,
    exhausted: bool,
    pending_advance: bool,
}

impl TimelineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the end of the script.
    pub fn add(&mut self, event: impl Into<TimelineEvent>) -> &mut Self {
        self.events.push(event.into());
        self
    }

    /// Index of the current event, if the script is running.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the script has run past its last event.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Request an advance from outside the event itself, typically from a
    /// completed action. Applied on the next drive.
    pub fn request_advance(&mut self) {
        self.pending_advance = true;
    }

    /// Drop the script and reset the cursor.
    pub fn clear(&mut self) {
        self.events.clear();
        self.cursor = None;
        self.started = false;
        self.exhausted = false;
        self.pending_advance = false;
    }

    /// End the current event (if any), move the cursor and begin the
    /// incoming event. Returns the new index, or `None` once the script
    /// is exhausted. The first call begins event 0.
    pub fn next(&mut self, world: &mut World) -> Option<usize> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.events.is_empty() {
                info!("timeline: empty script, finishing immediately");
                self.exhausted = true;
                return None;
            }
            self.cursor = Some(0);
            debug!("timeline: begin event 0");
            if self.events[0].begin(world) == Advance::Now {
                self.pending_advance = true;
            }
            return Some(0);
        }

        let index = self.cursor?;
        self.events[index].end(world);
        let next = index + 1;
        if next >= self.events.len() {
            info!("timeline: script exhausted after event {}", index);
            self.cursor = None;
            self.exhausted = true;
            return None;
        }
        debug!("timeline: begin event {}", next);
        self.cursor = Some(next);
        if self.events[next].begin(world) == Advance::Now {
            self.pending_advance = true;
        }
        Some(next)
    }

    /// Poll the current event only. A no-op while the script has not
    /// started or after it is exhausted.
    pub fn step(&mut self, world: &mut World) {
        if let Some(index) = self.cursor {
            if self.events[index].step(world) == Advance::Now {
                self.pending_advance = true;
            }
        }
    }

    /// Run the queue for one fixed tick: start it if needed, poll the
    /// current event, and drain any chain of immediate advances.
    ///
    /// Call through [`bevy_ecs::prelude::World::resource_scope`] so the
    /// events get the rest of the world.
    pub fn drive(&mut self, world: &mut World) {
        if self.exhausted {
            return;
        }
        if !self.started && self.next(world).is_none() {
            return;
        }

        loop {
            if self.cursor.is_none() {
                return;
            }
            self.step(world);
            if !self.pending_advance {
                return;
            }
            self.pending_advance = false;
            if self.next(world).is_none() {
                return;
            }
        }
    }

    /// Route a typed character to the current event.
    pub fn key_typed(&mut self, world: &mut World, ch: char) {
        if let Some(index) = self.cursor {
            if self.events[index].key_typed(world, ch) == Advance::Now {
                self.pending_advance = true;
            }
        }
    }
}

//! Timeline event kinds.
//!
//! A narrative script is a sequence of [`TimelineEvent`]s driven by the
//! [`crate::timeline::queue::TimelineQueue`]. Each event gets three
//! entry points: `begin` when the cursor reaches it, `step` once per
//! fixed tick while it is current, and `end` when the queue moves past
//! it. All three report whether the queue should advance now or keep
//! waiting; waiting events resume either from their own `step`/typing
//! logic or from a scheduled action requesting an advance.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::World;
use log::debug;

use crate::events::audio::AudioCmd;
use crate::events::grade::{Grade, GradeCallout};
use crate::resources::actions::{Action, ActionId, ActionScheduler, Then};
use crate::resources::worldsignals::WorldSignals;
use crate::timeline::staging::StagingEvent;

/// Extra typing time granted on top of a text event's base allotment.
pub const TIME_HANDICAP: f32 = 1.0;

/// Whether the queue should move to the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Finish this event and begin the next one immediately.
    Now,
    /// Stay on this event until something requests an advance.
    Pause,
}

/// How a text event treats a wrongly typed character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorPolicy {
    /// Wrong keys are dropped on the floor.
    Ignore,
    /// Every wrong key burns `seconds` off the countdown.
    Penalize { seconds: f32 },
}

/// Prompt the player to type `text` within `time` seconds (plus the
/// handicap). Grades the remaining time when typing completes.
#[derive(Debug, Clone)]
pub struct TextEvent {
    pub text: String,
    pub time: f32,
    pub error_policy: ErrorPolicy,
    typed: usize,
    countdown: Option<ActionId>,
}

impl TextEvent {
    pub fn new(text: impl Into<String>, time: f32, error_policy: ErrorPolicy) -> Self {
        TextEvent {
            text: text.into(),
            time,
            error_policy,
            typed: 0,
            countdown: None,
        }
    }

    fn begin(&mut self, world: &mut World) -> Advance {
        if self.text.is_empty() {
            return Advance::Now;
        }
        let duration = self.time + TIME_HANDICAP;
        let id = world.resource_mut::<ActionScheduler>().schedule(
            Action::Countdown {
                duration,
                elapsed: 0.0,
            },
            Then::Nothing,
        );
        self.countdown = Some(id);
        self.typed = 0;

        let mut signals = world.resource_mut::<WorldSignals>();
        signals.set_string("text_prompt", self.text.clone());
        signals.set_integer("text_typed", 0);
        signals.set_scalar("text_progress", 1.0);
        signals.set_scalar("text_time_left", duration);
        Advance::Pause
    }

    fn key_typed(&mut self, world: &mut World, ch: char) -> Advance {
        let expected = self.text.chars().nth(self.typed);
        match expected {
            Some(e) if e == ch => {
                self.typed += 1;
                world
                    .resource_mut::<WorldSignals>()
                    .set_integer("text_typed", self.typed as i32);
                if self.typed == self.text.chars().count() {
                    return self.finish(world);
                }
                Advance::Pause
            }
            Some(_) => {
                if let ErrorPolicy::Penalize { seconds } = self.error_policy {
                    if let Some(id) = self.countdown {
                        world.resource_mut::<ActionScheduler>().penalize(id, seconds);
                    }
                }
                Advance::Pause
            }
            None => Advance::Pause,
        }
    }

    fn finish(&mut self, world: &mut World) -> Advance {
        let remaining = world
            .resource::<WorldSignals>()
            .get_scalar("text_time_left")
            .unwrap_or(0.0);
        if let Some(id) = self.countdown.take() {
            world.resource_mut::<ActionScheduler>().cancel(id);
        }

        let grade = Grade::from_remaining(remaining);
        debug!("text '{}' completed, {:.2}s left, grade {:?}", self.text, remaining, grade);
        world
            .resource_mut::<Messages<GradeCallout>>()
            .write(GradeCallout { grade, remaining });
        world
            .resource_mut::<WorldSignals>()
            .add_integer("score", (remaining * 100.0).round() as i32);
        Advance::Now
    }

    fn end(&mut self, world: &mut World) {
        if let Some(id) = self.countdown.take() {
            world.resource_mut::<ActionScheduler>().cancel(id);
        }
        let mut signals = world.resource_mut::<WorldSignals>();
        signals.set_string("text_prompt", "");
        signals.set_integer("text_typed", 0);
    }
}

/// Hold the script for `seconds`, then advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayEvent {
    pub seconds: f32,
}

impl DelayEvent {
    pub fn new(seconds: f32) -> Self {
        DelayEvent { seconds }
    }

    fn begin(&mut self, world: &mut World) -> Advance {
        if self.seconds <= 0.0 {
            return Advance::Now;
        }
        world.resource_mut::<ActionScheduler>().schedule(
            Action::Delay {
                remaining: self.seconds,
            },
            Then::AdvanceTimeline,
        );
        Advance::Pause
    }
}

/// Start a sound. With a duration, the script waits that long before
/// advancing; without one, the sound plays over whatever follows.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    pub sound: String,
    pub duration: Option<f32>,
}

impl AudioEvent {
    pub fn play(sound: impl Into<String>) -> Self {
        AudioEvent {
            sound: sound.into(),
            duration: None,
        }
    }

    pub fn play_for(sound: impl Into<String>, duration: f32) -> Self {
        AudioEvent {
            sound: sound.into(),
            duration: Some(duration),
        }
    }

    fn begin(&mut self, world: &mut World) -> Advance {
        world
            .resource_mut::<Messages<AudioCmd>>()
            .write(AudioCmd::PlaySound {
                id: self.sound.clone(),
            });
        match self.duration {
            Some(duration) => {
                world.resource_mut::<ActionScheduler>().schedule(
                    Action::Delay {
                        remaining: duration,
                    },
                    Then::AdvanceTimeline,
                );
                Advance::Pause
            }
            None => Advance::Now,
        }
    }
}

/// Terminal event: flag the run as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameEndEvent;

impl GameEndEvent {
    fn begin(&mut self, world: &mut World) -> Advance {
        use crate::events::gamestate::GameStateChangedEvent;
        use crate::resources::gamestate::{GameStates, NextGameState};

        world
            .resource_mut::<NextGameState>()
            .set(GameStates::Finished);
        world.trigger(GameStateChangedEvent {});
        Advance::Now
    }
}

/// One step of a narrative script.
#[derive(Debug, Clone)]
pub enum TimelineEvent {
    Text(TextEvent),
    Delay(DelayEvent),
    Audio(AudioEvent),
    Staging(StagingEvent),
    GameEnd(GameEndEvent),
}

impl TimelineEvent {
    /// The cursor just reached this event.
    pub fn begin(&mut self, world: &mut World) -> Advance {
        match self {
            TimelineEvent::Text(e) => e.begin(world),
            TimelineEvent::Delay(e) => e.begin(world),
            TimelineEvent::Audio(e) => e.begin(world),
            TimelineEvent::Staging(e) => e.begin(world),
            TimelineEvent::GameEnd(e) => e.begin(world),
        }
    }

    /// Polled once per fixed tick while this event is current.
    pub fn step(&mut self, world: &mut World) -> Advance {
        match self {
            TimelineEvent::Staging(e) => e.step(world),
            _ => Advance::Pause,
        }
    }

    /// A character was typed while this event is current.
    pub fn key_typed(&mut self, world: &mut World, ch: char) -> Advance {
        match self {
            TimelineEvent::Text(e) => e.key_typed(world, ch),
            _ => Advance::Pause,
        }
    }

    /// The queue is moving past this event.
    pub fn end(&mut self, world: &mut World) {
        if let TimelineEvent::Text(e) = self {
            e.end(world);
        }
    }
}

impl From<TextEvent> for TimelineEvent {
    fn from(e: TextEvent) -> Self {
        TimelineEvent::Text(e)
    }
}

impl From<DelayEvent> for TimelineEvent {
    fn from(e: DelayEvent) -> Self {
        TimelineEvent::Delay(e)
    }
}

impl From<AudioEvent> for TimelineEvent {
    fn from(e: AudioEvent) -> Self {
        TimelineEvent::Audio(e)
    }
}

impl From<StagingEvent> for TimelineEvent {
    fn from(e: StagingEvent) -> Self {
        TimelineEvent::Staging(e)
    }
}

impl From<GameEndEvent> for TimelineEvent {
    fn from(e: GameEndEvent) -> Self {
        TimelineEvent::GameEnd(e)
    }
}

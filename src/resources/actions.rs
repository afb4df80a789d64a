//! Frame-rate action scheduler.
//!
//! Timeline events and sound fades need work spread across rendered
//! frames rather than fixed ticks: a delay that advances the script when
//! it expires, a sound whose volume eases to zero, a typing countdown
//! that feeds the on-screen progress bar. The scheduler owns these
//! actions and advances them from [`crate::systems::actions::run_actions`]
//! once per frame; it never touches the world itself, it emits
//! [`ActionCue`]s the caller applies.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::math::circle_out;

/// Stable identity of a scheduled action, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(u64);

/// What to do when an action runs to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Then {
    #[default]
    Nothing,
    /// Ask the timeline queue to advance to its next event.
    AdvanceTimeline,
}

/// A unit of deferred, frame-advanced work.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Wait `remaining` seconds, then run the completion.
    Delay { remaining: f32 },
    /// Ease the volume of `sound` from full to silence over `duration`
    /// seconds, then stop it.
    SoundFade {
        sound: String,
        duration: f32,
        life: f32,
    },
    /// Typing countdown over `duration` seconds. Publishes the signals
    /// `text_progress` (1.0 down to 0.0) and `text_time_left` every
    /// frame. Typing errors can push `elapsed` forward via
    /// [`ActionScheduler::penalize`].
    Countdown {
        duration: f32,
        elapsed: f32,
    },
}

/// Side effects the caller applies after advancing the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionCue {
    SetVolume { sound: String, volume: f32 },
    StopSound { sound: String },
    SignalScalar { key: String, value: f32 },
    AdvanceTimeline,
}

struct Scheduled {
    action: Action,
    then: Then,
}

/// Owns and advances all live actions.
#[derive(Resource, Default)]
pub struct ActionScheduler {
    actions: FxHashMap<ActionId, Scheduled>,
    next_id: u64,
}

impl ActionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action, returning its id.
    pub fn schedule(&mut self, action: Action, then: Then) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.actions.insert(id, Scheduled { action, then });
        id
    }

    /// Cancel an action without running its completion. Returns whether
    /// it was still live.
    pub fn cancel(&mut self, id: ActionId) -> bool {
        self.actions.remove(&id).is_some()
    }

    pub fn is_active(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drop everything, completions included. Used on scene clear.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Push a countdown's elapsed time forward as a typing-error penalty.
    pub fn penalize(&mut self, id: ActionId, seconds: f32) {
        if let Some(scheduled) = self.actions.get_mut(&id) {
            if let Action::Countdown { elapsed, .. } = &mut scheduled.action {
                *elapsed += seconds;
            }
        }
    }

    /// Advance every live action by `delta` seconds and collect the cues
    /// to apply. Finished actions are removed after their completion cue.
    pub fn advance(&mut self, delta: f32) -> Vec<ActionCue> {
        let mut cues = Vec::new();
        let mut done = Vec::new();

        // iterate in id order so cue order is deterministic
        let mut ids: Vec<ActionId> = self.actions.keys().copied().collect();
        ids.sort_unstable_by_key(|id| id.0);

        for id in ids {
            let Some(scheduled) = self.actions.get_mut(&id) else {
                continue;
            };
            let finished = match &mut scheduled.action {
                Action::Delay { remaining } => {
                    *remaining -= delta;
                    *remaining <= 0.0
                }
                Action::SoundFade {
                    sound,
                    duration,
                    life,
                } => {
                    *life += delta;
                    let t = (*life / *duration).clamp(0.0, 1.0);
                    let volume = 1.0 - circle_out(t);
                    if *life >= *duration {
                        cues.push(ActionCue::StopSound {
                            sound: sound.clone(),
                        });
                        true
                    } else {
                        cues.push(ActionCue::SetVolume {
                            sound: sound.clone(),
                            volume,
                        });
                        false
                    }
                }
                Action::Countdown { duration, elapsed } => {
                    *elapsed += delta;
                    let left = (*duration - *elapsed).max(0.0);
                    let progress = if *duration > 0.0 {
                        (left / *duration).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    cues.push(ActionCue::SignalScalar {
                        key: "text_progress".to_string(),
                        value: progress,
                    });
                    cues.push(ActionCue::SignalScalar {
                        key: "text_time_left".to_string(),
                        value: left,
                    });
                    // stays live at zero; typing completion cancels it
                    false
                }
            };

            if finished {
                if scheduled.then == Then::AdvanceTimeline {
                    cues.push(ActionCue::AdvanceTimeline);
                }
                done.push(id);
            }
        }

        for id in done {
            self.actions.remove(&id);
        }
        cues
    }
}

//! Frame-rate action pump.
//!
//! Advances the [`ActionScheduler`] once per rendered frame and applies
//! the cues it emits: volume ramps and stops go to the audio mailbox,
//! countdown readouts to [`WorldSignals`], and delay completions to the
//! timeline queue as advance requests.

use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::resources::actions::{ActionCue, ActionScheduler};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::timeline::queue::TimelineQueue;

pub fn run_actions(
    time: Res<WorldTime>,
    mut scheduler: ResMut<ActionScheduler>,
    mut signals: ResMut<WorldSignals>,
    mut queue: ResMut<TimelineQueue>,
    mut audio: MessageWriter<AudioCmd>,
) {
    for cue in scheduler.advance(time.delta) {
        match cue {
            ActionCue::SetVolume { sound, volume } => {
                audio.write(AudioCmd::SetVolume {
                    id: sound,
                    vol: volume,
                });
            }
            ActionCue::StopSound { sound } => {
                audio.write(AudioCmd::StopSound { id: sound });
            }
            ActionCue::SignalScalar { key, value } => signals.set_scalar(key, value),
            ActionCue::AdvanceTimeline => queue.request_advance(),
        }
    }
}

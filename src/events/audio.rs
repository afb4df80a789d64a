//! Audio command mailbox.
//!
//! Audio mixing is an external collaborator: the runtime never touches a
//! sound device, it only writes [`AudioCmd`] messages. The host drains the
//! `Messages<AudioCmd>` mailbox once per rendered frame and forwards the
//! commands to its mixer. The sound fader drives `SetVolume`/`StopSound`
//! through this same channel.

use bevy_ecs::message::Message;

/// Commands sent to the host's audio layer.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Start playback of a named sound effect.
    PlaySound { id: String },
    /// Set the volume of a playing sound, 0.0 to 1.0.
    SetVolume { id: String, vol: f32 },
    /// Stop a playing sound.
    StopSound { id: String },
    /// Start a music track, optionally looped.
    PlayMusic { id: String, looped: bool },
    /// Stop a music track.
    StopMusic { id: String },
}

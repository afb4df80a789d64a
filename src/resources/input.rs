//! Buffered keyboard input resource.
//!
//! The host's input layer feeds raw key-down events into [`InputBuffer`];
//! gameplay code queries "just pressed this tick" and a rolling key
//! sequence for combo detection. The buffer is aged once per fixed tick:
//! the just-pressed set clears every tick, and the key sequence clears
//! after [`KEY_SEQUENCE_COOLDOWN`] seconds without a keystroke.

use bevy_ecs::prelude::Resource;
use smallvec::SmallVec;

/// Keycode as delivered by the host input layer.
pub type KeyCode = i32;

/// Wildcard keycode matching any key in [`InputBuffer::is_key_just_pressed`].
pub const ANY_KEY: KeyCode = -1;

/// Idle timeout after which the combo sequence buffer clears, in seconds.
pub const KEY_SEQUENCE_COOLDOWN: f32 = 0.25;

/// Per-tick just-pressed buffer plus a decaying combo sequence.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputBuffer {
    keys_just_pressed: SmallVec<[KeyCode; 8]>,
    key_sequence: SmallVec<[KeyCode; 16]>,
    sequence_timer: f32,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down event from the host input layer.
    pub fn key_down(&mut self, keycode: KeyCode) {
        self.keys_just_pressed.push(keycode);
        self.key_sequence.push(keycode);
        self.sequence_timer = KEY_SEQUENCE_COOLDOWN;
    }

    /// Age the buffers by one tick: clear the just-pressed set and decay
    /// the combo sequence toward its idle timeout.
    pub fn age(&mut self, delta: f32) {
        self.keys_just_pressed.clear();

        self.sequence_timer -= delta;
        if self.sequence_timer < 0.0 {
            self.sequence_timer = 0.0;
            self.key_sequence.clear();
        }
    }

    /// Whether `keycode` was pressed during the current tick. [`ANY_KEY`]
    /// matches any keystroke.
    pub fn is_key_just_pressed(&self, keycode: KeyCode) -> bool {
        if keycode == ANY_KEY {
            return !self.keys_just_pressed.is_empty();
        }
        self.keys_just_pressed.contains(&keycode)
    }

    /// The rolling key sequence since the last idle timeout.
    pub fn key_sequence(&self) -> &[KeyCode] {
        &self.key_sequence
    }

    /// Whether the rolling sequence ends with `combo`.
    pub fn sequence_ends_with(&self, combo: &[KeyCode]) -> bool {
        if combo.is_empty() || combo.len() > self.key_sequence.len() {
            return false;
        }
        self.key_sequence[self.key_sequence.len() - combo.len()..] == *combo
    }
}

//! Global signal storage resource.
//!
//! A world-wide signal map for cross-system communication. The timeline
//! and action systems publish values the host UI reads back each frame:
//! `text_progress` (depleting progress bar, 1.0 to 0.0), `text_time_left`
//! (remaining-time proxy used for grading) and the running score.

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};

/// Scalar/integer/string/flag signals addressed by string keys.
#[derive(Debug, Clone, Resource, Default)]
pub struct WorldSignals {
    scalars: FxHashMap<String, f32>,
    integers: FxHashMap<String, i32>,
    strings: FxHashMap<String, String>,
    flags: FxHashSet<String>,
}

impl WorldSignals {
    /// Set a floating-point signal value.
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }

    /// Get a floating-point signal by key.
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }

    /// Set an integer signal value.
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }

    /// Get an integer signal by key.
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }

    /// Add to an integer signal, treating a missing key as zero.
    pub fn add_integer(&mut self, key: impl Into<String>, amount: i32) {
        *self.integers.entry(key.into()).or_insert(0) += amount;
    }

    /// Set a string signal value.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Get a string signal by key.
    pub fn get_string(&self, key: &str) -> Option<&String> {
        self.strings.get(key)
    }

    /// Mark a flag as present/true.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }

    /// Remove a flag (make it false/absent).
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }

    /// Check whether a flag is present/true.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip() {
        let mut signals = WorldSignals::default();
        signals.set_scalar("text_progress", 0.5);
        assert_eq!(signals.get_scalar("text_progress"), Some(0.5));
        assert_eq!(signals.get_scalar("missing"), None);
    }

    #[test]
    fn test_add_integer_from_missing() {
        let mut signals = WorldSignals::default();
        signals.add_integer("score", 100);
        signals.add_integer("score", -30);
        assert_eq!(signals.get_integer("score"), Some(70));
    }

    #[test]
    fn test_flags() {
        let mut signals = WorldSignals::default();
        assert!(!signals.has_flag("cutscene"));
        signals.set_flag("cutscene");
        assert!(signals.has_flag("cutscene"));
        signals.clear_flag("cutscene");
        assert!(!signals.has_flag("cutscene"));
    }

    #[test]
    fn test_strings() {
        let mut signals = WorldSignals::default();
        signals.set_string("scene", "briefing");
        assert_eq!(signals.get_string("scene").map(String::as_str), Some("briefing"));
    }
}

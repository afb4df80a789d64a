//! Settings and key-binding persistence.
//!
//! Two flat JSON files: a key/value settings store (booleans, integers,
//! floats, strings under one object) and an `action -> keycode` map for
//! remapped input bindings. Both load leniently (a missing file yields
//! defaults) and save with `flush`, which writes the whole object.

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::input::KeyCode;

/// JSON-backed key/value store for game settings.
#[derive(Resource, Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Settings {
    /// Open the settings store at `path`, loading the file if it exists.
    ///
    /// A malformed file is an error; a missing one is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let values = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read settings file: {}", e))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("failed to parse settings file: {}", e))?
        } else {
            Map::new()
        };
        Ok(Settings { path, values })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn put_bool(&mut self, key: impl Into<String>, val: bool) -> &mut Self {
        self.values.insert(key.into(), Value::Bool(val));
        self
    }

    pub fn put_int(&mut self, key: impl Into<String>, val: i64) -> &mut Self {
        self.values.insert(key.into(), Value::from(val));
        self
    }

    pub fn put_float(&mut self, key: impl Into<String>, val: f64) -> &mut Self {
        self.values.insert(key.into(), Value::from(val));
        self
    }

    pub fn put_string(&mut self, key: impl Into<String>, val: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), Value::String(val.into()));
        self
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.values.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Write the whole store to disk as pretty-printed JSON.
    pub fn flush(&self) -> Result<(), String> {
        let text = serde_json::to_string_pretty(&Value::Object(self.values.clone()))
            .map_err(|e| format!("failed to serialize settings: {}", e))?;
        std::fs::write(&self.path, text)
            .map_err(|e| format!("failed to write settings file: {}", e))
    }
}

/// Gameplay actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Left,
    Right,
    Up,
    Down,
    Shoot,
    Bomb,
    Shield,
}

impl KeyAction {
    pub const ALL: [KeyAction; 7] = [
        KeyAction::Left,
        KeyAction::Right,
        KeyAction::Up,
        KeyAction::Down,
        KeyAction::Shoot,
        KeyAction::Bomb,
        KeyAction::Shield,
    ];

    /// Stable name used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Left => "LEFT",
            KeyAction::Right => "RIGHT",
            KeyAction::Up => "UP",
            KeyAction::Down => "DOWN",
            KeyAction::Shoot => "SHOOT",
            KeyAction::Bomb => "BOMB",
            KeyAction::Shield => "SHIELD",
        }
    }

    /// Built-in binding used when no remap is stored.
    pub fn default_key(self) -> KeyCode {
        match self {
            KeyAction::Left => 21,
            KeyAction::Right => 22,
            KeyAction::Up => 19,
            KeyAction::Down => 20,
            KeyAction::Shoot => 54,
            KeyAction::Bomb => 52,
            KeyAction::Shield => 31,
        }
    }
}

/// Remappable `action -> keycode` bindings, persisted as a flat JSON map.
#[derive(Resource, Debug, Clone, Default)]
pub struct KeyBindings {
    overrides: FxHashMap<KeyAction, KeyCode>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load bindings from a JSON file. Missing file means defaults; actions
    /// absent from the file keep their default key.
    pub fn load(path: &Path) -> Result<Self, String> {
        let mut bindings = KeyBindings::default();
        if !path.exists() {
            return Ok(bindings);
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read key bindings: {}", e))?;
        let map: FxHashMap<String, KeyCode> = serde_json::from_str(&text)
            .map_err(|e| format!("failed to parse key bindings: {}", e))?;
        for action in KeyAction::ALL {
            if let Some(&key) = map.get(action.name()) {
                bindings.overrides.insert(action, key);
            }
        }
        info!("loaded {} key binding overrides", bindings.overrides.len());
        Ok(bindings)
    }

    /// Save all current bindings (including defaults) as a flat JSON map.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let mut map = Map::new();
        for action in KeyAction::ALL {
            map.insert(action.name().to_string(), Value::from(self.key_for(action)));
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| format!("failed to serialize key bindings: {}", e))?;
        std::fs::write(path, text).map_err(|e| format!("failed to write key bindings: {}", e))
    }

    /// The effective keycode for an action.
    pub fn key_for(&self, action: KeyAction) -> KeyCode {
        self.overrides
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_key())
    }

    /// Remap an action.
    pub fn bind(&mut self, action: KeyAction, key: KeyCode) {
        self.overrides.insert(action, key);
    }

    /// Drop a remap, restoring the default key.
    pub fn unbind(&mut self, action: KeyAction) {
        self.overrides.remove(&action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::open(&path).unwrap();
        settings
            .put_bool("fullscreen", true)
            .put_int("volume", 8)
            .put_float("speed", 1.5)
            .put_string("name", "player one");
        settings.flush().unwrap();

        let reloaded = Settings::open(&path).unwrap();
        assert!(reloaded.contains("fullscreen"));
        assert!(reloaded.get_bool("fullscreen", false));
        assert_eq!(reloaded.get_int("volume", 0), 8);
        assert_eq!(reloaded.get_float("speed", 0.0), 1.5);
        assert_eq!(reloaded.get_string("name", ""), "player one");
    }

    #[test]
    fn test_settings_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::open(dir.path().join("none.json")).unwrap();
        assert!(!settings.contains("volume"));
        assert_eq!(settings.get_int("volume", 5), 5);
        assert_eq!(settings.get_string("name", "anon"), "anon");
    }

    #[test]
    fn test_settings_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Settings::open(&path).is_err());
    }

    #[test]
    fn test_keybindings_defaults() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.key_for(KeyAction::Left), 21);
        assert_eq!(bindings.key_for(KeyAction::Shoot), 54);
    }

    #[test]
    fn test_keybindings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keybindings.json");

        let mut bindings = KeyBindings::new();
        bindings.bind(KeyAction::Shoot, 62);
        bindings.save(&path).unwrap();

        let reloaded = KeyBindings::load(&path).unwrap();
        assert_eq!(reloaded.key_for(KeyAction::Shoot), 62);
        // untouched actions keep defaults
        assert_eq!(reloaded.key_for(KeyAction::Left), 21);
    }

    #[test]
    fn test_keybindings_missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let bindings = KeyBindings::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(bindings.key_for(KeyAction::Bomb), 52);
    }
}

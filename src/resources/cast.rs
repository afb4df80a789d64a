//! Named character registry.
//!
//! Staging scripts address characters by name. [`Cast`] keeps an explicit
//! `name -> Entity` map instead of scanning entities by kind; entries are
//! added when a character spawns and removed by the reaper when the entity
//! is destroyed. A lookup miss is a valid result for gameplay code, but a
//! miss during staging is a scripting bug and is asserted in debug builds
//! at the call sites.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashMap;

/// `name -> Entity` registry for narrative characters.
#[derive(Resource, Debug, Clone, Default)]
pub struct Cast {
    members: FxHashMap<String, Entity>,
}

impl Cast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character. Re-registering a name replaces the old entry
    /// and returns the previous entity.
    pub fn insert(&mut self, name: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.members.insert(name.into(), entity)
    }

    /// Look up a character by name.
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.members.get(name).copied()
    }

    /// Remove a character by name.
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        self.members.remove(name)
    }

    /// Remove whatever name maps to `entity`, if any.
    pub fn remove_entity(&mut self, entity: Entity) {
        self.members.retain(|_, e| *e != entity);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over `(name, entity)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> {
        self.members.iter().map(|(n, e)| (n.as_str(), *e))
    }
}

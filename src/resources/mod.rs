//! Shared resources for the simulation world.

pub mod actions;
pub mod cast;
pub mod gamestate;
pub mod input;
pub mod playback;
pub mod settings;
pub mod worldsignals;
pub mod worldtime;

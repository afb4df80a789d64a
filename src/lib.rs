//! Entity, collision and timeline runtime for a narrative 2D typing game.
//!
//! The crate is headless: it simulates a stage of entities on a fixed
//! 10 ms tick (movement, steering, AABB collision, deferred destruction)
//! and drives a scripted narrative timeline of text prompts, delays,
//! sounds and scene staging on top of it. Rendering, audio mixing and
//! raw input belong to the host, which talks to the runtime through
//! [`stage::Stage`] and the audio/grade mailboxes.

pub mod components;
pub mod events;
pub mod math;
pub mod resources;
pub mod stage;
pub mod systems;
pub mod timeline;

pub use stage::{Stage, TICK_SECONDS};

//! Fixed-tick and per-frame systems.

pub mod actions;
pub mod collision;
pub mod destroy;
pub mod draw;
pub mod follow;
pub mod input;
pub mod movement;
pub mod skeleton;
pub mod timeline;

//! ECS components of the simulation core.

pub mod body;
pub mod character;
pub mod collider;
pub mod depth;
pub mod destroyed;
pub mod follow;
pub mod persistent;
pub mod position;

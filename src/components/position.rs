use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World position of a simulation entity.
#[derive(Component, Clone, Copy, Debug)]
pub struct Position {
    pub pos: Vec2,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Position {
            pos: Vec2::new(x, y),
        }
    }
}

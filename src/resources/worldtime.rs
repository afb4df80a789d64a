use bevy_ecs::prelude::Resource;

/// Shared clock resource.
///
/// `delta` is the scaled duration of the current step (fixed tick or
/// rendered frame, depending on which schedule is running); `elapsed`
/// accumulates scaled time since the stage was created.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub tick_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            tick_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}

use bevy_ecs::prelude::Resource;

/// Simulation clock. `delta` is the scaled duration of the current tick in
/// seconds; animators advance by it.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Zero scale freezes every animation in place.
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }
}

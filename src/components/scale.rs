use bevy_ecs::prelude::Component;

/// Uniform drawing magnification. Pixel-art frames are usually tiny.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub scale: f32,
}

impl Scale {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

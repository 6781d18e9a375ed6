use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key into the
/// [`TextureStore`](crate::resources::texturestore::TextureStore).
/// The state animation system rewrites `tex_key` whenever the frame changes.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>) -> Self {
        Self {
            tex_key: tex_key.into(),
            flip_h: false,
        }
    }
}

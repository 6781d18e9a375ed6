//! Loaded textures keyed by string IDs.
//!
//! Sprites and state animators refer to textures by key; the GPU handles stay
//! here. [`RaylibTextureSink`] lets the directory loader upload images into
//! the store while it builds an animation map.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::debug;
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

use crate::loader::TextureSink;

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.map.get(key.as_ref())
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.map.insert(key.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Uploads each image the loader finds and hands back its store key.
pub struct RaylibTextureSink<'a> {
    pub rl: &'a mut RaylibHandle,
    pub thread: &'a RaylibThread,
    pub store: &'a mut TextureStore,
}

impl TextureSink for RaylibTextureSink<'_> {
    type Handle = String;

    fn register(&mut self, key: &str, path: &Path) -> Result<String, String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("non UTF-8 path {:?}", path))?;
        let texture = self
            .rl
            .load_texture(self.thread, path_str)
            .map_err(|e| e.to_string())?;
        debug!("texture '{}' loaded from {}", key, path.display());
        self.store.insert(key, texture);
        Ok(key.to_string())
    }
}

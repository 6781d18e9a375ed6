//! State-dependent sprite animation.
//!
//! An entity's discrete state (`idle`, `walking/right`, ...) selects either a
//! static texture or an animation; switching state rewinds the animation that
//! was playing. Animation sets are loaded from directory trees of numbered
//! image files and driven through bevy_ecs components and systems.

pub mod components;
pub mod loader;
pub mod resources;
pub mod systems;

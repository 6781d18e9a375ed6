//! Per-frame keyboard input resource.
//!
//! Captures the keys the viewer reacts to: Left/Right step through states,
//! Space toggles pause, F flips the sprite.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }
}

/// Resource capturing the keyboard state relevant to the viewer.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub next_state: BoolState,
    pub previous_state: BoolState,
    pub pause: BoolState,
    pub flip: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            next_state: BoolState::bound_to(KeyboardKey::KEY_RIGHT),
            previous_state: BoolState::bound_to(KeyboardKey::KEY_LEFT),
            pause: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            flip: BoolState::bound_to(KeyboardKey::KEY_F),
        }
    }
}

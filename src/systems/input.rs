//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - [`viewer_controls`] turns those keys into state changes, pause and flip.
use bevy_ecs::prelude::*;
use log::info;
use raylib::ffi::KeyboardKey;

use crate::components::animstate::AnimState;
use crate::components::sprite::Sprite;
use crate::resources::input::InputState;
use crate::resources::statecycle::StateCycle;
use crate::resources::worldtime::WorldTime;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, rl: NonSend<raylib::RaylibHandle>) {
    let is_key_down = |key: KeyboardKey| rl.is_key_down(key);
    let is_key_pressed = |key: KeyboardKey| rl.is_key_pressed(key);

    let input = &mut *input;
    for state in [
        &mut input.next_state,
        &mut input.previous_state,
        &mut input.pause,
        &mut input.flip,
    ] {
        state.active = is_key_down(state.key_binding);
        state.just_pressed = is_key_pressed(state.key_binding);
    }
}

/// Apply viewer key presses.
///
/// Left/Right move through the [`StateCycle`] and rewrite every
/// [`AnimState`]. Space toggles the world time scale between 0 and 1.
/// F mirrors every sprite.
pub fn viewer_controls(
    input: Res<InputState>,
    mut cycle: ResMut<StateCycle>,
    mut time: ResMut<WorldTime>,
    mut query: Query<(&mut AnimState, &mut Sprite)>,
) {
    let selected = if input.next_state.just_pressed {
        cycle.next().cloned()
    } else if input.previous_state.just_pressed {
        cycle.previous().cloned()
    } else {
        None
    };

    if let Some(state) = &selected {
        info!("showing state '{}'", state);
    }

    if input.pause.just_pressed {
        time.time_scale = if time.is_paused() { 1.0 } else { 0.0 };
        info!("paused: {}", time.is_paused());
    }

    for (mut anim_state, mut sprite) in query.iter_mut() {
        if let Some(state) = &selected {
            anim_state.state = state.clone();
        }
        if input.flip.just_pressed {
            sprite.flip_h = !sprite.flip_h;
        }
    }
}

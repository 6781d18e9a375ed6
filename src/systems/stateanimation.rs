//! State animation system.
//!
//! Ticks every [`SpriteAnimator`] with the world delta and copies the
//! resulting texture key into the entity's [`Sprite`].
//!
//! # Flow
//!
//! 1. Game logic (or the viewer's input handling) writes [`AnimState`]
//! 2. [`state_animation`] asks the animator for the frame of that state
//! 3. The render pass draws `Sprite::tex_key` from the texture store
//!
//! A state missing from the animator is an asset configuration bug. The
//! error is logged and the sprite keeps its previous frame.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::animstate::{AnimState, StatePath};
use crate::components::sprite::Sprite;
use crate::components::stateanimator::StateAnimator;
use crate::resources::worldtime::WorldTime;

/// Animator whose states are path tuples and whose frames are texture keys.
pub type SpriteAnimator = StateAnimator<StatePath, String>;

/// Advance each entity's animator and update its sprite texture.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates the [`SpriteAnimator`] playback state.
/// - Writes [`Sprite::tex_key`] only when the frame changed.
pub fn state_animation(
    mut query: Query<(Entity, &mut SpriteAnimator, &AnimState, &mut Sprite)>,
    time: Res<WorldTime>,
) {
    for (entity, mut animator, anim_state, mut sprite) in query.iter_mut() {
        match animator.get_frame(&anim_state.state, time.delta) {
            Ok(tex_key) => {
                if sprite.tex_key != *tex_key {
                    sprite.tex_key.clone_from(tex_key);
                }
            }
            Err(e) => error!("entity {:?}: {}", entity, e),
        }
    }
}

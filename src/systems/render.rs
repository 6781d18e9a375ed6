use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::resources::statecycle::StateCycle;
use crate::resources::texturestore::TextureStore;
use crate::resources::worldtime::WorldTime;

/// Draw every sprite centered on its [`MapPosition`].
///
/// Runs inside raylib's drawing scope, so it takes the world directly rather
/// than being scheduled. Sprites whose key is not in the [`TextureStore`] are
/// skipped.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle) {
    let to_draw: Vec<(Sprite, MapPosition, f32)> = {
        let mut q = world.query::<(&Sprite, &MapPosition, Option<&Scale>)>();
        q.iter(world)
            .map(|(s, p, scale)| (s.clone(), *p, scale.map_or(1.0, |sc| sc.scale)))
            .collect()
    };

    let textures = world.resource::<TextureStore>();

    for (sprite, pos, scale) in to_draw.iter() {
        let Some(tex) = textures.get(&sprite.tex_key) else {
            continue;
        };
        let (w, h) = (tex.width() as f32, tex.height() as f32);

        // Negative source width mirrors the frame horizontally
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: if sprite.flip_h { -w } else { w },
            height: h,
        };
        let dest = Rectangle {
            x: pos.x,
            y: pos.y,
            width: w * scale,
            height: h * scale,
        };
        let origin = Vector2 {
            x: dest.width / 2.0,
            y: dest.height / 2.0,
        };

        d.draw_texture_pro(tex, src, dest, origin, 0.0, Color::WHITE);
    }
}

/// Exclusive system wrapping one frame of drawing.
///
/// The raylib handle and thread live in the world as non-send resources; they
/// are taken out for the duration of the draw so [`render_pass`] can query
/// the world freely.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    let status = status_line(world);
    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGRAY);
        render_pass(world, &mut d);
        d.draw_text(&status, 10, 10, 20, Color::RAYWHITE);
    }

    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

fn status_line(world: &World) -> String {
    let state = world
        .get_resource::<StateCycle>()
        .and_then(|cycle| cycle.current())
        .map(|s| s.to_string())
        .unwrap_or_default();
    let paused = world
        .get_resource::<WorldTime>()
        .is_some_and(|t| t.is_paused());
    if paused {
        format!("{}  [paused]", state)
    } else {
        state
    }
}

//! Engine tick integration tests for the state animation system.

use bevy_ecs::prelude::*;

use stateanim::components::animation::Animation;
use stateanim::components::animstate::{AnimState, StatePath};
use stateanim::components::sprite::Sprite;
use stateanim::components::stateanimator::{AnimationMap, FrameSource, StateAnimator};
use stateanim::resources::worldtime::WorldTime;
use stateanim::systems::stateanimation::{SpriteAnimator, state_animation};
use stateanim::systems::time::update_world_time;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world
}

fn player_animator() -> SpriteAnimator {
    let mut map = AnimationMap::default();
    map.insert(StatePath::from("idle"), FrameSource::Static("idle".to_string()));
    let walk = Animation::new(
        (0..3).map(|i| format!("walking/right/{}", i)),
        0.1,
    )
    .unwrap();
    map.insert(StatePath::from("walking/right"), walk.into());
    StateAnimator::new(map, Some(StatePath::from("idle")))
}

fn spawn_player(world: &mut World, state: &str) -> Entity {
    world
        .spawn((player_animator(), AnimState::new(state), Sprite::new("")))
        .id()
}

fn tick(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(state_animation);
    schedule.run(world);
}

fn tex_key(world: &World, entity: Entity) -> String {
    world.get::<Sprite>(entity).unwrap().tex_key.clone()
}

fn set_state(world: &mut World, entity: Entity, state: &str) {
    world.get_mut::<AnimState>(entity).unwrap().set(state);
}

#[test]
fn static_state_sets_sprite_texture() {
    let mut world = make_world();
    let player = spawn_player(&mut world, "idle");

    tick(&mut world, 0.5);
    assert_eq!(tex_key(&world, player), "idle");
    tick(&mut world, 3.0);
    assert_eq!(tex_key(&world, player), "idle");
}

#[test]
fn walking_advances_with_world_delta() {
    let mut world = make_world();
    let player = spawn_player(&mut world, "walking/right");

    tick(&mut world, 0.0);
    assert_eq!(tex_key(&world, player), "walking/right/0");
    tick(&mut world, 0.15);
    assert_eq!(tex_key(&world, player), "walking/right/1");
    tick(&mut world, 0.1);
    assert_eq!(tex_key(&world, player), "walking/right/2");
}

#[test]
fn leaving_and_reentering_restarts_animation() {
    let mut world = make_world();
    let player = spawn_player(&mut world, "walking/right");

    tick(&mut world, 0.0);
    tick(&mut world, 0.25);
    assert_eq!(tex_key(&world, player), "walking/right/2");

    set_state(&mut world, player, "idle");
    tick(&mut world, 0.0);
    assert_eq!(tex_key(&world, player), "idle");

    set_state(&mut world, player, "walking/right");
    tick(&mut world, 0.0);
    assert_eq!(tex_key(&world, player), "walking/right/0");
}

#[test]
fn paused_world_freezes_animation() {
    let mut world = make_world();
    let player = spawn_player(&mut world, "walking/right");
    tick(&mut world, 0.0);

    world.resource_mut::<WorldTime>().time_scale = 0.0;
    tick(&mut world, 1.0);
    assert_eq!(tex_key(&world, player), "walking/right/0");

    world.resource_mut::<WorldTime>().time_scale = 1.0;
    tick(&mut world, 0.12);
    assert_eq!(tex_key(&world, player), "walking/right/1");
}

#[test]
fn unknown_state_keeps_previous_frame() {
    let mut world = make_world();
    let player = spawn_player(&mut world, "walking/right");
    tick(&mut world, 0.0);
    tick(&mut world, 0.15);

    set_state(&mut world, player, "swimming");
    tick(&mut world, 0.1);
    assert_eq!(tex_key(&world, player), "walking/right/1");

    let animator = world.get::<SpriteAnimator>(player).unwrap();
    assert_eq!(
        animator.current_state(),
        Some(&StatePath::from("walking/right"))
    );
}

#[test]
fn entities_animate_independently() {
    let mut world = make_world();
    let walker = spawn_player(&mut world, "walking/right");
    let idler = spawn_player(&mut world, "idle");

    tick(&mut world, 0.0);
    tick(&mut world, 0.15);
    assert_eq!(tex_key(&world, walker), "walking/right/1");
    assert_eq!(tex_key(&world, idler), "idle");

    set_state(&mut world, idler, "walking/right");
    tick(&mut world, 0.0);
    assert_eq!(tex_key(&world, idler), "walking/right/0");
    assert_eq!(tex_key(&world, walker), "walking/right/1");
}

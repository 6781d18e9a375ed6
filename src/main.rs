//! State animation viewer.
//!
//! Loads an animation set directory and shows one animated sprite. Left/Right
//! step through the discovered states, Space pauses, F mirrors the sprite.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- assets/player --default-state walking/right
//! cargo run -- assets/player --list
//! cargo run -- assets/player --interval-ms 80 --save-config
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use serde::Serialize;

use stateanim::components::animstate::{AnimState, StatePath};
use stateanim::components::mapposition::MapPosition;
use stateanim::components::scale::Scale;
use stateanim::components::sprite::Sprite;
use stateanim::components::stateanimator::FrameSource;
use stateanim::loader::{FsDir, PathKeySink, load_with};
use stateanim::resources::input::InputState;
use stateanim::resources::statecycle::StateCycle;
use stateanim::resources::texturestore::{RaylibTextureSink, TextureStore};
use stateanim::resources::viewerconfig::ViewerConfig;
use stateanim::resources::worldtime::WorldTime;
use stateanim::systems::input::{update_input_state, viewer_controls};
use stateanim::systems::render::render_system;
use stateanim::systems::stateanimation::state_animation;
use stateanim::systems::time::update_world_time;

/// Browse the states of a sprite animation directory.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Animation set directory to load.
    dir: PathBuf,

    /// State shown first, e.g. `walking/right`.
    #[arg(long, value_name = "STATE")]
    default_state: Option<String>,

    /// Milliseconds per animation frame.
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// INI configuration file (default: ./stateanim.ini when present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Play animations once and hold the last frame.
    #[arg(long)]
    no_loop: bool,

    /// Write the effective settings (file plus flags) to the config file
    /// and exit.
    #[arg(long)]
    save_config: bool,

    /// Print the discovered states as JSON and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
struct StateSummary {
    state: StatePath,
    frames: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ViewerConfig::with_path(path);
            if let Err(e) = config.load_from_file() {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            config
        }
        None => {
            let mut config = ViewerConfig::new();
            config.load_from_file().ok(); // ignore errors, use defaults
            config
        }
    };
    config.apply_overrides(cli.default_state.clone(), cli.interval_ms, cli.no_loop);

    // Early-exit: persist settings
    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }
    let default_state = config.default_state.as_deref().map(StatePath::parse);

    // Early-exit: list states without opening a window
    if cli.list {
        let animator = match load_with(
            &FsDir,
            &cli.dir,
            &mut PathKeySink,
            default_state,
            config.frame_interval(),
            config.looped,
        ) {
            Ok(animator) => animator,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        };
        let mut summary: Vec<StateSummary> = animator
            .map()
            .iter()
            .map(|(state, source)| StateSummary {
                state: state.clone(),
                frames: match source {
                    FrameSource::Static(_) => 1,
                    FrameSource::Animated(animation) => animation.frame_count(),
                },
            })
            .collect();
        summary.sort_by(|a, b| a.state.cmp(&b.state));
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("stateanim")
        .build();
    rl.set_target_fps(config.target_fps);

    let mut textures = TextureStore::new();
    let animator = {
        let mut sink = RaylibTextureSink {
            rl: &mut rl,
            thread: &thread,
            store: &mut textures,
        };
        load_with(
            &FsDir,
            &cli.dir,
            &mut sink,
            default_state.clone(),
            config.frame_interval(),
            config.looped,
        )
    };
    let animator = match animator {
        Ok(animator) => animator,
        Err(e) => {
            log::error!("Failed to load {}: {}", cli.dir.display(), e);
            std::process::exit(1);
        }
    };

    let cycle = StateCycle::new(animator.states().cloned().collect(), default_state.as_ref());
    let Some(initial) = cycle.current().cloned() else {
        log::error!("No animation states found in {}", cli.dir.display());
        std::process::exit(1);
    };
    log::info!("{} textures loaded, showing '{}'", textures.len(), initial);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(textures);
    world.insert_resource(cycle);
    world.spawn((
        animator,
        AnimState::new(initial),
        Sprite::new(""),
        MapPosition::new(
            config.window_width as f32 / 2.0,
            config.window_height as f32 / 2.0,
        ),
        Scale::new(config.scale),
    ));
    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(viewer_controls.after(update_input_state));
    update.add_systems(state_animation.after(viewer_controls));
    update.add_systems(render_system.after(state_animation));

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
}

//! ECS resources made available to systems.
//!
//! Overview
//! - `input` – per-frame keyboard state of the viewer keys
//! - `statecycle` – ordered states the viewer steps through
//! - `texturestore` – loaded textures keyed by string IDs
//! - `viewerconfig` – INI-backed viewer settings
//! - `worldtime` – simulation time and delta
pub mod input;
pub mod statecycle;
pub mod texturestore;
pub mod viewerconfig;
pub mod worldtime;

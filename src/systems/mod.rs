//! ECS systems.
//!
//! - `input` – keyboard polling and viewer controls
//! - `render` – sprite drawing
//! - `stateanimation` – per-entity state animator ticking
//! - `time` – world clock update
pub mod input;
pub mod render;
pub mod stateanimation;
pub mod time;

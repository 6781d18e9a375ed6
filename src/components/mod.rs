//! ECS components for animated entities.
//!
//! Submodules overview:
//! - [`animation`] – time-driven frame sequence
//! - [`animstate`] – state path keys and the per-entity requested state
//! - [`mapposition`] – world-space position of an entity
//! - [`scale`] – drawing magnification
//! - [`sprite`] – texture key currently shown by an entity
//! - [`stateanimator`] – state to frame source lookup with reset on transition

pub mod animation;
pub mod animstate;
pub mod mapposition;
pub mod scale;
pub mod sprite;
pub mod stateanimator;

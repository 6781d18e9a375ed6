//! Requested animation state for an entity.
//!
//! Game logic writes an [`AnimState`] each tick; the
//! [`state_animation`](crate::systems::stateanimation::state_animation) system
//! reads it and asks the entity's animator for the matching frame.

use std::fmt;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Flattened tuple of path segments naming a state, e.g. `["walking", "right"]`.
///
/// Displays and parses as the segments joined with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatePath(SmallVec<[String; 2]>);

impl StatePath {
    pub fn new<I, P>(segments: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        StatePath(segments.into_iter().map(Into::into).collect())
    }

    /// Parse `walking/right` style keys. Empty segments are dropped.
    pub fn parse(s: &str) -> Self {
        Self::new(s.split('/').filter(|segment| !segment.is_empty()))
    }

    /// Copy of this path with one more trailing segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        StatePath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for StatePath {
    fn from(s: &str) -> Self {
        StatePath::parse(s)
    }
}

impl<const N: usize> From<[&str; N]> for StatePath {
    fn from(segments: [&str; N]) -> Self {
        StatePath::new(segments)
    }
}

/// The state an entity wants to be animated in this tick.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AnimState {
    pub state: StatePath,
}

impl AnimState {
    pub fn new(state: impl Into<StatePath>) -> Self {
        Self {
            state: state.into(),
        }
    }

    pub fn set(&mut self, state: impl Into<StatePath>) {
        self.state = state.into();
    }
}

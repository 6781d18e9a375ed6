//! State-dependent animated textures.
//!
//! A [`StateAnimator`] maps every discrete state of an entity (for example
//! `walking/right`) to a [`FrameSource`]: either a single texture or an
//! [`Animation`]. Each tick the caller passes the entity's current state and
//! the frame delta and gets back the texture to draw.
//!
//! When the state changes, the animation that was playing for the previous
//! state is rewound so it starts from its first frame the next time it is
//! entered. Repeating the same state only advances playback.

use std::fmt;
use std::hash::Hash;

use bevy_ecs::prelude::Component;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;

/// What a state renders: a fixed texture or a frame sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameSource<T> {
    Static(T),
    Animated(Animation<T>),
}

impl<T> FrameSource<T> {
    /// Texture this source shows right now, without advancing.
    pub fn current(&self) -> &T {
        match self {
            FrameSource::Static(texture) => texture,
            FrameSource::Animated(animation) => animation.current(),
        }
    }
}

impl<T> From<Animation<T>> for FrameSource<T> {
    fn from(animation: Animation<T>) -> Self {
        FrameSource::Animated(animation)
    }
}

/// State key to frame source.
pub type AnimationMap<S, T> = FxHashMap<S, FrameSource<T>>;

/// Failure returned by [`StateAnimator::get_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateAnimError<S> {
    /// The state (previous or requested) has no entry in the map.
    KeyNotFound(S),
}

impl<S: fmt::Debug> fmt::Display for StateAnimError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateAnimError::KeyNotFound(state) => {
                write!(f, "no animation registered for state {:?}", state)
            }
        }
    }
}

impl<S: fmt::Debug> std::error::Error for StateAnimError<S> {}

/// Selects and advances the frame source matching an entity's state.
///
/// The animator exclusively owns its map. Only the playback position of the
/// contained animations changes after construction.
#[derive(Debug, Clone, Component)]
pub struct StateAnimator<S, T>
where
    S: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    map: AnimationMap<S, T>,
    current_state: Option<S>,
}

impl<S, T> StateAnimator<S, T>
where
    S: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    /// Build an animator. `default` is not checked against the map; a missing
    /// default only fails once a frame is requested.
    pub fn new(map: AnimationMap<S, T>, default: Option<S>) -> Self {
        Self {
            map,
            current_state: default,
        }
    }

    /// Return the texture for `state` after `dt` seconds.
    ///
    /// Entering a new state rewinds the previous state's animation before the
    /// new state's source is advanced. Both keys are checked up front, so an
    /// `Err` leaves the animator exactly as it was.
    pub fn get_frame(&mut self, state: &S, dt: f32) -> Result<&T, StateAnimError<S>> {
        let transition = self.current_state.as_ref() != Some(state);

        // Previous state is looked up first, as in the transition order
        if transition {
            if let Some(previous) = &self.current_state {
                if !self.map.contains_key(previous) {
                    return Err(StateAnimError::KeyNotFound(previous.clone()));
                }
            }
        }
        if !self.map.contains_key(state) {
            return Err(StateAnimError::KeyNotFound(state.clone()));
        }

        if transition {
            if let Some(previous) = self.current_state.take() {
                if let Some(FrameSource::Animated(animation)) = self.map.get_mut(&previous) {
                    animation.reset();
                }
                debug!("state transition {:?} -> {:?}", previous, state);
            }
            self.current_state = Some(state.clone());
        }

        match self.map.get_mut(state) {
            Some(FrameSource::Animated(animation)) => Ok(animation.get_frame(dt)),
            Some(FrameSource::Static(texture)) => Ok(texture),
            None => Err(StateAnimError::KeyNotFound(state.clone())),
        }
    }

    /// State of the last successful lookup, or the default before that.
    pub fn current_state(&self) -> Option<&S> {
        self.current_state.as_ref()
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.map.contains_key(state)
    }

    /// Registered states in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.map.keys()
    }

    pub fn map(&self) -> &AnimationMap<S, T> {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: f32 = 0.1;

    fn scenario_map() -> AnimationMap<&'static str, &'static str> {
        let mut map = AnimationMap::default();
        map.insert("idle", FrameSource::Static("T0"));
        map.insert(
            "walk",
            Animation::new(["F0", "F1", "F2"], INTERVAL).unwrap().into(),
        );
        map.insert(
            "run",
            Animation::new(["R0", "R1"], INTERVAL).unwrap().into(),
        );
        map
    }

    fn frame_index(animator: &StateAnimator<&'static str, &'static str>, state: &str) -> usize {
        match animator.map().get(state) {
            Some(FrameSource::Animated(animation)) => animation.frame_index(),
            _ => panic!("{} is not animated", state),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let mut animator = StateAnimator::new(scenario_map(), Some("idle"));
        assert_eq!(*animator.get_frame(&"idle", 0.0).unwrap(), "T0");
        assert_eq!(*animator.get_frame(&"walk", 0.0).unwrap(), "F0");
        assert_eq!(*animator.get_frame(&"walk", 0.15).unwrap(), "F1");
        assert_eq!(*animator.get_frame(&"idle", 0.0).unwrap(), "T0");
        assert_eq!(frame_index(&animator, "walk"), 0);
        assert_eq!(*animator.get_frame(&"walk", 0.0).unwrap(), "F0");
    }

    #[test]
    fn test_same_state_never_resets() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        assert_eq!(*animator.get_frame(&"walk", 0.0).unwrap(), "F0");
        assert_eq!(*animator.get_frame(&"walk", 0.12).unwrap(), "F1");
        assert_eq!(*animator.get_frame(&"walk", 0.1).unwrap(), "F2");
        assert_eq!(*animator.get_frame(&"walk", 0.1).unwrap(), "F0");
    }

    #[test]
    fn test_transition_resets_previous_animation() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        animator.get_frame(&"walk", 0.0).unwrap();
        animator.get_frame(&"walk", 0.27).unwrap();
        assert_eq!(frame_index(&animator, "walk"), 2);

        assert_eq!(*animator.get_frame(&"run", 0.0).unwrap(), "R0");
        assert_eq!(frame_index(&animator, "walk"), 0);
        assert_eq!(*animator.get_frame(&"walk", 0.0).unwrap(), "F0");
    }

    #[test]
    fn test_transition_leaves_other_animations_alone() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        animator.get_frame(&"run", 0.0).unwrap();
        animator.get_frame(&"run", 0.11).unwrap();
        assert_eq!(frame_index(&animator, "run"), 1);

        animator.get_frame(&"walk", 0.0).unwrap();
        assert_eq!(frame_index(&animator, "run"), 0);
        animator.get_frame(&"walk", 0.11).unwrap();
        animator.get_frame(&"idle", 0.0).unwrap();
        assert_eq!(frame_index(&animator, "walk"), 0);
        assert_eq!(frame_index(&animator, "run"), 0);
    }

    #[test]
    fn test_static_ignores_dt_and_history() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        assert_eq!(*animator.get_frame(&"idle", 0.0).unwrap(), "T0");
        assert_eq!(*animator.get_frame(&"idle", 5.0).unwrap(), "T0");
        animator.get_frame(&"walk", 0.3).unwrap();
        assert_eq!(*animator.get_frame(&"idle", 12.5).unwrap(), "T0");
    }

    #[test]
    fn test_first_call_from_uninitialized() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        assert_eq!(animator.current_state(), None);
        assert_eq!(*animator.get_frame(&"walk", 0.15).unwrap(), "F1");
        assert_eq!(animator.current_state(), Some(&"walk"));
    }

    #[test]
    fn test_unknown_state_is_atomic_failure() {
        let mut animator = StateAnimator::new(scenario_map(), None);
        animator.get_frame(&"walk", 0.15).unwrap();

        let err = animator.get_frame(&"swim", 0.0).unwrap_err();
        assert_eq!(err, StateAnimError::KeyNotFound("swim"));
        assert_eq!(animator.current_state(), Some(&"walk"));
        // walk kept its playback position
        assert_eq!(frame_index(&animator, "walk"), 1);
    }

    #[test]
    fn test_missing_default_fails_on_transition() {
        let mut animator = StateAnimator::new(scenario_map(), Some("ghost"));
        let err = animator.get_frame(&"idle", 0.0).unwrap_err();
        assert_eq!(err, StateAnimError::KeyNotFound("ghost"));
        assert_eq!(animator.current_state(), Some(&"ghost"));
    }

    #[test]
    fn test_missing_previous_reported_before_missing_request() {
        let mut animator = StateAnimator::new(scenario_map(), Some("ghost"));
        let err = animator.get_frame(&"swim", 0.0).unwrap_err();
        assert_eq!(err, StateAnimError::KeyNotFound("ghost"));
        assert_eq!(animator.current_state(), Some(&"ghost"));
    }

    #[test]
    fn test_missing_default_fails_when_requested() {
        let mut animator = StateAnimator::new(scenario_map(), Some("ghost"));
        let err = animator.get_frame(&"ghost", 0.0).unwrap_err();
        assert_eq!(err, StateAnimError::KeyNotFound("ghost"));
    }

    #[test]
    fn test_error_display_names_state() {
        let err = StateAnimError::KeyNotFound("swim");
        assert_eq!(err.to_string(), "no animation registered for state \"swim\"");
    }

    #[test]
    fn test_accessors() {
        let animator = StateAnimator::new(scenario_map(), Some("idle"));
        assert_eq!(animator.len(), 3);
        assert!(!animator.is_empty());
        assert!(animator.contains_state(&"run"));
        assert!(!animator.contains_state(&"swim"));
        let mut states: Vec<_> = animator.states().copied().collect();
        states.sort();
        assert_eq!(states, vec!["idle", "run", "walk"]);
        assert_eq!(*animator.map()["idle"].current(), "T0");
    }
}

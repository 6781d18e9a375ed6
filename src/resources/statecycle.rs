//! Ordered list of the states the viewer can step through.

use bevy_ecs::prelude::Resource;

use crate::components::animstate::StatePath;

#[derive(Resource, Debug, Clone, Default)]
pub struct StateCycle {
    states: Vec<StatePath>,
    index: usize,
}

impl StateCycle {
    /// States are sorted so the order is stable between runs. Starts on
    /// `initial` when it is one of them, otherwise on the first state.
    pub fn new(mut states: Vec<StatePath>, initial: Option<&StatePath>) -> Self {
        states.sort();
        let index = initial
            .and_then(|s| states.iter().position(|candidate| candidate == s))
            .unwrap_or(0);
        Self { states, index }
    }

    pub fn current(&self) -> Option<&StatePath> {
        self.states.get(self.index)
    }

    pub fn next(&mut self) -> Option<&StatePath> {
        if !self.states.is_empty() {
            self.index = (self.index + 1) % self.states.len();
        }
        self.current()
    }

    pub fn previous(&mut self) -> Option<&StatePath> {
        if !self.states.is_empty() {
            self.index = (self.index + self.states.len() - 1) % self.states.len();
        }
        self.current()
    }

    pub fn states(&self) -> &[StatePath] {
        &self.states
    }
}

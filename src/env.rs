use std::collections::{btree_map::Entry, BTreeMap};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent, producing a new state and associated reward
    ///
    /// **Returns** `(next_state, reward)`, where `next_state` is `None` once the episode is over
    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;
}

/// Per-episode metrics kept by an environment, keyed by name
///
/// Keys are fixed at construction and iterate in sorted order, so [`Report::keys`] and
/// the values returned by [`Report::take`] line up.
#[derive(Debug, Clone, Default)]
pub struct Report {
    metrics: BTreeMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            metrics: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Names of the tracked metrics
    pub fn keys(&self) -> Vec<&'static str> {
        self.metrics.keys().copied().collect()
    }

    /// Entry for a metric, for in-place updates
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.metrics.entry(key)
    }

    /// Take the current metrics, resetting every value to zero
    pub fn take(&mut self) -> BTreeMap<&'static str, f64> {
        let taken = self.metrics.clone();
        self.metrics.values_mut().for_each(|v| *v = 0.0);
        taken
    }
}

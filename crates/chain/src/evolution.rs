//! Shared capability of anything that yields a state distribution over time.

use crate::chain::MarkovChain;
use crate::error::ChainError;

/// A process that can report its state distribution at a time step.
///
/// The analytic [`MarkovChain`] is one implementation; sampling-based
/// simulators in other crates are others. Callers compare them through this
/// trait without the chain knowing they exist.
pub trait StateEvolution {
    /// Error returned by [`StateEvolution::state_at_time`].
    type Error;

    /// Number of states in each returned distribution.
    fn n_states(&self) -> usize;

    /// Distribution over states after `t` steps.
    fn state_at_time(&mut self, t: u32) -> Result<Vec<f64>, Self::Error>;

    /// Distributions for `t = 0..=steps`.
    fn trajectory(&mut self, steps: u32) -> Result<Vec<Vec<f64>>, Self::Error> {
        (0..=steps).map(|t| self.state_at_time(t)).collect()
    }
}

impl StateEvolution for MarkovChain {
    type Error = ChainError;

    fn n_states(&self) -> usize {
        MarkovChain::n_states(self)
    }

    fn state_at_time(&mut self, t: u32) -> Result<Vec<f64>, ChainError> {
        MarkovChain::state_at_time(self, t)
    }
}

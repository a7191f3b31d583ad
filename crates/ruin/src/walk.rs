//! Transition matrix, initial state and absorption summary.

use eigenwalk_chain::MarkovChain;
use tracing::debug;

use crate::config::RuinConfig;
use crate::error::RuinError;

/// Builds the column-stochastic transition matrix of the walk.
///
/// State `k` holds stake `lower_limit + k`. The two boundary states are
/// absorbing; every interior state moves up with `prob_up` and down with
/// `1 - prob_up`.
pub fn transition_matrix(config: &RuinConfig) -> Result<Vec<Vec<f64>>, RuinError> {
    config.validate()?;
    let n = config.n_states();
    let up = config.prob_up();
    let down = 1.0 - up;

    let mut m = vec![vec![0.0; n]; n];
    m[0][0] = 1.0;
    m[n - 1][n - 1] = 1.0;
    for k in 1..n - 1 {
        m[k + 1][k] = up;
        m[k - 1][k] = down;
    }
    Ok(m)
}

/// Point mass on the starting stake.
pub fn initial_state(config: &RuinConfig) -> Result<Vec<f64>, RuinError> {
    config.validate()?;
    let mut state = vec![0.0; config.n_states()];
    state[(config.initial_position() - config.lower_limit()) as usize] = 1.0;
    Ok(state)
}

/// Builds the gambler's ruin chain.
#[tracing::instrument(skip_all, fields(
    lower = config.lower_limit(),
    upper = config.upper_limit(),
    start = config.initial_position(),
))]
pub fn gamblers_ruin(config: &RuinConfig) -> Result<MarkovChain, RuinError> {
    let matrix = transition_matrix(config)?;
    let initial = initial_state(config)?;
    debug!(n_states = matrix.len(), "built ruin transition matrix");
    Ok(MarkovChain::new(&matrix, Some(&initial))?)
}

/// Long-run probabilities of ending at each boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorption {
    /// Probability of finishing at the lower limit.
    pub ruin: f64,
    /// Probability of finishing at the upper limit.
    pub target: f64,
}

/// Reads the boundary masses off the chain's stationary state.
pub fn absorption(chain: &MarkovChain) -> Result<Absorption, RuinError> {
    let stationary = chain.stationary_state()?;
    let last = stationary.len() - 1;
    Ok(Absorption {
        ruin: stationary[0],
        target: stationary[last],
    })
}

/// Classical closed-form probability of reaching the upper limit.
///
/// With `r = (1 - p) / p` the answer is `(1 - r^i) / (1 - r^N)` for start
/// offset `i` and width `N`, or `i / N` when `p = 1/2`.
pub fn target_probability(config: &RuinConfig) -> Result<f64, RuinError> {
    config.validate()?;
    let i = (config.initial_position() - config.lower_limit()) as f64;
    let n = (config.upper_limit() - config.lower_limit()) as f64;
    let p = config.prob_up();
    if (p - 0.5).abs() < 1e-12 {
        return Ok(i / n);
    }
    let r = (1.0 - p) / p;
    Ok((1.0 - r.powf(i)) / (1.0 - r.powf(n)))
}

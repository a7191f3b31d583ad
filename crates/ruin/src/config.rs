//! Parameters of a gambler's ruin walk.

use crate::error::RuinError;

/// Parameters of a gambler's ruin walk.
///
/// The gambler starts with `initial_position`, wins one unit with
/// probability `prob_up` and loses one otherwise, and stops on reaching
/// `lower_limit` or `upper_limit`.
///
/// # Example
///
/// ```
/// use eigenwalk_ruin::RuinConfig;
///
/// let config = RuinConfig::new()
///     .with_limits(0, 10)
///     .with_initial_position(5)
///     .with_prob_up(0.5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.n_states(), 11);
/// ```
#[derive(Clone, Debug)]
pub struct RuinConfig {
    lower_limit: i64,
    upper_limit: i64,
    initial_position: i64,
    prob_up: f64,
}

impl RuinConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: limits `0..=200`, start `100`, `prob_up = 0.5`.
    pub fn new() -> Self {
        Self {
            lower_limit: 0,
            upper_limit: 200,
            initial_position: 100,
            prob_up: 0.5,
        }
    }

    /// Sets the ruin and target boundaries.
    pub fn with_limits(mut self, lower: i64, upper: i64) -> Self {
        self.lower_limit = lower;
        self.upper_limit = upper;
        self
    }

    /// Sets the starting stake.
    pub fn with_initial_position(mut self, position: i64) -> Self {
        self.initial_position = position;
        self
    }

    /// Sets the probability of winning a single bet.
    ///
    /// [`RuinConfig::validate`] rejects `0` and `1`: a certain walk has no
    /// eigenvector basis.
    pub fn with_prob_up(mut self, p: f64) -> Self {
        self.prob_up = p;
        self
    }

    /// Returns the ruin boundary.
    pub fn lower_limit(&self) -> i64 {
        self.lower_limit
    }

    /// Returns the target boundary.
    pub fn upper_limit(&self) -> i64 {
        self.upper_limit
    }

    /// Returns the starting stake.
    pub fn initial_position(&self) -> i64 {
        self.initial_position
    }

    /// Returns the probability of winning a single bet.
    pub fn prob_up(&self) -> f64 {
        self.prob_up
    }

    /// Number of states, `upper - lower + 1`.
    pub fn n_states(&self) -> usize {
        (self.upper_limit - self.lower_limit + 1).max(0) as usize
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), RuinError> {
        if self.lower_limit >= self.upper_limit {
            return Err(RuinError::InvalidLimits {
                lower: self.lower_limit,
                upper: self.upper_limit,
            });
        }
        if !(self.lower_limit..=self.upper_limit).contains(&self.initial_position) {
            return Err(RuinError::PositionOutOfRange {
                position: self.initial_position,
                lower: self.lower_limit,
                upper: self.upper_limit,
            });
        }
        if !self.prob_up.is_finite() || !(0.0..=1.0).contains(&self.prob_up) {
            return Err(RuinError::InvalidProbability {
                value: self.prob_up,
            });
        }
        if self.prob_up == 0.0 || self.prob_up == 1.0 {
            return Err(RuinError::DeterministicWalk {
                value: self.prob_up,
            });
        }
        Ok(())
    }
}

impl Default for RuinConfig {
    fn default() -> Self {
        Self::new()
    }
}

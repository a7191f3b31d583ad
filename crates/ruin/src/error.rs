//! Error types for the eigenwalk-ruin crate.

use eigenwalk_chain::ChainError;

/// Error type for all fallible operations in the eigenwalk-ruin crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuinError {
    /// Returned when the lower limit is not below the upper limit.
    #[error("invalid limits: lower {lower} must be below upper {upper}")]
    InvalidLimits {
        /// Lower (ruin) boundary.
        lower: i64,
        /// Upper (target) boundary.
        upper: i64,
    },

    /// Returned when the starting position lies outside the limits.
    #[error("initial position {position} outside [{lower}, {upper}]")]
    PositionOutOfRange {
        /// Requested starting position.
        position: i64,
        /// Lower boundary.
        lower: i64,
        /// Upper boundary.
        upper: i64,
    },

    /// Returned when the up-step probability is outside `[0, 1]`.
    #[error("invalid prob_up: {value} (must be in [0, 1])")]
    InvalidProbability {
        /// The invalid value.
        value: f64,
    },

    /// Returned when `prob_up` is exactly 0 or 1.
    ///
    /// Every bet then has a certain outcome and, with more than one interior
    /// state, the transition matrix is not diagonalizable.
    #[error("prob_up {value} makes the walk deterministic (must be strictly between 0 and 1)")]
    DeterministicWalk {
        /// The rejected value.
        value: f64,
    },

    /// Returned when the underlying chain rejects the model or a query fails.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

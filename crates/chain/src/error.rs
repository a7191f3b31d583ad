//! Error types for the eigenwalk-chain crate.

/// Error type for all fallible operations in the eigenwalk-chain crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// Returned when the transition matrix has no entries.
    #[error("transition matrix is empty")]
    EmptyMatrix,

    /// Returned when the transition matrix is not square.
    #[error("transition matrix is not square: {rows} rows, {cols} columns")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns in the first row.
        cols: usize,
    },

    /// Returned when a row length differs from the first row.
    #[error("transition matrix row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// Returned when a matrix entry is negative or not finite.
    #[error("transition probability at [{row}][{col}] is invalid: {value}")]
    InvalidProbability {
        /// Zero-based row (destination state).
        row: usize,
        /// Zero-based column (origin state).
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when one or more columns do not sum to one.
    #[error("matrix column(s) at position(s) {columns:?} do not sum to one")]
    Stochasticity {
        /// Zero-based indices of every offending column.
        columns: Vec<usize>,
    },

    /// Returned when the initial state length differs from the number of states.
    #[error("initial state has {len} entries, chain has {n_states} states")]
    InitialStateLength {
        /// Length of the supplied initial state.
        len: usize,
        /// Dimension of the transition matrix.
        n_states: usize,
    },

    /// Returned when an initial state entry is negative or not finite.
    #[error("initial state entry {index} is invalid: {value}")]
    InvalidInitialProbability {
        /// Zero-based state index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when the initial state does not sum to one.
    #[error("initial state sums to {sum}, expected 1")]
    Normalization {
        /// Actual sum of the initial state.
        sum: f64,
    },

    /// Returned when a query needs expansion coefficients but no initial state was given.
    #[error("{query} requires an initial state, none was supplied")]
    UnavailableInitialState {
        /// Name of the query that was attempted.
        query: &'static str,
    },

    /// Returned when no eigenvalue lies within tolerance of one.
    #[error("no eigenvalue within {tolerance} of 1; stationary state undefined")]
    NoStationaryEigenvalue {
        /// Tolerance used for the comparison.
        tolerance: f64,
    },

    /// Returned when the eigensolver fails to converge.
    #[error("eigensolver failed: {reason}")]
    EigenSolverFailed {
        /// Description of the failure.
        reason: String,
    },

    /// Returned when the eigenvector matrix cannot be inverted.
    #[error("eigenvector matrix is singular; the transition matrix is not diagonalizable")]
    SingularEigenbasis,

    /// Returned when a real-valued time is negative or not finite.
    #[error("invalid time {t} (must be finite and >= 0)")]
    InvalidTime {
        /// The offending time.
        t: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_matrix() {
        assert_eq!(
            ChainError::EmptyMatrix.to_string(),
            "transition matrix is empty"
        );
    }

    #[test]
    fn error_not_square() {
        let e = ChainError::NotSquare { rows: 1, cols: 2 };
        assert_eq!(
            e.to_string(),
            "transition matrix is not square: 1 rows, 2 columns"
        );
    }

    #[test]
    fn error_ragged_row() {
        let e = ChainError::RaggedRow {
            row: 2,
            len: 1,
            expected: 3,
        };
        assert_eq!(
            e.to_string(),
            "transition matrix row 2 has 1 entries, expected 3"
        );
    }

    #[test]
    fn error_stochasticity_lists_columns() {
        let e = ChainError::Stochasticity {
            columns: vec![0, 1],
        };
        assert_eq!(
            e.to_string(),
            "matrix column(s) at position(s) [0, 1] do not sum to one"
        );
    }

    #[test]
    fn error_normalization() {
        let e = ChainError::Normalization { sum: 0.5 };
        assert_eq!(e.to_string(), "initial state sums to 0.5, expected 1");
    }

    #[test]
    fn error_unavailable_initial_state() {
        let e = ChainError::UnavailableInitialState {
            query: "state_at_time",
        };
        assert_eq!(
            e.to_string(),
            "state_at_time requires an initial state, none was supplied"
        );
    }

    #[test]
    fn error_invalid_time() {
        let e = ChainError::InvalidTime { t: -1.5 };
        assert_eq!(e.to_string(), "invalid time -1.5 (must be finite and >= 0)");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ChainError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ChainError>();
    }
}

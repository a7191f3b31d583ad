//! Validation of transition matrices and initial distributions.

use nalgebra::{DMatrix, DVector};

use crate::error::ChainError;

/// Validates a transition matrix given as rows and converts it to a dense matrix.
///
/// Entry `rows[i][j]` is the probability of moving from state `j` to state
/// `i`, so every column must sum to one. Checks, in order:
///
/// 1. the matrix is non-empty and square (no ragged rows),
/// 2. every entry is finite and non-negative,
/// 3. every column sums to 1 within `tol`; all offending columns are reported.
pub fn validate_transition_matrix(rows: &[Vec<f64>], tol: f64) -> Result<DMatrix<f64>, ChainError> {
    let n = rows.len();
    let cols = rows.first().map_or(0, Vec::len);
    if n == 0 || cols == 0 {
        return Err(ChainError::EmptyMatrix);
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(ChainError::RaggedRow {
                row: i,
                len: row.len(),
                expected: cols,
            });
        }
    }
    if n != cols {
        return Err(ChainError::NotSquare { rows: n, cols });
    }

    for (i, row) in rows.iter().enumerate() {
        for (j, &p) in row.iter().enumerate() {
            if !p.is_finite() || p < 0.0 {
                return Err(ChainError::InvalidProbability {
                    row: i,
                    col: j,
                    value: p,
                });
            }
        }
    }

    let matrix = DMatrix::from_fn(n, n, |i, j| rows[i][j]);

    let columns: Vec<usize> = matrix
        .column_iter()
        .enumerate()
        .filter(|(_, col)| (col.sum() - 1.0).abs() > tol)
        .map(|(j, _)| j)
        .collect();
    if !columns.is_empty() {
        return Err(ChainError::Stochasticity { columns });
    }

    Ok(matrix)
}

/// Validates an initial distribution against a chain of `n_states` states.
///
/// The distribution must have `n_states` finite, non-negative entries summing
/// to 1 within `tol`.
pub fn validate_initial_state(
    state: &[f64],
    n_states: usize,
    tol: f64,
) -> Result<DVector<f64>, ChainError> {
    if state.len() != n_states {
        return Err(ChainError::InitialStateLength {
            len: state.len(),
            n_states,
        });
    }
    if let Some((index, &value)) = state
        .iter()
        .enumerate()
        .find(|&(_, &p)| !p.is_finite() || p < 0.0)
    {
        return Err(ChainError::InvalidInitialProbability { index, value });
    }
    let sum: f64 = state.iter().sum();
    if (sum - 1.0).abs() > tol {
        return Err(ChainError::Normalization { sum });
    }
    Ok(DVector::from_column_slice(state))
}

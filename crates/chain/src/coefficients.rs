//! Expansion of the initial state in the eigenvector basis.

use nalgebra::{DMatrix, DVector, SVD};
use num_complex::Complex64;
use tracing::warn;

use crate::config::ChainConfig;
use crate::error::ChainError;

/// Solves `V c = initial` where the columns of `V` are `eigenvectors`.
///
/// The columns are scaled to unit length and `V` is rejected when its
/// smallest singular value falls below `config.cluster_tolerance()` times
/// its largest. A defective eigenvalue that the Schur step split into
/// several nearby values yields nearly parallel eigenvectors, which this
/// catches.
///
/// # Errors
///
/// Returns [`ChainError::SingularEigenbasis`] if `V` is singular or
/// ill-conditioned, which happens when the transition matrix is not
/// diagonalizable. Returns [`ChainError::EigenSolverFailed`] if the SVD does
/// not converge.
pub fn solve_coefficients(
    eigenvectors: &[DVector<Complex64>],
    initial: &DVector<f64>,
    config: &ChainConfig,
) -> Result<Vec<Complex64>, ChainError> {
    let n = initial.len();
    let norms: Vec<f64> = eigenvectors.iter().map(|v| v.norm()).collect();
    if norms.iter().any(|&x| !x.is_finite() || x == 0.0) {
        return Err(ChainError::SingularEigenbasis);
    }
    let unit_basis = DMatrix::from_fn(n, eigenvectors.len(), |i, j| {
        eigenvectors[j][i].unscale(norms[j])
    });
    let svd = SVD::try_new(unit_basis, false, false, f64::EPSILON, config.max_iterations())
        .ok_or_else(|| ChainError::EigenSolverFailed {
            reason: "SVD of the eigenvector basis did not converge".to_string(),
        })?;
    let sv = &svd.singular_values;
    let largest = sv.iter().copied().fold(0.0, f64::max);
    let smallest = sv.iter().copied().fold(f64::INFINITY, f64::min);
    if smallest.is_nan() || smallest <= config.cluster_tolerance() * largest {
        warn!(smallest, largest, "eigenvector basis is numerically singular");
        return Err(ChainError::SingularEigenbasis);
    }

    let basis = DMatrix::from_fn(n, eigenvectors.len(), |i, j| eigenvectors[j][i]);
    let rhs = initial.map(|p| Complex64::new(p, 0.0));

    let lu = basis.lu();
    if !lu.is_invertible() {
        return Err(ChainError::SingularEigenbasis);
    }
    let coefficients = lu.solve(&rhs).ok_or(ChainError::SingularEigenbasis)?;
    if coefficients
        .iter()
        .any(|c| !c.re.is_finite() || !c.im.is_finite())
    {
        return Err(ChainError::SingularEigenbasis);
    }
    Ok(coefficients.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn real_vector(values: &[f64]) -> DVector<Complex64> {
        DVector::from_iterator(values.len(), values.iter().map(|&x| Complex64::new(x, 0.0)))
    }

    #[test]
    fn expands_initial_state() {
        let vectors = vec![real_vector(&[1.0, 0.2]), real_vector(&[1.0, -1.0])];
        let initial = DVector::from_vec(vec![0.2, 0.8]);
        let c = solve_coefficients(&vectors, &initial, &ChainConfig::new()).unwrap();

        assert_abs_diff_eq!(c[0].re, 5.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[1].re, 0.2 - 5.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[0].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn reconstructs_initial_state() {
        let vectors = vec![
            real_vector(&[1.0, 0.5, 0.25]),
            real_vector(&[0.0, 1.0, -1.0]),
            real_vector(&[1.0, -0.5, 0.0]),
        ];
        let initial = DVector::from_vec(vec![0.1, 0.6, 0.3]);
        let c = solve_coefficients(&vectors, &initial, &ChainConfig::new()).unwrap();

        for i in 0..3 {
            let x: Complex64 = (0..3).map(|k| c[k] * vectors[k][i]).sum();
            assert_abs_diff_eq!(x.re, initial[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn singular_basis_is_an_error() {
        let vectors = vec![real_vector(&[1.0, 1.0]), real_vector(&[1.0, 1.0])];
        let initial = DVector::from_vec(vec![0.5, 0.5]);
        assert!(matches!(
            solve_coefficients(&vectors, &initial, &ChainConfig::new()),
            Err(ChainError::SingularEigenbasis)
        ));
    }

    #[test]
    fn nearly_parallel_basis_is_an_error() {
        // Invertible in exact arithmetic, but the columns differ by 1e-9.
        let vectors = vec![
            real_vector(&[1.0, 0.0, 0.0]),
            real_vector(&[0.0, 1.0, -1.0]),
            real_vector(&[0.0, 1.0, -1.0 + 1e-9]),
        ];
        let initial = DVector::from_vec(vec![0.2, 0.3, 0.5]);
        assert!(matches!(
            solve_coefficients(&vectors, &initial, &ChainConfig::new()),
            Err(ChainError::SingularEigenbasis)
        ));
    }

    #[test]
    fn zero_eigenvector_is_an_error() {
        let vectors = vec![real_vector(&[1.0, 0.0]), real_vector(&[0.0, 0.0])];
        let initial = DVector::from_vec(vec![1.0, 0.0]);
        assert!(matches!(
            solve_coefficients(&vectors, &initial, &ChainConfig::new()),
            Err(ChainError::SingularEigenbasis)
        ));
    }
}

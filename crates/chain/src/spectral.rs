//! Eigendecomposition of a transition matrix.
//!
//! Eigenvalues come from a real Schur decomposition. A simple eigenvalue gets
//! its eigenvector by shifted inverse iteration. A cluster of numerically
//! equal eigenvalues, such as the eigenvalue 1 of a chain with several
//! absorbing classes, gets a full basis from the null space of `M - λI`
//! (complex SVD). Every eigenvector is then brought to a canonical phase and
//! scale.

use std::cmp::Ordering;

use nalgebra::{DMatrix, DVector, SVD, Schur};
use num_complex::Complex64;
use tracing::{debug, warn};

use crate::config::ChainConfig;
use crate::error::ChainError;

/// Cached result of evaluating a chain.
///
/// `eigenvectors[i]` belongs to `eigenvalues[i]`. When the chain has an
/// initial state, `coefficients[i]` is the weight of `eigenvectors[i]` in
/// its expansion.
#[derive(Debug, Clone)]
pub struct Spectrum {
    eigenvalues: Vec<Complex64>,
    eigenvectors: Vec<DVector<Complex64>>,
    coefficients: Option<Vec<Complex64>>,
}

impl Spectrum {
    pub(crate) fn new(
        eigenvalues: Vec<Complex64>,
        eigenvectors: Vec<DVector<Complex64>>,
        coefficients: Option<Vec<Complex64>>,
    ) -> Self {
        Self {
            eigenvalues,
            eigenvectors,
            coefficients,
        }
    }

    /// Eigenvalues sorted descending by real part, then imaginary part.
    pub fn eigenvalues(&self) -> &[Complex64] {
        &self.eigenvalues
    }

    /// Renormalized eigenvectors, in eigenvalue order.
    pub fn eigenvectors(&self) -> &[DVector<Complex64>] {
        &self.eigenvectors
    }

    /// Expansion coefficients of the initial state, if one was supplied.
    pub fn coefficients(&self) -> Option<&[Complex64]> {
        self.coefficients.as_deref()
    }

    /// Indices of eigenvalues within `tol` of one.
    pub fn stationary_indices(&self, tol: f64) -> Vec<usize> {
        self.eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, l)| (**l - Complex64::new(1.0, 0.0)).norm() <= tol)
            .map(|(i, _)| i)
            .collect()
    }

    /// Long-run distribution, normalized to sum to one.
    ///
    /// Uses the eigenvectors whose eigenvalues lie within `tol` of one. With
    /// several of them the expansion coefficients pick the mixture.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NoStationaryEigenvalue`] if no eigenvalue is
    /// within `tol` of one, and [`ChainError::UnavailableInitialState`] if
    /// several are and there are no coefficients.
    pub fn stationary_distribution(&self, tol: f64) -> Result<Vec<f64>, ChainError> {
        let unit = self.stationary_indices(tol);
        let state = match unit.as_slice() {
            [] => return Err(ChainError::NoStationaryEigenvalue { tolerance: tol }),
            &[e] => self.real_combination([e], |_| Complex64::new(1.0, 0.0)),
            _ => {
                debug!(multiplicity = unit.len(), "degenerate stationary subspace");
                let coefficients =
                    self.coefficients()
                        .ok_or(ChainError::UnavailableInitialState {
                            query: "stationary_state",
                        })?;
                self.real_combination(unit.iter().copied(), |i| coefficients[i])
            }
        };

        let total: f64 = state.iter().sum();
        Ok(state.into_iter().map(|p| p / total).collect())
    }

    /// Returns `Re(Σ weight(i) · eigenvectors[i])` over `indices`.
    ///
    /// The sum is accumulated in complex arithmetic; only the final vector is
    /// truncated to its real part.
    pub(crate) fn real_combination(
        &self,
        indices: impl IntoIterator<Item = usize>,
        weight: impl Fn(usize) -> Complex64,
    ) -> Vec<f64> {
        let n = self.eigenvectors.first().map_or(0, |v| v.len());
        let mut acc = DVector::<Complex64>::zeros(n);
        for i in indices {
            acc.axpy(weight(i), &self.eigenvectors[i], Complex64::new(1.0, 0.0));
        }
        acc.iter().map(|z| z.re).collect()
    }
}

/// Lexicographic order on (real, imaginary); NaN compares equal.
fn lex_cmp(a: &Complex64, b: &Complex64) -> Ordering {
    a.re.partial_cmp(&b.re)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.im.partial_cmp(&b.im).unwrap_or(Ordering::Equal))
}

/// Computes eigenvalues (sorted descending) and renormalized eigenvectors.
///
/// # Errors
///
/// Returns [`ChainError::EigenSolverFailed`] if the Schur or SVD iteration
/// does not converge within `config.max_iterations()`, and
/// [`ChainError::SingularEigenbasis`] if some eigenvalue has fewer
/// independent eigenvectors than its multiplicity (a defective matrix).
pub fn decompose(
    matrix: &DMatrix<f64>,
    config: &ChainConfig,
) -> Result<(Vec<Complex64>, Vec<DVector<Complex64>>), ChainError> {
    let schur = Schur::try_new(matrix.clone(), f64::EPSILON, config.max_iterations())
        .ok_or_else(|| ChainError::EigenSolverFailed {
            reason: format!(
                "Schur decomposition did not converge in {} iterations",
                config.max_iterations()
            ),
        })?;

    let mut eigenvalues: Vec<Complex64> = schur.complex_eigenvalues().iter().copied().collect();
    eigenvalues.sort_by(|a, b| lex_cmp(b, a));

    let n = eigenvalues.len();
    let mut slots: Vec<Option<DVector<Complex64>>> = vec![None; n];
    let mut n_clusters = 0usize;
    for start in 0..n {
        if slots[start].is_some() {
            continue;
        }
        let head = eigenvalues[start];
        let members: Vec<usize> = (start..n)
            .filter(|&j| {
                slots[j].is_none() && (eigenvalues[j] - head).norm() <= config.cluster_tolerance()
            })
            .collect();
        let basis = if let [single] = members.as_slice() {
            vec![inverse_iteration(matrix, eigenvalues[*single], config)?]
        } else {
            let centre =
                members.iter().map(|&j| eigenvalues[j]).sum::<Complex64>() / members.len() as f64;
            cluster_basis(matrix, centre, members.len(), config)?
        };
        for (&j, v) in members.iter().zip(basis) {
            slots[j] = Some(v);
        }
        n_clusters += 1;
    }
    let mut eigenvectors: Vec<DVector<Complex64>> = slots.into_iter().flatten().collect();
    debug!(n_states = n, n_clusters, "eigenpairs extracted");

    for v in &mut eigenvectors {
        align_phase(v);
    }
    renormalize(&mut eigenvectors);

    Ok((eigenvalues, eigenvectors))
}

/// Inverse iteration stops once the residual drops below this, relative to
/// `1 + |λ|`.
const INVERSE_ITERATION_TARGET: f64 = 1e-12;

/// Relative offset keeping the inverse-iteration shift off the exact eigenvalue.
const INVERSE_ITERATION_OFFSET: f64 = 1e-10;

/// Lifts a real matrix to complex and subtracts `shift` from the diagonal.
fn shifted_complex(matrix: &DMatrix<f64>, shift: Complex64) -> DMatrix<Complex64> {
    let n = matrix.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        let entry = Complex64::new(matrix[(i, j)], 0.0);
        if i == j { entry - shift } else { entry }
    })
}

/// Largest `‖(M - λI) v‖` accepted for a unit eigenvector.
fn residual_limit(config: &ChainConfig) -> f64 {
    config.cluster_tolerance().sqrt()
}

/// Eigenvector of a simple eigenvalue by shifted inverse iteration.
///
/// Iterates until the residual reaches [`INVERSE_ITERATION_TARGET`], stops
/// improving, or `config.max_iterations()` steps have run.
fn inverse_iteration(
    matrix: &DMatrix<f64>,
    lambda: Complex64,
    config: &ChainConfig,
) -> Result<DVector<Complex64>, ChainError> {
    let n = matrix.nrows();
    let offset = INVERSE_ITERATION_OFFSET * (1.0 + lambda.norm());
    let lu = shifted_complex(matrix, lambda + offset).lu();
    let shifted = shifted_complex(matrix, lambda);
    let target = INVERSE_ITERATION_TARGET * (1.0 + lambda.norm());

    // Irrational strides keep the start vector away from any eigenvector's
    // orthogonal complement.
    let mut v = DVector::from_fn(n, |i, _| {
        Complex64::new(1.0 + (i as f64 * 0.618_033_988_75).fract(), 0.0)
    });
    let mut residual = f64::INFINITY;
    let mut steps = 0usize;
    while steps < config.max_iterations() {
        let next = lu
            .solve(&v)
            .ok_or_else(|| ChainError::EigenSolverFailed {
                reason: format!("inverse iteration hit a singular shift at {lambda}"),
            })?;
        let norm = next.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(ChainError::EigenSolverFailed {
                reason: format!("inverse iteration diverged at {lambda}"),
            });
        }
        v = next.unscale(norm);
        steps += 1;

        let current = (&shifted * &v).norm();
        let stalled = current > 0.5 * residual;
        residual = current;
        if residual <= target || stalled {
            break;
        }
    }

    if residual > residual_limit(config) {
        warn!(%lambda, residual, steps, "inverse iteration did not converge");
        return Err(ChainError::SingularEigenbasis);
    }
    Ok(v)
}

/// Returns the `k` right-singular vectors of `M - λI` with the smallest
/// singular values.
///
/// A defective eigenvalue has a null space smaller than its multiplicity, so
/// the `k`-th smallest singular value stays large and the cluster is rejected.
fn cluster_basis(
    matrix: &DMatrix<f64>,
    lambda: Complex64,
    k: usize,
    config: &ChainConfig,
) -> Result<Vec<DVector<Complex64>>, ChainError> {
    let shifted = shifted_complex(matrix, lambda);
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, config.max_iterations())
        .ok_or_else(|| ChainError::EigenSolverFailed {
            reason: format!("SVD did not converge for eigenvalue {lambda}"),
        })?;
    let v_t = svd
        .v_t
        .as_ref()
        .ok_or_else(|| ChainError::EigenSolverFailed {
            reason: "SVD returned no right-singular vectors".to_string(),
        })?;

    let sv = &svd.singular_values;
    let mut order: Vec<usize> = (0..sv.len()).collect();
    order.sort_by(|&a, &b| sv[a].partial_cmp(&sv[b]).unwrap_or(Ordering::Equal));

    let residual = sv[order[k - 1]];
    if residual > residual_limit(config) {
        warn!(
            %lambda,
            multiplicity = k,
            residual,
            "eigenvalue is defective"
        );
        return Err(ChainError::SingularEigenbasis);
    }

    Ok(order[..k].iter().map(|&r| v_t.row(r).adjoint()).collect())
}

/// Rotates `v` so its largest-modulus entry is real and positive.
///
/// The first entry wins when several share the largest modulus.
fn align_phase(v: &mut DVector<Complex64>) {
    let mut best = 0;
    let mut best_norm = 0.0;
    for (i, z) in v.iter().enumerate() {
        let m = z.norm();
        if m > best_norm {
            best = i;
            best_norm = m;
        }
    }
    if best_norm == 0.0 {
        return;
    }
    let rotation = (v[best] / best_norm).conj();
    for z in v.iter_mut() {
        *z *= rotation;
    }
    v[best] = Complex64::new(best_norm, 0.0);
}

/// Rescales each eigenvector by its extremal entry.
///
/// The maximum and minimum entries (ordered by real part, then imaginary
/// part) are compared by absolute magnitude and the larger becomes the
/// anchor that every entry is divided by. On an exact magnitude tie the
/// maximum is the anchor. Zero vectors are left unchanged.
pub fn renormalize(vectors: &mut [DVector<Complex64>]) {
    for v in vectors.iter_mut() {
        let (Some(max), Some(min)) = (
            v.iter().copied().max_by(lex_cmp),
            v.iter().copied().min_by(lex_cmp),
        ) else {
            continue;
        };
        let anchor = if max.norm() >= min.norm() { max } else { min };
        if anchor.norm() == 0.0 {
            continue;
        }
        for z in v.iter_mut() {
            *z /= anchor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn real_vector(values: &[f64]) -> DVector<Complex64> {
        DVector::from_iterator(values.len(), values.iter().map(|&x| Complex64::new(x, 0.0)))
    }

    fn re(v: &DVector<Complex64>) -> Vec<f64> {
        v.iter().map(|z| z.re).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-10);
        }
    }

    #[test]
    fn renormalize_by_larger_magnitude_extreme() {
        let mut vectors = vec![real_vector(&[3.0, -2.0]), real_vector(&[1.0, 1.0])];
        renormalize(&mut vectors);
        assert_close(&re(&vectors[0]), &[1.0, -2.0 / 3.0]);
        assert_close(&re(&vectors[1]), &[1.0, 1.0]);
    }

    #[test]
    fn renormalize_negative_anchor() {
        let mut vectors = vec![real_vector(&[1.0, -4.0, 2.0])];
        renormalize(&mut vectors);
        assert_close(&re(&vectors[0]), &[-0.25, 1.0, -0.5]);
    }

    #[test]
    fn renormalize_tie_prefers_maximum() {
        // |max| == |min|: the maximum (+2) is the anchor, not the minimum (-2).
        let mut vectors = vec![real_vector(&[-2.0, 2.0, 1.0])];
        renormalize(&mut vectors);
        assert_close(&re(&vectors[0]), &[-1.0, 1.0, 0.5]);
    }

    #[test]
    fn renormalize_leaves_zero_vector() {
        let mut vectors = vec![real_vector(&[0.0, 0.0])];
        renormalize(&mut vectors);
        assert_eq!(re(&vectors[0]), vec![0.0, 0.0]);
    }

    #[test]
    fn align_phase_makes_largest_entry_real_positive() {
        let i = Complex64::new(0.0, 1.0);
        let mut v = DVector::from_vec(vec![i * 0.5, i * -2.0]);
        align_phase(&mut v);
        assert_abs_diff_eq!(v[1].re, 2.0, epsilon = 1e-12);
        assert_eq!(v[1].im, 0.0);
        assert_abs_diff_eq!(v[0].re, -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(v[0].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn decompose_two_state() {
        let m = DMatrix::from_row_slice(2, 2, &[0.9, 0.5, 0.1, 0.5]);
        let (values, vectors) = decompose(&m, &ChainConfig::new()).unwrap();

        assert_abs_diff_eq!(values[0].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1].re, 0.4, epsilon = 1e-12);
        assert_close(&re(&vectors[0]), &[1.0, 0.2]);
        // [1, -1] direction; the anchor has magnitude one either way.
        let v1 = re(&vectors[1]);
        assert_abs_diff_eq!(v1[0].abs(), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(v1[0] + v1[1], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn decompose_satisfies_eigen_equation() {
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[0.5, 0.2, 0.3, 0.3, 0.6, 0.1, 0.2, 0.2, 0.6],
        );
        let (values, vectors) = decompose(&m, &ChainConfig::new()).unwrap();
        let mc = m.map(|x| Complex64::new(x, 0.0));
        for (l, v) in values.iter().zip(&vectors) {
            let residual = &mc * v - v * *l;
            assert!(residual.norm() < 1e-9, "residual {} for {l}", residual.norm());
        }
    }

    #[test]
    fn decompose_sorts_descending() {
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[0.1, 0.1, 0.8, 0.8, 0.1, 0.1, 0.1, 0.8, 0.1],
        );
        // Circulant: eigenvalues 1 and the conjugate pair -0.35 +/- 0.606i.
        let (values, _) = decompose(&m, &ChainConfig::new()).unwrap();
        assert_abs_diff_eq!(values[0].re, 1.0, epsilon = 1e-10);
        assert!(values[1].re <= values[0].re);
        assert_abs_diff_eq!(values[1].re, -0.35, epsilon = 1e-10);
        assert_abs_diff_eq!(values[1].im, 0.7 * 3f64.sqrt() / 2.0, epsilon = 1e-10);
        assert!(values[1].im > values[2].im);
    }

    #[test]
    fn repeated_unit_eigenvalue_gets_two_vectors() {
        // Two absorbing states plus one transient state.
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 1.0],
        );
        let (values, vectors) = decompose(&m, &ChainConfig::new()).unwrap();
        let spectrum = Spectrum::new(values, vectors, None);
        let unit = spectrum.stationary_indices(1e-6);
        assert_eq!(unit.len(), 2);

        let a = &spectrum.eigenvectors()[unit[0]];
        let b = &spectrum.eigenvectors()[unit[1]];
        let basis = DMatrix::from_columns(&[a.clone(), b.clone()]);
        assert_eq!(basis.rank(1e-8), 2);
    }

    #[test]
    fn jordan_block_is_rejected() {
        // Column-stochastic with eigenvalue 0 of algebraic multiplicity two
        // but a single eigenvector.
        let m = DMatrix::from_row_slice(
            3,
            3,
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0],
        );
        assert!(matches!(
            decompose(&m, &ChainConfig::new()),
            Err(ChainError::SingularEigenbasis)
        ));
    }

    #[test]
    fn disjoint_cycles_keep_full_basis() {
        // Two independent 2-cycles: eigenvalues 1, 1, -1, -1, all semisimple.
        let m = DMatrix::from_row_slice(
            4,
            4,
            &[
                0.0, 1.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
        );
        let (values, vectors) = decompose(&m, &ChainConfig::new()).unwrap();
        let mc = m.map(|x| Complex64::new(x, 0.0));
        for (l, v) in values.iter().zip(&vectors) {
            assert!((&mc * v - v * *l).norm() < 1e-9);
        }
        let basis = DMatrix::from_columns(&vectors);
        assert_eq!(basis.rank(1e-8), 4);
    }

    #[test]
    fn converged_eigenvector_has_small_residual() {
        let m = DMatrix::from_row_slice(2, 2, &[0.9, 0.5, 0.1, 0.5]);
        let config = ChainConfig::new();
        let lambda = Complex64::new(0.4, 0.0);
        let v = inverse_iteration(&m, lambda, &config).unwrap();
        let residual = (shifted_complex(&m, lambda) * &v).norm();
        assert!(residual < 1e-10, "residual {residual}");
    }

    #[test]
    fn stationary_distribution_without_unit_eigenvalue() {
        let spectrum = Spectrum::new(
            vec![Complex64::new(0.5, 0.0), Complex64::new(-0.5, 0.0)],
            vec![real_vector(&[1.0, 0.0]), real_vector(&[0.0, 1.0])],
            None,
        );
        assert!(matches!(
            spectrum.stationary_distribution(1e-6),
            Err(ChainError::NoStationaryEigenvalue { .. })
        ));
    }

    #[test]
    fn stationary_distribution_normalizes_single_unit_vector() {
        let spectrum = Spectrum::new(
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.4, 0.0)],
            vec![real_vector(&[1.0, 0.2]), real_vector(&[1.0, -1.0])],
            None,
        );
        let pi = spectrum.stationary_distribution(1e-6).unwrap();
        assert_close(&pi, &[5.0 / 6.0, 1.0 / 6.0]);
    }

    #[test]
    fn stationary_distribution_degenerate_needs_coefficients() {
        let values = vec![Complex64::new(1.0, 0.0); 2];
        let vectors = vec![real_vector(&[1.0, 0.0]), real_vector(&[0.0, 1.0])];
        let bare = Spectrum::new(values.clone(), vectors.clone(), None);
        assert!(matches!(
            bare.stationary_distribution(1e-6),
            Err(ChainError::UnavailableInitialState { .. })
        ));

        let weights = vec![Complex64::new(0.25, 0.0), Complex64::new(0.75, 0.0)];
        let weighted = Spectrum::new(values, vectors, Some(weights));
        assert_close(&weighted.stationary_distribution(1e-6).unwrap(), &[0.25, 0.75]);
    }

    #[test]
    fn real_combination_takes_real_part() {
        let spectrum = Spectrum::new(
            vec![Complex64::new(1.0, 0.0); 2],
            vec![real_vector(&[1.0, 0.0]), real_vector(&[0.0, 1.0])],
            None,
        );
        let out = spectrum.real_combination([0, 1], |i| Complex64::new(i as f64 + 1.0, 3.0));
        assert_eq!(out, vec![1.0, 2.0]);
    }
}

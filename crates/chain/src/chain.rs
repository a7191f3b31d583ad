//! The Markov chain type and its closed-form queries.

use std::cell::OnceCell;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use tracing::debug;

use crate::coefficients::solve_coefficients;
use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::spectral::{Spectrum, decompose};
use crate::validate::{validate_initial_state, validate_transition_matrix};

/// A finite discrete-time Markov chain evaluated by eigendecomposition.
///
/// The transition matrix is column-stochastic: entry `[i][j]` is the
/// probability of moving from state `j` to state `i`. Both the matrix and the
/// optional initial distribution are validated on construction and never
/// change afterwards.
///
/// The [`Spectrum`] is computed on the first query and cached, so repeated
/// queries return bit-identical results. The cache is a [`OnceCell`]: a chain
/// can be moved between threads but not shared between them.
///
/// # Example
///
/// ```
/// use eigenwalk_chain::MarkovChain;
///
/// let chain = MarkovChain::new(
///     &[vec![0.9, 0.5], vec![0.1, 0.5]],
///     Some(&[0.2, 0.8]),
/// )
/// .unwrap();
///
/// let state = chain.state_at_time(2).unwrap();
/// assert!((state[0] - 0.732).abs() < 1e-9);
///
/// let stationary = chain.stationary_state().unwrap();
/// assert!((stationary[0] - 5.0 / 6.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct MarkovChain {
    transition: DMatrix<f64>,
    initial: Option<DVector<f64>>,
    config: ChainConfig,
    spectrum: OnceCell<Spectrum>,
}

impl MarkovChain {
    /// Builds a chain with the default [`ChainConfig`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the matrix is not square and
    /// column-stochastic, or if the initial state is not a probability
    /// distribution over the same states.
    pub fn new(matrix: &[Vec<f64>], initial: Option<&[f64]>) -> Result<Self, ChainError> {
        Self::with_config(matrix, initial, ChainConfig::default())
    }

    /// Builds a chain with an explicit configuration.
    pub fn with_config(
        matrix: &[Vec<f64>],
        initial: Option<&[f64]>,
        config: ChainConfig,
    ) -> Result<Self, ChainError> {
        config.validate()?;
        let tol = config.stochastic_tolerance();
        let transition = validate_transition_matrix(matrix, tol)?;
        let initial = initial
            .map(|state| validate_initial_state(state, transition.nrows(), tol))
            .transpose()?;

        Ok(Self {
            transition,
            initial,
            config,
            spectrum: OnceCell::new(),
        })
    }

    /// Number of states.
    pub fn n_states(&self) -> usize {
        self.transition.nrows()
    }

    /// The validated transition matrix.
    pub fn transition_matrix(&self) -> &DMatrix<f64> {
        &self.transition
    }

    /// The initial distribution, if one was supplied.
    pub fn initial_state(&self) -> Option<&DVector<f64>> {
        self.initial.as_ref()
    }

    /// The configuration this chain was built with.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Returns the cached spectrum, computing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EigenSolverFailed`] or
    /// [`ChainError::SingularEigenbasis`] if the decomposition fails. A
    /// failed evaluation is not cached.
    pub fn spectrum(&self) -> Result<&Spectrum, ChainError> {
        if let Some(spectrum) = self.spectrum.get() {
            return Ok(spectrum);
        }
        let spectrum = self.evaluate()?;
        Ok(self.spectrum.get_or_init(|| spectrum))
    }

    #[tracing::instrument(skip_all, fields(n_states = self.n_states()))]
    fn evaluate(&self) -> Result<Spectrum, ChainError> {
        let (eigenvalues, eigenvectors) = decompose(&self.transition, &self.config)?;
        let coefficients = self
            .initial
            .as_ref()
            .map(|initial| solve_coefficients(&eigenvectors, initial, &self.config))
            .transpose()?;
        debug!(
            leading = %eigenvalues[0],
            has_coefficients = coefficients.is_some(),
            "spectrum evaluated"
        );
        Ok(Spectrum::new(eigenvalues, eigenvectors, coefficients))
    }

    fn coefficients<'a>(
        &self,
        spectrum: &'a Spectrum,
        query: &'static str,
    ) -> Result<&'a [Complex64], ChainError> {
        spectrum
            .coefficients()
            .ok_or(ChainError::UnavailableInitialState { query })
    }

    /// Distribution after `t` steps: `Re(Σ cᵢ λᵢᵗ vᵢ)`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnavailableInitialState`] if the chain was built
    /// without an initial state.
    pub fn state_at_time(&self, t: u32) -> Result<Vec<f64>, ChainError> {
        const QUERY: &str = "state_at_time";
        if self.initial.is_none() {
            return Err(ChainError::UnavailableInitialState { query: QUERY });
        }
        let spectrum = self.spectrum()?;
        let coefficients = self.coefficients(spectrum, QUERY)?;
        let eigenvalues = spectrum.eigenvalues();
        Ok(spectrum.real_combination(0..eigenvalues.len(), |i| {
            coefficients[i] * eigenvalues[i].powu(t)
        }))
    }

    /// Distribution at a real-valued time using complex exponentiation.
    ///
    /// Agrees with [`MarkovChain::state_at_time`] at integer times. A zero
    /// eigenvalue contributes `1` at `t = 0` and nothing afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidTime`] for negative or non-finite `t`
    /// and [`ChainError::UnavailableInitialState`] without an initial state.
    pub fn state_at_real_time(&self, t: f64) -> Result<Vec<f64>, ChainError> {
        const QUERY: &str = "state_at_real_time";
        if !t.is_finite() || t < 0.0 {
            return Err(ChainError::InvalidTime { t });
        }
        if self.initial.is_none() {
            return Err(ChainError::UnavailableInitialState { query: QUERY });
        }
        let spectrum = self.spectrum()?;
        let coefficients = self.coefficients(spectrum, QUERY)?;
        let eigenvalues = spectrum.eigenvalues();
        Ok(spectrum.real_combination(0..eigenvalues.len(), |i| {
            let l = eigenvalues[i];
            let power = if l.norm() == 0.0 {
                Complex64::new(if t == 0.0 { 1.0 } else { 0.0 }, 0.0)
            } else {
                l.powf(t)
            };
            coefficients[i] * power
        }))
    }

    /// Long-run distribution, normalized to sum to one.
    ///
    /// With a single unit eigenvalue the answer depends only on the
    /// transition matrix. With several (the chain splits into
    /// non-communicating closed classes) the initial state decides how the
    /// mass is shared, so it must have been supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NoStationaryEigenvalue`] if no eigenvalue is
    /// within tolerance of one, and [`ChainError::UnavailableInitialState`]
    /// if the unit eigenspace is degenerate and there is no initial state.
    pub fn stationary_state(&self) -> Result<Vec<f64>, ChainError> {
        self.spectrum()?
            .stationary_distribution(self.config.stationary_tolerance())
    }
}

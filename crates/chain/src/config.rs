//! Numerical configuration for chain validation and spectral evaluation.

use crate::error::ChainError;

/// Default absolute tolerance for column sums and initial-state sums.
pub const DEFAULT_STOCHASTIC_TOLERANCE: f64 = 1e-6;

/// Default absolute tolerance for identifying eigenvalues equal to one.
pub const DEFAULT_STATIONARY_TOLERANCE: f64 = 1e-6;

/// Default distance under which sorted eigenvalues share an eigenspace.
pub const DEFAULT_CLUSTER_TOLERANCE: f64 = 1e-6;

/// Default iteration cap for the Schur and SVD solvers.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Configuration for chain construction and evaluation.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use eigenwalk_chain::ChainConfig;
///
/// let config = ChainConfig::new()
///     .with_stochastic_tolerance(1e-9)
///     .with_max_iterations(500);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ChainConfig {
    stochastic_tolerance: f64,
    stationary_tolerance: f64,
    cluster_tolerance: f64,
    max_iterations: usize,
}

impl ChainConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: all tolerances `1e-6`, `max_iterations = 10_000`.
    pub fn new() -> Self {
        Self {
            stochastic_tolerance: DEFAULT_STOCHASTIC_TOLERANCE,
            stationary_tolerance: DEFAULT_STATIONARY_TOLERANCE,
            cluster_tolerance: DEFAULT_CLUSTER_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Sets the tolerance for column sums and initial-state sums.
    pub fn with_stochastic_tolerance(mut self, tol: f64) -> Self {
        self.stochastic_tolerance = tol;
        self
    }

    /// Sets the tolerance for treating an eigenvalue as exactly one.
    pub fn with_stationary_tolerance(mut self, tol: f64) -> Self {
        self.stationary_tolerance = tol;
        self
    }

    /// Sets the eigenvalue clustering tolerance.
    ///
    /// Also bounds eigenvector quality: residuals above its square root, or
    /// an eigenbasis conditioned worse than its reciprocal, are rejected as
    /// [`ChainError::SingularEigenbasis`].
    pub fn with_cluster_tolerance(mut self, tol: f64) -> Self {
        self.cluster_tolerance = tol;
        self
    }

    /// Sets the iteration cap for the eigensolvers.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    // --- Accessors ---

    /// Returns the tolerance for column sums and initial-state sums.
    pub fn stochastic_tolerance(&self) -> f64 {
        self.stochastic_tolerance
    }

    /// Returns the tolerance for treating an eigenvalue as exactly one.
    pub fn stationary_tolerance(&self) -> f64 {
        self.stationary_tolerance
    }

    /// Returns the eigenvalue clustering tolerance.
    pub fn cluster_tolerance(&self) -> f64 {
        self.cluster_tolerance
    }

    /// Returns the iteration cap for the eigensolvers.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Validates this configuration.
    ///
    /// Tolerances must be finite and positive; `max_iterations` must be
    /// non-zero.
    pub fn validate(&self) -> Result<(), ChainError> {
        Self::validate_tolerance(self.stochastic_tolerance, "stochastic_tolerance")?;
        Self::validate_tolerance(self.stationary_tolerance, "stationary_tolerance")?;
        Self::validate_tolerance(self.cluster_tolerance, "cluster_tolerance")?;
        if self.max_iterations == 0 {
            return Err(ChainError::InvalidConfig {
                reason: "max_iterations must be > 0".to_string(),
            });
        }
        Ok(())
    }

    fn validate_tolerance(tol: f64, name: &str) -> Result<(), ChainError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ChainError::InvalidConfig {
                reason: format!("{name} must be finite and positive, got {tol}"),
            });
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ChainConfig::new();
        assert!((cfg.stochastic_tolerance() - 1e-6).abs() < f64::EPSILON);
        assert!((cfg.stationary_tolerance() - 1e-6).abs() < f64::EPSILON);
        assert!((cfg.cluster_tolerance() - 1e-6).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations(), 10_000);
    }

    #[test]
    fn builder_chaining() {
        let cfg = ChainConfig::new()
            .with_stochastic_tolerance(1e-8)
            .with_stationary_tolerance(1e-7)
            .with_cluster_tolerance(1e-5)
            .with_max_iterations(42);
        assert!((cfg.stochastic_tolerance() - 1e-8).abs() < f64::EPSILON);
        assert!((cfg.stationary_tolerance() - 1e-7).abs() < f64::EPSILON);
        assert!((cfg.cluster_tolerance() - 1e-5).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations(), 42);
    }

    #[test]
    fn validate_ok() {
        assert!(ChainConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_bad_tolerances() {
        assert!(
            ChainConfig::new()
                .with_stochastic_tolerance(0.0)
                .validate()
                .is_err()
        );
        assert!(
            ChainConfig::new()
                .with_stationary_tolerance(-1e-6)
                .validate()
                .is_err()
        );
        assert!(
            ChainConfig::new()
                .with_cluster_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            ChainConfig::new()
                .with_cluster_tolerance(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_zero_iterations() {
        assert!(matches!(
            ChainConfig::new().with_max_iterations(0).validate(),
            Err(ChainError::InvalidConfig { .. })
        ));
    }
}

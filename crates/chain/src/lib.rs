//! Closed-form analysis of finite discrete-time Markov chains.
//!
//! A [`MarkovChain`] is built from a column-stochastic transition matrix and
//! an optional initial distribution. The first query triggers a single
//! eigendecomposition which is cached; every later query is a closed-form
//! evaluation over that [`Spectrum`].
//!
//! # Pipeline
//!
//! ```text
//!  ┌────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//!  │  validate   │────▶│   spectral    │────▶│ coefficients │────▶│   queries    │
//!  │ (construct) │     │ (eigenpairs)  │     │  (V c = x₀)  │     │ (closed form)│
//!  └────────────┘     └──────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! | Query | Formula | Needs initial state |
//! |-------|---------|---------------------|
//! | [`MarkovChain::state_at_time`] | `Re(Σ cᵢ λᵢᵗ vᵢ)` | always |
//! | [`MarkovChain::stationary_state`] | unit-eigenvalue eigenvector(s), sum-normalized | only if λ = 1 is repeated |
//!
//! # Quick start
//!
//! ```
//! use eigenwalk_chain::{ChainError, MarkovChain};
//!
//! let chain = MarkovChain::new(&[vec![0.9, 0.5], vec![0.1, 0.5]], None).unwrap();
//!
//! let stationary = chain.stationary_state().unwrap();
//! assert!((stationary[1] - 1.0 / 6.0).abs() < 1e-9);
//!
//! // Time evolution needs a starting distribution.
//! assert!(matches!(
//!     chain.state_at_time(3),
//!     Err(ChainError::UnavailableInitialState { .. })
//! ));
//! ```

pub mod chain;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod evolution;
pub mod spectral;
pub mod validate;

pub use chain::MarkovChain;
pub use config::ChainConfig;
pub use error::ChainError;
pub use evolution::StateEvolution;
pub use spectral::{Spectrum, renormalize};

pub use num_complex::Complex64;

//! Gambler's ruin as an absorbing Markov chain.
//!
//! A gambler bets one unit at a time, winning with probability `prob_up`,
//! until the stake reaches either limit. Both limits are absorbing states,
//! so the chain's unit eigenvalue is repeated and the stationary state
//! depends on where the gambler starts.
//!
//! ```
//! use eigenwalk_ruin::{RuinConfig, absorption, gamblers_ruin};
//!
//! let config = RuinConfig::new()
//!     .with_limits(0, 10)
//!     .with_initial_position(5);
//! let chain = gamblers_ruin(&config).unwrap();
//! let odds = absorption(&chain).unwrap();
//!
//! assert!((odds.ruin - 0.5).abs() < 1e-9);
//! assert!((odds.target - 0.5).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod walk;

pub use config::RuinConfig;
pub use error::RuinError;
pub use walk::{
    Absorption, absorption, gamblers_ruin, initial_state, target_probability, transition_matrix,
};

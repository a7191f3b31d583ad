//! Board-game occupancy probabilities.
//!
//! Players move round a 40-square board by rolling two dice, with a jail
//! square, a "go to jail" square and chance cards that move them elsewhere.
//! Two independent simulators answer "where is a player after `t` turns?":
//!
//! | Simulator | Method | Cost |
//! |-----------|--------|------|
//! | [`BoardMarkov`] | eigendecomposed transition matrix, closed form | one 40×40 decomposition |
//! | [`BoardMonteCarlo`] | many simulated players | `O(players × turns)` |
//!
//! Both implement [`StateEvolution`](eigenwalk_chain::StateEvolution), so
//! [`compare_at`] can put them side by side.
//!
//! ```
//! use eigenwalk_board::{BoardMarkov, BoardSettings, JAIL};
//!
//! let board = BoardMarkov::new(BoardSettings::new()).unwrap();
//! let pi = board.stationary_state().unwrap();
//! assert!(pi[JAIL] > pi[0]);
//! ```

pub mod compare;
pub mod dice;
pub mod error;
pub mod markov;
pub mod monte_carlo;
pub mod settings;

pub use compare::{Comparison, compare_at};
pub use dice::dice_roll_prob;
pub use error::BoardError;
pub use markov::{BoardMarkov, transition_matrix};
pub use monte_carlo::BoardMonteCarlo;
pub use settings::{BOARD_SIZE, BoardSettings, GO_TO_JAIL, JAIL};

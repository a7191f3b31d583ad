//! Error types for the eigenwalk-board crate.

use eigenwalk_chain::ChainError;

/// Error type for all fallible operations in the eigenwalk-board crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BoardError {
    /// Returned when the chance deck is empty.
    #[error("n_chance must be > 0")]
    EmptyChanceDeck,

    /// Returned when the deck has fewer cards than advance targets.
    #[error("chance deck has {n_chance} cards but {n_advances} advance targets")]
    TooManyAdvances {
        /// Number of cards in the deck.
        n_chance: usize,
        /// Number of advance-to targets.
        n_advances: usize,
    },

    /// Returned when a configured square lies off the board.
    #[error("square {square} is off the board (must be < {board_size})")]
    SquareOutOfRange {
        /// The offending square.
        square: usize,
        /// Number of squares on the board.
        board_size: usize,
    },

    /// Returned when a Monte-Carlo simulation is asked to run with no players.
    #[error("n_players must be > 0")]
    NoPlayers,

    /// Returned when the analytic chain rejects the model or a query fails.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

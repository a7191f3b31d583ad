//! Board layout and house rules.

use crate::error::BoardError;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 40;

/// The jail square.
pub const JAIL: usize = 10;

/// The "go to jail" square.
pub const GO_TO_JAIL: usize = 30;

/// Rules that shape the transition probabilities.
///
/// # Example
///
/// ```
/// use eigenwalk_board::BoardSettings;
///
/// let settings = BoardSettings::new().with_three_doubles_jail(false);
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.chance_locs(), &[2, 7, 17, 22, 36]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoardSettings {
    three_doubles_jail: bool,
    n_chance: usize,
    chance_locs: Vec<usize>,
    chance_advances: Vec<usize>,
}

impl BoardSettings {
    /// Creates the standard settings.
    ///
    /// Defaults: three doubles send a player to jail, a 16-card deck on
    /// squares 2, 7, 17, 22 and 36, with advance-to cards for squares 0, 24,
    /// 11 and 10.
    pub fn new() -> Self {
        Self {
            three_doubles_jail: true,
            n_chance: 16,
            chance_locs: vec![2, 7, 17, 22, 36],
            chance_advances: vec![0, 24, 11, 10],
        }
    }

    /// Enables or disables the three-doubles jail rule.
    pub fn with_three_doubles_jail(mut self, enabled: bool) -> Self {
        self.three_doubles_jail = enabled;
        self
    }

    /// Sets the number of cards in the chance deck.
    pub fn with_n_chance(mut self, n: usize) -> Self {
        self.n_chance = n;
        self
    }

    /// Sets the squares that draw a chance card.
    pub fn with_chance_locs(mut self, locs: Vec<usize>) -> Self {
        self.chance_locs = locs;
        self
    }

    /// Sets the squares that advance-to cards send a player to.
    pub fn with_chance_advances(mut self, advances: Vec<usize>) -> Self {
        self.chance_advances = advances;
        self
    }

    /// Whether rolling three doubles sends a player to jail.
    pub fn three_doubles_jail(&self) -> bool {
        self.three_doubles_jail
    }

    /// Number of cards in the chance deck.
    pub fn n_chance(&self) -> usize {
        self.n_chance
    }

    /// Squares that draw a chance card.
    pub fn chance_locs(&self) -> &[usize] {
        &self.chance_locs
    }

    /// Squares that advance-to cards send a player to.
    pub fn chance_advances(&self) -> &[usize] {
        &self.chance_advances
    }

    /// Validates these settings.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.n_chance == 0 {
            return Err(BoardError::EmptyChanceDeck);
        }
        if self.chance_advances.len() > self.n_chance {
            return Err(BoardError::TooManyAdvances {
                n_chance: self.n_chance,
                n_advances: self.chance_advances.len(),
            });
        }
        for &square in self.chance_locs.iter().chain(&self.chance_advances) {
            if square >= BOARD_SIZE {
                return Err(BoardError::SquareOutOfRange {
                    square,
                    board_size: BOARD_SIZE,
                });
            }
        }
        Ok(())
    }
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = BoardSettings::new();
        assert!(s.three_doubles_jail());
        assert_eq!(s.n_chance(), 16);
        assert_eq!(s.chance_locs(), &[2, 7, 17, 22, 36]);
        assert_eq!(s.chance_advances(), &[0, 24, 11, 10]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_empty_deck() {
        assert!(matches!(
            BoardSettings::new().with_n_chance(0).validate(),
            Err(BoardError::EmptyChanceDeck)
        ));
    }

    #[test]
    fn validate_too_many_advances() {
        assert!(matches!(
            BoardSettings::new().with_n_chance(3).validate(),
            Err(BoardError::TooManyAdvances {
                n_chance: 3,
                n_advances: 4
            })
        ));
    }

    #[test]
    fn validate_squares_on_board() {
        assert!(matches!(
            BoardSettings::new().with_chance_locs(vec![2, 40]).validate(),
            Err(BoardError::SquareOutOfRange { square: 40, .. })
        ));
        assert!(matches!(
            BoardSettings::new()
                .with_chance_advances(vec![55])
                .validate(),
            Err(BoardError::SquareOutOfRange { square: 55, .. })
        ));
    }
}

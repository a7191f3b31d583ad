//! Analytic board occupancy via the eigendecomposed Markov chain.

use eigenwalk_chain::{MarkovChain, StateEvolution};
use tracing::debug;

use crate::dice::{THREE_DOUBLES_PROB, dice_roll_prob};
use crate::error::BoardError;
use crate::settings::{BOARD_SIZE, BoardSettings, GO_TO_JAIL, JAIL};

/// Builds the column-stochastic single-turn transition matrix.
///
/// For each origin square the steps are applied in order:
///
/// 1. two-dice roll distribution, wrapping past the last square,
/// 2. three-doubles rule: scale by `1 - 1/216` and send `1/216` to jail,
/// 3. mass landing on "go to jail" moves to jail,
/// 4. each chance square hands `1/n_chance` of its remaining mass to each
///    advance target in turn.
pub fn transition_matrix(settings: &BoardSettings) -> Result<Vec<Vec<f64>>, BoardError> {
    settings.validate()?;
    let n_chance = settings.n_chance() as f64;
    let mut m = vec![vec![0.0; BOARD_SIZE]; BOARD_SIZE];

    for from in 0..BOARD_SIZE {
        for roll in 2..=12 {
            m[(from + roll) % BOARD_SIZE][from] = dice_roll_prob(roll);
        }

        if settings.three_doubles_jail() {
            for row in m.iter_mut() {
                row[from] *= 1.0 - THREE_DOUBLES_PROB;
            }
            m[JAIL][from] += THREE_DOUBLES_PROB;
        }

        m[JAIL][from] += m[GO_TO_JAIL][from];
        m[GO_TO_JAIL][from] = 0.0;

        for &chance in settings.chance_locs() {
            for &advance in settings.chance_advances() {
                let moved = m[chance][from] / n_chance;
                m[advance][from] += moved;
                m[chance][from] *= 1.0 - 1.0 / n_chance;
            }
        }
    }
    Ok(m)
}

/// Board occupancy computed in closed form.
#[derive(Debug)]
pub struct BoardMarkov {
    settings: BoardSettings,
    chain: MarkovChain,
}

impl BoardMarkov {
    /// Builds the chain with every player starting on square 0.
    #[tracing::instrument(skip_all)]
    pub fn new(settings: BoardSettings) -> Result<Self, BoardError> {
        let matrix = transition_matrix(&settings)?;
        let mut initial = vec![0.0; BOARD_SIZE];
        initial[0] = 1.0;
        let chain = MarkovChain::new(&matrix, Some(&initial))?;
        debug!(n_states = chain.n_states(), "board chain built");
        Ok(Self { settings, chain })
    }

    /// The rules this chain was built from.
    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// The underlying Markov chain.
    pub fn chain(&self) -> &MarkovChain {
        &self.chain
    }

    /// Occupancy probabilities after `t` turns.
    pub fn state_at_time(&self, t: u32) -> Result<Vec<f64>, BoardError> {
        Ok(self.chain.state_at_time(t)?)
    }

    /// Long-run occupancy probabilities.
    pub fn stationary_state(&self) -> Result<Vec<f64>, BoardError> {
        Ok(self.chain.stationary_state()?)
    }
}

impl StateEvolution for BoardMarkov {
    type Error = BoardError;

    fn n_states(&self) -> usize {
        BOARD_SIZE
    }

    fn state_at_time(&mut self, t: u32) -> Result<Vec<f64>, BoardError> {
        BoardMarkov::state_at_time(self, t)
    }
}

//! Board occupancy estimated by simulating many independent players.

use eigenwalk_chain::StateEvolution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::error::BoardError;
use crate::settings::{BOARD_SIZE, BoardSettings, GO_TO_JAIL, JAIL};

/// Builds a seeded or OS-sourced RNG.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Monte-Carlo board simulator.
///
/// Every player starts on square 0. The position history grows lazily: asking
/// for turn `t` simulates any turns not yet played and keeps them, so later
/// queries for earlier turns are answered from the stored history.
#[derive(Debug)]
pub struct BoardMonteCarlo {
    settings: BoardSettings,
    rng: StdRng,
    history: Vec<Vec<usize>>,
    doubles_run: Vec<u32>,
}

impl BoardMonteCarlo {
    /// Creates a simulator for `n_players` players.
    ///
    /// `n_players` trades accuracy for run time.
    pub fn new(
        settings: BoardSettings,
        n_players: usize,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        settings.validate()?;
        if n_players == 0 {
            return Err(BoardError::NoPlayers);
        }
        Ok(Self {
            settings,
            rng: make_rng(seed),
            history: vec![vec![0; n_players]],
            doubles_run: vec![0; n_players],
        })
    }

    /// Number of simulated players.
    pub fn n_players(&self) -> usize {
        self.history[0].len()
    }

    /// Number of turns simulated so far.
    pub fn turns_played(&self) -> usize {
        self.history.len() - 1
    }

    /// Positions of every player after turn `t`, if already simulated.
    pub fn positions(&self, t: usize) -> Option<&[usize]> {
        self.history.get(t).map(Vec::as_slice)
    }

    /// Plays one turn for every player.
    #[tracing::instrument(level = "trace", skip_all, fields(turn = self.history.len()))]
    pub fn advance(&mut self) {
        let n_chance = self.settings.n_chance();
        let n_advances = self.settings.chance_advances().len();
        let prev = &self.history[self.history.len() - 1];
        let mut next = Vec::with_capacity(prev.len());

        for (player, &from) in prev.iter().enumerate() {
            let d1: usize = self.rng.random_range(1..=6);
            let d2: usize = self.rng.random_range(1..=6);

            let mut square = (from + d1 + d2) % BOARD_SIZE;
            if square == GO_TO_JAIL {
                square = JAIL;
            }

            let draws_advance = self.rng.random_range(0..n_chance) < n_advances;
            if draws_advance && self.settings.chance_locs().contains(&square) {
                let card = self.rng.random_range(0..n_advances);
                square = self.settings.chance_advances()[card];
            }

            if d1 == d2 {
                self.doubles_run[player] += 1;
            } else {
                self.doubles_run[player] = 0;
            }
            if self.settings.three_doubles_jail() && self.doubles_run[player] >= 3 {
                square = JAIL;
            }

            next.push(square);
        }

        self.history.push(next);
        trace!(turn = self.turns_played(), "monte carlo turn played");
    }

    /// Fraction of players on each square after `t` turns.
    pub fn state_at_time(&mut self, t: u32) -> Vec<f64> {
        let t = t as usize;
        while self.history.len() < t + 1 {
            self.advance();
        }
        let mut counts = vec![0usize; BOARD_SIZE];
        for &square in &self.history[t] {
            counts[square] += 1;
        }
        let n = self.n_players() as f64;
        counts.into_iter().map(|c| c as f64 / n).collect()
    }
}

impl StateEvolution for BoardMonteCarlo {
    type Error = BoardError;

    fn n_states(&self) -> usize {
        BOARD_SIZE
    }

    fn state_at_time(&mut self, t: u32) -> Result<Vec<f64>, BoardError> {
        Ok(BoardMonteCarlo::state_at_time(self, t))
    }
}

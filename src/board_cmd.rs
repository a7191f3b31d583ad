//! Board command: analytic chain against Monte Carlo at one turn.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eigenwalk_board::{BOARD_SIZE, BoardError, BoardMarkov, BoardMonteCarlo, compare_at};
use eigenwalk_chain::StateEvolution;

use crate::cli::BoardArgs;
use crate::config::EigenwalkConfig;
use crate::convert;
use crate::report::{BoardReport, SquareRow, write_report};

/// Run the board comparison.
pub fn run(args: BoardArgs, config: &EigenwalkConfig, output: Option<&Path>) -> Result<()> {
    let _cmd = info_span!("board").entered();
    let settings = convert::build_board_settings(&config.board)?;
    let step = args.step.unwrap_or(config.board.step);
    let n_players = args.players.unwrap_or(config.board.n_players);
    let seed = args.seed.or(config.board.seed);

    let mut analytic = BoardMarkov::new(settings.clone()).context("failed to build board chain")?;
    let mut monte_carlo = BoardMonteCarlo::new(settings, n_players, seed)
        .context("failed to set up Monte-Carlo simulation")?;
    info!(step, n_players, "comparing simulators");

    let stationary = analytic
        .stationary_state()
        .context("failed to resolve stationary occupancy")?;

    let analytic_sim: &mut dyn StateEvolution<Error = BoardError> = &mut analytic;
    let mc_sim: &mut dyn StateEvolution<Error = BoardError> = &mut monte_carlo;
    let comparison = compare_at(step, &mut [("analytic", analytic_sim), ("monte_carlo", mc_sim)])
        .context("failed to evaluate simulators")?;
    info!(max_deviation = comparison.max_deviation(), "comparison done");

    let squares = (0..BOARD_SIZE)
        .map(|square| SquareRow {
            square,
            occupancy: comparison
                .series
                .iter()
                .map(|(label, dist)| (label.clone(), dist[square]))
                .collect::<BTreeMap<_, _>>(),
            stationary: stationary[square],
        })
        .collect();

    let report = BoardReport {
        step,
        n_players,
        seed,
        max_deviation: comparison.max_deviation(),
        squares,
    };
    write_report(&report, output)
}

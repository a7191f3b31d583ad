//! Chain command: spectrum, trajectory and stationary state of a matrix file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use eigenwalk_chain::MarkovChain;

use crate::cli::ChainArgs;
use crate::config::{ChainInput, EigenwalkConfig, read_toml};
use crate::convert;
use crate::report::{ChainReport, write_report};

/// Run the chain analysis.
pub fn run(args: ChainArgs, config: &EigenwalkConfig, output: Option<&Path>) -> Result<()> {
    let _cmd = info_span!("chain").entered();
    let input: ChainInput = read_toml(&args.matrix)?;
    let chain_cfg = convert::build_chain_config(&config.chain)?;

    let chain = MarkovChain::with_config(&input.matrix, input.initial.as_deref(), chain_cfg)
        .with_context(|| format!("invalid chain in {}", args.matrix.display()))?;
    info!(n_states = chain.n_states(), "chain loaded");

    let report = analyze(&chain, args.steps)?;
    write_report(&report, output)
}

/// Builds the report for an already validated chain.
fn analyze(chain: &MarkovChain, steps: u32) -> Result<ChainReport> {
    let spectrum = chain.spectrum().context("spectral decomposition failed")?;
    let eigenvalues = spectrum.eigenvalues().iter().map(|l| [l.re, l.im]).collect();

    let trajectory = if chain.initial_state().is_some() {
        let states = (0..=steps)
            .map(|t| chain.state_at_time(t))
            .collect::<Result<Vec<_>, _>>()
            .context("failed to evaluate trajectory")?;
        Some(states)
    } else {
        None
    };

    let (stationary, stationary_note) = match chain.stationary_state() {
        Ok(pi) => (Some(pi), None),
        Err(e) => {
            warn!(error = %e, "stationary state not resolved");
            (None, Some(e.to_string()))
        }
    };

    Ok(ChainReport {
        n_states: chain.n_states(),
        eigenvalues,
        trajectory,
        stationary,
        stationary_note,
    })
}

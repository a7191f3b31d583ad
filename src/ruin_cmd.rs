//! Ruin command: absorption probabilities of the gambler's ruin walk.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eigenwalk_ruin::{absorption, gamblers_ruin, target_probability};

use crate::cli::RuinArgs;
use crate::config::EigenwalkConfig;
use crate::convert;
use crate::report::{BoundaryMass, RuinReport, write_report};

/// Run the gambler's ruin analysis.
pub fn run(args: RuinArgs, config: &EigenwalkConfig, output: Option<&Path>) -> Result<()> {
    let _cmd = info_span!("ruin").entered();

    // CLI flags override the [ruin] section.
    let mut ruin_toml = config.ruin.clone();
    if let Some(lower) = args.lower {
        ruin_toml.lower_limit = lower;
    }
    if let Some(upper) = args.upper {
        ruin_toml.upper_limit = upper;
    }
    if let Some(start) = args.start {
        ruin_toml.initial_position = start;
    }
    if let Some(p) = args.prob_up {
        ruin_toml.prob_up = p;
    }
    let ruin_cfg = convert::build_ruin_config(&ruin_toml)?;

    let chain = gamblers_ruin(&ruin_cfg).context("failed to build ruin chain")?;
    let odds = absorption(&chain).context("failed to resolve absorption probabilities")?;
    info!(ruin = odds.ruin, target = odds.target, "absorption resolved");

    let history = match args.steps {
        Some(steps) => {
            let last = chain.n_states() - 1;
            let rows = (0..=steps)
                .map(|t| {
                    chain.state_at_time(t).map(|x| BoundaryMass {
                        t,
                        ruin: x[0],
                        target: x[last],
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .context("failed to evaluate boundary mass")?;
            Some(rows)
        }
        None => None,
    };

    let report = RuinReport {
        lower_limit: ruin_cfg.lower_limit(),
        upper_limit: ruin_cfg.upper_limit(),
        initial_position: ruin_cfg.initial_position(),
        prob_up: ruin_cfg.prob_up(),
        ruin_probability: odds.ruin,
        target_probability: odds.target,
        closed_form_target: target_probability(&ruin_cfg)?,
        history,
    };
    write_report(&report, output)
}

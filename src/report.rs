//! JSON reports written by every subcommand.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Writes `report` as pretty JSON to `output`, or to stdout when `None`.
pub fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Output of the `chain` subcommand.
#[derive(Debug, Serialize)]
pub struct ChainReport {
    pub n_states: usize,
    /// Sorted eigenvalues as `[re, im]` pairs.
    pub eigenvalues: Vec<[f64; 2]>,
    /// Distributions for `t = 0..=steps`, present when an initial state was given.
    pub trajectory: Option<Vec<Vec<f64>>>,
    pub stationary: Option<Vec<f64>>,
    /// Why the stationary state could not be resolved, if it could not.
    pub stationary_note: Option<String>,
}

/// Boundary mass at one step of the ruin walk.
#[derive(Debug, Serialize)]
pub struct BoundaryMass {
    pub t: u32,
    pub ruin: f64,
    pub target: f64,
}

/// Output of the `ruin` subcommand.
#[derive(Debug, Serialize)]
pub struct RuinReport {
    pub lower_limit: i64,
    pub upper_limit: i64,
    pub initial_position: i64,
    pub prob_up: f64,
    pub ruin_probability: f64,
    pub target_probability: f64,
    /// Classical closed form for the target probability, as a cross-check.
    pub closed_form_target: f64,
    pub history: Option<Vec<BoundaryMass>>,
}

/// One square of the board comparison.
#[derive(Debug, Serialize)]
pub struct SquareRow {
    pub square: usize,
    /// Occupancy at `step` for each simulator, keyed by label.
    pub occupancy: BTreeMap<String, f64>,
    pub stationary: f64,
}

/// Output of the `board` subcommand.
#[derive(Debug, Serialize)]
pub struct BoardReport {
    pub step: u32,
    pub n_players: usize,
    pub seed: Option<u64>,
    pub max_deviation: f64,
    pub squares: Vec<SquareRow>,
}

/// One page of the ranking.
#[derive(Debug, Serialize)]
pub struct PageScore {
    pub page: String,
    pub rank: f64,
}

/// Output of the `pagerank` subcommand, highest rank first.
#[derive(Debug, Serialize)]
pub struct PageRankReport {
    pub ranking: Vec<PageScore>,
}

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Top-level eigenwalk configuration.
///
/// Every section is optional; missing fields take their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EigenwalkConfig {
    /// Numerical tolerances for the `chain` subcommand.
    #[serde(default)]
    pub chain: ChainToml,

    /// Gambler's ruin settings.
    #[serde(default)]
    pub ruin: RuinToml,

    /// Board-game settings.
    #[serde(default)]
    pub board: BoardToml,
}

impl EigenwalkConfig {
    /// Reads the config file, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => read_toml(p),
            None => Ok(Self::default()),
        }
    }
}

/// Reads and parses a TOML file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read TOML file: {}", path.display()))?;
    toml::from_str(&toml_str).with_context(|| format!("failed to parse TOML: {}", path.display()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainToml {
    #[serde(default = "default_tolerance")]
    pub stochastic_tolerance: f64,
    #[serde(default = "default_tolerance")]
    pub stationary_tolerance: f64,
    #[serde(default = "default_tolerance")]
    pub cluster_tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for ChainToml {
    fn default() -> Self {
        Self {
            stochastic_tolerance: default_tolerance(),
            stationary_tolerance: default_tolerance(),
            cluster_tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_tolerance() -> f64 {
    1e-6
}
fn default_max_iterations() -> usize {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuinToml {
    #[serde(default)]
    pub lower_limit: i64,
    #[serde(default = "default_upper_limit")]
    pub upper_limit: i64,
    #[serde(default = "default_initial_position")]
    pub initial_position: i64,
    #[serde(default = "default_prob_up")]
    pub prob_up: f64,
}

impl Default for RuinToml {
    fn default() -> Self {
        Self {
            lower_limit: 0,
            upper_limit: default_upper_limit(),
            initial_position: default_initial_position(),
            prob_up: default_prob_up(),
        }
    }
}

fn default_upper_limit() -> i64 {
    200
}
fn default_initial_position() -> i64 {
    100
}
fn default_prob_up() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardToml {
    #[serde(default = "default_true")]
    pub three_doubles_jail: bool,
    #[serde(default = "default_n_chance")]
    pub n_chance: usize,
    #[serde(default = "default_chance_locs")]
    pub chance_locs: Vec<usize>,
    #[serde(default = "default_chance_advances")]
    pub chance_advances: Vec<usize>,
    #[serde(default = "default_n_players")]
    pub n_players: usize,
    #[serde(default = "default_step")]
    pub step: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BoardToml {
    fn default() -> Self {
        Self {
            three_doubles_jail: true,
            n_chance: default_n_chance(),
            chance_locs: default_chance_locs(),
            chance_advances: default_chance_advances(),
            n_players: default_n_players(),
            step: default_step(),
            seed: None,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_n_chance() -> usize {
    16
}
fn default_chance_locs() -> Vec<usize> {
    vec![2, 7, 17, 22, 36]
}
fn default_chance_advances() -> Vec<usize> {
    vec![0, 24, 11, 10]
}
fn default_n_players() -> usize {
    10_000
}
fn default_step() -> u32 {
    20
}

/// Input file for the `chain` subcommand.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainInput {
    /// Column-stochastic transition matrix, one inner array per row.
    pub matrix: Vec<Vec<f64>>,
    /// Optional initial distribution.
    #[serde(default)]
    pub initial: Option<Vec<f64>>,
}

/// Input file for the `pagerank` subcommand.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphInput {
    /// Outgoing links of every page.
    pub links: BTreeMap<String, Vec<String>>,
}

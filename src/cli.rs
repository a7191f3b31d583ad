use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Closed-form Markov chain analysis.
#[derive(Parser)]
#[command(
    name = "eigenwalk",
    version,
    about = "Closed-form analysis of discrete-time Markov chains"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Analyze a transition matrix read from a TOML file.
    Chain(ChainArgs),
    /// Absorption probabilities of the gambler's ruin walk.
    Ruin(RuinArgs),
    /// Board-game occupancy: analytic chain against Monte Carlo.
    Board(BoardArgs),
    /// Rank pages of a link graph read from a TOML file.
    Pagerank(PagerankArgs),
}

/// Arguments for the `chain` subcommand.
#[derive(clap::Args)]
pub struct ChainArgs {
    /// TOML file with `matrix = [[..]]` and optional `initial = [..]`.
    #[arg(short, long)]
    pub matrix: PathBuf,

    /// Report distributions for t = 0..=steps (needs an initial state).
    #[arg(long, default_value_t = 10)]
    pub steps: u32,
}

/// Arguments for the `ruin` subcommand.
#[derive(clap::Args)]
pub struct RuinArgs {
    /// Override the lower stake limit from config.
    #[arg(long, allow_hyphen_values = true)]
    pub lower: Option<i64>,

    /// Override the upper stake limit from config.
    #[arg(long, allow_hyphen_values = true)]
    pub upper: Option<i64>,

    /// Override the starting stake from config.
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// Override the probability of winning a bet.
    #[arg(long = "prob-up")]
    pub prob_up: Option<f64>,

    /// Also report boundary mass for t = 0..=steps.
    #[arg(long)]
    pub steps: Option<u32>,
}

/// Arguments for the `board` subcommand.
#[derive(clap::Args)]
pub struct BoardArgs {
    /// Override the turn to compare the simulators at.
    #[arg(long)]
    pub step: Option<u32>,

    /// Override the number of Monte-Carlo players.
    #[arg(long)]
    pub players: Option<usize>,

    /// Override the Monte-Carlo RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `pagerank` subcommand.
#[derive(clap::Args)]
pub struct PagerankArgs {
    /// TOML file with a `[links]` table mapping each page to its links.
    #[arg(short, long)]
    pub graph: PathBuf,
}

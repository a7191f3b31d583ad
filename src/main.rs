mod board_cmd;
mod chain_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod pagerank_cmd;
mod report;
mod ruin_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::EigenwalkConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EigenwalkConfig::load(cli.config.as_deref())?;
    let output = cli.output.as_deref();
    match cli.command {
        Command::Chain(args) => chain_cmd::run(args, &config, output),
        Command::Ruin(args) => ruin_cmd::run(args, &config, output),
        Command::Board(args) => board_cmd::run(args, &config, output),
        Command::Pagerank(args) => pagerank_cmd::run(args, output),
    }
}

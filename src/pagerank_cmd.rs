//! Pagerank command: stationary ranking of a link graph file.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eigenwalk_pagerank::page_rank;

use crate::cli::PagerankArgs;
use crate::config::{GraphInput, read_toml};
use crate::report::{PageRankReport, PageScore, write_report};

/// Run the page ranking.
pub fn run(args: PagerankArgs, output: Option<&Path>) -> Result<()> {
    let _cmd = info_span!("pagerank").entered();
    let input: GraphInput = read_toml(&args.graph)?;
    info!(n_pages = input.links.len(), "link graph loaded");

    let ranks = page_rank(&input.links)
        .with_context(|| format!("failed to rank pages in {}", args.graph.display()))?;

    let mut ranking: Vec<PageScore> = ranks
        .into_iter()
        .map(|(page, rank)| PageScore { page, rank })
        .collect();
    ranking.sort_by(|a, b| b.rank.total_cmp(&a.rank));

    write_report(&PageRankReport { ranking }, output)
}

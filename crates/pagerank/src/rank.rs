//! Link graph to transition matrix and stationary ranking.

use std::collections::BTreeMap;

use eigenwalk_chain::MarkovChain;
use tracing::debug;

use crate::error::PageRankError;

/// Builds the column-stochastic link matrix.
///
/// Pages are indexed in key order. Entry `[q][p]` is the fraction of page
/// `p`'s links that point at page `q`; repeated links count repeatedly.
pub fn link_matrix(graph: &BTreeMap<String, Vec<String>>) -> Result<Vec<Vec<f64>>, PageRankError> {
    if graph.is_empty() {
        return Err(PageRankError::EmptyGraph);
    }
    let index: BTreeMap<&str, usize> = graph
        .keys()
        .enumerate()
        .map(|(i, page)| (page.as_str(), i))
        .collect();

    let n = graph.len();
    let mut m = vec![vec![0.0; n]; n];
    for (p, (page, links)) in graph.iter().enumerate() {
        if links.is_empty() {
            return Err(PageRankError::NoOutgoingLinks { page: page.clone() });
        }
        let weight = 1.0 / links.len() as f64;
        for link in links {
            let q = *index
                .get(link.as_str())
                .ok_or_else(|| PageRankError::UnknownLink {
                    page: page.clone(),
                    link: link.clone(),
                })?;
            m[q][p] += weight;
        }
    }
    Ok(m)
}

/// Ranks every page by its long-run visit probability.
///
/// The random surfer starts on the first page in key order. When the graph
/// splits into several closed groups, only the group reachable from there
/// receives rank.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use eigenwalk_pagerank::page_rank;
///
/// let graph: BTreeMap<String, Vec<String>> = [
///     ("A", vec!["A", "B"]),
///     ("B", vec!["A"]),
/// ]
/// .into_iter()
/// .map(|(p, l)| (p.to_string(), l.into_iter().map(String::from).collect()))
/// .collect();
///
/// let ranks = page_rank(&graph).unwrap();
/// assert!((ranks["A"] - 2.0 / 3.0).abs() < 1e-9);
/// assert!((ranks["B"] - 1.0 / 3.0).abs() < 1e-9);
/// ```
#[tracing::instrument(skip_all, fields(n_pages = graph.len()))]
pub fn page_rank(
    graph: &BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, f64>, PageRankError> {
    let m = link_matrix(graph)?;
    let mut initial = vec![0.0; m.len()];
    initial[0] = 1.0;

    let chain = MarkovChain::new(&m, Some(&initial))?;
    let stationary = chain.stationary_state()?;
    debug!("page ranks resolved");

    Ok(graph.keys().cloned().zip(stationary).collect())
}

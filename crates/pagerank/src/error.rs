//! Error types for the eigenwalk-pagerank crate.

use eigenwalk_chain::ChainError;

/// Error type for all fallible operations in the eigenwalk-pagerank crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PageRankError {
    /// Returned when the link graph has no pages.
    #[error("link graph has no pages")]
    EmptyGraph,

    /// Returned when a page links to a page that is not in the graph.
    #[error("page '{page}' links to unknown page '{link}'")]
    UnknownLink {
        /// The page holding the link.
        page: String,
        /// The link target that is not a page.
        link: String,
    },

    /// Returned when a page has no outgoing links.
    #[error("page '{page}' has no outgoing links")]
    NoOutgoingLinks {
        /// The dangling page.
        page: String,
    },

    /// Returned when the link matrix cannot be evaluated as a Markov chain.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

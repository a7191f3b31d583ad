//! Page ranking from a link graph.
//!
//! Each page's outgoing links define a column of a column-stochastic
//! transition matrix. A random surfer follows links uniformly, and a page's
//! rank is its long-run visit probability: the stationary state of the
//! resulting [`MarkovChain`](eigenwalk_chain::MarkovChain).
//!
//! No damping factor is applied. Every page must have at least one outgoing
//! link, and every link must name a page in the graph.

pub mod error;
pub mod rank;

pub use error::PageRankError;
pub use rank::{link_matrix, page_rank};

//! trueno-rank: `PageRank` for adjacency-list web graphs
//!
//! # Overview
//!
//! trueno-rank loads a web graph from a line-oriented adjacency list, runs
//! `PageRank` power iteration until the perplexity of the rank distribution
//! stabilizes, and reports the top pages by rank and by link count.
//!
//! # Quick Start
//!
//! ```
//! use trueno_rank::{top_by_rank, CancelToken, GraphBuilder, RankEngine, TOP_N};
//!
//! let graph = GraphBuilder::from_records(["home about blog", "about home", "blog home"]);
//!
//! let mut engine = RankEngine::new(graph);
//! engine.initialize()?;
//! let report = engine.run(&CancelToken::new(), |step| {
//!     println!("Run:{} and Perplexity:{}", step.run, step.perplexity);
//! })?;
//! assert!(report.converged);
//!
//! let top = top_by_rank(engine.graph(), engine.ranks(), TOP_N);
//! assert_eq!(top[0].page, "home");
//! # Ok::<(), trueno_rank::RankError>(())
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR link graph with interned page keys and a fixed sink set
//! - **Loading**: async line reader on tokio feeding [`GraphBuilder`]
//! - **Algorithms**: scatter-add power iteration, perplexity-window convergence,
//!   stable top-N rankings
//! - **Report**: plain-text lines to any `io::Write`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod error;
pub mod loader;
pub mod report;
pub mod storage;

// Re-export core types
pub use algorithms::{
    entropy, perplexity, top_by_link_count, top_by_rank, CancelToken, Convergence,
    ConvergenceDetector, EngineState, PerplexityWindow, RankEngine, RankedPage, StepReport,
    DAMPING_FACTOR, TOP_N, WINDOW_SIZE,
};
pub use error::{RankError, Result};
pub use loader::{load_graph, load_reader};
pub use storage::{GraphBuilder, LinkGraph, OutLinks, PageId};

//! Rank algorithms (`PageRank`, convergence detection, rankings)

pub mod convergence;
pub mod pagerank;
pub mod ranking;

pub use convergence::{
    entropy, perplexity, Convergence, ConvergenceDetector, PerplexityWindow, WINDOW_SIZE,
};
pub use pagerank::{CancelToken, EngineState, RankEngine, StepReport, DAMPING_FACTOR};
pub use ranking::{top_by_link_count, top_by_rank, RankedPage, TOP_N};

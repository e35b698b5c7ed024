//! `PageRank` power iteration with sink redistribution
//!
//! Based on Page et al. (1999) "The `PageRank` Citation Ranking: Bringing Order to the Web".
//! Iteration stops when the [`ConvergenceDetector`] reports a stable perplexity
//! window rather than on a numeric tolerance.

use super::convergence::{Convergence, ConvergenceDetector};
use crate::error::{RankError, Result};
use crate::storage::{LinkGraph, PageId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Damping factor for `PageRank` (Google standard)
pub const DAMPING_FACTOR: f64 = 0.85;

/// Lifecycle of a [`RankEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Graph attached, no ranks yet
    Uninitialized,
    /// Uniform ranks, no iteration run
    Ready,
    /// At least one iteration run, not yet stable
    Iterating,
    /// Perplexity window stabilized
    Converged,
}

/// What one iteration produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// 1-based iteration index
    pub run: usize,
    /// Perplexity of the rank vector after this iteration
    pub perplexity: f64,
    /// Rank mass held by sink pages before this iteration
    pub sink_mass: f64,
    /// Whether this iteration triggered convergence
    pub converged: bool,
}

/// External interrupt for [`RankEngine::run`]
///
/// Clones share the same flag, so one can be handed to a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Iterative rank-propagation engine over a [`LinkGraph`]
///
/// Run counter and perplexity window live on the instance, so separate
/// engines never share iteration state.
///
/// # Algorithm
///
/// ```text
/// PR'(p) = (1-d)/N + d * S/N + d * Σ PR(q) / outdegree(q)
/// ```
///
/// Where:
/// - d = 0.85 (damping factor)
/// - N = number of pages
/// - S = rank mass currently held by sink pages
/// - q ranges over every link occurrence q → p (parallel links count twice)
///
/// # Example
///
/// ```
/// use trueno_rank::{CancelToken, GraphBuilder, RankEngine};
///
/// let graph = GraphBuilder::from_records(["a b", "b a"]);
/// let mut engine = RankEngine::new(graph);
/// engine.initialize().unwrap();
///
/// let report = engine.run(&CancelToken::new(), |_| {}).unwrap();
/// assert!(report.converged);
/// assert!((engine.rank_of("a").unwrap() - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct RankEngine {
    graph: LinkGraph,
    ranks: Vec<f64>,
    next_ranks: Vec<f64>,
    detector: ConvergenceDetector,
    state: EngineState,
    run: usize,
    last: Option<StepReport>,
}

impl RankEngine {
    /// Attach a graph; ranks are assigned by [`initialize`](Self::initialize)
    #[must_use]
    pub fn new(graph: LinkGraph) -> Self {
        Self {
            graph,
            ranks: Vec::new(),
            next_ranks: Vec::new(),
            detector: ConvergenceDetector::new(),
            state: EngineState::Uninitialized,
            run: 0,
            last: None,
        }
    }

    /// Assign every page rank `1/N`
    ///
    /// # Errors
    ///
    /// `EmptyGraph` if the graph has no pages, `InvalidState` if already initialized.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(RankError::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }
        self.reset()
    }

    /// Return to `Ready` with uniform ranks, run counter 0 and an empty window
    ///
    /// # Errors
    ///
    /// `EmptyGraph` if the graph has no pages.
    #[allow(clippy::cast_precision_loss)] // Graphs >2^52 pages unlikely
    pub fn reset(&mut self) -> Result<()> {
        let n = self.graph.num_pages();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }

        self.ranks = vec![1.0 / n as f64; n];
        self.next_ranks = vec![0.0; n];
        self.detector.reset();
        self.run = 0;
        self.last = None;
        self.state = EngineState::Ready;

        debug!(
            pages = n,
            sinks = self.graph.sinks().len(),
            "ranks initialized"
        );
        Ok(())
    }

    /// Run one iteration and consult the convergence detector
    ///
    /// # Errors
    ///
    /// `InvalidState` unless `Ready` or `Iterating`; `MissingOutDegree` if a
    /// linking page has no out-degree entry. On error the rank vector is
    /// left untouched.
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&mut self) -> Result<StepReport> {
        if !matches!(self.state, EngineState::Ready | EngineState::Iterating) {
            return Err(RankError::InvalidState {
                operation: "step",
                state: self.state,
            });
        }

        let n = self.ranks.len() as f64;
        let sink_mass: f64 = self
            .graph
            .sinks()
            .iter()
            .map(|&sink| self.ranks[sink as usize])
            .sum();

        // Teleport plus the uniformly spread sink mass
        self.next_ranks
            .fill((1.0 - DAMPING_FACTOR) / n + DAMPING_FACTOR * sink_mass / n);

        // Scatter each linking page's rank along its links
        let (row_offsets, col_indices, out_degrees) = self.graph.csr_components();
        for (source, &rank) in self.ranks.iter().enumerate() {
            let start = row_offsets[source] as usize;
            let end = row_offsets[source + 1] as usize;
            if start == end {
                continue;
            }

            let degree = out_degrees[source];
            if degree == 0 {
                return Err(self.missing_out_degree(source));
            }

            let share = DAMPING_FACTOR * rank / f64::from(degree);
            for &target in &col_indices[start..end] {
                self.next_ranks[target as usize] += share;
            }
        }

        std::mem::swap(&mut self.ranks, &mut self.next_ranks);
        self.run += 1;

        let (perplexity, decision) = self.detector.observe_ranks(self.run, &self.ranks);
        let converged = decision == Convergence::Converged;
        self.state = if converged {
            EngineState::Converged
        } else {
            EngineState::Iterating
        };

        let report = StepReport {
            run: self.run,
            perplexity,
            sink_mass,
            converged,
        };
        self.last = Some(report);
        Ok(report)
    }

    /// Iterate until convergence, handing every [`StepReport`] to `observer`
    ///
    /// Initializes first if still `Uninitialized`. The token is checked before
    /// each iteration.
    ///
    /// # Errors
    ///
    /// `Cancelled` when the token fires, plus anything from
    /// [`initialize`](Self::initialize) or [`step`](Self::step).
    pub fn run<F>(&mut self, cancel: &CancelToken, mut observer: F) -> Result<StepReport>
    where
        F: FnMut(&StepReport),
    {
        if self.state == EngineState::Uninitialized {
            self.initialize()?;
        }

        loop {
            if cancel.is_cancelled() {
                warn!(run = self.run, "rank computation cancelled");
                return Err(RankError::Cancelled);
            }

            let report = self.step()?;
            observer(&report);

            if report.converged {
                info!(
                    run = report.run,
                    perplexity = report.perplexity,
                    "ranks converged"
                );
                return Ok(report);
            }
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Iterations run since the last (re)initialization
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.run
    }

    /// Current rank vector, indexed by `PageId`
    #[must_use]
    pub fn ranks(&self) -> &[f64] {
        &self.ranks
    }

    /// Current rank of a page by key
    #[must_use]
    pub fn rank_of(&self, page: &str) -> Option<f64> {
        let id = self.graph.page_id(page)?;
        self.ranks.get(id.index()).copied()
    }

    /// Sink mass used by the most recent iteration
    #[must_use]
    pub fn sink_mass(&self) -> Option<f64> {
        self.last.map(|report| report.sink_mass)
    }

    /// Perplexity after the most recent iteration
    #[must_use]
    pub fn perplexity(&self) -> Option<f64> {
        self.last.map(|report| report.perplexity)
    }

    /// Most recent iteration report
    #[must_use]
    pub const fn last_report(&self) -> Option<StepReport> {
        self.last
    }

    /// Graph being ranked
    #[must_use]
    pub const fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    #[allow(clippy::cast_possible_truncation)]
    fn missing_out_degree(&self, source: usize) -> RankError {
        let page = self
            .graph
            .page_name(PageId(source as u32))
            .unwrap_or_default()
            .to_string();
        RankError::MissingOutDegree { page }
    }
}

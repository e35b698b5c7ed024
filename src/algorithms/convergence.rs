//! Perplexity-window convergence test
//!
//! Perplexity is `2^H` where `H` is the base-2 Shannon entropy of the rank
//! distribution. The detector keeps the last [`WINDOW_SIZE`] integer-truncated
//! perplexities and declares convergence once their sum equals
//! `WINDOW_SIZE * current`.
//!
//! The test is deliberately coarse: it works on truncated integers, so small
//! oscillations below 1.0 perplexity go unnoticed, and a window such as
//! `[3, 5, 4, 4]` passes even though its slots differ.

use tracing::debug;

/// Number of observations held by the rolling window
pub const WINDOW_SIZE: usize = 4;

/// Shannon entropy (bits) of a rank distribution
///
/// Zero entries contribute nothing (`0 · log2 0 = 0`).
#[must_use]
pub fn entropy(ranks: &[f64]) -> f64 {
    -ranks
        .iter()
        .filter(|&&rank| rank > 0.0)
        .map(|&rank| rank * rank.log2())
        .sum::<f64>()
}

/// Perplexity `2^entropy` of a rank distribution
///
/// # Example
///
/// ```
/// use trueno_rank::perplexity;
///
/// // Uniform over 8 pages: entropy 3 bits, perplexity 8
/// let ranks = vec![0.125; 8];
/// assert!((perplexity(&ranks) - 8.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn perplexity(ranks: &[f64]) -> f64 {
    entropy(ranks).exp2()
}

/// Fixed-capacity shift register of truncated perplexities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerplexityWindow {
    slots: [i64; WINDOW_SIZE],
    observed: usize,
}

impl PerplexityWindow {
    /// Create an empty (all-zero) window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift left by one slot and append `value` at the end
    pub fn push(&mut self, value: i64) {
        self.slots.rotate_left(1);
        self.slots[WINDOW_SIZE - 1] = value;
        self.observed += 1;
    }

    /// True once every slot holds a real observation
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.observed >= WINDOW_SIZE
    }

    /// Sum of all slots
    #[must_use]
    pub fn sum(&self) -> i64 {
        self.slots.iter().sum()
    }

    /// Slots, oldest first
    #[must_use]
    pub const fn slots(&self) -> &[i64; WINDOW_SIZE] {
        &self.slots
    }

    /// Total observations pushed since creation
    #[must_use]
    pub const fn observed(&self) -> usize {
        self.observed
    }
}

/// Outcome of one convergence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// Keep iterating
    Continue,
    /// Distribution has stabilized
    Converged,
}

/// Decides when the rank distribution has stabilized
#[derive(Debug, Clone, Default)]
pub struct ConvergenceDetector {
    window: PerplexityWindow,
}

impl ConvergenceDetector {
    /// Create a detector with an empty window
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the perplexity observed at `run` and decide whether to stop
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // Perplexity is bounded by N
    pub fn observe(&mut self, run: usize, perplexity: f64) -> Convergence {
        let current = perplexity as i64;
        self.window.push(current);

        debug!(
            run,
            perplexity,
            window = ?self.window.slots(),
            "perplexity observed"
        );

        if self.window.is_full() && self.window.sum() == WINDOW_SIZE as i64 * current {
            Convergence::Converged
        } else {
            Convergence::Continue
        }
    }

    /// Compute the perplexity of `ranks` and feed it to [`observe`](Self::observe)
    pub fn observe_ranks(&mut self, run: usize, ranks: &[f64]) -> (f64, Convergence) {
        let value = perplexity(ranks);
        (value, self.observe(run, value))
    }

    /// Current window contents
    #[must_use]
    pub const fn window(&self) -> &PerplexityWindow {
        &self.window
    }

    /// Discard all observations
    pub fn reset(&mut self) {
        self.window = PerplexityWindow::new();
    }
}

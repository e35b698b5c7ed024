//! Error taxonomy for loading and ranking
//!
//! Every failure aborts the run: ranking is a deterministic batch computation,
//! so nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

use crate::algorithms::pagerank::EngineState;

/// Errors raised while loading a graph or iterating ranks
#[derive(Debug, Error)]
pub enum RankError {
    /// Input stream missing or unreadable
    #[error("failed to read graph from {}: {source}", path.display())]
    Io {
        /// Path of the input that could not be read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Graph has no pages, so `1/N` is undefined
    #[error("graph contains no pages")]
    EmptyGraph,

    /// A linking page has no out-degree entry (data-model contradiction)
    #[error("page `{page}` has outbound links but no recorded out-degree")]
    MissingOutDegree {
        /// Key of the offending page
        page: String,
    },

    /// Operation not valid in the engine's current state
    #[error("cannot {operation} while engine is {state:?}")]
    InvalidState {
        /// Attempted operation
        operation: &'static str,
        /// State the engine was in
        state: EngineState,
    },

    /// Computation interrupted before convergence
    #[error("computation cancelled")]
    Cancelled,
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = RankError::Io {
            path: PathBuf::from("/no/such/graph.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/no/such/graph.txt"), "{msg}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_state_message() {
        let err = RankError::InvalidState {
            operation: "step",
            state: EngineState::Converged,
        };
        assert_eq!(err.to_string(), "cannot step while engine is Converged");
    }
}

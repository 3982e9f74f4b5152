//! Error types for the percolation core.

use thiserror::Error;

/// Rejected graph parameters or start sets; detected before any search state exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("n must be >= {min}, got {n}")]
    TooFewVertices { n: i64, min: usize },
    /// `a` normalizes to 0, 1 or n-1 (mod n).
    #[error("a must not be 0 or ±1 (mod n); got a = {a} (mod {n})")]
    DegenerateChord { n: usize, a: usize },
    #[error("vertex {vertex} is out of range for n = {n}")]
    VertexOutOfRange { vertex: i64, n: usize },
    #[error("start set is empty")]
    EmptyStartSet,
    #[error("cannot parse start vertex {token:?}")]
    Unparsable { token: String },
}

/// Terminal failures of a search. `Infeasible` and `Cancelled` are outcomes, not errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ParamError),
    /// Unexpected internal fault (allocation failure, worker panic). Not retried.
    #[error("search failed: {reason}")]
    Failed { reason: String },
}

impl SearchError {
    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Misuse of an infection state against a graph of another size.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("infection state has {state} vertices but the graph has {graph}")]
    SizeMismatch { state: usize, graph: usize },
}

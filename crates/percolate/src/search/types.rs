//! Search configuration, outcomes and statistics.

use std::time::Duration;

use crate::circulant::{CirculantParams, NeighborSemantics};

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCfg {
    /// Test only the reflection-canonical set of each mirror pair.
    pub use_reflection_prune: bool,
    /// Skip the closure when no vertex can be infected in the first round.
    pub use_start_prune: bool,
    /// After `heuristic_max_k` is exhausted, keep going up to k = n before
    /// reporting `Infeasible`. Off reproduces the bounded-only search.
    pub fallback_to_exhaustive: bool,
    pub semantics: NeighborSemantics,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            use_reflection_prune: true,
            use_start_prune: true,
            fallback_to_exhaustive: true,
            semantics: NeighborSemantics::Simple,
        }
    }
}

/// Lifecycle of a search: `Idle → Running → {Succeeded, Infeasible, Cancelled, Failed}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SearchPhase {
    Idle = 0,
    Running = 1,
    Succeeded = 2,
    Infeasible = 3,
    Cancelled = 4,
    Failed = 5,
}

impl SearchPhase {
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Succeeded,
            3 => Self::Infeasible,
            4 => Self::Cancelled,
            5 => Self::Failed,
            _ => Self::Idle,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }
}

/// Terminal result of a search that ran to completion or was cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `witness` is sorted, contains 0, has `k` elements and percolates.
    Succeeded { k: usize, witness: Vec<usize> },
    /// No candidate up to `max_k` percolates.
    Infeasible { max_k: usize },
    /// Aborted on request; says nothing about m2.
    Cancelled,
}

impl Outcome {
    pub fn phase(&self) -> SearchPhase {
        match self {
            Outcome::Succeeded { .. } => SearchPhase::Succeeded,
            Outcome::Infeasible { .. } => SearchPhase::Infeasible,
            Outcome::Cancelled => SearchPhase::Cancelled,
        }
    }

    /// `m2` if the search succeeded.
    pub fn m2(&self) -> Option<usize> {
        match self {
            Outcome::Succeeded { k, .. } => Some(*k),
            _ => None,
        }
    }

    pub fn witness(&self) -> Option<&[usize]> {
        match self {
            Outcome::Succeeded { witness, .. } => Some(witness),
            _ => None,
        }
    }
}

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates handed out by the enumerator (after the reflection filter).
    pub candidates: u64,
    pub reflection_skipped: u64,
    /// Candidates rejected by the start prune.
    pub pruned: u64,
    pub closures: u64,
    /// Whether k went past `heuristic_max_k`.
    pub used_fallback: bool,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub params: CirculantParams,
    pub outcome: Outcome,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

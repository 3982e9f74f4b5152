//! Synchronous infection rounds for step-by-step replay.
//!
//! A round looks at the infected set as it was at the start of the round:
//! every healthy vertex with at least two infected neighbour slots becomes
//! infected, all at once. Callers (animation timers, a "step" button, the
//! CLI) decide whether to continue from `StepOutcome::changed`.
//!
//! The engine owns only a scratch list; the infection state is a separate,
//! caller-owned value and never shares buffers with a running search.

use crate::cfg::THRESHOLD;
use crate::circulant::NeighborTable;
use crate::error::{ParamError, StateError};

/// Infected flags for vertices `0..n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfectionState {
    infected: Vec<bool>,
}

impl InfectionState {
    pub fn healthy(n: usize) -> Self {
        Self {
            infected: vec![false; n],
        }
    }

    /// State with exactly `start` infected. Duplicates are ignored.
    pub fn from_start(n: usize, start: &[usize]) -> Result<Self, ParamError> {
        if start.is_empty() {
            return Err(ParamError::EmptyStartSet);
        }
        let mut state = Self::healthy(n);
        for &v in start {
            if v >= n {
                return Err(ParamError::VertexOutOfRange {
                    vertex: v as i64,
                    n,
                });
            }
            state.infected[v] = true;
        }
        Ok(state)
    }

    pub fn n(&self) -> usize {
        self.infected.len()
    }

    #[inline]
    pub fn is_infected(&self, v: usize) -> bool {
        self.infected[v]
    }

    pub fn infected_count(&self) -> usize {
        self.infected.iter().filter(|&&x| x).count()
    }

    pub fn is_complete(&self) -> bool {
        self.infected.iter().all(|&x| x)
    }

    /// Infected vertices in increasing order.
    pub fn infected_vertices(&self) -> Vec<usize> {
        (0..self.n()).filter(|&v| self.infected[v]).collect()
    }
}

/// Parse a comma-separated start set such as `"0, 3,7"`.
///
/// Entries must be integers in `0..n`; duplicates are dropped, first
/// occurrence order is kept.
pub fn parse_start_set(text: &str, n: usize) -> Result<Vec<usize>, ParamError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParamError::EmptyStartSet);
    }
    let mut out = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        let v: i64 = token.parse().map_err(|_| ParamError::Unparsable {
            token: token.to_string(),
        })?;
        if v < 0 || v as u64 >= n as u64 {
            return Err(ParamError::VertexOutOfRange { vertex: v, n });
        }
        let v = v as usize;
        if !out.contains(&v) {
            out.push(v);
        }
    }
    Ok(out)
}

/// What one round did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome<'a> {
    pub changed: bool,
    /// Vertices infected in this round, increasing.
    pub newly_infected: &'a [usize],
}

/// Applies one synchronous round at a time; reuses its scratch list.
#[derive(Clone, Debug, Default)]
pub struct StepEngine {
    to_infect: Vec<usize>,
}

impl StepEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply exactly one synchronous round of the two-neighbour rule.
    pub fn step<'a>(
        &'a mut self,
        table: &NeighborTable,
        state: &mut InfectionState,
    ) -> Result<StepOutcome<'a>, StateError> {
        let n = table.n();
        if state.n() != n {
            return Err(StateError::SizeMismatch {
                state: state.n(),
                graph: n,
            });
        }
        self.to_infect.clear();
        for i in 0..n {
            if state.infected[i] {
                continue;
            }
            let count = table
                .neighbors(i)
                .into_iter()
                .filter(|&u| state.infected[u])
                .count() as u32;
            if count >= THRESHOLD {
                self.to_infect.push(i);
            }
        }
        // Collected against the pre-round state; applied together.
        for &i in &self.to_infect {
            state.infected[i] = true;
        }
        Ok(StepOutcome {
            changed: !self.to_infect.is_empty(),
            newly_infected: &self.to_infect,
        })
    }

    /// Step until nothing changes or `max_rounds` rounds have run.
    ///
    /// Returns the number of rounds that infected at least one vertex.
    pub fn run_to_fixpoint(
        &mut self,
        table: &NeighborTable,
        state: &mut InfectionState,
        max_rounds: Option<usize>,
    ) -> Result<usize, StateError> {
        let mut rounds = 0;
        while max_rounds.map_or(true, |m| rounds < m) {
            if !self.step(table, state)?.changed {
                break;
            }
            rounds += 1;
        }
        Ok(rounds)
    }
}

//! Percolation workspace: cheap start prune and BFS closure over reused buffers.
//!
//! Membership tests compare a per-vertex stamp with the current generation
//! instead of clearing arrays, so a candidate costs O(work done), not O(n).
//! Infected-neighbour counters are lazily reset the same way: a counter whose
//! stamp is stale reads as zero.

use crate::buffers::zeroed;
use crate::cfg::{CANCEL_POLL_MASK, THRESHOLD};
use crate::circulant::NeighborTable;
use crate::error::SearchError;

use super::orchestrator::CancelToken;

/// Result of one closure run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spread {
    /// Every vertex ended up infected.
    Full,
    /// The queue drained first; `infected` vertices were reached.
    Stalled { infected: usize },
    /// Cancellation was observed mid-run; the partial state is meaningless.
    Interrupted,
}

/// Reusable per-search buffers. Single writer: the running search.
#[derive(Debug)]
pub struct InfectionWorkspace {
    n: usize,
    generation: u32,
    infected_stamp: Vec<u32>,
    start_stamp: Vec<u32>,
    count_stamp: Vec<u32>,
    count: Vec<u32>,
    queue: Vec<usize>,
}

impl InfectionWorkspace {
    /// Allocate buffers for `n` vertices; allocation failure is reported, not aborted on.
    pub fn new(n: usize) -> Result<Self, SearchError> {
        Ok(Self {
            n,
            generation: 0,
            infected_stamp: zeroed(n, "infected stamps")?,
            start_stamp: zeroed(n, "start stamps")?,
            count_stamp: zeroed(n, "count stamps")?,
            count: zeroed(n, "neighbour counters")?,
            queue: zeroed(n, "closure queue")?,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Cheap prune: can the infection take even one step from `set`?
    ///
    /// True iff some vertex outside `set` has at least two neighbour slots in
    /// `set`. Only vertices adjacent to the set are touched. A set that
    /// already covers every vertex passes.
    pub fn can_start(&mut self, table: &NeighborTable, set: &[usize]) -> bool {
        debug_assert_eq!(table.n(), self.n);
        if set.len() >= self.n {
            return true;
        }
        let g = self.bump_generation();
        for &s in set {
            self.start_stamp[s] = g;
        }
        for &s in set {
            for u in table.neighbors(s) {
                if self.start_stamp[u] == g {
                    continue;
                }
                if self.count_stamp[u] != g {
                    self.count_stamp[u] = g;
                    self.count[u] = 0;
                }
                self.count[u] += 1;
                if self.count[u] >= THRESHOLD {
                    return true;
                }
            }
        }
        false
    }

    /// Breadth-first closure of the two-neighbour rule from `set`.
    ///
    /// Each dequeued vertex bumps its healthy neighbours' counters; a counter
    /// reaching the threshold infects and enqueues that neighbour. Infected
    /// vertices are never unmarked, so one forward pass reaches the fixed point.
    pub fn spread(&mut self, table: &NeighborTable, set: &[usize], cancel: &CancelToken) -> Spread {
        debug_assert_eq!(table.n(), self.n);
        let n = self.n;
        let g = self.bump_generation();
        let mut tail = 0usize;
        for &s in set {
            if self.infected_stamp[s] != g {
                self.infected_stamp[s] = g;
                self.queue[tail] = s;
                tail += 1;
            }
        }
        let mut infected = tail;
        if infected == n {
            return Spread::Full;
        }
        let mut head = 0usize;
        while head < tail {
            if head & CANCEL_POLL_MASK == 0 && cancel.is_cancelled() {
                return Spread::Interrupted;
            }
            let v = self.queue[head];
            head += 1;
            for u in table.neighbors(v) {
                if self.infected_stamp[u] == g {
                    continue;
                }
                if self.count_stamp[u] != g {
                    self.count_stamp[u] = g;
                    self.count[u] = 0;
                }
                self.count[u] += 1;
                if self.count[u] >= THRESHOLD {
                    self.infected_stamp[u] = g;
                    self.queue[tail] = u;
                    tail += 1;
                    infected += 1;
                    if infected == n {
                        return Spread::Full;
                    }
                }
            }
        }
        Spread::Stalled { infected }
    }

    /// Whether `v` was infected by the most recent `spread`.
    ///
    /// Only meaningful directly after `spread`; `can_start` advances the generation.
    pub fn is_infected(&self, v: usize) -> bool {
        self.generation != 0 && self.infected_stamp[v] == self.generation
    }

    // Wrapping the generation would alias stale stamps; clear once instead.
    fn bump_generation(&mut self) -> u32 {
        if self.generation == u32::MAX {
            self.infected_stamp.fill(0);
            self.start_stamp.fill(0);
            self.count_stamp.fill(0);
            self.generation = 0;
        }
        self.generation += 1;
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn force_generation(&mut self, g: u32) {
        self.generation = g;
    }
}

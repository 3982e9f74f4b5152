//! Candidate enumeration: k-subsets of `0..n` containing 0, in lexicographic order.
//!
//! Rotation symmetry fixes vertex 0 in every candidate; the remaining `k-1`
//! elements walk the standard "next combination" sequence over `1..n`.
//! Reflection `x ↦ (n - x) mod n` is an automorphism of Cn(1,a) fixing 0, so
//! only one set of each mirror pair needs testing.

use crate::buffers::reserved;
use crate::error::SearchError;

/// Reflection canonical form for a sorted candidate with `set[0] == 0`.
///
/// Accepts iff `set[1] <= n - set[k-1]`. A set and its mirror swap the two
/// sides of this inequality, so a rejected set always has its mirror
/// accepted; on equality both pass. Sets of size <= 1 always pass.
#[inline]
pub fn is_reflection_canonical(set: &[usize], n: usize) -> bool {
    match set {
        [_, first, .., last] => *first <= n - *last,
        [_, only] => *only <= n - *only,
        _ => true,
    }
}

/// Restartable lending iterator over candidate sets.
///
/// Buffers are allocated once in `new`; `advance` mutates them in place.
#[derive(Clone, Debug)]
pub struct CandidateEnumerator {
    n: usize,
    reflection: bool,
    /// Full candidate: `set[0] == 0`, `set[1..]` is the current combination.
    set: Vec<usize>,
    state: EnumState,
    skipped: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnumState {
    Fresh,
    Running,
    Done,
}

impl CandidateEnumerator {
    /// Enumerator over size-`k` candidates of Cn(·,·) with `n` vertices.
    ///
    /// `k == 0` or `k > n` yields nothing. The buffer holds up to `n`
    /// vertices so `reset` never reallocates.
    pub fn new(n: usize, k: usize, reflection: bool) -> Result<Self, SearchError> {
        let mut en = Self {
            n,
            reflection,
            set: reserved(n, "candidate buffer")?,
            state: EnumState::Done,
            skipped: 0,
        };
        en.reset(k);
        Ok(en)
    }

    /// Restart at the first candidate of size `k`, reusing the buffer.
    pub fn reset(&mut self, k: usize) {
        self.set.clear();
        if k == 0 || k > self.n {
            self.state = EnumState::Done;
            return;
        }
        self.set.extend(0..k);
        self.state = EnumState::Fresh;
    }

    /// Next candidate, or `None` once the size is exhausted.
    pub fn advance(&mut self) -> Option<&[usize]> {
        loop {
            match self.state {
                EnumState::Done => return None,
                EnumState::Fresh => self.state = EnumState::Running,
                EnumState::Running => {
                    if !self.step_combination() {
                        self.state = EnumState::Done;
                        return None;
                    }
                }
            }
            if !self.reflection || is_reflection_canonical(&self.set, self.n) {
                return Some(&self.set);
            }
            self.skipped += 1;
        }
    }

    /// Candidates discarded by the reflection filter since construction.
    pub fn reflection_skipped(&self) -> u64 {
        self.skipped
    }

    // Rightmost slot below its ceiling is bumped; the suffix restarts as a consecutive run.
    fn step_combination(&mut self) -> bool {
        let k = self.set.len();
        let n = self.n;
        // Slot i (1-based within set) may reach at most n - k + i.
        let mut idx = k - 1;
        while idx >= 1 && self.set[idx] == n - k + idx {
            idx -= 1;
        }
        if idx == 0 {
            return false;
        }
        self.set[idx] += 1;
        for j in idx + 1..k {
            self.set[j] = self.set[j - 1] + 1;
        }
        true
    }
}

//! Data types for the circulant graph model.
//!
//! Kept small and explicit so `build` and the search hot loops stay readable.

use crate::cfg::MIN_VERTICES;
use crate::error::ParamError;

/// Validated parameters of Cn(1,a).
///
/// Invariants:
/// - `n >= 4`.
/// - `a` is normalized into `[0, n)` and is not 0, 1 or n-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CirculantParams {
    n: usize,
    a: usize,
}

impl CirculantParams {
    /// Validate and normalize raw `(n, a)`; negative `a` wraps around.
    pub fn new(n: i64, a: i64) -> Result<Self, ParamError> {
        if n < MIN_VERTICES as i64 {
            return Err(ParamError::TooFewVertices {
                n,
                min: MIN_VERTICES,
            });
        }
        let n_u = n as usize;
        let a_u = a.rem_euclid(n) as usize;
        if a_u == 0 || a_u == 1 || a_u == n_u - 1 {
            return Err(ParamError::DegenerateChord { n: n_u, a: a_u });
        }
        Ok(Self { n: n_u, a: a_u })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Chord length, normalized into `[0, n)`.
    #[inline]
    pub fn a(&self) -> usize {
        self.a
    }

    /// True when `+a` and `-a` land on the same vertex (`a = n/2`).
    #[inline]
    pub fn chords_coincide(&self) -> bool {
        2 * self.a == self.n
    }
}

/// How coincident offsets contribute to a vertex's infected-neighbour count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborSemantics {
    /// Simple graph: a neighbour reached by two offsets counts once.
    #[default]
    Simple,
    /// Every offset counts, so a coincident neighbour counts twice.
    ///
    /// The search still starts at k = 2 under this rule, matching the
    /// multiplicity-counting results it exists to reproduce, even though
    /// `{0}` alone closes Cn(1,n/2) for n = 4.
    Multigraph,
}

/// The four neighbour offsets of Cn(1,a), in table column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Offset {
    Prev,
    Next,
    ChordBack,
    ChordForward,
}

impl Offset {
    pub const ALL: [Offset; 4] = [
        Offset::Prev,
        Offset::Next,
        Offset::ChordBack,
        Offset::ChordForward,
    ];
}

/// Neighbour index per vertex and offset; wraparound is resolved at build time.
///
/// Under `NeighborSemantics::Simple`, a slot whose target duplicates an
/// earlier slot of the same vertex holds the vertex itself. A vertex never
/// counts toward its own threshold: when it is infected it is skipped, and
/// when it is healthy it contributes nothing.
#[derive(Clone, Debug)]
pub struct NeighborTable {
    pub(super) params: CirculantParams,
    pub(super) semantics: NeighborSemantics,
    pub(super) prev: Vec<usize>,
    pub(super) next: Vec<usize>,
    pub(super) back: Vec<usize>,
    pub(super) fwd: Vec<usize>,
}

impl NeighborTable {
    #[inline]
    pub fn n(&self) -> usize {
        self.params.n
    }

    #[inline]
    pub fn params(&self) -> CirculantParams {
        self.params
    }

    #[inline]
    pub fn semantics(&self) -> NeighborSemantics {
        self.semantics
    }

    /// All four slots of `v` (may contain `v` itself, see type docs).
    #[inline]
    pub fn neighbors(&self, v: usize) -> [usize; 4] {
        [self.prev[v], self.next[v], self.back[v], self.fwd[v]]
    }

    pub fn column(&self, offset: Offset) -> &[usize] {
        match offset {
            Offset::Prev => &self.prev,
            Offset::Next => &self.next,
            Offset::ChordBack => &self.back,
            Offset::ChordForward => &self.fwd,
        }
    }

    /// Distinct true neighbours of `v`, in offset order. Used for drawing edges.
    pub fn distinct_neighbors(&self, v: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(4);
        for u in self.neighbors(v) {
            if u != v && !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    /// Number of distinct neighbours of `v` (3 when `a = n/2`, else 4).
    pub fn degree(&self, v: usize) -> usize {
        self.distinct_neighbors(v).len()
    }
}

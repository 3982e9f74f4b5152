//! Slow reference oracle for m2(n,a).
//!
//! Rotation-only recursive enumeration and repeated full sweeps to a fixed
//! point. Shares no code with `search`: neighbours are recomputed with `%` on
//! every call. Small n only.

use crate::cfg::THRESHOLD;
use crate::circulant::{CirculantParams, NeighborSemantics};

fn neighbor_lists(n: usize, a: usize, semantics: NeighborSemantics) -> Vec<Vec<usize>> {
    (0..n)
        .map(|i| {
            let raw = [(i + n - 1) % n, (i + 1) % n, (i + n - a) % n, (i + a) % n];
            match semantics {
                NeighborSemantics::Multigraph => raw.to_vec(),
                NeighborSemantics::Simple => {
                    let mut uniq = Vec::with_capacity(4);
                    for u in raw {
                        if !uniq.contains(&u) {
                            uniq.push(u);
                        }
                    }
                    uniq
                }
            }
        })
        .collect()
}

fn closes(nbrs: &[Vec<usize>], start: &[usize]) -> bool {
    let n = nbrs.len();
    let mut infected = vec![false; n];
    for &s in start {
        infected[s] = true;
    }
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            if infected[i] {
                continue;
            }
            let count = nbrs[i].iter().filter(|&&u| infected[u]).count() as u32;
            if count >= THRESHOLD {
                infected[i] = true;
                changed = true;
            }
        }
    }
    infected.into_iter().all(|x| x)
}

/// Does `start` percolate on Cn(1,a)?
pub fn naive_percolates(
    params: CirculantParams,
    semantics: NeighborSemantics,
    start: &[usize],
) -> bool {
    let nbrs = neighbor_lists(params.n(), params.a(), semantics);
    closes(&nbrs, start)
}

/// Smallest k in `1..=max_k` with a percolating set containing 0, and the
/// first such set in lexicographic order.
pub fn naive_m2(
    params: CirculantParams,
    semantics: NeighborSemantics,
    max_k: usize,
) -> Option<(usize, Vec<usize>)> {
    let n = params.n();
    let nbrs = neighbor_lists(n, params.a(), semantics);
    for k in 1..=max_k.min(n) {
        let mut cur = vec![0usize; k];
        if let Some(set) = first_closing(&nbrs, &mut cur, 1, 1) {
            return Some((k, set));
        }
    }
    None
}

fn first_closing(
    nbrs: &[Vec<usize>],
    cur: &mut Vec<usize>,
    depth: usize,
    from: usize,
) -> Option<Vec<usize>> {
    if depth == cur.len() {
        return closes(nbrs, cur).then(|| cur.clone());
    }
    for v in from..nbrs.len() {
        cur[depth] = v;
        if let Some(found) = first_closing(nbrs, cur, depth + 1, v + 1) {
            return Some(found);
        }
    }
    None
}

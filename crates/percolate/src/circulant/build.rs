//! Neighbour-table construction.

use crate::buffers::reserved;
use crate::error::SearchError;

use super::types::{CirculantParams, NeighborSemantics, NeighborTable};

/// Build the four neighbour columns for `params`. Pure; no modulo is left for lookups.
///
/// Fails only when the columns cannot be allocated.
pub fn build_neighbors(
    params: CirculantParams,
    semantics: NeighborSemantics,
) -> Result<NeighborTable, SearchError> {
    let n = params.n();
    let a = params.a();
    let mut prev = reserved(n, "neighbour table")?;
    let mut next = reserved(n, "neighbour table")?;
    let mut back = reserved(n, "neighbour table")?;
    let mut fwd = reserved(n, "neighbour table")?;
    for i in 0..n {
        let mut slots = [
            if i == 0 { n - 1 } else { i - 1 },
            if i + 1 == n { 0 } else { i + 1 },
            if i < a { i + n - a } else { i - a },
            if i + a >= n { i + a - n } else { i + a },
        ];
        if semantics == NeighborSemantics::Simple {
            redirect_duplicates(i, &mut slots);
        }
        prev.push(slots[0]);
        next.push(slots[1]);
        back.push(slots[2]);
        fwd.push(slots[3]);
    }
    Ok(NeighborTable {
        params,
        semantics,
        prev,
        next,
        back,
        fwd,
    })
}

// Later duplicates point back at `v`, which never counts for itself.
fn redirect_duplicates(v: usize, slots: &mut [usize; 4]) {
    for j in 1..slots.len() {
        if slots[..j].contains(&slots[j]) {
            slots[j] = v;
        }
    }
}

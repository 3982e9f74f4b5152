//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI and
//!   experiments. Breaking changes are allowed and expected.

// Graph model
pub use crate::circulant::{
    build_neighbors, CirculantParams, NeighborSemantics, NeighborTable, Offset,
};
// Search
pub use crate::search::{
    combos::{is_reflection_canonical, CandidateEnumerator},
    compute, compute_m2, heuristic_max_k, spawn,
    workspace::{InfectionWorkspace, Spread},
    CancelToken, Outcome, Progress, SearchCfg, SearchHandle, SearchPhase, SearchReport,
    SearchStats,
};
// Interactive stepping
pub use crate::step::{parse_start_set, InfectionState, StepEngine, StepOutcome};
// Oracle
pub use crate::reference::{naive_m2, naive_percolates};
// Errors
pub use crate::error::{ParamError, SearchError, StateError};

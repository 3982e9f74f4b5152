//! Minimum percolating sets for two-neighbour bootstrap percolation on
//! circulant graphs Cn(1,a).
//!
//! Layout
//! - `circulant`: validated `(n, a)` and the four-offset neighbour tables.
//! - `search`: candidate enumeration, percolation workspace, orchestrator.
//! - `step`: one synchronous infection round for animation-style callers.
//! - `reference`: slow independent oracle used for cross-checks.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; the CLI
//!   and tests are the only callers. Prefer `api` re-exports for imports.

pub mod api;
mod buffers;
pub mod cfg;
pub mod circulant;
pub mod error;
pub mod reference;
pub mod search;
pub mod step;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use circulant::{build_neighbors, CirculantParams, NeighborSemantics, NeighborTable};
pub use error::{ParamError, SearchError, StateError};
pub use search::{
    compute, compute_m2, spawn, CancelToken, Outcome, Progress, SearchCfg, SearchHandle,
    SearchPhase, SearchReport, SearchStats,
};
pub use step::{InfectionState, StepEngine, StepOutcome};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::circulant::{build_neighbors, CirculantParams, NeighborSemantics};
    pub use crate::search::{compute, spawn, CancelToken, Outcome, Progress, SearchCfg};
    pub use crate::step::{InfectionState, StepEngine};
}

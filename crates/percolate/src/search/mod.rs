//! Minimum percolating set search for Cn(1,a).
//!
//! Purpose
//! - For k = 2, 3, … enumerate rotation- and reflection-reduced candidates,
//!   reject hopeless ones with a cheap start test, and verify the rest with a
//!   BFS closure. The first success is m2(n,a) with its witness.
//!
//! Symmetry and buffers
//! - Every candidate contains vertex 0 (rotations act transitively), and the
//!   reflection `x ↦ n - x` keeps only one set of each mirror pair.
//! - Buffers live in one `InfectionWorkspace` per run; generation stamps stand
//!   in for clearing.
//! - Cancellation is a shared token polled once per candidate and every
//!   `CANCEL_POLL_MASK + 1` BFS dequeues.
//!
//! Module split: `combos` (enumeration), `workspace` (prune + closure),
//! `orchestrator` (k loop, threads, progress), `types` (cfg and outcomes).

pub mod combos;
mod orchestrator;
mod types;
pub mod workspace;

pub use orchestrator::{
    compute, compute_m2, heuristic_max_k, spawn, CancelToken, Progress, SearchHandle,
};
pub use types::{Outcome, SearchCfg, SearchPhase, SearchReport, SearchStats};

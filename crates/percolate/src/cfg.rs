//! Tuning constants for the search (internal).
//!
//! Policy
//! - Fixed constants; they trade abort latency against hot-loop overhead and
//!   are not meant to be tuned per call site.

/// BFS dequeues between cancellation polls, minus one (power of two mask).
pub(crate) const CANCEL_POLL_MASK: usize = 1023;

/// Smallest vertex count accepted by `CirculantParams`.
pub const MIN_VERTICES: usize = 4;

/// Threshold of the bootstrap rule: infected-neighbour count that infects.
pub const THRESHOLD: u32 = 2;

/// Smallest candidate size tried by the orchestrator.
pub(crate) const MIN_K: usize = 2;

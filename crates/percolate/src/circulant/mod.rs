//! Circulant graph model Cn(1,a): parameters and neighbour tables.
//!
//! Purpose
//! - Validate `(n, a)` once, then hand out four flat neighbour columns
//!   (offsets -1, +1, -a, +a) so the search never computes `% n` in a hot loop.
//!
//! Conventions
//! - Vertices are `0..n`. The table is immutable for the lifetime of a search
//!   and passed by reference; there is no global lookup registry.
//! - Coincident offsets (only `a = n/2` for valid params) follow
//!   `NeighborSemantics`; see `NeighborTable` for the encoding.

mod build;
mod types;

pub use build::build_neighbors;
pub use types::{CirculantParams, NeighborSemantics, NeighborTable, Offset};

#[cfg(test)]
mod tests;

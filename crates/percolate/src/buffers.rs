//! Fallible buffer allocation for per-search state.
//!
//! Vertex counts come straight from callers, so a search sizes every buffer
//! through these helpers and reports `SearchError::Failed` instead of aborting.

use crate::error::SearchError;

/// Empty vector with room for exactly `n` elements.
pub(crate) fn reserved<T>(n: usize, what: &str) -> Result<Vec<T>, SearchError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|e| SearchError::failed(format!("allocating {what} for n = {n}: {e}")))?;
    Ok(v)
}

/// `n` default values.
pub(crate) fn zeroed<T: Clone + Default>(n: usize, what: &str) -> Result<Vec<T>, SearchError> {
    let mut v = reserved(n, what)?;
    v.resize(n, T::default());
    Ok(v)
}

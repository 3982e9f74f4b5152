//! Search orchestration: iterate k, drive enumerator and workspace, report.

use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cfg::MIN_K;
use crate::circulant::{build_neighbors, CirculantParams};
use crate::error::SearchError;

use super::combos::CandidateEnumerator;
use super::types::{Outcome, SearchCfg, SearchPhase, SearchReport, SearchStats};
use super::workspace::{InfectionWorkspace, Spread};

/// Largest k tried before the exhaustive fallback: `min(n, (a + 3) / 2)`.
///
/// Carried over as a heuristic; no proof that m2(n,a) never exceeds it.
pub fn heuristic_max_k(n: usize, a: usize) -> usize {
    n.min((a + 3) / 2)
}

/// One-shot cancellation request shared between a caller and a search.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination. Idempotent; a no-op once the search has finished.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Advisory progress of a search: current k and phase.
///
/// Reads are relaxed; observers may lag the worker slightly.
#[derive(Clone, Debug, Default)]
pub struct Progress(Arc<ProgressInner>);

#[derive(Debug, Default)]
struct ProgressInner {
    k: AtomicUsize,
    phase: AtomicU8,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate size currently being explored (0 before the first k).
    pub fn current_k(&self) -> usize {
        self.0.k.load(Ordering::Relaxed)
    }

    pub fn phase(&self) -> SearchPhase {
        SearchPhase::from_u8(self.0.phase.load(Ordering::Relaxed))
    }

    fn set_k(&self, k: usize) {
        self.0.k.store(k, Ordering::Relaxed);
    }

    fn set_phase(&self, phase: SearchPhase) {
        self.0.phase.store(phase as u8, Ordering::Relaxed);
    }
}

/// Validate raw `(n, a)` and run the search on the calling thread.
pub fn compute_m2(
    n: i64,
    a: i64,
    cfg: SearchCfg,
    cancel: &CancelToken,
) -> Result<SearchReport, SearchError> {
    let params = CirculantParams::new(n, a)?;
    compute(params, cfg, cancel, &Progress::new())
}

/// Run the search for `params` on the calling thread.
///
/// Returns the first (smallest k, lexicographically first canonical) witness,
/// `Infeasible`, or `Cancelled`. Workspace and neighbour table live only for
/// this call.
pub fn compute(
    params: CirculantParams,
    cfg: SearchCfg,
    cancel: &CancelToken,
    progress: &Progress,
) -> Result<SearchReport, SearchError> {
    progress.set_k(0);
    progress.set_phase(SearchPhase::Running);
    let res = run(params, cfg, cancel, progress);
    progress.set_phase(match &res {
        Ok(report) => report.outcome.phase(),
        Err(e) => {
            warn!(n = params.n(), a = params.a(), error = %e, "search failed");
            SearchPhase::Failed
        }
    });
    res
}

fn run(
    params: CirculantParams,
    cfg: SearchCfg,
    cancel: &CancelToken,
    progress: &Progress,
) -> Result<SearchReport, SearchError> {
    let started = Instant::now();
    let (n, a) = (params.n(), params.a());
    let mut ws = InfectionWorkspace::new(n)?;
    let table = build_neighbors(params, cfg.semantics)?;
    let bound = heuristic_max_k(n, a);
    let upper = if cfg.fallback_to_exhaustive { n } else { bound };
    let mut stats = SearchStats::default();
    let mut enumerator = CandidateEnumerator::new(n, MIN_K, cfg.use_reflection_prune)?;

    let finish = |outcome: Outcome, mut stats: SearchStats, skipped: u64| {
        stats.reflection_skipped = skipped;
        SearchReport {
            params,
            outcome,
            stats,
            elapsed: started.elapsed(),
        }
    };

    for k in MIN_K..=upper {
        if cancel.is_cancelled() {
            info!(n, a, k, "search cancelled");
            return Ok(finish(Outcome::Cancelled, stats, enumerator.reflection_skipped()));
        }
        if k > bound && !stats.used_fallback {
            stats.used_fallback = true;
            info!(n, a, bound, "heuristic bound exhausted; continuing exhaustively");
        }
        progress.set_k(k);
        enumerator.reset(k);
        let seen_before = stats.candidates;
        while let Some(set) = enumerator.advance() {
            if cancel.is_cancelled() {
                info!(n, a, k, "search cancelled");
                let skipped = enumerator.reflection_skipped();
                return Ok(finish(Outcome::Cancelled, stats, skipped));
            }
            stats.candidates += 1;
            if cfg.use_start_prune && !ws.can_start(&table, set) {
                stats.pruned += 1;
                continue;
            }
            stats.closures += 1;
            match ws.spread(&table, set, cancel) {
                Spread::Full => {
                    let witness = set.to_vec();
                    if k > bound {
                        warn!(n, a, k, bound, "percolating set found beyond heuristic bound");
                    }
                    info!(n, a, k, ?witness, "percolating set found");
                    let skipped = enumerator.reflection_skipped();
                    return Ok(finish(Outcome::Succeeded { k, witness }, stats, skipped));
                }
                Spread::Stalled { .. } => {}
                Spread::Interrupted => {
                    info!(n, a, k, "search cancelled inside closure");
                    let skipped = enumerator.reflection_skipped();
                    return Ok(finish(Outcome::Cancelled, stats, skipped));
                }
            }
        }
        debug!(
            n,
            a,
            k,
            candidates = stats.candidates - seen_before,
            "no percolating set of this size"
        );
    }
    info!(n, a, max_k = upper, "no percolating set within bound");
    let skipped = enumerator.reflection_skipped();
    Ok(finish(Outcome::Infeasible { max_k: upper }, stats, skipped))
}

/// Handle to a search running on its own worker thread.
#[derive(Debug)]
pub struct SearchHandle {
    cancel: CancelToken,
    progress: Progress,
    worker: JoinHandle<Result<SearchReport, SearchError>>,
}

/// Start a search on a named worker thread.
pub fn spawn(params: CirculantParams, cfg: SearchCfg) -> Result<SearchHandle, SearchError> {
    let cancel = CancelToken::new();
    let progress = Progress::new();
    let (worker_cancel, worker_progress) = (cancel.clone(), progress.clone());
    let worker = std::thread::Builder::new()
        .name(format!("m2-n{}-a{}", params.n(), params.a()))
        .spawn(move || compute(params, cfg, &worker_cancel, &worker_progress))
        .map_err(|e| SearchError::failed(format!("spawning search worker: {e}")))?;
    Ok(SearchHandle {
        cancel,
        progress,
        worker,
    })
}

impl SearchHandle {
    /// Current k of the in-flight search.
    pub fn progress(&self) -> usize {
        self.progress.current_k()
    }

    pub fn phase(&self) -> SearchPhase {
        self.progress.phase()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker. A panic inside the search surfaces as `Failed`.
    pub fn join(self) -> Result<SearchReport, SearchError> {
        match self.worker.join() {
            Ok(res) => res,
            Err(payload) => {
                self.progress.set_phase(SearchPhase::Failed);
                Err(SearchError::failed(format!(
                    "search worker panicked: {}",
                    panic_message(payload.as_ref())
                )))
            }
        }
    }
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

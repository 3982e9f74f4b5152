use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use percolate::api::{
    build_neighbors, naive_percolates, parse_start_set, spawn, CirculantParams, InfectionState,
    NeighborSemantics, Outcome, SearchCfg, SearchHandle, SearchReport, StepEngine,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

/// Longest gap between progress polls of a running search.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Minimum percolating sets for 2-neighbour bootstrap percolation on Cn(1,a)")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Copy, Debug)]
struct SearchFlags {
    /// Count a neighbour reached by both chord offsets twice (a = n/2)
    #[arg(long)]
    multigraph: bool,
    /// Test mirror-image candidates too
    #[arg(long)]
    no_reflection: bool,
    /// Run the full closure on every candidate
    #[arg(long)]
    no_start_prune: bool,
    /// Stop at k = (a+3)/2 instead of continuing up to n
    #[arg(long)]
    bounded_only: bool,
}

impl SearchFlags {
    fn cfg(self) -> SearchCfg {
        SearchCfg {
            use_reflection_prune: !self.no_reflection,
            use_start_prune: !self.no_start_prune,
            fallback_to_exhaustive: !self.bounded_only,
            semantics: semantics(self.multigraph),
        }
    }
}

fn semantics(multigraph: bool) -> NeighborSemantics {
    if multigraph {
        NeighborSemantics::Multigraph
    } else {
        NeighborSemantics::Simple
    }
}

#[derive(Subcommand)]
enum Action {
    /// Compute m2(n,a) and a witness set
    Compute {
        #[arg(long)]
        n: i64,
        #[arg(long, allow_hyphen_values = true)]
        a: i64,
        /// Cancel the search after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Replay the witness with the reference oracle before reporting
        #[arg(long)]
        verify: bool,
        /// Write a JSON record (plus provenance sidecar) here
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        flags: SearchFlags,
    },
    /// Tabulate m2 over 1 <= a <= n/2, n <= max-n into a CSV file
    Table {
        #[arg(long)]
        max_n: usize,
        #[arg(long, default_value = "DATA.csv")]
        out: PathBuf,
        #[command(flatten)]
        flags: SearchFlags,
    },
    /// Replay synchronous infection rounds from a custom start set
    Step {
        #[arg(long)]
        n: i64,
        #[arg(long, allow_hyphen_values = true)]
        a: i64,
        /// Comma-separated start vertices, e.g. "0,1,5"
        #[arg(long)]
        start: String,
        #[arg(long)]
        max_rounds: Option<usize>,
        #[arg(long)]
        multigraph: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Compute {
            n,
            a,
            timeout_secs,
            verify,
            out,
            flags,
        } => run_compute(n, a, timeout_secs.map(Duration::from_secs), verify, out, flags),
        Action::Table { max_n, out, flags } => run_table(max_n, out, flags),
        Action::Step {
            n,
            a,
            start,
            max_rounds,
            multigraph,
        } => run_step(n, a, &start, max_rounds, multigraph),
        Action::Report => report(),
    }
}

fn run_compute(
    n: i64,
    a: i64,
    timeout: Option<Duration>,
    verify: bool,
    out: Option<PathBuf>,
    flags: SearchFlags,
) -> Result<()> {
    let params = CirculantParams::new(n, a)?;
    let cfg = flags.cfg();
    tracing::info!(n = params.n(), a = params.a(), ?cfg, "compute");

    let report = wait_for(spawn(params, cfg)?, timeout)?;

    match &report.outcome {
        Outcome::Succeeded { k, witness } => {
            if verify {
                ensure!(
                    naive_percolates(params, cfg.semantics, witness),
                    "reference oracle rejects witness {witness:?}"
                );
                tracing::info!("witness verified by reference oracle");
            }
            println!(
                "n = {}, a = {}\nm2 = {}\nStart = {:?}",
                params.n(),
                params.a(),
                k,
                witness
            );
        }
        Outcome::Infeasible { max_k } => println!(
            "n = {}, a = {}\nm2 = impossible (no percolating set up to k = {})",
            params.n(),
            params.a(),
            max_k
        ),
        Outcome::Cancelled => println!("Computation cancelled."),
    }
    tracing::info!(
        elapsed = %hms(report.elapsed),
        candidates = report.stats.candidates,
        pruned = report.stats.pruned,
        closures = report.stats.closures,
        "done"
    );

    if let Some(out) = out {
        let record = ComputeRecord::new(&report, cfg);
        ensure_parent(&out)?;
        std::fs::write(&out, serde_json::to_vec_pretty(&record)?)
            .with_context(|| format!("writing {}", out.display()))?;
        let payload = provenance::Payload::new(json!({
            "n": n,
            "a": a,
            "timeout_secs": timeout.map(|t| t.as_secs()),
        }))
        .with_config(&cfg);
        provenance::write_sidecar(&out, payload)?;
    }
    Ok(())
}

/// Poll `handle` until the worker finishes, logging each new k and
/// cancelling once `timeout` has elapsed.
///
/// The poll interval starts at 1 ms and doubles up to `POLL_INTERVAL`, so a
/// quick search returns without waiting a full interval.
fn wait_for(handle: SearchHandle, timeout: Option<Duration>) -> Result<SearchReport> {
    let started = Instant::now();
    let mut interval = Duration::from_millis(1);
    let mut last_k = 0;
    while !handle.is_finished() {
        let k = handle.progress();
        if k != last_k {
            tracing::info!(elapsed = %hms(started.elapsed()), k, "searching");
            last_k = k;
        }
        if let Some(limit) = timeout {
            if started.elapsed() >= limit && !handle.cancel_token().is_cancelled() {
                tracing::warn!(limit_secs = limit.as_secs(), "timeout reached; cancelling");
                handle.cancel();
            }
        }
        std::thread::sleep(interval);
        interval = (interval * 2).min(POLL_INTERVAL);
    }
    Ok(handle.join()?)
}

/// JSON record of one computation.
#[derive(Debug, Serialize)]
struct ComputeRecord {
    n: usize,
    a: usize,
    status: &'static str,
    m2: Option<usize>,
    witness: Option<Vec<usize>>,
    max_k: Option<usize>,
    semantics: &'static str,
    elapsed_ms: u64,
    candidates: u64,
    reflection_skipped: u64,
    pruned: u64,
    closures: u64,
    used_fallback: bool,
}

impl ComputeRecord {
    fn new(report: &SearchReport, cfg: SearchCfg) -> Self {
        let (status, max_k) = match &report.outcome {
            Outcome::Succeeded { .. } => ("succeeded", None),
            Outcome::Infeasible { max_k } => ("infeasible", Some(*max_k)),
            Outcome::Cancelled => ("cancelled", None),
        };
        let stats = report.stats;
        Self {
            n: report.params.n(),
            a: report.params.a(),
            status,
            m2: report.outcome.m2(),
            witness: report.outcome.witness().map(<[usize]>::to_vec),
            max_k,
            semantics: match cfg.semantics {
                NeighborSemantics::Simple => "simple",
                NeighborSemantics::Multigraph => "multigraph",
            },
            elapsed_ms: report.elapsed.as_millis() as u64,
            candidates: stats.candidates,
            reflection_skipped: stats.reflection_skipped,
            pruned: stats.pruned,
            closures: stats.closures,
            used_fallback: stats.used_fallback,
        }
    }
}

fn run_table(max_n: usize, out: PathBuf, flags: SearchFlags) -> Result<()> {
    let cfg = flags.cfg();
    tracing::info!(max_n, out = %out.display(), "table");
    let mut df = table::m2_table(max_n, cfg)?;
    ensure_parent(&out)?;
    table::write_csv(&mut df, &out)?;
    let payload = provenance::Payload::new(json!({ "max_n": max_n })).with_config(&cfg);
    provenance::write_sidecar(&out, payload)?;
    tracing::info!(rows = df.height(), cols = df.width(), "table written");
    Ok(())
}

fn run_step(
    n: i64,
    a: i64,
    start: &str,
    max_rounds: Option<usize>,
    multigraph: bool,
) -> Result<()> {
    let params = CirculantParams::new(n, a)?;
    let graph = build_neighbors(params, semantics(multigraph))?;
    let start = parse_start_set(start, params.n())?;
    let mut state = InfectionState::from_start(params.n(), &start)?;
    let mut engine = StepEngine::new();
    tracing::info!(round = 0, infected = ?state.infected_vertices(), "start");
    let mut round = 0;
    while max_rounds.map_or(true, |m| round < m) {
        let outcome = engine.step(&graph, &mut state)?;
        if !outcome.changed {
            break;
        }
        round += 1;
        tracing::info!(
            round,
            newly = ?outcome.newly_infected,
            total = state.infected_count(),
            "round"
        );
    }
    if state.is_complete() {
        println!("percolates after {round} rounds");
    } else {
        println!(
            "stalled after {round} rounds with {}/{} infected",
            state.infected_count(),
            params.n()
        );
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "percolate_version": percolate::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn hms(d: Duration) -> String {
    let s = d.as_secs();
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

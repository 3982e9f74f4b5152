use anyhow::{Context, Result};
use percolate::api::{NeighborSemantics, SearchCfg};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: command parameters plus the search switches.
pub struct Payload {
    pub params: Value,
    pub config: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            config: Value::Null,
        }
    }

    pub fn with_config(mut self, cfg: &SearchCfg) -> Self {
        self.config = json!({
            "use_reflection_prune": cfg.use_reflection_prune,
            "use_start_prune": cfg.use_start_prune,
            "fallback_to_exhaustive": cfg.fallback_to_exhaustive,
            "semantics": match cfg.semantics {
                NeighborSemantics::Simple => "simple",
                NeighborSemantics::Multigraph => "multigraph",
            },
        });
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    percolate_version: &'static str,
    callsite: Callsite<'a>,
    params: &'a Value,
    config: &'a Value,
    output: String,
}

#[derive(Serialize)]
struct Callsite<'a> {
    file: &'a str,
    line: u32,
}

/// Write `<artifact>.provenance.json` next to the artifact and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    let callsite = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        percolate_version: percolate::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        params: &payload.params,
        config: &payload.config,
        output: artifact.to_string_lossy().into_owned(),
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance written");
    Ok(path)
}

// Keeps the extension so `m2.json` and `m2.csv` get distinct sidecars.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_name()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Some(rev) = std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

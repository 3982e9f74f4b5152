//! Batch m2 table: one row per chord length `a`, one column per cycle size `n`.
//!
//! Cell markers
//! - `=`: `a > n/2`, the pair is the mirror of `(n, n - a)`.
//! - `-`: `(n, a)` is not a valid circulant (n < 4, or a ≡ 1, n−1 mod n).
//! - `-1`: no percolating set exists.
//! - otherwise the value of m2(n, a).

use anyhow::{bail, Context, Result};
use percolate::api::{compute, CancelToken, CirculantParams, Outcome, Progress, SearchCfg};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub const HEADER: &str = "a/n";

/// Compute m2 for every `1 <= a <= max_n / 2`, `1 <= n <= max_n`.
pub fn m2_table(max_n: usize, cfg: SearchCfg) -> Result<DataFrame> {
    let rows = max_n / 2;
    let cancel = CancelToken::new();
    let progress = Progress::new();

    let mut columns = Vec::with_capacity(max_n + 1);
    columns.push(Series::new(
        HEADER.into(),
        (1..=rows).map(|a| a.to_string()).collect::<Vec<_>>(),
    ));
    for n in 1..=max_n {
        let mut cells = Vec::with_capacity(rows);
        for a in 1..=rows {
            cells.push(cell(n, a, cfg, &cancel, &progress)?);
        }
        tracing::info!(n, "column done");
        columns.push(Series::new(n.to_string().into(), cells));
    }
    DataFrame::new(columns).context("assembling m2 table")
}

fn cell(
    n: usize,
    a: usize,
    cfg: SearchCfg,
    cancel: &CancelToken,
    progress: &Progress,
) -> Result<String> {
    if a > n / 2 {
        return Ok("=".to_string());
    }
    let Ok(params) = CirculantParams::new(n as i64, a as i64) else {
        return Ok("-".to_string());
    };
    let report = compute(params, cfg, cancel, progress)?;
    tracing::debug!(n, a, outcome = ?report.outcome, "cell");
    match report.outcome {
        Outcome::Succeeded { k, .. } => Ok(k.to_string()),
        Outcome::Infeasible { .. } => Ok("-1".to_string()),
        Outcome::Cancelled => bail!("search for n = {n}, a = {a} was cancelled"),
    }
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cell_at(df: &DataFrame, col: &str, row: usize) -> String {
        df.column(col)
            .unwrap()
            .str()
            .unwrap()
            .get(row)
            .unwrap()
            .to_string()
    }

    #[test]
    fn shape_and_markers() {
        let df = m2_table(6, SearchCfg::default()).unwrap();
        assert_eq!(df.shape(), (3, 7));
        // a = 1 is never a valid chord.
        assert_eq!(cell_at(&df, "4", 0), "-");
        assert_eq!(cell_at(&df, "4", 1), "2");
        // a = 3 > 4/2
        assert_eq!(cell_at(&df, "4", 2), "=");
        assert_eq!(cell_at(&df, "1", 0), "=");
        assert_eq!(cell_at(&df, "5", 1), "2");
        assert_eq!(cell_at(&df, HEADER, 2), "3");
    }

    #[test]
    fn table_matches_direct_computation() {
        let cfg = SearchCfg::default();
        let df = m2_table(10, cfg).unwrap();
        for n in 4..=10usize {
            for a in 2..=n / 2 {
                let params = CirculantParams::new(n as i64, a as i64).unwrap();
                let report = compute(params, cfg, &CancelToken::new(), &Progress::new()).unwrap();
                let expected = report
                    .outcome
                    .m2()
                    .map_or_else(|| "-1".to_string(), |k| k.to_string());
                assert_eq!(cell_at(&df, &n.to_string(), a - 1), expected, "n={n} a={a}");
            }
        }
    }

    #[test]
    fn csv_has_header_and_one_line_per_chord() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("DATA.csv");
        let mut df = m2_table(6, SearchCfg::default()).unwrap();
        write_csv(&mut df, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a/n,1,2,3,4,5,6");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("2,=,=,=,2,2,"));
    }
}

use super::Output;
use anyhow::{Result, bail};
use mcplens_core::{LogSource, discover_run_dirs, normalize_path};
use mcplens_engine::{UsageDigest, digest};
use mcplens_providers::ScanStats;
use mcplens_runtime::{Error, FailedRun, RunMetricsService, RunOutcome};
use mcplens_types::GatewayMetrics;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct RunView {
    source: LogSource,
    stats: ScanStats,
    metrics: GatewayMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<UsageDigest>,
}

#[derive(Serialize)]
struct MergedView {
    metrics: GatewayMetrics,
    contributing_runs: Vec<PathBuf>,
    skipped_runs: Vec<PathBuf>,
    failed_runs: Vec<FailedRun>,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<UsageDigest>,
}

/// Explicit dirs first, then anything discovered under `scan`, without duplicates
pub fn collect_dirs(
    mut dirs: Vec<PathBuf>,
    scan: Option<&Path>,
    max_depth: usize,
) -> Result<Vec<PathBuf>> {
    if let Some(root) = scan {
        let mut seen: Vec<PathBuf> = dirs.iter().map(|d| normalize_path(d)).collect();
        for found in discover_run_dirs(root, max_depth)? {
            let normalized = normalize_path(&found);
            if !seen.contains(&normalized) {
                seen.push(normalized);
                dirs.push(found);
            }
        }
        tracing::debug!(root = %root.display(), runs = dirs.len(), "collected run directories");
    }

    if dirs.is_empty() {
        bail!("no run directories given (pass DIR... or --scan ROOT)");
    }
    Ok(dirs)
}

/// Exactly one directory prints that run; anything more prints a merged report
pub fn handle(
    service: &RunMetricsService,
    dirs: &[PathBuf],
    digest_top: Option<usize>,
    output: Output,
) -> Result<()> {
    if let [dir] = dirs {
        return match service.analyze_run(dir)? {
            RunOutcome::Parsed {
                source,
                metrics,
                stats,
            } => output.print(&RunView {
                digest: digest_top.map(|top| digest(&metrics, top)),
                source,
                stats,
                metrics,
            }),
            RunOutcome::NotFound => Err(Error::NotFound(dir.clone()).into()),
        };
    }

    let report = service.analyze_runs(dirs)?;
    output.print(&MergedView {
        digest: digest_top.map(|top| digest(&report.metrics, top)),
        metrics: report.metrics,
        contributing_runs: report.contributing_runs,
        skipped_runs: report.skipped_runs,
        failed_runs: report.failed_runs,
    })
}

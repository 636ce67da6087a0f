use crate::{Config, Error, Result};
use mcplens_core::{LogSource, resolve_log_source};
use mcplens_engine::CrossRunAggregator;
use mcplens_providers::{ParserOptions, ScanStats, parser_for};
use mcplens_types::{GatewayMetrics, ToolCall};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What one run directory yielded
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Parsed {
        source: LogSource,
        metrics: GatewayMetrics,
        stats: ScanStats,
    },
    /// No recognized log file; the run had no MCP usage
    NotFound,
}

/// A run whose log could not be read to the end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRun {
    pub dir: PathBuf,
    pub error: String,
}

/// Merged metrics over many runs, plus which runs fed into them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRunReport {
    pub metrics: GatewayMetrics,
    pub contributing_runs: Vec<PathBuf>,
    pub skipped_runs: Vec<PathBuf>,
    pub failed_runs: Vec<FailedRun>,
}

/// Resolve → parse → (optionally) merge, one run at a time
pub struct RunMetricsService {
    options: ParserOptions,
}

impl RunMetricsService {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.parser_options())
    }

    /// Parse one run directory. A stream failure is returned as an error and
    /// whatever was accumulated before it is dropped.
    pub fn analyze_run(&self, dir: &Path) -> Result<RunOutcome> {
        let Some(source) = resolve_log_source(dir) else {
            tracing::info!(dir = %dir.display(), "no MCP gateway log found");
            return Ok(RunOutcome::NotFound);
        };

        tracing::debug!(
            path = %source.path.display(),
            format = %source.format,
            "parsing gateway log"
        );
        let parser = parser_for(source.format, self.options);
        let (metrics, stats) = parser.parse_with_stats(&source.path)?;

        Ok(RunOutcome::Parsed {
            source,
            metrics,
            stats,
        })
    }

    /// Metrics for a single run; a missing log is reported as [`Error::NotFound`]
    pub fn run_metrics(&self, dir: &Path) -> Result<GatewayMetrics> {
        match self.analyze_run(dir)? {
            RunOutcome::Parsed { metrics, .. } => Ok(metrics),
            RunOutcome::NotFound => Err(Error::NotFound(dir.to_path_buf())),
        }
    }

    /// Detail records for a single run, walked independently of the aggregate pass
    pub fn tool_calls(&self, dir: &Path) -> Result<Vec<ToolCall>> {
        let source = resolve_log_source(dir).ok_or_else(|| Error::NotFound(dir.to_path_buf()))?;
        let parser = parser_for(source.format, self.options);
        Ok(parser.extract_tool_calls(&source.path)?)
    }

    /// Merge every run that has a log. Missing logs and unreadable logs are
    /// recorded and skipped; they never abort the report.
    ///
    /// With nothing merged, the error is [`Error::NoContributingRuns`] when no
    /// run had a log and [`Error::AllRunsFailed`] when logs existed but every
    /// one of them failed.
    pub fn analyze_runs<I, P>(&self, dirs: I) -> Result<MultiRunReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut aggregator = CrossRunAggregator::new();
        let mut contributing_runs = Vec::new();
        let mut skipped_runs = Vec::new();
        let mut failed_runs = Vec::new();

        for dir in dirs {
            let dir = dir.as_ref();
            match self.analyze_run(dir) {
                Ok(RunOutcome::Parsed { metrics, .. }) => {
                    aggregator.add(&metrics);
                    contributing_runs.push(dir.to_path_buf());
                }
                Ok(RunOutcome::NotFound) => skipped_runs.push(dir.to_path_buf()),
                Err(err) => {
                    tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable run");
                    failed_runs.push(FailedRun {
                        dir: dir.to_path_buf(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let Some(merged) = aggregator.finish() else {
            if failed_runs.is_empty() {
                return Err(Error::NoContributingRuns);
            }
            return Err(Error::AllRunsFailed(failed_runs));
        };
        Ok(MultiRunReport {
            metrics: merged.metrics,
            contributing_runs,
            skipped_runs,
            failed_runs,
        })
    }
}

impl Default for RunMetricsService {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

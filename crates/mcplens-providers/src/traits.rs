use crate::{Result, ScanStats};
use mcplens_core::LogFormat;
use mcplens_types::{GatewayMetrics, ToolCall};
use std::path::Path;

/// One gateway log format.
///
/// Responsibilities:
/// - Fold a log file into a single [`GatewayMetrics`] (aggregate pass)
/// - Reconstruct individual [`ToolCall`] records (detail pass)
///
/// The two passes are independent walks of the same file, so callers that
/// only need totals never materialize per-call records.
pub trait LogParser: Send + Sync {
    /// Format this parser understands
    fn format(&self) -> LogFormat;

    /// Aggregate pass, also reporting which lines were skipped
    fn parse_with_stats(&self, path: &Path) -> Result<(GatewayMetrics, ScanStats)>;

    /// Aggregate pass
    fn parse(&self, path: &Path) -> Result<GatewayMetrics> {
        self.parse_with_stats(path).map(|(metrics, _)| metrics)
    }

    /// Detail pass: one record per logical tool call, in log order
    fn extract_tool_calls(&self, path: &Path) -> Result<Vec<ToolCall>>;
}

pub mod calls;
pub mod parser;
pub mod schema;

use crate::registry::ParserOptions;
use crate::scanner::scan_json_lines;
use crate::traits::LogParser;
use crate::{Result, ScanStats};
use mcplens_core::LogFormat;
use mcplens_types::{GatewayMetrics, ToolCall};
use std::path::Path;

pub use self::schema::{EventKind, LogEntry};

/// Server bucket for call events that carry no `server_name`
pub const UNKNOWN_SERVER: &str = "unknown";

/// Parser for the pre-computed `gateway.jsonl` format
pub struct StructuredParser {
    options: ParserOptions,
}

impl StructuredParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl Default for StructuredParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl LogParser for StructuredParser {
    fn format(&self) -> LogFormat {
        LogFormat::Structured
    }

    fn parse_with_stats(&self, path: &Path) -> Result<(GatewayMetrics, ScanStats)> {
        let mut metrics = GatewayMetrics::new();
        let stats = scan_json_lines::<LogEntry, _>(
            path,
            self.options.max_line_bytes,
            |stats, line, entry| parser::fold_entry(&mut metrics, stats, line, &entry),
        )?;
        metrics.finalize();
        Ok((metrics, stats))
    }

    fn extract_tool_calls(&self, path: &Path) -> Result<Vec<ToolCall>> {
        let mut calls = Vec::new();
        scan_json_lines::<LogEntry, _>(path, self.options.max_line_bytes, |_, _, entry| {
            if let Some(call) = calls::to_tool_call(&entry) {
                calls.push(call);
            }
        })?;
        Ok(calls)
    }
}

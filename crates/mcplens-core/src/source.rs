use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk gateway log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// `gateway.jsonl`: one pre-summarized event per line
    Structured,
    /// `rpc-messages.jsonl`: raw JSON-RPC frames that need correlation
    RawProtocol,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Structured => "structured",
            LogFormat::RawProtocol => "raw_protocol",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved log file together with the format it must be parsed as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSource {
    pub path: PathBuf,
    pub format: LogFormat,
}

/// Candidate locations relative to a run directory, first match wins
pub const SOURCE_CANDIDATES: [(&str, LogFormat); 4] = [
    ("gateway.jsonl", LogFormat::Structured),
    ("mcp-logs/gateway.jsonl", LogFormat::Structured),
    ("mcp-logs/rpc-messages.jsonl", LogFormat::RawProtocol),
    ("rpc-messages.jsonl", LogFormat::RawProtocol),
];

/// Find the log file for a run directory.
///
/// Returns `None` when nothing is found, including when `dir` itself does not
/// exist. A run without MCP usage legitimately has no log file.
pub fn resolve_log_source(dir: &Path) -> Option<LogSource> {
    SOURCE_CANDIDATES.iter().find_map(|(relative, format)| {
        let path = dir.join(relative);
        path.is_file().then(|| LogSource {
            path,
            format: *format,
        })
    })
}

/// Walk `root` and return every directory that resolves to a log source.
///
/// A directory whose ancestor already resolved is skipped, so a run directory
/// and its own `mcp-logs/` child are reported once. Results are sorted.
pub fn discover_run_dirs(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    let mut found: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_type().is_dir());

    for entry in walker {
        let entry = entry?;
        let dir = entry.path();

        if found.iter().any(|run| dir.starts_with(run)) {
            continue;
        }

        if resolve_log_source(dir).is_some() {
            found.push(dir.to_path_buf());
        }
    }

    found.sort();
    Ok(found)
}

//! TestWorld pattern for declarative gateway-log test setup.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated directory tree of run directories.
///
/// # Example
/// ```no_run
/// use mcplens_testing::{TestWorld, fixtures};
///
/// let world = TestWorld::new();
/// let run = world
///     .write_log("run-1", fixtures::MCP_LOGS_GATEWAY, &[
///         fixtures::tool_call("2025-01-01T10:00:00Z", "github", "list_issues", 120.0),
///     ])
///     .unwrap();
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a run directory (not created)
    pub fn run_dir(&self, run: &str) -> PathBuf {
        self.root().join(run)
    }

    /// Write `lines` to `relative` inside run `run` and return the run directory
    pub fn write_log<S: AsRef<str>>(
        &self,
        run: &str,
        relative: &str,
        lines: &[S],
    ) -> Result<PathBuf> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        self.write_raw(run, relative, content.as_bytes())
    }

    /// Write raw bytes, for fixtures that must not be valid JSONL
    pub fn write_raw(&self, run: &str, relative: &str, content: &[u8]) -> Result<PathBuf> {
        let run_dir = self.run_dir(run);
        let path = run_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(run_dir)
    }

    /// Create an empty run directory with no logs
    pub fn empty_run(&self, run: &str) -> Result<PathBuf> {
        let run_dir = self.run_dir(run);
        fs::create_dir_all(&run_dir)?;
        Ok(run_dir)
    }
}

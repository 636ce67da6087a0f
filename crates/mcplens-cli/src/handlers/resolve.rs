use super::Output;
use anyhow::{Result, bail};
use mcplens_core::resolve_log_source;
use std::path::Path;

pub fn handle(dir: &Path, output: Output) -> Result<()> {
    match resolve_log_source(dir) {
        Some(source) => output.print(&source),
        None => bail!("No MCP gateway log found in {}", dir.display()),
    }
}

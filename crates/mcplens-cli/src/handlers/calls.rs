use super::Output;
use anyhow::Result;
use mcplens_runtime::RunMetricsService;
use std::path::Path;

pub fn handle(service: &RunMetricsService, dir: &Path, output: Output) -> Result<()> {
    let calls = service.tool_calls(dir)?;
    output.print(&calls)
}

// Integration tests for the complete flow: run directory → resolver → parser → aggregator
use mcplens_core::LogFormat;
use mcplens_providers::ParserOptions;
use mcplens_runtime::{Error, RunMetricsService, RunOutcome};
use mcplens_testing::{TestWorld, fixtures};
use mcplens_types::CallStatus;
use serde_json::json;

fn rpc_run(
    world: &TestWorld,
    name: &str,
    tool: &str,
    response_ts: &str,
) -> anyhow::Result<std::path::PathBuf> {
    world.write_log(
        name,
        fixtures::MCP_LOGS_RPC,
        &[
            fixtures::rpc_request("2025-01-01T10:00:00Z", "github", json!(1), tool),
            fixtures::rpc_response(response_ts, "github", json!(1)),
        ],
    )
}

#[test]
fn test_analyze_run_reports_source_and_stats() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let run = world.write_log(
        "run",
        fixtures::MCP_LOGS_GATEWAY,
        &[
            fixtures::tool_call("2025-01-01T10:00:00Z", "github", "get_repository", 10.0),
            "garbage".to_string(),
        ],
    )?;

    match RunMetricsService::default().analyze_run(&run)? {
        RunOutcome::Parsed { source, metrics, stats } => {
            assert_eq!(source.format, LogFormat::Structured);
            assert_eq!(metrics.total_tool_calls, 1);
            assert_eq!(stats.malformed_lines, 1);
        }
        RunOutcome::NotFound => panic!("expected a parsed run"),
    }
    Ok(())
}

#[test]
fn test_missing_log_is_not_found() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let run = world.empty_run("idle")?;
    let service = RunMetricsService::default();

    assert_eq!(service.analyze_run(&run)?, RunOutcome::NotFound);
    assert!(matches!(service.run_metrics(&run), Err(Error::NotFound(_))));
    assert!(matches!(service.tool_calls(&run), Err(Error::NotFound(_))));
    // A directory that does not exist at all behaves the same
    assert_eq!(service.analyze_run(&world.run_dir("ghost"))?, RunOutcome::NotFound);
    Ok(())
}

#[test]
fn test_analyze_runs_skips_missing_and_failed_runs() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let first = rpc_run(&world, "run-1", "get_repository", "2025-01-01T10:00:00.300Z")?;
    let second = rpc_run(&world, "run-2", "get_repository", "2025-01-01T10:00:00.100Z")?;
    let idle = world.empty_run("run-3")?;
    let broken = world.write_raw(
        "run-4",
        fixtures::ROOT_GATEWAY,
        format!("{}\n", "x".repeat(4096)).as_bytes(),
    )?;

    let service = RunMetricsService::new(ParserOptions {
        max_line_bytes: 1024,
    });
    let report = service.analyze_runs([&first, &idle, &second, &broken])?;

    assert_eq!(report.contributing_runs, vec![first, second]);
    assert_eq!(report.skipped_runs, vec![idle]);
    assert_eq!(report.failed_runs.len(), 1);
    assert_eq!(report.failed_runs[0].dir, broken);

    let tool = &report.metrics.servers["github"].tools["get_repository"];
    assert_eq!(tool.call_count, 2);
    assert_eq!(tool.avg_duration_ms, 200.0);
    Ok(())
}

#[test]
fn test_analyze_runs_without_logs_signals_no_data() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let a = world.empty_run("a")?;
    let b = world.empty_run("b")?;

    let result = RunMetricsService::default().analyze_runs([a, b]);
    assert!(matches!(result, Err(Error::NoContributingRuns)));
    Ok(())
}

#[test]
fn test_analyze_runs_with_only_unreadable_logs_reports_failures() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let idle = world.empty_run("idle")?;
    let broken = world.write_raw(
        "broken",
        fixtures::MCP_LOGS_GATEWAY,
        format!("{}\n", "x".repeat(4096)).as_bytes(),
    )?;

    let service = RunMetricsService::new(ParserOptions {
        max_line_bytes: 1024,
    });
    match service.analyze_runs([&idle, &broken]) {
        Err(Error::AllRunsFailed(failed)) => {
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].dir, broken);
            assert!(failed[0].error.contains("exceeds the maximum line size"));
        }
        other => panic!("expected AllRunsFailed, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_tool_calls_from_raw_protocol_run() -> anyhow::Result<()> {
    let world = TestWorld::new();
    let run = world.write_log(
        "run",
        fixtures::ROOT_RPC,
        &[
            fixtures::rpc_request("2025-01-01T10:00:00Z", "github", json!(1), "get_repository"),
            fixtures::rpc_request("2025-01-01T10:00:01Z", "github", json!(2), "list_issues"),
            fixtures::rpc_error(
                "2025-01-01T10:00:01.050Z",
                "github",
                json!(2),
                -32000,
                "rate limit",
            ),
        ],
    )?;

    let calls = RunMetricsService::default().tool_calls(&run)?;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].status, CallStatus::Unknown);
    assert_eq!(calls[1].status, CallStatus::Error);
    assert_eq!(calls[1].duration, "50ms");
    Ok(())
}

mod common;

use common::CliFixture;
use mcplens_testing::fixtures;
use predicates::prelude::*;
use serde_json::json;

fn structured_run(fixture: &CliFixture, name: &str) -> std::path::PathBuf {
    fixture
        .world
        .write_log(
            name,
            fixtures::MCP_LOGS_GATEWAY,
            &[
                fixtures::tool_call("2025-01-01T10:00:00Z", "github", "get_repository", 120.0),
                fixtures::failed_tool_call(
                    "2025-01-01T10:00:02Z",
                    "github",
                    "list_issues",
                    80.0,
                    "rate limited",
                ),
            ],
        )
        .expect("Failed to write structured log")
}

fn rpc_run(fixture: &CliFixture, name: &str) -> std::path::PathBuf {
    fixture
        .world
        .write_log(
            name,
            fixtures::ROOT_RPC,
            &[
                fixtures::rpc_request("2025-01-01T11:00:00Z", "github", json!(7), "get_repository"),
                fixtures::rpc_response("2025-01-01T11:00:00.200Z", "github", json!(7)),
            ],
        )
        .expect("Failed to write rpc log")
}

#[test]
fn test_metrics_single_run() {
    let fixture = CliFixture::new();
    let run = structured_run(&fixture, "run-1");

    let out = fixture.json(fixture.command().arg("metrics").arg(&run));

    assert_eq!(out["source"]["format"], "structured");
    assert_eq!(out["stats"]["malformed_lines"], 0);
    assert_eq!(out["metrics"]["total_tool_calls"], 2);
    assert_eq!(out["metrics"]["total_errors"], 1);
    assert_eq!(
        out["metrics"]["servers"]["github"]["tools"]["get_repository"]["avg_duration_ms"],
        120.0
    );
    assert!(out.get("digest").is_none());
}

#[test]
fn test_metrics_missing_log_fails() {
    let fixture = CliFixture::new();
    let run = fixture.world.empty_run("idle").expect("Failed to create run");

    fixture
        .command()
        .arg("metrics")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No MCP gateway log found"));
}

#[test]
fn test_metrics_merges_runs_with_digest() {
    let fixture = CliFixture::new();
    let first = structured_run(&fixture, "run-1");
    let second = rpc_run(&fixture, "run-2");
    let idle = fixture.world.empty_run("run-3").expect("Failed to create run");

    let out = fixture.json(
        fixture
            .command()
            .arg("metrics")
            .args([&first, &second, &idle])
            .arg("--digest")
            .args(["--top", "1"]),
    );

    assert_eq!(out["contributing_runs"].as_array().map(Vec::len), Some(2));
    assert_eq!(out["skipped_runs"].as_array().map(Vec::len), Some(1));

    let tool = &out["metrics"]["servers"]["github"]["tools"]["get_repository"];
    assert_eq!(tool["call_count"], 2);
    assert_eq!(tool["avg_duration_ms"], 160.0);

    assert_eq!(out["digest"]["busiest"][0]["tool_name"], "get_repository");
    assert_eq!(out["digest"]["slowest"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_metrics_scan_discovers_runs() {
    let fixture = CliFixture::new();
    structured_run(&fixture, "sessions/a");
    rpc_run(&fixture, "sessions/b");
    fixture
        .world
        .empty_run("sessions/c")
        .expect("Failed to create run");

    let out = fixture.json(
        fixture
            .command()
            .arg("metrics")
            .arg("--scan")
            .arg(fixture.world.root().join("sessions")),
    );

    assert_eq!(out["contributing_runs"].as_array().map(Vec::len), Some(2));
    assert_eq!(out["metrics"]["total_tool_calls"], 3);
}

#[test]
fn test_metrics_without_dirs_fails() {
    let fixture = CliFixture::new();

    fixture
        .command()
        .arg("metrics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no run directories"));
}

#[test]
fn test_calls_lists_detail_records() {
    let fixture = CliFixture::new();
    let run = structured_run(&fixture, "run-1");

    let out = fixture.json(fixture.command().arg("calls").arg(&run));
    let calls = out.as_array().expect("calls output is an array");

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0]["tool_name"], "get_repository");
    assert_eq!(calls[0]["status"], "success");
    assert_eq!(calls[0]["duration"], "120ms");
    assert_eq!(calls[1]["status"], "error");
    assert_eq!(calls[1]["error"], "rate limited");
}

#[test]
fn test_resolve_reports_raw_protocol() {
    let fixture = CliFixture::new();
    let run = rpc_run(&fixture, "run-1");

    let out = fixture.json(fixture.command().arg("resolve").arg(&run));

    assert_eq!(out["format"], "raw_protocol");
    assert!(
        out["path"]
            .as_str()
            .is_some_and(|p| p.ends_with("rpc-messages.jsonl"))
    );
}

#[test]
fn test_config_line_limit_is_applied() {
    let fixture = CliFixture::new();
    let run = structured_run(&fixture, "run-1");
    let config_path = fixture.data_dir().join("config.toml");
    std::fs::create_dir_all(fixture.data_dir()).expect("Failed to create data dir");
    std::fs::write(&config_path, "[parser]\nmax_line_bytes = 32\n")
        .expect("Failed to write config");

    fixture
        .command()
        .arg("metrics")
        .arg(&run)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum line size of 32 bytes"));
}

#[test]
fn test_explicit_config_flag() {
    let fixture = CliFixture::new();
    let run = structured_run(&fixture, "run-1");
    let config_path = fixture.world.root().join("custom.toml");
    std::fs::write(&config_path, "log_level = \"error\"\n").expect("Failed to write config");

    let out = fixture.json(
        fixture
            .command()
            .arg("--config")
            .arg(&config_path)
            .arg("metrics")
            .arg(&run),
    );
    assert_eq!(out["metrics"]["total_requests"], 2);
}

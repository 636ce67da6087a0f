use super::UNKNOWN_SERVER;
use super::schema::LogEntry;
use crate::ScanStats;
use mcplens_types::GatewayMetrics;

/// Fold one decoded `gateway.jsonl` entry into the running aggregate
pub(crate) fn fold_entry(
    metrics: &mut GatewayMetrics,
    stats: &mut ScanStats,
    line: usize,
    entry: &LogEntry,
) {
    match entry.parsed_timestamp() {
        Some(ts) => metrics.observe_timestamp(ts),
        None if entry.has_timestamp() => {
            stats.bad_timestamps += 1;
            tracing::debug!(line, timestamp = ?entry.timestamp, "unparseable timestamp");
        }
        None => {}
    }

    if entry.is_error() {
        metrics.total_errors += 1;
        if let Some(server_name) = entry.server_name() {
            let server = metrics.server_mut(server_name);
            server.error_count += 1;
            if let Some(tool_name) = entry.tool_name() {
                server.tool_mut(tool_name).error_count += 1;
            }
        }
    }

    if !entry.event_kind().is_call() {
        return;
    }

    let duration = entry.positive_duration();
    let call_name = entry.call_name();

    metrics.total_requests += 1;
    if let Some(ms) = duration {
        metrics.total_duration_ms += ms;
    }
    if call_name.is_some() {
        metrics.total_tool_calls += 1;
    }

    let server = metrics.server_mut(entry.server_name().unwrap_or(UNKNOWN_SERVER));
    server.request_count += 1;
    if let Some(ms) = duration {
        server.total_duration_ms += ms;
    }

    let Some(call_name) = call_name else {
        return;
    };
    server.tool_call_count += 1;

    let tool = server.tool_mut(call_name);
    tool.call_count += 1;
    if let Some(ms) = duration {
        tool.record_duration(ms);
    }
    tool.record_sizes(entry.input_size, entry.output_size);
}

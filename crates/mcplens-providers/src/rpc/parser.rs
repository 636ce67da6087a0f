use super::correlate::{Correlator, MessageKey};
use super::schema::{Frame, RpcMessageEntry, RpcResponse, ToolCallRequest};
use crate::ScanStats;
use chrono::{DateTime, Utc};
use mcplens_types::{GatewayMetrics, duration_ms_between};
use std::path::Path;

/// Decode the line's timestamp and frame, recording recoverable problems in `stats`.
/// Returns `None` when the payload does not match its declared type.
pub(crate) fn decode_line(
    stats: &mut ScanStats,
    path: &Path,
    line: usize,
    entry: RpcMessageEntry,
) -> Option<(Option<DateTime<Utc>>, Frame)> {
    let at = entry.parsed_timestamp();
    if at.is_none() && entry.has_timestamp() {
        stats.bad_timestamps += 1;
        tracing::debug!(
            path = %path.display(),
            line,
            timestamp = ?entry.timestamp,
            "unparseable timestamp"
        );
    }

    match entry.into_frame() {
        Frame::Malformed(reason) => {
            stats.malformed_lines += 1;
            tracing::warn!(
                path = %path.display(),
                line,
                %reason,
                "skipping malformed rpc message"
            );
            None
        }
        frame => Some((at, frame)),
    }
}

/// Elapsed time between request and response, dropping negative values
pub(crate) fn correlated_duration(
    requested_at: Option<DateTime<Utc>>,
    responded_at: Option<DateTime<Utc>>,
) -> Option<f64> {
    let (start, end) = (requested_at?, responded_at?);
    let duration = duration_ms_between(start, end);
    if duration < 0.0 {
        tracing::debug!(duration_ms = duration, "discarding negative duration");
        return None;
    }
    Some(duration)
}

/// Outstanding `tools/call` request awaiting its response
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub tool_name: String,
    pub requested_at: Option<DateTime<Utc>>,
}

/// Aggregate pass over raw frames
#[derive(Debug, Default)]
pub struct MetricsFolder {
    metrics: GatewayMetrics,
    pending: Correlator<PendingRequest>,
}

impl MetricsFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(
        &mut self,
        stats: &mut ScanStats,
        path: &Path,
        line: usize,
        entry: RpcMessageEntry,
    ) {
        let Some((at, frame)) = decode_line(stats, path, line, entry) else {
            return;
        };
        if let Some(ts) = at {
            self.metrics.observe_timestamp(ts);
        }

        match frame {
            Frame::ToolCall(request) => self.on_request(request, at),
            Frame::Response(response) => self.on_response(response, at),
            Frame::Ignored | Frame::Malformed(_) => {}
        }
    }

    /// A request counts as a call whether or not a response ever arrives
    fn on_request(&mut self, request: ToolCallRequest, at: Option<DateTime<Utc>>) {
        self.metrics.total_requests += 1;
        self.metrics.total_tool_calls += 1;

        let server = self.metrics.server_mut(&request.server_id);
        server.request_count += 1;
        server.tool_call_count += 1;

        let tool = server.tool_mut(&request.tool_name);
        tool.call_count += 1;
        tool.record_sizes(request.input_size, None);

        if let Some(id) = request.id {
            let key = MessageKey::new(request.server_id, id);
            let displaced = self.pending.open(
                key,
                PendingRequest {
                    tool_name: request.tool_name,
                    requested_at: at,
                },
            );
            if let Some(previous) = displaced {
                tracing::debug!(tool = %previous.tool_name, "request id reused before response");
            }
        }
    }

    fn on_response(&mut self, response: RpcResponse, at: Option<DateTime<Utc>>) {
        let failed = response.error.is_some();
        if failed {
            self.metrics.total_errors += 1;
            self.metrics.server_mut(&response.server_id).error_count += 1;
        }

        let Some(id) = response.id else {
            return;
        };
        let key = MessageKey::new(response.server_id, id);
        let Some(pending) = self.pending.close(&key) else {
            return;
        };

        let duration = correlated_duration(pending.requested_at, at);
        if let Some(ms) = duration {
            self.metrics.total_duration_ms += ms;
        }

        let server = self.metrics.server_mut(&key.server_id);
        if let Some(ms) = duration {
            server.total_duration_ms += ms;
        }

        let tool = server.tool_mut(&pending.tool_name);
        if let Some(ms) = duration {
            tool.record_duration(ms);
        }
        if failed {
            tool.error_count += 1;
        }
        tool.record_sizes(None, response.output_size);
    }

    /// Materialize averages and drop the correlation table
    pub fn finish(self) -> GatewayMetrics {
        for (key, pending) in self.pending.into_unmatched() {
            tracing::debug!(
                server = %key.server_id,
                id = %key.id,
                tool = %pending.tool_name,
                "tool call without a response"
            );
        }
        let mut metrics = self.metrics;
        metrics.finalize();
        metrics
    }
}

use super::correlate::{Correlator, MessageKey};
use super::parser::{correlated_duration, decode_line};
use super::schema::{Frame, RpcMessageEntry, RpcResponse, TOOLS_CALL_METHOD, ToolCallRequest};
use crate::ScanStats;
use chrono::{DateTime, Utc};
use mcplens_types::{CallStatus, ToolCall};
use std::path::Path;

#[derive(Debug)]
struct PendingCall {
    index: usize,
    requested_at: Option<DateTime<Utc>>,
}

/// Detail pass over raw frames.
///
/// Each `tools/call` request reserves a slot in request order; the matching
/// response fills it in. Slots never answered keep status `unknown`.
#[derive(Debug, Default)]
pub struct CallCollector {
    calls: Vec<ToolCall>,
    pending: Correlator<PendingCall>,
}

impl CallCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(
        &mut self,
        stats: &mut ScanStats,
        path: &Path,
        line: usize,
        entry: RpcMessageEntry,
    ) {
        let Some((at, frame)) = decode_line(stats, path, line, entry) else {
            return;
        };

        match frame {
            Frame::ToolCall(request) => self.on_request(request, at),
            Frame::Response(response) => self.on_response(response, at),
            Frame::Ignored | Frame::Malformed(_) => {}
        }
    }

    fn on_request(&mut self, request: ToolCallRequest, at: Option<DateTime<Utc>>) {
        let index = self.calls.len();
        self.calls.push(ToolCall {
            timestamp: request.timestamp.unwrap_or_default(),
            server_name: request.server_id.clone(),
            tool_name: request.tool_name,
            method: TOOLS_CALL_METHOD.to_string(),
            input_size: request.input_size,
            output_size: None,
            duration_ms: None,
            duration: String::new(),
            status: CallStatus::Unknown,
            error: None,
        });

        if let Some(id) = request.id {
            self.pending.open(
                MessageKey::new(request.server_id, id),
                PendingCall {
                    index,
                    requested_at: at,
                },
            );
        }
    }

    fn on_response(&mut self, response: RpcResponse, at: Option<DateTime<Utc>>) {
        let Some(id) = response.id else {
            return;
        };
        let Some(pending) = self.pending.close(&MessageKey::new(response.server_id, id)) else {
            return;
        };
        let Some(call) = self.calls.get_mut(pending.index) else {
            return;
        };

        match response.error {
            Some(err) => {
                call.status = CallStatus::Error;
                call.error = Some(err.display_message());
            }
            None => call.status = CallStatus::Success,
        }
        call.output_size = response.output_size;
        if let Some(ms) = correlated_duration(pending.requested_at, at) {
            call.set_duration(ms);
        }
    }

    /// Records in request order, unanswered ones left as `unknown`
    pub fn finish(self) -> Vec<ToolCall> {
        self.calls
    }
}

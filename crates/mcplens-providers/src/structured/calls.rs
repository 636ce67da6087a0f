use super::UNKNOWN_SERVER;
use super::schema::LogEntry;
use mcplens_types::{CallStatus, ToolCall};

/// Materialize a detail record for entries that the aggregate pass counts as tool calls
pub(crate) fn to_tool_call(entry: &LogEntry) -> Option<ToolCall> {
    if !entry.event_kind().is_call() {
        return None;
    }
    let tool_name = entry.call_name()?;

    let status = if entry.is_error() {
        CallStatus::Error
    } else if entry.is_success() {
        CallStatus::Success
    } else {
        CallStatus::Unknown
    };

    let mut call = ToolCall {
        timestamp: entry.timestamp.clone().unwrap_or_default(),
        server_name: entry.server_name().unwrap_or(UNKNOWN_SERVER).to_string(),
        tool_name: tool_name.to_string(),
        method: entry.method().unwrap_or_default().to_string(),
        input_size: entry.input_size,
        output_size: entry.output_size,
        duration_ms: None,
        duration: String::new(),
        status,
        error: entry.error_message().map(str::to_string),
    };
    if let Some(ms) = entry.duration.filter(|d| *d >= 0.0) {
        call.set_duration(ms);
    }
    Some(call)
}

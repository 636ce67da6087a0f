use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of one tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
    /// Request seen but no response was ever logged
    Unknown,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Success => "success",
            CallStatus::Error => "error",
            CallStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconstructed tool invocation, used for per-call reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub timestamp: String,
    pub server_name: String,
    pub tool_name: String,
    pub method: String,
    pub input_size: Option<u64>,
    pub output_size: Option<u64>,
    pub duration_ms: Option<f64>,
    /// Human-readable form of `duration_ms`; empty when unknown
    pub duration: String,
    pub status: CallStatus,
    pub error: Option<String>,
}

impl ToolCall {
    pub fn set_duration(&mut self, duration_ms: f64) {
        self.duration_ms = Some(duration_ms);
        self.duration = format_duration(duration_ms);
    }
}

/// Format a millisecond duration for display: `150ms`, `1.5s`, `2m3s`.
///
/// The unit is chosen after rounding, so `999.6` is `1.0s`, not `1000ms`.
pub fn format_duration(duration_ms: f64) -> String {
    let millis = duration_ms.round() as i64;
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let tenths = (duration_ms / 100.0).round() as i64;
    if tenths < 600 {
        return format!("{}.{}s", tenths / 10, tenths % 10);
    }

    let total_secs = (duration_ms / 1000.0).round() as i64;
    format!("{}m{}s", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0ms");
        assert_eq!(format_duration(150.4), "150ms");
        assert_eq!(format_duration(1500.0), "1.5s");
        assert_eq!(format_duration(59_940.0), "59.9s");
        assert_eq!(format_duration(123_000.0), "2m3s");
    }

    #[test]
    fn test_format_duration_rounds_before_picking_unit() {
        assert_eq!(format_duration(999.4), "999ms");
        assert_eq!(format_duration(999.6), "1.0s");
        assert_eq!(format_duration(59_949.0), "59.9s");
        assert_eq!(format_duration(59_990.0), "1m0s");
        assert_eq!(format_duration(119_600.0), "2m0s");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CallStatus::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
        assert_eq!(CallStatus::Error.to_string(), "error");
    }

    #[test]
    fn test_set_duration_fills_both_fields() {
        let mut call = ToolCall {
            timestamp: "2025-01-01T10:00:00Z".to_string(),
            server_name: "github".to_string(),
            tool_name: "get_repository".to_string(),
            method: "tools/call".to_string(),
            input_size: None,
            output_size: None,
            duration_ms: None,
            duration: String::new(),
            status: CallStatus::Success,
            error: None,
        };
        call.set_duration(150.0);
        assert_eq!(call.duration_ms, Some(150.0));
        assert_eq!(call.duration, "150ms");
    }
}

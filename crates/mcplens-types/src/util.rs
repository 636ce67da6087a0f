use chrono::{DateTime, Utc};

/// Parse an RFC3339 timestamp (any sub-second precision) into UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Signed milliseconds from `start` to `end`, keeping sub-millisecond precision
pub fn duration_ms_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64,
    }
}

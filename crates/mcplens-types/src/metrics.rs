use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate usage of one tool on one server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolMetrics {
    pub tool_name: String,
    pub call_count: u64,
    pub total_duration_ms: f64,
    /// Materialized by [`GatewayMetrics::finalize`]; always `total_duration_ms / call_count`
    pub avg_duration_ms: f64,
    pub max_duration_ms: f64,
    /// 0.0 means no positive duration has been observed yet
    pub min_duration_ms: f64,
    pub error_count: u64,
    pub total_input_size: u64,
    pub total_output_size: u64,
}

impl ToolMetrics {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Default::default()
        }
    }

    /// Add one duration sample.
    ///
    /// The sample always counts toward the total. Min/max only move on
    /// strictly positive samples so that an unset 0.0 never reads as a minimum.
    pub fn record_duration(&mut self, duration_ms: f64) {
        self.total_duration_ms += duration_ms;
        if duration_ms > 0.0 {
            if duration_ms > self.max_duration_ms {
                self.max_duration_ms = duration_ms;
            }
            if self.min_duration_ms == 0.0 || duration_ms < self.min_duration_ms {
                self.min_duration_ms = duration_ms;
            }
        }
    }

    pub fn record_sizes(&mut self, input_size: Option<u64>, output_size: Option<u64>) {
        if let Some(size) = input_size {
            self.total_input_size += size;
        }
        if let Some(size) = output_size {
            self.total_output_size += size;
        }
    }

    pub fn recompute_average(&mut self) {
        self.avg_duration_ms = if self.call_count > 0 {
            self.total_duration_ms / self.call_count as f64
        } else {
            0.0
        };
    }

    /// Fold another tool's counters into this one. Averages are left stale.
    pub fn absorb(&mut self, other: &ToolMetrics) {
        self.call_count += other.call_count;
        self.total_duration_ms += other.total_duration_ms;
        self.error_count += other.error_count;
        self.total_input_size += other.total_input_size;
        self.total_output_size += other.total_output_size;
        self.max_duration_ms = self.max_duration_ms.max(other.max_duration_ms);
        self.min_duration_ms = merge_min(self.min_duration_ms, other.min_duration_ms);
    }
}

/// Aggregate usage of one MCP server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerMetrics {
    pub server_name: String,
    pub request_count: u64,
    pub tool_call_count: u64,
    pub total_duration_ms: f64,
    pub error_count: u64,
    #[serde(default)]
    pub tools: BTreeMap<String, ToolMetrics>,
}

impl ServerMetrics {
    pub fn new(server_name: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            ..Default::default()
        }
    }

    /// Get-or-create the metrics for `tool_name`
    pub fn tool_mut(&mut self, tool_name: &str) -> &mut ToolMetrics {
        self.tools
            .entry(tool_name.to_string())
            .or_insert_with(|| ToolMetrics::new(tool_name))
    }

    pub fn absorb(&mut self, other: &ServerMetrics) {
        self.request_count += other.request_count;
        self.tool_call_count += other.tool_call_count;
        self.total_duration_ms += other.total_duration_ms;
        self.error_count += other.error_count;
        for (name, tool) in &other.tools {
            self.tool_mut(name).absorb(tool);
        }
    }
}

/// Top-level usage aggregate for one run (or many, after merging)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayMetrics {
    pub total_requests: u64,
    pub total_tool_calls: u64,
    pub total_errors: u64,
    pub total_duration_ms: f64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub servers: BTreeMap<String, ServerMetrics>,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the metrics for `server_name`
    pub fn server_mut(&mut self, server_name: &str) -> &mut ServerMetrics {
        self.servers
            .entry(server_name.to_string())
            .or_insert_with(|| ServerMetrics::new(server_name))
    }

    /// Widen the start/end bounds to include `ts`
    pub fn observe_timestamp(&mut self, ts: DateTime<Utc>) {
        self.start_time = Some(match self.start_time {
            Some(start) if start <= ts => start,
            _ => ts,
        });
        self.end_time = Some(match self.end_time {
            Some(end) if end >= ts => end,
            _ => ts,
        });
    }

    /// Materialize derived fields. This is the only place averages are computed.
    pub fn finalize(&mut self) {
        for server in self.servers.values_mut() {
            for tool in server.tools.values_mut() {
                tool.recompute_average();
            }
        }
    }

    /// Add every counter of `other` into `self`.
    ///
    /// Averages are not recomputed; call [`GatewayMetrics::finalize`] once
    /// after the last merge.
    pub fn merge(&mut self, other: &GatewayMetrics) {
        self.total_requests += other.total_requests;
        self.total_tool_calls += other.total_tool_calls;
        self.total_errors += other.total_errors;
        self.total_duration_ms += other.total_duration_ms;

        if let Some(start) = other.start_time {
            self.observe_timestamp(start);
        }
        if let Some(end) = other.end_time {
            self.observe_timestamp(end);
        }

        for (name, server) in &other.servers {
            self.server_mut(name).absorb(server);
        }
    }

    /// Wall-clock span between the first and last observed timestamp
    pub fn time_span_ms(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}

fn merge_min(current: f64, incoming: f64) -> f64 {
    if current == 0.0 {
        incoming
    } else if incoming == 0.0 {
        current
    } else {
        current.min(incoming)
    }
}

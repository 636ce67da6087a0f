use mcplens_types::{GatewayMetrics, ToolMetrics};
use serde::Serialize;
use std::cmp::Ordering;

/// One tool, flattened out of its server for ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolRank {
    pub server_name: String,
    pub tool_name: String,
    pub call_count: u64,
    pub error_count: u64,
    pub avg_duration_ms: f64,
    pub max_duration_ms: f64,
}

impl ToolRank {
    fn new(server_name: &str, tool: &ToolMetrics) -> Self {
        Self {
            server_name: server_name.to_string(),
            tool_name: tool.tool_name.clone(),
            call_count: tool.call_count,
            error_count: tool.error_count,
            avg_duration_ms: tool.avg_duration_ms,
            max_duration_ms: tool.max_duration_ms,
        }
    }
}

/// Headline numbers a renderer typically shows above the tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageDigest {
    pub server_count: usize,
    pub tool_count: usize,
    pub error_rate: f64,
    pub time_span_ms: Option<i64>,
    pub busiest: Vec<ToolRank>,
    pub slowest: Vec<ToolRank>,
}

/// Errors per request; 0.0 when there were no requests
pub fn error_rate(metrics: &GatewayMetrics) -> f64 {
    if metrics.total_requests == 0 {
        return 0.0;
    }
    metrics.total_errors as f64 / metrics.total_requests as f64
}

fn ranks(metrics: &GatewayMetrics) -> Vec<ToolRank> {
    metrics
        .servers
        .iter()
        .flat_map(|(server_name, server)| {
            server
                .tools
                .values()
                .map(move |tool| ToolRank::new(server_name, tool))
        })
        .collect()
}

// BTreeMap iteration already yields (server, tool) order; sort_by is stable,
// so ties keep that order.
fn top_by<F>(metrics: &GatewayMetrics, limit: usize, mut compare: F) -> Vec<ToolRank>
where
    F: FnMut(&ToolRank, &ToolRank) -> Ordering,
{
    let mut ranked = ranks(metrics);
    ranked.sort_by(&mut compare);
    ranked.truncate(limit);
    ranked
}

/// Tools with the most calls first
pub fn busiest_tools(metrics: &GatewayMetrics, limit: usize) -> Vec<ToolRank> {
    top_by(metrics, limit, |a, b| b.call_count.cmp(&a.call_count))
}

/// Tools with the highest average duration first; tools with no timing data are excluded
pub fn slowest_tools(metrics: &GatewayMetrics, limit: usize) -> Vec<ToolRank> {
    let mut ranked = top_by(metrics, usize::MAX, |a, b| {
        b.avg_duration_ms.total_cmp(&a.avg_duration_ms)
    });
    ranked.retain(|rank| rank.avg_duration_ms > 0.0);
    ranked.truncate(limit);
    ranked
}

pub fn digest(metrics: &GatewayMetrics, limit: usize) -> UsageDigest {
    UsageDigest {
        server_count: metrics.servers.len(),
        tool_count: metrics.servers.values().map(|s| s.tools.len()).sum(),
        error_rate: error_rate(metrics),
        time_span_ms: metrics.time_span_ms(),
        busiest: busiest_tools(metrics, limit),
        slowest: slowest_tools(metrics, limit),
    }
}

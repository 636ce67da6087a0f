// Engine module - cross-run merging and derived analysis over GatewayMetrics.
// Sits between the per-format parsers (providers) and whatever renders the result.

pub mod aggregate;
pub mod analysis;

pub use aggregate::{CrossRunAggregator, MergedMetrics, merge_runs};
pub use analysis::{ToolRank, UsageDigest, busiest_tools, digest, error_rate, slowest_tools};

pub mod metrics;

pub use metrics::{FailedRun, MultiRunReport, RunMetricsService, RunOutcome};

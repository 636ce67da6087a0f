use mcplens_types::GatewayMetrics;

/// Result of folding several runs together
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMetrics {
    pub metrics: GatewayMetrics,
    /// Runs that actually had a log file
    pub run_count: usize,
}

/// Sequential, additive merge of per-run metrics.
///
/// Totals and per-server/per-tool counters sum; min/max take the overall
/// extreme (an unset 0 is "no data"); time bounds widen. Averages are
/// derived once in [`CrossRunAggregator::finish`] from the final totals.
#[derive(Debug, Default)]
pub struct CrossRunAggregator {
    merged: GatewayMetrics,
    run_count: usize,
}

impl CrossRunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one run that produced metrics
    pub fn add(&mut self, run: &GatewayMetrics) {
        self.merged.merge(run);
        self.run_count += 1;
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    /// `None` when no run contributed, so callers can tell "nothing to show"
    /// apart from an aggregate of zeros
    pub fn finish(self) -> Option<MergedMetrics> {
        if self.run_count == 0 {
            return None;
        }
        let mut metrics = self.merged;
        metrics.finalize();
        Some(MergedMetrics {
            metrics,
            run_count: self.run_count,
        })
    }
}

/// Merge runs, where `None` marks a run without a log file
pub fn merge_runs<I>(runs: I) -> Option<MergedMetrics>
where
    I: IntoIterator<Item = Option<GatewayMetrics>>,
{
    let mut aggregator = CrossRunAggregator::new();
    for run in runs.into_iter().flatten() {
        aggregator.add(&run);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(
        server: &str,
        tool: &str,
        calls: u64,
        total_ms: f64,
        min_ms: f64,
        max_ms: f64,
    ) -> GatewayMetrics {
        let mut metrics = GatewayMetrics::new();
        metrics.total_requests = calls;
        metrics.total_tool_calls = calls;
        metrics.total_duration_ms = total_ms;
        let s = metrics.server_mut(server);
        s.request_count = calls;
        s.tool_call_count = calls;
        s.total_duration_ms = total_ms;
        let t = s.tool_mut(tool);
        t.call_count = calls;
        t.total_duration_ms = total_ms;
        t.min_duration_ms = min_ms;
        t.max_duration_ms = max_ms;
        metrics.finalize();
        metrics
    }

    #[test]
    fn test_average_is_rederived_not_averaged() {
        let a = run_with("github", "get_repository", 3, 300.0, 50.0, 150.0);
        let b = run_with("github", "get_repository", 2, 400.0, 180.0, 220.0);

        let merged = merge_runs([Some(a), Some(b)]).unwrap();
        let tool = &merged.metrics.servers["github"].tools["get_repository"];

        assert_eq!(merged.run_count, 2);
        assert_eq!(tool.call_count, 5);
        assert_eq!(tool.total_duration_ms, 700.0);
        assert_eq!(tool.avg_duration_ms, 140.0);
        assert_eq!(tool.min_duration_ms, 50.0);
        assert_eq!(tool.max_duration_ms, 220.0);
    }

    #[test]
    fn test_merge_is_commutative() {
        let a = run_with("github", "get_repository", 3, 300.0, 50.0, 150.0);
        let mut b = run_with("github", "list_issues", 1, 40.0, 40.0, 40.0);
        b.merge(&run_with("playwright", "navigate", 2, 90.0, 30.0, 60.0));
        b.total_errors = 4;

        let ab = merge_runs([Some(a.clone()), Some(b.clone())]).unwrap();
        let ba = merge_runs([Some(b), Some(a)]).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_servers_missing_from_one_run_contribute_zero() {
        let a = run_with("github", "get_repository", 1, 10.0, 10.0, 10.0);
        let b = run_with("playwright", "navigate", 1, 20.0, 20.0, 20.0);

        let merged = merge_runs([Some(a), Some(b)]).unwrap().metrics;
        assert_eq!(merged.servers.len(), 2);
        assert_eq!(merged.total_tool_calls, 2);
        assert_eq!(merged.servers["github"].request_count, 1);
    }

    #[test]
    fn test_not_found_runs_are_not_counted() {
        let a = run_with("github", "get_repository", 1, 10.0, 10.0, 10.0);
        let merged = merge_runs([None, Some(a), None]).unwrap();
        assert_eq!(merged.run_count, 1);
    }

    #[test]
    fn test_no_contributing_runs_is_none() {
        assert!(merge_runs([None, None]).is_none());
        assert!(merge_runs(Vec::<Option<GatewayMetrics>>::new()).is_none());
    }

    #[test]
    fn test_single_empty_run_is_still_data() {
        let merged = merge_runs([Some(GatewayMetrics::new())]).unwrap();
        assert_eq!(merged.run_count, 1);
        assert_eq!(merged.metrics, GatewayMetrics::new());
    }
}

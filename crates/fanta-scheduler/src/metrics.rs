//! Metrics collection for scheduler sweeps

/// Metrics collected across reconciliation sweeps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerMetrics {
    /// Transfer windows switched on
    pub windows_opened: usize,

    /// Transfer windows switched off
    pub windows_closed: usize,

    /// Scoring periods that became active
    pub periods_activated: usize,

    /// Scoring periods that completed
    pub periods_completed: usize,

    /// Completed periods whose scores were fully settled
    pub periods_settled: usize,

    /// Roster scores written during settlement
    pub rosters_scored: usize,

    /// Rosters that failed to score (retried on a later sweep)
    pub roster_failures: usize,

    /// Athletes whose valuation changed
    pub athletes_repriced: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl SchedulerMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record window transitions
    pub fn record_windows(&mut self, opened: usize, closed: usize) {
        self.windows_opened += opened;
        self.windows_closed += closed;
    }

    /// Record period transitions
    pub fn record_periods(&mut self, activated: usize, completed: usize) {
        self.periods_activated += activated;
        self.periods_completed += completed;
    }

    /// Record one settlement batch
    pub fn record_settlement(&mut self, scored: usize, failed: usize, settled: bool) {
        self.rosters_scored += scored;
        self.roster_failures += failed;
        if settled {
            self.periods_settled += 1;
        }
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Total state transitions observed
    pub fn total_transitions(&self) -> usize {
        self.windows_opened + self.windows_closed + self.periods_activated + self.periods_completed
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Scheduler Metrics Summary".to_string(),
            "=========================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
            format!(
                "Windows: {} opened, {} closed",
                self.windows_opened, self.windows_closed
            ),
            format!(
                "Periods: {} activated, {} completed, {} settled",
                self.periods_activated, self.periods_completed, self.periods_settled
            ),
        ];

        if self.rosters_scored > 0 || self.roster_failures > 0 {
            lines.push(format!(
                "Rosters: {} scored, {} failed",
                self.rosters_scored, self.roster_failures
            ));
        }

        if self.athletes_repriced > 0 {
            lines.push(format!("Athletes repriced: {}", self.athletes_repriced));
        }

        lines.join("\n")
    }
}

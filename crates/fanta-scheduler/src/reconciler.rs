//! Core reconciliation sweep

use crate::{SchedulerConfig, SchedulerError, SchedulerMetrics};
use chrono::{DateTime, Utc};
use fanta_domain::traits::LeagueStore;
use fanta_domain::{period, transfer_window};
use fanta_manager::batch;
use std::time::Instant;

fn store_error<E: std::fmt::Display>(e: E) -> SchedulerError {
    SchedulerError::Store(e.to_string())
}

/// Brings stored league state in line with the clock
///
/// Responsible for:
/// - Opening and closing transfer windows
/// - Moving scoring periods through Upcoming → Active → Completed
/// - Settling completed periods by scoring every roster with a lineup
/// - Optionally repricing athletes
///
/// Every step is a pure function of stored state and `now`, so running a
/// sweep twice with the same `now` changes nothing the second time. Writes
/// only flip flags and only from their expected previous value; bounds edited
/// while a sweep runs are kept.
///
/// # Examples
///
/// ```no_run
/// use fanta_scheduler::{Reconciler, SchedulerConfig};
/// use fanta_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new(":memory:")?;
/// let mut reconciler = Reconciler::new(SchedulerConfig::default());
///
/// // Perform a single sweep
/// let metrics = reconciler.sweep(&mut store, chrono::Utc::now())?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Reconciler {
    config: SchedulerConfig,
    metrics: SchedulerMetrics,
}

impl Reconciler {
    /// Create a new Reconciler with the given configuration
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            metrics: SchedulerMetrics::new(),
        }
    }

    /// Create a Reconciler with default configuration
    pub fn default_config() -> Self {
        Self::new(SchedulerConfig::default())
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform a complete sweep at instant `now`
    ///
    /// 1. Reconciles transfer window flags
    /// 2. Reconciles scoring period phases
    /// 3. Settles completed periods that are not settled yet
    /// 4. Reprices athletes if enabled
    ///
    /// Returns the updated metrics after the sweep.
    pub fn sweep<S: LeagueStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<SchedulerMetrics, SchedulerError>
    where
        S::Error: std::fmt::Display,
    {
        let start = Instant::now();

        self.reconcile_windows(store, now)?;
        self.reconcile_periods(store, now)?;

        if self.config.settle_periods {
            self.settle_completed(store)?;
        }

        if self.config.reprice_athletes {
            self.reprice(store)?;
        }

        self.metrics.record_sweep();
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;

        Ok(self.metrics.clone())
    }

    fn reconcile_windows<S: LeagueStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<(), SchedulerError>
    where
        S::Error: std::fmt::Display,
    {
        let mut windows = store.list_windows().map_err(store_error)?;
        let transitions = transfer_window::reconcile(&mut windows, now);
        if transitions.is_empty() {
            return Ok(());
        }

        let mut opened = 0;
        let mut closed = 0;
        for window in &windows {
            let opening = transitions.opened.contains(&window.id);
            if !opening && !transitions.closed.contains(&window.id) {
                continue;
            }

            let verb = if opening { "Opening" } else { "Closing" };
            if self.config.dry_run {
                tracing::info!("[dry run] {} transfer window {}", verb, window.id);
            } else if store
                .set_window_active(window.id, window.active)
                .map_err(store_error)?
            {
                tracing::info!("{} transfer window {}", verb, window.id);
            } else {
                tracing::debug!("Transfer window {} changed under us, skipped", window.id);
                continue;
            }

            if opening {
                opened += 1;
            } else {
                closed += 1;
            }
        }

        self.metrics.record_windows(opened, closed);
        Ok(())
    }

    fn reconcile_periods<S: LeagueStore>(
        &mut self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<(), SchedulerError>
    where
        S::Error: std::fmt::Display,
    {
        let mut periods = store.list_periods().map_err(store_error)?;
        let transitions = period::reconcile(&mut periods, now);
        if transitions.is_empty() {
            return Ok(());
        }

        let mut activated = 0;
        let mut completed = 0;
        for period in &periods {
            let activating = transitions.activated.contains(&period.number);
            if !activating && !transitions.completed.contains(&period.number) {
                continue;
            }

            if self.config.dry_run {
                tracing::info!(
                    "[dry run] Period {} would become {}",
                    period.number,
                    period.phase().as_str()
                );
            } else if store
                .set_period_phase(period.number, period.active, period.completed)
                .map_err(store_error)?
            {
                tracing::info!("Period {} is now {}", period.number, period.phase().as_str());
            } else {
                tracing::debug!("Period {} changed under us, skipped", period.number);
                continue;
            }

            if activating {
                activated += 1;
            } else {
                completed += 1;
            }
        }

        self.metrics.record_periods(activated, completed);
        Ok(())
    }

    /// Score every completed period not yet settled
    ///
    /// A period is marked settled only when every roster scored; otherwise it
    /// is left for the next sweep.
    fn settle_completed<S: LeagueStore>(&mut self, store: &mut S) -> Result<(), SchedulerError>
    where
        S::Error: std::fmt::Display,
    {
        let pending: Vec<_> = store
            .list_periods()
            .map_err(store_error)?
            .into_iter()
            .filter(|p| p.completed && !p.scores_settled)
            .collect();

        for period in pending {
            if self.config.dry_run {
                tracing::info!("[dry run] Would settle scores for period {}", period.number);
                continue;
            }

            let report =
                batch::score_period_batch(store, period.number, self.config.max_write_attempts)?;
            let settled = report.is_complete()
                && store
                    .mark_period_settled(period.number)
                    .map_err(store_error)?;

            if settled {
                tracing::info!(
                    "Period {} settled ({} rosters scored)",
                    period.number,
                    report.scored.len()
                );
            } else if !report.is_complete() {
                tracing::warn!(
                    "Period {} left unsettled: {} roster(s) failed, retrying next sweep",
                    period.number,
                    report.failed.len()
                );
            }

            self.metrics
                .record_settlement(report.scored.len(), report.failed.len(), settled);
        }

        Ok(())
    }

    fn reprice<S: LeagueStore>(&mut self, store: &mut S) -> Result<(), SchedulerError>
    where
        S::Error: std::fmt::Display,
    {
        if self.config.dry_run {
            tracing::info!("[dry run] Would reprice athletes");
            return Ok(());
        }

        let report = batch::reprice_all(store)?;
        self.metrics.athletes_repriced += report.updated;
        Ok(())
    }
}

//! Background worker for continuous reconciliation

use crate::{Reconciler, SchedulerConfig, SchedulerError, SchedulerMetrics};
use fanta_domain::traits::{Clock, LeagueStore};
use tokio::time::{interval, Duration};

/// Background worker that runs reconciliation sweeps on a schedule
///
/// # Examples
///
/// ```no_run
/// use fanta_domain::SystemClock;
/// use fanta_scheduler::{SchedulerConfig, SchedulerWorker};
/// use fanta_store::SqliteStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SqliteStore::new("fanta.db")?;
///     let mut worker = SchedulerWorker::new(SchedulerConfig::default(), SystemClock);
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(store).await?;
///     Ok(())
/// }
/// ```
pub struct SchedulerWorker<C: Clock> {
    reconciler: Reconciler,
    clock: C,
    interval: Duration,
}

impl<C: Clock> SchedulerWorker<C> {
    /// Create a new background worker with the given configuration
    pub fn new(config: SchedulerConfig, clock: C) -> Self {
        let interval = config.reconcile_interval();
        Self {
            reconciler: Reconciler::new(config),
            clock,
            interval,
        }
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), SchedulerError>
    where
        S: LeagueStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("Scheduler worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.clock.now();
                    tracing::debug!("Starting sweep at {}", now);

                    match self.reconciler.sweep(&mut store, now) {
                        Ok(metrics) => {
                            tracing::debug!(
                                "Sweep completed: {} transitions, {} periods settled",
                                metrics.total_transitions(),
                                metrics.periods_settled
                            );
                        }
                        Err(e) => {
                            tracing::error!("Sweep failed: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping scheduler");
                    break;
                }
            }
        }

        tracing::info!(
            "Scheduler stopped. Final metrics:\n{}",
            self.reconciler.metrics().summary()
        );

        Ok(())
    }

    /// Run for a specific number of cycles (useful for testing)
    pub async fn run_cycles<S>(&mut self, mut store: S, cycles: usize) -> Result<S, SchedulerError>
    where
        S: LeagueStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        for cycle in 0..cycles {
            ticker.tick().await;
            let now = self.clock.now();

            if let Err(e) = self.reconciler.sweep(&mut store, now) {
                tracing::error!("Sweep {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Scheduler finished {} cycles. Final metrics:\n{}",
            cycles,
            self.reconciler.metrics().summary()
        );

        Ok(store)
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SchedulerMetrics {
        self.reconciler.metrics()
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.reconciler.reset_metrics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use fanta_domain::{FixedClock, TransferWindow};
    use fanta_store::SqliteStore;

    fn fast_config() -> SchedulerConfig {
        SchedulerConfig {
            reconcile_interval_secs: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_worker_creation() {
        let clock = FixedClock(Utc::now());
        let worker = SchedulerWorker::new(SchedulerConfig::default(), clock);
        assert_eq!(worker.metrics().sweep_count, 0);
    }

    #[tokio::test]
    async fn test_run_cycles() {
        let now = Utc.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap();
        let mut store = SqliteStore::new(":memory:").unwrap();
        let mut window =
            TransferWindow::new(now - ChronoDuration::days(2), now - ChronoDuration::days(1))
                .unwrap();
        window.active = true;
        store.upsert_window(&window).unwrap();

        let mut worker = SchedulerWorker::new(fast_config(), FixedClock(now));
        let store = worker.run_cycles(store, 2).await.unwrap();

        assert_eq!(worker.metrics().sweep_count, 2);
        assert_eq!(worker.metrics().windows_closed, 1);
        assert!(!store.list_windows().unwrap()[0].active);
    }

    #[tokio::test]
    async fn test_reset_metrics() {
        let store = SqliteStore::new(":memory:").unwrap();
        let mut worker = SchedulerWorker::new(fast_config(), FixedClock(Utc::now()));

        worker.run_cycles(store, 1).await.unwrap();
        assert_eq!(worker.metrics().sweep_count, 1);

        worker.reset_metrics();
        assert_eq!(worker.metrics().sweep_count, 0);
    }
}

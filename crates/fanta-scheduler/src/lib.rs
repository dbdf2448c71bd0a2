//! Fanta Scheduler
//!
//! Timer-driven reconciliation of league state.
//!
//! # Overview
//!
//! The scheduler is responsible for:
//! - **Transfer windows**: switching the market on and off as windows start and end
//! - **Scoring periods**: moving periods through Upcoming → Active → Completed
//! - **Settlement**: scoring every roster with a lineup once its period completes
//! - **Repricing**: optionally recomputing athlete valuations
//! - **Metrics collection**: counting transitions and failures for monitoring
//!
//! Decisions never read the wall clock directly: the [`Reconciler`] takes
//! `now` as a parameter and the [`SchedulerWorker`] reads an injected clock.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use fanta_scheduler::Reconciler;
//! use fanta_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("fanta.db")?;
//! let mut reconciler = Reconciler::default_config();
//!
//! let metrics = reconciler.sweep(&mut store, chrono::Utc::now())?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! The scheduler can be configured via TOML:
//!
//! ```toml
//! [scheduler]
//! reconcile_interval_secs = 60
//! settle_periods = true
//! reprice_athletes = false
//! max_write_attempts = 3
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod metrics;
mod reconciler;
mod worker;

pub use error::SchedulerError;
pub use config::SchedulerConfig;
pub use metrics::SchedulerMetrics;
pub use reconciler::Reconciler;
pub use worker::SchedulerWorker;

//! Configuration for scheduled reconciliation
//!
//! Defines how often league state is reconciled with the clock and which
//! follow-up batches run after each pass.

use crate::SchedulerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the scheduler
///
/// # Examples
///
/// ```
/// use fanta_scheduler::SchedulerConfig;
///
/// // Default configuration (once a minute)
/// let config = SchedulerConfig::default();
/// assert_eq!(config.reconcile_interval_secs, 60);
///
/// // Matchday: tighter loop while fixtures are being played
/// let config = SchedulerConfig::matchday();
/// assert_eq!(config.reconcile_interval_secs, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// How often to run the reconciliation sweep (in seconds)
    /// Default: 60
    pub reconcile_interval_secs: u64,

    /// Score every roster once a period completes
    /// Default: true
    #[serde(default = "default_true")]
    pub settle_periods: bool,

    /// Recompute athlete valuations on every sweep
    /// Default: false
    #[serde(default)]
    pub reprice_athletes: bool,

    /// Write attempts per roster when settling a period
    /// Default: 3
    #[serde(default = "default_write_attempts")]
    pub max_write_attempts: u32,

    /// Dry-run mode: log transitions without persisting them
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}

fn default_write_attempts() -> u32 {
    3
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reconcile_interval_secs: 60,
            settle_periods: true,
            reprice_athletes: false,
            max_write_attempts: 3,
            dry_run: false,
        }
    }
}

impl SchedulerConfig {
    /// Configuration for days with fixtures in progress
    ///
    /// Sweeps every 15 seconds so lineups lock and periods settle promptly,
    /// and retries contended roster writes harder.
    pub fn matchday() -> Self {
        Self {
            reconcile_interval_secs: 15,
            settle_periods: true,
            reprice_athletes: false,
            max_write_attempts: 5,
            dry_run: false,
        }
    }

    /// Get reconcile interval as Duration
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_secs(self.reconcile_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.reconcile_interval_secs == 0 {
            return Err(SchedulerError::Config(
                "reconcile_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_write_attempts == 0 {
            return Err(SchedulerError::Config(
                "max_write_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert_eq!(config.reconcile_interval_secs, 60);
        assert!(config.settle_periods);
        assert!(!config.reprice_athletes);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_matchday_config() {
        let config = SchedulerConfig::matchday();
        assert!(config.reconcile_interval_secs < SchedulerConfig::default().reconcile_interval_secs);
        assert_eq!(config.reconcile_interval(), Duration::from_secs(15));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = SchedulerConfig {
            reconcile_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SchedulerError::Config(_))));
    }

    #[test]
    fn test_serde_fills_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"reconcile_interval_secs": 30}"#).unwrap();
        assert_eq!(config.reconcile_interval_secs, 30);
        assert!(config.settle_periods);
        assert_eq!(config.max_write_attempts, 3);
    }
}

//! Result types returned by manager operations

use chrono::{DateTime, Utc};
use fanta_domain::OwnerId;
use serde::Serialize;

/// Whether the transfer market is open, and when it next opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketStatus {
    /// Transfers are permitted right now
    pub is_open: bool,
    /// Start of the next active window, if any
    pub next_opening: Option<DateTime<Utc>>,
}

/// Outcome of scoring every roster for one period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchScoreReport {
    /// Period that was scored
    pub period: u32,
    /// Rosters scored, with the score they received
    pub scored: Vec<(OwnerId, f64)>,
    /// Rosters without a lineup for the period
    pub skipped_no_lineup: usize,
    /// Rosters that could not be scored, with the reason
    pub failed: Vec<(OwnerId, String)>,
}

impl BatchScoreReport {
    /// Create an empty report for a period
    pub fn new(period: u32) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    /// True when no roster failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of recomputing every athlete's valuation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepriceReport {
    /// Athletes whose valuation changed
    pub updated: usize,
    /// Athletes whose valuation stayed the same
    pub unchanged: usize,
}

//! Scoring periods and the lineup-submission gate
//!
//! Each period moves Upcoming → Active → Completed as time passes, never
//! backwards. Lineups for a period may be submitted only before it starts and
//! only while no other period is in progress.

use crate::{EngineError, GateReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A numbered interval over which athlete performances are aggregated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPeriod {
    /// Period number (1-based)
    pub number: u32,
    /// First instant of the period
    pub start: DateTime<Utc>,
    /// Last instant of the period
    pub end: DateTime<Utc>,
    /// Period is in progress
    #[serde(default)]
    pub active: bool,
    /// Period has ended
    #[serde(default)]
    pub completed: bool,
    /// Every roster with a lineup for this period has been scored
    #[serde(default)]
    pub scores_settled: bool,
}

/// Lifecycle phase of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodPhase {
    /// Not started yet
    Upcoming,
    /// In progress
    Active,
    /// Finished
    Completed,
}

impl PeriodPhase {
    /// Get the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodPhase::Upcoming => "upcoming",
            PeriodPhase::Active => "active",
            PeriodPhase::Completed => "completed",
        }
    }
}

impl ScoringPeriod {
    /// Create an upcoming period
    pub fn new(number: u32, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EngineError> {
        if number == 0 {
            return Err(EngineError::Validation(
                "period number must be at least 1".to_string(),
            ));
        }
        if start >= end {
            return Err(EngineError::Validation(format!(
                "period {} start {} must be before end {}",
                number, start, end
            )));
        }
        Ok(Self {
            number,
            start,
            end,
            active: false,
            completed: false,
            scores_settled: false,
        })
    }

    /// Current phase derived from the stored flags
    pub fn phase(&self) -> PeriodPhase {
        if self.completed {
            PeriodPhase::Completed
        } else if self.active {
            PeriodPhase::Active
        } else {
            PeriodPhase::Upcoming
        }
    }

    /// Whether `now` lies within `[start, end]`
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }
}

/// Result of the lineup-submission gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineupSubmission {
    /// Lineups are accepted for `period` until `deadline`
    Open {
        /// Period accepting lineups
        period: u32,
        /// Start of that period
        deadline: DateTime<Utc>,
    },
    /// Lineups are not accepted
    Closed(GateReason),
}

impl LineupSubmission {
    /// Whether submissions are accepted at all
    pub fn is_open(&self) -> bool {
        matches!(self, LineupSubmission::Open { .. })
    }

    /// Require the gate to be open for exactly `period`
    pub fn require_period(&self, period: u32) -> Result<DateTime<Utc>, GateReason> {
        match self {
            LineupSubmission::Open {
                period: open,
                deadline,
            } if *open == period => Ok(*deadline),
            LineupSubmission::Open { period: open, .. } => Err(GateReason::WrongPeriod {
                requested: period,
                open: *open,
            }),
            LineupSubmission::Closed(reason) => Err(reason.clone()),
        }
    }
}

/// Find the period in progress and the next one to start
///
/// The current period contains `now`. The next period is the one with the
/// smallest start after `now`; when nothing is in progress a period starting
/// exactly at `now` also counts as next.
pub fn current_and_next(
    periods: &[ScoringPeriod],
    now: DateTime<Utc>,
) -> (Option<&ScoringPeriod>, Option<&ScoringPeriod>) {
    let current = periods.iter().find(|p| p.contains(now));

    let next = periods
        .iter()
        .filter(|p| {
            if current.is_some() {
                p.start > now
            } else {
                p.start >= now
            }
        })
        .min_by_key(|p| p.start);

    (current, next)
}

/// Decide whether lineups may be submitted at `now`
pub fn can_submit_lineup(periods: &[ScoringPeriod], now: DateTime<Utc>) -> LineupSubmission {
    match current_and_next(periods, now) {
        (Some(_), _) => LineupSubmission::Closed(GateReason::PeriodActive),
        (None, Some(next)) if now < next.start => LineupSubmission::Open {
            period: next.number,
            deadline: next.start,
        },
        // A period starting exactly at `now` is already in progress
        (None, Some(_)) => LineupSubmission::Closed(GateReason::PeriodActive),
        (None, None) => LineupSubmission::Closed(GateReason::NoUpcomingPeriod),
    }
}

/// Periods whose phase changed during a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodTransitions {
    /// Periods that became active
    pub activated: Vec<u32>,
    /// Periods that completed
    pub completed: Vec<u32>,
}

impl PeriodTransitions {
    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.completed.is_empty()
    }
}

/// Advance every period's phase to match `now`
///
/// Upcoming periods containing `now` become active; active or upcoming
/// periods whose end has passed complete. Completed periods are never
/// touched again.
pub fn reconcile(periods: &mut [ScoringPeriod], now: DateTime<Utc>) -> PeriodTransitions {
    let mut transitions = PeriodTransitions::default();

    for period in periods.iter_mut() {
        match period.phase() {
            PeriodPhase::Completed => {}
            _ if now > period.end => {
                period.active = false;
                period.completed = true;
                transitions.completed.push(period.number);
            }
            PeriodPhase::Upcoming if period.contains(now) => {
                period.active = true;
                transitions.activated.push(period.number);
            }
            _ => {}
        }
    }

    transitions
}

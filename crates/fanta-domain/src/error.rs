//! Engine error taxonomy
//!
//! Every failure carries a stable reason code so callers can map it onto
//! their own response format without parsing messages.

use crate::{AthleteId, OwnerId, Position};
use thiserror::Error;

/// Errors returned by engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A roster composition rule would be broken
    #[error("Constraint violation: {0}")]
    Constraint(ConstraintViolation),

    /// The market or lineup window is not open
    #[error("Gate closed: {0}")]
    GateClosed(GateReason),

    /// Roster, athlete, lineup or period absent
    #[error("Not found: {0}")]
    NotFound(NotFoundKind),

    /// Retryable upstream or contention failure
    #[error("Transient failure: {0}")]
    Transient(String),
}

impl EngineError {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::Constraint(violation) => violation.code(),
            EngineError::GateClosed(reason) => reason.code(),
            EngineError::NotFound(_) => "not-found",
            EngineError::Transient(_) => "transient",
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Transient(_))
    }
}

impl From<ConstraintViolation> for EngineError {
    fn from(v: ConstraintViolation) -> Self {
        EngineError::Constraint(v)
    }
}

impl From<GateReason> for EngineError {
    fn from(r: GateReason) -> Self {
        EngineError::GateClosed(r)
    }
}

impl From<NotFoundKind> for EngineError {
    fn from(k: NotFoundKind) -> Self {
        EngineError::NotFound(k)
    }
}

/// Roster composition rule breaches
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Budget does not cover the athlete's valuation
    #[error("insufficient budget: need {needed}, have {available}")]
    InsufficientBudget {
        /// Valuation of the athlete
        needed: u64,
        /// Remaining budget
        available: u64,
    },

    /// The roster already holds the maximum for this position
    #[error("position limit reached for {position} (max {limit})")]
    PositionLimitReached {
        /// Position at its cap
        position: Position,
        /// The cap
        limit: u8,
    },

    /// The athlete is already owned
    #[error("athlete {0} already in roster")]
    DuplicateAthlete(AthleteId),

    /// The roster holds the maximum number of athletes
    #[error("roster full (max {limit})")]
    RosterFull {
        /// Maximum roster size
        limit: usize,
    },
}

impl ConstraintViolation {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintViolation::InsufficientBudget { .. } => "insufficient-budget",
            ConstraintViolation::PositionLimitReached { .. } => "position-limit",
            ConstraintViolation::DuplicateAthlete(_) => "duplicate-athlete",
            ConstraintViolation::RosterFull { .. } => "roster-full",
        }
    }
}

/// Why a time gate refused the request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateReason {
    /// No transfer window is active and covering the current instant
    #[error("the transfer market is closed")]
    MarketClosed,

    /// A scoring period is live; lineups are frozen
    #[error("a scoring period is in progress")]
    PeriodActive,

    /// No future scoring period exists
    #[error("no upcoming scoring period")]
    NoUpcomingPeriod,

    /// Lineups are open, but for a different period
    #[error("lineups are open for period {open}, not {requested}")]
    WrongPeriod {
        /// Period the caller asked for
        requested: u32,
        /// Period currently accepting lineups
        open: u32,
    },
}

impl GateReason {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            GateReason::MarketClosed => "market-closed",
            GateReason::PeriodActive => "period-active",
            GateReason::NoUpcomingPeriod => "no-upcoming-period",
            GateReason::WrongPeriod { .. } => "wrong-period",
        }
    }
}

/// Which entity was missing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    /// No roster for this owner
    #[error("roster for owner {0}")]
    Roster(OwnerId),

    /// Unknown athlete
    #[error("athlete {0}")]
    Athlete(AthleteId),

    /// Athlete exists but is not in the roster
    #[error("athlete {0} in roster")]
    OwnedAthlete(AthleteId),

    /// No lineup stored for the period
    #[error("lineup for period {0}")]
    Lineup(u32),

    /// Unknown scoring period
    #[error("scoring period {0}")]
    Period(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        let err: EngineError = ConstraintViolation::RosterFull { limit: 24 }.into();
        assert_eq!(err.code(), "roster-full");

        let err: EngineError = GateReason::PeriodActive.into();
        assert_eq!(err.code(), "period-active");

        let err: EngineError = NotFoundKind::Lineup(3).into();
        assert_eq!(err.code(), "not-found");
    }

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(EngineError::Transient("busy".into()).is_retryable());
        assert!(!EngineError::GateClosed(GateReason::MarketClosed).is_retryable());
    }

    #[test]
    fn test_messages() {
        let err = EngineError::Constraint(ConstraintViolation::InsufficientBudget {
            needed: 10,
            available: 5,
        });
        assert_eq!(
            err.to_string(),
            "Constraint violation: insufficient budget: need 10, have 5"
        );
    }
}

//! Lineup and administrative input validation

use crate::{GatekeeperError, ValidationConfig};
use chrono::{DateTime, Utc};
use fanta_domain::traits::LeagueStore;
use fanta_domain::{
    AthleteId, EngineError, Formation, Lineup, PerformanceRecord, Position, Roster,
    ScoringPeriod, TransferWindow, STARTERS,
};
use std::collections::HashSet;
use thiserror::Error;

/// Result of a validation pass
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the input passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Input accepted
    Accepted,

    /// Input rejected
    Rejected,
}

impl ValidationResult {
    fn from_reasons(reasons: Vec<RejectionReason>) -> Self {
        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };
        Self { status, reasons }
    }

    /// Whether the input was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// Convert into an engine result, joining every reason into one message
    pub fn into_result(self) -> Result<(), EngineError> {
        if self.is_accepted() {
            return Ok(());
        }
        let message = self
            .reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(EngineError::Validation(message))
    }
}

/// Reasons for rejection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Starters at a position do not match the formation
    #[error("{formation} needs {required} {position} starter(s), got {actual}")]
    StarterCount {
        /// Declared formation
        formation: Formation,
        /// Position being counted
        position: Position,
        /// Slots the formation defines
        required: usize,
        /// Starters supplied
        actual: usize,
    },

    /// Total starters differ from eleven
    #[error("lineup needs {required} starters, got {actual}")]
    TotalStarters {
        /// Always eleven
        required: usize,
        /// Starters supplied
        actual: usize,
    },

    /// Selected athlete is not in the roster
    #[error("athlete {0} is not in the roster")]
    NotOwned(AthleteId),

    /// Starter placed in a slot for another position
    #[error("athlete {athlete_id} plays {actual} but was placed at {slot}")]
    WrongPosition {
        /// The athlete
        athlete_id: AthleteId,
        /// Slot they were placed in
        slot: Position,
        /// Their registered position
        actual: Position,
    },

    /// Athlete selected more than once
    #[error("athlete {0} is selected more than once")]
    DuplicateSelection(AthleteId),

    /// Bench holds too many athletes
    #[error("bench holds {actual} athletes, max {max}")]
    BenchTooLarge {
        /// Configured maximum
        max: usize,
        /// Bench size supplied
        actual: usize,
    },

    /// Interval whose start is not before its end
    #[error("interval start {start} must be before end {end}")]
    InvalidInterval {
        /// Interval start
        start: DateTime<Utc>,
        /// Interval end
        end: DateTime<Utc>,
    },

    /// Period numbered 0
    #[error("period number must be at least 1")]
    InvalidPeriodNumber,

    /// Statistic outside its plausible range
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Statistic name
        field: &'static str,
        /// Value supplied
        value: f64,
        /// Lowest accepted value
        min: f64,
        /// Highest accepted value
        max: f64,
    },

    /// Performance references an athlete the store does not know
    #[error("unknown athlete {0}")]
    UnknownAthlete(AthleteId),
}

impl RejectionReason {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::StarterCount { .. } => "starter-count",
            RejectionReason::TotalStarters { .. } => "total-starters",
            RejectionReason::NotOwned(_) => "not-owned",
            RejectionReason::WrongPosition { .. } => "wrong-position",
            RejectionReason::DuplicateSelection(_) => "duplicate-selection",
            RejectionReason::BenchTooLarge { .. } => "bench-too-large",
            RejectionReason::InvalidInterval { .. } => "invalid-interval",
            RejectionReason::InvalidPeriodNumber => "invalid-period-number",
            RejectionReason::OutOfRange { .. } => "out-of-range",
            RejectionReason::UnknownAthlete(_) => "unknown-athlete",
        }
    }
}

/// The Gatekeeper validates lineups and administrative input before storage
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a lineup against its formation and the owning roster
    ///
    /// Every enabled rule is checked and every failure reported, so the
    /// caller sees all problems at once.
    pub fn validate_lineup(
        &self,
        formation: Formation,
        lineup: &Lineup,
        roster: &Roster,
    ) -> ValidationResult {
        let mut reasons = Vec::new();

        // 1. Formation shape
        if self.config.validate_formation_shape {
            reasons.extend(self.check_formation_shape(formation, lineup));
        }

        // 2. Ownership and slot positions
        if self.config.validate_ownership || self.config.validate_positions {
            reasons.extend(self.check_membership(lineup, roster));
        }

        // 3. Duplicate selections
        if self.config.validate_duplicates {
            reasons.extend(self.check_duplicates(lineup));
        }

        // 4. Bench size
        if lineup.bench.len() > self.config.max_bench {
            reasons.push(RejectionReason::BenchTooLarge {
                max: self.config.max_bench,
                actual: lineup.bench.len(),
            });
        }

        ValidationResult::from_reasons(reasons)
    }

    fn check_formation_shape(&self, formation: Formation, lineup: &Lineup) -> Vec<RejectionReason> {
        let mut reasons: Vec<RejectionReason> = lineup
            .starters
            .iter()
            .filter_map(|(position, ids)| {
                let required = formation.slots(position);
                (ids.len() != required).then_some(RejectionReason::StarterCount {
                    formation,
                    position,
                    required,
                    actual: ids.len(),
                })
            })
            .collect();

        let total = lineup.starter_count();
        if total != STARTERS {
            reasons.push(RejectionReason::TotalStarters {
                required: STARTERS,
                actual: total,
            });
        }

        reasons
    }

    fn check_membership(&self, lineup: &Lineup, roster: &Roster) -> Vec<RejectionReason> {
        let mut reasons = Vec::new();

        for (slot, ids) in lineup.starters.iter() {
            for id in ids {
                match roster.owned_athlete(*id) {
                    None if self.config.validate_ownership => {
                        reasons.push(RejectionReason::NotOwned(*id));
                    }
                    Some(owned) if self.config.validate_positions && owned.position != slot => {
                        reasons.push(RejectionReason::WrongPosition {
                            athlete_id: *id,
                            slot,
                            actual: owned.position,
                        });
                    }
                    _ => {}
                }
            }
        }

        if self.config.validate_ownership {
            reasons.extend(
                lineup
                    .bench
                    .iter()
                    .filter(|id| !roster.owns(**id))
                    .map(|id| RejectionReason::NotOwned(*id)),
            );
        }

        reasons
    }

    fn check_duplicates(&self, lineup: &Lineup) -> Vec<RejectionReason> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        lineup
            .starter_ids()
            .chain(lineup.bench.iter().copied())
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .map(RejectionReason::DuplicateSelection)
            .collect()
    }

    /// Validate an administratively created transfer window
    pub fn validate_window(&self, window: &TransferWindow) -> ValidationResult {
        let mut reasons = Vec::new();
        if self.config.validate_intervals && window.start >= window.end {
            reasons.push(RejectionReason::InvalidInterval {
                start: window.start,
                end: window.end,
            });
        }
        ValidationResult::from_reasons(reasons)
    }

    /// Validate an administratively created scoring period
    pub fn validate_period(&self, period: &ScoringPeriod) -> ValidationResult {
        let mut reasons = Vec::new();
        if period.number == 0 {
            reasons.push(RejectionReason::InvalidPeriodNumber);
        }
        if self.config.validate_intervals && period.start >= period.end {
            reasons.push(RejectionReason::InvalidInterval {
                start: period.start,
                end: period.end,
            });
        }
        ValidationResult::from_reasons(reasons)
    }

    /// Validate an ingested performance record
    ///
    /// # Arguments
    ///
    /// * `record` - The record to validate
    /// * `store` - Store used to confirm the athlete exists (optional)
    pub fn validate_performance<S: LeagueStore>(
        &self,
        record: &PerformanceRecord,
        store: Option<&S>,
    ) -> Result<ValidationResult, GatekeeperError>
    where
        S::Error: std::fmt::Display,
    {
        let mut reasons = Vec::new();

        if record.period == 0 {
            reasons.push(RejectionReason::InvalidPeriodNumber);
        }

        if self.config.validate_performance_ranges {
            let rating = record.stats.rating;
            if !rating.is_finite() || rating < 0.0 || rating > self.config.max_rating {
                reasons.push(RejectionReason::OutOfRange {
                    field: "rating",
                    value: rating,
                    min: 0.0,
                    max: self.config.max_rating,
                });
            }

            if record.stats.minutes > self.config.max_minutes {
                reasons.push(RejectionReason::OutOfRange {
                    field: "minutes",
                    value: f64::from(record.stats.minutes),
                    min: 0.0,
                    max: f64::from(self.config.max_minutes),
                });
            }

            if record.stats.shots_on_target > record.stats.shots_total {
                reasons.push(RejectionReason::OutOfRange {
                    field: "shots_on_target",
                    value: f64::from(record.stats.shots_on_target),
                    min: 0.0,
                    max: f64::from(record.stats.shots_total),
                });
            }
        }

        if self.config.validate_known_athlete {
            if let Some(store) = store {
                let known = store
                    .get_athlete(record.athlete_id)
                    .map_err(|e| GatekeeperError::Store(format!("Failed to load athlete: {}", e)))?;
                if known.is_none() {
                    reasons.push(RejectionReason::UnknownAthlete(record.athlete_id));
                }
            }
        }

        Ok(ValidationResult::from_reasons(reasons))
    }
}

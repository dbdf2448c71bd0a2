//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{
    Athlete, AthleteId, OwnerId, PerformanceRecord, Roster, ScoringPeriod, TransferWindow, WindowId,
};
use chrono::{DateTime, Utc};

/// Outcome of a versioned roster write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The write was applied; the roster now carries `version`
    Committed {
        /// Version assigned by the store
        version: u64,
    },
    /// Another writer got there first
    Conflict {
        /// Version currently stored
        current: u64,
    },
}

/// Trait for storing and retrieving league entities
///
/// Implemented by the infrastructure layer (fanta-store)
pub trait LeagueStore {
    /// Error type for store operations
    type Error;

    /// Get an athlete by ID
    fn get_athlete(&self, id: AthleteId) -> Result<Option<Athlete>, Self::Error>;

    /// List every athlete
    fn list_athletes(&self) -> Result<Vec<Athlete>, Self::Error>;

    /// Insert or replace an athlete
    fn upsert_athlete(&mut self, athlete: &Athlete) -> Result<(), Self::Error>;

    /// Load an owner's roster
    fn load_roster(&self, owner: &OwnerId) -> Result<Option<Roster>, Self::Error>;

    /// List owners that have a stored roster
    fn list_roster_owners(&self) -> Result<Vec<OwnerId>, Self::Error>;

    /// Store a roster if nobody else wrote it since it was loaded
    ///
    /// The write succeeds only when the stored version equals
    /// `roster.version` (0 meaning "not stored yet").
    fn save_roster(&mut self, roster: &Roster) -> Result<WriteOutcome, Self::Error>;

    /// List every transfer window
    fn list_windows(&self) -> Result<Vec<TransferWindow>, Self::Error>;

    /// Insert or replace a transfer window
    fn upsert_window(&mut self, window: &TransferWindow) -> Result<(), Self::Error>;

    /// Set a window's `active` flag if it still holds the opposite value
    ///
    /// Bounds are left alone. Returns `false` when the window is missing or
    /// someone else already flipped it.
    fn set_window_active(&mut self, id: WindowId, active: bool) -> Result<bool, Self::Error>;

    /// List every scoring period, ordered by number
    fn list_periods(&self) -> Result<Vec<ScoringPeriod>, Self::Error>;

    /// Insert or replace a scoring period
    fn upsert_period(&mut self, period: &ScoringPeriod) -> Result<(), Self::Error>;

    /// Change a stored period's bounds, keeping its flags
    ///
    /// Returns `false` when no period with that number is stored.
    fn set_period_bounds(
        &mut self,
        number: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, Self::Error>;

    /// Set a period's `active`/`completed` flags
    ///
    /// A completed period is never changed. Returns `false` when nothing was
    /// written.
    fn set_period_phase(
        &mut self,
        number: u32,
        active: bool,
        completed: bool,
    ) -> Result<bool, Self::Error>;

    /// Mark a completed period as settled
    ///
    /// Returns `false` when the period is missing, not completed or already
    /// settled.
    fn mark_period_settled(&mut self, number: u32) -> Result<bool, Self::Error>;

    /// Get the performance of an athlete in a period
    fn get_performance(
        &self,
        period: u32,
        athlete_id: AthleteId,
    ) -> Result<Option<PerformanceRecord>, Self::Error>;

    /// Insert or replace a performance, keyed by `(period, athlete_id)`
    fn upsert_performance(&mut self, record: &PerformanceRecord) -> Result<(), Self::Error>;
}

/// Source of the current instant
///
/// Injected wherever a decision depends on wall-clock time.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Clock reading the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

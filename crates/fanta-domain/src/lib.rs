//! Fanta Domain Layer
//!
//! This crate contains the core rules of the fantasy league: who may own
//! which athletes, when the market and lineups are open, how match
//! statistics become fantasy points and how athletes are priced. It defines
//! the value objects and trait interfaces every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Roster**: a participant's squad under a budget and positional limits
//! - **Transfer Window**: interval during which rosters may change
//! - **Scoring Period**: interval over which performances are aggregated
//! - **Lineup**: the eleven starters fielded for one period
//! - **Performance Record**: one athlete's statistics for one period
//!
//! ## Architecture
//!
//! Decision logic is pure: every time-dependent function takes `now` as a
//! parameter, and persistence sits behind [`LeagueStore`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod athlete;
pub mod error;
pub mod ids;
pub mod lineup;
pub mod period;
pub mod position;
pub mod pricing;
pub mod roster;
pub mod scoring;
pub mod traits;
pub mod transfer_window;

// Re-exports for convenience
pub use athlete::{Athlete, SeasonStats};
pub use error::{ConstraintViolation, EngineError, GateReason, NotFoundKind};
pub use ids::{AthleteId, OwnerId, WindowId};
pub use lineup::{Formation, Lineup, LineupEntry, STARTERS};
pub use period::{LineupSubmission, PeriodPhase, PeriodTransitions, ScoringPeriod};
pub use position::{Position, PositionCounts, PositionGroups};
pub use pricing::{appraise, compute_price, PriceBreakdown, MIN_PRICE};
pub use roster::{OwnedAthlete, Roster, INITIAL_BUDGET, ROSTER_SIZE};
pub use scoring::{
    compute_fantasy_score, compute_period_score, round_fantasy_points, MatchStats,
    PerformanceRecord,
};
pub use traits::{Clock, FixedClock, LeagueStore, SystemClock, WriteOutcome};
pub use transfer_window::{TransferWindow, WindowTransitions};

//! Fantasy point computation
//!
//! Raw match statistics are turned into a single per-fixture fantasy score,
//! and a lineup's period score is the sum of its starters' scores.
//!
//! # Scoring Formula
//!
//! ```text
//! raw = rating
//!     + 3·goals + 2·assists
//!     − yellow − 3·red
//!     + saves − conceded
//!     + penalties_scored + 3·penalties_saved − 3·penalties_missed
//! ```
//!
//! The raw value is then snapped to the half-point grid by
//! [`round_fantasy_points`].

use crate::{AthleteId, Lineup};
use serde::{Deserialize, Serialize};

/// Lowest score an athlete can receive for a fixture
pub const MIN_FANTASY_POINTS: f64 = 1.0;

/// Raw statistics of one athlete in one fixture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStats {
    /// Provider match rating (0-10)
    pub rating: f64,
    /// Minutes played
    pub minutes: u32,
    /// Goals scored
    pub goals: u32,
    /// Assists
    pub assists: u32,
    /// Yellow cards
    pub yellow_cards: u32,
    /// Red cards
    pub red_cards: u32,
    /// Saves
    pub saves: u32,
    /// Goals conceded
    pub goals_conceded: u32,
    /// Penalties scored
    pub penalties_scored: u32,
    /// Penalties saved
    pub penalties_saved: u32,
    /// Penalties missed
    pub penalties_missed: u32,
    /// Shots attempted
    pub shots_total: u32,
    /// Shots on target
    pub shots_on_target: u32,
    /// Passes completed
    pub passes: u32,
    /// Key passes
    pub key_passes: u32,
    /// Tackles
    pub tackles: u32,
    /// Interceptions
    pub interceptions: u32,
}

/// An athlete's performance in one scoring period
///
/// Unique per `(period, athlete_id)`; re-ingesting the same fixture replaces
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Scoring period the fixture belongs to
    pub period: u32,
    /// Athlete the record describes
    pub athlete_id: AthleteId,
    /// Raw statistics
    pub stats: MatchStats,
    /// Fantasy score computed from `stats`
    pub fantasy_score: f64,
}

impl PerformanceRecord {
    /// Build a record, computing its fantasy score
    pub fn new(period: u32, athlete_id: AthleteId, stats: MatchStats) -> Self {
        let fantasy_score = compute_fantasy_score(&stats);
        Self {
            period,
            athlete_id,
            stats,
            fantasy_score,
        }
    }
}

/// Unrounded fantasy points for a fixture
pub fn raw_fantasy_points(stats: &MatchStats) -> f64 {
    let n = |v: u32| f64::from(v);

    stats.rating + 3.0 * n(stats.goals) + 2.0 * n(stats.assists)
        - n(stats.yellow_cards)
        - 3.0 * n(stats.red_cards)
        + n(stats.saves)
        - n(stats.goals_conceded)
        + n(stats.penalties_scored)
        + 3.0 * n(stats.penalties_saved)
        - 3.0 * n(stats.penalties_missed)
}

/// Snap a raw score to the half-point grid
///
/// Below 1 the score is clamped to 1. Otherwise a fractional part under 0.5
/// rounds down, one in `[0.5, 0.9)` becomes `.5`, and one of 0.9 or more
/// rounds up.
///
/// # Examples
///
/// ```
/// use fanta_domain::round_fantasy_points;
///
/// assert_eq!(round_fantasy_points(11.5), 11.5);
/// assert_eq!(round_fantasy_points(6.0), 6.0);
/// assert_eq!(round_fantasy_points(6.95), 7.0);
/// assert_eq!(round_fantasy_points(-2.0), 1.0);
/// ```
pub fn round_fantasy_points(raw: f64) -> f64 {
    if raw < MIN_FANTASY_POINTS {
        return MIN_FANTASY_POINTS;
    }

    let floor = raw.floor();
    let fraction = raw - floor;

    if fraction < 0.5 {
        floor
    } else if fraction < 0.9 {
        floor + 0.5
    } else {
        raw.ceil()
    }
}

/// Fantasy score for a fixture
pub fn compute_fantasy_score(stats: &MatchStats) -> f64 {
    round_fantasy_points(raw_fantasy_points(stats))
}

/// Sum the starters' fantasy scores for a period
///
/// `score_of` returns the stored fantasy score of an athlete for the period
/// being scored; athletes without a record contribute 0. Bench athletes are
/// never counted.
pub fn compute_period_score<F>(lineup: &Lineup, mut score_of: F) -> f64
where
    F: FnMut(AthleteId) -> Option<f64>,
{
    lineup
        .starter_ids()
        .map(|id| score_of(id).unwrap_or(0.0))
        .sum()
}

//! The roster aggregate
//!
//! A roster is a participant's squad: the athletes they own, the budget left
//! to spend, one lineup per scoring period and the scores those lineups
//! earned. Every mutation checks all composition rules before touching any
//! field, so a rejected call leaves the roster exactly as it was.
//!
//! ## Invariants
//!
//! - at most [`ROSTER_SIZE`] athletes, no athlete twice
//! - per-position head-counts never exceed [`Position::roster_limit`]
//! - `budget + Σ acquisition_price == INITIAL_BUDGET` while valuations are frozen
//! - `total_score` is always the sum of the per-period scores

use crate::{
    Athlete, AthleteId, ConstraintViolation, LineupEntry, NotFoundKind, OwnerId, Position,
    PositionCounts,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of athletes a roster may own
pub const ROSTER_SIZE: usize = 24;

/// Budget every new roster starts with, in euros
pub const INITIAL_BUDGET: u64 = 300_000_000;

/// An athlete held by a roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedAthlete {
    /// The athlete
    pub athlete_id: AthleteId,
    /// Position counted against the roster limits
    pub position: Position,
    /// Price paid when the athlete was bought
    pub acquisition_price: u64,
}

/// A participant's squad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Owning participant
    pub owner: OwnerId,

    /// Owned athletes in purchase order
    pub owned: Vec<OwnedAthlete>,

    /// Remaining budget in euros
    pub budget: u64,

    /// Head-count per position
    pub player_counts: PositionCounts,

    /// Lineup submitted for each period
    #[serde(default)]
    pub lineups: BTreeMap<u32, LineupEntry>,

    /// Score earned in each settled period
    #[serde(default)]
    pub scores: BTreeMap<u32, f64>,

    /// Sum of `scores`
    #[serde(default)]
    pub total_score: f64,

    /// Persistence version; 0 until first stored
    #[serde(default)]
    pub version: u64,
}

impl Roster {
    /// Create an empty roster with the full starting budget
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            owned: Vec::new(),
            budget: INITIAL_BUDGET,
            player_counts: PositionCounts::default(),
            lineups: BTreeMap::new(),
            scores: BTreeMap::new(),
            total_score: 0.0,
            version: 0,
        }
    }

    /// Number of owned athletes
    pub fn size(&self) -> usize {
        self.owned.len()
    }

    /// Whether the athlete is owned
    pub fn owns(&self, athlete_id: AthleteId) -> bool {
        self.owned.iter().any(|o| o.athlete_id == athlete_id)
    }

    /// Look up an owned athlete
    pub fn owned_athlete(&self, athlete_id: AthleteId) -> Option<&OwnedAthlete> {
        self.owned.iter().find(|o| o.athlete_id == athlete_id)
    }

    /// Total paid for the athletes currently owned
    pub fn spent(&self) -> u64 {
        self.owned.iter().map(|o| o.acquisition_price).sum()
    }

    /// Check whether `athlete` could be bought, without buying
    ///
    /// Checks run in a fixed order so the first broken rule is the one
    /// reported: budget, position limit, duplicate, roster size.
    pub fn check_add(&self, athlete: &Athlete) -> Result<(), ConstraintViolation> {
        if self.budget < athlete.valuation {
            return Err(ConstraintViolation::InsufficientBudget {
                needed: athlete.valuation,
                available: self.budget,
            });
        }

        let limit = athlete.position.roster_limit();
        if *self.player_counts.get(athlete.position) >= limit {
            return Err(ConstraintViolation::PositionLimitReached {
                position: athlete.position,
                limit,
            });
        }

        if self.owns(athlete.id) {
            return Err(ConstraintViolation::DuplicateAthlete(athlete.id));
        }

        if self.size() >= ROSTER_SIZE {
            return Err(ConstraintViolation::RosterFull { limit: ROSTER_SIZE });
        }

        Ok(())
    }

    /// Buy an athlete at its current valuation
    pub fn try_add(&mut self, athlete: &Athlete) -> Result<(), ConstraintViolation> {
        self.check_add(athlete)?;

        self.owned.push(OwnedAthlete {
            athlete_id: athlete.id,
            position: athlete.position,
            acquisition_price: athlete.valuation,
        });
        self.budget -= athlete.valuation;
        *self.player_counts.get_mut(athlete.position) += 1;

        Ok(())
    }

    /// Sell an athlete, crediting `current_valuation`
    ///
    /// The credit is the athlete's valuation at the time of sale, not the
    /// price paid.
    pub fn try_remove(
        &mut self,
        athlete_id: AthleteId,
        current_valuation: u64,
    ) -> Result<OwnedAthlete, NotFoundKind> {
        let index = self
            .owned
            .iter()
            .position(|o| o.athlete_id == athlete_id)
            .ok_or(NotFoundKind::OwnedAthlete(athlete_id))?;

        let removed = self.owned.remove(index);
        self.budget = self.budget.saturating_add(current_valuation);
        let count = self.player_counts.get_mut(removed.position);
        *count = count.saturating_sub(1);

        Ok(removed)
    }

    /// Lineup stored for a period
    pub fn lineup(&self, period: u32) -> Option<&LineupEntry> {
        self.lineups.get(&period)
    }

    /// Store a lineup, replacing any earlier one for the same period
    pub fn upsert_lineup(&mut self, period: u32, entry: LineupEntry) -> Option<LineupEntry> {
        self.lineups.insert(period, entry)
    }

    /// Record a period score and re-derive the total
    pub fn record_period_score(&mut self, period: u32, score: f64) {
        self.scores.insert(period, score);
        self.total_score = self.scores.values().sum();
    }
}

//! Athletes available on the market

use crate::{AthleteId, Position};
use serde::{Deserialize, Serialize};

/// Cumulative statistics over one season
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonStats {
    /// Matches appeared in
    pub appearances: u32,
    /// Minutes played
    pub minutes: u32,
    /// Goals scored
    pub goals: u32,
    /// Assists
    pub assists: u32,
    /// Saves (goalkeepers)
    pub saves: u32,
    /// Goals conceded (goalkeepers)
    pub goals_conceded: u32,
    /// Yellow cards
    pub yellow_cards: u32,
    /// Red cards
    pub red_cards: u32,
    /// Penalties scored
    pub penalties_scored: u32,
}

/// A real-world athlete
///
/// Created and refreshed by the ingestion collaborator. The engine only ever
/// rewrites `valuation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    /// Provider identifier
    pub id: AthleteId,

    /// Display name
    pub name: String,

    /// Position the athlete is registered at
    pub position: Position,

    /// Position code as reported by the provider ("G", "D", "M", "A" or other)
    #[serde(default)]
    pub position_code: String,

    /// Age in years
    #[serde(default)]
    pub age: u32,

    /// Current price in euros
    #[serde(default)]
    pub valuation: u64,

    /// Totals for the running season
    #[serde(default)]
    pub season: SeasonStats,

    /// Totals for the previous season, when the athlete played in it
    #[serde(default)]
    pub prior_season: Option<SeasonStats>,
}

impl Athlete {
    /// Create an athlete with no statistics yet
    pub fn new(id: AthleteId, name: impl Into<String>, position: Position, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            position_code: position.code().to_string(),
            age,
            valuation: 0,
            season: SeasonStats::default(),
            prior_season: None,
        }
    }

    /// Set the valuation (builder style)
    pub fn with_valuation(mut self, valuation: u64) -> Self {
        self.valuation = valuation;
        self
    }

    /// Position implied by the provider code, if it names one
    ///
    /// Pricing reads the code rather than `position` because the provider
    /// occasionally reports codes the roster rules do not know about. Codes
    /// may list several roles (`"D,M"`); the most attacking one wins, in the
    /// order A, M, D, G. A blank code falls back to `position`.
    pub fn coded_position(&self) -> Option<Position> {
        let code = self.position_code.trim();
        if code.is_empty() {
            return Some(self.position);
        }

        [
            ('A', Position::Attacker),
            ('M', Position::Midfielder),
            ('D', Position::Defender),
            ('G', Position::Goalkeeper),
        ]
        .into_iter()
        .find(|(letter, _)| code.contains(*letter))
        .map(|(_, position)| position)
    }
}

//! Formations and per-period lineups

use crate::{AthleteId, Position, PositionGroups};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of starters in every formation
pub const STARTERS: usize = 11;

/// Tactical arrangement of the eleven starters
///
/// Every formation fields exactly one goalkeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formation {
    /// 3 defenders, 4 midfielders, 3 attackers
    #[serde(rename = "3-4-3")]
    F343,
    /// 4 defenders, 4 midfielders, 2 attackers
    #[serde(rename = "4-4-2")]
    F442,
    /// 4 defenders, 3 midfielders, 3 attackers
    #[serde(rename = "4-3-3")]
    F433,
    /// 5 defenders, 3 midfielders, 2 attackers
    #[serde(rename = "5-3-2")]
    F532,
    /// 3 defenders, 5 midfielders, 2 attackers
    #[serde(rename = "3-5-2")]
    F352,
}

impl Formation {
    /// All supported formations
    pub const ALL: [Formation; 5] = [
        Formation::F343,
        Formation::F442,
        Formation::F433,
        Formation::F532,
        Formation::F352,
    ];

    /// Get the formation as a string like "4-4-2"
    pub fn as_str(&self) -> &'static str {
        match self {
            Formation::F343 => "3-4-3",
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F532 => "5-3-2",
            Formation::F352 => "3-5-2",
        }
    }

    /// Required number of starters at a position
    pub fn slots(&self, position: Position) -> usize {
        let (def, mid, att) = match self {
            Formation::F343 => (3, 4, 3),
            Formation::F442 => (4, 4, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F532 => (5, 3, 2),
            Formation::F352 => (3, 5, 2),
        };
        match position {
            Position::Goalkeeper => 1,
            Position::Defender => def,
            Position::Midfielder => mid,
            Position::Attacker => att,
        }
    }
}

impl FromStr for Formation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Formation::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("Unknown formation: {}", s))
    }
}

impl std::fmt::Display for Formation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Starters grouped by position, plus an optional bench
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    /// Starting athletes per position
    pub starters: PositionGroups<Vec<AthleteId>>,
    /// Substitutes; never scored
    #[serde(default)]
    pub bench: Vec<AthleteId>,
}

impl Lineup {
    /// Iterate every starter, goalkeeper first
    pub fn starter_ids(&self) -> impl Iterator<Item = AthleteId> + '_ {
        self.starters
            .iter()
            .flat_map(|(_, ids)| ids.iter().copied())
    }

    /// Number of starters across all positions
    pub fn starter_count(&self) -> usize {
        self.starters.iter().map(|(_, ids)| ids.len()).sum()
    }
}

/// A stored lineup together with the formation it was submitted under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    /// Declared formation
    pub formation: Formation,
    /// Selected athletes
    pub lineup: Lineup,
}

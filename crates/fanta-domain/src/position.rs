//! Playing positions and per-position groupings

use serde::{Deserialize, Serialize};

/// Playing position of an athlete
///
/// Rosters are capped per position and lineups are grouped by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Goalkeeper
    Goalkeeper,

    /// Defender
    Defender,

    /// Midfielder
    Midfielder,

    /// Attacker
    Attacker,
}

impl Position {
    /// All positions in lineup order (back to front)
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Attacker,
    ];

    /// Get the position name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Attacker => "Attacker",
        }
    }

    /// Single-letter code used by the statistics provider
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "G",
            Position::Defender => "D",
            Position::Midfielder => "M",
            Position::Attacker => "A",
        }
    }

    /// Parse a position from its name or single-letter code
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "g" => Some(Position::Goalkeeper),
            "defender" | "d" => Some(Position::Defender),
            "midfielder" | "m" => Some(Position::Midfielder),
            "attacker" | "a" => Some(Position::Attacker),
            _ => None,
        }
    }

    /// Maximum number of athletes of this position a roster may own
    pub fn roster_limit(&self) -> u8 {
        match self {
            Position::Goalkeeper => 3,
            Position::Defender => 8,
            Position::Midfielder => 8,
            Position::Attacker => 5,
        }
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid position: {}", s))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per position
///
/// Used for roster head-counts (`PositionGroups<u8>`) and for lineup starters
/// (`PositionGroups<Vec<AthleteId>>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionGroups<T> {
    /// Goalkeeper entry
    pub goalkeeper: T,
    /// Defender entry
    pub defender: T,
    /// Midfielder entry
    pub midfielder: T,
    /// Attacker entry
    pub attacker: T,
}

impl<T> PositionGroups<T> {
    /// Borrow the entry for a position
    pub fn get(&self, position: Position) -> &T {
        match position {
            Position::Goalkeeper => &self.goalkeeper,
            Position::Defender => &self.defender,
            Position::Midfielder => &self.midfielder,
            Position::Attacker => &self.attacker,
        }
    }

    /// Mutably borrow the entry for a position
    pub fn get_mut(&mut self, position: Position) -> &mut T {
        match position {
            Position::Goalkeeper => &mut self.goalkeeper,
            Position::Defender => &mut self.defender,
            Position::Midfielder => &mut self.midfielder,
            Position::Attacker => &mut self.attacker,
        }
    }

    /// Iterate entries in lineup order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Per-position head-counts of a roster
pub type PositionCounts = PositionGroups<u8>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!(Position::parse("Attacker"), Some(Position::Attacker));
        assert_eq!(Position::parse("g"), Some(Position::Goalkeeper));
        assert_eq!(Position::parse("winger"), None);
        assert!("striker".parse::<Position>().is_err());
    }

    #[test]
    fn test_roster_limits() {
        let total: u8 = Position::ALL.iter().map(|p| p.roster_limit()).sum();
        assert_eq!(total, 24);
        assert_eq!(Position::Goalkeeper.roster_limit(), 3);
        assert_eq!(Position::Attacker.roster_limit(), 5);
    }

    #[test]
    fn test_groups_get_mut() {
        let mut counts = PositionCounts::default();
        *counts.get_mut(Position::Midfielder) += 2;
        assert_eq!(*counts.get(Position::Midfielder), 2);
        assert_eq!(counts.iter().map(|(_, c)| *c).sum::<u8>(), 2);
    }
}

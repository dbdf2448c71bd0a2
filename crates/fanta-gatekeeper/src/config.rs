//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Starters per position must match the declared formation
    pub validate_formation_shape: bool,

    /// Every selected athlete must be owned by the roster
    pub validate_ownership: bool,

    /// Starters must play the position of the slot they fill
    pub validate_positions: bool,

    /// No athlete may be selected twice (starters and bench together)
    pub validate_duplicates: bool,

    /// Maximum number of bench athletes
    pub max_bench: usize,

    /// Windows and periods must have start before end
    pub validate_intervals: bool,

    /// Performance statistics must fall inside plausible ranges
    pub validate_performance_ranges: bool,

    /// Highest accepted match rating
    pub max_rating: f64,

    /// Most minutes an athlete can play in one fixture
    pub max_minutes: u32,

    /// Performances must reference a known athlete (requires a store)
    pub validate_known_athlete: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_formation_shape: true,
            validate_ownership: true,
            validate_positions: true,
            validate_duplicates: true,
            max_bench: 13,
            validate_intervals: true,
            validate_performance_ranges: true,
            max_rating: 10.0,
            max_minutes: 130,
            validate_known_athlete: false,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (lineups stored as submitted)
    pub fn permissive() -> Self {
        Self {
            validate_formation_shape: false,
            validate_ownership: false,
            validate_positions: false,
            validate_duplicates: false,
            max_bench: usize::MAX,
            validate_intervals: true,
            validate_performance_ranges: false,
            max_rating: 10.0,
            max_minutes: 130,
            validate_known_athlete: false,
        }
    }

    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            validate_formation_shape: true,
            validate_ownership: true,
            validate_positions: true,
            validate_duplicates: true,
            max_bench: 7,
            validate_intervals: true,
            validate_performance_ranges: true,
            max_rating: 10.0,
            max_minutes: 125,
            validate_known_athlete: true,
        }
    }

    /// Check the configuration itself for nonsensical values
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if !(self.max_rating > 0.0 && self.max_rating.is_finite()) {
            return Err(GatekeeperError::Config(format!(
                "max_rating must be a positive number, got {}",
                self.max_rating
            )));
        }
        if self.max_minutes == 0 {
            return Err(GatekeeperError::Config(
                "max_minutes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

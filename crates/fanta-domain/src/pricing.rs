//! Athlete valuation
//!
//! # Price Formula
//!
//! ```text
//! price = max(round(BASE · age · role · performance / 100_000) · 100_000, 1_000_000)
//! ```
//!
//! - **age**: ≤23 → 1.5, ≤28 → 1.8, ≤32 → 1.3, older → 1.0
//! - **role**: from the provider position code, A 1.5, M 1.3, D 1.2, G 1.1,
//!   anything else 1.0
//! - **performance**: starts at 1, grows with goals, assists (or saves for
//!   goalkeepers) and minutes, and is halved for athletes with fewer than
//!   ten appearances
//!
//! When prior-season statistics exist they drive the performance factor and
//! outfield scorers get an efficiency multiplier. Otherwise the running
//! season is used without it.

use crate::{Athlete, Position, SeasonStats};
use serde::{Deserialize, Serialize};

/// Starting price before any factor is applied
pub const BASE_PRICE: f64 = 2_000_000.0;

/// Prices are rounded to this step
pub const PRICE_STEP: f64 = 100_000.0;

/// No athlete is ever cheaper than this
pub const MIN_PRICE: u64 = 1_000_000;

/// Minutes in roughly one full season
const SEASON_MINUTES: f64 = 3000.0;

/// Appearances below which the performance factor is halved
const LOW_APPEARANCES: u32 = 10;

/// The factors behind a computed price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Age multiplier
    pub age_factor: f64,
    /// Role multiplier
    pub role_factor: f64,
    /// Performance multiplier
    pub performance_factor: f64,
    /// Final rounded price
    pub price: u64,
}

/// Age multiplier
pub fn age_factor(age: u32) -> f64 {
    match age {
        0..=23 => 1.5,
        24..=28 => 1.8,
        29..=32 => 1.3,
        _ => 1.0,
    }
}

/// Role multiplier for the athlete's provider position code
pub fn role_factor(athlete: &Athlete) -> f64 {
    match athlete.coded_position() {
        Some(Position::Attacker) => 1.5,
        Some(Position::Midfielder) => 1.3,
        Some(Position::Defender) => 1.2,
        Some(Position::Goalkeeper) => 1.1,
        None => 1.0,
    }
}

/// Performance multiplier
///
/// `prior` selects the formula: previous-season totals when present, the
/// running season otherwise.
pub fn performance_factor(athlete: &Athlete, prior: Option<&SeasonStats>) -> f64 {
    let mut factor = 1.0;

    let stats = match prior {
        Some(prior) => {
            if athlete.coded_position() == Some(Position::Goalkeeper) {
                factor += 0.2 * f64::from(prior.saves) - 0.05 * f64::from(prior.goals_conceded);
            } else {
                factor += scoring_contribution(prior);
                if prior.appearances > 0 {
                    let goals_per_game = f64::from(prior.goals) / f64::from(prior.appearances);
                    if goals_per_game > 0.5 {
                        factor *= 1.5;
                    } else if goals_per_game > 0.3 {
                        factor *= 1.3;
                    }
                }
            }
            prior
        }
        None => {
            factor += scoring_contribution(&athlete.season);
            &athlete.season
        }
    };

    factor *= 1.0 + f64::from(stats.minutes) / SEASON_MINUTES;

    if stats.appearances < LOW_APPEARANCES {
        factor *= 0.5;
    }

    factor
}

fn scoring_contribution(stats: &SeasonStats) -> f64 {
    0.5 * f64::from(stats.goals) + 0.3 * f64::from(stats.assists)
}

/// Compute a price and the factors that produced it
pub fn appraise(athlete: &Athlete, prior: Option<&SeasonStats>) -> PriceBreakdown {
    let age_factor = age_factor(athlete.age);
    let role_factor = role_factor(athlete);
    let performance_factor = performance_factor(athlete, prior);

    let raw = BASE_PRICE * age_factor * role_factor * performance_factor;
    let rounded = (raw / PRICE_STEP).round() * PRICE_STEP;
    // Negative factors (heavily-conceding keepers) collapse to the floor
    let price = if rounded.is_finite() && rounded > 0.0 {
        (rounded as u64).max(MIN_PRICE)
    } else {
        MIN_PRICE
    };

    PriceBreakdown {
        age_factor,
        role_factor,
        performance_factor,
        price,
    }
}

/// Compute an athlete's price
///
/// # Examples
///
/// ```
/// use fanta_domain::{compute_price, Athlete, AthleteId, Position};
///
/// let mut striker = Athlete::new(AthleteId::new(9), "Striker", Position::Attacker, 25);
/// striker.season.appearances = 5;
/// striker.season.goals = 2;
/// striker.season.assists = 1;
/// striker.season.minutes = 450;
///
/// assert_eq!(compute_price(&striker, None), 7_100_000);
/// ```
pub fn compute_price(athlete: &Athlete, prior: Option<&SeasonStats>) -> u64 {
    appraise(athlete, prior).price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AthleteId;

    fn athlete(position: Position, age: u32) -> Athlete {
        Athlete::new(AthleteId::new(1), "Test", position, age)
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_factor(23), 1.5);
        assert_eq!(age_factor(24), 1.8);
        assert_eq!(age_factor(28), 1.8);
        assert_eq!(age_factor(32), 1.3);
        assert_eq!(age_factor(33), 1.0);
    }

    #[test]
    fn test_role_uses_position_code() {
        let mut a = athlete(Position::Defender, 25);
        assert_eq!(role_factor(&a), 1.2);
        a.position_code = "W".to_string();
        assert_eq!(role_factor(&a), 1.0);
        a.position_code = "D,M".to_string();
        assert_eq!(role_factor(&a), 1.3);
    }

    #[test]
    fn test_current_season_example() {
        let mut a = athlete(Position::Attacker, 25);
        a.season = SeasonStats {
            appearances: 5,
            goals: 2,
            assists: 1,
            minutes: 450,
            ..Default::default()
        };

        let breakdown = appraise(&a, None);

        assert_eq!(breakdown.age_factor, 1.8);
        assert_eq!(breakdown.role_factor, 1.5);
        assert!((breakdown.performance_factor - 1.3225).abs() < 1e-9);
        assert_eq!(breakdown.price, 7_100_000);
    }

    #[test]
    fn test_prior_season_efficiency_bonus() {
        let a = athlete(Position::Attacker, 30);
        let prior = SeasonStats {
            appearances: 30,
            goals: 20,
            assists: 5,
            minutes: 2700,
            ..Default::default()
        };
        // (1 + 10 + 1.5) * 1.5 * 1.9 = 35.625
        let breakdown = appraise(&a, Some(&prior));
        assert!((breakdown.performance_factor - 35.625).abs() < 1e-9);
        // 2e6 * 1.3 * 1.5 * 35.625 = 138_937_500
        assert_eq!(breakdown.price, 138_900_000);
    }

    #[test]
    fn test_prior_season_goalkeeper() {
        let a = athlete(Position::Goalkeeper, 27);
        let prior = SeasonStats {
            appearances: 38,
            minutes: 3420,
            saves: 100,
            goals_conceded: 40,
            ..Default::default()
        };
        // (1 + 20 - 2) * 2.14 = 40.66
        let breakdown = appraise(&a, Some(&prior));
        assert!((breakdown.performance_factor - 40.66).abs() < 1e-9);
    }

    #[test]
    fn test_price_floor() {
        let mut veteran = athlete(Position::Midfielder, 36);
        veteran.position_code = "X".to_string();
        // 2e6 * 1.0 * 1.0 * 0.5
        assert_eq!(compute_price(&veteran, None), MIN_PRICE);

        let a = athlete(Position::Goalkeeper, 36);
        assert_eq!(compute_price(&a, None), 1_100_000);

        let leaky = SeasonStats {
            appearances: 20,
            goals_conceded: 80,
            ..Default::default()
        };
        assert_eq!(compute_price(&a, Some(&leaky)), MIN_PRICE);
    }
}

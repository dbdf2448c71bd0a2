//! Import command implementation.

use crate::cli::ImportArgs;
use crate::commands::Manager;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::{DateTime, Utc};
use fanta_domain::traits::LeagueStore;
use fanta_domain::{appraise, Athlete, AthleteId, MatchStats};
use serde::{Deserialize, Serialize};
use std::fs;

/// Seed file accepted by `fanta import`.
///
/// Every section is optional. Athletes without a valuation are priced on
/// import; performances get their fantasy score computed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedFile {
    /// Athletes to create or refresh
    pub athletes: Vec<Athlete>,
    /// Transfer windows to create
    pub windows: Vec<WindowDef>,
    /// Scoring periods to create or redefine
    pub periods: Vec<PeriodDef>,
    /// Raw per-period statistics
    pub performances: Vec<PerformanceDef>,
}

/// Transfer window in a seed file.
#[derive(Debug, Deserialize)]
pub struct WindowDef {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Scoring period in a seed file.
#[derive(Debug, Deserialize)]
pub struct PeriodDef {
    number: u32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Performance in a seed file.
#[derive(Debug, Deserialize)]
pub struct PerformanceDef {
    period: u32,
    athlete_id: AthleteId,
    #[serde(default)]
    stats: MatchStats,
}

/// Counts of what an import wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Athletes written
    pub athletes: usize,
    /// Athletes priced during import
    pub priced: usize,
    /// Windows created
    pub windows: usize,
    /// Windows already present
    pub windows_skipped: usize,
    /// Periods created or moved
    pub periods: usize,
    /// Periods already present with the same bounds
    pub periods_skipped: usize,
    /// Performances written
    pub performances: usize,
}

/// Execute the import command.
pub fn execute_import(args: ImportArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let contents = fs::read_to_string(&args.file)?;
    let seed: SeedFile = serde_json::from_str(&contents)?;

    let summary = import_seed(seed, manager)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} athlete(s) ({} priced), {} window(s) ({} already present), {} period(s) ({} already present), {} performance(s)",
            summary.athletes,
            summary.priced,
            summary.windows,
            summary.windows_skipped,
            summary.periods,
            summary.periods_skipped,
            summary.performances
        ))
    );

    Ok(())
}

/// Write a seed file through the manager.
///
/// Athletes go first so performances can be checked against them. Windows
/// and periods whose bounds match stored ones are skipped, so importing the
/// same file twice changes nothing.
pub fn import_seed(seed: SeedFile, manager: &mut Manager) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for mut athlete in seed.athletes {
        if athlete.valuation == 0 {
            athlete.valuation = appraise(&athlete, athlete.prior_season.as_ref()).price;
            summary.priced += 1;
        }
        manager.store_mut().upsert_athlete(&athlete)?;
        summary.athletes += 1;
    }

    let existing = manager.store().list_windows()?;
    for def in seed.windows {
        if existing.iter().any(|w| w.start == def.start && w.end == def.end) {
            summary.windows_skipped += 1;
            continue;
        }
        manager.create_window(def.start, def.end)?;
        summary.windows += 1;
    }

    let existing = manager.store().list_periods()?;
    for def in seed.periods {
        let unchanged = existing
            .iter()
            .any(|p| p.number == def.number && p.start == def.start && p.end == def.end);
        if unchanged {
            summary.periods_skipped += 1;
            continue;
        }
        manager.create_period(def.number, def.start, def.end)?;
        summary.periods += 1;
    }

    for def in seed.performances {
        manager
            .record_performance(def.period, def.athlete_id, def.stats)
            .map_err(|e| {
                CliError::InvalidInput(format!(
                    "performance of athlete {} in period {}: {}",
                    def.athlete_id, def.period, e
                ))
            })?;
        summary.performances += 1;
    }

    tracing::info!("Seed import finished: {:?}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    const SEED: &str = r#"
    {
        "athletes": [
            { "id": 1, "name": "Keeper", "position": "Goalkeeper", "position_code": "G", "age": 29 },
            { "id": 9, "name": "Striker", "position": "Attacker", "position_code": "A", "age": 26,
              "valuation": 20000000 }
        ],
        "windows": [
            { "start": "2024-08-01T00:00:00Z", "end": "2024-08-31T00:00:00Z" }
        ],
        "periods": [
            { "number": 1, "start": "2024-08-24T15:00:00Z", "end": "2024-08-26T22:00:00Z" }
        ],
        "performances": [
            { "period": 1, "athlete_id": 9, "stats": { "rating": 7.5, "minutes": 90, "goals": 2 } }
        ]
    }
    "#;

    #[test]
    fn test_import_seed() {
        let mut manager = test_support::manager();
        let seed: SeedFile = serde_json::from_str(SEED).unwrap();

        let summary = import_seed(seed, &mut manager).unwrap();

        assert_eq!(summary.athletes, 2);
        assert_eq!(summary.priced, 1);
        assert_eq!(summary.windows, 1);
        assert_eq!(summary.periods, 1);
        assert_eq!(summary.performances, 1);

        let keeper = manager.store().get_athlete(AthleteId::new(1)).unwrap().unwrap();
        assert!(keeper.valuation > 0);
        let striker = manager.store().get_athlete(AthleteId::new(9)).unwrap().unwrap();
        assert_eq!(striker.valuation, 20_000_000);

        let record = manager
            .store()
            .get_performance(1, AthleteId::new(9))
            .unwrap()
            .unwrap();
        assert!(record.fantasy_score > 0.0);
        assert!(manager.is_market_open().unwrap());
    }

    #[test]
    fn test_reimport_skips_known_windows() {
        let mut manager = test_support::manager();
        import_seed(serde_json::from_str(SEED).unwrap(), &mut manager).unwrap();
        let summary = import_seed(serde_json::from_str(SEED).unwrap(), &mut manager).unwrap();

        assert_eq!(summary.windows, 0);
        assert_eq!(summary.windows_skipped, 1);
        assert_eq!(manager.store().list_windows().unwrap().len(), 1);
        assert_eq!(manager.store().list_periods().unwrap().len(), 1);
    }

    #[test]
    fn test_reimport_keeps_settled_periods() {
        let mut manager = test_support::manager();
        import_seed(serde_json::from_str(SEED).unwrap(), &mut manager).unwrap();
        let store = manager.store_mut();
        store.set_period_phase(1, false, true).unwrap();
        store.mark_period_settled(1).unwrap();

        let summary = import_seed(serde_json::from_str(SEED).unwrap(), &mut manager).unwrap();

        assert_eq!(summary.periods, 0);
        assert_eq!(summary.periods_skipped, 1);
        let period = &manager.store().list_periods().unwrap()[0];
        assert!(period.completed && period.scores_settled);
    }

    #[test]
    fn test_out_of_range_performance_is_rejected() {
        let mut manager = test_support::manager();
        let seed: SeedFile = serde_json::from_str(
            r#"{ "performances": [ { "period": 1, "athlete_id": 9, "stats": { "rating": 42.0 } } ] }"#,
        )
        .unwrap();

        let result = import_seed(seed, &mut manager);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}

//! Per-roster scoring and league-wide batches

use crate::error::{store_error, ManagerError};
use crate::types::{BatchScoreReport, RepriceReport};
use crate::write::{mutate_roster, MissingRoster};
use fanta_domain::traits::LeagueStore;
use fanta_domain::{appraise, compute_period_score, EngineError, NotFoundKind, OwnerId};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Score one roster's lineup for a period and store the result
///
/// Only starters count; a starter without a performance record adds 0. The
/// roster's total is re-derived from all its period scores.
pub fn score_roster<S>(
    store: &mut S,
    owner: &OwnerId,
    period: u32,
    max_write_attempts: u32,
) -> Result<f64, ManagerError>
where
    S: LeagueStore,
    S::Error: std::fmt::Display,
{
    let (_, score) = mutate_roster(
        store,
        owner,
        MissingRoster::Reject,
        max_write_attempts,
        |store, roster| {
            let entry = roster
                .lineup(period)
                .ok_or(EngineError::NotFound(NotFoundKind::Lineup(period)))?;

            let mut fantasy_scores = HashMap::new();
            for athlete_id in entry.lineup.starter_ids() {
                if let Some(record) = store
                    .get_performance(period, athlete_id)
                    .map_err(store_error)?
                {
                    fantasy_scores.insert(athlete_id, record.fantasy_score);
                }
            }

            let score = compute_period_score(&entry.lineup, |id| fantasy_scores.get(&id).copied());
            roster.record_period_score(period, score);
            Ok(score)
        },
    )?;

    Ok(score)
}

/// Score every roster that submitted a lineup for `period`
///
/// Rosters are independent: a failure is logged and recorded in the report,
/// and the remaining rosters are still scored. Only a failure to list the
/// rosters aborts the batch.
pub fn score_period_batch<S>(
    store: &mut S,
    period: u32,
    max_write_attempts: u32,
) -> Result<BatchScoreReport, ManagerError>
where
    S: LeagueStore,
    S::Error: std::fmt::Display,
{
    let owners = store.list_roster_owners().map_err(store_error)?;
    let mut report = BatchScoreReport::new(period);

    for owner in owners {
        match score_roster(store, &owner, period, max_write_attempts) {
            Ok(score) => {
                debug!("Scored roster '{}' for period {}: {}", owner, period, score);
                report.scored.push((owner, score));
            }
            Err(ManagerError::Engine(EngineError::NotFound(NotFoundKind::Lineup(_)))) => {
                report.skipped_no_lineup += 1;
            }
            Err(e) => {
                error!(
                    "Failed to score roster '{}' for period {} [{}]: {}",
                    owner,
                    period,
                    e.code(),
                    e
                );
                report.failed.push((owner, e.to_string()));
            }
        }
    }

    info!(
        "Period {} scoring: {} scored, {} without lineup, {} failed",
        period,
        report.scored.len(),
        report.skipped_no_lineup,
        report.failed.len()
    );

    Ok(report)
}

/// Recompute and persist every athlete's valuation
pub fn reprice_all<S>(store: &mut S) -> Result<RepriceReport, ManagerError>
where
    S: LeagueStore,
    S::Error: std::fmt::Display,
{
    let athletes = store.list_athletes().map_err(store_error)?;
    let mut report = RepriceReport::default();

    for mut athlete in athletes {
        let breakdown = appraise(&athlete, athlete.prior_season.as_ref());
        if breakdown.price == athlete.valuation {
            report.unchanged += 1;
            continue;
        }

        debug!(
            "Repricing athlete {} ({}): {} -> {}",
            athlete.id, athlete.name, athlete.valuation, breakdown.price
        );
        athlete.valuation = breakdown.price;
        store.upsert_athlete(&athlete).map_err(store_error)?;
        report.updated += 1;
    }

    info!(
        "Repriced athletes: {} updated, {} unchanged",
        report.updated, report.unchanged
    );

    Ok(report)
}

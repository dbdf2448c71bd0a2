//! Core RosterManager implementation

use crate::batch;
use crate::config::ManagerConfig;
use crate::error::{store_error, ManagerError};
use crate::types::{BatchScoreReport, MarketStatus, RepriceReport};
use crate::write::{mutate_roster, MissingRoster};
use chrono::{DateTime, Utc};
use fanta_domain::traits::{Clock, LeagueStore};
use fanta_domain::{
    appraise, period, transfer_window, AthleteId, EngineError, Formation, GateReason, Lineup,
    LineupEntry, LineupSubmission, MatchStats, NotFoundKind, OwnerId, PerformanceRecord,
    PriceBreakdown, Roster, ScoringPeriod, TransferWindow,
};
use fanta_gatekeeper::Gatekeeper;
use tracing::{debug, info};

/// The RosterManager applies participant and administrator requests to the league
///
/// Every roster mutation is read → validate → write with a version check.
/// Time-dependent decisions read the injected [`Clock`].
pub struct RosterManager<S, C>
where
    S: LeagueStore,
    C: Clock,
{
    store: S,
    clock: C,
    gatekeeper: Gatekeeper,
    config: ManagerConfig,
}

impl<S, C> RosterManager<S, C>
where
    S: LeagueStore,
    S::Error: std::fmt::Display,
    C: Clock,
{
    /// Create a new RosterManager
    pub fn new(store: S, clock: C, gatekeeper: Gatekeeper, config: ManagerConfig) -> Self {
        Self {
            store,
            clock,
            gatekeeper,
            config,
        }
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ---------------------------------------------------------------
    // Rosters
    // ---------------------------------------------------------------

    /// Get an owner's roster, creating an empty one on first access
    pub fn get_or_create_roster(&mut self, owner: &OwnerId) -> Result<Roster, ManagerError> {
        if let Some(roster) = self.store.load_roster(owner).map_err(store_error)? {
            return Ok(roster);
        }

        let (roster, ()) = mutate_roster(
            &mut self.store,
            owner,
            MissingRoster::Create,
            self.config.max_write_attempts,
            |_, _| Ok(()),
        )?;
        info!("Created roster for '{}'", owner);
        Ok(roster)
    }

    /// Get an owner's roster
    pub fn get_roster(&self, owner: &OwnerId) -> Result<Roster, ManagerError> {
        self.store
            .load_roster(owner)
            .map_err(store_error)?
            .ok_or_else(|| EngineError::from(NotFoundKind::Roster(owner.clone())).into())
    }

    /// Buy an athlete at its current valuation
    ///
    /// Requires an open transfer market. Budget, position limit, ownership
    /// and roster size are checked in that order before anything changes.
    pub fn add_athlete(
        &mut self,
        owner: &OwnerId,
        athlete_id: AthleteId,
    ) -> Result<Roster, ManagerError> {
        let result = self.add_athlete_inner(owner, athlete_id);
        log_outcome("add_athlete", owner, &result);
        result
    }

    fn add_athlete_inner(
        &mut self,
        owner: &OwnerId,
        athlete_id: AthleteId,
    ) -> Result<Roster, ManagerError> {
        self.require_market_open()?;

        let athlete = self
            .store
            .get_athlete(athlete_id)
            .map_err(store_error)?
            .ok_or(EngineError::NotFound(NotFoundKind::Athlete(athlete_id)))?;

        let (roster, ()) = mutate_roster(
            &mut self.store,
            owner,
            MissingRoster::Create,
            self.config.max_write_attempts,
            |_, roster| roster.try_add(&athlete).map_err(|v| EngineError::from(v).into()),
        )?;

        info!(
            "'{}' bought athlete {} for {} (budget left {})",
            owner, athlete.id, athlete.valuation, roster.budget
        );
        Ok(roster)
    }

    /// Sell an athlete at its current valuation
    ///
    /// Requires an open transfer market. When the athlete is no longer in
    /// the athlete registry, the price originally paid is credited.
    pub fn remove_athlete(
        &mut self,
        owner: &OwnerId,
        athlete_id: AthleteId,
    ) -> Result<Roster, ManagerError> {
        let result = self.remove_athlete_inner(owner, athlete_id);
        log_outcome("remove_athlete", owner, &result);
        result
    }

    fn remove_athlete_inner(
        &mut self,
        owner: &OwnerId,
        athlete_id: AthleteId,
    ) -> Result<Roster, ManagerError> {
        self.require_market_open()?;

        let valuation = self
            .store
            .get_athlete(athlete_id)
            .map_err(store_error)?
            .map(|a| a.valuation);

        let (roster, removed) = mutate_roster(
            &mut self.store,
            owner,
            MissingRoster::Reject,
            self.config.max_write_attempts,
            |_, roster| {
                let paid = roster
                    .owned_athlete(athlete_id)
                    .map(|o| o.acquisition_price)
                    .ok_or(EngineError::NotFound(NotFoundKind::OwnedAthlete(athlete_id)))?;
                let credit = valuation.unwrap_or(paid);
                roster
                    .try_remove(athlete_id, credit)
                    .map_err(|k| EngineError::from(k).into())
            },
        )?;

        info!(
            "'{}' sold athlete {} (paid {}, budget now {})",
            owner, removed.athlete_id, removed.acquisition_price, roster.budget
        );
        Ok(roster)
    }

    // ---------------------------------------------------------------
    // Lineups
    // ---------------------------------------------------------------

    /// Whether lineups can be submitted now, and for which period
    pub fn can_submit_lineup(&self) -> Result<LineupSubmission, ManagerError> {
        let periods = self.store.list_periods().map_err(store_error)?;
        Ok(period::can_submit_lineup(&periods, self.now()))
    }

    /// Submit the lineup for a period, replacing any earlier submission
    ///
    /// Lineups are accepted only for the period the submission gate is
    /// currently open for, and must pass the gatekeeper's structural checks.
    pub fn set_lineup(
        &mut self,
        owner: &OwnerId,
        period: u32,
        formation: Formation,
        lineup: Lineup,
    ) -> Result<Roster, ManagerError> {
        let result = self.set_lineup_inner(owner, period, formation, lineup);
        log_outcome("set_lineup", owner, &result);
        result
    }

    fn set_lineup_inner(
        &mut self,
        owner: &OwnerId,
        period: u32,
        formation: Formation,
        lineup: Lineup,
    ) -> Result<Roster, ManagerError> {
        let deadline = self
            .can_submit_lineup()?
            .require_period(period)
            .map_err(EngineError::from)?;

        let gatekeeper = &self.gatekeeper;
        let (roster, ()) = mutate_roster(
            &mut self.store,
            owner,
            MissingRoster::Reject,
            self.config.max_write_attempts,
            |_, roster| {
                gatekeeper
                    .validate_lineup(formation, &lineup, roster)
                    .into_result()?;
                roster.upsert_lineup(
                    period,
                    LineupEntry {
                        formation,
                        lineup: lineup.clone(),
                    },
                );
                Ok(())
            },
        )?;

        info!(
            "'{}' set a {} lineup for period {} (deadline {})",
            owner, formation, period, deadline
        );
        Ok(roster)
    }

    /// Get the lineup stored for a period
    pub fn get_lineup(&self, owner: &OwnerId, period: u32) -> Result<LineupEntry, ManagerError> {
        let roster = self.get_roster(owner)?;
        roster
            .lineup(period)
            .cloned()
            .ok_or_else(|| EngineError::from(NotFoundKind::Lineup(period)).into())
    }

    // ---------------------------------------------------------------
    // Scores
    // ---------------------------------------------------------------

    /// Score an owner's lineup for a period and store the result
    pub fn compute_period_score(
        &mut self,
        owner: &OwnerId,
        period: u32,
    ) -> Result<f64, ManagerError> {
        let result = batch::score_roster(
            &mut self.store,
            owner,
            period,
            self.config.max_write_attempts,
        );
        log_outcome("compute_period_score", owner, &result);
        result
    }

    /// Score every roster with a lineup for a period
    pub fn score_period_for_all(&mut self, period: u32) -> Result<BatchScoreReport, ManagerError> {
        batch::score_period_batch(&mut self.store, period, self.config.max_write_attempts)
    }

    // ---------------------------------------------------------------
    // Pricing
    // ---------------------------------------------------------------

    /// Compute an athlete's price from its attributes and history
    ///
    /// Prior-season statistics are used when the athlete has them.
    pub fn compute_price(&self, athlete_id: AthleteId) -> Result<PriceBreakdown, ManagerError> {
        let athlete = self
            .store
            .get_athlete(athlete_id)
            .map_err(store_error)?
            .ok_or(EngineError::NotFound(NotFoundKind::Athlete(athlete_id)))?;
        Ok(appraise(&athlete, athlete.prior_season.as_ref()))
    }

    /// Recompute and persist every athlete's valuation
    pub fn reprice_athletes(&mut self) -> Result<RepriceReport, ManagerError> {
        batch::reprice_all(&mut self.store)
    }

    // ---------------------------------------------------------------
    // Market
    // ---------------------------------------------------------------

    /// Whether transfers are permitted now
    pub fn is_market_open(&self) -> Result<bool, ManagerError> {
        let windows = self.store.list_windows().map_err(store_error)?;
        Ok(transfer_window::is_open(&windows, self.now()))
    }

    /// Start of the next active transfer window
    pub fn next_opening_date(&self) -> Result<Option<DateTime<Utc>>, ManagerError> {
        let windows = self.store.list_windows().map_err(store_error)?;
        Ok(transfer_window::next_opening(&windows, self.now()))
    }

    /// Market openness and next opening in one read
    pub fn market_status(&self) -> Result<MarketStatus, ManagerError> {
        let windows = self.store.list_windows().map_err(store_error)?;
        let now = self.now();
        Ok(MarketStatus {
            is_open: transfer_window::is_open(&windows, now),
            next_opening: transfer_window::next_opening(&windows, now),
        })
    }

    fn require_market_open(&self) -> Result<(), ManagerError> {
        if self.is_market_open()? {
            Ok(())
        } else {
            Err(EngineError::GateClosed(GateReason::MarketClosed).into())
        }
    }

    // ---------------------------------------------------------------
    // Administration and ingestion
    // ---------------------------------------------------------------

    /// Create and store a transfer window
    pub fn create_window(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<TransferWindow, ManagerError> {
        let window = TransferWindow::new(start, end)?;
        self.gatekeeper.validate_window(&window).into_result()?;
        self.store.upsert_window(&window).map_err(store_error)?;
        info!("Created transfer window {} ({} to {})", window.id, start, end);
        Ok(window)
    }

    /// Create or redefine a scoring period
    ///
    /// Redefining an existing number only moves its bounds; the phase and
    /// settlement flags stay as the scheduler left them.
    pub fn create_period(
        &mut self,
        number: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ScoringPeriod, ManagerError> {
        let period = ScoringPeriod::new(number, start, end)?;
        self.gatekeeper.validate_period(&period).into_result()?;

        let existing = self
            .store
            .list_periods()
            .map_err(store_error)?
            .into_iter()
            .find(|p| p.number == number);

        match existing {
            Some(stored) if stored.start == start && stored.end == end => Ok(stored),
            Some(mut stored) => {
                self.store
                    .set_period_bounds(number, start, end)
                    .map_err(store_error)?;
                stored.start = start;
                stored.end = end;
                info!(
                    "Moved scoring period {} to {} - {} ({})",
                    number,
                    start,
                    end,
                    stored.phase().as_str()
                );
                Ok(stored)
            }
            None => {
                self.store.upsert_period(&period).map_err(store_error)?;
                info!("Created scoring period {} ({} to {})", number, start, end);
                Ok(period)
            }
        }
    }

    /// Store an athlete's statistics for a period, computing its fantasy score
    ///
    /// Re-recording the same `(period, athlete)` replaces the earlier record.
    pub fn record_performance(
        &mut self,
        period: u32,
        athlete_id: AthleteId,
        stats: MatchStats,
    ) -> Result<PerformanceRecord, ManagerError> {
        let record = PerformanceRecord::new(period, athlete_id, stats);
        self.gatekeeper
            .validate_performance(&record, Some(&self.store))
            .map_err(store_error)?
            .into_result()?;
        self.store.upsert_performance(&record).map_err(store_error)?;
        debug!(
            "Recorded performance of athlete {} in period {}: {}",
            athlete_id, period, record.fantasy_score
        );
        Ok(record)
    }
}

/// Log a rejected request with its reason code
fn log_outcome<T>(operation: &str, owner: &OwnerId, result: &Result<T, ManagerError>) {
    if let Err(e) = result {
        debug!("{} for '{}' rejected [{}]: {}", operation, owner, e.code(), e);
    }
}

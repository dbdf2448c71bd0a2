//! Fanta Storage Layer
//!
//! Implements the LeagueStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - Athletes and rosters are stored as JSON documents keyed by id
//! - Windows, periods and performances are stored column by column
//! - Roster writes are guarded by an integer version (compare-and-swap)
//!
//! # Examples
//!
//! ```no_run
//! use fanta_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for league operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use fanta_domain::traits::{LeagueStore, WriteOutcome};
use fanta_domain::{
    Athlete, AthleteId, MatchStats, OwnerId, PerformanceRecord, Roster, ScoringPeriod,
    TransferWindow, WindowId,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of LeagueStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance; two instances opened on the same file see each
/// other's committed writes, and the roster version check keeps them from
/// overwriting one another.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fanta_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("fanta.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Current stored version of an owner's roster, 0 when absent
    pub fn roster_version(&self, owner: &OwnerId) -> Result<u64, StoreError> {
        let version: Option<i64> = self
            .conn
            .query_row(
                "SELECT version FROM rosters WHERE owner = ?1",
                params![owner.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version.map(|v| v as u64).unwrap_or(0))
    }

    /// All performances recorded for a period
    pub fn list_performances(&self, period: u32) -> Result<Vec<PerformanceRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT period, athlete_id, stats, fantasy_score
             FROM performances WHERE period = ?1 ORDER BY athlete_id",
        )?;

        let rows = stmt
            .query_map(params![period], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(period, athlete_id, stats, fantasy_score)| {
                Self::performance_from_row(period, athlete_id, &stats, fantasy_score)
            })
            .collect()
    }

    fn performance_from_row(
        period: u32,
        athlete_id: u32,
        stats: &str,
        fantasy_score: f64,
    ) -> Result<PerformanceRecord, StoreError> {
        let stats: MatchStats = serde_json::from_str(stats)?;
        Ok(PerformanceRecord {
            period,
            athlete_id: AthleteId::new(athlete_id),
            stats,
            fantasy_score,
        })
    }

    fn roster_from_row(doc: &str, version: i64) -> Result<Roster, StoreError> {
        let mut roster: Roster = serde_json::from_str(doc)?;
        if version < 1 {
            return Err(StoreError::InvalidData(format!(
                "roster for {} has version {}",
                roster.owner, version
            )));
        }
        roster.version = version as u64;
        Ok(roster)
    }
}

impl LeagueStore for SqliteStore {
    type Error = StoreError;

    fn get_athlete(&self, id: AthleteId) -> Result<Option<Athlete>, Self::Error> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM athletes WHERE id = ?1",
                params![id.value()],
                |row| row.get(0),
            )
            .optional()?;

        doc.map(|d| serde_json::from_str(&d).map_err(StoreError::from))
            .transpose()
    }

    fn list_athletes(&self) -> Result<Vec<Athlete>, Self::Error> {
        let mut stmt = self.conn.prepare("SELECT doc FROM athletes ORDER BY id")?;
        let docs = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        docs.iter()
            .map(|d| serde_json::from_str(d).map_err(StoreError::from))
            .collect()
    }

    fn upsert_athlete(&mut self, athlete: &Athlete) -> Result<(), Self::Error> {
        let doc = serde_json::to_string(athlete)?;
        self.conn.execute(
            "INSERT INTO athletes (id, name, position, valuation, doc)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
             name = excluded.name, position = excluded.position,
             valuation = excluded.valuation, doc = excluded.doc",
            params![
                athlete.id.value(),
                &athlete.name,
                athlete.position.as_str(),
                athlete.valuation as i64,
                &doc,
            ],
        )?;
        Ok(())
    }

    fn load_roster(&self, owner: &OwnerId) -> Result<Option<Roster>, Self::Error> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT doc, version FROM rosters WHERE owner = ?1",
                params![owner.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(doc, version)| Self::roster_from_row(&doc, version))
            .transpose()
    }

    fn list_roster_owners(&self) -> Result<Vec<OwnerId>, Self::Error> {
        let mut stmt = self.conn.prepare("SELECT owner FROM rosters ORDER BY owner")?;
        let owners = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        owners
            .into_iter()
            .map(|o| OwnerId::new(o).map_err(StoreError::InvalidData))
            .collect()
    }

    fn save_roster(&mut self, roster: &Roster) -> Result<WriteOutcome, Self::Error> {
        let next = roster.version + 1;
        let mut stored = roster.clone();
        stored.version = next;
        let doc = serde_json::to_string(&stored)?;
        let now = Utc::now();

        let changed = if roster.version == 0 {
            self.conn.execute(
                "INSERT INTO rosters (owner, version, doc, updated_at)
                 VALUES (?1, 1, ?2, ?3)
                 ON CONFLICT(owner) DO NOTHING",
                params![roster.owner.as_str(), &doc, now],
            )?
        } else {
            self.conn.execute(
                "UPDATE rosters SET version = ?1, doc = ?2, updated_at = ?3
                 WHERE owner = ?4 AND version = ?5",
                params![
                    next as i64,
                    &doc,
                    now,
                    roster.owner.as_str(),
                    roster.version as i64
                ],
            )?
        };

        if changed == 1 {
            return Ok(WriteOutcome::Committed { version: next });
        }

        let current = self.roster_version(&roster.owner)?;
        tracing::debug!(
            owner = %roster.owner,
            expected = roster.version,
            current,
            "roster version mismatch"
        );
        Ok(WriteOutcome::Conflict { current })
    }

    fn list_windows(&self) -> Result<Vec<TransferWindow>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_at, end_at, active FROM transfer_windows ORDER BY start_at",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, DateTime<Utc>>(1)?,
                    row.get::<_, DateTime<Utc>>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, start, end, active)| {
                Ok(TransferWindow {
                    id: WindowId::from_string(&id).map_err(StoreError::InvalidData)?,
                    start,
                    end,
                    active,
                })
            })
            .collect()
    }

    fn upsert_window(&mut self, window: &TransferWindow) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO transfer_windows (id, start_at, end_at, active)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
             start_at = excluded.start_at, end_at = excluded.end_at, active = excluded.active",
            params![window.id.to_string(), window.start, window.end, window.active],
        )?;
        Ok(())
    }

    fn set_window_active(&mut self, id: WindowId, active: bool) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE transfer_windows SET active = ?2 WHERE id = ?1 AND active = ?3",
            params![id.to_string(), active, !active],
        )?;
        Ok(changed > 0)
    }

    fn list_periods(&self) -> Result<Vec<ScoringPeriod>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT number, start_at, end_at, active, completed, scores_settled
             FROM scoring_periods ORDER BY number",
        )?;

        let periods = stmt
            .query_map([], |row| {
                Ok(ScoringPeriod {
                    number: row.get(0)?,
                    start: row.get(1)?,
                    end: row.get(2)?,
                    active: row.get(3)?,
                    completed: row.get(4)?,
                    scores_settled: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(periods)
    }

    fn upsert_period(&mut self, period: &ScoringPeriod) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO scoring_periods (number, start_at, end_at, active, completed, scores_settled)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(number) DO UPDATE SET
             start_at = excluded.start_at, end_at = excluded.end_at, active = excluded.active,
             completed = excluded.completed, scores_settled = excluded.scores_settled",
            params![
                period.number,
                period.start,
                period.end,
                period.active,
                period.completed,
                period.scores_settled,
            ],
        )?;
        Ok(())
    }

    fn set_period_bounds(
        &mut self,
        number: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE scoring_periods SET start_at = ?2, end_at = ?3 WHERE number = ?1",
            params![number, start, end],
        )?;
        Ok(changed > 0)
    }

    fn set_period_phase(
        &mut self,
        number: u32,
        active: bool,
        completed: bool,
    ) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE scoring_periods SET active = ?2, completed = ?3
             WHERE number = ?1 AND completed = 0 AND NOT (active = ?2 AND completed = ?3)",
            params![number, active, completed],
        )?;
        Ok(changed > 0)
    }

    fn mark_period_settled(&mut self, number: u32) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE scoring_periods SET scores_settled = 1
             WHERE number = ?1 AND completed = 1 AND scores_settled = 0",
            params![number],
        )?;
        Ok(changed > 0)
    }

    fn get_performance(
        &self,
        period: u32,
        athlete_id: AthleteId,
    ) -> Result<Option<PerformanceRecord>, Self::Error> {
        let row: Option<(String, f64)> = self
            .conn
            .query_row(
                "SELECT stats, fantasy_score FROM performances
                 WHERE period = ?1 AND athlete_id = ?2",
                params![period, athlete_id.value()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(stats, score)| {
            Self::performance_from_row(period, athlete_id.value(), &stats, score)
        })
        .transpose()
    }

    fn upsert_performance(&mut self, record: &PerformanceRecord) -> Result<(), Self::Error> {
        let stats = serde_json::to_string(&record.stats)?;
        self.conn.execute(
            "INSERT INTO performances (period, athlete_id, stats, fantasy_score)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(period, athlete_id) DO UPDATE SET
             stats = excluded.stats, fantasy_score = excluded.fantasy_score",
            params![record.period, record.athlete_id.value(), &stats, record.fantasy_score],
        )?;
        Ok(())
    }
}

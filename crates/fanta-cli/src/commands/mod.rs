//! Command implementations.

pub mod import;
pub mod lineup;
pub mod market;
pub mod roster;
pub mod schedule;
pub mod score;

pub use self::import::execute_import;
pub use self::lineup::{execute_lineup, execute_lineup_status, execute_set_lineup};
pub use self::market::{
    execute_add_period, execute_add_window, execute_market, execute_price, execute_reprice,
};
pub use self::roster::{execute_athletes, execute_buy, execute_roster, execute_sell};
pub use self::schedule::{execute_reconcile, execute_run_scheduler};
pub use self::score::{execute_score, execute_score_all};

use crate::error::{CliError, Result};
use chrono::{DateTime, Utc};
use fanta_domain::traits::Clock;
use fanta_domain::OwnerId;
use fanta_manager::RosterManager;
use fanta_store::SqliteStore;

/// Clock used by every command: the wall clock, or the instant given with `--at`.
#[derive(Debug, Clone, Copy)]
pub enum LeagueClock {
    /// Wall clock
    System,
    /// Frozen instant
    Fixed(DateTime<Utc>),
}

impl LeagueClock {
    /// Pick the clock for an optional `--at` override.
    pub fn from_override(at: Option<DateTime<Utc>>) -> Self {
        match at {
            Some(at) => LeagueClock::Fixed(at),
            None => LeagueClock::System,
        }
    }
}

impl Clock for LeagueClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            LeagueClock::System => Utc::now(),
            LeagueClock::Fixed(at) => *at,
        }
    }
}

/// Manager as wired by the CLI.
pub type Manager = RosterManager<SqliteStore, LeagueClock>;

pub(crate) fn parse_owner(owner: &str) -> Result<OwnerId> {
    OwnerId::new(owner).map_err(CliError::InvalidInput)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;
    use fanta_gatekeeper::Gatekeeper;
    use fanta_manager::ManagerConfig;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 12, 0, 0).unwrap()
    }

    pub fn manager() -> Manager {
        RosterManager::new(
            SqliteStore::new(":memory:").unwrap(),
            LeagueClock::Fixed(now()),
            Gatekeeper::default_config(),
            ManagerConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_freezes_clock() {
        let at = test_support::now();
        assert_eq!(LeagueClock::from_override(Some(at)).now(), at);
        assert!(matches!(LeagueClock::from_override(None), LeagueClock::System));
    }

    #[test]
    fn test_parse_owner_rejects_blank() {
        assert!(parse_owner("alice").is_ok());
        assert!(matches!(parse_owner("  "), Err(CliError::InvalidInput(_))));
    }
}

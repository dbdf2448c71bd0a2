//! Fanta Manager
//!
//! Application layer that applies participant and administrator requests to
//! the league.
//!
//! # Overview
//!
//! The RosterManager is the only way rosters change. It reads through a
//! [`LeagueStore`](fanta_domain::traits::LeagueStore), consults the market
//! and lineup gates with an injected clock, validates lineups with the
//! Gatekeeper and commits every change with an optimistic version check.
//!
//! # Architecture
//!
//! ```text
//! request → RosterManager → gates (clock) → Roster rules / Gatekeeper → LeagueStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use fanta_domain::{AthleteId, OwnerId, SystemClock};
//! use fanta_gatekeeper::Gatekeeper;
//! use fanta_manager::{ManagerConfig, RosterManager};
//! use fanta_store::SqliteStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("fanta.db")?;
//! let mut manager = RosterManager::new(
//!     store,
//!     SystemClock,
//!     Gatekeeper::default_config(),
//!     ManagerConfig::default(),
//! );
//!
//! let owner = OwnerId::new("alice")?;
//! let roster = manager.add_athlete(&owner, AthleteId::new(276))?;
//! println!("Budget left: {}", roster.budget);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod write;
mod manager;
pub mod batch;

pub use error::ManagerError;
pub use config::ManagerConfig;
pub use types::{BatchScoreReport, MarketStatus, RepriceReport};
pub use manager::RosterManager;

//! Fanta Gatekeeper
//!
//! Structural validation for everything that enters the league from outside.
//!
//! The Gatekeeper provides:
//! - Lineup validation (formation shape, ownership, slot positions, duplicates)
//! - Transfer window and scoring period interval checks
//! - Performance record range checks
//!
//! # Examples
//!
//! ```no_run
//! use fanta_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let config = ValidationConfig::default();
//! let gatekeeper = Gatekeeper::new(config);
//!
//! // Validate a lineup before storing it
//! // let result = gatekeeper.validate_lineup(formation, &lineup, &roster);
//! ```

#![warn(missing_docs)]

mod validator;
mod error;
mod config;

pub use validator::{Gatekeeper, ValidationResult, ValidationStatus, RejectionReason};
pub use error::GatekeeperError;
pub use config::ValidationConfig;

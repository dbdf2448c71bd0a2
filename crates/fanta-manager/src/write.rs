//! Optimistic read-modify-write of rosters

use crate::error::{store_error, ManagerError};
use fanta_domain::traits::{LeagueStore, WriteOutcome};
use fanta_domain::{EngineError, NotFoundKind, OwnerId, Roster};
use tracing::warn;

/// What to do when the owner has no stored roster yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingRoster {
    /// Start from an empty roster
    Create,
    /// Fail with `NotFound`
    Reject,
}

/// Load a roster, apply `apply` to a copy and commit it with a version check
///
/// When another writer commits first the roster is re-read and `apply` runs
/// again on the fresh copy, so every rule is re-checked against the state
/// that is actually written. After `max_attempts` lost races the operation
/// fails with a transient error. An error from `apply` aborts immediately
/// without writing.
pub(crate) fn mutate_roster<S, T, F>(
    store: &mut S,
    owner: &OwnerId,
    missing: MissingRoster,
    max_attempts: u32,
    mut apply: F,
) -> Result<(Roster, T), ManagerError>
where
    S: LeagueStore,
    S::Error: std::fmt::Display,
    F: FnMut(&S, &mut Roster) -> Result<T, ManagerError>,
{
    for attempt in 1..=max_attempts {
        let mut roster = match store.load_roster(owner).map_err(store_error)? {
            Some(roster) => roster,
            None if missing == MissingRoster::Create => Roster::new(owner.clone()),
            None => return Err(EngineError::from(NotFoundKind::Roster(owner.clone())).into()),
        };

        let output = apply(&*store, &mut roster)?;

        match store.save_roster(&roster).map_err(store_error)? {
            WriteOutcome::Committed { version } => {
                roster.version = version;
                return Ok((roster, output));
            }
            WriteOutcome::Conflict { current } => {
                warn!(
                    "Roster write conflict for '{}' (attempt {}/{}, expected version {}, stored {})",
                    owner, attempt, max_attempts, roster.version, current
                );
            }
        }
    }

    Err(EngineError::Transient(format!(
        "roster for '{}' was modified concurrently {} times in a row",
        owner, max_attempts
    ))
    .into())
}

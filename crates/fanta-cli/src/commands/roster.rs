//! Roster command implementations.

use crate::cli::{OwnerArgs, TransferArgs};
use crate::commands::{parse_owner, Manager};
use crate::error::Result;
use crate::output::{euros, Formatter};
use fanta_domain::traits::LeagueStore;
use fanta_domain::AthleteId;

/// Execute the athletes command.
pub fn execute_athletes(manager: &Manager, formatter: &Formatter) -> Result<()> {
    let mut athletes = manager.store().list_athletes()?;
    athletes.sort_by_key(|a| a.id);
    println!("{}", formatter.format_athletes(&athletes)?);
    Ok(())
}

/// Execute the roster command.
pub fn execute_roster(args: OwnerArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let roster = manager.get_or_create_roster(&owner)?;
    println!("{}", formatter.format_roster(&roster)?);
    Ok(())
}

/// Execute the buy command.
pub fn execute_buy(args: TransferArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let roster = manager.add_athlete(&owner, AthleteId::new(args.athlete))?;

    println!(
        "{}",
        formatter.success(&format!(
            "{} bought athlete {} ({} left)",
            owner,
            args.athlete,
            euros(roster.budget)
        ))
    );
    Ok(())
}

/// Execute the sell command.
pub fn execute_sell(args: TransferArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let roster = manager.remove_athlete(&owner, AthleteId::new(args.athlete))?;

    println!(
        "{}",
        formatter.success(&format!(
            "{} sold athlete {} ({} left)",
            owner,
            args.athlete,
            euros(roster.budget)
        ))
    );
    Ok(())
}

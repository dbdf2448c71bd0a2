//! Market, pricing and calendar command implementations.

use crate::cli::{AddPeriodArgs, AthleteArgs, WindowArgs};
use crate::commands::Manager;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fanta_domain::traits::LeagueStore;
use fanta_domain::AthleteId;

/// Execute the market command.
pub fn execute_market(manager: &Manager, formatter: &Formatter) -> Result<()> {
    let status = manager.market_status()?;
    println!("{}", formatter.format_market(&status)?);
    Ok(())
}

/// Execute the price command.
pub fn execute_price(args: AthleteArgs, manager: &Manager, formatter: &Formatter) -> Result<()> {
    let id = AthleteId::new(args.athlete);
    let breakdown = manager.compute_price(id)?;
    let athlete = manager
        .store()
        .get_athlete(id)?
        .ok_or_else(|| CliError::InvalidInput(format!("athlete {} disappeared", id)))?;

    println!("{}", formatter.format_price(&athlete, &breakdown)?);
    Ok(())
}

/// Execute the reprice command.
pub fn execute_reprice(manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let report = manager.reprice_athletes()?;
    println!("{}", formatter.format_reprice(&report)?);
    Ok(())
}

/// Execute the add-window command.
pub fn execute_add_window(args: WindowArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let window = manager.create_window(args.start, args.end)?;
    println!("{}", formatter.format_window(&window)?);
    Ok(())
}

/// Execute the add-period command.
pub fn execute_add_period(
    args: AddPeriodArgs,
    manager: &mut Manager,
    formatter: &Formatter,
) -> Result<()> {
    let period = manager.create_period(args.number, args.start, args.end)?;
    println!("{}", formatter.format_period(&period)?);
    Ok(())
}

//! Scoring command implementations.

use crate::cli::{PeriodArgs, PeriodOwnerArgs};
use crate::commands::{parse_owner, Manager};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the score command.
pub fn execute_score(args: PeriodOwnerArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let score = manager.compute_period_score(&owner, args.period)?;
    println!("{}", formatter.format_score(&owner, args.period, score)?);
    Ok(())
}

/// Execute the score-all command.
pub fn execute_score_all(args: PeriodArgs, manager: &mut Manager, formatter: &Formatter) -> Result<()> {
    let report = manager.score_period_for_all(args.period)?;
    println!("{}", formatter.format_batch(&report)?);
    Ok(())
}

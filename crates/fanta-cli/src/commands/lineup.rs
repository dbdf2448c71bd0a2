//! Lineup command implementations.

use crate::cli::{PeriodOwnerArgs, SetLineupArgs};
use crate::commands::{parse_owner, Manager};
use crate::error::Result;
use crate::output::Formatter;
use fanta_domain::{AthleteId, Lineup, PositionGroups};

/// Execute the lineup-status command.
pub fn execute_lineup_status(manager: &Manager, formatter: &Formatter) -> Result<()> {
    let submission = manager.can_submit_lineup()?;
    println!("{}", formatter.format_submission(&submission)?);
    Ok(())
}

/// Execute the set-lineup command.
pub fn execute_set_lineup(
    args: SetLineupArgs,
    manager: &mut Manager,
    formatter: &Formatter,
) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let period = args.period;
    let formation = args.formation;
    let lineup = lineup_from_args(args);

    manager.set_lineup(&owner, period, formation, lineup)?;

    println!(
        "{}",
        formatter.success(&format!(
            "{} lineup saved for {} in period {}",
            formation, owner, period
        ))
    );
    Ok(())
}

/// Execute the lineup command.
pub fn execute_lineup(
    args: PeriodOwnerArgs,
    manager: &Manager,
    formatter: &Formatter,
) -> Result<()> {
    let owner = parse_owner(&args.owner)?;
    let entry = manager.get_lineup(&owner, args.period)?;
    println!("{}", formatter.format_lineup(args.period, &entry)?);
    Ok(())
}

fn lineup_from_args(args: SetLineupArgs) -> Lineup {
    let ids = |values: Vec<u32>| values.into_iter().map(AthleteId::new).collect::<Vec<_>>();
    Lineup {
        starters: PositionGroups {
            goalkeeper: ids(args.gk),
            defender: ids(args.def),
            midfielder: ids(args.mid),
            attacker: ids(args.att),
        },
        bench: ids(args.bench),
    }
}

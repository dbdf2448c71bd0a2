//! CLI command definitions and argument parsing.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use fanta_domain::Formation;
use std::path::PathBuf;

/// Fanta CLI - Run a fantasy league from the command line.
#[derive(Debug, Parser)]
#[command(name = "fanta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FANTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configuration)
    #[arg(short, long, global = true, env = "FANTA_DB")]
    pub database: Option<String>,

    /// Evaluate gates as of this instant instead of now (RFC 3339)
    #[arg(long, global = true)]
    pub at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import athletes, windows, periods and performances from a JSON file
    Import(ImportArgs),

    /// List athletes and their valuations
    Athletes,

    /// Show a roster, creating it if needed
    Roster(OwnerArgs),

    /// Buy an athlete
    Buy(TransferArgs),

    /// Sell an athlete
    Sell(TransferArgs),

    /// Show whether lineups are accepted and for which period
    LineupStatus,

    /// Submit a lineup for a period
    SetLineup(SetLineupArgs),

    /// Show the lineup submitted for a period
    Lineup(PeriodOwnerArgs),

    /// Score one roster for a period
    Score(PeriodOwnerArgs),

    /// Score every roster for a period
    ScoreAll(PeriodArgs),

    /// Show how an athlete's price is derived
    Price(AthleteArgs),

    /// Recompute every athlete's valuation
    Reprice,

    /// Show whether the transfer market is open
    Market,

    /// Create a transfer window
    AddWindow(WindowArgs),

    /// Create or redefine a scoring period
    AddPeriod(AddPeriodArgs),

    /// Run one reconciliation sweep
    Reconcile(ReconcileArgs),

    /// Run reconciliation sweeps until interrupted
    RunScheduler(RunSchedulerArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file to import
    pub file: PathBuf,
}

/// Arguments naming a roster owner.
#[derive(Debug, Parser)]
pub struct OwnerArgs {
    /// Roster owner
    pub owner: String,
}

/// Arguments for buy and sell.
#[derive(Debug, Parser)]
pub struct TransferArgs {
    /// Roster owner
    pub owner: String,

    /// Athlete ID
    pub athlete: u32,
}

/// Arguments naming an athlete.
#[derive(Debug, Parser)]
pub struct AthleteArgs {
    /// Athlete ID
    pub athlete: u32,
}

/// Arguments naming a period.
#[derive(Debug, Parser)]
pub struct PeriodArgs {
    /// Period number
    pub period: u32,
}

/// Arguments naming an owner and a period.
#[derive(Debug, Parser)]
pub struct PeriodOwnerArgs {
    /// Roster owner
    pub owner: String,

    /// Period number
    pub period: u32,
}

/// Arguments for the set-lineup command.
#[derive(Debug, Parser)]
pub struct SetLineupArgs {
    /// Roster owner
    pub owner: String,

    /// Period number
    pub period: u32,

    /// Formation (3-4-3, 4-4-2, 4-3-3, 5-3-2, 3-5-2)
    #[arg(short = 'F', long)]
    pub formation: Formation,

    /// Goalkeeper athlete ID
    #[arg(long, value_delimiter = ',')]
    pub gk: Vec<u32>,

    /// Defender athlete IDs, comma separated
    #[arg(long, value_delimiter = ',')]
    pub def: Vec<u32>,

    /// Midfielder athlete IDs, comma separated
    #[arg(long, value_delimiter = ',')]
    pub mid: Vec<u32>,

    /// Attacker athlete IDs, comma separated
    #[arg(long, value_delimiter = ',')]
    pub att: Vec<u32>,

    /// Bench athlete IDs, comma separated
    #[arg(long, value_delimiter = ',')]
    pub bench: Vec<u32>,
}

/// Arguments for the add-window command.
#[derive(Debug, Parser)]
pub struct WindowArgs {
    /// Window start (RFC 3339)
    #[arg(long)]
    pub start: DateTime<Utc>,

    /// Window end (RFC 3339)
    #[arg(long)]
    pub end: DateTime<Utc>,
}

/// Arguments for the add-period command.
#[derive(Debug, Parser)]
pub struct AddPeriodArgs {
    /// Period number
    pub number: u32,

    /// Period start (RFC 3339)
    #[arg(long)]
    pub start: DateTime<Utc>,

    /// Period end (RFC 3339)
    #[arg(long)]
    pub end: DateTime<Utc>,
}

/// Arguments for the reconcile command.
#[derive(Debug, Parser)]
pub struct ReconcileArgs {
    /// Log transitions without persisting them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the run-scheduler command.
#[derive(Debug, Parser)]
pub struct RunSchedulerArgs {
    /// Stop after this many sweeps
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Use the matchday preset instead of the configured scheduler
    #[arg(long)]
    pub matchday: bool,

    /// Log transitions without persisting them
    #[arg(long)]
    pub dry_run: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_command() {
        let cli = Cli::parse_from(["fanta", "buy", "alice", "276"]);
        match cli.command {
            Command::Buy(args) => {
                assert_eq!(args.owner, "alice");
                assert_eq!(args.athlete, 276);
            }
            _ => panic!("Expected Buy command"),
        }
    }

    #[test]
    fn test_set_lineup_command() {
        let cli = Cli::parse_from([
            "fanta",
            "set-lineup",
            "alice",
            "3",
            "--formation",
            "4-4-2",
            "--gk",
            "1",
            "--def",
            "10,11,12,13",
            "--mid",
            "20,21,22,23",
            "--att",
            "30,31",
        ]);
        match cli.command {
            Command::SetLineup(args) => {
                assert_eq!(args.formation, Formation::F442);
                assert_eq!(args.def, vec![10, 11, 12, 13]);
                assert!(args.bench.is_empty());
            }
            _ => panic!("Expected SetLineup command"),
        }
    }

    #[test]
    fn test_unknown_formation_is_rejected() {
        let result = Cli::try_parse_from([
            "fanta",
            "set-lineup",
            "alice",
            "3",
            "--formation",
            "2-2-6",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_instant() {
        let cli = Cli::parse_from(["fanta", "--at", "2024-08-20T12:00:00Z", "market"]);
        assert!(cli.at.is_some());
        assert!(matches!(cli.command, Command::Market));
    }
}

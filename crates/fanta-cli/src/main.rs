//! Fanta CLI - Command-line interface for the fantasy league engine.

use anyhow::Context;
use clap::Parser;
use fanta_cli::commands;
use fanta_cli::{Cli, CliError, Command, Config, Formatter, LeagueClock};
use fanta_gatekeeper::Gatekeeper;
use fanta_manager::RosterManager;
use fanta_store::SqliteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<CliError>().and_then(CliError::code) {
            Some(code) => eprintln!("Error [{}]: {:#}", code, e),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    init_tracing(&config.log_filter);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let formatter = Formatter::new(format, !cli.no_color && config.settings.color);

    let clock = LeagueClock::from_override(cli.at);
    let mut store = SqliteStore::new(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path))?;

    // Scheduler commands work on the store directly
    let command = match cli.command {
        Command::Reconcile(args) => {
            commands::execute_reconcile(args, config.scheduler, &mut store, clock, &formatter)?;
            return Ok(());
        }
        Command::RunScheduler(args) => {
            commands::execute_run_scheduler(args, config.scheduler, store, clock, &formatter)
                .await?;
            return Ok(());
        }
        other => other,
    };

    let mut manager = RosterManager::new(
        store,
        clock,
        Gatekeeper::new(config.validation),
        config.manager,
    );

    match command {
        Command::Import(args) => commands::execute_import(args, &mut manager, &formatter)?,
        Command::Athletes => commands::execute_athletes(&manager, &formatter)?,
        Command::Roster(args) => commands::execute_roster(args, &mut manager, &formatter)?,
        Command::Buy(args) => commands::execute_buy(args, &mut manager, &formatter)?,
        Command::Sell(args) => commands::execute_sell(args, &mut manager, &formatter)?,
        Command::LineupStatus => commands::execute_lineup_status(&manager, &formatter)?,
        Command::SetLineup(args) => commands::execute_set_lineup(args, &mut manager, &formatter)?,
        Command::Lineup(args) => commands::execute_lineup(args, &manager, &formatter)?,
        Command::Score(args) => commands::execute_score(args, &mut manager, &formatter)?,
        Command::ScoreAll(args) => commands::execute_score_all(args, &mut manager, &formatter)?,
        Command::Price(args) => commands::execute_price(args, &manager, &formatter)?,
        Command::Reprice => commands::execute_reprice(&mut manager, &formatter)?,
        Command::Market => commands::execute_market(&manager, &formatter)?,
        Command::AddWindow(args) => commands::execute_add_window(args, &mut manager, &formatter)?,
        Command::AddPeriod(args) => commands::execute_add_period(args, &mut manager, &formatter)?,
        Command::Reconcile(_) | Command::RunScheduler(_) => unreachable!(),
    }

    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

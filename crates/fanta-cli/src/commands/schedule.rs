//! Reconciliation command implementations.

use crate::cli::{ReconcileArgs, RunSchedulerArgs};
use crate::commands::LeagueClock;
use crate::error::Result;
use crate::output::Formatter;
use fanta_domain::traits::Clock;
use fanta_scheduler::{Reconciler, SchedulerConfig, SchedulerWorker};
use fanta_store::SqliteStore;

/// Execute the reconcile command.
pub fn execute_reconcile(
    args: ReconcileArgs,
    mut config: SchedulerConfig,
    store: &mut SqliteStore,
    clock: LeagueClock,
    formatter: &Formatter,
) -> Result<()> {
    config.dry_run |= args.dry_run;
    let mut reconciler = Reconciler::new(config);

    let metrics = reconciler.sweep(store, clock.now())?;
    println!("{}", formatter.format_metrics(&metrics)?);
    Ok(())
}

/// Execute the run-scheduler command.
pub async fn execute_run_scheduler(
    args: RunSchedulerArgs,
    config: SchedulerConfig,
    store: SqliteStore,
    clock: LeagueClock,
    formatter: &Formatter,
) -> Result<()> {
    let mut config = if args.matchday {
        SchedulerConfig::matchday()
    } else {
        config
    };
    config.dry_run |= args.dry_run;
    config.validate()?;

    println!(
        "{}",
        formatter.info(&format!(
            "Reconciling every {}s (Ctrl+C to stop)",
            config.reconcile_interval_secs
        ))
    );

    let mut worker = SchedulerWorker::new(config, clock);
    match args.cycles {
        Some(cycles) => {
            worker.run_cycles(store, cycles).await?;
        }
        None => worker.run(store).await?,
    }

    println!("{}", formatter.format_metrics(worker.metrics())?);
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crewflow_persistence::Persistence;
use crewflow_scheduler::{Scheduler, SchedulerConfig, SweepReport, run_once};
use tracing::info;

/// Crewflow server - runs the daily stage sweeps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// 5-field cron expression for the daily sweep
    #[arg(long, default_value = "0 0 * * *")]
    cron: String,

    /// IANA timezone the cron schedule is evaluated in
    #[arg(long, default_value = "Asia/Kathmandu")]
    timezone: String,

    /// Run one sweep pass for today's date and exit
    #[arg(long)]
    run_once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Crewflow server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let config: SchedulerConfig = SchedulerConfig {
        cron: args.cron,
        timezone: args.timezone,
    };
    let scheduler: Scheduler = Scheduler::new(&config)?;

    if args.run_once {
        let report: SweepReport = run_once(&mut persistence, scheduler.local_today()?)?;
        info!(
            projects_started = report.projects_started,
            projects_completed = report.projects_completed,
            batches_started = report.batches_started,
            batches_completed = report.batches_completed,
            failures = report.failures,
            "One-shot sweep finished"
        );
        return Ok(());
    }

    scheduler.run(&mut persistence).await?;
    Ok(())
}

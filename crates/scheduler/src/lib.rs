// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cron-driven daily sweeps for Crewflow.
//!
//! Projects and training batches carry calendar dates; once a day the
//! scheduler advances whatever those dates make due, using the same engine
//! operations an operator would, under the system actor. The loop is a
//! single tokio task that sleeps in one-minute ticks, so sweeps never
//! overlap.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod sweep;

#[cfg(test)]
mod tests;

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crewflow_persistence::Persistence;
use cron::Schedule;
use time::{Date, Month};
use tracing::{error, info};

pub use error::SchedulerError;
pub use sweep::{SweepReport, run_once};

const POLL_INTERVAL_SECS: u64 = 60;

/// Sweep schedule settings, normally taken from the server CLI.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 5-field cron expression evaluated in `timezone`.
    pub cron: String,
    /// IANA timezone name.
    pub timezone: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cron: String::from("0 0 * * *"),
            timezone: String::from("Asia/Kathmandu"),
        }
    }
}

/// The sweep loop.
#[derive(Debug)]
pub struct Scheduler {
    schedule: Schedule,
    timezone: Tz,
}

impl Scheduler {
    /// Builds a scheduler from validated config.
    ///
    /// # Errors
    ///
    /// Returns an error if the cron expression or timezone does not parse.
    pub fn new(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        Ok(Self {
            schedule: parse_cron(&config.cron)?,
            timezone: parse_timezone(&config.timezone)?,
        })
    }

    /// Next time the schedule fires, in the configured timezone.
    #[must_use]
    pub fn next_run(&self) -> Option<DateTime<Tz>> {
        self.schedule.upcoming(self.timezone).next()
    }

    /// Runs sweeps forever.
    ///
    /// Sleeps in one-minute ticks until the schedule fires, runs one sweep
    /// pass for the local calendar date, and waits for the next fire. A
    /// failed pass is logged and the loop keeps going.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule runs out of fire times or the local
    /// time cannot be expressed as a calendar date.
    pub async fn run(&self, persistence: &mut Persistence) -> Result<(), SchedulerError> {
        loop {
            let next: DateTime<Tz> = self.next_run().ok_or(SchedulerError::NoUpcomingRun)?;
            info!(next = %next, "Next sweep scheduled");

            let fire_at: DateTime<Utc> = next.with_timezone(&Utc);
            while Utc::now() < fire_at {
                tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
            }

            let today: Date = self.local_today()?;
            match sweep::run_once(persistence, today) {
                Ok(report) => {
                    if report.is_empty() {
                        info!(%today, "Sweep pass found nothing due");
                    }
                }
                Err(err) => error!(%err, "Sweep pass aborted"),
            }
        }
    }

    /// Today's calendar date in the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the local time cannot be expressed as a date.
    pub fn local_today(&self) -> Result<Date, SchedulerError> {
        civil_date(&Utc::now().with_timezone(&self.timezone))
    }
}

/// Parses a 5-field cron expression.
///
/// The `cron` crate wants 6 fields with seconds first; a zero seconds field
/// is prepended.
///
/// # Errors
///
/// Returns `InvalidCron` when the expression does not parse.
pub fn parse_cron(expr: &str) -> Result<Schedule, SchedulerError> {
    let full: String = format!("0 {expr}");
    full.parse::<Schedule>().map_err(|source| SchedulerError::InvalidCron {
        expr: expr.to_string(),
        source,
    })
}

fn parse_timezone(name: &str) -> Result<Tz, SchedulerError> {
    name.parse::<Tz>()
        .map_err(|_| SchedulerError::InvalidTimezone(name.to_string()))
}

fn civil_date(moment: &DateTime<Tz>) -> Result<Date, SchedulerError> {
    use chrono::Datelike;

    let bad_date = || SchedulerError::InvalidDate(moment.to_string());
    let month = u8::try_from(moment.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(bad_date)?;
    let day: u8 = u8::try_from(moment.day()).map_err(|_| bad_date())?;
    Date::from_calendar_date(moment.year(), month, day).map_err(|_| bad_date())
}

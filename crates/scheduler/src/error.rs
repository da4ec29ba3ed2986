// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while building or driving the sweep schedule.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Invalid cron expression '{expr}': {source}")]
    InvalidCron {
        expr: String,
        #[source]
        source: cron::error::Error,
    },
    #[error("Invalid timezone '{0}'")]
    InvalidTimezone(String),
    #[error("Cron schedule has no upcoming run")]
    NoUpcomingRun,
    #[error("Cannot express '{0}' as a calendar date")]
    InvalidDate(String),
}

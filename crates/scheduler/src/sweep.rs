// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The daily sweeps.
//!
//! Each sweep selects the entities a calendar date makes due and advances
//! them through the regular engine operations, one transaction per entity.
//! A failed entity is logged and skipped so one bad record cannot stall the
//! rest of the day's work.

use crewflow_engine::{EngineError, TransitionRequest, project_ops, training_ops};
use crewflow_history::Actor;
use crewflow_persistence::{Persistence, queries};
use time::Date;
use tracing::{info, warn};

/// What one `run_once` pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub projects_started: usize,
    pub projects_completed: usize,
    pub batches_started: usize,
    pub batches_completed: usize,
    pub failures: usize,
}

impl SweepReport {
    /// True when the pass changed nothing and hit no failures.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.projects_started == 0
            && self.projects_completed == 0
            && self.batches_started == 0
            && self.batches_completed == 0
            && self.failures == 0
    }
}

/// Runs the four date-driven sweeps for one calendar day.
///
/// Order: start due projects, complete overdue projects, start due training
/// batches, complete overdue training batches. Every entity moves through
/// its own engine transaction under the system actor. A second run on the
/// same date selects nothing, because the first success changed the stage
/// the selection filters on.
///
/// # Errors
///
/// Returns an error only when a selection query itself fails. Per-entity
/// transition failures are logged, counted, and skipped.
pub fn run_once(persistence: &mut Persistence, today: Date) -> Result<SweepReport, EngineError> {
    let actor: Actor = Actor::system();
    let request = TransitionRequest::default();
    let mut report = SweepReport::default();

    let due_projects = queries::projects::projects_ready_to_start(persistence.connection(), today)?;
    for project in due_projects {
        match project_ops::start_project(persistence, project.id, today, &request, &actor) {
            Ok(response) => {
                report.projects_started += 1;
                info!(
                    project_id = project.id,
                    affected_workers = response.affected_workers,
                    "Sweep started project"
                );
            }
            Err(err) => {
                report.failures += 1;
                warn!(project_id = project.id, %err, "Sweep could not start project");
            }
        }
    }

    let overdue_projects =
        queries::projects::projects_past_end_date(persistence.connection(), today)?;
    for project in overdue_projects {
        match project_ops::complete_project(persistence, project.id, today, &request, &actor) {
            Ok(response) => {
                report.projects_completed += 1;
                info!(
                    project_id = project.id,
                    affected_workers = response.affected_workers,
                    "Sweep completed project"
                );
            }
            Err(err) => {
                report.failures += 1;
                warn!(project_id = project.id, %err, "Sweep could not complete project");
            }
        }
    }

    let due_batches = queries::training::batches_ready_to_start(persistence.connection(), today)?;
    for batch in due_batches {
        match training_ops::start_batch(persistence, batch.id, &actor) {
            Ok(response) => {
                report.batches_started += 1;
                info!(
                    batch_id = batch.id,
                    affected_trainees = response.affected_trainees,
                    "Sweep started training batch"
                );
            }
            Err(err) => {
                report.failures += 1;
                warn!(batch_id = batch.id, %err, "Sweep could not start training batch");
            }
        }
    }

    let overdue_batches =
        queries::training::batches_past_end_date(persistence.connection(), today)?;
    for batch in overdue_batches {
        match training_ops::complete_batch(persistence, batch.id, today, &actor) {
            Ok(response) => {
                report.batches_completed += 1;
                info!(
                    batch_id = batch.id,
                    affected_trainees = response.affected_trainees,
                    "Sweep completed training batch"
                );
            }
            Err(err) => {
                report.failures += 1;
                warn!(batch_id = batch.id, %err, "Sweep could not complete training batch");
            }
        }
    }

    info!(
        projects_started = report.projects_started,
        projects_completed = report.projects_completed,
        batches_started = report.batches_started,
        batches_completed = report.batches_completed,
        failures = report.failures,
        "Sweep pass finished"
    );
    Ok(report)
}

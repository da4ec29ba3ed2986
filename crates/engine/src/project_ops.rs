// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project stage transitions.
//!
//! Every operation runs inside one immediate transaction: load the project,
//! validate the transition, mutate the project, fan out to assignments and
//! profiles, and append ledger rows. Per-worker writes and their ledger rows
//! come before the project's own ledger row. An error anywhere rolls the
//! whole operation back.
//!
//! Fan-out profile moves are rule-driven rather than adjacency-gated: the
//! validator gates what an operator may request of the project, and the
//! fan-out rules say where its workers land. A worker already in the target
//! stage is skipped and gets no ledger row.

use crewflow_domain::{
    AssignmentStage, HoldAttribution, ProfileStage, ProjectStage, ensure_project_transition,
};
use crewflow_history::{Actor, DocumentRef, ProfileStageChange, ProjectStageChange};
use crewflow_persistence::{
    Persistence, PersistenceError, ProjectRecord, SqliteConnection, current_timestamp, mutations,
    queries,
};
use std::str::FromStr;
use time::Date;
use tracing::info;

use crate::error::{EngineError, entity_not_found, translate_domain_error};
use crate::next_stage::derive_next_stage;
use crate::requests::{ProjectTransitionResponse, TransitionRequest};

fn load_project(conn: &mut SqliteConnection, project_id: i64) -> Result<ProjectRecord, EngineError> {
    queries::projects::get_project(conn, project_id).map_err(entity_not_found("Project", project_id))
}

fn validate(project: &ProjectRecord, to: ProjectStage) -> Result<(), EngineError> {
    ensure_project_transition(project.stage, to)
        .map_err(|err| translate_domain_error("Project", err))
}

fn ensure_documents(request: &TransitionRequest, to: ProjectStage) -> Result<(), EngineError> {
    if request.require_documents && to.requires_documents() && request.documents.is_empty() {
        return Err(EngineError::MissingDocuments {
            stage: to.as_str().to_string(),
        });
    }
    Ok(())
}

/// Moves a worker's profile as part of a project fan-out.
///
/// Returns whether the profile actually changed. A no-op move appends no
/// ledger row.
fn move_worker(
    conn: &mut SqliteConnection,
    profile_id: i64,
    to: ProfileStage,
    project_id: i64,
    actor: &Actor,
    reason: Option<&String>,
    now: &str,
) -> Result<bool, EngineError> {
    let profile = queries::profiles::get_profile(conn, profile_id)?;
    if profile.current_stage == to {
        return Ok(false);
    }
    mutations::profiles::update_profile_stage(conn, profile_id, to)?;
    let change = ProfileStageChange::new(
        profile_id,
        Some(profile.current_stage),
        to,
        actor.clone(),
        reason.cloned(),
        Some(project_id),
    );
    mutations::history::append_profile_change(conn, &change, now)?;
    Ok(true)
}

/// Appends the project's own ledger row, with any supplied documents, after
/// all worker rows are in.
fn append_project_row(
    conn: &mut SqliteConnection,
    change: &ProjectStageChange,
    documents: &[DocumentRef],
    now: &str,
) -> Result<i64, EngineError> {
    let history_id: i64 = mutations::history::append_project_change(conn, change, now)?;
    if !documents.is_empty() {
        mutations::history::insert_stage_documents(conn, history_id, documents)?;
    }
    Ok(history_id)
}

/// Builds the project's ledger record for a transition driven by `request`.
fn project_change(
    project: &ProjectRecord,
    to: ProjectStage,
    actor: &Actor,
    request: &TransitionRequest,
    attribution: Option<HoldAttribution>,
) -> ProjectStageChange {
    ProjectStageChange::new(
        project.id,
        Some(project.stage),
        to,
        actor.clone(),
        request.reason.clone(),
        attribution,
    )
}

/// The stage a worker held before this engagement began, read from the
/// ledger at the assignment's creation time. Falls back to the bench when
/// the ledger has nothing to restore from.
fn restored_stage(
    conn: &mut SqliteConnection,
    profile_id: i64,
    assignment_created_at: &str,
) -> Result<ProfileStage, EngineError> {
    match queries::history::stage_before(conn, profile_id, assignment_created_at)? {
        Some(Some(stage)) => {
            Ok(ProfileStage::from_str(&stage).map_err(PersistenceError::from)?)
        }
        _ => Ok(ProfileStage::Benched),
    }
}

/// Moves an approved project into planning.
///
/// # Errors
///
/// Returns an error if the project is missing or not `Approved`.
pub fn start_planning(
    persistence: &mut Persistence,
    project_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Planning)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Planning)?;
        let change = project_change(&project, ProjectStage::Planning, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, "Project moved to planning");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Planning,
            affected_workers: 0,
            history_id,
        })
    })
}

/// Shares a planned project's roster with the employer.
///
/// Every matched worker on the roster is confirmed: the assignment and the
/// profile both move to `Assigned`.
///
/// # Errors
///
/// Returns an error if the project is missing or not `Planning`.
pub fn share_project(
    persistence: &mut Persistence,
    project_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Shared)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Shared)?;

        let matched = queries::assignments::active_assignments_for_project(
            conn,
            project_id,
            Some(AssignmentStage::Matched),
        )?;
        let mut affected_workers: usize = 0;
        for assignment in &matched {
            mutations::assignments::update_assignment_stage(
                conn,
                assignment.id,
                AssignmentStage::Assigned,
            )?;
            if move_worker(
                conn,
                assignment.profile_id,
                ProfileStage::Assigned,
                project_id,
                actor,
                request.reason.as_ref(),
                &now,
            )? {
                affected_workers += 1;
            }
        }

        let change = project_change(&project, ProjectStage::Shared, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, affected_workers, "Project shared with employer");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Shared,
            affected_workers,
            history_id,
        })
    })
}

/// Starts a shared project.
///
/// Stamps `actual_start_date` (if unset) and deploys every confirmed worker:
/// the assignment moves to `OnSite` with its deployment time, the profile
/// follows. The scheduler invokes this for projects past their start date.
///
/// # Errors
///
/// Returns an error if the project is missing or not `Shared`.
pub fn start_project(
    persistence: &mut Persistence,
    project_id: i64,
    today: Date,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Ongoing)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Ongoing)?;
        if project.actual_start_date.is_none() {
            mutations::projects::set_actual_start_date(conn, project_id, today)?;
        }

        let assigned = queries::assignments::active_assignments_for_project(
            conn,
            project_id,
            Some(AssignmentStage::Assigned),
        )?;
        let mut affected_workers: usize = 0;
        for assignment in &assigned {
            mutations::assignments::update_assignment_stage(
                conn,
                assignment.id,
                AssignmentStage::OnSite,
            )?;
            mutations::assignments::set_deployed_at(conn, assignment.id)?;
            if move_worker(
                conn,
                assignment.profile_id,
                ProfileStage::OnSite,
                project_id,
                actor,
                request.reason.as_ref(),
                &now,
            )? {
                affected_workers += 1;
            }
        }

        let change = project_change(&project, ProjectStage::Ongoing, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, affected_workers, "Project started");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Ongoing,
            affected_workers,
            history_id,
        })
    })
}

/// Puts an ongoing project on hold.
///
/// The attribution decides the worker fan-out: an employer-attributed hold
/// leaves deployed workers on site, any other hold idles them.
///
/// # Errors
///
/// Returns `MissingAttribution` when no attribution is given, and the usual
/// transition errors otherwise.
pub fn hold_project(
    persistence: &mut Persistence,
    project_id: i64,
    attribution: Option<HoldAttribution>,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    let Some(attribution) = attribution else {
        return Err(EngineError::MissingAttribution);
    };

    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::OnHold)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::OnHold)?;
        mutations::projects::set_hold_attribution(conn, project_id, Some(attribution))?;

        let mut affected_workers: usize = 0;
        if attribution.idles_workers() {
            let on_site = queries::assignments::active_assignments_for_project(
                conn,
                project_id,
                Some(AssignmentStage::OnSite),
            )?;
            for assignment in &on_site {
                mutations::assignments::update_assignment_stage(
                    conn,
                    assignment.id,
                    AssignmentStage::OnHold,
                )?;
                if move_worker(
                    conn,
                    assignment.profile_id,
                    ProfileStage::OnHold,
                    project_id,
                    actor,
                    request.reason.as_ref(),
                    &now,
                )? {
                    affected_workers += 1;
                }
            }
        }

        let change =
            project_change(&project, ProjectStage::OnHold, actor, request, Some(attribution));
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(
            project_id,
            attribution = attribution.as_str(),
            affected_workers,
            "Project put on hold"
        );
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::OnHold,
            affected_workers,
            history_id,
        })
    })
}

/// Resumes a held project.
///
/// Clears the attribution and returns exactly the workers the hold idled
/// back to the site. Workers an employer-attributed hold left `OnSite` have
/// no `OnHold` assignment and are untouched.
///
/// # Errors
///
/// Returns an error if the project is missing or not `OnHold`.
pub fn resume_project(
    persistence: &mut Persistence,
    project_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Ongoing)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Ongoing)?;
        mutations::projects::set_hold_attribution(conn, project_id, None)?;

        let held = queries::assignments::active_assignments_for_project(
            conn,
            project_id,
            Some(AssignmentStage::OnHold),
        )?;
        let mut affected_workers: usize = 0;
        for assignment in &held {
            mutations::assignments::update_assignment_stage(
                conn,
                assignment.id,
                AssignmentStage::OnSite,
            )?;
            if move_worker(
                conn,
                assignment.profile_id,
                ProfileStage::OnSite,
                project_id,
                actor,
                request.reason.as_ref(),
                &now,
            )? {
                affected_workers += 1;
            }
        }

        let change = project_change(&project, ProjectStage::Ongoing, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, affected_workers, "Project resumed");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Ongoing,
            affected_workers,
            history_id,
        })
    })
}

/// Where a closing operation sends each released worker.
enum WorkerRelease {
    /// Derive the next stage from remaining engagements and enrollments.
    Derive,
    /// Restore the stage the worker held before this engagement began.
    /// Used for before-start terminations and cancellations.
    RestoreFromLedger,
    /// Bench every worker, even one with another active engagement.
    /// Used for after-start terminations.
    BenchAll,
}

/// How a closing operation disposes of the project's roster.
struct ReleasePlan<'a> {
    closing_stage: AssignmentStage,
    removal_reason: &'a str,
    release: WorkerRelease,
}

/// Closes out a project's roster: severs every active assignment and moves
/// each worker where the plan says.
fn release_workers(
    conn: &mut SqliteConnection,
    project_id: i64,
    plan: &ReleasePlan<'_>,
    actor: &Actor,
    reason: Option<&String>,
    now: &str,
) -> Result<usize, EngineError> {
    let active = queries::assignments::active_assignments_for_project(conn, project_id, None)?;
    let mut affected_workers: usize = 0;
    for assignment in &active {
        mutations::assignments::close_assignment(
            conn,
            assignment.id,
            plan.closing_stage,
            plan.removal_reason,
        )?;
        let next: ProfileStage = match plan.release {
            WorkerRelease::Derive => {
                derive_next_stage(conn, assignment.profile_id, project_id, true)?
            }
            WorkerRelease::RestoreFromLedger => {
                restored_stage(conn, assignment.profile_id, &assignment.created_at)?
            }
            WorkerRelease::BenchAll => ProfileStage::Benched,
        };
        if move_worker(
            conn,
            assignment.profile_id,
            next,
            project_id,
            actor,
            reason,
            now,
        )? {
            affected_workers += 1;
        }
    }
    Ok(affected_workers)
}

/// Completes an ongoing project.
///
/// Stamps `completion_date` and `actual_end_date` (if unset), marks every
/// active assignment `Completed` and severs it, then derives each worker's
/// next stage. The scheduler invokes this for projects past their end date.
///
/// # Errors
///
/// Returns an error if the project is missing, not `Ongoing`, or documents
/// are required and absent.
pub fn complete_project(
    persistence: &mut Persistence,
    project_id: i64,
    today: Date,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    close_project(
        persistence,
        project_id,
        today,
        ProjectStage::Completed,
        request,
        actor,
    )
}

/// Closes an ongoing project before its planned end date by agreement.
///
/// Same shape as completion with target `ShortClosed`.
///
/// # Errors
///
/// Returns an error if the project is missing, not `Ongoing`, or documents
/// are required and absent.
pub fn short_close_project(
    persistence: &mut Persistence,
    project_id: i64,
    today: Date,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    close_project(
        persistence,
        project_id,
        today,
        ProjectStage::ShortClosed,
        request,
        actor,
    )
}

fn close_project(
    persistence: &mut Persistence,
    project_id: i64,
    today: Date,
    to: ProjectStage,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, to)?;
        ensure_documents(request, to)?;
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, to)?;
        if to == ProjectStage::Completed {
            mutations::projects::set_completion_date(conn, project_id, today)?;
        }
        if project.actual_end_date.is_none() {
            mutations::projects::set_actual_end_date(conn, project_id, today)?;
        }

        let removal_reason: &str = match to {
            ProjectStage::ShortClosed => "Project short-closed",
            _ => "Project completed",
        };
        let affected_workers: usize = release_workers(
            conn,
            project_id,
            &ReleasePlan {
                closing_stage: AssignmentStage::Completed,
                removal_reason,
                release: WorkerRelease::Derive,
            },
            actor,
            request.reason.as_ref(),
            &now,
        )?;

        let change = project_change(&project, to, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(
            project_id,
            to = to.as_str(),
            affected_workers,
            "Project closed"
        );
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to,
            affected_workers,
            history_id,
        })
    })
}

/// Terminates a project from any live stage.
///
/// Stamps `termination_date`, severs every active assignment with `Removed`,
/// and branches the worker fan-out on timing: a termination before the
/// project's start date restores each worker to the stage it held before the
/// engagement began; on or after it, every worker is benched, even one still
/// deployed on another project.
///
/// # Errors
///
/// Returns an error if the project is missing, already terminal, or
/// documents are required and absent.
pub fn terminate_project(
    persistence: &mut Persistence,
    project_id: i64,
    today: Date,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Terminated)?;
        ensure_documents(request, ProjectStage::Terminated)?;
        let now: String = current_timestamp();

        let started: bool = project.actual_start_date.is_some()
            || project.start_date.is_some_and(|start| start <= today);

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Terminated)?;
        mutations::projects::set_termination_date(conn, project_id, today)?;
        if project.actual_start_date.is_some() && project.actual_end_date.is_none() {
            mutations::projects::set_actual_end_date(conn, project_id, today)?;
        }

        let affected_workers: usize = release_workers(
            conn,
            project_id,
            &ReleasePlan {
                closing_stage: AssignmentStage::Removed,
                removal_reason: "Project terminated",
                release: if started {
                    WorkerRelease::BenchAll
                } else {
                    WorkerRelease::RestoreFromLedger
                },
            },
            actor,
            request.reason.as_ref(),
            &now,
        )?;

        let change = project_change(&project, ProjectStage::Terminated, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, started, affected_workers, "Project terminated");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Terminated,
            affected_workers,
            history_id,
        })
    })
}

/// Cancels a project that never started.
///
/// Only `Approved`, `Planning`, and `Shared` projects with no actual start
/// date can be cancelled. Active assignments are severed with `Removed` and
/// each worker is restored as for a before-start termination.
///
/// # Errors
///
/// Returns an error if the project is missing, has started, or is not in a
/// cancellable stage.
pub fn cancel_project(
    persistence: &mut Persistence,
    project_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<ProjectTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        validate(&project, ProjectStage::Cancelled)?;
        if project.actual_start_date.is_some() {
            return Err(EngineError::Precondition(format!(
                "Project {project_id} has already started"
            )));
        }
        let now: String = current_timestamp();

        mutations::projects::update_project_stage(conn, project_id, ProjectStage::Cancelled)?;

        let affected_workers: usize = release_workers(
            conn,
            project_id,
            &ReleasePlan {
                closing_stage: AssignmentStage::Removed,
                removal_reason: "Project cancelled",
                release: WorkerRelease::RestoreFromLedger,
            },
            actor,
            request.reason.as_ref(),
            &now,
        )?;

        let change = project_change(&project, ProjectStage::Cancelled, actor, request, None);
        let history_id: i64 = append_project_row(conn, &change, &request.documents, &now)?;

        info!(project_id, affected_workers, "Project cancelled");
        Ok(ProjectTransitionResponse {
            project_id,
            from: project.stage,
            to: ProjectStage::Cancelled,
            affected_workers,
            history_id,
        })
    })
}

/// Matches a worker to a project, creating the assignment.
///
/// The profile moves to `Matched` through the validator, so only workers in
/// a matchable stage (`Approved`, `Trained`, `Benched`) can join a roster.
/// Only live, unstarted-or-running projects accept matches.
///
/// # Errors
///
/// Returns an error if either entity is missing, the project is terminal,
/// or the profile cannot move to `Matched`.
pub fn match_worker(
    persistence: &mut Persistence,
    project_id: i64,
    profile_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<i64, EngineError> {
    persistence.immediate_transaction(|conn| {
        let project = load_project(conn, project_id)?;
        if project.stage.is_terminal() {
            return Err(EngineError::TerminalStage {
                entity: "Project",
                stage: project.stage.as_str().to_string(),
            });
        }
        let profile = queries::profiles::get_profile(conn, profile_id)
            .map_err(entity_not_found("Profile", profile_id))?;
        crewflow_domain::ensure_profile_transition(profile.current_stage, ProfileStage::Matched)
            .map_err(|err| translate_domain_error("Profile", err))?;
        let now: String = current_timestamp();

        let assignment_id: i64 = mutations::assignments::insert_assignment(
            conn,
            project_id,
            profile_id,
            AssignmentStage::Matched,
        )?;
        mutations::profiles::update_profile_stage(conn, profile_id, ProfileStage::Matched)?;
        let change = ProfileStageChange::new(
            profile_id,
            Some(profile.current_stage),
            ProfileStage::Matched,
            actor.clone(),
            request.reason.clone(),
            Some(project_id),
        );
        mutations::history::append_profile_change(conn, &change, &now)?;

        info!(project_id, profile_id, assignment_id, "Worker matched");
        Ok(assignment_id)
    })
}

/// Removes one worker from a project's roster.
///
/// Severs the assignment with `Removed` and moves the worker to its derived
/// next stage. The project itself does not change stage, so no project
/// ledger row is written.
///
/// # Errors
///
/// Returns an error if the assignment is missing or already severed.
pub fn remove_worker(
    persistence: &mut Persistence,
    assignment_id: i64,
    request: &TransitionRequest,
    actor: &Actor,
) -> Result<(), EngineError> {
    persistence.immediate_transaction(|conn| {
        let assignment = queries::assignments::get_assignment(conn, assignment_id)
            .map_err(entity_not_found("Assignment", assignment_id))?;
        crewflow_domain::ensure_assignment_transition(assignment.stage, AssignmentStage::Removed)
            .map_err(|err| translate_domain_error("Assignment", err))?;
        let project = load_project(conn, assignment.project_id)?;
        let now: String = current_timestamp();

        let removal_reason: &str = request
            .reason
            .as_deref()
            .unwrap_or("Removed from project roster");
        mutations::assignments::close_assignment(
            conn,
            assignment_id,
            AssignmentStage::Removed,
            removal_reason,
        )?;

        let started: bool = project.actual_start_date.is_some();
        let next: ProfileStage =
            derive_next_stage(conn, assignment.profile_id, project.id, started)?;
        move_worker(
            conn,
            assignment.profile_id,
            next,
            project.id,
            actor,
            request.reason.as_ref(),
            &now,
        )?;

        info!(
            assignment_id,
            profile_id = assignment.profile_id,
            project_id = project.id,
            "Worker removed from roster"
        );
        Ok(())
    })
}

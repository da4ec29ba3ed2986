// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::AssignmentStage;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{AssignmentRecord, AssignmentRow, ProjectRecord, ProjectRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Stage strings for assignments that still bind a worker.
const ACTIVE_STAGES: [&str; 4] = ["Matched", "Assigned", "OnSite", "OnHold"];

/// Fetches an assignment by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no assignment has this ID.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<AssignmentRecord, PersistenceError> {
    let row: AssignmentRow = diesel_schema::assignments::table
        .filter(diesel_schema::assignments::id.eq(id))
        .first::<AssignmentRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Assignment {id}")))?;

    row.try_into()
}

/// Lists the active assignments on a project, optionally restricted to one
/// stage.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_assignments_for_project(
    conn: &mut SqliteConnection,
    project_id: i64,
    stage: Option<AssignmentStage>,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    let mut query = diesel_schema::assignments::table
        .filter(diesel_schema::assignments::project_id.eq(project_id))
        .filter(diesel_schema::assignments::removed_at.is_null())
        .filter(diesel_schema::assignments::stage.eq_any(ACTIVE_STAGES))
        .into_boxed();

    if let Some(stage) = stage {
        query = query.filter(diesel_schema::assignments::stage.eq(stage.as_str()));
    }

    let rows: Vec<AssignmentRow> = query
        .order(diesel_schema::assignments::id.asc())
        .load::<AssignmentRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// Lists a worker's active assignments on live projects, excluding one
/// project.
///
/// Used by next-stage derivation when a project releases a worker: any other
/// engagement keeps the worker in the corresponding stage. Each assignment is
/// returned with its project so the caller can rank by start date.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_assignments_for_profile_excluding(
    conn: &mut SqliteConnection,
    profile_id: i64,
    excluded_project_id: i64,
) -> Result<Vec<(AssignmentRecord, ProjectRecord)>, PersistenceError> {
    let live_project_stages: [&str; 5] = ["Approved", "Planning", "Shared", "Ongoing", "OnHold"];

    let rows: Vec<(AssignmentRow, ProjectRow)> = diesel_schema::assignments::table
        .inner_join(diesel_schema::projects::table)
        .filter(diesel_schema::assignments::profile_id.eq(profile_id))
        .filter(diesel_schema::assignments::project_id.ne(excluded_project_id))
        .filter(diesel_schema::assignments::removed_at.is_null())
        .filter(diesel_schema::assignments::stage.eq_any(ACTIVE_STAGES))
        .filter(diesel_schema::projects::deleted_at.is_null())
        .filter(diesel_schema::projects::stage.eq_any(live_project_stages))
        .order(diesel_schema::assignments::id.asc())
        .load::<(AssignmentRow, ProjectRow)>(conn)?;

    rows.into_iter()
        .map(|(assignment, project)| Ok((assignment.try_into()?, project.try_into()?)))
        .collect()
}

/// Returns whether the worker has ever completed an assignment on another
/// project.
///
/// Distinguishes a first-time trainee from a worker with past engagements
/// when a never-started project releases its roster.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_completed_assignment(
    conn: &mut SqliteConnection,
    profile_id: i64,
    excluded_project_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = diesel_schema::assignments::table
        .filter(diesel_schema::assignments::profile_id.eq(profile_id))
        .filter(diesel_schema::assignments::project_id.ne(excluded_project_id))
        .filter(diesel_schema::assignments::stage.eq(AssignmentStage::Completed.as_str()))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

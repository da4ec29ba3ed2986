// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::AssignmentStage;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::current_timestamp;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts an assignment and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including a foreign key violation
/// for an unknown project or profile.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    project_id: i64,
    profile_id: i64,
    stage: AssignmentStage,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::assignments::table)
        .values((
            diesel_schema::assignments::project_id.eq(project_id),
            diesel_schema::assignments::profile_id.eq(profile_id),
            diesel_schema::assignments::stage.eq(stage.as_str()),
            diesel_schema::assignments::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        assignment_id = id,
        project_id, profile_id, "Inserted assignment"
    );
    Ok(id)
}

/// Updates the stage of an assignment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the assignment does not exist.
pub fn update_assignment_stage(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    stage: AssignmentStage,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::assignments::table.filter(diesel_schema::assignments::id.eq(assignment_id)),
    )
    .set(diesel_schema::assignments::stage.eq(stage.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }
    debug!(
        assignment_id,
        stage = stage.as_str(),
        "Updated assignment stage"
    );
    Ok(())
}

/// Stamps the deployment time on an assignment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the assignment does not exist.
pub fn set_deployed_at(
    conn: &mut SqliteConnection,
    assignment_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::assignments::table.filter(diesel_schema::assignments::id.eq(assignment_id)),
    )
    .set(diesel_schema::assignments::deployed_at.eq(current_timestamp()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }
    Ok(())
}

/// Severs an assignment: sets a closing stage, stamps `removed_at`, and
/// records why.
///
/// After this the assignment is inactive for every future query.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the assignment does not exist.
pub fn close_assignment(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    stage: AssignmentStage,
    reason: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::assignments::table.filter(diesel_schema::assignments::id.eq(assignment_id)),
    )
    .set((
        diesel_schema::assignments::stage.eq(stage.as_str()),
        diesel_schema::assignments::removed_at.eq(current_timestamp()),
        diesel_schema::assignments::removal_reason.eq(reason),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Assignment {assignment_id}"
        )));
    }
    debug!(assignment_id, stage = stage.as_str(), "Closed assignment");
    Ok(())
}

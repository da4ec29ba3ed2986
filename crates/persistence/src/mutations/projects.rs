// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{HoldAttribution, ProjectStage};
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{current_timestamp, format_date};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Parameters for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject<'a> {
    pub project_code: &'a str,
    pub employer_id: i64,
    pub name: &'a str,
    pub stage: ProjectStage,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Inserts a project and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_project(
    conn: &mut SqliteConnection,
    project: &NewProject<'_>,
) -> Result<i64, PersistenceError> {
    let start_date: Option<String> = project.start_date.map(format_date).transpose()?;
    let end_date: Option<String> = project.end_date.map(format_date).transpose()?;

    diesel::insert_into(diesel_schema::projects::table)
        .values((
            diesel_schema::projects::project_code.eq(project.project_code),
            diesel_schema::projects::employer_id.eq(project.employer_id),
            diesel_schema::projects::name.eq(project.name),
            diesel_schema::projects::stage.eq(project.stage.as_str()),
            diesel_schema::projects::start_date.eq(start_date),
            diesel_schema::projects::end_date.eq(end_date),
            diesel_schema::projects::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        project_id = id,
        code = project.project_code,
        "Inserted project"
    );
    Ok(id)
}

/// Updates the stage of a project.
///
/// Must be paired with a ledger append in the same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn update_project_stage(
    conn: &mut SqliteConnection,
    project_id: i64,
    stage: ProjectStage,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::stage.eq(stage.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    debug!(project_id, stage = stage.as_str(), "Updated project stage");
    Ok(())
}

/// Sets or clears the hold attribution on a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn set_hold_attribution(
    conn: &mut SqliteConnection,
    project_id: i64,
    attribution: Option<HoldAttribution>,
) -> Result<(), PersistenceError> {
    let value: Option<&str> = attribution.map(|a| a.as_str());
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::on_hold_attribution.eq(value))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    Ok(())
}

/// Stamps the actual start date of a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn set_actual_start_date(
    conn: &mut SqliteConnection,
    project_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::actual_start_date.eq(format_date(date)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    Ok(())
}

/// Stamps the actual end date of a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn set_actual_end_date(
    conn: &mut SqliteConnection,
    project_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::actual_end_date.eq(format_date(date)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    Ok(())
}

/// Stamps the completion date of a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn set_completion_date(
    conn: &mut SqliteConnection,
    project_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::completion_date.eq(format_date(date)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    Ok(())
}

/// Stamps the termination date of a project.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project does not exist.
pub fn set_termination_date(
    conn: &mut SqliteConnection,
    project_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::projects::table.filter(diesel_schema::projects::id.eq(project_id)),
    )
    .set(diesel_schema::projects::termination_date.eq(format_date(date)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Project {project_id}")));
    }
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::ProjectStage;
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;

use crate::data_models::{ProjectRecord, ProjectRow, format_date};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Fetches a project by ID. Soft-deleted projects are invisible.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no live project has this ID.
pub fn get_project(conn: &mut SqliteConnection, id: i64) -> Result<ProjectRecord, PersistenceError> {
    let row: ProjectRow = diesel_schema::projects::table
        .filter(diesel_schema::projects::id.eq(id))
        .filter(diesel_schema::projects::deleted_at.is_null())
        .first::<ProjectRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Project {id}")))?;

    row.try_into()
}

/// Lists shared projects whose start date is on or before `today`.
///
/// The scheduler's auto-start sweep runs over this set. Projects that
/// auto-start leave the `Shared` stage, so a second sweep the same day
/// selects nothing.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn projects_ready_to_start(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Vec<ProjectRecord>, PersistenceError> {
    let today_str: String = format_date(today)?;
    let rows: Vec<ProjectRow> = diesel_schema::projects::table
        .filter(diesel_schema::projects::stage.eq(ProjectStage::Shared.as_str()))
        .filter(diesel_schema::projects::start_date.le(today_str))
        .filter(diesel_schema::projects::deleted_at.is_null())
        .order(diesel_schema::projects::id.asc())
        .load::<ProjectRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// Lists ongoing projects whose end date has passed.
///
/// The scheduler's auto-complete sweep runs over this set. Held projects are
/// deliberately excluded; a hold survives its planned end date until an
/// operator resolves it.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn projects_past_end_date(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Vec<ProjectRecord>, PersistenceError> {
    let today_str: String = format_date(today)?;
    let rows: Vec<ProjectRow> = diesel_schema::projects::table
        .filter(diesel_schema::projects::stage.eq(ProjectStage::Ongoing.as_str()))
        .filter(diesel_schema::projects::end_date.lt(today_str))
        .filter(diesel_schema::projects::deleted_at.is_null())
        .order(diesel_schema::projects::id.asc())
        .load::<ProjectRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::EmployerStatus;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::current_timestamp;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts an employer and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_employer(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::employers::table)
        .values((
            diesel_schema::employers::name.eq(name),
            diesel_schema::employers::status.eq(EmployerStatus::New.as_str()),
            diesel_schema::employers::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(employer_id = id, "Inserted employer");
    Ok(id)
}

/// Updates the status of an employer.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employer does not exist.
pub fn update_employer_status(
    conn: &mut SqliteConnection,
    employer_id: i64,
    status: EmployerStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::employers::table.filter(diesel_schema::employers::id.eq(employer_id)),
    )
    .set(diesel_schema::employers::status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Employer {employer_id}")));
    }
    debug!(
        employer_id,
        status = status.as_str(),
        "Updated employer status"
    );
    Ok(())
}

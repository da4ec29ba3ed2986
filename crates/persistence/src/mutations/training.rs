// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{BatchStatus, EnrollmentStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{current_timestamp, format_date};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Inserts a training batch and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_batch(
    conn: &mut SqliteConnection,
    batch_code: &str,
    program_name: &str,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> Result<i64, PersistenceError> {
    let start_date: Option<String> = start_date.map(format_date).transpose()?;
    let end_date: Option<String> = end_date.map(format_date).transpose()?;

    diesel::insert_into(diesel_schema::training_batches::table)
        .values((
            diesel_schema::training_batches::batch_code.eq(batch_code),
            diesel_schema::training_batches::program_name.eq(program_name),
            diesel_schema::training_batches::status.eq(BatchStatus::Scheduled.as_str()),
            diesel_schema::training_batches::start_date.eq(start_date),
            diesel_schema::training_batches::end_date.eq(end_date),
            diesel_schema::training_batches::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(batch_id = id, code = batch_code, "Inserted training batch");
    Ok(id)
}

/// Updates the status of a training batch.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the batch does not exist.
pub fn update_batch_status(
    conn: &mut SqliteConnection,
    batch_id: i64,
    status: BatchStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::training_batches::table
            .filter(diesel_schema::training_batches::id.eq(batch_id)),
    )
    .set(diesel_schema::training_batches::status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Training batch {batch_id}"
        )));
    }
    debug!(batch_id, status = status.as_str(), "Updated batch status");
    Ok(())
}

/// Enrolls a profile in a batch and returns the enrollment ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_enrollment(
    conn: &mut SqliteConnection,
    batch_id: i64,
    profile_id: i64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::batch_enrollments::table)
        .values((
            diesel_schema::batch_enrollments::batch_id.eq(batch_id),
            diesel_schema::batch_enrollments::profile_id.eq(profile_id),
            diesel_schema::batch_enrollments::status.eq(EnrollmentStatus::Enrolled.as_str()),
            diesel_schema::batch_enrollments::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(enrollment_id = id, batch_id, profile_id, "Inserted enrollment");
    Ok(id)
}

/// Updates the status of an enrollment, stamping the completion date when
/// one is given.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the enrollment does not exist.
pub fn update_enrollment_status(
    conn: &mut SqliteConnection,
    enrollment_id: i64,
    status: EnrollmentStatus,
    completion_date: Option<Date>,
) -> Result<(), PersistenceError> {
    let completion: Option<String> = completion_date.map(format_date).transpose()?;
    let updated: usize = diesel::update(
        diesel_schema::batch_enrollments::table
            .filter(diesel_schema::batch_enrollments::id.eq(enrollment_id)),
    )
    .set((
        diesel_schema::batch_enrollments::status.eq(status.as_str()),
        diesel_schema::batch_enrollments::completion_date.eq(completion),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Enrollment {enrollment_id}"
        )));
    }
    debug!(
        enrollment_id,
        status = status.as_str(),
        "Updated enrollment status"
    );
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::{BatchStatus, EnrollmentStatus};
use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;

use crate::data_models::{
    BatchRecord, BatchRow, EnrollmentRecord, EnrollmentRow, format_date,
};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Fetches a training batch by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no batch has this ID.
pub fn get_batch(conn: &mut SqliteConnection, id: i64) -> Result<BatchRecord, PersistenceError> {
    let row: BatchRow = diesel_schema::training_batches::table
        .filter(diesel_schema::training_batches::id.eq(id))
        .first::<BatchRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Training batch {id}")))?;

    row.try_into()
}

/// Fetches an enrollment by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no enrollment has this ID.
pub fn get_enrollment(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<EnrollmentRecord, PersistenceError> {
    let row: EnrollmentRow = diesel_schema::batch_enrollments::table
        .filter(diesel_schema::batch_enrollments::id.eq(id))
        .first::<EnrollmentRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Enrollment {id}")))?;

    row.try_into()
}

/// Finds a profile's live enrollment together with its batch, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_enrollment_for_profile(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Option<(EnrollmentRecord, BatchRecord)>, PersistenceError> {
    let row: Option<(EnrollmentRow, BatchRow)> = diesel_schema::batch_enrollments::table
        .inner_join(diesel_schema::training_batches::table)
        .filter(diesel_schema::batch_enrollments::profile_id.eq(profile_id))
        .filter(diesel_schema::batch_enrollments::status.eq(EnrollmentStatus::Enrolled.as_str()))
        .order(diesel_schema::batch_enrollments::id.desc())
        .first::<(EnrollmentRow, BatchRow)>(conn)
        .optional()?;

    row.map(|(enrollment, batch)| Ok((enrollment.try_into()?, batch.try_into()?)))
        .transpose()
}

/// Lists the enrollments of a batch with the given status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn enrollments_for_batch(
    conn: &mut SqliteConnection,
    batch_id: i64,
    status: EnrollmentStatus,
) -> Result<Vec<EnrollmentRecord>, PersistenceError> {
    let rows: Vec<EnrollmentRow> = diesel_schema::batch_enrollments::table
        .filter(diesel_schema::batch_enrollments::batch_id.eq(batch_id))
        .filter(diesel_schema::batch_enrollments::status.eq(status.as_str()))
        .order(diesel_schema::batch_enrollments::id.asc())
        .load::<EnrollmentRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// Lists scheduled batches whose start date is on or before `today`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn batches_ready_to_start(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Vec<BatchRecord>, PersistenceError> {
    let today_str: String = format_date(today)?;
    let rows: Vec<BatchRow> = diesel_schema::training_batches::table
        .filter(diesel_schema::training_batches::status.eq(BatchStatus::Scheduled.as_str()))
        .filter(diesel_schema::training_batches::start_date.le(today_str))
        .order(diesel_schema::training_batches::id.asc())
        .load::<BatchRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

/// Lists ongoing batches whose end date has passed.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn batches_past_end_date(
    conn: &mut SqliteConnection,
    today: Date,
) -> Result<Vec<BatchRecord>, PersistenceError> {
    let today_str: String = format_date(today)?;
    let rows: Vec<BatchRow> = diesel_schema::training_batches::table
        .filter(diesel_schema::training_batches::status.eq(BatchStatus::Ongoing.as_str()))
        .filter(diesel_schema::training_batches::end_date.lt(today_str))
        .order(diesel_schema::training_batches::id.asc())
        .load::<BatchRow>(conn)?;

    rows.into_iter().map(TryInto::try_into).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger queries.
//!
//! The ledgers are the source of truth for entity stages. Ordering is by
//! `transitioned_at` with the row ID as tiebreaker, since several rows can
//! share a second inside one transaction.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ProfileHistoryRecord, ProjectHistoryRecord, StageDocumentRecord};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Lists a profile's ledger rows in chronological order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn profile_stage_history(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Vec<ProfileHistoryRecord>, PersistenceError> {
    Ok(diesel_schema::profile_stage_history::table
        .filter(diesel_schema::profile_stage_history::profile_id.eq(profile_id))
        .order((
            diesel_schema::profile_stage_history::transitioned_at.asc(),
            diesel_schema::profile_stage_history::id.asc(),
        ))
        .load::<ProfileHistoryRecord>(conn)?)
}

/// Lists a project's ledger rows in chronological order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn project_stage_history(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Vec<ProjectHistoryRecord>, PersistenceError> {
    Ok(diesel_schema::project_stage_history::table
        .filter(diesel_schema::project_stage_history::project_id.eq(project_id))
        .order((
            diesel_schema::project_stage_history::transitioned_at.asc(),
            diesel_schema::project_stage_history::id.asc(),
        ))
        .load::<ProjectHistoryRecord>(conn)?)
}

/// Returns the `to_stage` of the most recent ledger row for a profile.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn latest_profile_stage(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Option<String>, PersistenceError> {
    Ok(diesel_schema::profile_stage_history::table
        .filter(diesel_schema::profile_stage_history::profile_id.eq(profile_id))
        .order((
            diesel_schema::profile_stage_history::transitioned_at.desc(),
            diesel_schema::profile_stage_history::id.desc(),
        ))
        .select(diesel_schema::profile_stage_history::to_stage)
        .first::<String>(conn)
        .optional()?)
}

/// Finds the `from_stage` of a profile's most recent ledger row no later
/// than `cutoff`.
///
/// Used when a never-started project is terminated: each worker is restored
/// to the stage it held before the engagement began, and the engagement's
/// first ledger row shares its timestamp with the assignment's creation.
/// The inner `Option` is `None` when the matched row is the profile's first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn stage_before(
    conn: &mut SqliteConnection,
    profile_id: i64,
    cutoff: &str,
) -> Result<Option<Option<String>>, PersistenceError> {
    Ok(diesel_schema::profile_stage_history::table
        .filter(diesel_schema::profile_stage_history::profile_id.eq(profile_id))
        .filter(diesel_schema::profile_stage_history::transitioned_at.le(cutoff))
        .order((
            diesel_schema::profile_stage_history::transitioned_at.desc(),
            diesel_schema::profile_stage_history::id.desc(),
        ))
        .select(diesel_schema::profile_stage_history::from_stage)
        .first::<Option<String>>(conn)
        .optional()?)
}

/// Lists the documents attached to a project ledger row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn documents_for_history_row(
    conn: &mut SqliteConnection,
    history_id: i64,
) -> Result<Vec<StageDocumentRecord>, PersistenceError> {
    Ok(diesel_schema::stage_documents::table
        .filter(diesel_schema::stage_documents::history_id.eq(history_id))
        .order(diesel_schema::stage_documents::id.asc())
        .load::<StageDocumentRecord>(conn)?)
}

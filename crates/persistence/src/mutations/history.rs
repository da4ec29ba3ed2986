// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger appends.
//!
//! Ledger rows are insert-only. The timestamp is supplied by the caller so
//! every row written by one operation shares the operation's clock reading.

use crewflow_history::{DocumentRef, ProfileStageChange, ProjectStageChange};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Appends a row to the profile stage ledger and returns the row ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_profile_change(
    conn: &mut SqliteConnection,
    change: &ProfileStageChange,
    transitioned_at: &str,
) -> Result<i64, PersistenceError> {
    let from_stage: Option<&str> = change.from.as_ref().map(|s| s.as_str());

    diesel::insert_into(diesel_schema::profile_stage_history::table)
        .values((
            diesel_schema::profile_stage_history::profile_id.eq(change.profile_id),
            diesel_schema::profile_stage_history::from_stage.eq(from_stage),
            diesel_schema::profile_stage_history::to_stage.eq(change.to.as_str()),
            diesel_schema::profile_stage_history::actor_id.eq(&change.actor.id),
            diesel_schema::profile_stage_history::actor_type.eq(&change.actor.actor_type),
            diesel_schema::profile_stage_history::reason.eq(&change.reason),
            diesel_schema::profile_stage_history::project_id.eq(change.project_id),
            diesel_schema::profile_stage_history::transitioned_at.eq(transitioned_at),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        profile_id = change.profile_id,
        to = change.to.as_str(),
        "Appended profile ledger row"
    );
    Ok(id)
}

/// Appends a row to the project stage ledger and returns the row ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_project_change(
    conn: &mut SqliteConnection,
    change: &ProjectStageChange,
    transitioned_at: &str,
) -> Result<i64, PersistenceError> {
    let from_stage: Option<&str> = change.from.as_ref().map(|s| s.as_str());
    let attribution: Option<&str> = change.attribution.as_ref().map(|a| a.as_str());

    diesel::insert_into(diesel_schema::project_stage_history::table)
        .values((
            diesel_schema::project_stage_history::project_id.eq(change.project_id),
            diesel_schema::project_stage_history::from_stage.eq(from_stage),
            diesel_schema::project_stage_history::to_stage.eq(change.to.as_str()),
            diesel_schema::project_stage_history::actor_id.eq(&change.actor.id),
            diesel_schema::project_stage_history::actor_type.eq(&change.actor.actor_type),
            diesel_schema::project_stage_history::reason.eq(&change.reason),
            diesel_schema::project_stage_history::attribution.eq(attribution),
            diesel_schema::project_stage_history::transitioned_at.eq(transitioned_at),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        project_id = change.project_id,
        to = change.to.as_str(),
        "Appended project ledger row"
    );
    Ok(id)
}

/// Attaches document references to a project ledger row.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_stage_documents(
    conn: &mut SqliteConnection,
    history_id: i64,
    documents: &[DocumentRef],
) -> Result<(), PersistenceError> {
    for doc in documents {
        diesel::insert_into(diesel_schema::stage_documents::table)
            .values((
                diesel_schema::stage_documents::history_id.eq(history_id),
                diesel_schema::stage_documents::title.eq(&doc.title),
                diesel_schema::stage_documents::file_url.eq(&doc.file_url),
                diesel_schema::stage_documents::uploaded_by.eq(&doc.uploaded_by),
            ))
            .execute(conn)?;
    }
    Ok(())
}

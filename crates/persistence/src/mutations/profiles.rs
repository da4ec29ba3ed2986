// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::ProfileStage;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::data_models::current_timestamp;
use crate::diesel_schema;
use crate::error::PersistenceError;
use crate::queries;

/// Inserts a profile and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    full_name: &str,
    candidate_code: Option<&str>,
    stage: ProfileStage,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(diesel_schema::profiles::table)
        .values((
            diesel_schema::profiles::full_name.eq(full_name),
            diesel_schema::profiles::candidate_code.eq(candidate_code),
            diesel_schema::profiles::current_stage.eq(stage.as_str()),
            diesel_schema::profiles::created_at.eq(current_timestamp()),
        ))
        .execute(conn)?;

    let id: i64 = get_last_insert_rowid(conn)?;
    debug!(profile_id = id, stage = stage.as_str(), "Inserted profile");
    Ok(id)
}

/// Updates the cached stage of a profile.
///
/// Must be paired with a ledger append in the same transaction.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the profile does not exist.
pub fn update_profile_stage(
    conn: &mut SqliteConnection,
    profile_id: i64,
    stage: ProfileStage,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::profiles::table.filter(diesel_schema::profiles::id.eq(profile_id)),
    )
    .set(diesel_schema::profiles::current_stage.eq(stage.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Profile {profile_id}")));
    }
    debug!(profile_id, stage = stage.as_str(), "Updated profile stage");
    Ok(())
}

/// Records the worker code assigned to a profile by an external system.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the profile does not exist.
pub fn set_worker_code(
    conn: &mut SqliteConnection,
    profile_id: i64,
    worker_code: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::profiles::table.filter(diesel_schema::profiles::id.eq(profile_id)),
    )
    .set(diesel_schema::profiles::worker_code.eq(worker_code))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Profile {profile_id}")));
    }
    Ok(())
}

/// Soft-deletes a profile. It disappears from every query and operation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the profile does not exist.
pub fn soft_delete_profile(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        diesel_schema::profiles::table
            .filter(diesel_schema::profiles::id.eq(profile_id))
            .filter(diesel_schema::profiles::deleted_at.is_null()),
    )
    .set(diesel_schema::profiles::deleted_at.eq(current_timestamp()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Profile {profile_id}")));
    }
    info!(profile_id, "Soft-deleted profile");
    Ok(())
}

/// Recomputes a profile's cached stage from its ledger.
///
/// Repair path for a cache that has drifted from the ledger. Returns the
/// stage the cache now holds. A profile with an empty ledger is left
/// untouched.
///
/// # Errors
///
/// Returns an error if the profile does not exist or a ledger stage string
/// does not parse.
pub fn rebuild_profile_stage(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<ProfileStage, PersistenceError> {
    let current: ProfileStage = queries::profiles::get_profile(conn, profile_id)?.current_stage;

    let Some(latest) = queries::history::latest_profile_stage(conn, profile_id)? else {
        return Ok(current);
    };

    let stage: ProfileStage = ProfileStage::from_str(&latest)?;
    if stage != current {
        info!(
            profile_id,
            cached = current.as_str(),
            ledger = stage.as_str(),
            "Rebuilding drifted profile stage from ledger"
        );
        update_profile_stage(conn, profile_id, stage)?;
    }
    Ok(stage)
}

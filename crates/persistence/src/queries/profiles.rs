// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{ProfileRecord, ProfileRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Fetches a profile by ID. Soft-deleted profiles are invisible.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no live profile has this ID.
pub fn get_profile(conn: &mut SqliteConnection, id: i64) -> Result<ProfileRecord, PersistenceError> {
    let row: ProfileRow = diesel_schema::profiles::table
        .filter(diesel_schema::profiles::id.eq(id))
        .filter(diesel_schema::profiles::deleted_at.is_null())
        .first::<ProfileRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Profile {id}")))?;

    row.try_into()
}

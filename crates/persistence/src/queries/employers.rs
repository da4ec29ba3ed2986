// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{EmployerRecord, EmployerRow};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Fetches an employer by ID.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no employer has this ID.
pub fn get_employer(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<EmployerRecord, PersistenceError> {
    let row: EmployerRow = diesel_schema::employers::table
        .filter(diesel_schema::employers::id.eq(id))
        .first::<EmployerRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Employer {id}")))?;

    row.try_into()
}

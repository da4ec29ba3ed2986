// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence layer for Crewflow.
//!
//! This crate owns the schema, the typed row models, and the read/write
//! functions for profiles, projects, assignments, training batches,
//! employers, and the two append-only stage ledgers.
//!
//! ## Transaction model
//!
//! Engine operations compose the `queries::` and `mutations::` functions
//! inside a single `immediate_transaction` per operation. SQLite's write
//! lock serializes racing writers; the loser re-reads entity stages inside
//! its own transaction and fails validation if the precondition no longer
//! holds. No mutation in this crate appends ledger rows implicitly; the
//! engine pairs every stage-cache update with its ledger append.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases so they are fully
//! isolated and need no external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use crewflow_domain::ProfileStage;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub use diesel::SqliteConnection;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AssignmentRecord, BatchRecord, EmployerRecord, EnrollmentRecord, ProfileHistoryRecord,
    ProfileRecord, ProjectHistoryRecord, ProjectRecord, StageDocumentRecord, current_timestamp,
    format_date, parse_date,
};
pub use error::PersistenceError;
pub use mutations::projects::NewProject;

/// Persistence adapter owning a `SQLite` connection.
///
/// Construction decides between an in-memory database (tests, scratch runs)
/// and a WAL-mode file database (deployments).
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter backed by an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a file database with WAL
    /// mode enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let url: String = path
            .as_ref()
            .to_str()
            .ok_or_else(|| {
                PersistenceError::InitializationError(String::from(
                    "Database path is not valid UTF-8",
                ))
            })?
            .to_string();

        let mut conn: SqliteConnection = backend::initialize_database(&url)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Borrows the underlying connection for direct query composition.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Runs a closure inside a `SQLite` IMMEDIATE transaction.
    ///
    /// The write lock is taken up front, so two racing operations serialize
    /// here rather than deadlocking on lock upgrade. Any error from the
    /// closure rolls back every mutation and ledger append made inside it.
    ///
    /// The closure's error type only needs `From<PersistenceError>`; raw
    /// Diesel errors are adapted internally and never leak to callers.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or the transaction machinery's failure
    /// converted through `PersistenceError`.
    pub fn immediate_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        E: From<PersistenceError>,
        F: FnOnce(&mut SqliteConnection) -> Result<T, E>,
    {
        enum TxWrap<E> {
            Inner(E),
            Db(diesel::result::Error),
        }

        impl<E> From<diesel::result::Error> for TxWrap<E> {
            fn from(err: diesel::result::Error) -> Self {
                Self::Db(err)
            }
        }

        let result: Result<T, TxWrap<E>> = self
            .conn
            .immediate_transaction(|conn| f(conn).map_err(TxWrap::Inner));

        match result {
            Ok(value) => Ok(value),
            Err(TxWrap::Inner(err)) => Err(err),
            Err(TxWrap::Db(err)) => Err(E::from(PersistenceError::from(err))),
        }
    }

    /// Fetches a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no live profile has this ID.
    pub fn get_profile(&mut self, id: i64) -> Result<ProfileRecord, PersistenceError> {
        queries::profiles::get_profile(&mut self.conn, id)
    }

    /// Fetches a project by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no live project has this ID.
    pub fn get_project(&mut self, id: i64) -> Result<ProjectRecord, PersistenceError> {
        queries::projects::get_project(&mut self.conn, id)
    }

    /// Fetches an assignment by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no assignment has this ID.
    pub fn get_assignment(&mut self, id: i64) -> Result<AssignmentRecord, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, id)
    }

    /// Fetches a training batch by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no batch has this ID.
    pub fn get_batch(&mut self, id: i64) -> Result<BatchRecord, PersistenceError> {
        queries::training::get_batch(&mut self.conn, id)
    }

    /// Fetches an employer by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no employer has this ID.
    pub fn get_employer(&mut self, id: i64) -> Result<EmployerRecord, PersistenceError> {
        queries::employers::get_employer(&mut self.conn, id)
    }

    /// Lists a profile's stage ledger in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn profile_stage_history(
        &mut self,
        profile_id: i64,
    ) -> Result<Vec<ProfileHistoryRecord>, PersistenceError> {
        queries::history::profile_stage_history(&mut self.conn, profile_id)
    }

    /// Lists a project's stage ledger in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn project_stage_history(
        &mut self,
        project_id: i64,
    ) -> Result<Vec<ProjectHistoryRecord>, PersistenceError> {
        queries::history::project_stage_history(&mut self.conn, project_id)
    }

    /// Recomputes a profile's cached stage from its ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or a ledger stage
    /// string does not parse.
    pub fn rebuild_profile_stage(
        &mut self,
        profile_id: i64,
    ) -> Result<ProfileStage, PersistenceError> {
        self.immediate_transaction(|conn| {
            mutations::profiles::rebuild_profile_stage(conn, profile_id)
        })
    }
}

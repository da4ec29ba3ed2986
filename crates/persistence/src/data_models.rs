// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed records returned by queries, plus the raw Diesel row structs they
//! are parsed from.
//!
//! Stage columns are stored as text and parsed into the domain enums on the
//! way out, so a corrupt stage string surfaces as a
//! `PersistenceError::SerializationError` instead of propagating silently.

use crewflow_domain::{
    AssignmentStage, BatchStatus, EmployerStatus, EnrollmentStatus, HoldAttribution, ProfileStage,
    ProjectStage,
};
use diesel::prelude::*;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::PersistenceError;

/// Storage format for date columns.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored date column.
///
/// # Errors
///
/// Returns an error if the string is not a valid ISO-8601 date.
pub fn parse_date(s: &str) -> Result<Date, PersistenceError> {
    Date::parse(s, &DATE_FORMAT).map_err(|e| {
        PersistenceError::SerializationError(format!("Invalid date '{s}': {e}"))
    })
}

/// Current UTC time formatted for timestamp columns.
///
/// Fixed-width, second precision, so lexicographic order on the column is
/// chronological order.
#[must_use]
pub fn current_timestamp() -> String {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

fn parse_opt_date(value: Option<String>) -> Result<Option<Date>, PersistenceError> {
    value.as_deref().map(parse_date).transpose()
}

/// An employer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerRecord {
    pub id: i64,
    pub name: String,
    pub status: EmployerStatus,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct EmployerRow {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<EmployerRow> for EmployerRecord {
    type Error = PersistenceError;

    fn try_from(row: EmployerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            status: EmployerStatus::from_str(&row.status)?,
            created_at: row.created_at,
        })
    }
}

/// A profile row. Soft-deleted profiles are filtered out by every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: i64,
    pub full_name: String,
    pub candidate_code: Option<String>,
    pub worker_code: Option<String>,
    pub current_stage: ProfileStage,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub full_name: String,
    pub candidate_code: Option<String>,
    pub worker_code: Option<String>,
    pub current_stage: String,
    pub created_at: String,
    pub deleted_at: Option<String>,
}

impl TryFrom<ProfileRow> for ProfileRecord {
    type Error = PersistenceError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            full_name: row.full_name,
            candidate_code: row.candidate_code,
            worker_code: row.worker_code,
            current_stage: ProfileStage::from_str(&row.current_stage)?,
            created_at: row.created_at,
        })
    }
}

/// A project row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: i64,
    pub project_code: String,
    pub employer_id: i64,
    pub name: String,
    pub stage: ProjectStage,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub actual_start_date: Option<Date>,
    pub actual_end_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub termination_date: Option<Date>,
    pub on_hold_attribution: Option<HoldAttribution>,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct ProjectRow {
    pub id: i64,
    pub project_code: String,
    pub employer_id: i64,
    pub name: String,
    pub stage: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub actual_start_date: Option<String>,
    pub actual_end_date: Option<String>,
    pub completion_date: Option<String>,
    pub termination_date: Option<String>,
    pub on_hold_attribution: Option<String>,
    pub created_at: String,
    pub deleted_at: Option<String>,
}

impl TryFrom<ProjectRow> for ProjectRecord {
    type Error = PersistenceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let attribution: Option<HoldAttribution> = row
            .on_hold_attribution
            .as_deref()
            .map(HoldAttribution::from_str)
            .transpose()?;
        Ok(Self {
            id: row.id,
            project_code: row.project_code,
            employer_id: row.employer_id,
            name: row.name,
            stage: ProjectStage::from_str(&row.stage)?,
            start_date: parse_opt_date(row.start_date)?,
            end_date: parse_opt_date(row.end_date)?,
            actual_start_date: parse_opt_date(row.actual_start_date)?,
            actual_end_date: parse_opt_date(row.actual_end_date)?,
            completion_date: parse_opt_date(row.completion_date)?,
            termination_date: parse_opt_date(row.termination_date)?,
            on_hold_attribution: attribution,
            created_at: row.created_at,
        })
    }
}

/// An assignment row linking a profile to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub id: i64,
    pub project_id: i64,
    pub profile_id: i64,
    pub stage: AssignmentStage,
    pub deployed_at: Option<String>,
    pub removed_at: Option<String>,
    pub removal_reason: Option<String>,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct AssignmentRow {
    pub id: i64,
    pub project_id: i64,
    pub profile_id: i64,
    pub stage: String,
    pub deployed_at: Option<String>,
    pub removed_at: Option<String>,
    pub removal_reason: Option<String>,
    pub created_at: String,
}

impl TryFrom<AssignmentRow> for AssignmentRecord {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            profile_id: row.profile_id,
            stage: AssignmentStage::from_str(&row.stage)?,
            deployed_at: row.deployed_at,
            removed_at: row.removed_at,
            removal_reason: row.removal_reason,
            created_at: row.created_at,
        })
    }
}

/// A row from the profile stage ledger.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct ProfileHistoryRecord {
    pub id: i64,
    pub profile_id: i64,
    pub from_stage: Option<String>,
    pub to_stage: String,
    pub actor_id: String,
    pub actor_type: String,
    pub reason: Option<String>,
    pub project_id: Option<i64>,
    pub transitioned_at: String,
}

/// A row from the project stage ledger.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct ProjectHistoryRecord {
    pub id: i64,
    pub project_id: i64,
    pub from_stage: Option<String>,
    pub to_stage: String,
    pub actor_id: String,
    pub actor_type: String,
    pub reason: Option<String>,
    pub attribution: Option<String>,
    pub transitioned_at: String,
}

/// A document reference attached to a project ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct StageDocumentRecord {
    pub id: i64,
    pub history_id: i64,
    pub title: String,
    pub file_url: String,
    pub uploaded_by: Option<String>,
}

/// A training batch row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecord {
    pub id: i64,
    pub batch_code: String,
    pub program_name: String,
    pub status: BatchStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct BatchRow {
    pub id: i64,
    pub batch_code: String,
    pub program_name: String,
    pub status: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: String,
}

impl TryFrom<BatchRow> for BatchRecord {
    type Error = PersistenceError;

    fn try_from(row: BatchRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            batch_code: row.batch_code,
            program_name: row.program_name,
            status: BatchStatus::from_str(&row.status)?,
            start_date: parse_opt_date(row.start_date)?,
            end_date: parse_opt_date(row.end_date)?,
            created_at: row.created_at,
        })
    }
}

/// A batch enrollment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub batch_id: i64,
    pub profile_id: i64,
    pub status: EnrollmentStatus,
    pub completion_date: Option<Date>,
    pub created_at: String,
}

#[derive(Queryable)]
pub(crate) struct EnrollmentRow {
    pub id: i64,
    pub batch_id: i64,
    pub profile_id: i64,
    pub status: String,
    pub completion_date: Option<String>,
    pub created_at: String,
}

impl TryFrom<EnrollmentRow> for EnrollmentRecord {
    type Error = PersistenceError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            batch_id: row.batch_id,
            profile_id: row.profile_id,
            status: EnrollmentStatus::from_str(&row.status)?,
            completion_date: parse_opt_date(row.completion_date)?,
            created_at: row.created_at,
        })
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Training batch and enrollment transitions.
//!
//! Batch start/complete fan out to every enrolled profile, in the same
//! transaction, the way project operations fan out to workers. Batch
//! operations are also invoked by the scheduler's sweeps.

use crewflow_domain::{
    BatchStatus, EnrollmentStatus, ProfileStage, ensure_batch_transition,
    ensure_enrollment_transition, ensure_profile_transition,
};
use crewflow_history::{Actor, ProfileStageChange};
use crewflow_persistence::{
    BatchRecord, Persistence, SqliteConnection, current_timestamp, mutations, queries,
};
use time::Date;
use tracing::info;

use crate::error::{EngineError, entity_not_found, translate_domain_error};
use crate::requests::BatchTransitionResponse;

fn load_batch(conn: &mut SqliteConnection, batch_id: i64) -> Result<BatchRecord, EngineError> {
    queries::training::get_batch(conn, batch_id)
        .map_err(entity_not_found("Training batch", batch_id))
}

/// Moves a trainee's profile as part of a batch fan-out. Skips profiles
/// already in the target stage; no ledger row is written for a skip.
fn move_trainee(
    conn: &mut SqliteConnection,
    profile_id: i64,
    to: ProfileStage,
    actor: &Actor,
    reason: Option<String>,
    now: &str,
) -> Result<bool, EngineError> {
    let profile = queries::profiles::get_profile(conn, profile_id)?;
    if profile.current_stage == to {
        return Ok(false);
    }
    mutations::profiles::update_profile_stage(conn, profile_id, to)?;
    let change = ProfileStageChange::new(
        profile_id,
        Some(profile.current_stage),
        to,
        actor.clone(),
        reason,
        None,
    );
    mutations::history::append_profile_change(conn, &change, now)?;
    Ok(true)
}

/// Enrolls a profile in a scheduled batch.
///
/// The profile moves to `TrainingScheduled` through the validator, so only
/// `Approved`, `Trained`, and `Benched` profiles can enroll. Returns the
/// enrollment ID.
///
/// # Errors
///
/// Returns an error if either entity is missing, the batch is not open for
/// enrollment, or the profile cannot move to `TrainingScheduled`.
pub fn enroll_in_batch(
    persistence: &mut Persistence,
    batch_id: i64,
    profile_id: i64,
    actor: &Actor,
) -> Result<i64, EngineError> {
    persistence.immediate_transaction(|conn| {
        let batch = load_batch(conn, batch_id)?;
        if batch.status != BatchStatus::Scheduled {
            return Err(EngineError::Precondition(format!(
                "Training batch {batch_id} is not open for enrollment"
            )));
        }
        let profile = queries::profiles::get_profile(conn, profile_id)
            .map_err(entity_not_found("Profile", profile_id))?;
        ensure_profile_transition(profile.current_stage, ProfileStage::TrainingScheduled)
            .map_err(|err| translate_domain_error("Profile", err))?;
        let now: String = current_timestamp();

        let enrollment_id: i64 =
            mutations::training::insert_enrollment(conn, batch_id, profile_id)?;
        mutations::profiles::update_profile_stage(
            conn,
            profile_id,
            ProfileStage::TrainingScheduled,
        )?;
        let change = ProfileStageChange::new(
            profile_id,
            Some(profile.current_stage),
            ProfileStage::TrainingScheduled,
            actor.clone(),
            None,
            None,
        );
        mutations::history::append_profile_change(conn, &change, &now)?;

        info!(batch_id, profile_id, enrollment_id, "Profile enrolled");
        Ok(enrollment_id)
    })
}

/// Completes one trainee's enrollment.
///
/// The enrollment closes with its completion date and the profile moves to
/// `Trained`.
///
/// # Errors
///
/// Returns an error if the enrollment is missing, already closed, or the
/// profile cannot move to `Trained`.
pub fn complete_training(
    persistence: &mut Persistence,
    enrollment_id: i64,
    completion_date: Date,
    actor: &Actor,
) -> Result<(), EngineError> {
    persistence.immediate_transaction(|conn| {
        let enrollment = queries::training::get_enrollment(conn, enrollment_id)
            .map_err(entity_not_found("Enrollment", enrollment_id))?;
        ensure_enrollment_transition(enrollment.status, EnrollmentStatus::Completed)
            .map_err(|err| translate_domain_error("Enrollment", err))?;
        let profile = queries::profiles::get_profile(conn, enrollment.profile_id)?;
        ensure_profile_transition(profile.current_stage, ProfileStage::Trained)
            .map_err(|err| translate_domain_error("Profile", err))?;
        let now: String = current_timestamp();

        mutations::training::update_enrollment_status(
            conn,
            enrollment_id,
            EnrollmentStatus::Completed,
            Some(completion_date),
        )?;
        move_trainee(
            conn,
            enrollment.profile_id,
            ProfileStage::Trained,
            actor,
            None,
            &now,
        )?;

        info!(enrollment_id, profile_id = enrollment.profile_id, "Training completed");
        Ok(())
    })
}

/// Drops one trainee out of a batch.
///
/// The enrollment closes as `Dropped` and the profile returns to `Approved`.
///
/// # Errors
///
/// Returns an error if the enrollment is missing, already closed, or the
/// profile cannot return to `Approved`.
pub fn drop_training(
    persistence: &mut Persistence,
    enrollment_id: i64,
    reason: Option<String>,
    actor: &Actor,
) -> Result<(), EngineError> {
    persistence.immediate_transaction(|conn| {
        let enrollment = queries::training::get_enrollment(conn, enrollment_id)
            .map_err(entity_not_found("Enrollment", enrollment_id))?;
        ensure_enrollment_transition(enrollment.status, EnrollmentStatus::Dropped)
            .map_err(|err| translate_domain_error("Enrollment", err))?;
        let profile = queries::profiles::get_profile(conn, enrollment.profile_id)?;
        ensure_profile_transition(profile.current_stage, ProfileStage::Approved)
            .map_err(|err| translate_domain_error("Profile", err))?;
        let now: String = current_timestamp();

        mutations::training::update_enrollment_status(
            conn,
            enrollment_id,
            EnrollmentStatus::Dropped,
            None,
        )?;
        move_trainee(
            conn,
            enrollment.profile_id,
            ProfileStage::Approved,
            actor,
            reason,
            &now,
        )?;

        info!(enrollment_id, profile_id = enrollment.profile_id, "Training dropped");
        Ok(())
    })
}

/// Starts a scheduled batch.
///
/// Every enrolled profile moves to `InTraining`. The scheduler invokes this
/// for batches past their start date.
///
/// # Errors
///
/// Returns an error if the batch is missing or not `Scheduled`.
pub fn start_batch(
    persistence: &mut Persistence,
    batch_id: i64,
    actor: &Actor,
) -> Result<BatchTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let batch = load_batch(conn, batch_id)?;
        ensure_batch_transition(batch.status, BatchStatus::Ongoing)
            .map_err(|err| translate_domain_error("Training batch", err))?;
        let now: String = current_timestamp();

        mutations::training::update_batch_status(conn, batch_id, BatchStatus::Ongoing)?;

        let enrolled = queries::training::enrollments_for_batch(
            conn,
            batch_id,
            EnrollmentStatus::Enrolled,
        )?;
        let mut affected_trainees: usize = 0;
        for enrollment in &enrolled {
            if move_trainee(
                conn,
                enrollment.profile_id,
                ProfileStage::InTraining,
                actor,
                None,
                &now,
            )? {
                affected_trainees += 1;
            }
        }

        info!(batch_id, affected_trainees, "Training batch started");
        Ok(BatchTransitionResponse {
            batch_id,
            from: batch.status,
            to: BatchStatus::Ongoing,
            affected_trainees,
        })
    })
}

/// Completes an ongoing batch.
///
/// Every still-enrolled trainee graduates: the enrollment closes as
/// `Completed` with the given date and the profile moves to `Trained`. The
/// scheduler invokes this for batches past their end date.
///
/// # Errors
///
/// Returns an error if the batch is missing or not `Ongoing`.
pub fn complete_batch(
    persistence: &mut Persistence,
    batch_id: i64,
    completion_date: Date,
    actor: &Actor,
) -> Result<BatchTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let batch = load_batch(conn, batch_id)?;
        ensure_batch_transition(batch.status, BatchStatus::Completed)
            .map_err(|err| translate_domain_error("Training batch", err))?;
        let now: String = current_timestamp();

        mutations::training::update_batch_status(conn, batch_id, BatchStatus::Completed)?;

        let enrolled = queries::training::enrollments_for_batch(
            conn,
            batch_id,
            EnrollmentStatus::Enrolled,
        )?;
        let mut affected_trainees: usize = 0;
        for enrollment in &enrolled {
            mutations::training::update_enrollment_status(
                conn,
                enrollment.id,
                EnrollmentStatus::Completed,
                Some(completion_date),
            )?;
            if move_trainee(
                conn,
                enrollment.profile_id,
                ProfileStage::Trained,
                actor,
                None,
                &now,
            )? {
                affected_trainees += 1;
            }
        }

        info!(batch_id, affected_trainees, "Training batch completed");
        Ok(BatchTransitionResponse {
            batch_id,
            from: batch.status,
            to: BatchStatus::Completed,
            affected_trainees,
        })
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate pipeline transitions.
//!
//! Single-profile operations: registration, screening, and the
//! approve/reject verdict. Approve and reject hand an event to the
//! notification dispatcher after the transaction commits.

use crewflow_domain::{ProfileStage, ensure_profile_transition};
use crewflow_history::{Actor, ProfileStageChange};
use crewflow_persistence::{Persistence, current_timestamp, mutations, queries};
use tracing::info;

use crate::error::{EngineError, entity_not_found, translate_domain_error};
use crate::notify::{NotificationDispatcher, NotificationEvent, dispatch_logged};
use crate::requests::ProfileTransitionResponse;

/// Registers a new candidate.
///
/// Creates the profile at `NewRegistration` together with the first row of
/// its stage ledger.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn register_candidate(
    persistence: &mut Persistence,
    full_name: &str,
    candidate_code: Option<&str>,
    actor: &Actor,
) -> Result<ProfileTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let now: String = current_timestamp();
        let profile_id: i64 = mutations::profiles::insert_profile(
            conn,
            full_name,
            candidate_code,
            ProfileStage::NewRegistration,
        )?;
        let change = ProfileStageChange::new(
            profile_id,
            None,
            ProfileStage::NewRegistration,
            actor.clone(),
            None,
            None,
        );
        let history_id: i64 = mutations::history::append_profile_change(conn, &change, &now)?;

        info!(profile_id, "Candidate registered");
        Ok(ProfileTransitionResponse {
            profile_id,
            from: None,
            to: ProfileStage::NewRegistration,
            history_id,
        })
    })
}

fn transition_profile(
    persistence: &mut Persistence,
    profile_id: i64,
    to: ProfileStage,
    reason: Option<String>,
    actor: &Actor,
) -> Result<ProfileTransitionResponse, EngineError> {
    persistence.immediate_transaction(|conn| {
        let profile = queries::profiles::get_profile(conn, profile_id)
            .map_err(entity_not_found("Profile", profile_id))?;
        ensure_profile_transition(profile.current_stage, to)
            .map_err(|err| translate_domain_error("Profile", err))?;
        let now: String = current_timestamp();

        mutations::profiles::update_profile_stage(conn, profile_id, to)?;
        let change = ProfileStageChange::new(
            profile_id,
            Some(profile.current_stage),
            to,
            actor.clone(),
            reason,
            None,
        );
        let history_id: i64 = mutations::history::append_profile_change(conn, &change, &now)?;

        info!(
            profile_id,
            from = profile.current_stage.as_str(),
            to = to.as_str(),
            "Profile stage changed"
        );
        Ok(ProfileTransitionResponse {
            profile_id,
            from: Some(profile.current_stage),
            to,
            history_id,
        })
    })
}

/// Takes a newly registered candidate into screening.
///
/// # Errors
///
/// Returns an error if the profile is missing or not `NewRegistration`.
pub fn begin_screening(
    persistence: &mut Persistence,
    profile_id: i64,
    actor: &Actor,
) -> Result<ProfileTransitionResponse, EngineError> {
    transition_profile(persistence, profile_id, ProfileStage::Screening, None, actor)
}

/// Approves a screened candidate and notifies the dispatcher.
///
/// # Errors
///
/// Returns an error if the profile is missing or not `Screening`. A
/// dispatcher failure is logged, not returned.
pub fn approve_candidate(
    persistence: &mut Persistence,
    profile_id: i64,
    actor: &Actor,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<ProfileTransitionResponse, EngineError> {
    let response =
        transition_profile(persistence, profile_id, ProfileStage::Approved, None, actor)?;
    dispatch_logged(dispatcher, &NotificationEvent::CandidateApproved { profile_id });
    Ok(response)
}

/// Rejects a screened candidate and notifies the dispatcher.
///
/// `Rejected` is terminal; the profile never transitions again.
///
/// # Errors
///
/// Returns an error if the profile is missing or not `Screening`. A
/// dispatcher failure is logged, not returned.
pub fn reject_candidate(
    persistence: &mut Persistence,
    profile_id: i64,
    reason: Option<String>,
    actor: &Actor,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<ProfileTransitionResponse, EngineError> {
    let response = transition_profile(
        persistence,
        profile_id,
        ProfileStage::Rejected,
        reason.clone(),
        actor,
    )?;
    dispatch_logged(
        dispatcher,
        &NotificationEvent::CandidateRejected { profile_id, reason },
    );
    Ok(response)
}

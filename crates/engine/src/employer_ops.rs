// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employer verification transitions.
//!
//! Single-entity status changes with a notification hook. Employers carry
//! no stage ledger.

use crewflow_domain::{EmployerStatus, ensure_employer_transition};
use crewflow_persistence::{Persistence, mutations, queries};
use tracing::info;

use crate::error::{EngineError, entity_not_found, translate_domain_error};
use crate::notify::{NotificationDispatcher, NotificationEvent, dispatch_logged};

fn transition_employer(
    persistence: &mut Persistence,
    employer_id: i64,
    to: EmployerStatus,
) -> Result<(), EngineError> {
    persistence.immediate_transaction(|conn| {
        let employer = queries::employers::get_employer(conn, employer_id)
            .map_err(entity_not_found("Employer", employer_id))?;
        ensure_employer_transition(employer.status, to)
            .map_err(|err| translate_domain_error("Employer", err))?;
        mutations::employers::update_employer_status(conn, employer_id, to)?;

        info!(employer_id, status = to.as_str(), "Employer status changed");
        Ok(())
    })
}

/// Verifies a newly registered employer and notifies the dispatcher.
///
/// # Errors
///
/// Returns an error if the employer is missing or not `New`. A dispatcher
/// failure is logged, not returned.
pub fn verify_employer(
    persistence: &mut Persistence,
    employer_id: i64,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<(), EngineError> {
    transition_employer(persistence, employer_id, EmployerStatus::Verified)?;
    dispatch_logged(dispatcher, &NotificationEvent::EmployerVerified { employer_id });
    Ok(())
}

/// Rejects a newly registered employer and notifies the dispatcher.
///
/// # Errors
///
/// Returns an error if the employer is missing or not `New`. A dispatcher
/// failure is logged, not returned.
pub fn reject_employer(
    persistence: &mut Persistence,
    employer_id: i64,
    reason: Option<String>,
    dispatcher: &dyn NotificationDispatcher,
) -> Result<(), EngineError> {
    transition_employer(persistence, employer_id, EmployerStatus::Rejected)?;
    dispatch_logged(
        dispatcher,
        &NotificationEvent::EmployerRejected { employer_id, reason },
    );
    Ok(())
}

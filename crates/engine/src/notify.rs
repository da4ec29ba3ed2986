// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification boundary.
//!
//! Delivery lives outside this repository. Operations that notify hand a
//! finished event to the dispatcher after their transaction commits; a
//! delivery failure is logged and never rolls the transition back.

use serde::Serialize;
use tracing::warn;

/// A transition the outside world may want to hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NotificationEvent {
    CandidateApproved {
        profile_id: i64,
    },
    CandidateRejected {
        profile_id: i64,
        reason: Option<String>,
    },
    EmployerVerified {
        employer_id: i64,
    },
    EmployerRejected {
        employer_id: i64,
        reason: Option<String>,
    },
}

/// Delivery seam implemented by the embedding application.
pub trait NotificationDispatcher {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of the delivery failure.
    fn dispatch(&self, event: &NotificationEvent) -> Result<(), String>;
}

/// Dispatcher that drops every event. Used by the scheduler and by tests
/// that do not care about notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDispatcher;

impl NotificationDispatcher for NullDispatcher {
    fn dispatch(&self, _event: &NotificationEvent) -> Result<(), String> {
        Ok(())
    }
}

/// Sends an event and logs a failed delivery.
pub(crate) fn dispatch_logged(dispatcher: &dyn NotificationDispatcher, event: &NotificationEvent) {
    if let Err(reason) = dispatcher.dispatch(event) {
        warn!(?event, reason, "Notification delivery failed");
    }
}

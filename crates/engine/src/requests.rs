// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request context and structured responses for engine operations.

use crewflow_domain::{BatchStatus, ProfileStage, ProjectStage};
use crewflow_history::DocumentRef;
use serde::Serialize;

/// Caller-supplied context shared by project transition operations.
///
/// `documents` are recorded against the ledger row the operation creates.
/// `require_documents` upgrades the advisory document rule to a hard
/// precondition for stages that call for closing paperwork.
#[derive(Debug, Clone, Default)]
pub struct TransitionRequest {
    pub reason: Option<String>,
    pub documents: Vec<DocumentRef>,
    pub require_documents: bool,
}

impl TransitionRequest {
    /// A request with a reason and nothing else.
    #[must_use]
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// Outcome of a project stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTransitionResponse {
    pub project_id: i64,
    pub from: ProjectStage,
    pub to: ProjectStage,
    /// Workers whose profile stage this operation changed. Each contributed
    /// one row to the profile ledger.
    pub affected_workers: usize,
    /// The project ledger row this operation appended.
    pub history_id: i64,
}

/// Outcome of a single-profile stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileTransitionResponse {
    pub profile_id: i64,
    pub from: Option<ProfileStage>,
    pub to: ProfileStage,
    pub history_id: i64,
}

/// Outcome of a training batch transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchTransitionResponse {
    pub batch_id: i64,
    pub from: BatchStatus,
    pub to: BatchStatus,
    /// Enrolled profiles whose stage moved with the batch.
    pub affected_trainees: usize,
}

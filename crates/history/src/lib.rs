// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Record types for the append-only stage ledgers.
//!
//! Every successful stage transition produces exactly one ledger record for
//! the entity that changed. Records are immutable once created and capture
//! who initiated the change, the stage pair, and why.

use crewflow_domain::{HoldAttribution, ProfileStage, ProjectStage};
use serde::{Deserialize, Serialize};

/// Identifier the scheduler writes into ledger rows it creates.
pub const SCHEDULER_ACTOR_ID: &str = "scheduler";

/// Represents the entity initiating a stage transition.
///
/// An actor is any identifiable entity that initiates a state change:
/// an operator acting on a request, or the scheduler acting on the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates the system actor used by scheduled sweeps.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SCHEDULER_ACTOR_ID.to_string(), String::from("system"))
    }

    /// Creates an operator actor from an operator identifier.
    #[must_use]
    pub fn operator(id: impl Into<String>) -> Self {
        Self::new(id.into(), String::from("operator"))
    }
}

/// A supporting document attached to a project ledger record.
///
/// Storage of the file itself is external. The ledger keeps only the
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Human-readable document title.
    pub title: String,
    /// Location of the stored file.
    pub file_url: String,
    /// Identifier of whoever uploaded the file, if known.
    pub uploaded_by: Option<String>,
}

impl DocumentRef {
    /// Creates a new `DocumentRef`.
    #[must_use]
    pub const fn new(title: String, file_url: String, uploaded_by: Option<String>) -> Self {
        Self {
            title,
            file_url,
            uploaded_by,
        }
    }
}

/// An immutable record of a profile stage transition.
///
/// `from` is `None` only for the first record of a profile's ledger.
/// `project_id` names the project that drove the change, when one did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStageChange {
    /// The profile that changed.
    pub profile_id: i64,
    /// The stage before the transition.
    pub from: Option<ProfileStage>,
    /// The stage after the transition.
    pub to: ProfileStage,
    /// Who initiated the transition.
    pub actor: Actor,
    /// Free-text reason for the transition.
    pub reason: Option<String>,
    /// The project whose operation drove this change, if any.
    pub project_id: Option<i64>,
}

impl ProfileStageChange {
    /// Creates a new `ProfileStageChange`.
    #[must_use]
    pub const fn new(
        profile_id: i64,
        from: Option<ProfileStage>,
        to: ProfileStage,
        actor: Actor,
        reason: Option<String>,
        project_id: Option<i64>,
    ) -> Self {
        Self {
            profile_id,
            from,
            to,
            actor,
            reason,
            project_id,
        }
    }
}

/// An immutable record of a project stage transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStageChange {
    /// The project that changed.
    pub project_id: i64,
    /// The stage before the transition.
    pub from: Option<ProjectStage>,
    /// The stage after the transition.
    pub to: ProjectStage,
    /// Who initiated the transition.
    pub actor: Actor,
    /// Free-text reason for the transition.
    pub reason: Option<String>,
    /// The hold attribution, for transitions into `OnHold`.
    pub attribution: Option<HoldAttribution>,
}

impl ProjectStageChange {
    /// Creates a new `ProjectStageChange`.
    #[must_use]
    pub const fn new(
        project_id: i64,
        from: Option<ProjectStage>,
        to: ProjectStage,
        actor: Actor,
        reason: Option<String>,
        attribution: Option<HoldAttribution>,
    ) -> Self {
        Self {
            project_id,
            from,
            to,
            actor,
            reason,
            attribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("op-7"), String::from("operator"));

        assert_eq!(actor.id, "op-7");
        assert_eq!(actor.actor_type, "operator");
    }

    #[test]
    fn test_system_actor_identifies_scheduler() {
        let actor: Actor = Actor::system();

        assert_eq!(actor.id, SCHEDULER_ACTOR_ID);
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_operator_actor_type() {
        let actor: Actor = Actor::operator("op-12");

        assert_eq!(actor.id, "op-12");
        assert_eq!(actor.actor_type, "operator");
    }

    #[test]
    fn test_document_ref_creation() {
        let doc: DocumentRef = DocumentRef::new(
            String::from("Completion certificate"),
            String::from("s3://docs/cert.pdf"),
            Some(String::from("op-7")),
        );

        assert_eq!(doc.title, "Completion certificate");
        assert_eq!(doc.file_url, "s3://docs/cert.pdf");
        assert_eq!(doc.uploaded_by, Some(String::from("op-7")));
    }

    #[test]
    fn test_profile_change_first_record_has_no_from_stage() {
        let change: ProfileStageChange = ProfileStageChange::new(
            42,
            None,
            ProfileStage::NewRegistration,
            Actor::system(),
            None,
            None,
        );

        assert_eq!(change.profile_id, 42);
        assert_eq!(change.from, None);
        assert_eq!(change.to, ProfileStage::NewRegistration);
    }

    #[test]
    fn test_project_change_carries_attribution() {
        let change: ProjectStageChange = ProjectStageChange::new(
            9,
            Some(ProjectStage::Ongoing),
            ProjectStage::OnHold,
            Actor::operator("op-1"),
            Some(String::from("Monsoon flooding")),
            Some(HoldAttribution::ForceMajeure),
        );

        assert_eq!(change.from, Some(ProjectStage::Ongoing));
        assert_eq!(change.to, ProjectStage::OnHold);
        assert_eq!(change.attribution, Some(HoldAttribution::ForceMajeure));
    }

    #[test]
    fn test_change_records_are_comparable() {
        let a: ProfileStageChange = ProfileStageChange::new(
            1,
            Some(ProfileStage::Screening),
            ProfileStage::Approved,
            Actor::operator("op-1"),
            None,
            None,
        );
        let b: ProfileStageChange = a.clone();

        assert_eq!(a, b);
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::stages::{AssignmentStage, BatchStatus, ProfileStage, ProjectStage};
use crate::validation::{
    ensure_assignment_transition, ensure_batch_transition, ensure_profile_transition,
    ensure_project_transition,
};

#[test]
fn test_valid_project_transition_passes() {
    assert!(ensure_project_transition(ProjectStage::Shared, ProjectStage::Ongoing).is_ok());
}

#[test]
fn test_invalid_project_transition_names_both_stages() {
    let err = ensure_project_transition(ProjectStage::Planning, ProjectStage::Ongoing)
        .unwrap_err();
    match err {
        DomainError::InvalidTransition { entity, from, to } => {
            assert_eq!(entity, "project");
            assert_eq!(from, "Planning");
            assert_eq!(to, "Ongoing");
        }
        other => panic!("Expected InvalidTransition, got {other:?}"),
    }
}

#[test]
fn test_terminal_project_reported_as_terminal_not_invalid() {
    let err = ensure_project_transition(ProjectStage::Completed, ProjectStage::Ongoing)
        .unwrap_err();
    match err {
        DomainError::TerminalStage { entity, stage } => {
            assert_eq!(entity, "project");
            assert_eq!(stage, "Completed");
        }
        other => panic!("Expected TerminalStage, got {other:?}"),
    }
}

#[test]
fn test_rejected_profile_is_terminal() {
    let err =
        ensure_profile_transition(ProfileStage::Rejected, ProfileStage::Screening).unwrap_err();
    assert!(matches!(err, DomainError::TerminalStage { .. }));
}

#[test]
fn test_profile_screening_outcomes() {
    assert!(ensure_profile_transition(ProfileStage::Screening, ProfileStage::Approved).is_ok());
    assert!(ensure_profile_transition(ProfileStage::Screening, ProfileStage::Rejected).is_ok());
    assert!(
        ensure_profile_transition(ProfileStage::Screening, ProfileStage::OnSite).is_err()
    );
}

#[test]
fn test_completed_assignment_cannot_be_reopened() {
    let err = ensure_assignment_transition(AssignmentStage::Completed, AssignmentStage::OnSite)
        .unwrap_err();
    assert!(matches!(err, DomainError::TerminalStage { .. }));
}

#[test]
fn test_cancelled_batch_cannot_start() {
    let err = ensure_batch_transition(BatchStatus::Cancelled, BatchStatus::Ongoing).unwrap_err();
    assert!(matches!(err, DomainError::TerminalStage { .. }));
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition validation.
//!
//! These functions gate every manual and scheduled operation. A terminal
//! current stage is reported distinctly from an edge that is merely absent
//! from the adjacency table, so callers can surface the difference.

use crate::error::DomainError;
use crate::stages::{
    AssignmentStage, BatchStatus, EmployerStatus, EnrollmentStatus, ProfileStage, ProjectStage,
};

/// Validates a project stage transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_project_transition(from: ProjectStage, to: ProjectStage) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "project",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "project",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

/// Validates a profile stage transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_profile_transition(from: ProfileStage, to: ProfileStage) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "profile",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "profile",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

/// Validates an assignment stage transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_assignment_transition(
    from: AssignmentStage,
    to: AssignmentStage,
) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "assignment",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "assignment",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

/// Validates a training batch status transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_batch_transition(from: BatchStatus, to: BatchStatus) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "training batch",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "training batch",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

/// Validates an enrollment status transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_enrollment_transition(
    from: EnrollmentStatus,
    to: EnrollmentStatus,
) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "enrollment",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "enrollment",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

/// Validates an employer status transition.
///
/// # Errors
///
/// Returns `DomainError::TerminalStage` if `from` is terminal, or
/// `DomainError::InvalidTransition` if the edge is not allowed.
pub fn ensure_employer_transition(
    from: EmployerStatus,
    to: EmployerStatus,
) -> Result<(), DomainError> {
    if from.is_terminal() {
        return Err(DomainError::TerminalStage {
            entity: "employer",
            stage: from.as_str(),
        });
    }
    if !from.can_transition_to(to) {
        return Err(DomainError::InvalidTransition {
            entity: "employer",
            from: from.as_str(),
            to: to.as_str(),
        });
    }
    Ok(())
}

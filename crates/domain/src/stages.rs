// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle stage of a profile, from first registration through deployment.
///
/// The stage stored on a profile row is a cache of the most recent entry in
/// the profile stage ledger. All writes go through the engine, which appends
/// a ledger row in the same transaction as the cache update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProfileStage {
    /// Initial state after self-registration.
    #[default]
    NewRegistration,
    /// Under review by an operator.
    Screening,
    /// Cleared screening. Eligible for training or matching.
    Approved,
    /// Failed screening. No further transitions.
    Rejected,
    /// Enrolled in a training batch that has not started.
    TrainingScheduled,
    /// Attending a running training batch.
    InTraining,
    /// Finished training, never deployed.
    Trained,
    /// Available for matching after at least one engagement.
    Benched,
    /// Matched to a project that has not been shared with the employer.
    Matched,
    /// Confirmed on a shared project awaiting deployment.
    Assigned,
    /// Completed onboarding formalities, not yet on site.
    Onboarded,
    /// Deployed on a running project.
    OnSite,
    /// Idled by a project hold attributed to the organization.
    OnHold,
}

impl FromStr for ProfileStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NewRegistration" => Ok(Self::NewRegistration),
            "Screening" => Ok(Self::Screening),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "TrainingScheduled" => Ok(Self::TrainingScheduled),
            "InTraining" => Ok(Self::InTraining),
            "Trained" => Ok(Self::Trained),
            "Benched" => Ok(Self::Benched),
            "Matched" => Ok(Self::Matched),
            "Assigned" => Ok(Self::Assigned),
            "Onboarded" => Ok(Self::Onboarded),
            "OnSite" => Ok(Self::OnSite),
            "OnHold" => Ok(Self::OnHold),
            _ => Err(DomainError::InvalidStage {
                entity: "profile",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProfileStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ProfileStage {
    /// Converts this stage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewRegistration => "NewRegistration",
            Self::Screening => "Screening",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::TrainingScheduled => "TrainingScheduled",
            Self::InTraining => "InTraining",
            Self::Trained => "Trained",
            Self::Benched => "Benched",
            Self::Matched => "Matched",
            Self::Assigned => "Assigned",
            Self::Onboarded => "Onboarded",
            Self::OnSite => "OnSite",
            Self::OnHold => "OnHold",
        }
    }

    /// Checks if a transition from this stage to another is valid.
    ///
    /// Self-transitions are never valid. `Rejected` is terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::NewRegistration, Self::Screening)
                | (Self::Screening, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::TrainingScheduled | Self::Matched)
                | (Self::TrainingScheduled, Self::InTraining | Self::Approved)
                | (Self::InTraining, Self::Trained | Self::Approved)
                | (
                    Self::Trained,
                    Self::TrainingScheduled | Self::Matched | Self::Benched
                )
                | (Self::Benched, Self::TrainingScheduled | Self::Matched)
                | (Self::Matched, Self::Assigned | Self::Trained | Self::Benched)
                | (
                    Self::Assigned,
                    Self::Onboarded | Self::OnSite | Self::Matched | Self::Trained | Self::Benched
                )
                | (Self::Onboarded, Self::OnSite | Self::Benched)
                | (Self::OnSite, Self::OnHold | Self::Trained | Self::Benched)
                | (Self::OnHold, Self::OnSite | Self::Benched)
        )
    }

    /// Returns whether this stage admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectStage {
    /// Commercially approved. Planning has not begun.
    #[default]
    Approved,
    /// Workers are being matched.
    Planning,
    /// Roster shared with the employer for confirmation.
    Shared,
    /// Work in progress on site.
    Ongoing,
    /// Paused. Requires an attribution while in this stage.
    OnHold,
    /// Ended early by either party after work began, or abandoned before it.
    Terminated,
    /// Withdrawn before any work began.
    Cancelled,
    /// Closed before the planned end date by agreement.
    ShortClosed,
    /// Ran to its planned conclusion.
    Completed,
}

impl FromStr for ProjectStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(Self::Approved),
            "Planning" => Ok(Self::Planning),
            "Shared" => Ok(Self::Shared),
            "Ongoing" => Ok(Self::Ongoing),
            "OnHold" => Ok(Self::OnHold),
            "Terminated" => Ok(Self::Terminated),
            "Cancelled" => Ok(Self::Cancelled),
            "ShortClosed" => Ok(Self::ShortClosed),
            "Completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStage {
                entity: "project",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProjectStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ProjectStage {
    /// Converts this stage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Planning => "Planning",
            Self::Shared => "Shared",
            Self::Ongoing => "Ongoing",
            Self::OnHold => "OnHold",
            Self::Terminated => "Terminated",
            Self::Cancelled => "Cancelled",
            Self::ShortClosed => "ShortClosed",
            Self::Completed => "Completed",
        }
    }

    /// Checks if a transition from this stage to another is valid.
    ///
    /// Valid transitions are:
    /// - Approved → Planning | Cancelled | Terminated
    /// - Planning → Shared | Cancelled | Terminated
    /// - Shared → Ongoing | Cancelled | Terminated
    /// - Ongoing → `OnHold` | Completed | `ShortClosed` | Terminated
    /// - `OnHold` → Ongoing | Terminated
    ///
    /// Terminal stages have no outgoing transitions.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Approved,
                Self::Planning | Self::Cancelled | Self::Terminated
            ) | (
                Self::Planning,
                Self::Shared | Self::Cancelled | Self::Terminated
            ) | (
                Self::Shared,
                Self::Ongoing | Self::Cancelled | Self::Terminated
            ) | (
                Self::Ongoing,
                Self::OnHold | Self::Completed | Self::ShortClosed | Self::Terminated
            ) | (Self::OnHold, Self::Ongoing | Self::Terminated)
        )
    }

    /// Returns whether this stage admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Terminated | Self::Cancelled | Self::ShortClosed | Self::Completed
        )
    }

    /// Returns whether entering this stage requires a hold attribution.
    #[must_use]
    pub const fn requires_attribution(&self) -> bool {
        matches!(self, Self::OnHold)
    }

    /// Returns whether entering this stage conventionally carries supporting
    /// documents. Enforcement is decided per request.
    #[must_use]
    pub const fn requires_documents(&self) -> bool {
        matches!(self, Self::Completed | Self::Terminated | Self::ShortClosed)
    }
}

/// Stage of a single profile-to-project assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AssignmentStage {
    /// Proposed pairing, not yet confirmed.
    #[default]
    Matched,
    /// Confirmed on a shared roster.
    Assigned,
    /// Worker deployed on site.
    OnSite,
    /// Idled by a project hold.
    OnHold,
    /// Ran to conclusion with the project.
    Completed,
    /// Severed before conclusion.
    Removed,
}

impl FromStr for AssignmentStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Matched" => Ok(Self::Matched),
            "Assigned" => Ok(Self::Assigned),
            "OnSite" => Ok(Self::OnSite),
            "OnHold" => Ok(Self::OnHold),
            "Completed" => Ok(Self::Completed),
            "Removed" => Ok(Self::Removed),
            _ => Err(DomainError::InvalidStage {
                entity: "assignment",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for AssignmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AssignmentStage {
    /// Converts this stage to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "Matched",
            Self::Assigned => "Assigned",
            Self::OnSite => "OnSite",
            Self::OnHold => "OnHold",
            Self::Completed => "Completed",
            Self::Removed => "Removed",
        }
    }

    /// Checks if a transition from this stage to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Matched,
                Self::Assigned | Self::Completed | Self::Removed
            ) | (
                Self::Assigned,
                Self::OnSite | Self::Completed | Self::Removed
            ) | (Self::OnSite, Self::OnHold | Self::Completed | Self::Removed)
                | (Self::OnHold, Self::OnSite | Self::Completed | Self::Removed)
        )
    }

    /// Returns whether this stage admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Removed)
    }

    /// Returns whether an assignment in this stage still binds the worker.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// Status of a training batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BatchStatus {
    /// Announced with a future start date.
    #[default]
    Scheduled,
    /// Sessions in progress.
    Ongoing,
    /// Finished.
    Completed,
    /// Called off before completion.
    Cancelled,
}

impl FromStr for BatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(Self::Scheduled),
            "Ongoing" => Ok(Self::Ongoing),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStage {
                entity: "training batch",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BatchStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Scheduled, Self::Ongoing | Self::Cancelled)
                | (Self::Ongoing, Self::Completed | Self::Cancelled)
        )
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Status of a profile's enrollment in a training batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EnrollmentStatus {
    /// Enrolled and expected to attend.
    #[default]
    Enrolled,
    /// Finished the batch.
    Completed,
    /// Left before completion.
    Dropped,
}

impl FromStr for EnrollmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enrolled" => Ok(Self::Enrolled),
            "Completed" => Ok(Self::Completed),
            "Dropped" => Ok(Self::Dropped),
            _ => Err(DomainError::InvalidStage {
                entity: "enrollment",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EnrollmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enrolled => "Enrolled",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Enrolled, Self::Completed | Self::Dropped))
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Dropped)
    }
}

/// Verification status of an employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployerStatus {
    /// Registered, awaiting verification.
    #[default]
    New,
    /// Verified and able to run projects.
    Verified,
    /// Verification declined.
    Rejected,
    /// Barred after verification.
    Blacklisted,
}

impl FromStr for EmployerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Verified" => Ok(Self::Verified),
            "Rejected" => Ok(Self::Rejected),
            "Blacklisted" => Ok(Self::Blacklisted),
            _ => Err(DomainError::InvalidStage {
                entity: "employer",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EmployerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EmployerStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
            Self::Blacklisted => "Blacklisted",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::New, Self::Verified | Self::Rejected) | (Self::Verified, Self::Blacklisted)
        )
    }

    /// Returns whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Blacklisted)
    }
}

/// Party responsible for a project hold.
///
/// The attribution decides what happens to deployed workers: an employer
/// hold keeps them on site and paid, any other attribution idles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldAttribution {
    /// The employer paused the project. Workers remain on site.
    Employer,
    /// The staffing organization paused the project. Workers are idled.
    OwnOrganization,
    /// Weather, disaster, or regulation paused the project. Workers are idled.
    ForceMajeure,
}

impl FromStr for HoldAttribution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Employer" => Ok(Self::Employer),
            "OwnOrganization" => Ok(Self::OwnOrganization),
            "ForceMajeure" => Ok(Self::ForceMajeure),
            _ => Err(DomainError::InvalidAttribution(s.to_string())),
        }
    }
}

impl std::fmt::Display for HoldAttribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl HoldAttribution {
    /// Converts this attribution to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employer => "Employer",
            Self::OwnOrganization => "OwnOrganization",
            Self::ForceMajeure => "ForceMajeure",
        }
    }

    /// Returns whether a hold with this attribution idles deployed workers.
    ///
    /// Employer-attributed holds keep workers on site.
    #[must_use]
    pub const fn idles_workers(&self) -> bool {
        !matches!(self, Self::Employer)
    }
}

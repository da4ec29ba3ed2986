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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod stages;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use stages::{
    AssignmentStage, BatchStatus, EmployerStatus, EnrollmentStatus, HoldAttribution, ProfileStage,
    ProjectStage,
};
pub use validation::{
    ensure_assignment_transition, ensure_batch_transition, ensure_employer_transition,
    ensure_enrollment_transition, ensure_profile_transition, ensure_project_transition,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stage transition operations for Crewflow.
//!
//! Each operation validates the requested transition against the domain
//! adjacency tables, applies the primary mutation, fans out to coupled
//! entities, and appends ledger rows, all inside one immediate transaction.
//! The scheduler and any embedding application call the same functions; the
//! only difference is the actor they pass.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod next_stage;
mod notify;
mod requests;

pub mod employer_ops;
pub mod profile_ops;
pub mod project_ops;
pub mod training_ops;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use next_stage::derive_next_stage;
pub use notify::{NotificationDispatcher, NotificationEvent, NullDispatcher};
pub use requests::{
    BatchTransitionResponse, ProfileTransitionResponse, ProjectTransitionResponse,
    TransitionRequest,
};

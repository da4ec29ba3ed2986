// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crewflow_domain::DomainError;
use crewflow_persistence::PersistenceError;

/// Errors returned by engine operations.
///
/// Validation failures surface synchronously and are never retried; the
/// enclosing transaction has already rolled back by the time a caller sees
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The primary entity of the operation does not exist.
    NotFound {
        entity: &'static str,
        id: i64,
    },
    /// The requested stage change is not in the adjacency table.
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },
    /// The entity is in a terminal stage and can never change again.
    TerminalStage {
        entity: &'static str,
        stage: String,
    },
    /// A hold was requested without saying whose hold it is.
    MissingAttribution,
    /// The target stage requires supporting documents and none were supplied.
    MissingDocuments {
        stage: String,
    },
    /// The operation's precondition beyond the adjacency table failed, such
    /// as cancelling a project that has already started.
    Precondition(String),
    /// The storage layer failed.
    Persistence(PersistenceError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::InvalidTransition { entity, from, to } => {
                write!(f, "Invalid {entity} transition from {from} to {to}")
            }
            Self::TerminalStage { entity, stage } => {
                write!(f, "{entity} is in terminal stage {stage}")
            }
            Self::MissingAttribution => {
                write!(f, "Hold requires an attribution")
            }
            Self::MissingDocuments { stage } => {
                write!(f, "Transition to {stage} requires supporting documents")
            }
            Self::Precondition(msg) => write!(f, "Precondition failed: {msg}"),
            Self::Persistence(err) => write!(f, "Persistence error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<PersistenceError> for EngineError {
    fn from(err: PersistenceError) -> Self {
        Self::Persistence(err)
    }
}

/// Translates a domain validation error into the engine taxonomy, tagging it
/// with the entity it was raised for.
pub(crate) fn translate_domain_error(entity: &'static str, err: DomainError) -> EngineError {
    match err {
        DomainError::InvalidTransition { from, to, .. } => EngineError::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        },
        DomainError::TerminalStage { stage, .. } => EngineError::TerminalStage {
            entity,
            stage: stage.to_string(),
        },
        other => EngineError::Precondition(other.to_string()),
    }
}

/// Maps a storage `NotFound` for the operation's primary entity into the
/// engine's structured variant. Every other storage error passes through.
pub(crate) fn entity_not_found(
    entity: &'static str,
    id: i64,
) -> impl FnOnce(PersistenceError) -> EngineError {
    move |err| match err {
        PersistenceError::NotFound(_) => EngineError::NotFound { entity, id },
        other => EngineError::Persistence(other),
    }
}

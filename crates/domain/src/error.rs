// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stage string does not name a known stage for the entity.
    InvalidStage {
        /// The kind of entity the stage belongs to.
        entity: &'static str,
        /// The unrecognized stage string.
        value: String,
    },
    /// The requested transition is not in the adjacency table.
    InvalidTransition {
        /// The kind of entity being transitioned.
        entity: &'static str,
        /// The current stage.
        from: &'static str,
        /// The requested target stage.
        to: &'static str,
    },
    /// The entity is in a terminal stage and admits no transitions.
    TerminalStage {
        /// The kind of entity being transitioned.
        entity: &'static str,
        /// The terminal stage.
        stage: &'static str,
    },
    /// A hold attribution string is not recognized.
    InvalidAttribution(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStage { entity, value } => {
                write!(f, "Invalid {entity} stage: '{value}'")
            }
            Self::InvalidTransition { entity, from, to } => {
                write!(f, "Invalid {entity} transition: {from} -> {to}")
            }
            Self::TerminalStage { entity, stage } => {
                write!(f, "Cannot transition {entity} out of terminal stage {stage}")
            }
            Self::InvalidAttribution(value) => {
                write!(f, "Invalid hold attribution: '{value}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}

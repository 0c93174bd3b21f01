//! Unified error types surfaced by the runtime API.
//!
//! Wraps registry and encounter bookkeeping failures together with the core
//! [`ActionError`] so callers can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ActionError, CombatantId, EncounterId, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("combatant {0} is already registered")]
    CombatantExists(CombatantId),

    #[error("combatant {0} not found")]
    CombatantNotFound(CombatantId),

    #[error("{0} already exists")]
    EncounterExists(EncounterId),

    #[error("{0} not found")]
    EncounterNotFound(EncounterId),

    #[error("{0} has no participants")]
    EmptyEncounter(EncounterId),

    #[error("combatant {combatant} is already fighting in {encounter}")]
    AlreadyEngaged {
        combatant: CombatantId,
        encounter: EncounterId,
    },

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CombatantExists(_) | Self::EncounterExists(_) => ErrorSeverity::Validation,
            Self::CombatantNotFound(_) | Self::EncounterNotFound(_) => ErrorSeverity::Validation,
            Self::EmptyEncounter(_) => ErrorSeverity::Validation,
            Self::AlreadyEngaged { .. } => ErrorSeverity::Recoverable,
            Self::Action(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CombatantExists(_) => "RUNTIME_COMBATANT_EXISTS",
            Self::CombatantNotFound(_) => "RUNTIME_COMBATANT_NOT_FOUND",
            Self::EncounterExists(_) => "RUNTIME_ENCOUNTER_EXISTS",
            Self::EncounterNotFound(_) => "RUNTIME_ENCOUNTER_NOT_FOUND",
            Self::EmptyEncounter(_) => "RUNTIME_EMPTY_ENCOUNTER",
            Self::AlreadyEngaged { .. } => "RUNTIME_ALREADY_ENGAGED",
            Self::Action(err) => err.error_code(),
        }
    }
}

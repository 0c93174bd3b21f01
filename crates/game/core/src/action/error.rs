//! Action validation errors.

use crate::error::{ErrorSeverity, GameError};

/// Why an action was rejected.
///
/// Every variant is raised before anything is mutated; the caller maps it to an
/// empty result (manager) or an `Err` that keeps the turn (battle instance).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Actor not found in the registry or roster.
    #[error("Actor not found")]
    ActorNotFound,

    /// Actor is dead (HP = 0).
    #[error("Actor is dead")]
    ActorDead,

    /// Actor carries a Seal effect.
    #[error("Actor is sealed")]
    ActorSealed,

    /// Another combatant holds the turn.
    #[error("Not actor's turn")]
    NotActorsTurn,

    /// Target not found in the registry or roster.
    #[error("Target not found")]
    TargetNotFound,

    /// Target is dead.
    #[error("Target is dead")]
    TargetDead,

    /// Target is on the wrong side for the skill's target type.
    #[error("Invalid target")]
    InvalidTarget,

    /// Area skill found nobody alive to hit.
    #[error("No valid targets")]
    NoValidTargets,

    /// Catalog skill the actor has not learned.
    #[error("Skill not known: {0}")]
    SkillNotKnown(String),

    /// Skill is still cooling down.
    #[error("Skill is on cooldown ({0} turns left)")]
    OnCooldown(u32),

    /// Not enough SP for the skill's cost.
    #[error("Insufficient SP: need {required}, have {available}")]
    InsufficientSp { required: i32, available: i32 },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound | TargetNotFound => ErrorSeverity::Validation,
            ActorDead | ActorSealed | NotActorsTurn => ErrorSeverity::Recoverable,
            TargetDead | InvalidTarget | NoValidTargets => ErrorSeverity::Validation,
            SkillNotKnown(_) => ErrorSeverity::Validation,
            OnCooldown(_) | InsufficientSp { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorNotFound => "ACTION_ACTOR_NOT_FOUND",
            ActorDead => "ACTION_ACTOR_DEAD",
            ActorSealed => "ACTION_ACTOR_SEALED",
            NotActorsTurn => "ACTION_NOT_ACTORS_TURN",
            TargetNotFound => "ACTION_TARGET_NOT_FOUND",
            TargetDead => "ACTION_TARGET_DEAD",
            InvalidTarget => "ACTION_INVALID_TARGET",
            NoValidTargets => "ACTION_NO_VALID_TARGETS",
            SkillNotKnown(_) => "ACTION_SKILL_NOT_KNOWN",
            OnCooldown(_) => "ACTION_ON_COOLDOWN",
            InsufficientSp { .. } => "ACTION_INSUFFICIENT_SP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_errors_are_recoverable() {
        let err = ActionError::InsufficientSp {
            required: 12,
            available: 3,
        };
        assert!(err.severity().is_retryable());
        assert_eq!(err.error_code(), "ACTION_INSUFFICIENT_SP");
        assert_eq!(err.to_string(), "Insufficient SP: need 12, have 3");
    }
}

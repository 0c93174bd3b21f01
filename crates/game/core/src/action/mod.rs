//! Combat actions and the pipeline that resolves them.
//!
//! # Pipeline
//!
//! ```text
//! plan_action (actor snapshot) → resolve_targets → commit (actor lock)
//!     → resolve_on_target (one target lock at a time)
//!     → record_success, or refund when no target was reached (actor lock)
//! ```
//!
//! The combat manager runs each stage under the narrowest lock it needs; the
//! battle instance runs them back to back over its owned rosters.

pub mod error;
pub mod resolve;
pub mod targeting;
pub mod validation;

pub use error::ActionError;
pub use resolve::resolve_on_target;
pub use targeting::resolve_targets;
pub use validation::{
    ActionPlan, Payment, Technique, check_actor, commit, plan_action, record_success, refund,
};

use crate::skill::SkillId;
use crate::state::CombatantId;

/// An action a combatant can issue on its turn or through a request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    /// Basic attack with the legacy strength formula.
    Attack {
        actor: CombatantId,
        target: CombatantId,
    },
    UseSkill {
        actor: CombatantId,
        skill: SkillId,
        target: CombatantId,
    },
    /// Halve incoming damage until the actor acts again.
    Defend { actor: CombatantId },
}

impl CombatAction {
    pub fn actor(&self) -> CombatantId {
        match self {
            Self::Attack { actor, .. } | Self::UseSkill { actor, .. } | Self::Defend { actor } => {
                *actor
            }
        }
    }

    pub fn target(&self) -> Option<CombatantId> {
        match self {
            Self::Attack { target, .. } | Self::UseSkill { target, .. } => Some(*target),
            Self::Defend { .. } => None,
        }
    }

    pub fn skill(&self) -> Option<&SkillId> {
        match self {
            Self::UseSkill { skill, .. } => Some(skill),
            _ => None,
        }
    }
}

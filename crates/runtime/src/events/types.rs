//! Event types for different topics.

use game_core::{CombatantId, EncounterId, SkillId};
use serde::{Deserialize, Serialize};

/// Events produced while resolving actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A skill resolved successfully (also emitted for ids that fell back to a basic attack).
    SkillUsed { actor: CombatantId, skill: SkillId },

    /// A skill reached its stage threshold and was replaced.
    SkillEvolved {
        actor: CombatantId,
        from: SkillId,
        to: SkillId,
    },

    /// A combatant's HP reached zero. `by` is `None` for end-of-turn damage.
    CombatantDefeated {
        combatant: CombatantId,
        by: Option<CombatantId>,
    },
}

/// Encounter lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    Started {
        encounter: EncounterId,
        participants: Vec<CombatantId>,
    },
    Ended {
        encounter: EncounterId,
        /// Transient combatants removed from the registry.
        despawned: Vec<CombatantId>,
    },
}

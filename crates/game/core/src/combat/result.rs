//! Per-target outcome of a resolved action.

use crate::state::{CombatantId, StatusEffect};

/// What one action did to one target.
///
/// Produced fresh for every resolved action and handed to the caller (and on
/// to the network layer); never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub attacker_id: CombatantId,
    pub target_id: CombatantId,
    /// HP actually lost by the target, after guard and shields.
    pub damage: i32,
    /// HP actually restored.
    pub heal: i32,
    pub added_effects: Vec<StatusEffect>,
    pub removed_effects: Vec<StatusEffect>,
    pub hp_after: i32,
    /// Every effect failed its hit or proc roll.
    pub missed: bool,
}

impl CombatResult {
    pub fn new(attacker_id: CombatantId, target_id: CombatantId) -> Self {
        Self {
            attacker_id,
            target_id,
            ..Self::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.damage == 0
            && self.heal == 0
            && self.added_effects.is_empty()
            && self.removed_effects.is_empty()
    }
}

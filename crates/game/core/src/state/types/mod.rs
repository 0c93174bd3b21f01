pub mod combatant;
pub mod common;
pub mod status;

pub use combatant::{Combatant, Mastery, TurnUpkeep};
pub use common::{CombatantId, CombatantKind, EncounterId, Row, TeamId};
pub use status::{EffectTag, StackingPolicy, StatusEffect, StatusEffects};

//! Authoritative combatant state.
//!
//! This module owns the data structures that describe combatants and their
//! status effects. Registries and battle instances own the canonical values;
//! the resolver and status engine receive references and mutate in place
//! under whatever lock the caller holds.
pub mod types;

pub use types::{
    Combatant, CombatantId, CombatantKind, EffectTag, EncounterId, Mastery, Row,
    StackingPolicy, StatusEffect, StatusEffects, TeamId, TurnUpkeep,
};

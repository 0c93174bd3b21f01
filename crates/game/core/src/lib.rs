//! Deterministic combat rules shared by the server runtime and offline tools.
//!
//! `game-core` defines the canonical data model (combatants, skills, status
//! effects) and the pure algorithms over it: the combat resolver, the status
//! engine, target resolution and the per-target effect pipeline. It performs
//! no I/O and takes no locks; callers own the state and inject the skill
//! catalog and random stream.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod skill;
pub mod state;
pub mod stats;
pub mod status;

pub use action::{
    ActionError, ActionPlan, CombatAction, Payment, Technique, check_actor, commit, plan_action,
    record_success, refund, resolve_on_target, resolve_targets,
};
pub use combat::{CombatResolver, CombatResult, Element, HitRule, Resistance};
pub use config::CombatConfig;
pub use env::{RandomSource, ScriptedRng, SeededRng, SkillOracle};
pub use error::{ErrorSeverity, GameError};
pub use skill::{
    Branch, MasteryProgress, OutcomeModel, ScalingTerm, Skill, SkillEffect, SkillId,
    StageUpgrade, TargetType,
};
pub use state::{
    Combatant, CombatantId, CombatantKind, EffectTag, EncounterId, Mastery, Row, StackingPolicy,
    StatusEffect, StatusEffects, TeamId, TurnUpkeep,
};
pub use stats::{BaseStats, DerivedStats, ResourceMeter, Stat};
pub use status::{ApplyOutcome, ApplyReport};

//! Server-side orchestration of the combat rules.
//!
//! This crate wires the pure rules from `game-core` into the pieces a game
//! server embeds: a concurrent combatant registry, the [`CombatManager`] that
//! resolves "use skill" requests from many sessions, and the turn-scheduled
//! [`BattleInstance`] for self-contained fights.
//!
//! Modules are organized by responsibility:
//! - [`manager`] resolves requests against the shared registry
//! - [`battle`] runs ATB-scheduled fights over owned rosters
//! - [`providers`] picks actions for combatants nobody is steering
//! - [`events`] provides the topic-based event bus
//! - [`api`] exposes request/response shapes and the runtime error
pub mod api;
pub mod battle;
pub mod config;
pub mod events;
pub mod manager;
pub mod providers;
pub mod registry;

pub use api::{Result, RuntimeError, UseSkillRequest, UseSkillResponse};
pub use battle::{BattleInstance, Outcome};
pub use config::RuntimeConfig;
pub use events::{CombatEvent, EncounterEvent, Event, EventBus, Topic};
pub use manager::{CombatManager, Encounter, SharedRng};
pub use providers::choose_action;
pub use registry::{CombatantCell, CombatantRegistry};

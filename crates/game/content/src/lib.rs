//! Data-driven combat content.
//!
//! This crate houses the skill catalog and the loaders for RON/TOML data files:
//! - Skill definitions (RON), served through [`SkillRegistry`]
//! - Encounter rosters (RON)
//! - Combat tunables (TOML)
//!
//! Content is consumed by the runtime through the `SkillOracle` trait and never
//! mutated after loading.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogIssue, SkillRegistry};

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, EncounterSpec, LoadResult, RosterLoader,
    SkillLoader,
};

//! Content loaders for reading game data from files.
//!
//! Skills and encounter rosters are RON, combat tunables are TOML. Every
//! loader also accepts an in-memory string so the embedded defaults under
//! `data/` can be parsed without touching the filesystem.

pub mod config;
pub mod factory;
pub mod roster;
pub mod skills;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{CombatantSpec, EncounterSpec, RosterLoader};
pub use skills::SkillLoader;

use std::path::Path;

use anyhow::Context;

/// Loader results carry the file or field that failed as context.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

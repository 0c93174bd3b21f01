//! Content factory for loading everything an encounter needs from one directory.

use std::path::{Path, PathBuf};

use game_core::CombatConfig;

use crate::catalog::SkillRegistry;
use crate::loaders::{ConfigLoader, EncounterSpec, LoadResult, RosterLoader, SkillLoader};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── encounters/
///     └── goblin_ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load combat tunables from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillRegistry> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load `encounters/<name>.ron` and check it against `skills`.
    pub fn load_encounter(&self, name: &str, skills: &SkillRegistry) -> LoadResult<EncounterSpec> {
        let path = self.data_dir.join("encounters").join(format!("{name}.ron"));
        let encounter = RosterLoader::load(&path)?;
        encounter.validate(skills)?;
        Ok(encounter)
    }
}

//! Content selection: a data directory when given, the bundled data otherwise.

use std::path::Path;

use anyhow::{Context, Result, bail};
use game_content::{
    ConfigLoader, ContentFactory, EncounterSpec, RosterLoader, SkillLoader, SkillRegistry,
};
use game_core::CombatConfig;

/// Name of the encounter bundled with `game-content`.
pub const BUNDLED_ENCOUNTER: &str = "goblin_ambush";

pub struct Content {
    pub config: CombatConfig,
    pub skills: SkillRegistry,
    pub encounter: EncounterSpec,
}

impl Content {
    pub fn load(data_dir: Option<&Path>, encounter: &str) -> Result<Self> {
        match data_dir {
            Some(dir) => Self::from_dir(dir, encounter),
            None => Self::bundled(encounter),
        }
    }

    fn from_dir(dir: &Path, encounter: &str) -> Result<Self> {
        let factory = ContentFactory::new(dir);
        let config = factory
            .load_config()
            .with_context(|| format!("loading config from {}", dir.display()))?;
        let skills = factory
            .load_skills()
            .with_context(|| format!("loading skills from {}", dir.display()))?;
        let encounter = factory
            .load_encounter(encounter, &skills)
            .with_context(|| format!("loading encounter '{encounter}'"))?;
        Ok(Self {
            config,
            skills,
            encounter,
        })
    }

    fn bundled(encounter: &str) -> Result<Self> {
        if encounter != BUNDLED_ENCOUNTER {
            bail!("only '{BUNDLED_ENCOUNTER}' is bundled; pass --data to load '{encounter}'");
        }
        let skills = SkillLoader::embedded()?;
        let spec = RosterLoader::embedded()?;
        spec.validate(&skills)?;
        Ok(Self {
            config: ConfigLoader::embedded()?,
            skills,
            encounter: spec,
        })
    }
}

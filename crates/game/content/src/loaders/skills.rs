//! Skill catalog loader.
//!
//! Loads skill definitions from RON data files.

use std::path::Path;

use anyhow::bail;
use game_core::Skill;

use crate::catalog::SkillRegistry;
use crate::loaders::{LoadResult, read_file};

/// Loader for the skill catalog.
pub struct SkillLoader;

impl SkillLoader {
    /// Loads the catalog shipped with the crate (`data/skills.ron`).
    pub fn embedded() -> LoadResult<SkillRegistry> {
        Self::from_ron_str(include_str!("../../data/skills.ron"))
    }

    /// Load a skill catalog from a RON file.
    ///
    /// RON format: `Vec<Skill>`
    pub fn load(path: &Path) -> LoadResult<SkillRegistry> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
    }

    /// Parses a catalog and rejects duplicate ids and dangling upgrades.
    pub fn from_ron_str(content: &str) -> LoadResult<SkillRegistry> {
        let skills: Vec<Skill> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut registry = SkillRegistry::new();
        for skill in skills {
            let id = skill.id.clone();
            if registry.insert(skill).is_some() {
                bail!("Duplicate skill id '{}' in catalog", id);
            }
        }

        if let Some(issue) = registry.validate().into_iter().next() {
            bail!("Invalid skill catalog: {}", issue);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Branch, EffectTag, SkillId, SkillOracle, TargetType};

    #[test]
    fn test_load_embedded_skills() {
        let registry = SkillLoader::embedded().expect("Failed to load skills");
        assert!(registry.len() >= 10, "Should have at least 10 skills");

        let fireball = registry
            .skill(&SkillId::from("fireball"))
            .expect("fireball defined");
        assert_eq!(fireball.branch, Branch::Magical);
        assert!(fireball.has_effect(EffectTag::Burn));
        assert!(fireball.upgrade.is_some());

        let heal = registry.skill(&SkillId::from("heal")).expect("heal defined");
        assert_eq!(heal.target, TargetType::SingleAlly);
        assert_eq!(heal.branch, Branch::Support);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ron = r#"[
            (id: "jab", name: "Jab"),
            (id: "jab", name: "Jab Again"),
        ]"#;
        let err = SkillLoader::from_ron_str(ron).unwrap_err();
        assert!(err.to_string().contains("Duplicate skill id 'jab'"));
    }

    #[test]
    fn dangling_upgrades_are_rejected() {
        let ron = r#"[
            (id: "jab", name: "Jab", upgrade: Some((rank_threshold: 2, next_skill: "haymaker"))),
        ]"#;
        assert!(SkillLoader::from_ron_str(ron).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skills.ron");
        std::fs::write(&path, r#"[(id: "jab", name: "Jab", sp_cost: 2)]"#).expect("write");

        let registry = SkillLoader::load(&path).expect("load");
        assert_eq!(registry.get(&SkillId::from("jab")).map(|s| s.sp_cost), Some(2));
    }
}

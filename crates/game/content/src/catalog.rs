//! In-memory skill catalog.

use std::collections::BTreeMap;

use game_core::{Skill, SkillId, SkillOracle};

/// Read-only registry of skill definitions, keyed by id.
///
/// Built once at startup (from RON via [`SkillLoader`](crate::SkillLoader) or
/// programmatically) and shared behind an `Arc` afterwards.
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    skills: BTreeMap<SkillId, Skill>,
}

/// Problems found by [`SkillRegistry::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogIssue {
    /// A stage upgrade points at an id that is not in the catalog.
    MissingUpgrade { skill: SkillId, next: SkillId },
    /// A skill upgrades into itself.
    SelfUpgrade(SkillId),
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUpgrade { skill, next } => {
                write!(f, "skill '{}' upgrades into unknown skill '{}'", skill, next)
            }
            Self::SelfUpgrade(skill) => write!(f, "skill '{}' upgrades into itself", skill),
        }
    }
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from definitions; later duplicates replace earlier ones.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut registry = Self::new();
        for skill in skills {
            registry.insert(skill);
        }
        registry
    }

    /// Inserts a definition and returns the one it replaced, if any.
    pub fn insert(&mut self, skill: Skill) -> Option<Skill> {
        self.skills.insert(skill.id.clone(), skill)
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Checks cross-references between definitions.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        self.skills
            .values()
            .filter_map(|skill| {
                let upgrade = skill.upgrade.as_ref()?;
                if upgrade.next_skill == skill.id {
                    Some(CatalogIssue::SelfUpgrade(skill.id.clone()))
                } else if !self.skills.contains_key(&upgrade.next_skill) {
                    Some(CatalogIssue::MissingUpgrade {
                        skill: skill.id.clone(),
                        next: upgrade.next_skill.clone(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl SkillOracle for SkillRegistry {
    fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.skills.keys().cloned().collect()
    }
}

//! Encounter roster loader.
//!
//! Loads encounter definitions (two rosters of combatant templates) from RON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::bail;
use game_core::{
    BaseStats, Combatant, CombatantId, CombatantKind, Element, Row, SkillId, SkillOracle, TeamId,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Template for one combatant in an encounter file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CombatantSpec {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub kind: Option<CombatantKind>,
    #[serde(default)]
    pub row: Row,
    pub hp: i32,
    #[serde(default)]
    pub sp: i32,
    pub stats: BaseStats,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub skills: Vec<SkillId>,
    #[serde(default)]
    pub resistances: BTreeMap<String, f64>,
}

impl CombatantSpec {
    /// Builds a combatant on `team`. Kind defaults to Player for allies and
    /// Monster for anyone else.
    pub fn to_combatant(&self, team: TeamId) -> Combatant {
        let default_kind = if team == TeamId::PLAYERS {
            CombatantKind::Player
        } else {
            CombatantKind::Monster
        };

        let mut combatant = Combatant::new(CombatantId(self.id), self.name.clone(), team)
            .with_kind(self.kind.unwrap_or(default_kind))
            .with_row(self.row)
            .with_stats(self.stats.clone())
            .with_hp(self.hp)
            .with_sp(self.sp)
            .with_element(self.element);
        for skill in &self.skills {
            combatant.learn(skill.clone());
        }
        for (tag, value) in &self.resistances {
            combatant = combatant.with_resistance(tag, *value);
        }
        combatant
    }
}

/// An encounter: the allied and enemy rosters plus an optional RNG seed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub allies: Vec<CombatantSpec>,
    pub enemies: Vec<CombatantSpec>,
}

impl EncounterSpec {
    pub fn allies(&self) -> Vec<Combatant> {
        self.allies
            .iter()
            .map(|spec| spec.to_combatant(TeamId::PLAYERS))
            .collect()
    }

    pub fn enemies(&self) -> Vec<Combatant> {
        self.enemies
            .iter()
            .map(|spec| spec.to_combatant(TeamId::MONSTERS))
            .collect()
    }

    /// Checks ids are unique and every listed skill exists in `catalog`.
    pub fn validate(&self, catalog: &dyn SkillOracle) -> LoadResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for spec in self.allies.iter().chain(&self.enemies) {
            if !seen.insert(spec.id) {
                bail!("Duplicate combatant id {} in encounter '{}'", spec.id, self.name);
            }
            if let Some(missing) = spec.skills.iter().find(|id| !catalog.contains(id)) {
                bail!(
                    "Combatant '{}' in encounter '{}' knows unknown skill '{}'",
                    spec.name,
                    self.name,
                    missing
                );
            }
        }
        Ok(())
    }
}

/// Loader for encounter rosters.
pub struct RosterLoader;

impl RosterLoader {
    /// The sample encounter shipped with the crate.
    pub fn embedded() -> LoadResult<EncounterSpec> {
        Self::from_ron_str(include_str!("../../data/encounters/goblin_ambush.ron"))
    }

    /// Load an encounter from a RON file.
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::from_ron_str(&content)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<EncounterSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}

//! Skill definitions.
//!
//! Skills are immutable content: the catalog owns them and every consumer
//! borrows. Per-combatant progression (mastery, cooldowns) lives on the
//! [`Combatant`](crate::state::Combatant), and the rank/evolution rules live in
//! [`mastery`].

pub mod mastery;

use std::fmt;

use crate::combat::{Element, HitRule};
use crate::config::CombatConfig;
use crate::state::{EffectTag, StackingPolicy, StatusEffect};
use crate::stats::Stat;

pub use mastery::{MasteryProgress, record_use};

/// Catalog key of a skill (e.g. `"fireball"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SkillId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which defensive stat a skill is mitigated by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    /// Reduced by Def.
    #[default]
    Physical,
    /// Reduced by Mdf.
    Magical,
    /// Deals no damage.
    Support,
}

/// Who a skill reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SelfOnly,
    SingleAlly,
    #[default]
    SingleEnemy,
    /// Every living enemy sharing the chosen target's row.
    EnemyRow,
    AllAllies,
    AllEnemies,
}

impl TargetType {
    /// Whether the skill lands on the caster's own side.
    pub const fn is_friendly(self) -> bool {
        matches!(self, Self::SelfOnly | Self::SingleAlly | Self::AllAllies)
    }

    /// Whether the skill can reach `target` when cast by `actor` (ignoring liveness).
    pub fn reaches(self, actor_is_target: bool, same_team: bool) -> bool {
        match self {
            Self::SelfOnly => actor_is_target,
            Self::SingleAlly | Self::AllAllies => same_team,
            Self::SingleEnemy | Self::EnemyRow | Self::AllEnemies => !same_team,
        }
    }
}

/// What happens when a resistance roll succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeModel {
    /// The effect does not apply.
    #[default]
    Resist,
    /// The effect applies at half value and duration.
    Partial,
    /// Any positive resistance blocks the effect without a roll.
    Immunity,
}

/// One `(stat, coefficient)` contribution to a skill's magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalingTerm {
    pub stat: Stat,
    pub coefficient: f64,
}

impl ScalingTerm {
    pub const fn new(stat: Stat, coefficient: f64) -> Self {
        Self { stat, coefficient }
    }
}

/// Replaces a skill with its successor once its rank reaches `rank_threshold`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageUpgrade {
    pub rank_threshold: u32,
    pub next_skill: SkillId,
}

/// A single effect carried by a skill, resolved per target in declaration order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SkillEffect {
    pub tag: EffectTag,
    pub value: i32,
    pub duration: i32,
    pub param: Option<String>,
    /// Proc chance in `[0, 1]`; only rolled when below 1.
    pub chance: f64,
    pub outcome: OutcomeModel,
    pub resistance_tags: Vec<String>,
    pub policy: StackingPolicy,
    pub max_stacks: u32,
    pub conflict_group: Option<String>,
    pub priority: i32,
}

impl Default for SkillEffect {
    fn default() -> Self {
        Self::new(EffectTag::Damage, 0, 0)
    }
}

impl SkillEffect {
    pub fn new(tag: EffectTag, value: i32, duration: i32) -> Self {
        Self {
            tag,
            value,
            duration,
            param: None,
            chance: 1.0,
            outcome: OutcomeModel::default(),
            resistance_tags: Vec::new(),
            policy: StackingPolicy::default(),
            max_stacks: 1,
            conflict_group: None,
            priority: 0,
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = chance;
        self
    }

    pub fn with_outcome(mut self, outcome: OutcomeModel, tags: &[&str]) -> Self {
        self.outcome = outcome;
        self.resistance_tags = tags.iter().map(|tag| (*tag).to_owned()).collect();
        self
    }

    pub fn with_policy(mut self, policy: StackingPolicy, max_stacks: u32) -> Self {
        self.policy = policy;
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn with_conflict(mut self, group: impl Into<String>, priority: i32) -> Self {
        self.conflict_group = Some(group.into());
        self.priority = priority;
        self
    }

    /// Halved copy used when a Partial resistance roll succeeds.
    pub fn partial(&self, config: &CombatConfig) -> Self {
        let mut halved = self.clone();
        halved.value = self.value / 2;
        halved.duration = (self.duration / 2).max(config.partial_min_turns);
        halved
    }

    /// Builds the status instance this effect leaves on its target.
    pub fn to_status(&self, source: &SkillId) -> StatusEffect {
        let mut status = StatusEffect::new(self.tag, self.value, self.duration)
            .with_policy(self.policy)
            .with_max_stacks(self.max_stacks)
            .with_resistance_tags(self.resistance_tags.clone())
            .with_source(source.clone());
        if let Some(param) = &self.param {
            status = status.with_param(param.clone());
        }
        if let Some(group) = &self.conflict_group {
            status = status.with_conflict(group.clone(), self.priority);
        }
        status
    }
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub branch: Branch,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sp_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Vec<ScalingTerm>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SkillEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit: Option<HitRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade: Option<StageUpgrade>,
}

impl Skill {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element: Element::None,
            branch: Branch::default(),
            sp_cost: 0,
            cooldown: 0,
            target: TargetType::default(),
            scaling: Vec::new(),
            effects: Vec::new(),
            hit: None,
            upgrade: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = branch;
        self
    }

    pub fn with_cost(mut self, sp_cost: i32, cooldown: u32) -> Self {
        self.sp_cost = sp_cost;
        self.cooldown = cooldown;
        self
    }

    pub fn with_target(mut self, target: TargetType) -> Self {
        self.target = target;
        self
    }

    pub fn with_scaling(mut self, stat: Stat, coefficient: f64) -> Self {
        self.scaling.push(ScalingTerm::new(stat, coefficient));
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_hit(mut self, hit: HitRule) -> Self {
        self.hit = Some(hit);
        self
    }

    pub fn with_upgrade(mut self, rank_threshold: u32, next_skill: impl Into<SkillId>) -> Self {
        self.upgrade = Some(StageUpgrade {
            rank_threshold,
            next_skill: next_skill.into(),
        });
        self
    }

    pub fn has_effect(&self, tag: EffectTag) -> bool {
        self.effects.iter().any(|effect| effect.tag == tag)
    }
}

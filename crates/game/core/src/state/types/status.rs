//! Status effect instances carried by combatants.
//!
//! An instance is created when a skill effect resolves successfully, mutated by
//! later applications (refresh/stack) or by the per-turn tick, and destroyed on
//! expiry or by Cleanse/Dispel. The stacking and conflict rules live in
//! [`crate::status`]; this module only holds the data and read-side queries.

use strum::{AsRefStr, Display, EnumIter};

use crate::skill::SkillId;
use crate::stats::Stat;

/// Closed set of effect tags a skill can carry.
///
/// `Damage`, `Heal`, `Cleanse` and `Dispel` resolve immediately; the other tags
/// become [`StatusEffect`] instances on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectTag {
    Damage,
    Heal,
    /// Cannot act.
    Seal,
    /// Loses `value` HP at the end of each of its turns.
    Burn,
    /// Adds `value` to the stat named by `param`.
    BuffStats,
    /// Subtracts `value` from the stat named by `param`.
    DebuffStats,
    /// Removes every Seal, Burn and DebuffStats instance.
    Cleanse,
    /// Removes every BuffStats and Shield instance.
    Dispel,
    /// Absorbs up to `value` incoming damage.
    Shield,
}

impl EffectTag {
    /// Tags that produce a lasting status instance.
    pub const fn is_status(self) -> bool {
        matches!(
            self,
            Self::Seal | Self::Burn | Self::BuffStats | Self::DebuffStats | Self::Shield
        )
    }

    /// Tags removed by Cleanse.
    pub const fn is_debuff(self) -> bool {
        matches!(self, Self::Seal | Self::Burn | Self::DebuffStats)
    }

    /// Tags removed by Dispel.
    pub const fn is_buff(self) -> bool {
        matches!(self, Self::BuffStats | Self::Shield)
    }
}

/// How a new instance interacts with an existing one of the same tag and param.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackingPolicy {
    /// The new instance replaces the old one.
    #[default]
    NoStackOverwrite,
    /// Keeps the old value, extends to the longer duration.
    RefreshDuration,
    /// Adds values up to `max_stacks` applications.
    StackUpToN,
    /// Every application is an independent instance.
    SeparateInstances,
}

/// A single active status effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub tag: EffectTag,
    pub value: i32,
    pub turns_remaining: i32,
    pub param: Option<String>,
    pub stacks: u32,
    pub policy: StackingPolicy,
    pub max_stacks: u32,
    pub conflict_group: Option<String>,
    pub priority: i32,
    pub resistance_tags: Vec<String>,
    pub source_skill: Option<SkillId>,
}

impl StatusEffect {
    pub fn new(tag: EffectTag, value: i32, turns: i32) -> Self {
        Self {
            tag,
            value,
            turns_remaining: turns.max(0),
            param: None,
            stacks: 1,
            policy: StackingPolicy::default(),
            max_stacks: 1,
            conflict_group: None,
            priority: 0,
            resistance_tags: Vec::new(),
            source_skill: None,
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_policy(mut self, policy: StackingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks.max(1);
        self
    }

    pub fn with_conflict(mut self, group: impl Into<String>, priority: i32) -> Self {
        self.conflict_group = Some(group.into());
        self.priority = priority;
        self
    }

    pub fn with_resistance_tags(mut self, tags: Vec<String>) -> Self {
        self.resistance_tags = tags;
        self
    }

    pub fn with_source(mut self, skill: SkillId) -> Self {
        self.source_skill = Some(skill);
        self
    }

    /// True when both instances occupy the same (tag, param) slot.
    ///
    /// Params compare case-insensitively; an absent param only matches another
    /// absent param.
    pub fn same_slot(&self, other: &StatusEffect) -> bool {
        self.tag == other.tag
            && match (&self.param, &other.param) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            }
    }

    /// True when both instances belong to the same non-empty conflict group.
    pub fn conflicts_with(&self, other: &StatusEffect) -> bool {
        match (&self.conflict_group, &other.conflict_group) {
            (Some(a), Some(b)) => !a.is_empty() && a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }

    /// The stat this instance modifies, if it is a stat buff/debuff.
    pub fn modified_stat(&self) -> Option<Stat> {
        match self.tag {
            EffectTag::BuffStats | EffectTag::DebuffStats => {
                self.param.as_deref().and_then(Stat::from_param)
            }
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.turns_remaining <= 0
    }
}

/// Ordered list of active status effects on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    pub(crate) effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Creates an empty status effect list.
    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Checks if any instance with the given tag is active.
    pub fn has(&self, tag: EffectTag) -> bool {
        self.effects.iter().any(|e| e.tag == tag)
    }

    pub fn is_sealed(&self) -> bool {
        self.has(EffectTag::Seal)
    }

    /// True when at least one Cleanse-able instance is present.
    pub fn has_debuff(&self) -> bool {
        self.effects.iter().any(|e| e.tag.is_debuff())
    }

    /// Net flat modifier for a stat from BuffStats and DebuffStats instances.
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.modified_stat() == Some(stat))
            .map(|e| match e.tag {
                EffectTag::DebuffStats => -e.value,
                _ => e.value,
            })
            .sum()
    }

    /// Total Burn damage due at the end of a turn.
    pub fn burn_damage(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.tag == EffectTag::Burn)
            .map(|e| e.value.max(0))
            .sum()
    }

    /// Lets Shield instances absorb incoming damage, oldest first.
    ///
    /// Depleted shields are removed. Returns the damage left after absorption.
    pub fn absorb(&mut self, damage: i32) -> i32 {
        let mut remaining = damage.max(0);
        for effect in self
            .effects
            .iter_mut()
            .filter(|e| e.tag == EffectTag::Shield)
        {
            if remaining == 0 {
                break;
            }
            let absorbed = remaining.min(effect.value.max(0));
            effect.value -= absorbed;
            remaining -= absorbed;
        }
        self.effects
            .retain(|e| e.tag != EffectTag::Shield || e.value > 0);
        remaining
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_modifier_nets_buffs_and_debuffs() {
        let mut list = StatusEffects::empty();
        list.effects
            .push(StatusEffect::new(EffectTag::BuffStats, 6, 3).with_param("atk"));
        list.effects
            .push(StatusEffect::new(EffectTag::DebuffStats, 4, 3).with_param("ATK"));
        list.effects
            .push(StatusEffect::new(EffectTag::DebuffStats, 9, 3).with_param("def"));

        assert_eq!(list.stat_modifier(Stat::Atk), 2);
        assert_eq!(list.stat_modifier(Stat::Def), -9);
        assert_eq!(list.stat_modifier(Stat::Spd), 0);
    }

    #[test]
    fn shields_absorb_oldest_first_and_drop_when_depleted() {
        let mut list = StatusEffects::empty();
        list.effects.push(StatusEffect::new(EffectTag::Shield, 5, 2));
        list.effects.push(StatusEffect::new(EffectTag::Shield, 10, 2));

        let remaining = list.absorb(8);

        assert_eq!(remaining, 0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice()[0].value, 7);

        assert_eq!(list.absorb(20), 13);
        assert!(list.is_empty());
    }

    #[test]
    fn slots_compare_params_case_insensitively() {
        let a = StatusEffect::new(EffectTag::BuffStats, 1, 1).with_param("Str");
        let b = StatusEffect::new(EffectTag::BuffStats, 1, 1).with_param("sTR");
        let c = StatusEffect::new(EffectTag::BuffStats, 1, 1);

        assert!(a.same_slot(&b));
        assert!(!a.same_slot(&c));
        assert!(c.same_slot(&StatusEffect::new(EffectTag::BuffStats, 9, 9)));
    }
}

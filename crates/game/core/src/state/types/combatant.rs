use std::collections::{BTreeMap, BTreeSet};

use super::common::{CombatantId, CombatantKind, EncounterId, Row, TeamId};
use super::status::{StatusEffect, StatusEffects};
use crate::combat::Element;
use crate::config::CombatConfig;
use crate::skill::SkillId;
use crate::stats::{BaseStats, DerivedStats, ResourceMeter, Stat};

/// Usage-based progression of one learned skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mastery {
    pub rank: u32,
    pub usage_count: u32,
}

impl Mastery {
    pub const fn fresh() -> Self {
        Self {
            rank: CombatConfig::INITIAL_RANK,
            usage_count: 0,
        }
    }
}

impl Default for Mastery {
    fn default() -> Self {
        Self::fresh()
    }
}

/// A player character, monster, or pet that can take part in combat.
///
/// # Invariants
///
/// - `hp` and `sp` stay within `[0, maximum]` (enforced by [`ResourceMeter`])
/// - `skills` holds no duplicates and every entry has a `mastery` record
/// - `cooldowns` only holds entries with at least one turn left
/// - a cooldown started during a turn is not counted down by that turn's upkeep
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub team: TeamId,
    pub kind: CombatantKind,
    pub row: Row,

    pub hp: ResourceMeter,
    pub sp: ResourceMeter,

    pub base: BaseStats,
    pub derived: DerivedStats,
    pub element: Element,

    pub skills: Vec<SkillId>,
    pub mastery: BTreeMap<SkillId, Mastery>,
    pub cooldowns: BTreeMap<SkillId, u32>,
    /// Cooldowns started since the last upkeep.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fresh_cooldowns: BTreeSet<SkillId>,
    pub statuses: StatusEffects,
    /// Named resistances (lower-case tag → chance in `[0, 1]`).
    pub resistances: BTreeMap<String, f64>,

    /// Set by the Defend action; halves the next hits until this combatant acts again.
    pub guarding: bool,
    pub encounter: Option<EncounterId>,
}

/// What happened during a combatant's end-of-turn upkeep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnUpkeep {
    pub burn_damage: i32,
    pub expired: Vec<StatusEffect>,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, team: TeamId) -> Self {
        let base = BaseStats::default();
        let derived = DerivedStats::from_base(&base);
        Self {
            id,
            name: name.into(),
            team,
            kind: CombatantKind::default(),
            row: Row::default(),
            hp: ResourceMeter::default(),
            sp: ResourceMeter::default(),
            base,
            derived,
            element: Element::None,
            skills: Vec::new(),
            mastery: BTreeMap::new(),
            cooldowns: BTreeMap::new(),
            fresh_cooldowns: BTreeSet::new(),
            statuses: StatusEffects::empty(),
            resistances: BTreeMap::new(),
            guarding: false,
            encounter: None,
        }
    }

    /// Sets base stats and recomputes derived stats from them.
    pub fn with_stats(mut self, base: BaseStats) -> Self {
        self.derived = DerivedStats::from_base(&base);
        self.base = base;
        self
    }

    pub fn with_derived(mut self, derived: DerivedStats) -> Self {
        self.derived = derived;
        self
    }

    pub fn with_hp(mut self, maximum: i32) -> Self {
        self.hp = ResourceMeter::full(maximum);
        self
    }

    pub fn with_sp(mut self, maximum: i32) -> Self {
        self.sp = ResourceMeter::full(maximum);
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_kind(mut self, kind: CombatantKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.row = row;
        self
    }

    pub fn with_skill(mut self, skill: impl Into<SkillId>) -> Self {
        self.learn(skill.into());
        self
    }

    pub fn with_resistance(mut self, tag: &str, value: f64) -> Self {
        self.resistances
            .insert(tag.to_ascii_lowercase(), value.clamp(0.0, 1.0));
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.statuses.is_sealed()
    }

    pub fn is_ally_of(&self, other: &Combatant) -> bool {
        self.team == other.team
    }

    /// Effective stat value: stored value plus buff/debuff modifiers, floored at 0.
    pub fn stat(&self, stat: Stat) -> i32 {
        let stored = self
            .base
            .get(stat)
            .or_else(|| self.derived.get(stat))
            .unwrap_or_default();
        (stored + self.statuses.stat_modifier(stat)).max(0)
    }

    pub fn speed(&self) -> i32 {
        self.stat(Stat::Spd)
    }

    /// Summed resistance for a set of tags, capped at 1.0.
    pub fn resistance_to(&self, tags: &[String]) -> f64 {
        tags.iter()
            .filter_map(|tag| self.resistances.get(&tag.to_ascii_lowercase()))
            .sum::<f64>()
            .min(1.0)
    }

    pub fn knows(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }

    /// Adds a skill with fresh mastery; already-known skills are left untouched.
    pub fn learn(&mut self, skill: SkillId) {
        if self.knows(&skill) {
            return;
        }
        self.mastery.insert(skill.clone(), Mastery::fresh());
        self.skills.push(skill);
    }

    pub fn mastery_of(&self, skill: &SkillId) -> Mastery {
        self.mastery.get(skill).copied().unwrap_or_default()
    }

    pub fn cooldown(&self, skill: &SkillId) -> u32 {
        self.cooldowns.get(skill).copied().unwrap_or(0)
    }

    pub fn is_on_cooldown(&self, skill: &SkillId) -> bool {
        self.cooldown(skill) > 0
    }

    pub fn start_cooldown(&mut self, skill: &SkillId, turns: u32) {
        if turns == 0 {
            self.cooldowns.remove(skill);
            self.fresh_cooldowns.remove(skill);
        } else {
            self.cooldowns.insert(skill.clone(), turns);
            self.fresh_cooldowns.insert(skill.clone());
        }
    }

    /// Applies incoming damage and returns the HP actually lost.
    ///
    /// Guarding halves the hit (rounded up), then shields absorb what they can.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let mut amount = amount.max(0);
        if self.guarding && amount > 0 {
            amount = (amount + 1) / 2;
        }
        let remaining = self.statuses.absorb(amount);
        self.hp.drain(remaining)
    }

    /// Restores HP and returns the amount actually gained. Dead combatants stay dead.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        self.hp.restore(amount)
    }

    /// End-of-turn upkeep: Burn damage, status tick, cooldown countdown.
    ///
    /// A cooldown of N started this turn blocks the skill for the combatant's
    /// next N turns, so it is skipped by this countdown.
    pub fn end_turn(&mut self) -> TurnUpkeep {
        let burn_damage = self.hp.drain(self.statuses.burn_damage());
        let expired = self.statuses.tick();

        let fresh = std::mem::take(&mut self.fresh_cooldowns);
        self.cooldowns.retain(|skill, turns| {
            if !fresh.contains(skill) {
                *turns = turns.saturating_sub(1);
            }
            *turns > 0
        });

        TurnUpkeep {
            burn_damage,
            expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EffectTag;

    fn knight() -> Combatant {
        Combatant::new(CombatantId(1), "Knight", TeamId::PLAYERS)
            .with_stats(BaseStats::new(14, 12, 6, 8, 9))
            .with_hp(80)
            .with_sp(20)
    }

    #[test]
    fn effective_stats_include_status_modifiers() {
        let mut knight = knight();
        knight
            .statuses
            .apply(StatusEffect::new(EffectTag::DebuffStats, 20, 2).with_param("def"));
        knight
            .statuses
            .apply(StatusEffect::new(EffectTag::BuffStats, 3, 2).with_param("str"));

        assert_eq!(knight.stat(Stat::Str), 17);
        assert_eq!(knight.stat(Stat::Def), 0, "floored at zero");
        assert_eq!(knight.stat(Stat::Atk), 28, "derived values are stored, not recomputed");
    }

    #[test]
    fn guarding_halves_damage_rounded_up() {
        let mut knight = knight();
        knight.guarding = true;

        assert_eq!(knight.take_damage(9), 5);
        assert_eq!(knight.hp.current, 75);
    }

    #[test]
    fn end_turn_burns_ticks_and_cools_down() {
        let mut knight = knight();
        knight
            .statuses
            .apply(StatusEffect::new(EffectTag::Burn, 6, 1));
        knight.cooldowns.insert(SkillId::from("bash"), 2);

        let upkeep = knight.end_turn();

        assert_eq!(upkeep.burn_damage, 6);
        assert_eq!(upkeep.expired.len(), 1);
        assert_eq!(knight.hp.current, 74);
        assert_eq!(knight.cooldown(&SkillId::from("bash")), 1);

        knight.end_turn();
        assert!(!knight.is_on_cooldown(&SkillId::from("bash")));
        assert!(knight.cooldowns.is_empty());
    }

    #[test]
    fn cooldown_started_this_turn_survives_its_upkeep() {
        let mut knight = knight();
        let bash = SkillId::from("bash");
        knight.start_cooldown(&bash, 1);

        knight.end_turn();
        assert_eq!(knight.cooldown(&bash), 1, "still blocked on the next turn");

        knight.end_turn();
        assert!(!knight.is_on_cooldown(&bash));
        assert!(knight.fresh_cooldowns.is_empty());
    }

    #[test]
    fn dead_combatants_cannot_be_healed() {
        let mut knight = knight();
        knight.take_damage(500);

        assert!(!knight.is_alive());
        assert_eq!(knight.heal(30), 0);
    }

    #[test]
    fn resistance_lookup_is_case_insensitive_and_capped() {
        let knight = knight()
            .with_resistance("Fire", 0.6)
            .with_resistance("curse", 0.7);

        assert_eq!(knight.resistance_to(&["FIRE".to_string()]), 0.6);
        assert_eq!(
            knight.resistance_to(&["fire".to_string(), "Curse".to_string()]),
            1.0
        );
        assert_eq!(knight.resistance_to(&["poison".to_string()]), 0.0);
    }
}

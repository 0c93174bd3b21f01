//! Damage and heal calculation.

use crate::config::CombatConfig;
use crate::env::{RandomSource, SkillOracle};
use crate::skill::{Branch, Skill, SkillId};
use crate::state::Combatant;
use crate::stats::Stat;

/// Turns (actor, target, skill) into a damage or heal amount.
///
/// Holds the catalog it resolves skill ids against. Calculation has no side
/// effect besides consuming RNG draws; applying the number is the caller's job.
#[derive(Clone, Copy)]
pub struct CombatResolver<'a> {
    skills: &'a dyn SkillOracle,
    config: &'a CombatConfig,
}

impl<'a> CombatResolver<'a> {
    pub fn new(skills: &'a dyn SkillOracle, config: &'a CombatConfig) -> Self {
        Self { skills, config }
    }

    pub fn config(&self) -> &CombatConfig {
        self.config
    }

    /// Damage dealt by `attacker` to `target` with `skill_id`.
    ///
    /// # Formula
    ///
    /// ```text
    /// magnitude = Σ(effective stat × coefficient) × element × variance
    /// damage    = max(round(magnitude) - defense, min_damage)
    /// ```
    ///
    /// Defense is Def for Physical skills and Mdf for Magical ones; Support
    /// skills deal 0. Skill ids missing from the catalog (or no id at all) fall
    /// back to `round(Str × 2 × variance) - Def`, with the same floor.
    pub fn calculate_damage(
        &self,
        attacker: &Combatant,
        target: &Combatant,
        skill_id: Option<&SkillId>,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        let skill = skill_id.and_then(|id| self.skills.skill(id));
        self.damage_with(attacker, target, skill, rng)
    }

    /// Heal produced by `healer` on `target` with `skill_id`.
    ///
    /// Same magnitude formula without the elemental multiplier or defense,
    /// floored at 0. Unknown skills fall back to `round(Wis × 2 × variance)`.
    pub fn calculate_heal(
        &self,
        healer: &Combatant,
        target: &Combatant,
        skill_id: Option<&SkillId>,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        let skill = skill_id.and_then(|id| self.skills.skill(id));
        self.heal_with(healer, target, skill, rng)
    }

    /// [`calculate_damage`](Self::calculate_damage) with the definition already looked up.
    pub fn damage_with(
        &self,
        attacker: &Combatant,
        target: &Combatant,
        skill: Option<&Skill>,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        self.scaled_damage(attacker, target, skill, 1.0, rng)
    }

    /// Damage with the magnitude multiplied by `scale` before defense is
    /// subtracted. A partially resisted hit uses a scale of one half.
    pub fn scaled_damage(
        &self,
        attacker: &Combatant,
        target: &Combatant,
        skill: Option<&Skill>,
        scale: f64,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        let min_damage = self.config.min_damage;
        let Some(skill) = skill else {
            let raw = f64::from(attacker.stat(Stat::Str)) * 2.0 * scale * self.variance(rng);
            return (raw.round() as i32 - target.stat(Stat::Def)).max(min_damage);
        };

        let defense = match skill.branch {
            Branch::Support => return 0,
            Branch::Physical => target.stat(Stat::Def),
            Branch::Magical => target.stat(Stat::Mdf),
        };

        let element = skill.element.multiplier_against(target.element);
        let raw = magnitude(attacker, skill) * scale * element * self.variance(rng);
        (raw.round() as i32 - defense).max(min_damage)
    }

    /// [`calculate_heal`](Self::calculate_heal) with the definition already looked up.
    pub fn heal_with(
        &self,
        healer: &Combatant,
        target: &Combatant,
        skill: Option<&Skill>,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        self.scaled_heal(healer, target, skill, 1.0, rng)
    }

    /// Heal with the magnitude multiplied by `scale` before rounding.
    pub fn scaled_heal(
        &self,
        healer: &Combatant,
        _target: &Combatant,
        skill: Option<&Skill>,
        scale: f64,
        rng: &mut dyn RandomSource,
    ) -> i32 {
        let base = match skill {
            Some(skill) => magnitude(healer, skill),
            None => f64::from(healer.stat(Stat::Wis)) * 2.0,
        };
        ((base * scale * self.variance(rng)).round() as i32).max(0)
    }

    fn variance(&self, rng: &mut dyn RandomSource) -> f64 {
        let (low, high) = self.config.variance_bounds();
        rng.next_float_range(low, high)
    }
}

fn magnitude(actor: &Combatant, skill: &Skill) -> f64 {
    skill
        .scaling
        .iter()
        .map(|term| f64::from(actor.stat(term.stat)) * term.coefficient)
        .sum()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::combat::Element;
    use crate::env::ScriptedRng;
    use crate::state::{CombatantId, TeamId};
    use crate::stats::{BaseStats, DerivedStats};

    fn catalog() -> BTreeMap<SkillId, Skill> {
        let skills = [
            Skill::new("slash", "Slash").with_scaling(Stat::Atk, 1.0),
            Skill::new("fireball", "Fireball")
                .with_branch(Branch::Magical)
                .with_element(Element::Fire)
                .with_scaling(Stat::Mat, 1.5),
            Skill::new("mend", "Mend")
                .with_branch(Branch::Support)
                .with_scaling(Stat::Wis, 2.0),
        ];
        skills.into_iter().map(|s| (s.id.clone(), s)).collect()
    }

    fn attacker() -> Combatant {
        Combatant::new(CombatantId(1), "Attacker", TeamId::PLAYERS)
            .with_stats(BaseStats::new(10, 10, 10, 10, 10))
    }

    fn defenseless() -> Combatant {
        Combatant::new(CombatantId(2), "Dummy", TeamId::MONSTERS).with_derived(DerivedStats {
            atk: 0,
            def: 0,
            mat: 0,
            mdf: 0,
            spd: 0,
        })
    }

    #[test]
    fn legacy_formula_with_variance() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::new(vec![1.0, 0.95, 1.05]);
        let unknown = SkillId::from("nonexistent");

        let damages: Vec<i32> = (0..3)
            .map(|_| resolver.calculate_damage(&attacker(), &defenseless(), Some(&unknown), &mut rng))
            .collect();

        assert_eq!(damages, vec![20, 19, 21]);
    }

    #[test]
    fn legacy_damage_is_at_least_one() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::constant(1.0);
        let wall = Combatant::new(CombatantId(9), "Wall", TeamId::MONSTERS)
            .with_stats(BaseStats::new(1, 99, 1, 1, 1));

        assert_eq!(resolver.calculate_damage(&attacker(), &wall, None, &mut rng), 1);
    }

    #[test]
    fn support_skills_deal_no_damage() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::constant(1.0);

        let damage =
            resolver.calculate_damage(&attacker(), &defenseless(), Some(&SkillId::from("mend")), &mut rng);
        assert_eq!(damage, 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn scaling_element_and_defense() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::constant(1.0);

        // Mat 20 × 1.5 = 30, Fire vs Wind ×1.5 = 45, minus Mdf 5.
        let wind = Combatant::new(CombatantId(3), "Sylph", TeamId::MONSTERS)
            .with_stats(BaseStats::new(10, 10, 10, 5, 10))
            .with_element(Element::Wind);
        let damage = resolver.calculate_damage(&attacker(), &wind, Some(&SkillId::from("fireball")), &mut rng);
        assert_eq!(damage, 40);

        // Atk 20 minus Def 10.
        let knight = Combatant::new(CombatantId(4), "Knight", TeamId::MONSTERS);
        let damage = resolver.calculate_damage(&attacker(), &knight, Some(&SkillId::from("slash")), &mut rng);
        assert_eq!(damage, 10);
    }

    #[test]
    fn legacy_floor_follows_config() {
        let skills = catalog();
        let config = CombatConfig {
            min_damage: 3,
            ..CombatConfig::default()
        };
        let resolver = CombatResolver::new(&skills, &config);
        let wall = Combatant::new(CombatantId(9), "Wall", TeamId::MONSTERS)
            .with_stats(BaseStats::new(1, 99, 1, 1, 1));

        let damage = resolver.calculate_damage(&attacker(), &wall, None, &mut ScriptedRng::constant(1.0));
        assert_eq!(damage, 3);
    }

    #[test]
    fn scale_applies_before_defense() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::constant(1.0);
        let slash = skills.get(&SkillId::from("slash"));

        // Atk 20 halved to 10, minus Def 4.
        let squire = Combatant::new(CombatantId(5), "Squire", TeamId::MONSTERS)
            .with_stats(BaseStats::new(10, 4, 10, 10, 10));
        assert_eq!(resolver.scaled_damage(&attacker(), &squire, slash, 0.5, &mut rng), 6);

        // Atk 20 halved to 10 against Def 10 hits the floor.
        let knight = Combatant::new(CombatantId(4), "Knight", TeamId::MONSTERS);
        assert_eq!(resolver.scaled_damage(&attacker(), &knight, slash, 0.5, &mut rng), 1);
    }

    #[test]
    fn heal_uses_scaling_and_fallback() {
        let skills = catalog();
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&skills, &config);
        let mut rng = ScriptedRng::new(vec![1.0, 0.95]);
        let healer = attacker();

        assert_eq!(
            resolver.calculate_heal(&healer, &healer, Some(&SkillId::from("mend")), &mut rng),
            20
        );
        assert_eq!(resolver.calculate_heal(&healer, &healer, None, &mut rng), 19);
    }
}

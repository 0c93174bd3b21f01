//! Auto-battle heuristic.
//!
//! Picks an action for a combatant nobody is steering. Rules are tried in
//! order and the first one that produces an action wins:
//!
//! 1. **Heal**: the ally (or self) with the lowest HP ratio below
//!    `heal_threshold`, with a usable Heal skill that reaches them.
//! 2. **Cleanse**: the first ally carrying Seal, Burn or DebuffStats, with a
//!    usable Cleanse skill.
//! 3. **Strike**: the most expensive usable Damage skill, aimed at the living
//!    enemy with the lowest HP.
//! 4. **Fallback**: a uniformly random usable skill on a target that fits its
//!    target type.
//!
//! "Usable" means known, present in the catalog, off cooldown and affordable.

use game_core::{
    CombatAction, CombatConfig, Combatant, EffectTag, RandomSource, Skill, SkillOracle,
    TargetType,
};

/// Chooses an action for `actor`, or `None` when there is no living enemy or
/// no usable skill.
///
/// `combatants` is the whole battlefield and may include `actor` itself.
pub fn choose_action(
    actor: &Combatant,
    combatants: &[&Combatant],
    catalog: &dyn SkillOracle,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> Option<CombatAction> {
    let field = Battlefield::survey(actor, combatants);
    if field.enemies.is_empty() {
        return None;
    }

    let usable = usable_skills(actor, catalog);
    if usable.is_empty() {
        return None;
    }

    heal(actor, &field, &usable, config)
        .or_else(|| cleanse(actor, &field, &usable))
        .or_else(|| strike(actor, &field, &usable))
        .or_else(|| fallback(actor, &field, &usable, rng))
}

/// Living combatants split by side relative to the actor.
struct Battlefield<'a> {
    /// Includes the actor.
    allies: Vec<&'a Combatant>,
    enemies: Vec<&'a Combatant>,
}

impl<'a> Battlefield<'a> {
    fn survey(actor: &'a Combatant, combatants: &[&'a Combatant]) -> Self {
        let mut allies = vec![actor];
        let mut enemies = Vec::new();
        for &combatant in combatants {
            if combatant.id == actor.id || !combatant.is_alive() {
                continue;
            }
            if actor.is_ally_of(combatant) {
                allies.push(combatant);
            } else {
                enemies.push(combatant);
            }
        }
        Self { allies, enemies }
    }

    fn weakest_enemy(&self) -> Option<&'a Combatant> {
        self.enemies
            .iter()
            .copied()
            .min_by_key(|enemy| (enemy.hp.current, enemy.id))
    }
}

fn usable_skills<'a>(actor: &Combatant, catalog: &'a dyn SkillOracle) -> Vec<&'a Skill> {
    actor
        .skills
        .iter()
        .filter_map(|id| catalog.skill(id))
        .filter(|skill| !actor.is_on_cooldown(&skill.id) && actor.sp.current >= skill.sp_cost)
        .collect()
}

fn reaches(skill: &Skill, actor: &Combatant, target: &Combatant) -> bool {
    skill
        .target
        .reaches(actor.id == target.id, actor.is_ally_of(target))
}

fn use_on(actor: &Combatant, skill: &Skill, target: &Combatant) -> CombatAction {
    CombatAction::UseSkill {
        actor: actor.id,
        skill: skill.id.clone(),
        target: target.id,
    }
}

fn heal(
    actor: &Combatant,
    field: &Battlefield<'_>,
    usable: &[&Skill],
    config: &CombatConfig,
) -> Option<CombatAction> {
    let patient = field
        .allies
        .iter()
        .copied()
        .filter(|ally| ally.hp.ratio() < config.heal_threshold)
        .min_by(|a, b| a.hp.ratio().total_cmp(&b.hp.ratio()))?;

    usable
        .iter()
        .find(|skill| skill.has_effect(EffectTag::Heal) && reaches(skill, actor, patient))
        .map(|skill| use_on(actor, skill, patient))
}

fn cleanse(actor: &Combatant, field: &Battlefield<'_>, usable: &[&Skill]) -> Option<CombatAction> {
    field
        .allies
        .iter()
        .copied()
        .filter(|ally| ally.statuses.has_debuff())
        .find_map(|ally| {
            usable
                .iter()
                .find(|skill| skill.has_effect(EffectTag::Cleanse) && reaches(skill, actor, ally))
                .map(|skill| use_on(actor, skill, ally))
        })
}

fn strike(actor: &Combatant, field: &Battlefield<'_>, usable: &[&Skill]) -> Option<CombatAction> {
    let target = field.weakest_enemy()?;

    // First skill wins ties, so the actor's skill order breaks them.
    let mut best: Option<&Skill> = None;
    for &skill in usable {
        if !skill.has_effect(EffectTag::Damage) || skill.target.is_friendly() {
            continue;
        }
        if best.is_none_or(|current| skill.sp_cost > current.sp_cost) {
            best = Some(skill);
        }
    }
    best.map(|skill| use_on(actor, skill, target))
}

fn fallback(
    actor: &Combatant,
    field: &Battlefield<'_>,
    usable: &[&Skill],
    rng: &mut dyn RandomSource,
) -> Option<CombatAction> {
    let skill = pick(usable, rng)?;
    let target = match skill.target {
        TargetType::SelfOnly | TargetType::SingleAlly | TargetType::AllAllies => actor,
        TargetType::SingleEnemy | TargetType::EnemyRow | TargetType::AllEnemies => {
            pick(&field.enemies, rng)?
        }
    };
    Some(use_on(actor, skill, target))
}

fn pick<'a, T>(items: &[&'a T], rng: &mut dyn RandomSource) -> Option<&'a T> {
    let len = i32::try_from(items.len()).ok()?;
    let index = usize::try_from(rng.next_int(0, len)).ok()?;
    items.get(index).copied()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use game_core::{
        Branch, CombatantId, ScriptedRng, SkillEffect, SkillId, StatusEffect, TeamId,
    };

    fn catalog() -> BTreeMap<SkillId, Skill> {
        [
            Skill::new("slash", "Slash")
                .with_cost(2, 0)
                .with_effect(SkillEffect::new(EffectTag::Damage, 0, 0)),
            Skill::new("cleave", "Cleave")
                .with_cost(6, 2)
                .with_target(TargetType::EnemyRow)
                .with_effect(SkillEffect::new(EffectTag::Damage, 0, 0)),
            Skill::new("heal", "Heal")
                .with_branch(Branch::Support)
                .with_cost(4, 0)
                .with_target(TargetType::SingleAlly)
                .with_effect(SkillEffect::new(EffectTag::Heal, 0, 0)),
            Skill::new("purify", "Purify")
                .with_branch(Branch::Support)
                .with_cost(3, 0)
                .with_target(TargetType::SingleAlly)
                .with_effect(SkillEffect::new(EffectTag::Cleanse, 0, 0)),
        ]
        .into_iter()
        .map(|skill| (skill.id.clone(), skill))
        .collect()
    }

    fn cleric() -> Combatant {
        Combatant::new(CombatantId(1), "Cleric", TeamId::PLAYERS)
            .with_hp(100)
            .with_sp(30)
            .with_skill("slash")
            .with_skill("cleave")
            .with_skill("heal")
            .with_skill("purify")
    }

    fn knight() -> Combatant {
        Combatant::new(CombatantId(2), "Knight", TeamId::PLAYERS).with_hp(100)
    }

    fn goblin(id: u32, hp: i32) -> Combatant {
        let mut goblin = Combatant::new(CombatantId(id), "Goblin", TeamId::MONSTERS).with_hp(100);
        goblin.hp.current = hp;
        goblin
    }

    fn decide(actor: &Combatant, field: &[&Combatant]) -> Option<CombatAction> {
        let catalog = catalog();
        let mut rng = ScriptedRng::constant(0.0);
        choose_action(actor, field, &catalog, &CombatConfig::default(), &mut rng)
    }

    #[test]
    fn heals_the_most_wounded_ally_first() {
        let cleric = cleric();
        let mut knight = knight();
        knight.hp.current = 20;
        let goblin = goblin(10, 50);

        assert_eq!(
            decide(&cleric, &[&cleric, &knight, &goblin]),
            Some(CombatAction::UseSkill {
                actor: CombatantId(1),
                skill: SkillId::from("heal"),
                target: CombatantId(2),
            })
        );
    }

    #[test]
    fn cleanses_before_attacking() {
        let cleric = cleric();
        let mut knight = knight();
        knight.statuses.apply(StatusEffect::new(EffectTag::Burn, 3, 2));
        let goblin = goblin(10, 50);

        assert_eq!(
            decide(&cleric, &[&knight, &goblin]),
            Some(CombatAction::UseSkill {
                actor: CombatantId(1),
                skill: SkillId::from("purify"),
                target: CombatantId(2),
            })
        );
    }

    #[test]
    fn strikes_the_weakest_enemy_with_the_priciest_skill() {
        let cleric = cleric();
        let strong = goblin(10, 80);
        let weak = goblin(11, 15);

        assert_eq!(
            decide(&cleric, &[&cleric, &strong, &weak]),
            Some(CombatAction::UseSkill {
                actor: CombatantId(1),
                skill: SkillId::from("cleave"),
                target: CombatantId(11),
            })
        );
    }

    #[test]
    fn skips_skills_on_cooldown_or_out_of_reach() {
        let mut cleric = cleric();
        cleric.start_cooldown(&SkillId::from("cleave"), 2);
        let goblin = goblin(10, 50);

        assert_eq!(
            decide(&cleric, &[&goblin]),
            Some(CombatAction::UseSkill {
                actor: CombatantId(1),
                skill: SkillId::from("slash"),
                target: CombatantId(10),
            })
        );
    }

    #[test]
    fn gives_up_without_enemies_or_skills() {
        let cleric = cleric();
        let dead = goblin(10, 0);
        assert_eq!(decide(&cleric, &[&cleric, &dead]), None);

        let mut drained = cleric.clone();
        drained.sp.current = 0;
        let goblin = goblin(10, 50);
        assert_eq!(decide(&drained, &[&goblin]), None);
    }

    #[test]
    fn falls_back_to_a_random_usable_skill() {
        let catalog = catalog();
        let mut cleric = Combatant::new(CombatantId(1), "Cleric", TeamId::PLAYERS)
            .with_hp(100)
            .with_sp(30)
            .with_skill("heal")
            .with_skill("purify");
        cleric.hp.current = 90;
        let goblin = goblin(10, 50);

        // Second of two usable skills.
        let mut rng = ScriptedRng::constant(0.75);
        let action = choose_action(
            &cleric,
            &[&goblin],
            &catalog,
            &CombatConfig::default(),
            &mut rng,
        );
        assert_eq!(
            action,
            Some(CombatAction::UseSkill {
                actor: CombatantId(1),
                skill: SkillId::from("purify"),
                target: CombatantId(1),
            })
        );
    }
}

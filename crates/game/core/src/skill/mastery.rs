//! Usage-based rank progression and stage evolution.

use super::{Skill, SkillId};
use crate::config::CombatConfig;
use crate::state::{Combatant, Mastery};

/// What a successful cast did to the caster's mastery of the skill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MasteryProgress {
    /// Usage counted, rank unchanged.
    Used { usage_count: u32 },
    /// Rank went up without evolving.
    RankUp { rank: u32 },
    /// The skill reached its stage threshold and was replaced by its successor.
    Evolved { from: SkillId, to: SkillId },
}

/// Records one successful use of `skill` by `combatant`.
///
/// Rank goes up by one every `uses_per_rank` uses. Once the rank reaches the
/// skill's upgrade threshold, the skill is replaced in place by its successor,
/// which starts with fresh mastery; the old mastery and cooldown entries are
/// dropped.
pub fn record_use(combatant: &mut Combatant, skill: &Skill, config: &CombatConfig) -> MasteryProgress {
    let per_rank = config.uses_per_rank.max(1);
    let mastery = combatant.mastery.entry(skill.id.clone()).or_default();
    mastery.usage_count += 1;

    let ranked_up = mastery.usage_count % per_rank == 0;
    if ranked_up {
        mastery.rank += 1;
    }
    let Mastery { rank, usage_count } = *mastery;

    if let Some(upgrade) = skill.upgrade.as_ref().filter(|u| rank >= u.rank_threshold) {
        evolve(combatant, &skill.id, &upgrade.next_skill);
        return MasteryProgress::Evolved {
            from: skill.id.clone(),
            to: upgrade.next_skill.clone(),
        };
    }

    if ranked_up {
        MasteryProgress::RankUp { rank }
    } else {
        MasteryProgress::Used { usage_count }
    }
}

fn evolve(combatant: &mut Combatant, from: &SkillId, to: &SkillId) {
    combatant.mastery.remove(from);
    combatant.cooldowns.remove(from);
    combatant.fresh_cooldowns.remove(from);

    let already_known = combatant.knows(to);
    match combatant.skills.iter().position(|id| id == from) {
        Some(index) if !already_known => combatant.skills[index] = to.clone(),
        Some(index) => {
            combatant.skills.remove(index);
        }
        None if !already_known => combatant.skills.push(to.clone()),
        None => {}
    }
    combatant.mastery.insert(to.clone(), Mastery::fresh());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatantId, TeamId};

    fn mage() -> Combatant {
        Combatant::new(CombatantId(7), "Mage", TeamId::PLAYERS)
            .with_skill("guard")
            .with_skill("fireball")
    }

    #[test]
    fn rank_increases_every_ten_uses() {
        let config = CombatConfig::default();
        let mut mage = mage();
        let fireball = Skill::new("fireball", "Fireball");

        for _ in 0..9 {
            record_use(&mut mage, &fireball, &config);
        }
        assert_eq!(mage.mastery_of(&fireball.id).rank, 1);

        let progress = record_use(&mut mage, &fireball, &config);
        assert_eq!(progress, MasteryProgress::RankUp { rank: 2 });
        assert_eq!(mage.mastery_of(&fireball.id).usage_count, 10);
    }

    #[test]
    fn evolution_replaces_skill_in_place_and_resets_mastery() {
        let config = CombatConfig::default();
        let mut mage = mage();
        let fireball = Skill::new("fireball", "Fireball").with_upgrade(2, "greater_fireball");
        mage.start_cooldown(&fireball.id, 2);

        let mut last = None;
        for _ in 0..10 {
            last = Some(record_use(&mut mage, &fireball, &config));
        }

        assert_eq!(
            last,
            Some(MasteryProgress::Evolved {
                from: SkillId::from("fireball"),
                to: SkillId::from("greater_fireball"),
            })
        );
        assert_eq!(
            mage.skills,
            vec![SkillId::from("guard"), SkillId::from("greater_fireball")]
        );
        assert!(!mage.mastery.contains_key(&SkillId::from("fireball")));
        assert!(!mage.is_on_cooldown(&SkillId::from("fireball")));
        assert_eq!(
            mage.mastery_of(&SkillId::from("greater_fireball")),
            Mastery {
                rank: 1,
                usage_count: 0
            }
        );
    }

    #[test]
    fn evolving_into_a_known_skill_drops_the_duplicate() {
        let config = CombatConfig::default();
        let mut mage = mage().with_skill("greater_fireball");
        let fireball = Skill::new("fireball", "Fireball").with_upgrade(1, "greater_fireball");

        record_use(&mut mage, &fireball, &config);

        assert_eq!(
            mage.skills,
            vec![SkillId::from("guard"), SkillId::from("greater_fireball")]
        );
    }
}

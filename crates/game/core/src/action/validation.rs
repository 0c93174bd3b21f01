//! Actor-side checks and the resource commit.
//!
//! [`plan_action`] runs against a snapshot before any lock on a target is
//! taken. [`commit`] runs the same checks again under the actor's lock and
//! pays for the action, so two concurrent casts by one actor can never both
//! spend the same SP. Mastery is recorded by [`record_success`] once at least
//! one target was reached; a cast that reached nobody is undone with [`refund`].

use super::{ActionError, CombatAction};
use crate::config::CombatConfig;
use crate::env::SkillOracle;
use crate::skill::{MasteryProgress, Skill, SkillId, TargetType, record_use};
use crate::state::{Combatant, CombatantId};

/// How the action resolves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Technique<'a> {
    /// Legacy strength-based attack (no skill, or an id missing from the catalog).
    Basic,
    Skill(&'a Skill),
    Defend,
}

/// A validated action, ready for target resolution and application.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionPlan<'a> {
    pub actor: CombatantId,
    pub primary: CombatantId,
    /// Requested skill id, kept even when it fell back to a basic attack.
    pub skill_id: Option<SkillId>,
    pub technique: Technique<'a>,
    pub target_type: TargetType,
}

impl ActionPlan<'_> {
    pub fn skill(&self) -> Option<&Skill> {
        match self.technique {
            Technique::Skill(skill) => Some(skill),
            _ => None,
        }
    }
}

/// Validates `action` against the actor's current state.
pub fn plan_action<'a>(
    action: &CombatAction,
    actor: &Combatant,
    catalog: &'a dyn SkillOracle,
) -> Result<ActionPlan<'a>, ActionError> {
    let (skill_id, technique, target_type) = match action {
        CombatAction::Attack { .. } => (None, Technique::Basic, TargetType::SingleEnemy),
        CombatAction::Defend { .. } => (None, Technique::Defend, TargetType::SelfOnly),
        CombatAction::UseSkill { skill, .. } => match catalog.skill(skill) {
            Some(definition) => (
                Some(skill.clone()),
                Technique::Skill(definition),
                definition.target,
            ),
            None => (Some(skill.clone()), Technique::Basic, TargetType::SingleEnemy),
        },
    };

    let plan = ActionPlan {
        actor: actor.id,
        primary: action.target().unwrap_or(actor.id),
        skill_id,
        technique,
        target_type,
    };
    check_actor(actor, &plan)?;
    Ok(plan)
}

/// Liveness, seal, knowledge, cooldown and SP checks.
pub fn check_actor(actor: &Combatant, plan: &ActionPlan<'_>) -> Result<(), ActionError> {
    if !actor.is_alive() {
        return Err(ActionError::ActorDead);
    }
    if actor.is_sealed() {
        return Err(ActionError::ActorSealed);
    }

    let Some(skill) = plan.skill() else {
        return Ok(());
    };
    if !actor.knows(&skill.id) {
        return Err(ActionError::SkillNotKnown(skill.id.to_string()));
    }
    let cooldown = actor.cooldown(&skill.id);
    if cooldown > 0 {
        return Err(ActionError::OnCooldown(cooldown));
    }
    if actor.sp.current < skill.sp_cost {
        return Err(ActionError::InsufficientSp {
            required: skill.sp_cost,
            available: actor.sp.current,
        });
    }
    Ok(())
}

/// What [`commit`] took from the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment {
    pub sp_spent: i32,
    pub was_guarding: bool,
}

/// Re-checks the actor and pays for the action: SP, cooldown, guard.
///
/// Clears any guard from the previous turn (Defend sets it again).
pub fn commit(actor: &mut Combatant, plan: &ActionPlan<'_>) -> Result<Payment, ActionError> {
    check_actor(actor, plan)?;

    let was_guarding = actor.guarding;
    actor.guarding = matches!(plan.technique, Technique::Defend);

    let sp_spent = match plan.skill() {
        Some(skill) => {
            let spent = actor.sp.drain(skill.sp_cost);
            actor.start_cooldown(&skill.id, skill.cooldown);
            spent
        }
        None => 0,
    };
    Ok(Payment {
        sp_spent,
        was_guarding,
    })
}

/// Gives back what [`commit`] took when the action reached no target.
///
/// The cooldown entry is cleared outright: [`check_actor`] only lets a skill
/// through with no cooldown left.
pub fn refund(actor: &mut Combatant, plan: &ActionPlan<'_>, payment: Payment) {
    actor.sp.restore(payment.sp_spent);
    actor.guarding = payment.was_guarding;
    if let Some(skill) = plan.skill() {
        actor.start_cooldown(&skill.id, 0);
    }
}

/// Counts a use of the planned skill toward mastery and evolution.
///
/// `None` for non-skill actions, and for a skill the actor no longer knows
/// because a concurrent cast already evolved it.
pub fn record_success(
    actor: &mut Combatant,
    plan: &ActionPlan<'_>,
    config: &CombatConfig,
) -> Option<MasteryProgress> {
    let skill = plan.skill()?;
    if !actor.knows(&skill.id) {
        return None;
    }
    Some(record_use(actor, skill, config))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::state::{EffectTag, StatusEffect, TeamId};

    fn catalog() -> BTreeMap<SkillId, Skill> {
        let skill = Skill::new("cleave", "Cleave").with_cost(8, 2);
        BTreeMap::from([(skill.id.clone(), skill)])
    }

    fn fighter() -> Combatant {
        Combatant::new(CombatantId(1), "Fighter", TeamId::PLAYERS)
            .with_sp(10)
            .with_skill("cleave")
    }

    fn cleave() -> CombatAction {
        CombatAction::UseSkill {
            actor: CombatantId(1),
            skill: SkillId::from("cleave"),
            target: CombatantId(2),
        }
    }

    #[test]
    fn unknown_catalog_ids_fall_back_to_basic_attack() {
        let catalog = catalog();
        let action = CombatAction::UseSkill {
            actor: CombatantId(1),
            skill: SkillId::from("mystery"),
            target: CombatantId(2),
        };
        let plan = plan_action(&action, &fighter(), &catalog).unwrap();

        assert_eq!(plan.technique, Technique::Basic);
        assert_eq!(plan.skill_id, Some(SkillId::from("mystery")));
        assert_eq!(plan.target_type, TargetType::SingleEnemy);
    }

    #[test]
    fn commit_spends_sp_and_starts_cooldown() {
        let catalog = catalog();
        let mut fighter = fighter();
        let plan = plan_action(&cleave(), &fighter, &catalog).unwrap();

        let payment = commit(&mut fighter, &plan).unwrap();
        assert_eq!(payment.sp_spent, 8);
        assert_eq!(fighter.sp.current, 2);
        assert_eq!(fighter.cooldown(&SkillId::from("cleave")), 2);
        assert_eq!(fighter.mastery_of(&SkillId::from("cleave")).usage_count, 0);

        assert_eq!(commit(&mut fighter, &plan), Err(ActionError::OnCooldown(2)));
    }

    #[test]
    fn refund_restores_sp_cooldown_and_guard() {
        let catalog = catalog();
        let mut fighter = fighter();
        fighter.guarding = true;
        let before = fighter.clone();
        let plan = plan_action(&cleave(), &fighter, &catalog).unwrap();

        let payment = commit(&mut fighter, &plan).unwrap();
        assert!(!fighter.guarding);
        refund(&mut fighter, &plan, payment);

        assert_eq!(fighter, before);
    }

    #[test]
    fn success_is_recorded_only_for_known_skills() {
        let catalog = catalog();
        let config = CombatConfig::default();
        let mut fighter = fighter();
        let plan = plan_action(&cleave(), &fighter, &catalog).unwrap();

        let progress = record_success(&mut fighter, &plan, &config);
        assert_eq!(progress, Some(MasteryProgress::Used { usage_count: 1 }));

        fighter.skills.clear();
        assert_eq!(record_success(&mut fighter, &plan, &config), None);
    }

    #[test]
    fn rejects_sealed_poor_and_ignorant_actors() {
        let catalog = catalog();

        let mut sealed = fighter();
        sealed.statuses.apply(StatusEffect::new(EffectTag::Seal, 0, 2));
        assert_eq!(
            plan_action(&cleave(), &sealed, &catalog),
            Err(ActionError::ActorSealed)
        );

        let mut poor = fighter();
        poor.sp.drain(5);
        assert_eq!(
            plan_action(&cleave(), &poor, &catalog),
            Err(ActionError::InsufficientSp {
                required: 8,
                available: 5
            })
        );

        let novice = Combatant::new(CombatantId(1), "Novice", TeamId::PLAYERS);
        assert_eq!(
            plan_action(&cleave(), &novice, &catalog),
            Err(ActionError::SkillNotKnown("cleave".into()))
        );
    }
}

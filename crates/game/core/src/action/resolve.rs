//! Per-target effect resolution.
//!
//! Shared by the combat manager (one target lock at a time) and the battle
//! instance (owned rosters). The actor is always a snapshot taken before any
//! target is touched.
//!
//! # Draw order per effect
//!
//! ```text
//! hit rule (if any) → proc chance (if < 1) → resistance (if tagged) → variance (Damage/Heal)
//! ```

use super::Technique;
use crate::combat::{CombatResolver, CombatResult, Resistance, check_hit, roll_resistance};
use crate::env::RandomSource;
use crate::skill::{Skill, SkillEffect};
use crate::state::{Combatant, EffectTag};

/// Applies `technique` from `actor` to one `target` and reports what changed.
pub fn resolve_on_target(
    actor: &Combatant,
    target: &mut Combatant,
    technique: &Technique<'_>,
    resolver: &CombatResolver<'_>,
    rng: &mut dyn RandomSource,
) -> CombatResult {
    let mut result = CombatResult::new(actor.id, target.id);

    match technique {
        Technique::Basic => {
            let damage = resolver.damage_with(actor, target, None, rng);
            result.damage = target.take_damage(damage);
        }
        Technique::Defend => {}
        Technique::Skill(skill) => {
            let landed = apply_skill(actor, target, skill, resolver, rng, &mut result);
            result.missed = !skill.effects.is_empty() && !landed;
        }
    }

    result.hp_after = target.hp.current;
    result
}

/// Runs every effect of `skill` in order. Returns whether any effect landed.
fn apply_skill(
    actor: &Combatant,
    target: &mut Combatant,
    skill: &Skill,
    resolver: &CombatResolver<'_>,
    rng: &mut dyn RandomSource,
    result: &mut CombatResult,
) -> bool {
    let mut landed = false;

    for effect in &skill.effects {
        if !target.is_alive() {
            break;
        }
        let hit = match &skill.hit {
            Some(rule) => check_hit(rule, actor, target, rng),
            None => true,
        };
        if !hit {
            continue;
        }
        if effect.chance < 1.0 && rng.next_float() >= effect.chance {
            continue;
        }
        landed = true;

        let (effect, partial) = match roll_resistance(effect, target, rng) {
            Resistance::Resisted => continue,
            Resistance::Partial => (effect.partial(resolver.config()), true),
            Resistance::Full => (effect.clone(), false),
        };
        apply_effect(actor, target, skill, &effect, partial, resolver, rng, result);
    }

    landed
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    actor: &Combatant,
    target: &mut Combatant,
    skill: &Skill,
    effect: &SkillEffect,
    partial: bool,
    resolver: &CombatResolver<'_>,
    rng: &mut dyn RandomSource,
    result: &mut CombatResult,
) {
    // Partial halves the magnitude; defense and the damage floor still apply.
    let scale = if partial { 0.5 } else { 1.0 };

    match effect.tag {
        EffectTag::Damage => {
            let damage = resolver.scaled_damage(actor, target, Some(skill), scale, rng);
            result.damage += target.take_damage(damage);
        }
        EffectTag::Heal => {
            let heal = resolver.scaled_heal(actor, target, Some(skill), scale, rng);
            result.heal += target.heal(heal);
        }
        EffectTag::Seal
        | EffectTag::Burn
        | EffectTag::BuffStats
        | EffectTag::DebuffStats
        | EffectTag::Shield => {
            let status = effect.to_status(&skill.id);
            let report = target.statuses.apply(status.clone());
            if report.is_applied() {
                result.added_effects.push(status);
            }
            result.removed_effects.extend(report.removed);
        }
        EffectTag::Cleanse => result.removed_effects.extend(target.statuses.cleanse()),
        EffectTag::Dispel => result.removed_effects.extend(target.statuses.dispel()),
    }
}

//! Target resolution from a skill's target type.

use super::ActionError;
use crate::skill::TargetType;
use crate::state::{Combatant, CombatantId};

/// Expands the chosen target into the full list of combatants hit.
///
/// `roster` is every combatant the actor could reach; only living members of
/// the actor's encounter are considered. Single-target types reject a dead,
/// wrong-side or out-of-encounter `primary`. Row and side types return ids in
/// roster order.
pub fn resolve_targets<'a, I>(
    actor: &Combatant,
    primary: &Combatant,
    target_type: TargetType,
    roster: I,
) -> Result<Vec<CombatantId>, ActionError>
where
    I: IntoIterator<Item = &'a Combatant>,
{
    if target_type == TargetType::SelfOnly {
        return Ok(vec![actor.id]);
    }

    let single = matches!(
        target_type,
        TargetType::SingleAlly | TargetType::SingleEnemy | TargetType::EnemyRow
    );
    if single {
        if !primary.is_alive() {
            return Err(ActionError::TargetDead);
        }
        if primary.encounter != actor.encounter
            || !target_type.reaches(primary.id == actor.id, actor.is_ally_of(primary))
        {
            return Err(ActionError::InvalidTarget);
        }
        if target_type != TargetType::EnemyRow {
            return Ok(vec![primary.id]);
        }
    }

    let targets: Vec<CombatantId> = roster
        .into_iter()
        .filter(|c| c.is_alive() && c.encounter == actor.encounter)
        .filter(|c| target_type.reaches(c.id == actor.id, actor.is_ally_of(c)))
        .filter(|c| target_type != TargetType::EnemyRow || c.row == primary.row)
        .map(|c| c.id)
        .collect();

    if targets.is_empty() {
        return Err(ActionError::NoValidTargets);
    }
    Ok(targets)
}

//! Round-robin encounter through the shared combat manager.
//!
//! Mirrors what a game server does: every combatant is registered once, the
//! encounter gets its own seeded stream, and each round every living
//! participant lets the auto-battle heuristic act, fastest first.

use std::sync::Arc;

use anyhow::Result;
use game_core::{Combatant, CombatantId, EncounterId, TeamId};
use runtime::{CombatEvent, CombatManager, Event, RuntimeConfig, Topic};
use tracing::info;

use crate::content::Content;

const ENCOUNTER: EncounterId = EncounterId(1);

pub fn run(content: Content, seed: Option<u64>, max_rounds: usize, json: bool) -> Result<()> {
    let manager = CombatManager::new(Arc::new(content.skills), RuntimeConfig::new(content.config));
    let mut combat = manager.events().subscribe(Topic::Combat);

    let mut participants = Vec::new();
    for combatant in content
        .encounter
        .allies()
        .into_iter()
        .chain(content.encounter.enemies())
    {
        participants.push(combatant.id);
        manager.register_combatant(combatant)?;
    }
    manager.start_encounter(ENCOUNTER, &participants, seed)?;

    for round in 1..=max_rounds {
        if decided(&manager.all_combatants()) {
            break;
        }
        println!("-- round {round}");
        for id in turn_order(&manager.all_combatants()) {
            let Some(actor) = manager.snapshot(id).filter(Combatant::is_alive) else {
                continue;
            };
            for result in manager.auto_battle(id) {
                if json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    let target = manager
                        .snapshot(result.target_id)
                        .map_or_else(|| result.target_id.to_string(), |c| c.name);
                    println!(
                        "{} -> {}: -{} HP, +{} HP ({} left)",
                        actor.name, target, result.damage, result.heal, result.hp_after
                    );
                }
            }
            if let Some(upkeep) = manager.end_turn(id) {
                if upkeep.burn_damage > 0 {
                    println!("{} burns for {}", actor.name, upkeep.burn_damage);
                }
            }
        }

        while let Ok(event) = combat.try_recv() {
            if let Event::Combat(CombatEvent::CombatantDefeated { combatant, .. }) = event {
                let name = manager
                    .snapshot(combatant)
                    .map_or_else(|| combatant.to_string(), |c| c.name);
                println!("{name} falls");
            }
        }
    }

    let survivors = manager.end_encounter(ENCOUNTER)?;
    info!(survivors = survivors.iter().filter(|c| c.is_alive()).count(), "encounter closed");
    for combatant in survivors.iter().filter(|c| c.is_alive()) {
        println!(
            "{} stands with {}/{} HP",
            combatant.name, combatant.hp.current, combatant.hp.maximum
        );
    }
    Ok(())
}

fn decided(combatants: &[Combatant]) -> bool {
    let side_alive = |team: TeamId| combatants.iter().any(|c| c.team == team && c.is_alive());
    !side_alive(TeamId::PLAYERS) || !side_alive(TeamId::MONSTERS)
}

fn turn_order(combatants: &[Combatant]) -> Vec<CombatantId> {
    let mut order: Vec<_> = combatants
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| (std::cmp::Reverse(c.speed()), c.id))
        .collect();
    order.sort();
    order.into_iter().map(|(_, id)| id).collect()
}

//! Many sessions hitting the shared registry at once.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use game_core::{
    BaseStats, Combatant, CombatantId, EffectTag, ScriptedRng, Skill, SkillEffect, SkillId,
    SkillOracle, Stat, TeamId,
};
use runtime::{CombatManager, RuntimeConfig, UseSkillRequest};

const STRIKE_DAMAGE: i32 = 20;

fn catalog() -> Arc<dyn SkillOracle> {
    let skills = [
        Skill::new("strike", "Strike")
            .with_scaling(Stat::Atk, 1.0)
            .with_effect(SkillEffect::new(EffectTag::Damage, 0, 0)),
        Skill::new("focus", "Focus")
            .with_cost(10, 0)
            .with_scaling(Stat::Atk, 1.0)
            .with_effect(SkillEffect::new(EffectTag::Damage, 0, 0)),
    ];
    let map: BTreeMap<SkillId, Skill> = skills.into_iter().map(|s| (s.id.clone(), s)).collect();
    Arc::new(map)
}

fn manager() -> CombatManager {
    CombatManager::new(catalog(), RuntimeConfig::default()).with_rng(ScriptedRng::constant(1.0))
}

fn attacker(id: u32) -> Combatant {
    Combatant::new(CombatantId(id), format!("Raider {id}"), TeamId::PLAYERS)
        .with_sp(50)
        .with_skill("strike")
        .with_skill("focus")
}

fn boss(hp: i32) -> Combatant {
    Combatant::new(CombatantId(1_000), "Boss", TeamId::MONSTERS)
        .with_stats(BaseStats::new(10, 0, 10, 10, 10))
        .with_hp(hp)
}

fn request(actor: u32, skill: &str) -> UseSkillRequest {
    UseSkillRequest::new(
        CombatantId(actor),
        Some(SkillId::from(skill)),
        CombatantId(1_000),
    )
}

#[test]
fn concurrent_casts_on_one_target_serialize() {
    const RAIDERS: u32 = 8;
    const CASTS: usize = 25;

    let manager = manager();
    manager.register_combatant(boss(100_000)).unwrap();
    for id in 1..=RAIDERS {
        manager.register_combatant(attacker(id)).unwrap();
    }

    let dealt: i32 = thread::scope(|scope| {
        let handles: Vec<_> = (1..=RAIDERS)
            .map(|id| {
                let manager = &manager;
                scope.spawn(move || {
                    (0..CASTS)
                        .flat_map(|_| manager.use_skill(request(id, "strike")))
                        .map(|result| result.damage)
                        .sum::<i32>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    let expected = STRIKE_DAMAGE * (RAIDERS as i32) * (CASTS as i32);
    assert_eq!(dealt, expected);
    let boss = manager.snapshot(CombatantId(1_000)).unwrap();
    assert_eq!(boss.hp.current, 100_000 - expected);
}

#[test]
fn one_actor_cannot_spend_the_same_sp_twice() {
    let manager = manager();
    manager.register_combatant(boss(100_000)).unwrap();
    manager.register_combatant(attacker(1)).unwrap();
    let landed = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..12 {
            scope.spawn(|| {
                if !manager.use_skill(request(1, "focus")).is_empty() {
                    landed.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });

    // 50 SP buys five casts at 10 each.
    assert_eq!(landed.load(Ordering::Relaxed), 5);
    assert_eq!(manager.snapshot(CombatantId(1)).unwrap().sp.current, 0);
}

#[test]
fn registry_churn_during_casts_never_panics() {
    let manager = manager();
    manager.register_combatant(boss(1_000_000)).unwrap();
    for id in 1..=4 {
        manager.register_combatant(attacker(id)).unwrap();
    }

    thread::scope(|scope| {
        for id in 1..=4 {
            let manager = &manager;
            scope.spawn(move || {
                for _ in 0..200 {
                    manager.use_skill(request(id, "strike"));
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..200 {
                if let Some(boss) = manager.remove_combatant(CombatantId(1_000)) {
                    let _ = manager.register_combatant(boss);
                }
            }
        });
    });

    assert!(manager.snapshot(CombatantId(1_000)).is_some());
    assert_eq!(manager.all_combatants().len(), 5);
}

#[test]
fn casts_that_lose_their_target_cost_nothing() {
    const COST: i32 = 10;
    let manager = manager();
    manager.register_combatant(boss(1_000_000)).unwrap();
    manager
        .register_combatant(attacker(1).with_sp(100_000))
        .unwrap();
    let landed = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    if !manager.use_skill(request(1, "focus")).is_empty() {
                        landed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..200 {
                if let Some(boss) = manager.remove_combatant(CombatantId(1_000)) {
                    let _ = manager.register_combatant(boss);
                }
            }
        });
    });

    let landed = landed.load(Ordering::Relaxed) as i32;
    let caster = manager.snapshot(CombatantId(1)).unwrap();
    assert_eq!(caster.sp.current, 100_000 - COST * landed);
    assert_eq!(
        caster.mastery_of(&SkillId::from("focus")).usage_count as i32,
        landed
    );
}

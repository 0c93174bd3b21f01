//! Hit chance for skills that declare a hit rule.

use crate::env::RandomSource;
use crate::state::Combatant;
use crate::stats::Stat;

/// Contested hit roll between an actor stat and a target stat.
///
/// # Formula
///
/// ```text
/// chance = clamp(base + (actor.A - target.B) * slope, min, max)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRule {
    pub base: f64,
    pub actor_stat: Stat,
    pub target_stat: Stat,
    pub slope: f64,
    pub min: f64,
    pub max: f64,
}

impl HitRule {
    pub fn chance(&self, actor: &Combatant, target: &Combatant) -> f64 {
        let diff = f64::from(actor.stat(self.actor_stat) - target.stat(self.target_stat));
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (self.base + diff * self.slope).clamp(low, high)
    }
}

/// Rolls the hit check, consuming one draw. Hits when the draw is below the chance.
pub fn check_hit(
    rule: &HitRule,
    actor: &Combatant,
    target: &Combatant,
    rng: &mut dyn RandomSource,
) -> bool {
    rng.next_float() < rule.chance(actor, target)
}

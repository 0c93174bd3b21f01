//! Resistance rolls against tagged skill effects.

use crate::env::RandomSource;
use crate::skill::{OutcomeModel, SkillEffect};
use crate::state::Combatant;

/// How much of an effect survives the target's resistances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resistance {
    Full,
    Partial,
    Resisted,
}

/// Rolls the target's resistance against `effect`.
///
/// Effects without resistance tags always apply in full and take no draw.
/// Immunity never rolls: any positive summed resistance blocks the effect.
/// Otherwise one draw is taken and the outcome model triggers when the draw
/// is strictly below the summed resistance.
pub fn roll_resistance(
    effect: &SkillEffect,
    target: &Combatant,
    rng: &mut dyn RandomSource,
) -> Resistance {
    if effect.resistance_tags.is_empty() {
        return Resistance::Full;
    }
    let resistance = target.resistance_to(&effect.resistance_tags);

    match effect.outcome {
        OutcomeModel::Immunity if resistance > 0.0 => Resistance::Resisted,
        OutcomeModel::Immunity => Resistance::Full,
        OutcomeModel::Resist | OutcomeModel::Partial => {
            if rng.next_float() >= resistance {
                Resistance::Full
            } else if effect.outcome == OutcomeModel::Partial {
                Resistance::Partial
            } else {
                Resistance::Resisted
            }
        }
    }
}

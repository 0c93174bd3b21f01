//! Elemental affinities.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Elemental affinity of a combatant or skill.
///
/// Advantage cycle: Earth > Water > Fire > Wind > Earth.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    #[default]
    None,
    Fire,
    Water,
    Wind,
    Earth,
}

impl Element {
    pub const ADVANTAGE: f64 = 1.5;
    pub const DISADVANTAGE: f64 = 0.5;
    pub const NEUTRAL: f64 = 1.0;

    /// The element this one is strong against.
    pub const fn beats(self) -> Option<Element> {
        match self {
            Self::Earth => Some(Self::Water),
            Self::Water => Some(Self::Fire),
            Self::Fire => Some(Self::Wind),
            Self::Wind => Some(Self::Earth),
            Self::None => None,
        }
    }

    /// Damage multiplier for an attack of this element against `defender`.
    pub fn multiplier_against(self, defender: Element) -> f64 {
        if self.beats() == Some(defender) {
            Self::ADVANTAGE
        } else if defender.beats() == Some(self) {
            Self::DISADVANTAGE
        } else {
            Self::NEUTRAL
        }
    }
}

//! Base Stats - the stored attributes of a combatant.
//!
//! - **Str** (Strength): physical power, legacy damage formula
//! - **Con** (Constitution): physical resilience
//! - **Int** (Intelligence): magical power
//! - **Wis** (Wisdom): magical resilience, healing
//! - **Agi** (Agility): turn speed

use super::Stat;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub str: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub agi: i32,
}

impl BaseStats {
    pub fn new(str: i32, con: i32, int: i32, wis: i32, agi: i32) -> Self {
        Self {
            str,
            con,
            int,
            wis,
            agi,
        }
    }

    /// Returns the stored value for a base stat, or `None` for derived stats.
    pub fn get(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Str => Some(self.str),
            Stat::Con => Some(self.con),
            Stat::Int => Some(self.int),
            Stat::Wis => Some(self.wis),
            Stat::Agi => Some(self.agi),
            _ => None,
        }
    }
}

impl Default for BaseStats {
    /// Average adventurer: 10 everywhere.
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10)
    }
}

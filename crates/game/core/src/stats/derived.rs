//! Derived Stats - combat values computed from base stats.
//!
//! Formulas used by [`DerivedStats::from_base`]:
//! - Atk = Str × 2
//! - Def = Con
//! - Mat = Int × 2
//! - Mdf = Wis
//! - Spd = Agi
//!
//! Content may override any derived value (monsters with hand-tuned armor).

use super::Stat;
use super::core::BaseStats;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub atk: i32,
    pub def: i32,
    pub mat: i32,
    pub mdf: i32,
    pub spd: i32,
}

impl DerivedStats {
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            atk: base.str * 2,
            def: base.con,
            mat: base.int * 2,
            mdf: base.wis,
            spd: base.agi,
        }
    }

    /// Returns the stored value for a derived stat, or `None` for base stats.
    pub fn get(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Atk => Some(self.atk),
            Stat::Def => Some(self.def),
            Stat::Mat => Some(self.mat),
            Stat::Mdf => Some(self.mdf),
            Stat::Spd => Some(self.spd),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_combat_values_from_base() {
        let base = BaseStats::new(12, 8, 15, 9, 14);
        let derived = DerivedStats::from_base(&base);

        assert_eq!(derived.atk, 24);
        assert_eq!(derived.def, 8);
        assert_eq!(derived.mat, 30);
        assert_eq!(derived.mdf, 9);
        assert_eq!(derived.spd, 14);
    }

    #[test]
    fn lookup_is_partitioned_between_layers() {
        let base = BaseStats::default();
        let derived = DerivedStats::from_base(&base);

        assert_eq!(derived.get(Stat::Atk), Some(20));
        assert_eq!(derived.get(Stat::Str), None);
        assert_eq!(base.get(Stat::Str), Some(10));
        assert_eq!(base.get(Stat::Def), None);
    }
}

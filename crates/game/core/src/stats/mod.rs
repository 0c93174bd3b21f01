//! Stat system for combatants.
//!
//! Two stored layers feed every combat calculation:
//!
//! ```text
//! [ Base Stats (Str, Con, Int, Wis, Agi) ]
//!      ↓ DerivedStats::from_base (or content overrides)
//! [ Derived Stats (Atk, Def, Mat, Mdf, Spd) ]
//!      ↓ + BuffStats / - DebuffStats status effects
//! [ Effective value used by the resolver ]
//! ```
//!
//! Effective values are never stored; they are recomputed from the active
//! status list each time a formula asks for them.

pub mod core;
pub mod derived;
pub mod resources;

pub use self::core::BaseStats;
pub use derived::DerivedStats;
pub use resources::ResourceMeter;

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Every stat a scaling term, hit rule, or buff can reference.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Str,
    Con,
    Int,
    Wis,
    Agi,
    Atk,
    Def,
    Mat,
    Mdf,
    Spd,
}

impl Stat {
    /// Parses a status-effect `param` into a stat, ignoring case.
    pub fn from_param(param: &str) -> Option<Self> {
        param.trim().parse().ok()
    }
}

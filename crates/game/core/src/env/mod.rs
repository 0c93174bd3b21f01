//! Services injected into the combat rules.
//!
//! Game logic never reaches for globals: the skill catalog and the random
//! stream are passed in explicitly by whoever owns the encounter.
mod rng;
mod skills;

pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use skills::SkillOracle;

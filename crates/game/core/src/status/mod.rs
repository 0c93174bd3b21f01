//! Status Engine.
//!
//! Pure algorithm over one combatant's [`StatusEffects`](crate::state::StatusEffects):
//! applying a new instance against the existing ones, ticking durations, and
//! bulk removal (Cleanse/Dispel). Single-threaded; callers hold whatever lock
//! guards the combatant.

mod engine;

pub use engine::{ApplyOutcome, ApplyReport};

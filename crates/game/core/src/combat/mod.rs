//! Combat math.
//!
//! Pure calculations shared by the server-authoritative manager and the
//! turn-scheduled battle instance. Nothing here mutates a combatant; the action
//! pipeline applies the numbers.
//!
//! # Core Pieces
//!
//! - [`CombatResolver`]: damage and heal amounts from stats, scaling and element
//! - [`check_hit`]: contested hit roll for skills with a [`HitRule`]
//! - [`roll_resistance`]: Resist / Partial / Immunity outcome against tagged effects
//! - [`CombatResult`]: per-target record returned to callers

pub mod damage;
pub mod element;
pub mod hit;
pub mod resist;
pub mod result;

pub use damage::CombatResolver;
pub use element::Element;
pub use hit::{HitRule, check_hit};
pub use resist::{Resistance, roll_resistance};
pub use result::CombatResult;

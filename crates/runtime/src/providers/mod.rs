//! Action providers for combatants nobody is steering.

pub mod auto_battle;

pub use auto_battle::choose_action;

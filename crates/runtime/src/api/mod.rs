//! Public API surface for runtime consumers.
//!
//! Re-exports the error type and the request shape that network sessions hand
//! to the combat manager.
mod errors;
mod request;

pub use errors::{Result, RuntimeError};
pub use request::{UseSkillRequest, UseSkillResponse};

//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers can subscribe only
//! to the topics they need. Sending is synchronous; receivers may be polled
//! from sync code (`try_recv`) or awaited from an async collaborator.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, EncounterEvent};

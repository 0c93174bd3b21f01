//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CombatEvent, EncounterEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-action outcomes (skill use, evolution, defeat)
    Combat,
    /// Encounter lifecycle
    Encounter,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Encounter(EncounterEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Encounter(_) => Topic::Encounter,
        }
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<EncounterEvent> for Event {
    fn from(event: EncounterEvent) -> Self {
        Event::Encounter(event)
    }
}

struct Channels {
    combat: broadcast::Sender<Event>,
    encounter: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks and never fails: events
/// nobody listens to are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                combat: broadcast::channel(capacity).0,
                encounter: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.channels.combat,
            Topic::Encounter => &self.channels.encounter,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!(?topic, "event dropped, no subscribers");
        }
    }

    /// Receiver for one topic. Events published before this call are not replayed.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("combat_receivers", &self.channels.combat.receiver_count())
            .field("encounter_receivers", &self.channels.encounter.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CombatantId, SkillId};

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut encounter = bus.subscribe(Topic::Encounter);

        bus.publish(CombatEvent::SkillUsed {
            actor: CombatantId(1),
            skill: SkillId::from("slash"),
        });

        assert_eq!(
            combat.try_recv().ok(),
            Some(Event::Combat(CombatEvent::SkillUsed {
                actor: CombatantId(1),
                skill: SkillId::from("slash"),
            }))
        );
        assert!(encounter.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(CombatEvent::CombatantDefeated {
            combatant: CombatantId(3),
            by: None,
        });
    }

    #[test]
    fn events_serialize_to_json() {
        let event = Event::Combat(CombatEvent::SkillUsed {
            actor: CombatantId(2),
            skill: SkillId::from("fireball"),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Combat":{"SkillUsed":{"actor":2,"skill":"fireball"}}}"#);
    }
}

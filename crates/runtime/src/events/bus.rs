//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use super::types::{CombatEvent, RewardEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Session lifecycle and per-round snapshots
    Combat,
    /// Settlement outcomes
    Reward,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Reward(RewardEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Reward(_) => Topic::Reward,
        }
    }
}

impl From<CombatEvent> for Event {
    fn from(event: CombatEvent) -> Self {
        Event::Combat(event)
    }
}

impl From<RewardEvent> for Event {
    fn from(event: RewardEvent) -> Self {
        Event::Reward(event)
    }
}

/// Reasons an event did not reach any subscriber.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    #[error("no subscribers for topic {0:?}")]
    NoSubscribers(Topic),
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

struct Channels {
    combat: broadcast::Sender<Event>,
    reward: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Combat => &self.combat,
            Topic::Reward => &self.reward,
        }
    }
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
                reward: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic.
    ///
    /// Delivery is best-effort. Returns the number of receivers reached.
    pub fn publish(&self, event: impl Into<Event>) -> Result<usize, PublishError> {
        let event = event.into();
        let topic = event.topic();
        self.channels
            .sender(topic)
            .send(event)
            .map_err(|_| PublishError::NoSubscribers(topic))
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CharacterId;

    fn loot_event() -> RewardEvent {
        RewardEvent::LootReceived {
            character: CharacterId(1),
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut reward = bus.subscribe(Topic::Reward);

        assert_eq!(bus.publish(loot_event()), Ok(1));

        assert!(matches!(reward.recv().await, Ok(Event::Reward(_))));
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_reported() {
        let bus = EventBus::new();
        assert_eq!(
            bus.publish(loot_event()),
            Err(PublishError::NoSubscribers(Topic::Reward))
        );
    }
}

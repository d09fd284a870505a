//! Cloneable façade for issuing combat commands.
//!
//! [`CombatHandle`] hides channel plumbing and offers async helpers for each
//! command plus topic subscriptions on the event bus.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use combat_core::{CharacterId, CombatSnapshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::registry::SessionInfo;
use crate::workers::{ActionRequest, Command};

/// Client-facing handle to interact with the combat runtime
#[derive(Clone)]
pub struct CombatHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl CombatHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Opens a battle against a hostile creature template.
    ///
    /// If the character is already fighting, the existing session is returned
    /// unchanged.
    pub async fn start_combat(
        &self,
        character: CharacterId,
        creature_id: impl Into<String>,
    ) -> Result<CombatSnapshot> {
        let creature_id = creature_id.into();
        self.request(|reply| Command::StartCombat {
            character,
            creature_id,
            reply,
        })
        .await?
    }

    /// Plays one round with a basic physical attack.
    pub async fn basic_attack(&self, character: CharacterId) -> Result<CombatSnapshot> {
        self.act(character, ActionRequest::BasicAttack).await
    }

    /// Plays one round with a learned skill.
    pub async fn use_skill(
        &self,
        character: CharacterId,
        skill_id: impl Into<String>,
    ) -> Result<CombatSnapshot> {
        self.act(character, ActionRequest::Skill(skill_id.into())).await
    }

    /// Plays one round with the given action.
    pub async fn act(
        &self,
        character: CharacterId,
        action: ActionRequest,
    ) -> Result<CombatSnapshot> {
        self.request(|reply| Command::Act {
            character,
            action,
            reply,
        })
        .await?
    }

    /// Abandons the battle. Nothing is granted.
    pub async fn flee(&self, character: CharacterId) -> Result<CombatSnapshot> {
        self.request(|reply| Command::Flee { character, reply }).await?
    }

    /// Current state of the character's live session, if any.
    pub async fn session(&self, character: CharacterId) -> Result<Option<SessionInfo>> {
        self.request(|reply| Command::QuerySession { character, reply }).await
    }

    pub async fn in_combat(&self, character: CharacterId) -> Result<bool> {
        Ok(self.session(character).await?.is_some())
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Session started, updated and ended
    /// - `Topic::Reward` - Settled stats and received loot
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut rewards = handle.subscribe(Topic::Reward);
    /// while let Ok(event) = rewards.recv().await {
    ///     // Handle reward events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}

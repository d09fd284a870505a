//! Session registry: the single owner of live battles.
//!
//! Maps a character to at most one [`CombatSession`]. Callers go through
//! create/get/commit/end and never touch the underlying collection, so the
//! storage can move elsewhere without changing the worker.
//!
//! Sessions are not persisted; a restart drops every active battle.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use combat_core::{CharacterId, CombatLog, CombatSession, CombatSnapshot, CombatStatus};
use serde::{Deserialize, Serialize};

/// A live session with its bookkeeping timestamps.
#[derive(Clone, Debug)]
pub struct SessionEntry {
    pub session: CombatSession,
    pub started_at: DateTime<Utc>,
    /// Recorded on every accepted command. Not enforced as a timeout.
    pub last_action_at: DateTime<Utc>,
}

impl SessionEntry {
    /// Read-only view for callers outside the worker.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            snapshot: self
                .session
                .snapshot(CombatStatus::Active, CombatLog::new()),
            started_at: self.started_at,
            last_action_at: self.last_action_at,
        }
    }
}

/// Current state of a live session, as returned by session queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub snapshot: CombatSnapshot,
    pub started_at: DateTime<Utc>,
    pub last_action_at: DateTime<Utc>,
}

/// Keyed collection of active sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<CharacterId, SessionEntry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` unless one already exists for the character.
    ///
    /// Returns the entry now registered and whether it was newly created.
    pub fn create(&mut self, session: CombatSession) -> (&SessionEntry, bool) {
        let now = Utc::now();
        let mut created = false;
        let entry = self
            .sessions
            .entry(session.character_id)
            .or_insert_with(|| {
                created = true;
                SessionEntry {
                    session,
                    started_at: now,
                    last_action_at: now,
                }
            });
        (entry, created)
    }

    pub fn get(&self, character: CharacterId) -> Option<&SessionEntry> {
        self.sessions.get(&character)
    }

    pub fn contains(&self, character: CharacterId) -> bool {
        self.sessions.contains_key(&character)
    }

    /// Replaces the stored session with an advanced copy and stamps the
    /// action time. Ignored if the session ended in the meantime.
    pub fn commit(&mut self, session: CombatSession) {
        if let Some(entry) = self.sessions.get_mut(&session.character_id) {
            entry.session = session;
            entry.last_action_at = Utc::now();
        }
    }

    /// Removes and returns the session.
    pub fn end(&mut self, character: CharacterId) -> Option<SessionEntry> {
        self.sessions.remove(&character)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

//! Event types for different topics.

use combat_core::{CharacterId, CombatSnapshot, CombatStatus, LootDrop, Progress};
use serde::{Deserialize, Serialize};

/// Battle lifecycle events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A new session was opened.
    Started { snapshot: CombatSnapshot },

    /// A round finished and the battle continues.
    Updated { snapshot: CombatSnapshot },

    /// The session reached a terminal status and was removed.
    Ended {
        character: CharacterId,
        status: CombatStatus,
        snapshot: CombatSnapshot,
    },
}

impl CombatEvent {
    pub fn character(&self) -> CharacterId {
        match self {
            CombatEvent::Started { snapshot } | CombatEvent::Updated { snapshot } => {
                snapshot.character_id
            }
            CombatEvent::Ended { character, .. } => *character,
        }
    }
}

/// Emitted after a settlement has been committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RewardEvent {
    /// Experience, gold, level and vitals after the victory.
    StatsUpdated {
        character: CharacterId,
        progress: Progress,
        experience_gained: u64,
        gold_gained: u64,
        leveled_up: bool,
    },

    /// Items added to the inventory. Not emitted for an empty roll.
    LootReceived {
        character: CharacterId,
        items: Vec<LootDrop>,
    },
}

//! Display snapshots returned to callers after each round.

use crate::effect::EffectSummary;

use super::combatant::Combatant;
use super::{CharacterId, CombatStatus};

/// One side as shown to the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideView {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub resource: u32,
    pub max_resource: u32,
    pub effects: Vec<EffectSummary>,
}

impl From<&Combatant> for SideView {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            level: combatant.level,
            hp: combatant.hp,
            max_hp: combatant.max_hp,
            resource: combatant.resource,
            max_resource: combatant.max_resource,
            effects: combatant.effects.summaries(),
        }
    }
}

/// State of a battle after a command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub character_id: CharacterId,
    pub creature_id: String,
    pub turn: u32,
    pub status: CombatStatus,
    pub player: SideView,
    pub opponent: SideView,
    /// Log lines produced by the command that created this snapshot.
    pub log: Vec<String>,
}

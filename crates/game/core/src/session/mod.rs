//! Combat sessions and the round state machine.
//!
//! A [`CombatSession`] is the live state of one battle. Rounds are played with
//! [`CombatSession::play_round`], which walks the [`RoundPhase`] machine and
//! talks to the external character store only through [`PlayerLink`].

mod combatant;
mod phase;
mod round;
mod view;

use core::fmt;
use std::sync::Arc;

use crate::env::CreatureTemplate;
use crate::log::CombatLog;

pub use combatant::{Combatant, Vitals};
pub use phase::{Checkpoint, RoundPhase, Side};
pub use round::{PlayerAction, PlayerLink, PlayerRefresh, RoundError, RoundResult};
pub use view::{CombatSnapshot, SideView};

/// Identifier of a character record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Where a battle stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CombatStatus {
    Active,
    Won,
    Lost,
    Fled,
}

impl CombatStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Live state of one battle for one character.
#[derive(Clone, Debug)]
pub struct CombatSession {
    pub character_id: CharacterId,
    pub player: Combatant,
    pub opponent: Combatant,
    /// Shared, read-only definition of the opponent.
    pub template: Arc<CreatureTemplate>,
    /// Starts at 1 and increases after every completed round.
    pub turn: u32,
    next_effect_id: u64,
}

impl CombatSession {
    pub fn new(character_id: CharacterId, player: Combatant, template: Arc<CreatureTemplate>) -> Self {
        let opponent = template.spawn();
        Self {
            character_id,
            player,
            opponent,
            template,
            turn: 1,
            next_effect_id: 1,
        }
    }

    pub fn snapshot(&self, status: CombatStatus, log: CombatLog) -> CombatSnapshot {
        CombatSnapshot {
            character_id: self.character_id,
            creature_id: self.template.id.clone(),
            turn: self.turn,
            status,
            player: SideView::from(&self.player),
            opponent: SideView::from(&self.opponent),
            log: log.into_lines(),
        }
    }

    /// Snapshot for a freshly started battle.
    pub fn opening_snapshot(&self) -> CombatSnapshot {
        let mut log = CombatLog::new();
        log.push(format!(
            "{} engages {} (level {}).",
            self.player.name, self.opponent.name, self.opponent.level
        ));
        self.snapshot(CombatStatus::Active, log)
    }

    /// Ends the battle by running away. Grants nothing.
    pub fn flee_snapshot(&self) -> CombatSnapshot {
        let mut log = CombatLog::new();
        log.push(format!("{} flees from {}.", self.player.name, self.opponent.name));
        self.snapshot(CombatStatus::Fled, log)
    }
}

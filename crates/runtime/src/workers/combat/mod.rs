//! Combat worker that owns every live [`CombatSession`].
//!
//! Receives commands from [`CombatHandle`](crate::api::CombatHandle) one at a
//! time, so commands for the same character can never interleave. Rounds run
//! on a copy of the session that replaces the stored one only on success.

mod link;
mod settlement;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use combat_core::{
    CharacterId, CombatConfig, CombatSession, CombatSnapshot, CombatStatus, Combatant,
    PlayerAction, RngOracle, RoundError, RoundResult,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus};
use crate::oracle::OracleManager;
use crate::registry::{SessionInfo, SessionRegistry};
use crate::repository::{CombatStores, RepositoryError};

use link::StoreLink;

/// What the player does this round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionRequest {
    BasicAttack,
    /// Skill id, checked against the character's skill book.
    Skill(String),
}

/// Commands that can be sent to the combat worker
pub enum Command {
    StartCombat {
        character: CharacterId,
        creature_id: String,
        reply: oneshot::Sender<Result<CombatSnapshot>>,
    },
    Act {
        character: CharacterId,
        action: ActionRequest,
        reply: oneshot::Sender<Result<CombatSnapshot>>,
    },
    Flee {
        character: CharacterId,
        reply: oneshot::Sender<Result<CombatSnapshot>>,
    },
    /// Read-only lookup of a live session.
    QuerySession {
        character: CharacterId,
        reply: oneshot::Sender<Option<SessionInfo>>,
    },
}

/// Background task that processes combat commands.
pub struct CombatWorker {
    registry: SessionRegistry,
    oracles: OracleManager,
    stores: CombatStores,
    config: CombatConfig,
    rng: Box<dyn RngOracle>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl CombatWorker {
    /// Creates a new combat worker.
    pub fn new(
        oracles: OracleManager,
        stores: CombatStores,
        config: CombatConfig,
        rng: Box<dyn RngOracle>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            registry: SessionRegistry::new(),
            oracles,
            stores,
            config,
            rng,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(
            target: "runtime::worker",
            abandoned = self.registry.len(),
            "combat worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartCombat {
                character,
                creature_id,
                reply,
            } => {
                let result = self.start_combat(character, &creature_id);
                let _ = reply.send(result);
            }
            Command::Act {
                character,
                action,
                reply,
            } => {
                let result = self.act(character, action);
                let _ = reply.send(result);
            }
            Command::Flee { character, reply } => {
                let result = self.flee(character);
                let _ = reply.send(result);
            }
            Command::QuerySession { character, reply } => {
                let _ = reply.send(self.registry.get(character).map(|entry| entry.info()));
            }
        }
    }

    fn start_combat(
        &mut self,
        character: CharacterId,
        creature_id: &str,
    ) -> Result<CombatSnapshot> {
        if let Some(entry) = self.registry.get(character) {
            debug!(target: "runtime::worker", %character, "session already active");
            return Ok(entry.info().snapshot);
        }

        let template = self
            .oracles
            .creatures()
            .template(creature_id)
            .ok_or_else(|| RuntimeError::CreatureNotFound(creature_id.to_string()))?;
        if !template.hostile {
            return Err(RuntimeError::CreatureNotHostile(creature_id.to_string()));
        }

        let record = self
            .stores
            .characters
            .load(character)?
            .ok_or(RuntimeError::CharacterNotFound(character))?;
        let mut stats = self.stores.loadouts.base_stats(character)?;
        stats.max_hp = record.vitals.max_hp;
        stats.max_resource = record.vitals.max_resource;
        let player = Combatant::new(record.name, record.level, stats).with_vitals(record.vitals);

        let session = CombatSession::new(character, player, Arc::new(template));
        let snapshot = session.opening_snapshot();
        self.registry.create(session);

        info!(
            target: "runtime::worker",
            %character,
            creature = creature_id,
            "combat started"
        );
        let _ = self.event_bus.publish(CombatEvent::Started {
            snapshot: snapshot.clone(),
        });
        Ok(snapshot)
    }

    fn act(&mut self, character: CharacterId, request: ActionRequest) -> Result<CombatSnapshot> {
        let mut working = self
            .registry
            .get(character)
            .map(|entry| entry.session.clone())
            .ok_or(RuntimeError::NotInCombat(character))?;
        let action = self.resolve_action(character, request)?;

        let mut link = StoreLink {
            character,
            characters: self.stores.characters.as_ref(),
            loadouts: self.stores.loadouts.as_ref(),
        };
        let result = working
            .play_round(&action, &mut link, self.rng.as_mut(), &self.config)
            .map_err(|err| round_error(character, err))?;

        match result.status {
            CombatStatus::Active => {
                self.registry.commit(working);
                let _ = self.event_bus.publish(CombatEvent::Updated {
                    snapshot: result.snapshot.clone(),
                });
                Ok(result.snapshot)
            }
            status => {
                self.finish(character, &working, &result);
                self.end_session(character, status, result.snapshot.clone());
                Ok(result.snapshot)
            }
        }
    }

    fn resolve_action(
        &self,
        character: CharacterId,
        request: ActionRequest,
    ) -> Result<PlayerAction> {
        match request {
            ActionRequest::BasicAttack => Ok(PlayerAction::BasicAttack),
            ActionRequest::Skill(skill_id) => {
                if !self.stores.skill_books.knows(character, &skill_id)? {
                    return Err(RuntimeError::SkillUnknown {
                        character,
                        skill: skill_id,
                    });
                }
                let skill = self
                    .oracles
                    .skills()
                    .skill(&skill_id)
                    .ok_or(RuntimeError::SkillNotFound(skill_id))?;
                Ok(PlayerAction::Skill(skill))
            }
        }
    }

    /// Post-battle bookkeeping for a terminal round.
    fn finish(&self, character: CharacterId, session: &CombatSession, result: &RoundResult) {
        let Some(roll) = &result.rewards else {
            return;
        };

        let settled = settlement::settle_victory(
            character,
            roll,
            session.player.vitals(),
            self.stores.characters.as_ref(),
            &self.config,
            &self.event_bus,
        );
        if let Err(err) = settled {
            error!(
                target: "runtime::worker",
                %character,
                error = %err,
                "reward settlement failed; victory stands without rewards"
            );
            if let Err(err) = self
                .stores
                .characters
                .save_vitals(character, session.player.vitals())
            {
                warn!(
                    target: "runtime::worker",
                    %character,
                    error = %err,
                    "could not persist vitals after victory"
                );
            }
        }
    }

    fn flee(&mut self, character: CharacterId) -> Result<CombatSnapshot> {
        let entry = self
            .registry
            .get(character)
            .ok_or(RuntimeError::NotInCombat(character))?;
        let snapshot = entry.session.flee_snapshot();
        self.stores
            .characters
            .save_vitals(character, entry.session.player.vitals())?;

        self.end_session(character, CombatStatus::Fled, snapshot.clone());
        Ok(snapshot)
    }

    fn end_session(
        &mut self,
        character: CharacterId,
        status: CombatStatus,
        snapshot: CombatSnapshot,
    ) {
        self.registry.end(character);
        info!(
            target: "runtime::worker",
            %character,
            %status,
            turn = snapshot.turn,
            "combat ended"
        );
        let _ = self.event_bus.publish(CombatEvent::Ended {
            character,
            status,
            snapshot,
        });
    }
}

fn round_error(character: CharacterId, err: RoundError<RepositoryError>) -> RuntimeError {
    match err {
        RoundError::InsufficientResource {
            required,
            available,
        } => {
            debug!(
                target: "runtime::worker",
                %character,
                required,
                available,
                "skill rejected"
            );
            RuntimeError::InsufficientResource {
                required,
                available,
            }
        }
        RoundError::Link(RepositoryError::CharacterNotFound(id)) => {
            RuntimeError::CharacterNotFound(id)
        }
        RoundError::Link(err) => RuntimeError::Repository(err),
    }
}

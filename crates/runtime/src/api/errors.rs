//! Unified error types surfaced by the runtime API.
//!
//! Precondition failures describe a request that was refused and changed
//! nothing. Everything else is an internal failure.
use combat_core::{CharacterId, CombatRuleError, ErrorSeverity};
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} is not in combat")]
    NotInCombat(CharacterId),

    #[error("{0} does not exist")]
    CharacterNotFound(CharacterId),

    #[error("creature template '{0}' does not exist")]
    CreatureNotFound(String),

    #[error("creature '{0}' is not hostile")]
    CreatureNotHostile(String),

    #[error("{character} has not learned skill '{skill}'")]
    SkillUnknown {
        character: CharacterId,
        skill: String,
    },

    #[error("skill '{0}' does not exist")]
    SkillNotFound(String),

    #[error("skill costs {required} resource but only {available} is available")]
    InsufficientResource { required: u32, available: u32 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("combat worker command channel closed")]
    CommandChannelClosed,

    #[error("combat worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,
}

impl RuntimeError {
    /// Refused requests the caller can act on. State is unchanged.
    pub fn is_precondition(&self) -> bool {
        self.severity() == ErrorSeverity::Validation
    }
}

impl CombatRuleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::NotInCombat(_)
            | RuntimeError::CharacterNotFound(_)
            | RuntimeError::CreatureNotFound(_)
            | RuntimeError::CreatureNotHostile(_)
            | RuntimeError::SkillUnknown { .. }
            | RuntimeError::SkillNotFound(_)
            | RuntimeError::InsufficientResource { .. } => ErrorSeverity::Validation,
            RuntimeError::Repository(RepositoryError::CharacterNotFound(_)) => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::NotInCombat(_) => "NOT_IN_COMBAT",
            RuntimeError::CharacterNotFound(_) => "CHARACTER_NOT_FOUND",
            RuntimeError::CreatureNotFound(_) => "CREATURE_NOT_FOUND",
            RuntimeError::CreatureNotHostile(_) => "CREATURE_NOT_HOSTILE",
            RuntimeError::SkillUnknown { .. } => "SKILL_UNKNOWN",
            RuntimeError::SkillNotFound(_) => "SKILL_NOT_FOUND",
            RuntimeError::InsufficientResource { .. } => "INSUFFICIENT_RESOURCE",
            RuntimeError::Repository(_) => "REPOSITORY",
            RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_) => {
                "CHANNEL_CLOSED"
            }
            RuntimeError::WorkerJoin(_) => "WORKER_JOIN",
            RuntimeError::MissingOracles => "MISSING_ORACLES",
        }
    }
}

//! Error types raised by repository implementations.

use combat_core::CharacterId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("{0} has no stored record")]
    CharacterNotFound(CharacterId),

    #[error("inventory of {character} needs {required} slots but holds at most {capacity}")]
    InventoryFull {
        character: CharacterId,
        required: usize,
        capacity: usize,
    },
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

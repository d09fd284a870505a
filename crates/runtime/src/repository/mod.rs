//! Repository layer for dynamic character data.
//!
//! Repositories handle data that CHANGES through combat:
//! - Character sheets (vitals, level, experience, gold)
//! - Inventory stacks
//! - Loadout stats and learned skills (read-only here)
//!
//! Static content (creatures, skills) is handled by oracles, not repositories.

use std::sync::Arc;

mod error;
mod memory;
mod records;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::{CharacterSeed, InMemoryStore};
pub use records::{CharacterRecord, Inventory};
pub use traits::{
    CharacterRepository, InventoryRepository, LoadoutRepository, SkillBookRepository,
};

/// The set of stores a combat worker reads and writes.
#[derive(Clone)]
pub struct CombatStores {
    pub characters: Arc<dyn CharacterRepository>,
    pub inventories: Arc<dyn InventoryRepository>,
    pub loadouts: Arc<dyn LoadoutRepository>,
    pub skill_books: Arc<dyn SkillBookRepository>,
}

impl CombatStores {
    /// Every role served by one in-memory store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            characters: store.clone(),
            inventories: store.clone(),
            loadouts: store.clone(),
            skill_books: store,
        }
    }
}

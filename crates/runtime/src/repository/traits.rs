//! Repository contracts for the external stores combat reads and writes.
//!
//! Implementations are synchronous and must be `Send + Sync`; the combat
//! worker calls them from its own task.

use combat_core::{BaseStats, CharacterId, LootDrop, Progress, Vitals};

use super::error::Result;
use super::records::{CharacterRecord, Inventory};

/// Character sheets: level, experience, gold and vitals.
pub trait CharacterRepository: Send + Sync {
    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>>;

    /// Overwrite current HP and resource. Maxima are left untouched.
    fn save_vitals(&self, id: CharacterId, vitals: Vitals) -> Result<()>;

    /// Apply a victory in one atomic unit: progress (experience, gold, level,
    /// vitals) plus loot stacking. Either everything lands or nothing does.
    fn commit_settlement(
        &self,
        id: CharacterId,
        progress: Progress,
        loot: &[LootDrop],
    ) -> Result<()>;
}

/// Inventory contents.
pub trait InventoryRepository: Send + Sync {
    fn inventory(&self, id: CharacterId) -> Result<Inventory>;
}

/// Aggregated base stats including equipped gear.
pub trait LoadoutRepository: Send + Sync {
    fn base_stats(&self, id: CharacterId) -> Result<BaseStats>;
}

/// Skills a character has learned.
pub trait SkillBookRepository: Send + Sync {
    fn knows(&self, id: CharacterId, skill_id: &str) -> Result<bool>;
}

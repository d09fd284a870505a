//! One in-memory store backing every repository trait.
//!
//! All characters live behind a single lock, so a settlement validates and
//! applies under one write guard and is observed either fully or not at all.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use combat_core::{BaseStats, CharacterId, LootDrop, Progress, Vitals};

use crate::repository::{
    CharacterRecord, CharacterRepository, Inventory, InventoryRepository, LoadoutRepository,
    RepositoryError, Result, SkillBookRepository,
};

/// Default number of distinct item stacks a character can hold.
pub const DEFAULT_INVENTORY_SLOTS: usize = 20;

/// Everything needed to register a character.
#[derive(Clone, Debug)]
pub struct CharacterSeed {
    pub record: CharacterRecord,
    pub stats: BaseStats,
    pub skills: BTreeSet<String>,
    pub inventory: Inventory,
}

impl CharacterSeed {
    /// A fresh character whose pools match `stats`.
    pub fn new(id: CharacterId, name: impl Into<String>, stats: BaseStats) -> Self {
        let record = CharacterRecord::new(id, name, stats.max_hp, stats.max_resource);
        Self {
            record,
            stats,
            skills: BTreeSet::new(),
            inventory: Inventory::new(),
        }
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_record(mut self, record: CharacterRecord) -> Self {
        self.record = record;
        self
    }

    pub fn with_item(mut self, item_id: impl Into<String>, quantity: u32) -> Self {
        self.inventory.add(item_id, quantity);
        self
    }
}

struct Entry {
    record: CharacterRecord,
    stats: BaseStats,
    skills: BTreeSet<String>,
    inventory: Inventory,
}

/// In-memory implementation of the character, inventory, loadout and skill
/// book repositories.
pub struct InMemoryStore {
    characters: RwLock<HashMap<CharacterId, Entry>>,
    inventory_slots: usize,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_inventory_slots(DEFAULT_INVENTORY_SLOTS)
    }

    pub fn with_inventory_slots(inventory_slots: usize) -> Self {
        Self {
            characters: RwLock::new(HashMap::new()),
            inventory_slots,
        }
    }

    /// Register or replace a character.
    pub fn insert(&self, seed: CharacterSeed) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.insert(
            seed.record.id,
            Entry {
                record: seed.record,
                stats: seed.stats,
                skills: seed.skills,
                inventory: seed.inventory,
            },
        );
        Ok(())
    }

    pub fn learn(&self, id: CharacterId, skill_id: impl Into<String>) -> Result<()> {
        self.with_entry_mut(id, |entry| {
            entry.skills.insert(skill_id.into());
            Ok(())
        })
    }

    pub fn inventory_slots(&self) -> usize {
        self.inventory_slots
    }

    fn with_entry<T>(&self, id: CharacterId, f: impl FnOnce(&Entry) -> T) -> Result<T> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters
            .get(&id)
            .map(f)
            .ok_or(RepositoryError::CharacterNotFound(id))
    }

    fn with_entry_mut<T>(
        &self,
        id: CharacterId,
        f: impl FnOnce(&mut Entry) -> Result<T>,
    ) -> Result<T> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let entry = characters
            .get_mut(&id)
            .ok_or(RepositoryError::CharacterNotFound(id))?;
        f(entry)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterRepository for InMemoryStore {
    fn load(&self, id: CharacterId) -> Result<Option<CharacterRecord>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.get(&id).map(|entry| entry.record.clone()))
    }

    fn save_vitals(&self, id: CharacterId, vitals: Vitals) -> Result<()> {
        self.with_entry_mut(id, |entry| {
            let stored = &mut entry.record.vitals;
            stored.hp = vitals.hp.min(stored.max_hp);
            stored.resource = vitals.resource.min(stored.max_resource);
            Ok(())
        })
    }

    fn commit_settlement(
        &self,
        id: CharacterId,
        progress: Progress,
        loot: &[LootDrop],
    ) -> Result<()> {
        let capacity = self.inventory_slots;
        self.with_entry_mut(id, |entry| {
            let required = entry.inventory.slots_after(loot);
            if required > capacity {
                return Err(RepositoryError::InventoryFull {
                    character: id,
                    required,
                    capacity,
                });
            }

            entry.record.apply(progress);
            for drop in loot {
                entry.inventory.add(drop.item_id.clone(), drop.quantity);
            }
            Ok(())
        })
    }
}

impl InventoryRepository for InMemoryStore {
    fn inventory(&self, id: CharacterId) -> Result<Inventory> {
        self.with_entry(id, |entry| entry.inventory.clone())
    }
}

impl LoadoutRepository for InMemoryStore {
    fn base_stats(&self, id: CharacterId) -> Result<BaseStats> {
        self.with_entry(id, |entry| entry.stats.clone())
    }
}

impl SkillBookRepository for InMemoryStore {
    fn knows(&self, id: CharacterId, skill_id: &str) -> Result<bool> {
        self.with_entry(id, |entry| entry.skills.contains(skill_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: CharacterId = CharacterId(7);

    fn store(slots: usize) -> InMemoryStore {
        let store = InMemoryStore::with_inventory_slots(slots);
        store
            .insert(
                CharacterSeed::new(HERO, "Hero", BaseStats::default())
                    .with_skills(["fireball"])
                    .with_item("herb", 1),
            )
            .unwrap();
        store
    }

    fn loot(item: &str) -> LootDrop {
        LootDrop {
            item_id: item.into(),
            quantity: 1,
        }
    }

    fn richer(store: &InMemoryStore) -> Progress {
        let mut progress = store.load(HERO).unwrap().unwrap().progress();
        progress.gold += 50;
        progress.experience += 10;
        progress
    }

    #[test]
    fn settlement_applies_progress_and_loot_together() {
        let store = store(3);
        store
            .commit_settlement(HERO, richer(&store), &[loot("herb"), loot("fang")])
            .unwrap();

        let record = store.load(HERO).unwrap().unwrap();
        assert_eq!(record.gold, 50);
        assert_eq!(record.experience, 10);
        let inventory = store.inventory(HERO).unwrap();
        assert_eq!(inventory.quantity("herb"), 2);
        assert_eq!(inventory.quantity("fang"), 1);
    }

    #[test]
    fn overflowing_settlement_changes_nothing() {
        let store = store(2);
        let err = store
            .commit_settlement(HERO, richer(&store), &[loot("fang"), loot("pelt")])
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InventoryFull {
                required: 3,
                capacity: 2,
                ..
            }
        ));

        let record = store.load(HERO).unwrap().unwrap();
        assert_eq!(record.gold, 0);
        assert_eq!(record.experience, 0);
        assert_eq!(store.inventory(HERO).unwrap().slots(), 1);
    }

    #[test]
    fn vitals_are_clamped_to_stored_maxima() {
        let store = store(2);
        store
            .save_vitals(
                HERO,
                Vitals {
                    hp: 500,
                    max_hp: 500,
                    resource: 3,
                    max_resource: 50,
                },
            )
            .unwrap();
        let vitals = store.load(HERO).unwrap().unwrap().vitals;
        assert_eq!(vitals.hp, 100);
        assert_eq!(vitals.max_hp, 100);
        assert_eq!(vitals.resource, 3);
    }

    #[test]
    fn skill_book_and_missing_characters() {
        let store = store(2);
        assert!(store.knows(HERO, "fireball").unwrap());
        assert!(!store.knows(HERO, "meteor").unwrap());
        store.learn(HERO, "meteor").unwrap();
        assert!(store.knows(HERO, "meteor").unwrap());

        assert!(store.load(CharacterId(99)).unwrap().is_none());
        assert!(matches!(
            store.base_stats(CharacterId(99)),
            Err(RepositoryError::CharacterNotFound(CharacterId(99)))
        ));
    }
}

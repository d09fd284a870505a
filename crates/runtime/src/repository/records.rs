//! Persistent per-character records.

use std::collections::{BTreeMap, BTreeSet};

use combat_core::{CharacterId, LootDrop, Progress, Vitals};
use serde::{Deserialize, Serialize};

/// The stored character sheet touched by combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    pub vitals: Vitals,
}

impl CharacterRecord {
    /// A level-1 character at full health.
    pub fn new(id: CharacterId, name: impl Into<String>, max_hp: u32, max_resource: u32) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            experience: 0,
            gold: 0,
            vitals: Vitals {
                hp: max_hp,
                max_hp,
                resource: max_resource,
                max_resource,
            },
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            experience: self.experience,
            gold: self.gold,
            vitals: self.vitals,
        }
    }

    pub fn apply(&mut self, progress: Progress) {
        self.level = progress.level;
        self.experience = progress.experience;
        self.gold = progress.gold;
        self.vitals = progress.vitals;
    }
}

/// Item stacks keyed by item id. Each distinct item occupies one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    stacks: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.stacks.get(item_id).copied().unwrap_or(0)
    }

    /// Number of occupied slots.
    pub fn slots(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Slots needed after stacking `loot` onto the current contents.
    pub fn slots_after(&self, loot: &[LootDrop]) -> usize {
        let new_items: BTreeSet<&str> = loot
            .iter()
            .filter(|drop| !self.stacks.contains_key(&drop.item_id))
            .map(|drop| drop.item_id.as_str())
            .collect();
        self.stacks.len() + new_items.len()
    }

    pub fn add(&mut self, item_id: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let stack = self.stacks.entry(item_id.into()).or_insert(0);
        *stack = stack.saturating_add(quantity);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.stacks.iter().map(|(id, qty)| (id.as_str(), *qty))
    }
}

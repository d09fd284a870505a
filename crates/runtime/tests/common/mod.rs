//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use combat_core::{
    BaseStats, CharacterId, CreatureTemplate, Element, LootEntry, ScalingStat, ScriptedRng,
    SkillDefinition, SkillEffect,
};
use combat_runtime::{
    CharacterSeed, CombatHandle, CombatStores, CreatureOracleImpl, InMemoryStore, OracleManager,
    Runtime, RuntimeConfig, SkillOracleImpl,
};

pub const HERO: CharacterId = CharacterId(1);

/// Always hits, never crits, and takes the low end of every range.
pub const STEADY_DRAW: f64 = 0.1;

pub struct Arena {
    pub runtime: Runtime,
    pub handle: CombatHandle,
    pub store: Arc<InMemoryStore>,
    pub stores: CombatStores,
}

pub struct ArenaBuilder {
    creatures: Vec<CreatureTemplate>,
    skills: Vec<SkillDefinition>,
    seed: CharacterSeed,
    inventory_slots: usize,
}

impl ArenaBuilder {
    pub fn new() -> Self {
        Self {
            creatures: vec![training_dummy(), brute(), elder()],
            skills: vec![fireball()],
            seed: CharacterSeed::new(HERO, "Hero", BaseStats::default()).with_skills(["fireball"]),
            inventory_slots: 20,
        }
    }

    pub fn creature(mut self, template: CreatureTemplate) -> Self {
        self.creatures.push(template);
        self
    }

    pub fn seed(mut self, f: impl FnOnce(CharacterSeed) -> CharacterSeed) -> Self {
        self.seed = f(self.seed);
        self
    }

    pub fn inventory_slots(mut self, slots: usize) -> Self {
        self.inventory_slots = slots;
        self
    }

    pub async fn build(self) -> Arena {
        let store = Arc::new(InMemoryStore::with_inventory_slots(self.inventory_slots));
        store.insert(self.seed).unwrap();

        let creatures: CreatureOracleImpl = self.creatures.into_iter().collect();
        let skills: SkillOracleImpl = self.skills.into_iter().collect();
        let oracles = OracleManager::new(Arc::new(creatures), Arc::new(skills));

        let stores = CombatStores::in_memory(store.clone());
        let runtime = Runtime::builder()
            .config(RuntimeConfig::default())
            .oracles(oracles)
            .stores(stores.clone())
            .rng(ScriptedRng::constant(STEADY_DRAW))
            .build()
            .await
            .unwrap();
        let handle = runtime.handle();

        Arena {
            runtime,
            handle,
            store,
            stores,
        }
    }
}

/// Dies to a single basic attack (12 damage) and always drops a fang.
pub fn training_dummy() -> CreatureTemplate {
    CreatureTemplate::builder("training_dummy")
        .name("Training Dummy")
        .stats(BaseStats {
            max_hp: 12,
            ..BaseStats::default()
        })
        .rewards(100, 15, 15)
        .loot(LootEntry {
            item_id: "fang".into(),
            chance: 1.0,
            min_quantity: 2,
            max_quantity: 2,
        })
        .build()
}

/// Survives a few rounds and hits back for 12.
pub fn brute() -> CreatureTemplate {
    CreatureTemplate::builder("brute")
        .name("Brute")
        .stats(BaseStats {
            max_hp: 100,
            ..BaseStats::default()
        })
        .rewards(300, 40, 40)
        .build()
}

pub fn elder() -> CreatureTemplate {
    CreatureTemplate::builder("village_elder")
        .name("Village Elder")
        .hostile(false)
        .build()
}

pub fn fireball() -> SkillDefinition {
    SkillDefinition::new(
        "fireball",
        "Fireball",
        15,
        SkillEffect::Damage {
            scaling: Some(ScalingStat::Intelligence),
            element: Element::Fire,
            bonus_vs: Vec::new(),
            penetration: 0.0,
            bonus_crit: 0.0,
        },
    )
}

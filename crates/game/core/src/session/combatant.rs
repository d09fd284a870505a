//! One side of a battle.

use crate::combat::DefenseProfile;
use crate::config::CombatConfig;
use crate::effect::ActiveEffects;
use crate::stats::{BaseStats, StatSnapshot};

/// Current pools of one participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
    pub resource: u32,
    pub max_resource: u32,
}

/// A participant with its mutable battle state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub resource: u32,
    pub max_resource: u32,
    pub base: BaseStats,
    pub effects: ActiveEffects,
    pub defense: DefenseProfile,
}

impl Combatant {
    /// Fresh participant at full HP and resource.
    pub fn new(name: impl Into<String>, level: u32, base: BaseStats) -> Self {
        Self {
            name: name.into(),
            level,
            hp: base.max_hp,
            max_hp: base.max_hp,
            resource: base.max_resource,
            max_resource: base.max_resource,
            base,
            effects: ActiveEffects::new(),
            defense: DefenseProfile::default(),
        }
    }

    pub fn with_defense(mut self, defense: DefenseProfile) -> Self {
        self.defense = defense;
        self
    }

    /// Overrides pools; current values are clamped to their maxima.
    pub fn with_vitals(mut self, vitals: Vitals) -> Self {
        self.set_vitals(vitals);
        self
    }

    pub fn set_vitals(&mut self, vitals: Vitals) {
        self.max_hp = vitals.max_hp;
        self.max_resource = vitals.max_resource;
        self.hp = vitals.hp.min(vitals.max_hp);
        self.resource = vitals.resource.min(vitals.max_resource);
    }

    pub fn vitals(&self) -> Vitals {
        Vitals {
            hp: self.hp,
            max_hp: self.max_hp,
            resource: self.resource,
            max_resource: self.max_resource,
        }
    }

    pub fn snapshot(&self, config: &CombatConfig) -> StatSnapshot {
        StatSnapshot::compute(&self.base, &self.effects, config)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Subtracts HP (floored at 0). Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Adds HP (capped at max HP). Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.resource >= cost
    }
}

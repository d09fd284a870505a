//! Creature templates and oracle interface.
//!
//! A [`CreatureTemplate`] is the immutable definition of a hostile kind:
//! stats, type tags, resistances, loot table and skill list. Sessions hold it
//! behind an `Arc` and never modify it.

use crate::combat::{DefenseProfile, Resistances};
use crate::session::Combatant;
use crate::skill::EffectPayload;
use crate::stats::BaseStats;

/// One row of a loot table, rolled independently of the others.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub item_id: String,
    /// Drop probability in `[0, 1]`.
    pub chance: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
}

/// A creature action with its independent trigger probability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSkill {
    pub name: String,
    pub chance: f64,
    pub effect: EffectPayload,
}

/// Static definition of a creature kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureTemplate {
    pub id: String,
    pub name: String,
    pub level: u32,
    /// Only hostile creatures can be fought.
    #[cfg_attr(feature = "serde", serde(default = "hostile_default"))]
    pub hostile: bool,
    pub stats: BaseStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    pub experience: u64,
    pub gold_min: u32,
    pub gold_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<LootEntry>,
    /// Tried in declaration order each turn; empty means basic attacks only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<CreatureSkill>,
}

#[cfg(feature = "serde")]
fn hostile_default() -> bool {
    true
}

impl CreatureTemplate {
    pub fn defense(&self) -> DefenseProfile {
        DefenseProfile {
            types: self.types.clone(),
            resistances: self.resistances.clone(),
        }
    }

    /// Fresh combatant at full HP.
    pub fn spawn(&self) -> Combatant {
        Combatant::new(self.name.clone(), self.level, self.stats.clone()).with_defense(self.defense())
    }

    /// Creates a builder for test and tooling templates.
    pub fn builder(id: impl Into<String>) -> CreatureTemplateBuilder {
        CreatureTemplateBuilder::new(id)
    }
}

/// Builder for constructing creature templates.
#[derive(Clone, Debug)]
pub struct CreatureTemplateBuilder {
    template: CreatureTemplate,
}

impl CreatureTemplateBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            template: CreatureTemplate {
                name: id.clone(),
                id,
                level: 1,
                hostile: true,
                stats: BaseStats::default(),
                types: Vec::new(),
                resistances: Resistances::default(),
                experience: 0,
                gold_min: 0,
                gold_max: 0,
                loot: Vec::new(),
                skills: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.template.name = name.into();
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.template.level = level;
        self
    }

    pub fn hostile(mut self, hostile: bool) -> Self {
        self.template.hostile = hostile;
        self
    }

    pub fn stats(mut self, stats: BaseStats) -> Self {
        self.template.stats = stats;
        self
    }

    pub fn types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.template.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn resistances(mut self, resistances: Resistances) -> Self {
        self.template.resistances = resistances;
        self
    }

    pub fn rewards(mut self, experience: u64, gold_min: u32, gold_max: u32) -> Self {
        self.template.experience = experience;
        self.template.gold_min = gold_min;
        self.template.gold_max = gold_max;
        self
    }

    pub fn loot(mut self, entry: LootEntry) -> Self {
        self.template.loot.push(entry);
        self
    }

    pub fn skill(mut self, skill: CreatureSkill) -> Self {
        self.template.skills.push(skill);
        self
    }

    pub fn build(self) -> CreatureTemplate {
        self.template
    }
}

/// Oracle providing creature templates by id.
pub trait CreatureOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<CreatureTemplate>;

    /// All known template ids.
    fn all_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

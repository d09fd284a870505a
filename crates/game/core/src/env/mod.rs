//! Traits describing read-only battle data.
//!
//! Oracles expose creature templates and skill definitions; the random source
//! is an oracle too so rules stay deterministic under test.
mod creatures;
mod rng;
mod skills;

pub use creatures::{
    CreatureOracle, CreatureSkill, CreatureTemplate, CreatureTemplateBuilder, LootEntry,
};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use skills::{SkillDefinition, SkillOracle};

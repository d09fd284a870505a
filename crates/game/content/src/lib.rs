//! Data-driven combat content and loaders.
//!
//! This crate houses static battle content and provides loaders for RON/TOML
//! data files:
//! - Creature templates (stats, types, resistances, loot, skill list) via RON
//! - Player skill definitions via RON
//! - Combat tuning (`CombatConfig`) via TOML
//!
//! Content is consumed by runtime oracles and never appears in session state.
//! All loaders use combat-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, CreatureLoader, LoadResult, SkillLoader};

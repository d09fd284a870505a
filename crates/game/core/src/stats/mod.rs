//! Stat modifier pipeline.
//!
//! ```text
//! [ BaseStats (gear-aggregated, external) ]
//!      ↓  buff / debuff effects   (×(1 + magnitude), crit additive)
//!      ↓  status effects          (blind, rooted, slow)
//!      ↓  clamp                   (CombatConfig bounds)
//! [ StatSnapshot ]
//! ```
//!
//! Snapshots are never stored; they are recomputed whenever a roll needs them.

pub mod base;
pub mod snapshot;

pub use base::{BaseStats, ModifierDirection, ScalingStat, StatKey, parse_modifier_key};
pub use snapshot::StatSnapshot;

//! Effect application engine.
//!
//! Effects live on a participant's [`ActiveEffects`] set (unique by key) and
//! decay through [`tick_turn_start`], called once per side at the start of its
//! turn segment.

mod active;
mod tick;

pub use active::{
    ActiveEffect, ActiveEffects, CleanseScope, EffectId, EffectKind, EffectSummary, Polarity,
    status,
};
pub use tick::{TickReport, tick_turn_start};

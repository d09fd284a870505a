//! Skills: effect variants, definitions and the resolver that applies them.

mod effect;
mod resolver;

pub use effect::{
    DEFAULT_HOT_KEY, EffectEntry, EffectPayload, EffectTarget, InvalidEffect, SkillEffect,
    default_dot_key,
};
pub use resolver::{EffectContext, ResolutionReport, describe_damage, resolve_entries};

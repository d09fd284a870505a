//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `combat-core` defines the canonical combat rules (stat pipeline, hit and
//! damage rolls, active effects, skill effects, opponent behaviour, round
//! state machine, reward math) as pure APIs. Randomness enters only through
//! [`env::RngOracle`] and the external character store only through
//! [`session::PlayerLink`], so every rule is reproducible under test.
pub mod combat;
pub mod config;
pub mod effect;
pub mod env;
pub mod error;
pub mod log;
pub mod opponent;
pub mod reward;
pub mod session;
pub mod skill;
pub mod stats;

pub use combat::{
    AttackOutcome, AttackResult, DamageRequest, DamageRoll, DefenseProfile, Element, ElementalNote,
    Resistances, calculate_damage, check_hit, hit_chance, resolve_attack,
};
pub use config::CombatConfig;
pub use effect::{
    ActiveEffect, ActiveEffects, CleanseScope, EffectId, EffectKind, EffectSummary, Polarity,
    tick_turn_start,
};
pub use env::{
    CreatureOracle, CreatureSkill, CreatureTemplate, LootEntry, PcgRng, RngOracle, ScriptedRng,
    SkillDefinition, SkillOracle,
};
pub use error::{CombatRuleError, ErrorSeverity};
pub use log::CombatLog;
pub use opponent::{OpponentAction, select_action};
pub use reward::{LootDrop, Progress, RewardRoll, SettledProgress, roll_rewards, settle};
pub use session::{
    CharacterId, CombatSession, CombatSnapshot, CombatStatus, Combatant, PlayerAction, PlayerLink,
    PlayerRefresh, RoundError, RoundPhase, RoundResult, SideView, Vitals,
};
pub use skill::{EffectEntry, EffectPayload, EffectTarget, InvalidEffect, SkillEffect};
pub use stats::{BaseStats, ScalingStat, StatKey, StatSnapshot};

//! Combat resolution.
//!
//! Pure functions over [`StatSnapshot`](crate::stats::StatSnapshot)s; the only
//! side effect is consuming draws from the supplied [`RngOracle`](crate::env::RngOracle).
//!
//! - `hit_chance` / `check_hit`: accuracy vs evasion
//! - `calculate_damage`: scaling, type bonus, mitigation, element, crit
//! - `resolve_attack`: hit check followed by damage

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{
    DamageRequest, DamageRoll, DefenseProfile, Element, ElementalNote, Resistances, base_damage,
    calculate_damage,
};
pub use hit::{check_hit, hit_chance};
pub use result::{AttackOutcome, AttackResult, resolve_attack};

//! Hit chance and accuracy calculations.

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::stats::StatSnapshot;

/// Calculate hit chance based on accuracy vs evasion.
///
/// # Formula
///
/// ```text
/// hit_chance = base + (accuracy - 1.0) - evasion
/// clamped to [min, max]
/// ```
pub fn hit_chance(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    config: &CombatConfig,
) -> f64 {
    let chance = config.base_hit_chance + (attacker.accuracy - 1.0) - defender.evasion;
    chance.clamp(config.min_hit_chance, config.max_hit_chance)
}

/// Check if an attack hits. Consumes exactly one draw.
pub fn check_hit(
    attacker: &StatSnapshot,
    defender: &StatSnapshot,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
) -> bool {
    rng.next_f64() < hit_chance(attacker, defender, config)
}

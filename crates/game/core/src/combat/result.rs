//! Attack outcome: hit check followed by a damage roll.

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::stats::StatSnapshot;

use super::damage::{DamageRequest, DamageRoll, DefenseProfile, calculate_damage};
use super::hit::check_hit;

/// How an attack landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
    Critical,
}

/// Result of one attack against a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub outcome: AttackOutcome,
    /// `None` on a miss.
    pub damage: Option<DamageRoll>,
}

impl AttackResult {
    pub const fn miss() -> Self {
        Self {
            outcome: AttackOutcome::Miss,
            damage: None,
        }
    }

    pub fn landed(roll: DamageRoll) -> Self {
        Self {
            outcome: if roll.critical {
                AttackOutcome::Critical
            } else {
                AttackOutcome::Hit
            },
            damage: Some(roll),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.outcome != AttackOutcome::Miss
    }

    pub fn amount(&self) -> u32 {
        self.damage.map_or(0, |roll| roll.amount)
    }
}

/// Runs the hit check, then the damage roll on a hit.
///
/// Draw order: one draw for the hit, then one for the crit (hits only).
pub fn resolve_attack(
    attacker: &StatSnapshot,
    attacker_level: u32,
    defender: &StatSnapshot,
    defense: &DefenseProfile,
    request: &DamageRequest,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
) -> AttackResult {
    if !check_hit(attacker, defender, rng, config) {
        return AttackResult::miss();
    }
    AttackResult::landed(calculate_damage(
        attacker,
        attacker_level,
        defender,
        defense,
        request,
        rng,
        config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::stats::BaseStats;

    fn snapshot() -> StatSnapshot {
        StatSnapshot::from_base(
            &BaseStats {
                evasion: 0.0,
                ..BaseStats::default()
            },
            &CombatConfig::default(),
        )
    }

    #[test]
    fn miss_skips_damage_roll() {
        let mut rng = ScriptedRng::new([0.99]);
        let result = resolve_attack(
            &snapshot(),
            1,
            &snapshot(),
            &DefenseProfile::default(),
            &DamageRequest::basic(),
            &mut rng,
            &CombatConfig::default(),
        );
        assert_eq!(result, AttackResult::miss());
        assert_eq!(result.amount(), 0);
    }

    #[test]
    fn hit_then_crit() {
        let mut rng = ScriptedRng::new([0.1, 0.0]);
        let result = resolve_attack(
            &snapshot(),
            1,
            &snapshot(),
            &DefenseProfile::default(),
            &DamageRequest::basic(),
            &mut rng,
            &CombatConfig::default(),
        );
        assert_eq!(result.outcome, AttackOutcome::Critical);
        assert_eq!(result.amount(), 18);
        assert_eq!(rng.remaining(), 0);
    }
}

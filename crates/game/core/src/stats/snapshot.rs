//! StatSnapshot - resolved stats for one resolution step.
//!
//! A snapshot folds a participant's active effects over its base totals and
//! clamps the result, so every roll sees values inside their valid domain.

use crate::config::CombatConfig;
use crate::effect::{ActiveEffects, EffectKind, status};

use super::base::{BaseStats, ScalingStat, StatKey, parse_modifier_key};

/// Fully-resolved, clamped stats. Never stored; recompute when needed.
///
/// `constitution`, `max_hp` and `max_resource` are informational. Rolls never
/// read them, and HP/resource pools stay capped by the combatant's stored
/// maxima, so `max_hp_*` and `max_resource_*` modifiers do not change healing
/// caps or current pools.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSnapshot {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub constitution: u32,
    pub max_hp: u32,
    pub max_resource: u32,
    pub armor: u32,
    pub defense: u32,
    pub accuracy: f64,
    pub evasion: f64,
    pub crit_chance: f64,
}

/// Unclamped working values while modifiers are folded in.
struct Totals {
    strength: f64,
    dexterity: f64,
    intelligence: f64,
    constitution: f64,
    max_hp: f64,
    max_resource: f64,
    armor: f64,
    defense: f64,
    accuracy: f64,
    evasion: f64,
    crit_chance: f64,
}

impl Totals {
    fn from_base(base: &BaseStats) -> Self {
        Self {
            strength: f64::from(base.strength),
            dexterity: f64::from(base.dexterity),
            intelligence: f64::from(base.intelligence),
            constitution: f64::from(base.constitution),
            max_hp: f64::from(base.max_hp),
            max_resource: f64::from(base.max_resource),
            armor: f64::from(base.armor),
            defense: f64::from(base.defense),
            accuracy: base.accuracy,
            evasion: base.evasion,
            crit_chance: base.crit_chance,
        }
    }

    fn slot(&mut self, stat: StatKey) -> &mut f64 {
        match stat {
            StatKey::Strength => &mut self.strength,
            StatKey::Dexterity => &mut self.dexterity,
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Constitution => &mut self.constitution,
            StatKey::MaxHp => &mut self.max_hp,
            StatKey::MaxResource => &mut self.max_resource,
            StatKey::Armor => &mut self.armor,
            StatKey::Defense => &mut self.defense,
            StatKey::Accuracy => &mut self.accuracy,
            StatKey::Evasion => &mut self.evasion,
            StatKey::CritChance => &mut self.crit_chance,
        }
    }
}

fn floor_at_least(value: f64, min: u32) -> u32 {
    if value.is_nan() {
        return min;
    }
    (value.floor().max(f64::from(min))).min(f64::from(u32::MAX)) as u32
}

fn clamp_ratio(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

impl StatSnapshot {
    /// Runs the modifier pipeline for one participant.
    ///
    /// 1. Buff/debuff effects named `<stat>_buff` / `<stat>_debuff` scale their
    ///    stat by `1 + magnitude`; crit chance modifiers add instead.
    /// 2. Statuses: blind cuts accuracy, rooted zeroes evasion, slow halves
    ///    evasion (rooted wins over slow).
    /// 3. Every field is floored/clamped into its valid domain.
    pub fn compute(base: &BaseStats, effects: &ActiveEffects, config: &CombatConfig) -> Self {
        let mut totals = Totals::from_base(base);

        for effect in effects
            .iter()
            .filter(|e| matches!(e.kind, EffectKind::Buff | EffectKind::Debuff))
        {
            let (Some((stat, _)), Some(magnitude)) =
                (parse_modifier_key(&effect.key), effect.magnitude)
            else {
                continue;
            };
            let slot = totals.slot(stat);
            if stat.is_additive() {
                *slot += magnitude;
            } else {
                *slot *= 1.0 + magnitude;
            }
        }

        let has_status =
            |key: &str| effects.of_kind(EffectKind::Status).any(|e| e.key == key);
        if has_status(status::BLIND) {
            totals.accuracy *= config.blind_accuracy_multiplier;
        }
        if has_status(status::ROOTED) {
            totals.evasion = 0.0;
        } else if has_status(status::SLOW) {
            totals.evasion *= config.slow_evasion_multiplier;
        }

        Self {
            strength: floor_at_least(totals.strength, 1),
            dexterity: floor_at_least(totals.dexterity, 1),
            intelligence: floor_at_least(totals.intelligence, 1),
            constitution: floor_at_least(totals.constitution, 1),
            max_hp: floor_at_least(totals.max_hp, 1),
            max_resource: floor_at_least(totals.max_resource, 0),
            armor: floor_at_least(totals.armor, 0),
            defense: floor_at_least(totals.defense, 0),
            accuracy: clamp_ratio(totals.accuracy, config.min_accuracy, config.max_accuracy),
            evasion: clamp_ratio(totals.evasion, config.min_evasion, config.max_evasion),
            crit_chance: clamp_ratio(
                totals.crit_chance,
                config.min_crit_chance,
                config.max_crit_chance,
            ),
        }
    }

    /// Snapshot with no active effects.
    pub fn from_base(base: &BaseStats, config: &CombatConfig) -> Self {
        Self::compute(base, &ActiveEffects::new(), config)
    }

    /// Attack power supplied by the given scaling stat.
    pub fn scaling(&self, stat: ScalingStat) -> u32 {
        match stat {
            ScalingStat::Strength => self.strength,
            ScalingStat::Dexterity => self.dexterity,
            ScalingStat::Intelligence => self.intelligence,
        }
    }
}

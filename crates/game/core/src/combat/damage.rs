//! Damage calculation.

use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::stats::{ScalingStat, StatSnapshot};

// ============================================================================
// Element
// ============================================================================

/// Element of a damage roll, matched against the defender's resistances.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumString, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Element {
    /// Weapons, claws, basic attacks.
    #[default]
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    Holy,
    Shadow,
    Arcane,
    Nature,
}

/// Elemental resistance per element; missing entries resist nothing.
///
/// Values above zero reduce damage (`0.3` = 30% less). Negative values are a
/// vulnerability and amplify damage.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Resistances(BTreeMap<Element, f64>);

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, element: Element, value: f64) -> Self {
        self.0.insert(element, value);
        self
    }

    pub fn get(&self, element: Element) -> f64 {
        self.0.get(&element).copied().unwrap_or(0.0)
    }

    pub fn multiplier(&self, element: Element) -> f64 {
        1.0 - self.get(element)
    }
}

impl FromIterator<(Element, f64)> for Resistances {
    fn from_iter<T: IntoIterator<Item = (Element, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Defensive traits of a participant that live outside its stat snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenseProfile {
    /// Type tags such as `undead` or `beast`.
    pub types: Vec<String>,
    pub resistances: Resistances,
}

impl DefenseProfile {
    pub fn has_any_type(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|w| self.types.iter().any(|t| t == w))
    }
}

// ============================================================================
// Damage Calculation
// ============================================================================

/// Parameters of one damage roll.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageRequest {
    pub element: Element,
    pub scaling: ScalingStat,
    /// Added to the attacker's crit chance before clamping.
    pub bonus_crit: f64,
    /// Fraction of the defender's mitigation ignored, clamped to `[0, 1]`.
    pub penetration: f64,
    /// Types this attack is especially effective against.
    pub bonus_vs: Vec<String>,
}

impl DamageRequest {
    /// Plain physical hit scaling from strength.
    pub fn basic() -> Self {
        Self {
            element: Element::Physical,
            scaling: ScalingStat::Strength,
            bonus_crit: 0.0,
            penetration: 0.0,
            bonus_vs: Vec::new(),
        }
    }
}

impl Default for DamageRequest {
    fn default() -> Self {
        Self::basic()
    }
}

/// How the defender's resistance shaped the roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementalNote {
    Neutral,
    Resisted,
    Vulnerable,
}

/// Outcome of a damage roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Final damage, always at least 1.
    pub amount: u32,
    pub critical: bool,
    /// The type bonus applied.
    pub effective: bool,
    pub elemental: ElementalNote,
}

/// Deterministic part of the damage formula (everything except the crit).
///
/// # Formula
///
/// ```text
/// raw        = scaling_stat + level × level_damage_factor
/// raw       ×= type_bonus_multiplier        (defender type ∈ bonus_vs)
/// mitigation = (defense + armor) × (1 − clamp(penetration, 0, 1))
/// mitigated  = max(1, raw − mitigation)
/// damage     = max(1, floor(mitigated × (1 − resistance[element])))
/// ```
pub fn base_damage(
    attacker: &StatSnapshot,
    attacker_level: u32,
    defender: &StatSnapshot,
    defense: &DefenseProfile,
    request: &DamageRequest,
    config: &CombatConfig,
) -> DamageRoll {
    let attack_power = f64::from(attacker.scaling(request.scaling));
    let mut raw = attack_power + f64::from(attacker_level) * f64::from(config.level_damage_factor);

    let effective = defense.has_any_type(&request.bonus_vs);
    if effective {
        raw *= config.type_bonus_multiplier;
    }

    let penetration = if request.penetration.is_nan() {
        0.0
    } else {
        request.penetration.clamp(0.0, 1.0)
    };
    let mitigation =
        (f64::from(defender.defense) + f64::from(defender.armor)) * (1.0 - penetration);
    let mitigated = (raw - mitigation).max(1.0);

    let resistance = defense.resistances.get(request.element);
    let elemental = if resistance > 0.0 {
        ElementalNote::Resisted
    } else if resistance < 0.0 {
        ElementalNote::Vulnerable
    } else {
        ElementalNote::Neutral
    };
    let scaled = (mitigated * (1.0 - resistance)).floor();
    let amount = if scaled.is_nan() || scaled < 1.0 {
        1
    } else {
        scaled.min(f64::from(u32::MAX)) as u32
    };

    DamageRoll {
        amount,
        critical: false,
        effective,
        elemental,
    }
}

/// Full damage roll: [`base_damage`] followed by a critical roll.
///
/// Crit chance is `clamp(attacker.crit_chance + bonus_crit)`; a crit multiplies
/// the damage by `crit_multiplier`, floored. Consumes exactly one draw.
pub fn calculate_damage(
    attacker: &StatSnapshot,
    attacker_level: u32,
    defender: &StatSnapshot,
    defense: &DefenseProfile,
    request: &DamageRequest,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
) -> DamageRoll {
    let mut roll = base_damage(attacker, attacker_level, defender, defense, request, config);

    let crit_chance = (attacker.crit_chance + request.bonus_crit)
        .clamp(config.min_crit_chance, config.max_crit_chance);
    if rng.next_f64() < crit_chance {
        roll.critical = true;
        let boosted = (f64::from(roll.amount) * config.crit_multiplier).floor();
        roll.amount = (boosted.min(f64::from(u32::MAX)) as u32).max(1);
    }

    roll
}

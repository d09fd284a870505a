//! Skill effect variants.
//!
//! A closed, tagged set of consequences. Content naming an unknown variant
//! fails to deserialize; entries that parse but carry nonsensical values are
//! caught by [`SkillEffect::validate`] and skipped during resolution.

use core::str::FromStr;

use crate::combat::Element;
use crate::effect::{CleanseScope, EffectKind};
use crate::stats::{ScalingStat, StatKey};

/// Which side an entry applies to, relative to the side using it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectTarget {
    Caster,
    Opponent,
}

#[cfg(feature = "serde")]
fn caster() -> EffectTarget {
    EffectTarget::Caster
}

#[cfg(feature = "serde")]
fn opponent() -> EffectTarget {
    EffectTarget::Opponent
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn one_effect() -> usize {
    1
}

/// One atomic consequence of using a skill or creature action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Damage roll against the opponent.
    Damage {
        #[cfg_attr(feature = "serde", serde(default))]
        scaling: Option<ScalingStat>,
        #[cfg_attr(feature = "serde", serde(default))]
        element: Element,
        #[cfg_attr(feature = "serde", serde(default))]
        bonus_vs: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        penetration: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        bonus_crit: f64,
    },
    /// Applies a named status such as `blind`, `rooted` or `slow`.
    Status {
        status: String,
        duration: i32,
        #[cfg_attr(feature = "serde", serde(default = "opponent"))]
        target: EffectTarget,
    },
    /// Restores `amount` HP plus the optional scaling stat.
    Heal {
        amount: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        scaling: Option<ScalingStat>,
        #[cfg_attr(feature = "serde", serde(default = "caster"))]
        target: EffectTarget,
    },
    Buff {
        stat: String,
        magnitude: f64,
        duration: i32,
        #[cfg_attr(feature = "serde", serde(default = "caster"))]
        target: EffectTarget,
    },
    /// `magnitude` is written positive; it is negated when applied.
    Debuff {
        stat: String,
        magnitude: f64,
        duration: i32,
        #[cfg_attr(feature = "serde", serde(default = "opponent"))]
        target: EffectTarget,
    },
    /// Nested effects. `radius` is carried for content compatibility only.
    Area {
        #[cfg_attr(feature = "serde", serde(default))]
        radius: u32,
        effects: Vec<EffectEntry>,
    },
    DamageOverTime {
        value: u32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        interval: u32,
        duration: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        key: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        element: Element,
        #[cfg_attr(feature = "serde", serde(default = "opponent"))]
        target: EffectTarget,
    },
    HealOverTime {
        value: u32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        interval: u32,
        duration: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        key: Option<String>,
        #[cfg_attr(feature = "serde", serde(default = "caster"))]
        target: EffectTarget,
    },
    /// Removes up to `count` effects of the given polarity, oldest first.
    Cleanse {
        #[cfg_attr(feature = "serde", serde(default))]
        scope: CleanseScope,
        #[cfg_attr(feature = "serde", serde(default = "one_effect"))]
        count: usize,
        #[cfg_attr(feature = "serde", serde(default = "caster"))]
        target: EffectTarget,
    },
}

/// Why an effect entry cannot be resolved.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidEffect {
    #[error("unknown stat '{0}'")]
    UnknownStat(String),

    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(i32),

    #[error("magnitude {0} is not a finite number")]
    InvalidMagnitude(f64),

    #[error("trigger chance {0} is outside [0, 1]")]
    InvalidChance(f64),

    #[error("effect key is empty")]
    EmptyKey,

    #[error("area effects nested deeper than {0}")]
    TooDeep(u32),
}

fn check_duration(duration: i32) -> Result<(), InvalidEffect> {
    if duration <= 0 {
        return Err(InvalidEffect::NonPositiveDuration(duration));
    }
    Ok(())
}

fn check_finite(value: f64) -> Result<(), InvalidEffect> {
    if !value.is_finite() {
        return Err(InvalidEffect::InvalidMagnitude(value));
    }
    Ok(())
}

impl SkillEffect {
    /// Plain physical damage with no modifiers.
    pub fn basic_damage() -> Self {
        Self::Damage {
            scaling: None,
            element: Element::Physical,
            bonus_vs: Vec::new(),
            penetration: 0.0,
            bonus_crit: 0.0,
        }
    }

    /// Side this entry lands on. Damage always targets the opponent; areas
    /// resolve their children individually.
    pub fn target(&self) -> Option<EffectTarget> {
        match self {
            Self::Damage { .. } => Some(EffectTarget::Opponent),
            Self::Area { .. } => None,
            Self::Status { target, .. }
            | Self::Heal { target, .. }
            | Self::Buff { target, .. }
            | Self::Debuff { target, .. }
            | Self::DamageOverTime { target, .. }
            | Self::HealOverTime { target, .. }
            | Self::Cleanse { target, .. } => Some(*target),
        }
    }

    /// Entries aimed at the opposing side must pass a hit check first.
    pub fn is_offensive(&self) -> bool {
        self.target() == Some(EffectTarget::Opponent)
    }

    /// Kind of the active effect this entry creates, if any.
    pub fn effect_kind(&self) -> Option<EffectKind> {
        match self {
            Self::Status { .. } => Some(EffectKind::Status),
            Self::Buff { .. } => Some(EffectKind::Buff),
            Self::Debuff { .. } => Some(EffectKind::Debuff),
            Self::DamageOverTime { .. } => Some(EffectKind::DamageOverTime),
            Self::HealOverTime { .. } => Some(EffectKind::HealOverTime),
            Self::Damage { .. } | Self::Heal { .. } | Self::Area { .. } | Self::Cleanse { .. } => {
                None
            }
        }
    }

    /// Checks values a deserializer cannot: stat names, durations, finiteness
    /// and area nesting depth.
    pub fn validate(&self, max_area_depth: u32) -> Result<(), InvalidEffect> {
        self.validate_at(0, max_area_depth)
    }

    fn validate_at(&self, depth: u32, max_depth: u32) -> Result<(), InvalidEffect> {
        match self {
            Self::Damage {
                penetration,
                bonus_crit,
                ..
            } => {
                check_finite(*penetration)?;
                check_finite(*bonus_crit)
            }
            Self::Status {
                status, duration, ..
            } => {
                if status.trim().is_empty() {
                    return Err(InvalidEffect::EmptyKey);
                }
                check_duration(*duration)
            }
            Self::Heal { .. } | Self::Cleanse { .. } => Ok(()),
            Self::Buff {
                stat,
                magnitude,
                duration,
                ..
            }
            | Self::Debuff {
                stat,
                magnitude,
                duration,
                ..
            } => {
                StatKey::from_str(stat).map_err(|_| InvalidEffect::UnknownStat(stat.clone()))?;
                check_finite(*magnitude)?;
                check_duration(*duration)
            }
            Self::DamageOverTime { duration, key, .. }
            | Self::HealOverTime { duration, key, .. } => {
                if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                    return Err(InvalidEffect::EmptyKey);
                }
                check_duration(*duration)
            }
            Self::Area { effects, .. } => {
                if depth >= max_depth {
                    return Err(InvalidEffect::TooDeep(max_depth));
                }
                effects
                    .iter()
                    .try_for_each(|entry| entry.validate_at(depth + 1, max_depth))
            }
        }
    }
}

/// Effect key for a damage-over-time entry without an explicit key.
pub fn default_dot_key(element: Element) -> String {
    match element {
        Element::Fire => "burning".into(),
        Element::Poison => "poisoned".into(),
        Element::Physical => "bleeding".into(),
        Element::Ice => "frostbite".into(),
        other => format!("{other}_dot"),
    }
}

/// Effect key for a heal-over-time entry without an explicit key.
pub const DEFAULT_HOT_KEY: &str = "regeneration";

/// An effect gated by an optional independent trigger chance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectEntry {
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance: Option<f64>,
    pub effect: SkillEffect,
}

impl EffectEntry {
    pub fn always(effect: SkillEffect) -> Self {
        Self {
            chance: None,
            effect,
        }
    }

    pub fn with_chance(effect: SkillEffect, chance: f64) -> Self {
        Self {
            chance: Some(chance),
            effect,
        }
    }

    pub fn validate(&self, max_area_depth: u32) -> Result<(), InvalidEffect> {
        self.validate_at(0, max_area_depth)
    }

    fn validate_at(&self, depth: u32, max_depth: u32) -> Result<(), InvalidEffect> {
        match self.chance {
            Some(chance) if !(0.0..=1.0).contains(&chance) => {
                return Err(InvalidEffect::InvalidChance(chance));
            }
            _ => {}
        }
        self.effect.validate_at(depth, max_depth)
    }
}

impl From<SkillEffect> for EffectEntry {
    fn from(effect: SkillEffect) -> Self {
        Self::always(effect)
    }
}

/// Either a single entry or an ordered list, evaluated in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    One(EffectEntry),
    Many(Vec<EffectEntry>),
}

impl EffectPayload {
    pub fn entries(&self) -> &[EffectEntry] {
        match self {
            Self::One(entry) => core::slice::from_ref(entry),
            Self::Many(entries) => entries,
        }
    }

    pub fn validate(&self, max_area_depth: u32) -> Result<(), InvalidEffect> {
        self.entries()
            .iter()
            .try_for_each(|entry| entry.validate(max_area_depth))
    }
}

impl From<SkillEffect> for EffectPayload {
    fn from(effect: SkillEffect) -> Self {
        Self::One(EffectEntry::always(effect))
    }
}

impl From<Vec<EffectEntry>> for EffectPayload {
    fn from(entries: Vec<EffectEntry>) -> Self {
        Self::Many(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buff(stat: &str, duration: i32) -> SkillEffect {
        SkillEffect::Buff {
            stat: stat.into(),
            magnitude: 0.2,
            duration,
            target: EffectTarget::Caster,
        }
    }

    #[test]
    fn offensive_entries_target_the_opponent() {
        assert!(SkillEffect::basic_damage().is_offensive());
        assert!(!buff("strength", 2).is_offensive());
        let cleanse_enemy = SkillEffect::Cleanse {
            scope: CleanseScope::Positive,
            count: 1,
            target: EffectTarget::Opponent,
        };
        assert!(cleanse_enemy.is_offensive());
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert_eq!(buff("strength", 2).validate(4), Ok(()));
        assert_eq!(
            buff("luck", 2).validate(4),
            Err(InvalidEffect::UnknownStat("luck".into()))
        );
        assert_eq!(
            buff("armor", 0).validate(4),
            Err(InvalidEffect::NonPositiveDuration(0))
        );
        assert_eq!(
            EffectEntry::with_chance(buff("armor", 1), 1.5).validate(4),
            Err(InvalidEffect::InvalidChance(1.5))
        );
    }

    #[test]
    fn area_depth_is_bounded() {
        let mut effect = SkillEffect::basic_damage();
        for _ in 0..3 {
            effect = SkillEffect::Area {
                radius: 2,
                effects: vec![effect.into()],
            };
        }
        assert_eq!(effect.validate(4), Ok(()));
        assert_eq!(effect.validate(2), Err(InvalidEffect::TooDeep(2)));
    }

    #[test]
    fn dot_keys_follow_element() {
        assert_eq!(default_dot_key(Element::Fire), "burning");
        assert_eq!(default_dot_key(Element::Poison), "poisoned");
        assert_eq!(default_dot_key(Element::Shadow), "shadow_dot");
    }

    #[test]
    fn payload_entries_preserve_order() {
        let payload = EffectPayload::Many(vec![
            SkillEffect::basic_damage().into(),
            buff("strength", 2).into(),
        ]);
        assert_eq!(payload.entries().len(), 2);
        assert_eq!(payload.entries()[1].effect, buff("strength", 2));

        let single: EffectPayload = SkillEffect::basic_damage().into();
        assert_eq!(single.entries().len(), 1);
    }
}

//! Active effects attached to a participant.
//!
//! At most one effect per key lives on a participant: applying an effect whose
//! key is already present replaces the old instance instead of stacking.

use core::fmt;

/// Unique id of an applied effect instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The five recognized effect kinds.
///
/// Content naming any other kind fails to parse and is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Status,
    Buff,
    Debuff,
    DamageOverTime,
    HealOverTime,
}

impl EffectKind {
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Buff | Self::HealOverTime => Polarity::Positive,
            Self::Status | Self::Debuff | Self::DamageOverTime => Polarity::Negative,
        }
    }
}

/// Whether an effect helps or hinders its bearer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Positive,
    Negative,
}

/// Which effects a cleanse may remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CleanseScope {
    #[default]
    Negative,
    Positive,
    All,
}

impl CleanseScope {
    pub fn matches(self, polarity: Polarity) -> bool {
        match self {
            Self::All => true,
            Self::Negative => polarity == Polarity::Negative,
            Self::Positive => polarity == Polarity::Positive,
        }
    }
}

/// Status keys with built-in stat consequences.
pub mod status {
    /// Accuracy is multiplied by `CombatConfig::blind_accuracy_multiplier`.
    pub const BLIND: &str = "blind";
    /// Evasion drops to zero. Takes precedence over [`SLOW`].
    pub const ROOTED: &str = "rooted";
    /// Evasion is multiplied by `CombatConfig::slow_evasion_multiplier`.
    pub const SLOW: &str = "slow";
}

/// A temporary modifier attached to one participant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub id: EffectId,
    /// Skill or action that applied the effect.
    pub source: String,
    pub kind: EffectKind,
    pub key: String,
    pub magnitude: Option<f64>,
    /// Turns left; the effect is removed once this reaches zero.
    pub remaining: i32,
    pub applied_turn: u32,
    /// Turns between over-time pulses (1 = every turn).
    pub interval: u32,
    /// Turn-start ticks survived so far.
    pub elapsed: u32,
}

impl ActiveEffect {
    pub fn new(
        id: EffectId,
        source: impl Into<String>,
        kind: EffectKind,
        key: impl Into<String>,
        duration: i32,
        applied_turn: u32,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            kind,
            key: key.into(),
            magnitude: None,
            remaining: duration,
            applied_turn,
            interval: 1,
            elapsed: 0,
        }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    pub fn polarity(&self) -> Polarity {
        self.kind.polarity()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0
    }

    /// Whole-number magnitude used by over-time pulses.
    pub fn pulse_value(&self) -> u32 {
        self.magnitude.map_or(0, |m| m.max(0.0).floor() as u32)
    }
}

/// Compact view of an effect for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSummary {
    pub key: String,
    pub kind: EffectKind,
    pub remaining: i32,
    pub magnitude: Option<f64>,
}

/// Ordered set of effects on one participant, unique by key.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an effect, replacing any existing effect with the same key.
    ///
    /// Returns the replaced effect, if one was present.
    pub fn add(&mut self, effect: ActiveEffect) -> Option<ActiveEffect> {
        let replaced = self.remove(&effect.key);
        self.effects.push(effect);
        replaced
    }

    pub fn remove(&mut self, key: &str) -> Option<ActiveEffect> {
        let index = self.effects.iter().position(|e| e.key == key)?;
        Some(self.effects.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.key == key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes up to `count` effects matching `scope`, oldest first.
    pub fn cleanse(&mut self, scope: CleanseScope, count: usize) -> Vec<ActiveEffect> {
        let mut removed = Vec::new();
        let mut index = 0;
        while index < self.effects.len() && removed.len() < count {
            if scope.matches(self.effects[index].polarity()) {
                removed.push(self.effects.remove(index));
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Drops every effect whose duration has run out.
    pub fn remove_expired(&mut self) -> Vec<ActiveEffect> {
        let (expired, active): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(ActiveEffect::is_expired);
        self.effects = active;
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActiveEffect> {
        self.effects.iter_mut()
    }

    pub fn of_kind(&self, kind: EffectKind) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn summaries(&self) -> Vec<EffectSummary> {
        self.effects
            .iter()
            .map(|e| EffectSummary {
                key: e.key.clone(),
                kind: e.kind,
                remaining: e.remaining,
                magnitude: e.magnitude,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn effect(id: u64, kind: EffectKind, key: &str, duration: i32) -> ActiveEffect {
        ActiveEffect::new(EffectId(id), "test", kind, key, duration, 1)
    }

    #[test]
    fn reapplying_a_key_replaces_instead_of_stacking() {
        let mut effects = ActiveEffects::new();
        effects.add(effect(1, EffectKind::DamageOverTime, "burning", 3).with_magnitude(4.0));
        let replaced =
            effects.add(effect(2, EffectKind::DamageOverTime, "burning", 5).with_magnitude(9.0));

        assert_eq!(replaced.map(|e| e.id), Some(EffectId(1)));
        assert_eq!(effects.iter().filter(|e| e.key == "burning").count(), 1);
        let burning = effects.get("burning").unwrap();
        assert_eq!(burning.id, EffectId(2));
        assert_eq!(burning.remaining, 5);
    }

    #[test]
    fn cleanse_respects_scope_and_count() {
        let mut effects = ActiveEffects::new();
        effects.add(effect(1, EffectKind::Status, "blind", 2));
        effects.add(effect(2, EffectKind::Buff, "strength_buff", 2));
        effects.add(effect(3, EffectKind::DamageOverTime, "poisoned", 2));
        effects.add(effect(4, EffectKind::Debuff, "armor_debuff", 2));

        let removed = effects.cleanse(CleanseScope::Negative, 2);
        let keys: Vec<_> = removed.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["blind", "poisoned"]);
        assert!(effects.has("strength_buff"));
        assert!(effects.has("armor_debuff"));

        let removed = effects.cleanse(CleanseScope::All, 10);
        assert_eq!(removed.len(), 2);
        assert!(effects.is_empty());
    }

    #[test]
    fn unknown_kind_names_are_rejected() {
        assert_eq!(EffectKind::from_str("heal_over_time"), Ok(EffectKind::HealOverTime));
        assert!(EffectKind::from_str("aura").is_err());
    }

    #[test]
    fn remove_expired_keeps_live_effects() {
        let mut effects = ActiveEffects::new();
        effects.add(effect(1, EffectKind::Status, "slow", 0));
        effects.add(effect(2, EffectKind::Status, "rooted", 1));
        let expired = effects.remove_expired();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].key, "slow");
        assert_eq!(effects.len(), 1);
    }
}

//! Base totals and the stat vocabulary used by modifier effects.

use core::str::FromStr;

/// Base totals for one participant, already including equipment.
///
/// For characters these come from the external gear aggregation; for creatures
/// from the static template. Ratios (`accuracy`, `evasion`, `crit_chance`) are
/// probabilities in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
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

impl Default for BaseStats {
    /// A plain level-1 adventurer.
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            intelligence: 10,
            constitution: 10,
            max_hp: 100,
            max_resource: 50,
            armor: 0,
            defense: 0,
            accuracy: 0.9,
            evasion: 0.05,
            crit_chance: 0.05,
        }
    }
}

/// A stat that buff/debuff effects can target.
///
/// Effect keys follow the `<stat>_buff` / `<stat>_debuff` convention using the
/// snake_case names below, e.g. `strength_buff`, `crit_chance_debuff`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatKey {
    Strength,
    Dexterity,
    Intelligence,
    Constitution,
    MaxHp,
    MaxResource,
    Armor,
    Defense,
    Accuracy,
    Evasion,
    #[strum(to_string = "crit_chance", serialize = "critical_chance")]
    CritChance,
}

impl StatKey {
    /// Crit chance modifiers add their magnitude instead of scaling.
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::CritChance)
    }

    /// Effect key for a modifier on this stat.
    pub fn effect_key(self, direction: ModifierDirection) -> String {
        format!("{}_{}", self, direction.suffix())
    }
}

/// Whether a stat modifier raises or lowers its stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierDirection {
    Buff,
    Debuff,
}

impl ModifierDirection {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Buff => "buff",
            Self::Debuff => "debuff",
        }
    }
}

/// Splits an effect key such as `dexterity_debuff` into its stat and direction.
///
/// Returns `None` for keys outside the naming convention or naming an unknown
/// stat; such effects are carried but do not alter stats.
pub fn parse_modifier_key(key: &str) -> Option<(StatKey, ModifierDirection)> {
    let (stat, direction) = if let Some(stat) = key.strip_suffix("_debuff") {
        (stat, ModifierDirection::Debuff)
    } else if let Some(stat) = key.strip_suffix("_buff") {
        (stat, ModifierDirection::Buff)
    } else {
        return None;
    };
    StatKey::from_str(stat).ok().map(|stat| (stat, direction))
}

/// Stat that supplies attack power for a damage roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ScalingStat {
    #[default]
    Strength,
    Dexterity,
    Intelligence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_buff_and_debuff_keys() {
        assert_eq!(
            parse_modifier_key("strength_buff"),
            Some((StatKey::Strength, ModifierDirection::Buff))
        );
        assert_eq!(
            parse_modifier_key("max_hp_debuff"),
            Some((StatKey::MaxHp, ModifierDirection::Debuff))
        );
        assert_eq!(
            parse_modifier_key("critical_chance_buff"),
            Some((StatKey::CritChance, ModifierDirection::Buff))
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(parse_modifier_key("burning"), None);
        assert_eq!(parse_modifier_key("luck_buff"), None);
        assert_eq!(parse_modifier_key("_buff"), None);
    }

    #[test]
    fn effect_key_round_trips_through_parser() {
        let key = StatKey::CritChance.effect_key(ModifierDirection::Debuff);
        assert_eq!(key, "crit_chance_debuff");
        assert_eq!(
            parse_modifier_key(&key),
            Some((StatKey::CritChance, ModifierDirection::Debuff))
        );
    }
}

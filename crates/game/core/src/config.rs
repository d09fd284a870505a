/// Combat tuning constants.
///
/// Every number the resolver uses lives here so content authors can rebalance
/// without touching code. Defaults reproduce the reference balance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit chance before accuracy and evasion adjustments.
    pub base_hit_chance: f64,
    pub min_hit_chance: f64,
    pub max_hit_chance: f64,

    pub min_accuracy: f64,
    pub max_accuracy: f64,
    pub min_evasion: f64,
    pub max_evasion: f64,
    pub min_crit_chance: f64,
    pub max_crit_chance: f64,

    pub crit_multiplier: f64,
    /// Applied to raw damage when the defender carries a type the attack is strong against.
    pub type_bonus_multiplier: f64,
    /// Flat damage added per attacker level.
    pub level_damage_factor: u32,

    /// Accuracy multiplier while blinded.
    pub blind_accuracy_multiplier: f64,
    /// Evasion multiplier while slowed (rooted overrides this with zero).
    pub slow_evasion_multiplier: f64,

    pub experience_per_level: u64,
    pub level_up_hp_bonus: u32,
    pub level_up_resource_bonus: u32,

    /// Deepest allowed nesting of area effects.
    pub max_area_depth: u32,
}

impl CombatConfig {
    pub const DEFAULT_BASE_HIT_CHANCE: f64 = 0.95;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_EXPERIENCE_PER_LEVEL: u64 = 1000;

    pub fn new() -> Self {
        Self {
            base_hit_chance: Self::DEFAULT_BASE_HIT_CHANCE,
            min_hit_chance: 0.05,
            max_hit_chance: 0.95,
            min_accuracy: 0.05,
            max_accuracy: 0.95,
            min_evasion: 0.0,
            max_evasion: 0.9,
            min_crit_chance: 0.01,
            max_crit_chance: 0.95,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            type_bonus_multiplier: 1.5,
            level_damage_factor: 2,
            blind_accuracy_multiplier: 0.25,
            slow_evasion_multiplier: 0.5,
            experience_per_level: Self::DEFAULT_EXPERIENCE_PER_LEVEL,
            level_up_hp_bonus: 50,
            level_up_resource_bonus: 20,
            max_area_depth: 4,
        }
    }

    /// Experience total at which a character of `level` advances.
    pub fn level_up_threshold(&self, level: u32) -> u64 {
        u64::from(level) * self.experience_per_level
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

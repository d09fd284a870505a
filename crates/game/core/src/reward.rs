//! Victory rewards: rolling and progression math.
//!
//! Rolling happens here; applying the result atomically to persistent records
//! is the runtime's job. [`settle`] only computes the post-reward character
//! values so the store can write them in one transaction.

use crate::config::CombatConfig;
use crate::env::{CreatureTemplate, RngOracle};
use crate::session::Vitals;

/// A looted item stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item_id: String,
    pub quantity: u32,
}

/// Randomized rewards for defeating one creature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRoll {
    pub experience: u64,
    pub gold: u64,
    pub loot: Vec<LootDrop>,
}

/// Rolls gold and the loot table. Each loot entry is rolled independently;
/// successes draw a quantity within the entry's range.
pub fn roll_rewards(template: &CreatureTemplate, rng: &mut dyn RngOracle) -> RewardRoll {
    let gold = rng.range(template.gold_min, template.gold_max);
    let loot = template
        .loot
        .iter()
        .filter_map(|entry| {
            if !rng.chance(entry.chance) {
                return None;
            }
            let quantity = rng.range(entry.min_quantity, entry.max_quantity);
            (quantity > 0).then(|| LootDrop {
                item_id: entry.item_id.clone(),
                quantity,
            })
        })
        .collect();

    RewardRoll {
        experience: template.experience,
        gold: u64::from(gold),
        loot,
    }
}

/// Character values touched by a settlement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    pub vitals: Vitals,
}

/// Post-reward values, ready for an atomic write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettledProgress {
    pub progress: Progress,
    pub leveled_up: bool,
}

/// Adds a reward roll to `current`.
///
/// Experience accumulates. Reaching `level × experience_per_level` grants
/// exactly one level, raises max HP and max resource by the configured bonuses
/// and fully restores both pools.
pub fn settle(current: Progress, roll: &RewardRoll, config: &CombatConfig) -> SettledProgress {
    let mut progress = current;
    progress.experience = progress.experience.saturating_add(roll.experience);
    progress.gold = progress.gold.saturating_add(roll.gold);

    let leveled_up = progress.experience >= config.level_up_threshold(progress.level);
    if leveled_up {
        progress.level = progress.level.saturating_add(1);
        let vitals = &mut progress.vitals;
        vitals.max_hp = vitals.max_hp.saturating_add(config.level_up_hp_bonus);
        vitals.max_resource = vitals
            .max_resource
            .saturating_add(config.level_up_resource_bonus);
        vitals.hp = vitals.max_hp;
        vitals.resource = vitals.max_resource;
    }

    SettledProgress {
        progress,
        leveled_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{LootEntry, ScriptedRng};

    fn template() -> CreatureTemplate {
        CreatureTemplate::builder("wolf")
            .rewards(120, 10, 20)
            .loot(LootEntry {
                item_id: "wolf_pelt".into(),
                chance: 0.5,
                min_quantity: 1,
                max_quantity: 3,
            })
            .loot(LootEntry {
                item_id: "fang".into(),
                chance: 0.1,
                min_quantity: 1,
                max_quantity: 1,
            })
            .build()
    }

    fn progress(level: u32, experience: u64) -> Progress {
        Progress {
            level,
            experience,
            gold: 5,
            vitals: Vitals {
                hp: 40,
                max_hp: 100,
                resource: 10,
                max_resource: 50,
            },
        }
    }

    #[test]
    fn loot_entries_roll_independently() {
        // gold draw, pelt chance (hit), pelt quantity, fang chance (miss)
        let mut rng = ScriptedRng::new([0.0, 0.2, 0.99, 0.5]);
        let roll = roll_rewards(&template(), &mut rng);
        assert_eq!(roll.experience, 120);
        assert_eq!(roll.gold, 10);
        assert_eq!(
            roll.loot,
            vec![LootDrop {
                item_id: "wolf_pelt".into(),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn level_up_restores_to_new_maxima() {
        let roll = RewardRoll {
            experience: 150,
            gold: 12,
            loot: Vec::new(),
        };
        let settled = settle(progress(1, 900), &roll, &CombatConfig::default());
        assert!(settled.leveled_up);
        let p = settled.progress;
        assert_eq!(p.level, 2);
        assert_eq!(p.experience, 1050);
        assert_eq!(p.gold, 17);
        assert_eq!(p.vitals.max_hp, 150);
        assert_eq!(p.vitals.hp, 150);
        assert_eq!(p.vitals.max_resource, 70);
        assert_eq!(p.vitals.resource, 70);
    }

    #[test]
    fn at_most_one_level_per_settlement() {
        let roll = RewardRoll {
            experience: 5000,
            ..RewardRoll::default()
        };
        let settled = settle(progress(1, 0), &roll, &CombatConfig::default());
        assert_eq!(settled.progress.level, 2);
        assert_eq!(settled.progress.experience, 5000);
    }

    #[test]
    fn below_threshold_keeps_vitals() {
        let roll = RewardRoll {
            experience: 50,
            ..RewardRoll::default()
        };
        let settled = settle(progress(2, 100), &roll, &CombatConfig::default());
        assert!(!settled.leveled_up);
        assert_eq!(settled.progress.vitals.hp, 40);
    }
}

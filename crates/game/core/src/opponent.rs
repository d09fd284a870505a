//! Opponent action selection.
//!
//! Creatures carry an ordered skill list where every entry has its own trigger
//! probability. Each turn the list is walked in order and the first entry whose
//! draw succeeds is used; when nothing triggers the creature falls back to a
//! basic physical attack.

use crate::env::{CreatureSkill, RngOracle};
use crate::session::Combatant;
use crate::skill::{EffectContext, EffectEntry, ResolutionReport, SkillEffect, resolve_entries};

/// Name used in logs for the fallback attack.
pub const BASIC_ATTACK: &str = "attack";

/// What a creature does this turn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpponentAction<'a> {
    Skill(&'a CreatureSkill),
    BasicAttack,
}

/// Picks the creature's action. Consumes one draw per entry tried.
pub fn select_action<'a>(skills: &'a [CreatureSkill], rng: &mut dyn RngOracle) -> OpponentAction<'a> {
    skills
        .iter()
        .find(|skill| rng.chance(skill.chance))
        .map_or(OpponentAction::BasicAttack, OpponentAction::Skill)
}

/// Selects and resolves the creature's action against the player.
pub fn take_turn(
    skills: &[CreatureSkill],
    creature: &mut Combatant,
    player: &mut Combatant,
    ctx: &mut EffectContext<'_>,
) -> ResolutionReport {
    match select_action(skills, ctx.rng) {
        OpponentAction::Skill(skill) => {
            tracing::debug!(creature = %creature.name, skill = %skill.name, "creature uses skill");
            resolve_entries(&skill.name, creature, player, skill.effect.entries(), ctx)
        }
        OpponentAction::BasicAttack => {
            let attack = [EffectEntry::always(SkillEffect::basic_damage())];
            resolve_entries(BASIC_ATTACK, creature, player, &attack, ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::effect::status;
    use crate::env::ScriptedRng;
    use crate::log::CombatLog;
    use crate::skill::EffectTarget;
    use crate::stats::BaseStats;

    fn skill(name: &str, chance: f64, effect: SkillEffect) -> CreatureSkill {
        CreatureSkill {
            name: name.into(),
            chance,
            effect: effect.into(),
        }
    }

    fn skills() -> Vec<CreatureSkill> {
        vec![
            skill(
                "Blinding Dust",
                0.2,
                SkillEffect::Status {
                    status: status::BLIND.into(),
                    duration: 2,
                    target: EffectTarget::Opponent,
                },
            ),
            skill("Bite", 0.5, SkillEffect::basic_damage()),
        ]
    }

    #[test]
    fn first_successful_entry_wins() {
        let skills = skills();
        let mut rng = ScriptedRng::new([0.1]);
        assert_eq!(select_action(&skills, &mut rng), OpponentAction::Skill(&skills[0]));

        let mut rng = ScriptedRng::new([0.5, 0.3]);
        assert_eq!(select_action(&skills, &mut rng), OpponentAction::Skill(&skills[1]));
    }

    #[test]
    fn falls_back_to_basic_attack() {
        let skills = skills();
        let mut rng = ScriptedRng::new([0.9, 0.9]);
        assert_eq!(select_action(&skills, &mut rng), OpponentAction::BasicAttack);
        assert_eq!(rng.remaining(), 0);

        let mut rng = ScriptedRng::new([]);
        assert_eq!(select_action(&[], &mut rng), OpponentAction::BasicAttack);
    }

    #[test]
    fn fallback_attack_goes_through_hit_check() {
        let config = CombatConfig::default();
        let mut log = CombatLog::new();
        let mut next_id = 1;
        let mut creature = Combatant::new("Wolf", 1, BaseStats::default());
        let mut player = Combatant::new("Hero", 1, BaseStats::default());
        // no skills; hit check misses
        let mut rng = ScriptedRng::new([0.99]);
        let mut ctx = EffectContext {
            config: &config,
            rng: &mut rng,
            log: &mut log,
            next_effect_id: &mut next_id,
            turn: 1,
        };
        let report = take_turn(&[], &mut creature, &mut player, &mut ctx);
        assert_eq!(report.missed, 1);
        assert_eq!(player.hp, 100);
        assert!(log.mentions("Wolf's attack misses Hero"));
    }
}

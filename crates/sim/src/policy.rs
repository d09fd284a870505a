//! Hero decision making for unattended battles.

use combat_core::{CombatSnapshot, EffectEntry, SkillDefinition, SkillEffect};
use combat_runtime::ActionRequest;

/// HP percentage below which the hero tries to heal.
const HEAL_BELOW_PERCENT: u32 = 40;

/// Heals when low, otherwise casts the most expensive affordable damage skill,
/// falling back to basic attacks.
pub struct GreedyCaster {
    skills: Vec<SkillDefinition>,
}

impl GreedyCaster {
    pub fn new(mut skills: Vec<SkillDefinition>) -> Self {
        skills.sort_by(|a, b| b.cost.cmp(&a.cost).then_with(|| a.id.cmp(&b.id)));
        Self { skills }
    }

    pub fn choose(&self, snapshot: &CombatSnapshot) -> ActionRequest {
        let player = &snapshot.player;
        let affordable = |skill: &&SkillDefinition| skill.cost <= player.resource;

        let low = u64::from(player.hp) * 100
            < u64::from(player.max_hp) * u64::from(HEAL_BELOW_PERCENT);
        let pick = if low {
            self.skills
                .iter()
                .filter(affordable)
                .find(|skill| any_entry(skill.effect.entries(), heals))
        } else {
            None
        };

        pick.or_else(|| {
            self.skills
                .iter()
                .filter(affordable)
                .find(|skill| any_entry(skill.effect.entries(), deals_damage))
        })
        .map_or(ActionRequest::BasicAttack, |skill| {
            ActionRequest::Skill(skill.id.clone())
        })
    }
}

fn any_entry(entries: &[EffectEntry], test: fn(&SkillEffect) -> bool) -> bool {
    entries.iter().any(|entry| test(&entry.effect))
}

fn heals(effect: &SkillEffect) -> bool {
    matches!(
        effect,
        SkillEffect::Heal { .. } | SkillEffect::HealOverTime { .. }
    )
}

fn deals_damage(effect: &SkillEffect) -> bool {
    match effect {
        SkillEffect::Damage { .. } => true,
        SkillEffect::Area { effects, .. } => any_entry(effects, deals_damage),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use combat_core::{
        BaseStats, CharacterId, CombatSession, Combatant, CreatureTemplate, EffectTarget,
    };

    fn caster() -> GreedyCaster {
        GreedyCaster::new(vec![
            SkillDefinition::new("strike", "Strike", 8, SkillEffect::basic_damage()),
            SkillDefinition::new(
                "mend",
                "Mend",
                5,
                SkillEffect::Heal {
                    amount: 10,
                    scaling: None,
                    target: EffectTarget::Caster,
                },
            ),
        ])
    }

    fn snapshot(hp: u32, resource: u32) -> CombatSnapshot {
        let mut player = Combatant::new("Hero", 1, BaseStats::default());
        player.hp = hp;
        player.resource = resource;
        let template = Arc::new(CreatureTemplate::builder("wolf").build());
        CombatSession::new(CharacterId(1), player, template).opening_snapshot()
    }

    #[test]
    fn heals_when_low_and_attacks_otherwise() {
        let policy = caster();
        assert_eq!(
            policy.choose(&snapshot(20, 50)),
            ActionRequest::Skill("mend".into())
        );
        assert_eq!(
            policy.choose(&snapshot(90, 50)),
            ActionRequest::Skill("strike".into())
        );
    }

    #[test]
    fn falls_back_to_basic_attack_when_broke() {
        assert_eq!(caster().choose(&snapshot(90, 3)), ActionRequest::BasicAttack);
    }
}

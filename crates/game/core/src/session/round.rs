//! Round orchestration.

use core::fmt;

use crate::config::CombatConfig;
use crate::effect::tick_turn_start;
use crate::env::{RngOracle, SkillDefinition};
use crate::error::{CombatRuleError, ErrorSeverity};
use crate::log::CombatLog;
use crate::opponent::{BASIC_ATTACK, take_turn};
use crate::reward::{RewardRoll, roll_rewards};
use crate::skill::{EffectContext, EffectEntry, SkillEffect, resolve_entries};
use crate::stats::BaseStats;

use super::combatant::Vitals;
use super::phase::{Checkpoint, RoundPhase, Side};
use super::view::CombatSnapshot;
use super::{CombatSession, CombatStatus};

/// What the player does this round.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerAction {
    BasicAttack,
    /// A skill already confirmed as known to the character.
    Skill(SkillDefinition),
}

/// Authoritative player values read from the character store.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerRefresh {
    pub level: u32,
    pub vitals: Vitals,
    /// Gear-aggregated base totals.
    pub stats: BaseStats,
}

/// Connection to the external character store for one round.
pub trait PlayerLink {
    type Error;

    /// Re-reads the player's current values.
    fn refresh(&mut self) -> Result<PlayerRefresh, Self::Error>;

    /// Writes the player's HP and resource back.
    fn persist(&mut self, vitals: Vitals) -> Result<(), Self::Error>;
}

/// Errors that abort a round. The session must be considered unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RoundError<E> {
    #[error("insufficient resource: {required} required, {available} available")]
    InsufficientResource { required: u32, available: u32 },

    #[error("character store failed: {0}")]
    Link(E),
}

impl<E: fmt::Display + fmt::Debug> CombatRuleError for RoundError<E> {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResource { .. } => ErrorSeverity::Validation,
            Self::Link(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientResource { .. } => "ROUND_INSUFFICIENT_RESOURCE",
            Self::Link(_) => "ROUND_LINK",
        }
    }
}

/// Outcome of one played round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundResult {
    pub status: CombatStatus,
    pub snapshot: CombatSnapshot,
    /// Phases visited, in order.
    pub trace: Vec<RoundPhase>,
    /// Rolled on victory; settling them is the caller's job.
    pub rewards: Option<RewardRoll>,
}

impl CombatSession {
    /// Plays one full round: the player's segment, then the opponent's.
    ///
    /// On error nothing has been persisted, but `self` may be partially
    /// advanced; callers run rounds on a copy and keep it only on success.
    pub fn play_round<L: PlayerLink>(
        &mut self,
        action: &PlayerAction,
        link: &mut L,
        rng: &mut dyn RngOracle,
        config: &CombatConfig,
    ) -> Result<RoundResult, RoundError<L::Error>> {
        let mut log = CombatLog::new();
        let mut trace = Vec::new();
        let mut tick_delta = 0;
        let mut phase = RoundPhase::FIRST;

        loop {
            trace.push(phase);
            tracing::trace!(character = %self.character_id, turn = self.turn, %phase, "round phase");

            match phase {
                RoundPhase::PlayerEffectTick => {
                    tick_delta = tick_turn_start(&mut self.player, &mut log).hp_delta;
                }
                RoundPhase::PlayerAction => {
                    self.refresh_player(link, tick_delta)?;
                    self.player_action::<L::Error>(action, rng, config, &mut log)?;
                }
                RoundPhase::OpponentEffectTick => {
                    tick_turn_start(&mut self.opponent, &mut log);
                }
                RoundPhase::OpponentAction => {
                    let mut ctx = EffectContext {
                        config,
                        rng: &mut *rng,
                        log: &mut log,
                        next_effect_id: &mut self.next_effect_id,
                        turn: self.turn,
                    };
                    take_turn(
                        &self.template.skills,
                        &mut self.opponent,
                        &mut self.player,
                        &mut ctx,
                    );
                    link.persist(self.player.vitals()).map_err(RoundError::Link)?;
                }
                RoundPhase::DeathCheck(checkpoint) => {
                    if let Some(status) = self.death_check(checkpoint, link, &mut log)? {
                        let rewards = (status == CombatStatus::Won)
                            .then(|| roll_rewards(&self.template, &mut *rng));
                        tracing::debug!(
                            character = %self.character_id,
                            turn = self.turn,
                            %status,
                            "round ended the battle"
                        );
                        return Ok(RoundResult {
                            status,
                            snapshot: self.snapshot(status, log),
                            trace,
                            rewards,
                        });
                    }
                }
                RoundPhase::Advance => {
                    self.turn += 1;
                }
            }

            match phase.next() {
                Some(next) => phase = next,
                None => break,
            }
        }

        tracing::debug!(
            character = %self.character_id,
            turn = self.turn,
            player_hp = self.player.hp,
            opponent_hp = self.opponent.hp,
            "round complete"
        );
        Ok(RoundResult {
            status: CombatStatus::Active,
            snapshot: self.snapshot(CombatStatus::Active, log),
            trace,
            rewards: None,
        })
    }

    /// Step 3: authoritative resource/level/stats from the store; HP is the
    /// stored value plus whatever the turn-start tick just changed.
    fn refresh_player<L: PlayerLink>(
        &mut self,
        link: &mut L,
        tick_delta: i64,
    ) -> Result<(), RoundError<L::Error>> {
        let fresh = link.refresh().map_err(RoundError::Link)?;
        let mut stats = fresh.stats;
        stats.max_hp = fresh.vitals.max_hp;
        stats.max_resource = fresh.vitals.max_resource;

        let hp = (i64::from(fresh.vitals.hp) + tick_delta).clamp(0, i64::from(fresh.vitals.max_hp));
        self.player.level = fresh.level;
        self.player.base = stats;
        self.player.set_vitals(Vitals {
            hp: hp as u32,
            ..fresh.vitals
        });
        Ok(())
    }

    fn player_action<E>(
        &mut self,
        action: &PlayerAction,
        rng: &mut dyn RngOracle,
        config: &CombatConfig,
        log: &mut CombatLog,
    ) -> Result<(), RoundError<E>> {
        let basic;
        let (source, entries) = match action {
            PlayerAction::BasicAttack => {
                basic = [EffectEntry::always(SkillEffect::basic_damage())];
                (BASIC_ATTACK, &basic[..])
            }
            PlayerAction::Skill(skill) => {
                if !self.player.can_afford(skill.cost) {
                    return Err(RoundError::InsufficientResource {
                        required: skill.cost,
                        available: self.player.resource,
                    });
                }
                self.player.resource -= skill.cost;
                log.push(format!("{} uses {}.", self.player.name, skill.name));
                (skill.name.as_str(), skill.effect.entries())
            }
        };

        let mut ctx = EffectContext {
            config,
            rng,
            log,
            next_effect_id: &mut self.next_effect_id,
            turn: self.turn,
        };
        resolve_entries(source, &mut self.player, &mut self.opponent, entries, &mut ctx);
        Ok(())
    }

    fn death_check<L: PlayerLink>(
        &mut self,
        checkpoint: Checkpoint,
        link: &mut L,
        log: &mut CombatLog,
    ) -> Result<Option<CombatStatus>, RoundError<L::Error>> {
        match checkpoint.side() {
            Side::Opponent if self.opponent.is_defeated() => {
                log.push(format!("{} is defeated!", self.opponent.name));
                Ok(Some(CombatStatus::Won))
            }
            Side::Player if self.player.is_defeated() => {
                log.push(format!("{} has fallen.", self.player.name));
                // Vitals after the opponent's action are already persisted.
                if checkpoint == Checkpoint::AfterPlayerTick {
                    link.persist(self.player.vitals()).map_err(RoundError::Link)?;
                }
                Ok(Some(CombatStatus::Lost))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::effect::{ActiveEffect, EffectId, EffectKind};
    use crate::env::{CreatureSkill, CreatureTemplate, ScriptedRng};
    use crate::session::{CharacterId, Combatant};

    #[derive(Debug)]
    struct FakeLink {
        record: PlayerRefresh,
        persisted: Vec<Vitals>,
        refreshes: usize,
    }

    impl FakeLink {
        fn new(hp: u32, resource: u32) -> Self {
            Self {
                record: PlayerRefresh {
                    level: 1,
                    vitals: Vitals {
                        hp,
                        max_hp: 100,
                        resource,
                        max_resource: 50,
                    },
                    stats: BaseStats {
                        evasion: 0.0,
                        crit_chance: 0.01,
                        ..BaseStats::default()
                    },
                },
                persisted: Vec::new(),
                refreshes: 0,
            }
        }
    }

    impl PlayerLink for FakeLink {
        type Error = String;

        fn refresh(&mut self) -> Result<PlayerRefresh, String> {
            self.refreshes += 1;
            Ok(self.record.clone())
        }

        fn persist(&mut self, vitals: Vitals) -> Result<(), String> {
            self.record.vitals = vitals;
            self.persisted.push(vitals);
            Ok(())
        }
    }

    fn session(link: &FakeLink, template: CreatureTemplate) -> CombatSession {
        let player = Combatant::new("Hero", 1, link.record.stats.clone()).with_vitals(link.record.vitals);
        CombatSession::new(CharacterId(7), player, Arc::new(template))
    }

    /// Creature whose only skill always triggers and hits very hard.
    fn brute(max_hp: u32) -> CreatureTemplate {
        CreatureTemplate::builder("ogre")
            .name("Ogre")
            .stats(BaseStats {
                max_hp,
                strength: 500,
                evasion: 0.0,
                ..BaseStats::default()
            })
            .rewards(100, 3, 3)
            .skill(CreatureSkill {
                name: "Smash".into(),
                chance: 1.0,
                effect: SkillEffect::basic_damage().into(),
            })
            .build()
    }

    #[test]
    fn mutual_kill_counts_as_win_and_opponent_never_acts() {
        let mut link = FakeLink::new(100, 50);
        let mut session = session(&link, brute(5));
        // hit, no crit
        let mut rng = ScriptedRng::new([0.1, 0.9]);
        let result = session
            .play_round(&PlayerAction::BasicAttack, &mut link, &mut rng, &CombatConfig::default())
            .unwrap();

        assert_eq!(result.status, CombatStatus::Won);
        assert_eq!(
            result.trace.last(),
            Some(&RoundPhase::DeathCheck(Checkpoint::AfterPlayerAction))
        );
        assert!(!result.trace.contains(&RoundPhase::OpponentAction));
        assert_eq!(session.player.hp, 100);
        assert_eq!(result.rewards.map(|r| r.gold), Some(3));
        assert!(link.persisted.is_empty());
    }

    #[test]
    fn unaffordable_skill_is_rejected_before_resolution() {
        let mut link = FakeLink::new(100, 10);
        let mut session = session(&link, brute(500));
        let skill = SkillDefinition::new("fireball", "Fireball", 15, SkillEffect::basic_damage());
        let mut rng = ScriptedRng::new([]);

        let err = session
            .play_round(&PlayerAction::Skill(skill), &mut link, &mut rng, &CombatConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RoundError::InsufficientResource {
                required: 15,
                available: 10
            }
        ));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(session.opponent.hp, 500);
        assert_eq!(link.record.vitals.resource, 10);
        assert!(link.persisted.is_empty());
    }

    #[test]
    fn skill_cost_is_deducted_and_persisted() {
        let mut link = FakeLink::new(100, 30);
        let template = CreatureTemplate::builder("rat")
            .stats(BaseStats {
                max_hp: 500,
                evasion: 0.0,
                ..BaseStats::default()
            })
            .build();
        let mut session = session(&link, template);
        let skill = SkillDefinition::new("strike", "Strike", 15, SkillEffect::basic_damage());
        // player: hit, no crit; rat: miss
        let mut rng = ScriptedRng::new([0.1, 0.9, 0.99]);

        let result = session
            .play_round(&PlayerAction::Skill(skill), &mut link, &mut rng, &CombatConfig::default())
            .unwrap();
        assert_eq!(result.status, CombatStatus::Active);
        assert_eq!(result.trace.last(), Some(&RoundPhase::Advance));
        assert_eq!(session.turn, 2);
        assert_eq!(session.opponent.hp, 488);
        assert_eq!(link.persisted.len(), 1);
        assert_eq!(link.record.vitals.resource, 15);
        assert_eq!(link.refreshes, 1);
    }

    #[test]
    fn lethal_turn_start_tick_is_a_loss() {
        let mut link = FakeLink::new(4, 50);
        let mut session = session(&link, brute(500));
        session.player.effects.add(
            ActiveEffect::new(EffectId(1), "Venom", EffectKind::DamageOverTime, "poisoned", 3, 1)
                .with_magnitude(10.0),
        );
        let mut rng = ScriptedRng::new([]);

        let result = session
            .play_round(&PlayerAction::BasicAttack, &mut link, &mut rng, &CombatConfig::default())
            .unwrap();
        assert_eq!(result.status, CombatStatus::Lost);
        assert_eq!(result.trace.len(), 2);
        assert_eq!(link.refreshes, 0);
        assert_eq!(link.persisted.last().map(|v| v.hp), Some(0));
    }

    #[test]
    fn opponent_dying_to_its_own_tick_is_a_win() {
        let mut link = FakeLink::new(100, 50);
        let mut session = session(&link, brute(500));
        session.opponent.hp = 3;
        session.opponent.effects.add(
            ActiveEffect::new(EffectId(1), "Ignite", EffectKind::DamageOverTime, "burning", 2, 1)
                .with_magnitude(5.0),
        );
        // player misses
        let mut rng = ScriptedRng::new([0.99]);

        let result = session
            .play_round(&PlayerAction::BasicAttack, &mut link, &mut rng, &CombatConfig::default())
            .unwrap();
        assert_eq!(result.status, CombatStatus::Won);
        assert_eq!(
            result.trace.last(),
            Some(&RoundPhase::DeathCheck(Checkpoint::AfterOpponentTick))
        );
        assert_eq!(session.player.hp, 100);
    }

    #[test]
    fn refresh_applies_tick_delta_to_stored_hp() {
        let mut link = FakeLink::new(80, 50);
        let mut session = session(&link, CreatureTemplate::builder("slime").build());
        session.player.effects.add(
            ActiveEffect::new(EffectId(1), "Bleed", EffectKind::DamageOverTime, "bleeding", 3, 1)
                .with_magnitude(5.0),
        );
        // store drifted: something else healed the character to 90
        link.record.vitals.hp = 90;
        // player misses, slime misses
        let mut rng = ScriptedRng::new([0.99, 0.99]);

        session
            .play_round(&PlayerAction::BasicAttack, &mut link, &mut rng, &CombatConfig::default())
            .unwrap();
        assert_eq!(session.player.hp, 85);
        assert_eq!(link.record.vitals.hp, 85);
    }
}

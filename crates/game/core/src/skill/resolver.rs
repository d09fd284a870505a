//! Skill effect resolver.
//!
//! Walks an effect list in declaration order and dispatches each entry to the
//! damage calculator or the effect engine. Entries are independent: a failed
//! trigger, a miss or an invalid entry only affects that entry.

use core::str::FromStr;

use crate::combat::{DamageRequest, DamageRoll, ElementalNote, calculate_damage, check_hit};
use crate::config::CombatConfig;
use crate::effect::{ActiveEffect, EffectId, EffectKind};
use crate::env::RngOracle;
use crate::log::CombatLog;
use crate::session::Combatant;
use crate::stats::{ModifierDirection, StatKey};

use super::effect::{DEFAULT_HOT_KEY, EffectEntry, EffectTarget, SkillEffect, default_dot_key};

/// Shared state threaded through one resolution.
pub struct EffectContext<'a> {
    pub config: &'a CombatConfig,
    pub rng: &'a mut dyn RngOracle,
    pub log: &'a mut CombatLog,
    /// Session-wide counter for [`EffectId`]s.
    pub next_effect_id: &'a mut u64,
    pub turn: u32,
}

impl EffectContext<'_> {
    fn allocate_id(&mut self) -> EffectId {
        let id = EffectId(*self.next_effect_id);
        *self.next_effect_id += 1;
        id
    }
}

/// Tally of what a resolution did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub damage_dealt: u32,
    pub healing_done: u32,
    /// Keys of active effects created, in order.
    pub applied: Vec<String>,
    pub missed: usize,
    /// Entries whose trigger chance failed.
    pub not_triggered: usize,
    /// Entries rejected as invalid.
    pub invalid: usize,
}

/// Resolves `entries` used by `caster` (named `source`) against `opponent`.
pub fn resolve_entries(
    source: &str,
    caster: &mut Combatant,
    opponent: &mut Combatant,
    entries: &[EffectEntry],
    ctx: &mut EffectContext<'_>,
) -> ResolutionReport {
    let mut resolver = Resolver {
        source,
        caster,
        opponent,
        report: ResolutionReport::default(),
    };
    for entry in entries {
        if let Err(err) = entry.validate(ctx.config.max_area_depth) {
            tracing::warn!(source, error = %err, "skipping invalid effect entry");
            ctx.log.push(format!("{source} fizzles ({err})."));
            resolver.report.invalid += 1;
            continue;
        }
        resolver.resolve(entry, ctx);
    }
    resolver.report
}

struct Resolver<'s> {
    source: &'s str,
    caster: &'s mut Combatant,
    opponent: &'s mut Combatant,
    report: ResolutionReport,
}

impl Resolver<'_> {
    fn target(&mut self, target: EffectTarget) -> &mut Combatant {
        match target {
            EffectTarget::Caster => &mut *self.caster,
            EffectTarget::Opponent => &mut *self.opponent,
        }
    }

    fn resolve(&mut self, entry: &EffectEntry, ctx: &mut EffectContext<'_>) {
        if let Some(chance) = entry.chance {
            if !ctx.rng.chance(chance) {
                ctx.log
                    .push(format!("{}'s {} did not trigger.", self.caster.name, self.source));
                self.report.not_triggered += 1;
                return;
            }
        }

        if entry.effect.is_offensive() {
            let attacker = self.caster.snapshot(ctx.config);
            let defender = self.opponent.snapshot(ctx.config);
            if !check_hit(&attacker, &defender, ctx.rng, ctx.config) {
                ctx.log.push(format!(
                    "{}'s {} misses {}.",
                    self.caster.name, self.source, self.opponent.name
                ));
                self.report.missed += 1;
                return;
            }
        }

        match &entry.effect {
            SkillEffect::Damage {
                scaling,
                element,
                bonus_vs,
                penetration,
                bonus_crit,
            } => {
                let request = DamageRequest {
                    element: *element,
                    scaling: scaling.unwrap_or_default(),
                    bonus_crit: *bonus_crit,
                    penetration: *penetration,
                    bonus_vs: bonus_vs.clone(),
                };
                self.deal_damage(&request, ctx);
            }
            SkillEffect::Heal {
                amount,
                scaling,
                target,
            } => {
                let bonus = scaling.map_or(0, |stat| self.caster.snapshot(ctx.config).scaling(stat));
                let target = self.target(*target);
                let healed = target.heal(amount.saturating_add(bonus));
                ctx.log
                    .push(format!("{} recovers {healed} HP.", target.name));
                self.report.healing_done = self.report.healing_done.saturating_add(healed);
            }
            SkillEffect::Status {
                status,
                duration,
                target,
            } => {
                let effect = self.new_effect(EffectKind::Status, status.clone(), *duration, ctx);
                self.apply(*target, effect, ctx);
            }
            SkillEffect::Buff {
                stat,
                magnitude,
                duration,
                target,
            } => {
                if let Some(key) = modifier_key(stat, ModifierDirection::Buff) {
                    let effect = self
                        .new_effect(EffectKind::Buff, key, *duration, ctx)
                        .with_magnitude(*magnitude);
                    self.apply(*target, effect, ctx);
                }
            }
            SkillEffect::Debuff {
                stat,
                magnitude,
                duration,
                target,
            } => {
                if let Some(key) = modifier_key(stat, ModifierDirection::Debuff) {
                    let effect = self
                        .new_effect(EffectKind::Debuff, key, *duration, ctx)
                        .with_magnitude(-magnitude.abs());
                    self.apply(*target, effect, ctx);
                }
            }
            SkillEffect::DamageOverTime {
                value,
                interval,
                duration,
                key,
                element,
                target,
            } => {
                let key = key.clone().unwrap_or_else(|| default_dot_key(*element));
                let effect = self
                    .new_effect(EffectKind::DamageOverTime, key, *duration, ctx)
                    .with_magnitude(f64::from(*value))
                    .with_interval(*interval);
                self.apply(*target, effect, ctx);
            }
            SkillEffect::HealOverTime {
                value,
                interval,
                duration,
                key,
                target,
            } => {
                let key = key.clone().unwrap_or_else(|| DEFAULT_HOT_KEY.to_string());
                let effect = self
                    .new_effect(EffectKind::HealOverTime, key, *duration, ctx)
                    .with_magnitude(f64::from(*value))
                    .with_interval(*interval);
                self.apply(*target, effect, ctx);
            }
            SkillEffect::Cleanse {
                scope,
                count,
                target,
            } => {
                let target = self.target(*target);
                let removed = target.effects.cleanse(*scope, *count);
                if removed.is_empty() {
                    ctx.log.push(format!("Nothing to cleanse on {}.", target.name));
                } else {
                    let keys: Vec<_> = removed.iter().map(|e| e.key.as_str()).collect();
                    ctx.log.push(format!(
                        "{} is cleansed of {}.",
                        target.name,
                        keys.join(", ")
                    ));
                }
            }
            SkillEffect::Area { radius, effects } => {
                tracing::trace!(source = self.source, radius, "resolving area effect");
                for nested in effects {
                    self.resolve(nested, ctx);
                }
            }
        }
    }

    fn deal_damage(&mut self, request: &DamageRequest, ctx: &mut EffectContext<'_>) {
        let attacker = self.caster.snapshot(ctx.config);
        let defender = self.opponent.snapshot(ctx.config);
        let roll = calculate_damage(
            &attacker,
            self.caster.level,
            &defender,
            &self.opponent.defense,
            request,
            ctx.rng,
            ctx.config,
        );
        let dealt = self.opponent.take_damage(roll.amount);
        ctx.log.push(describe_damage(
            &self.caster.name,
            self.source,
            &self.opponent.name,
            dealt,
            &roll,
            request,
        ));
        self.report.damage_dealt = self.report.damage_dealt.saturating_add(dealt);
    }

    fn new_effect(
        &self,
        kind: EffectKind,
        key: String,
        duration: i32,
        ctx: &mut EffectContext<'_>,
    ) -> ActiveEffect {
        ActiveEffect::new(ctx.allocate_id(), self.source, kind, key, duration, ctx.turn)
    }

    fn apply(&mut self, target: EffectTarget, effect: ActiveEffect, ctx: &mut EffectContext<'_>) {
        let key = effect.key.clone();
        let target = self.target(target);
        let refreshed = target.effects.add(effect).is_some();
        if refreshed {
            ctx.log.push(format!("{key} on {} is refreshed.", target.name));
        } else {
            ctx.log.push(format!("{} is affected by {key}.", target.name));
        }
        self.report.applied.push(key);
    }
}

/// `<stat>_<buff|debuff>` for a validated stat name.
fn modifier_key(stat: &str, direction: ModifierDirection) -> Option<String> {
    StatKey::from_str(stat)
        .ok()
        .map(|stat| stat.effect_key(direction))
}

/// Player-facing sentence for one damage roll.
pub fn describe_damage(
    attacker: &str,
    source: &str,
    defender: &str,
    dealt: u32,
    roll: &DamageRoll,
    request: &DamageRequest,
) -> String {
    let mut line = format!("{attacker}'s {source} hits {defender} for {dealt} damage");
    if roll.critical {
        line.push_str(" (critical)");
    }
    line.push('.');
    if roll.effective {
        line.push_str(" It's super effective!");
    }
    match roll.elemental {
        ElementalNote::Resisted => {
            line.push_str(&format!(" {defender} resists {}.", request.element));
        }
        ElementalNote::Vulnerable => {
            line.push_str(&format!(" {defender} is vulnerable to {}.", request.element));
        }
        ElementalNote::Neutral => {}
    }
    line
}

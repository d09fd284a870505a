//! Turn-start effect processing.

use crate::log::CombatLog;
use crate::session::Combatant;

use super::active::EffectKind;

/// What one turn-start tick did to its participant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Net HP change from over-time pulses (negative = damage taken).
    pub hp_delta: i64,
    /// Keys of effects removed because their duration ran out.
    pub expired: Vec<String>,
}

/// Applies one turn-start tick to `target`.
///
/// For every active effect, in order: over-time effects pulse when their
/// elapsed tick count is a multiple of their interval (damage floors HP at 0,
/// healing caps at max HP), then the remaining duration drops by one. Effects
/// at zero or below are removed after the scan.
pub fn tick_turn_start(target: &mut Combatant, log: &mut CombatLog) -> TickReport {
    let mut pulses = Vec::new();
    for effect in target.effects.iter_mut() {
        effect.elapsed += 1;
        let due = effect.elapsed % effect.interval.max(1) == 0;
        if due && matches!(effect.kind, EffectKind::DamageOverTime | EffectKind::HealOverTime) {
            pulses.push((effect.kind, effect.key.clone(), effect.pulse_value()));
        }
        effect.remaining -= 1;
    }

    let mut report = TickReport::default();
    for (kind, key, value) in pulses {
        match kind {
            EffectKind::DamageOverTime => {
                let dealt = target.take_damage(value);
                report.hp_delta -= i64::from(dealt);
                log.push(format!("{} takes {dealt} damage from {key}.", target.name));
            }
            EffectKind::HealOverTime => {
                let healed = target.heal(value);
                report.hp_delta += i64::from(healed);
                log.push(format!("{} recovers {healed} HP from {key}.", target.name));
            }
            _ => {}
        }
    }

    for effect in target.effects.remove_expired() {
        log.push(format!("{} fades from {}.", effect.key, target.name));
        report.expired.push(effect.key);
    }

    if report.hp_delta != 0 || !report.expired.is_empty() {
        tracing::debug!(
            combatant = %target.name,
            hp_delta = report.hp_delta,
            expired = report.expired.len(),
            "turn-start tick"
        );
    }
    report
}

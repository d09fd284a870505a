//! Victory settlement: one atomic write, then independent notifications.

use combat_core::{
    CharacterId, CombatConfig, Progress, RewardRoll, SettledProgress, Vitals, settle,
};
use tracing::{info, warn};

use crate::events::{EventBus, RewardEvent};
use crate::repository::{CharacterRepository, RepositoryError};

/// Applies `roll` to the stored character and announces the result.
///
/// `final_vitals` are the player's pools when the battle ended. The commit is
/// all-or-nothing; notification failures are logged and never undo it.
pub(super) fn settle_victory(
    character: CharacterId,
    roll: &RewardRoll,
    final_vitals: Vitals,
    characters: &dyn CharacterRepository,
    config: &CombatConfig,
    bus: &EventBus,
) -> Result<SettledProgress, RepositoryError> {
    let record = characters
        .load(character)?
        .ok_or(RepositoryError::CharacterNotFound(character))?;

    let stored = record.vitals;
    let current = Progress {
        vitals: Vitals {
            hp: final_vitals.hp.min(stored.max_hp),
            resource: final_vitals.resource.min(stored.max_resource),
            ..stored
        },
        ..record.progress()
    };
    let settled = settle(current, roll, config);

    characters.commit_settlement(character, settled.progress, &roll.loot)?;
    info!(
        %character,
        experience = roll.experience,
        gold = roll.gold,
        items = roll.loot.len(),
        level = settled.progress.level,
        leveled_up = settled.leveled_up,
        "victory settled"
    );

    notify(
        bus,
        RewardEvent::StatsUpdated {
            character,
            progress: settled.progress,
            experience_gained: roll.experience,
            gold_gained: roll.gold,
            leveled_up: settled.leveled_up,
        },
    );
    if !roll.loot.is_empty() {
        notify(
            bus,
            RewardEvent::LootReceived {
                character,
                items: roll.loot.clone(),
            },
        );
    }

    Ok(settled)
}

fn notify(bus: &EventBus, event: RewardEvent) {
    if let Err(error) = bus.publish(event) {
        warn!(%error, "reward notification not delivered");
    }
}

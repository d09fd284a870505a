//! Headless battle simulator.
//!
//! Loads combat content, registers an in-memory hero and plays one battle
//! through the runtime handle, printing every event as it arrives.
mod config;
mod policy;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

use combat_content::ContentFactory;
use combat_core::{BaseStats, CharacterId, CombatSnapshot, SkillDefinition};
use combat_runtime::{
    CharacterSeed, CombatEvent, CombatHandle, CombatStores, Event, InMemoryStore, OracleManager,
    RewardEvent, Runtime, RuntimeConfig, Topic,
};

use config::SimConfig;
use policy::GreedyCaster;

const HERO: CharacterId = CharacterId(1);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    let factory = config
        .data_dir
        .clone()
        .map_or_else(ContentFactory::bundled, ContentFactory::new);

    let combat = factory.load_config().context("loading combat tuning")?;
    let oracles = OracleManager::from_content(&factory, &combat).context("loading content")?;
    let skills: Vec<SkillDefinition> = oracles
        .skills()
        .all_ids()
        .iter()
        .filter_map(|id| oracles.skills().skill(id))
        .collect();

    let store = Arc::new(InMemoryStore::new());
    store.insert(
        CharacterSeed::new(HERO, "Hero", hero_stats())
            .with_skills(skills.iter().map(|skill| skill.id.clone())),
    )?;
    let stores = CombatStores::in_memory(store);

    let runtime = Runtime::builder()
        .config(RuntimeConfig::from_env().with_combat(combat))
        .oracles(oracles)
        .stores(stores.clone())
        .build()
        .await?;
    let handle = runtime.handle();

    let printer = tokio::spawn(print_events(
        handle.subscribe(Topic::Combat),
        handle.subscribe(Topic::Reward),
        config.json_events,
    ));

    let finale = battle(&handle, &config, &GreedyCaster::new(skills)).await?;

    drop(handle);
    runtime.shutdown().await?;
    printer.await??;

    let record = stores
        .characters
        .load(HERO)?
        .context("hero record disappeared")?;
    println!();
    println!(
        "{} after {} turns: {} | level {} | {} XP | {} gold | HP {}/{} | resource {}/{}",
        record.name,
        finale.turn,
        finale.status,
        record.level,
        record.experience,
        record.gold,
        record.vitals.hp,
        record.vitals.max_hp,
        record.vitals.resource,
        record.vitals.max_resource,
    );
    for (item, quantity) in stores.inventories.inventory(HERO)?.iter() {
        println!("  {quantity}x {item}");
    }

    Ok(())
}

fn hero_stats() -> BaseStats {
    BaseStats {
        strength: 14,
        intelligence: 14,
        max_hp: 120,
        max_resource: 60,
        ..BaseStats::default()
    }
}

/// Fights until the battle ends, fleeing once the round limit is reached.
async fn battle(
    handle: &CombatHandle,
    config: &SimConfig,
    policy: &GreedyCaster,
) -> Result<CombatSnapshot> {
    let mut snapshot = handle.start_combat(HERO, config.creature.as_str()).await?;

    for _ in 0..config.max_rounds {
        let action = policy.choose(&snapshot);
        snapshot = match handle.act(HERO, action.clone()).await {
            Ok(next) => next,
            Err(err) if err.is_precondition() => {
                warn!(?action, error = %err, "action refused, attacking instead");
                handle.basic_attack(HERO).await?
            }
            Err(err) => return Err(err.into()),
        };
        if snapshot.status.is_terminal() {
            return Ok(snapshot);
        }
    }

    warn!(rounds = config.max_rounds, "round limit reached, fleeing");
    Ok(handle.flee(HERO).await?)
}

async fn print_events(
    mut combat: broadcast::Receiver<Event>,
    mut reward: broadcast::Receiver<Event>,
    json: bool,
) -> Result<()> {
    let (mut combat_open, mut reward_open) = (true, true);

    while combat_open || reward_open {
        let (topic, received) = tokio::select! {
            event = combat.recv(), if combat_open => (Topic::Combat, event),
            event = reward.recv(), if reward_open => (Topic::Reward, event),
        };

        match received {
            Ok(event) if json => println!("{}", serde_json::to_string(&event)?),
            Ok(event) => print_event(&event),
            Err(RecvError::Lagged(skipped)) => warn!(?topic, skipped, "event printer lagged"),
            Err(RecvError::Closed) => match topic {
                Topic::Combat => combat_open = false,
                Topic::Reward => reward_open = false,
            },
        }
    }

    Ok(())
}

fn print_event(event: &Event) {
    match event {
        Event::Combat(CombatEvent::Started { snapshot }) => {
            println!("=== {} vs {} ===", snapshot.player.name, snapshot.opponent.name);
            print_log(snapshot);
        }
        Event::Combat(CombatEvent::Updated { snapshot }) => {
            print_log(snapshot);
            println!(
                "  [turn {}] {} {}/{} HP {}/{} RP | {} {}/{} HP",
                snapshot.turn,
                snapshot.player.name,
                snapshot.player.hp,
                snapshot.player.max_hp,
                snapshot.player.resource,
                snapshot.player.max_resource,
                snapshot.opponent.name,
                snapshot.opponent.hp,
                snapshot.opponent.max_hp,
            );
        }
        Event::Combat(CombatEvent::Ended { status, snapshot, .. }) => {
            print_log(snapshot);
            println!("=== battle ended: {status} ===");
        }
        Event::Reward(RewardEvent::StatsUpdated {
            progress,
            experience_gained,
            gold_gained,
            leveled_up,
            ..
        }) => {
            let level_note = if *leveled_up { " LEVEL UP!" } else { "" };
            println!(
                "+{experience_gained} XP, +{gold_gained} gold (level {}){level_note}",
                progress.level
            );
        }
        Event::Reward(RewardEvent::LootReceived { items, .. }) => {
            for item in items {
                println!("loot: {}x {}", item.quantity, item.item_id);
            }
        }
    }
}

fn print_log(snapshot: &CombatSnapshot) {
    for line in &snapshot.log {
        println!("  {line}");
    }
}

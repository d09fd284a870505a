//! Session lifecycle through the public handle.

mod common;

use combat_core::{CharacterId, CombatStatus};
use combat_runtime::{
    CharacterRepository, CombatEvent, Event, RepositoryError, RuntimeError, Topic,
};
use common::{ArenaBuilder, HERO};

#[tokio::test]
async fn start_combat_is_idempotent() {
    let arena = ArenaBuilder::new().build().await;
    let mut combat = arena.handle.subscribe(Topic::Combat);

    let first = arena.handle.start_combat(HERO, "brute").await.unwrap();
    assert_eq!(first.status, CombatStatus::Active);
    assert_eq!(first.turn, 1);
    assert_eq!(first.opponent.hp, 100);

    let second = arena
        .handle
        .start_combat(HERO, "training_dummy")
        .await
        .unwrap();
    assert_eq!(second.creature_id, "brute");
    assert_eq!(second.turn, first.turn);
    assert_eq!(second.opponent, first.opponent);

    assert!(matches!(
        combat.try_recv(),
        Ok(Event::Combat(CombatEvent::Started { .. }))
    ));
    assert!(combat.try_recv().is_err(), "only one session was opened");
}

#[tokio::test]
async fn start_combat_rejects_bad_targets() {
    let arena = ArenaBuilder::new().build().await;

    let err = arena
        .handle
        .start_combat(HERO, "village_elder")
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CreatureNotHostile(ref id) if id == "village_elder"));
    assert!(err.is_precondition());

    let err = arena.handle.start_combat(HERO, "dragon").await.unwrap_err();
    assert!(matches!(err, RuntimeError::CreatureNotFound(_)));

    let err = arena
        .handle
        .start_combat(CharacterId(404), "brute")
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CharacterNotFound(CharacterId(404))));

    assert!(!arena.handle.in_combat(HERO).await.unwrap());
}

#[tokio::test]
async fn actions_require_an_active_session() {
    let arena = ArenaBuilder::new().build().await;

    let err = arena.handle.basic_attack(HERO).await.unwrap_err();
    assert!(matches!(err, RuntimeError::NotInCombat(HERO)));
    assert!(err.is_precondition());

    let err = arena.handle.flee(HERO).await.unwrap_err();
    assert!(matches!(err, RuntimeError::NotInCombat(HERO)));
}

#[tokio::test]
async fn round_trades_blows_and_persists_player_hp() {
    let arena = ArenaBuilder::new().build().await;
    arena.handle.start_combat(HERO, "brute").await.unwrap();

    let snapshot = arena.handle.basic_attack(HERO).await.unwrap();
    assert_eq!(snapshot.status, CombatStatus::Active);
    assert_eq!(snapshot.turn, 2);
    assert_eq!(snapshot.opponent.hp, 88);
    assert_eq!(snapshot.player.hp, 88);
    assert!(!snapshot.log.is_empty());

    let record = arena.store.load(HERO).unwrap().unwrap();
    assert_eq!(record.vitals.hp, 88);

    let info = arena.handle.session(HERO).await.unwrap().unwrap();
    assert_eq!(info.snapshot.turn, 2);
    assert!(info.last_action_at >= info.started_at);
}

#[tokio::test]
async fn unaffordable_skill_changes_nothing() {
    let arena = ArenaBuilder::new()
        .seed(|seed| {
            let mut record = seed.record.clone();
            record.vitals.resource = 10;
            seed.with_record(record)
        })
        .build()
        .await;
    arena.handle.start_combat(HERO, "brute").await.unwrap();

    let err = arena.handle.use_skill(HERO, "fireball").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::InsufficientResource {
            required: 15,
            available: 10
        }
    ));
    assert!(err.is_precondition());

    let record = arena.store.load(HERO).unwrap().unwrap();
    assert_eq!(record.vitals.resource, 10);
    assert_eq!(record.vitals.hp, 100);

    let info = arena.handle.session(HERO).await.unwrap().unwrap();
    assert_eq!(info.snapshot.turn, 1);
    assert_eq!(info.snapshot.opponent.hp, 100);
}

#[tokio::test]
async fn skills_must_be_learned_and_exist() {
    let arena = ArenaBuilder::new().build().await;
    arena.handle.start_combat(HERO, "brute").await.unwrap();

    let err = arena.handle.use_skill(HERO, "meteor").await.unwrap_err();
    assert!(matches!(err, RuntimeError::SkillUnknown { ref skill, .. } if skill == "meteor"));

    arena.store.learn(HERO, "meteor").unwrap();
    let err = arena.handle.use_skill(HERO, "meteor").await.unwrap_err();
    assert!(matches!(err, RuntimeError::SkillNotFound(_)));
}

#[tokio::test]
async fn skill_cost_survives_the_round() {
    let arena = ArenaBuilder::new().build().await;
    arena.handle.start_combat(HERO, "brute").await.unwrap();

    // intelligence 10 + level bonus 2
    let snapshot = arena.handle.use_skill(HERO, "fireball").await.unwrap();
    assert_eq!(snapshot.opponent.hp, 88);
    assert_eq!(snapshot.player.resource, 35);

    let record = arena.store.load(HERO).unwrap().unwrap();
    assert_eq!(record.vitals.resource, 35);
}

#[tokio::test]
async fn player_death_ends_the_session_as_a_loss() {
    let arena = ArenaBuilder::new()
        .seed(|seed| {
            let mut record = seed.record.clone();
            record.vitals.hp = 5;
            seed.with_record(record)
        })
        .build()
        .await;
    let mut combat = arena.handle.subscribe(Topic::Combat);
    let mut rewards = arena.handle.subscribe(Topic::Reward);
    arena.handle.start_combat(HERO, "brute").await.unwrap();

    let snapshot = arena.handle.basic_attack(HERO).await.unwrap();
    assert_eq!(snapshot.status, CombatStatus::Lost);
    assert_eq!(snapshot.player.hp, 0);
    assert!(!arena.handle.in_combat(HERO).await.unwrap());

    let record = arena.store.load(HERO).unwrap().unwrap();
    assert_eq!(record.vitals.hp, 0);
    assert_eq!(record.experience, 0);

    let _started = combat.try_recv().unwrap();
    match combat.try_recv() {
        Ok(Event::Combat(CombatEvent::Ended { status, .. })) => {
            assert_eq!(status, CombatStatus::Lost)
        }
        other => panic!("expected combat end, got {other:?}"),
    }
    assert!(rewards.try_recv().is_err());
}

#[tokio::test]
async fn fleeing_keeps_vitals_and_grants_nothing() {
    let arena = ArenaBuilder::new().build().await;
    arena.handle.start_combat(HERO, "brute").await.unwrap();
    arena.handle.basic_attack(HERO).await.unwrap();

    let snapshot = arena.handle.flee(HERO).await.unwrap();
    assert_eq!(snapshot.status, CombatStatus::Fled);
    assert!(!arena.handle.in_combat(HERO).await.unwrap());

    let record = arena.store.load(HERO).unwrap().unwrap();
    assert_eq!(record.vitals.hp, 88);
    assert_eq!(record.gold, 0);

    let fresh = arena.handle.start_combat(HERO, "brute").await.unwrap();
    assert_eq!(fresh.turn, 1);
    assert_eq!(fresh.player.hp, 88);
}

#[tokio::test]
async fn ended_events_serialize_with_snake_case_status() {
    let arena = ArenaBuilder::new().build().await;
    let mut combat = arena.handle.subscribe(Topic::Combat);
    arena.handle.start_combat(HERO, "brute").await.unwrap();
    arena.handle.flee(HERO).await.unwrap();

    let _started = combat.try_recv().unwrap();
    let ended = combat.try_recv().unwrap();
    let json = serde_json::to_string(&ended).unwrap();
    assert!(json.contains("\"fled\""), "{json}");
}

#[tokio::test]
async fn shutdown_joins_the_worker() {
    let arena = ArenaBuilder::new().build().await;
    drop(arena.handle);
    arena.runtime.shutdown().await.unwrap();
}

#[test]
fn repository_errors_are_internal() {
    let err = RuntimeError::from(RepositoryError::LockPoisoned);
    assert!(!err.is_precondition());
}

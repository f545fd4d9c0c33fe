//! Integration tests for the projectile lifecycle
//!
//! Projectiles are spawned directly into a session app so their flight,
//! expiry, and hit behavior can be asserted tick by tick without
//! depending on the automaton's aim.

use bevy::prelude::*;

use bossarena::headless::{build_session_app, HeadlessSessionConfig};
use bossarena::sim::components::{ActorKind, PlayerBody, Projectile};
use bossarena::sim::constants::TICK_DT;
use bossarena::{FightLog, FightLogEventType, GameState};

fn test_config() -> HeadlessSessionConfig {
    let unique = format!(
        "bossarena_test_{}_{:?}.json",
        std::process::id(),
        std::thread::current().id()
    );
    HeadlessSessionConfig {
        random_seed: Some(1),
        output_path: Some(std::env::temp_dir().join(unique).to_string_lossy().into_owned()),
        ..Default::default()
    }
}

fn spawn_test_projectile(
    app: &mut App,
    position: Vec3,
    direction: Vec3,
    speed: f32,
    owner: ActorKind,
    lifespan_ms: u32,
) -> Entity {
    let now = app
        .world()
        .resource::<bossarena::sim::components::SimClock>()
        .now();
    app.world_mut()
        .spawn((
            Projectile {
                id: 9999,
                direction,
                speed,
                damage: 10.0,
                owner,
                spawned_at: now,
                lifespan_ms,
                has_hit: false,
            },
            Transform::from_translation(position),
        ))
        .id()
}

fn projectile_position(app: &mut App, entity: Entity) -> Option<Vec3> {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation)
}

fn place_player(app: &mut App, position: Vec3) {
    let mut query = app
        .world_mut()
        .query_filtered::<(&mut Transform, &mut PlayerBody), With<PlayerBody>>();
    let (mut transform, mut body) = query.single_mut(app.world_mut());
    transform.translation = position;
    body.velocity = Vec3::ZERO;
}

#[test]
fn test_player_projectile_advances_at_full_speed() {
    let mut app = build_session_app(test_config());
    app.update();

    let start = Vec3::new(10.0, 0.0, 10.0);
    let entity = spawn_test_projectile(&mut app, start, Vec3::X, 12.0, ActorKind::Player, 3000);
    app.update();

    let pos = projectile_position(&mut app, entity).expect("still in flight");
    assert!((pos.x - (start.x + 12.0 * TICK_DT)).abs() < 1e-4);
    assert_eq!(pos.y, start.y);
    assert_eq!(pos.z, start.z);
}

#[test]
fn test_automaton_projectile_advances_at_reduced_speed() {
    let mut app = build_session_app(test_config());
    app.update();

    let start = Vec3::new(10.0, 0.0, -10.0);
    let entity = spawn_test_projectile(&mut app, start, Vec3::X, 12.0, ActorKind::Automaton, 3000);
    app.update();

    let pos = projectile_position(&mut app, entity).expect("still in flight");
    // Automaton shots fly at 60% of nominal speed.
    assert!((pos.x - (start.x + 12.0 * TICK_DT * 0.6)).abs() < 1e-4);
}

#[test]
fn test_projectile_expires_after_lifespan() {
    let mut app = build_session_app(test_config());
    app.update();

    let start = Vec3::new(15.0, 0.0, -15.0);
    let entity = spawn_test_projectile(&mut app, start, Vec3::X, 1.0, ActorKind::Player, 100);

    // 5 ticks = 83 ms: still alive.
    for _ in 0..5 {
        app.update();
    }
    assert!(projectile_position(&mut app, entity).is_some());

    // 9 ticks = 150 ms: past the 100 ms lifespan.
    for _ in 0..4 {
        app.update();
    }
    assert!(projectile_position(&mut app, entity).is_none());
}

#[test]
fn test_projectile_hits_opponent_once_and_despawns() {
    let mut app = build_session_app(test_config());
    app.update();

    place_player(&mut app, Vec3::new(0.0, 0.0, 10.0));
    let entity = spawn_test_projectile(
        &mut app,
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::X,
        12.0,
        ActorKind::Automaton,
        3000,
    );
    app.update();

    assert_eq!(app.world().resource::<GameState>().player_health, 90.0);
    assert!(projectile_position(&mut app, entity).is_none(), "removed on hit");

    // Despawned, so no second application.
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(app.world().resource::<GameState>().player_health, 90.0);

    let log = app.world().resource::<FightLog>();
    assert_eq!(log.filter_by_type(FightLogEventType::ProjectileHit).len(), 1);
}

#[test]
fn test_projectile_never_hits_its_owner() {
    let mut app = build_session_app(test_config());
    app.update();

    place_player(&mut app, Vec3::new(0.0, 0.0, 10.0));
    // Player-owned projectile spawned inside the player's hit margin.
    let entity = spawn_test_projectile(
        &mut app,
        Vec3::new(0.0, 0.0, 10.0),
        Vec3::X,
        12.0,
        ActorKind::Player,
        3000,
    );
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(app.world().resource::<GameState>().player_health, 100.0);
    assert!(projectile_position(&mut app, entity).is_some());
}

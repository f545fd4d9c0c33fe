//! Simulation core
//!
//! One `Update` pass of the Bevy schedule is one simulation tick. The
//! stages run in a fixed, chained order so that a melee kill and a
//! simultaneous projectile hit in the same tick both reach the outcome
//! stage, and a death/victory transition suppresses damage queued by
//! later stages of the same tick (via the guards in `GameState`).
//!
//! ## Tick order
//!
//! 1. **Clock** - advance the session clock
//! 2. **Movement** - player controller (ground ray, velocity, charge)
//! 3. **Melee** - resolve released attacks
//! 4. **EnemyAi** - pattern selection, targeting, bursts
//! 5. **Projectiles** - advance, expire, hit-test
//! 6. **Contact** - throttled proximity damage
//! 7. **Outcome** - apply queued damage through `GameState`
//! 8. **Publish** - snapshot published state

use bevy::prelude::*;

pub mod components;
pub mod constants;
pub mod contact;
pub mod enemy_ai;
pub mod intent;
pub mod movement;
pub mod projectiles;
pub mod publish;
pub mod resolver;
pub mod scenery;
pub mod utils;

use crate::combat::log::{FightLog, FightLogEventType};
use components::{
    Actor, ActorKind, AttackState, Automaton, GameRng, PlayerBody, Projectile, ProjectileIds,
    SimClock, SimSettings,
};
use constants::{AUTOMATON_SPAWN, PLAYER_SPAWN};

/// System set labels for the fixed per-tick stage ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    Clock,
    Movement,
    Melee,
    EnemyAi,
    Projectiles,
    Contact,
    Outcome,
    Publish,
}

/// Configures the ordering between simulation stages.
///
/// Call this once during app setup before adding simulation systems.
pub fn configure_sim_phase_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimPhase::Clock,
            SimPhase::Movement,
            SimPhase::Melee,
            SimPhase::EnemyAi,
            SimPhase::Projectiles,
            SimPhase::Contact,
            SimPhase::Outcome,
            SimPhase::Publish,
        )
            .chain(),
    );
}

/// Advance the session clock. Runs first every tick; all timers in the
/// simulation are re-evaluated against this clock rather than scheduled.
pub fn advance_clock(mut clock: ResMut<SimClock>, mut log: ResMut<FightLog>) {
    clock.tick += 1;
    clock.elapsed += clock.dt as f64;
    log.session_time = clock.elapsed;
}

/// Adds the core simulation systems and their resources.
///
/// The outcome stage itself lives in [`crate::combat::CombatPlugin`];
/// both must be added for a functioning session.
pub fn add_core_sim_systems(app: &mut App) {
    app.init_resource::<SimClock>()
        .init_resource::<GameRng>()
        .init_resource::<SimSettings>()
        .init_resource::<ProjectileIds>()
        .init_resource::<intent::PlayerIntent>()
        .init_resource::<scenery::Scenery>()
        .init_resource::<contact::ContactState>()
        .init_resource::<publish::FrameSnapshot>();

    app.add_systems(Update, advance_clock.in_set(SimPhase::Clock))
        .add_systems(
            Update,
            movement::update_player_movement.in_set(SimPhase::Movement),
        )
        .add_systems(
            Update,
            resolver::resolve_melee_attacks.in_set(SimPhase::Melee),
        )
        .add_systems(Update, enemy_ai::update_enemy_ai.in_set(SimPhase::EnemyAi))
        .add_systems(
            Update,
            (
                projectiles::move_projectiles,
                projectiles::process_projectile_hits,
            )
                .chain()
                .in_set(SimPhase::Projectiles),
        )
        .add_systems(
            Update,
            contact::check_contact_damage.in_set(SimPhase::Contact),
        )
        .add_systems(
            Update,
            publish::publish_frame_snapshot.in_set(SimPhase::Publish),
        );
}

/// Plugin bundling the stage ordering and the core systems.
pub struct SimPlugin;

impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        configure_sim_phase_ordering(app);
        add_core_sim_systems(app);
    }
}

/// Spawn the two actors at their configured starting positions. Actors
/// live for the whole session; death flips a flag in `GameState` rather
/// than despawning anything.
pub fn spawn_actors(commands: &mut Commands) {
    commands.spawn((
        Actor::new(ActorKind::Player),
        PlayerBody::default(),
        AttackState::default(),
        Transform::from_translation(Vec3::from_array(PLAYER_SPAWN)),
    ));
    commands.spawn((
        Actor::new(ActorKind::Automaton),
        Automaton::default(),
        Transform::from_translation(Vec3::from_array(AUTOMATON_SPAWN)),
    ));
}

/// Reset the session in place for a rematch: clock, health, score,
/// actor placement, and in-flight projectiles. The fight log keeps its
/// entries and records the reset.
pub fn reset_session(world: &mut World) {
    world
        .resource_mut::<crate::combat::game_state::GameState>()
        .reset_game_state();
    *world.resource_mut::<components::DamageFlash>() = components::DamageFlash::default();
    *world.resource_mut::<contact::ContactState>() = contact::ContactState::default();

    let clock_dt = world.resource::<SimClock>().dt;
    *world.resource_mut::<SimClock>() = SimClock::new(clock_dt);

    let projectiles: Vec<Entity> = world
        .query_filtered::<Entity, With<Projectile>>()
        .iter(world)
        .collect();
    for entity in projectiles {
        world.despawn(entity);
    }

    let mut actors = world.query::<(&mut Transform, &mut Actor, Option<&mut PlayerBody>)>();
    for (mut transform, mut actor, body) in actors.iter_mut(world) {
        match actor.kind {
            ActorKind::Player => {
                transform.translation = Vec3::from_array(PLAYER_SPAWN);
            }
            ActorKind::Automaton => {
                transform.translation = Vec3::from_array(AUTOMATON_SPAWN);
            }
        }
        actor.facing = 0.0;
        if let Some(mut body) = body {
            *body = PlayerBody::default();
        }
    }

    let mut attacks = world.query::<&mut AttackState>();
    for mut attack in attacks.iter_mut(world) {
        *attack = AttackState::default();
    }
    let mut automatons = world.query::<&mut Automaton>();
    for mut automaton in automatons.iter_mut(world) {
        *automaton = Automaton::default();
    }

    let mut log = world.resource_mut::<FightLog>();
    log.session_time = 0.0;
    log.log(FightLogEventType::SessionEvent, "Session reset".to_string());
}

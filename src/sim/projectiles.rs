//! Projectile lifecycle
//!
//! Owns the set of in-flight projectiles: spawning (direction computed
//! once, no re-tracking), advancing, lifespan expiry, and proximity hit
//! tests against the actor that is not the projectile's owner.

use bevy::prelude::*;

use crate::combat::events::{DamageEvent, DamageSource, ProjectileHitEvent};
use crate::combat::log::{FightLog, FightLogEventType};

use super::components::{Actor, ActorKind, Projectile, ProjectileIds, SimClock};
use super::constants::*;

/// Speed factor applied per owner; automaton shots fly slower than the
/// nominal speed for an asymmetric feel.
pub fn owner_speed_factor(owner: ActorKind) -> f32 {
    match owner {
        ActorKind::Player => PLAYER_SHOT_SPEED_FACTOR,
        ActorKind::Automaton => AUTOMATON_SHOT_SPEED_FACTOR,
    }
}

/// Hit margin depends on the target's size; the automaton is the larger
/// target.
fn hit_margin(target: ActorKind) -> f32 {
    match target {
        ActorKind::Player => PLAYER_HIT_MARGIN,
        ActorKind::Automaton => AUTOMATON_HIT_MARGIN,
    }
}

/// Spawn a projectile flying from `position` toward `target`. The unit
/// direction is computed here, once; a degenerate spawn/target pair
/// falls back to +Z rather than propagating NaNs. Returns the id.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    commands: &mut Commands,
    ids: &mut ProjectileIds,
    position: Vec3,
    target: Vec3,
    owner: ActorKind,
    damage: f32,
    speed: f32,
    now: f64,
) -> u64 {
    let aim = target - position;
    let direction = if aim.length() < MIN_AIM_LENGTH {
        Vec3::Z
    } else {
        aim.normalize()
    };

    let id = ids.allocate();
    commands.spawn((
        Projectile {
            id,
            direction,
            speed,
            damage,
            owner,
            spawned_at: now,
            lifespan_ms: PROJECTILE_LIFESPAN_MS,
            has_hit: false,
        },
        Transform::from_translation(position),
    ));
    id
}

/// Advance all projectiles and despawn the ones past their lifespan.
pub fn move_projectiles(
    clock: Res<SimClock>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &Projectile)>,
) {
    let now = clock.now();
    let dt = clock.dt;

    for (entity, mut transform, projectile) in projectiles.iter_mut() {
        let age_secs = now - projectile.spawned_at;
        if age_secs * 1000.0 > projectile.lifespan_ms as f64 {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation +=
            projectile.direction * projectile.speed * dt * owner_speed_factor(projectile.owner);
    }
}

/// Proximity hit test: a projectile may only hit the actor that is not
/// its owner, at most once, and is removed on hit.
pub fn process_projectile_hits(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    actors: Query<(&Actor, &Transform), Without<Projectile>>,
    mut damage: EventWriter<DamageEvent>,
    mut hits: EventWriter<ProjectileHitEvent>,
    mut log: ResMut<FightLog>,
) {
    for (entity, transform, mut projectile) in projectiles.iter_mut() {
        if projectile.has_hit {
            continue;
        }

        for (actor, actor_transform) in actors.iter() {
            if actor.kind == projectile.owner || !actor.kind.takes_projectile_damage() {
                continue;
            }

            let distance = transform.translation.distance(actor_transform.translation);
            if distance < PROJECTILE_RADIUS + hit_margin(actor.kind) {
                projectile.has_hit = true;
                damage.send(DamageEvent {
                    target: actor.kind,
                    amount: projectile.damage,
                    source: DamageSource::Projectile { id: projectile.id },
                });
                hits.send(ProjectileHitEvent {
                    id: projectile.id,
                    owner: projectile.owner,
                    target: actor.kind,
                    damage: projectile.damage,
                    position: transform.translation,
                });
                log.log(
                    FightLogEventType::ProjectileHit,
                    format!(
                        "Projectile {} hit {} for {:.0}",
                        projectile.id,
                        actor.kind.name(),
                        projectile.damage
                    ),
                );
                commands.entity(entity).despawn();
                break;
            }
        }
    }
}

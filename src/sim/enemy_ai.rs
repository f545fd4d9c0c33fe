//! Automaton behavior
//!
//! Per tick: movement-pattern selection on a fixed timer, target
//! computation for the active pattern, exponential position approach,
//! facing toward the player, and ranged bursts through the projectile
//! system. Once defeated, the automaton runs a short descent/fade
//! sequence and never targets or shoots again until a session reset.

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::combat::game_state::GameState;
use crate::combat::log::{FightLog, FightLogEventType};

use super::components::{
    Actor, ActorKind, Automaton, GameRng, MovementPattern, PlayerBody, ProjectileIds, SimClock,
};
use super::constants::*;
use super::projectiles::spawn_projectile;
use super::utils::lerp_angle;

/// Compute the pattern's target position for the current tick.
///
/// The target is clamped to the arena's inner boundary on both
/// horizontal axes; height bobs gently regardless of pattern.
pub fn pattern_target(
    automaton: &mut Automaton,
    current: Vec3,
    player_pos: Vec3,
    now: f64,
    dt: f32,
) -> Vec3 {
    let bob = AUTOMATON_HOVER_HEIGHT + ((now * 0.5).sin() as f32) * AUTOMATON_BOB_AMPLITUDE;

    let mut target = match automaton.pattern {
        MovementPattern::Orbit {
            center,
            radius,
            angular_speed,
        } => {
            automaton.orbit_angle += angular_speed * dt;
            let angle = automaton.orbit_angle;
            center + Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius)
        }
        MovementPattern::Chase { standoff } => {
            let to_player = Vec3::new(player_pos.x - current.x, 0.0, player_pos.z - current.z);
            let dist = to_player.length();
            if dist < MIN_AIM_LENGTH {
                current
            } else {
                let dir = to_player / dist;
                if dist > standoff {
                    player_pos - dir * standoff
                } else {
                    // Too close: invert to back off to the standoff ring.
                    current - dir * (standoff - dist)
                }
            }
        }
        MovementPattern::Zigzag {
            freq_x,
            freq_z,
            amplitude,
        } => Vec3::new(
            ((now * freq_x as f64).sin() as f32) * amplitude,
            0.0,
            ((now * freq_z as f64).sin() as f32) * amplitude,
        ),
    };

    let bound = ARENA_SIZE / 2.0 - ARENA_MARGIN;
    target.x = target.x.clamp(-bound, bound);
    target.z = target.z.clamp(-bound, bound);
    target.y = bob;
    target
}

/// Per-tick automaton update.
pub fn update_enemy_ai(
    clock: Res<SimClock>,
    game_state: Res<GameState>,
    mut rng: ResMut<GameRng>,
    mut ids: ResMut<ProjectileIds>,
    mut log: ResMut<FightLog>,
    mut commands: Commands,
    mut automatons: Query<(&mut Transform, &mut Actor, &mut Automaton), Without<PlayerBody>>,
    players: Query<&Transform, With<PlayerBody>>,
) {
    let now = clock.now();
    let dt = clock.dt;

    for (mut transform, mut actor, mut automaton) in automatons.iter_mut() {
        // Defeat sequence: sink and fade, then hold the terminal state.
        if game_state.is_victory() {
            if automaton.defeated_at.is_none() {
                automaton.defeated_at = Some(now);
                log.log(
                    FightLogEventType::SessionEvent,
                    "Automaton defeated, beginning descent".to_string(),
                );
            }
            let started = automaton.defeated_at.unwrap_or(now);
            let progress = ((now - started) / DEFEAT_SEQUENCE_SECS as f64).min(1.0) as f32;
            if progress < 1.0 {
                transform.translation.y -= (DEFEAT_SINK_DEPTH / DEFEAT_SEQUENCE_SECS) * dt;
            }
            automaton.scale = 1.0 - progress;
            automaton.opacity = 1.0 - progress;
            continue;
        }

        // A heal out of Victory reactivates the automaton.
        if automaton.defeated_at.is_some() {
            automaton.defeated_at = None;
            automaton.scale = 1.0;
            automaton.opacity = 1.0;
        }

        let Ok(player_transform) = players.get_single() else {
            continue;
        };
        let player_pos = player_transform.translation;

        // Pattern timer: fixed duration, random reselection excluding
        // the current pattern.
        if now - automaton.pattern_started >= PATTERN_DURATION as f64 {
            let previous = automaton.pattern.kind();
            automaton.pattern = MovementPattern::reselect(&mut rng, previous);
            automaton.pattern_started = now;
            log.log(
                FightLogEventType::PatternChange,
                format!("{} -> {}", previous.name(), automaton.pattern.kind().name()),
            );
        }

        // Exponential approach toward the pattern target, never
        // instantaneous.
        let target = pattern_target(&mut automaton, transform.translation, player_pos, now, dt);
        automaton.target_position = target;
        transform.translation = transform
            .translation
            .lerp(target, AUTOMATON_POSITION_LERP);

        // Face the player, slower than the player's own turn rate.
        let to_player = player_pos - transform.translation;
        if Vec2::new(to_player.x, to_player.z).length() > MIN_AIM_LENGTH {
            let heading = to_player.x.atan2(to_player.z);
            actor.facing = lerp_angle(actor.facing, heading, AUTOMATON_FACING_LERP);
        }

        // Ranged attack: startup delay, then a burst on each cooldown
        // expiry, aimed at the player's body-height point with a yaw
        // spread across the burst.
        if now >= SHOT_STARTUP_DELAY as f64 && now - automaton.last_shot > SHOT_COOLDOWN as f64 {
            let origin = transform.translation;
            let aim_point = player_pos + Vec3::Y * BODY_HEIGHT_OFFSET;

            let aim = aim_point - origin;
            let base_dir = if aim.length() < MIN_AIM_LENGTH {
                Vec3::Z
            } else {
                aim.normalize()
            };

            let count = PROJECTILES_PER_SHOT;
            let step = (BURST_SPREAD_DEGREES / count as f32).to_radians();
            let mut spawned: SmallVec<[u64; 4]> = SmallVec::new();
            for i in 0..count {
                let offset = (i as f32 - (count as f32 - 1.0) / 2.0) * step;
                let dir = Quat::from_rotation_y(offset) * base_dir;
                let id = spawn_projectile(
                    &mut commands,
                    &mut ids,
                    origin,
                    origin + dir,
                    ActorKind::Automaton,
                    PROJECTILE_DAMAGE,
                    PROJECTILE_SPEED,
                    now,
                );
                spawned.push(id);
            }

            automaton.last_shot = now;
            automaton.shots_fired += count;
            log.log(
                FightLogEventType::ProjectileFired,
                format!("Burst of {} projectiles ({:?})", count, spawned.as_slice()),
            );
        }
    }
}

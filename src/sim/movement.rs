//! Player movement controller
//!
//! Converts intent plus ground state into a new velocity and position,
//! keeps the facing angle tracking the velocity, and manages the
//! attack-charge sub-state. Releasing a held attack emits a
//! [`MeleeAttackEvent`] that the melee resolver consumes later in the
//! same tick.
//!
//! The core carries no physics engine; gravity is integrated here and
//! landing snaps to the scenery surface.

use bevy::prelude::*;

use crate::combat::events::MeleeAttackEvent;
use crate::combat::game_state::GameState;

use super::components::{Actor, AttackState, PlayerBody, SimClock};
use super::constants::*;
use super::intent::PlayerIntent;
use super::scenery::Scenery;
use super::utils::lerp_angle;

/// Per-tick player update: ground detection, horizontal movement, jump,
/// gravity, facing, and attack charging.
pub fn update_player_movement(
    clock: Res<SimClock>,
    intent: Res<PlayerIntent>,
    scenery: Res<Scenery>,
    game_state: Res<GameState>,
    mut attacks: EventWriter<MeleeAttackEvent>,
    mut players: Query<(&mut Transform, &mut Actor, &mut PlayerBody, &mut AttackState)>,
) {
    let now = clock.now();
    let dt = clock.dt;

    for (mut transform, mut actor, mut body, mut attack) in players.iter_mut() {
        let feet = transform.translation;

        // Ground detection: one ray straight down from the feet. If the
        // ray misses entirely (e.g. off the scenery), fall back to the
        // height/vertical-speed heuristic.
        let ground = scenery.ground_hit(feet);
        let grounded = match ground {
            Some(hit) => hit.distance < GROUND_RAY_LENGTH,
            None => {
                feet.y < GROUND_FALLBACK_HEIGHT && body.velocity.y.abs() < GROUND_FALLBACK_MAX_VSPEED
            }
        };
        body.grounded = grounded;

        let alive = !game_state.is_player_dead();

        // Horizontal movement. The blend keeps grounded direction changes
        // from snapping; airborne velocity is written directly at reduced
        // control.
        if alive {
            let target = match intent.move_direction() {
                Some(dir) => {
                    let sprint = if intent.sprint { SPRINT_MULTIPLIER } else { 1.0 };
                    let control = if grounded { 1.0 } else { AIR_CONTROL };
                    dir * BASE_SPEED * control * sprint
                }
                // No input: grounded friction blends toward rest.
                None => Vec2::ZERO,
            };

            if grounded {
                body.velocity.x =
                    target.x * GROUND_VELOCITY_BLEND + body.velocity.x * (1.0 - GROUND_VELOCITY_BLEND);
                body.velocity.z =
                    target.y * GROUND_VELOCITY_BLEND + body.velocity.z * (1.0 - GROUND_VELOCITY_BLEND);
            } else if intent.move_direction().is_some() {
                body.velocity.x = target.x;
                body.velocity.z = target.y;
            }
        }

        // Jump: grounded only. Vertical velocity is zeroed first so jump
        // height stays consistent regardless of the current state.
        if alive && grounded && intent.jump {
            let prior = body.velocity.y;
            body.velocity.y = 0.0;
            body.velocity.y = (JUMP_FORCE * 7.5).max(prior.abs());
        } else if grounded {
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
        } else {
            body.velocity.y -= GRAVITY * dt;
        }

        // Integrate.
        let prev = transform.translation;
        transform.translation += body.velocity * dt;

        // Landing: if we moved down through a surface this tick, snap to
        // it and stop falling.
        if body.velocity.y < 0.0 {
            let fall = prev.y - transform.translation.y;
            if let Some(hit) = scenery.raycast_down(prev, fall + 0.01) {
                if transform.translation.y <= hit.point.y {
                    transform.translation.y = hit.point.y;
                    body.velocity.y = 0.0;
                    body.grounded = true;
                }
            }
        }

        // Facing tracks velocity once there is meaningful horizontal speed.
        let horizontal_speed = Vec2::new(body.velocity.x, body.velocity.z).length();
        if horizontal_speed > FACING_SPEED_THRESHOLD {
            let target = body.velocity.x.atan2(body.velocity.z);
            actor.facing = lerp_angle(actor.facing, target, PLAYER_FACING_LERP);
        }

        // Attack charging. Holding starts/advances the charge; releasing
        // resolves the swing (a quick tap still resolves at ~0 charge).
        if alive && intent.attack {
            if !attack.charging {
                attack.charging = true;
                attack.charge_started = now;
                attack.charge_level = 0.0;
            } else {
                attack.charge_level =
                    (((now - attack.charge_started) as f32) / MAX_CHARGE_TIME).min(1.0);
            }
        } else if attack.charging {
            if alive {
                attacks.send(MeleeAttackEvent {
                    charge_level: attack.charge_level,
                    charged: true,
                });
            }
            attack.charging = false;
            attack.charge_level = 0.0;
        }
    }
}

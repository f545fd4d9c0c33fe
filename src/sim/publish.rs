//! Published state
//!
//! The last stage of every tick snapshots the simulation into a plain
//! resource for presentation collaborators (rendering, HUD, camera,
//! audio). Consumers read the snapshot; they never reach into the ECS.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::game_state::{GameState, Phase};

use super::components::{Actor, AttackState, Automaton, DamageFlash, PlayerBody, SimClock};
use super::constants::MOVING_SPEED_THRESHOLD;
use super::intent::PlayerIntent;

/// Player state published each tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PlayerView {
    pub position: [f32; 3],
    pub facing_angle: f32,
    pub is_grounded: bool,
    pub is_moving: bool,
    pub is_sprinting: bool,
    pub is_attacking: bool,
    pub is_charging: bool,
    pub charge_level: f32,
    pub is_damaged: bool,
}

/// Automaton state published each tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AutomatonView {
    pub position: [f32; 3],
    pub facing_angle: f32,
    pub health: f32,
    pub is_damaged: bool,
    pub is_defeated: bool,
    /// Defeat-sequence interpolants for presentation.
    pub scale: f32,
    pub opacity: f32,
}

/// Session-global state published each tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GlobalView {
    pub phase: Phase,
    pub score: u32,
}

/// One tick's published state.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize)]
pub struct FrameSnapshot {
    pub player: PlayerView,
    pub automaton: AutomatonView,
    pub global: GlobalView,
}

/// Snapshot the simulation for presentation consumers.
pub fn publish_frame_snapshot(
    clock: Res<SimClock>,
    intent: Res<PlayerIntent>,
    game_state: Res<GameState>,
    flash: Res<DamageFlash>,
    mut snapshot: ResMut<FrameSnapshot>,
    players: Query<(&Transform, &Actor, &PlayerBody, &AttackState), Without<Automaton>>,
    automatons: Query<(&Transform, &Actor, &Automaton)>,
) {
    let now = clock.now();

    if let Ok((transform, actor, body, attack)) = players.get_single() {
        let horizontal_speed = Vec2::new(body.velocity.x, body.velocity.z).length();
        let is_moving = horizontal_speed > MOVING_SPEED_THRESHOLD;
        snapshot.player = PlayerView {
            position: transform.translation.to_array(),
            facing_angle: actor.facing,
            is_grounded: body.grounded,
            is_moving,
            is_sprinting: intent.sprint && is_moving,
            is_attacking: now < attack.effect_until,
            is_charging: attack.charging,
            charge_level: attack.charge_level,
            is_damaged: flash.player_flashing(now),
        };
    }

    if let Ok((transform, actor, automaton)) = automatons.get_single() {
        snapshot.automaton = AutomatonView {
            position: transform.translation.to_array(),
            facing_angle: actor.facing,
            health: game_state.automaton_health,
            is_damaged: flash.automaton_flashing(now),
            is_defeated: game_state.is_victory(),
            scale: automaton.scale,
            opacity: automaton.opacity,
        };
    }

    snapshot.global = GlobalView {
        phase: game_state.phase,
        score: game_state.score,
    };
}

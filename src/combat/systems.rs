//! Combat systems
//!
//! The outcome stage: drains all damage queued this tick, in send order,
//! through the `GameState` authority and records the results.

use bevy::prelude::*;

use crate::sim::components::{ActorKind, DamageFlash, SimClock};

use super::events::DamageEvent;
use super::game_state::{GameState, Phase};
use super::log::{FightLog, FightLogEventType};

/// Apply queued damage through `GameState`, in the order it was sent.
///
/// Because the melee, projectile, and contact stages all run before this
/// one, a melee kill and a simultaneous projectile hit in the same tick
/// both get applied here, and a phase transition caused by an earlier
/// event suppresses later events in the same drain (via the guards in
/// `GameState`).
pub fn apply_damage_events(
    clock: Res<SimClock>,
    mut damage_events: EventReader<DamageEvent>,
    mut game_state: ResMut<GameState>,
    mut flash: ResMut<DamageFlash>,
    mut log: ResMut<FightLog>,
) {
    for event in damage_events.read() {
        let phase_before = game_state.phase;
        let applied = match event.target {
            ActorKind::Player => game_state.damage_player(event.amount),
            ActorKind::Automaton => game_state.damage_automaton(event.amount),
        };

        if applied > 0.0 {
            match event.target {
                ActorKind::Player => flash.player_hit_at = Some(clock.now()),
                ActorKind::Automaton => flash.automaton_hit_at = Some(clock.now()),
            }
            let source = event.target.opponent();
            log.log_damage(
                source.name(),
                event.target.name(),
                event.source.label(),
                applied,
                format!(
                    "{} hits {} for {:.0} ({})",
                    source.name(),
                    event.target.name(),
                    applied,
                    event.source.label()
                ),
            );
        }

        if game_state.phase != phase_before {
            let message = match game_state.phase {
                Phase::PlayerDead => "Player has fallen".to_string(),
                Phase::Victory => format!("Automaton destroyed! Score: {}", game_state.score),
                Phase::Playing => "Session resumed".to_string(),
            };
            info!("{}", message);
            log.log(FightLogEventType::PhaseChange, message);
        }
    }
}

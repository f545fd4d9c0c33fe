//! Combat authority
//!
//! Owns the pieces every combat path funnels through:
//! - Damage/attack/hit events
//! - The `GameState` health/score/phase authority
//! - The structured fight log
//!
//! The movement, melee, AI, projectile, and contact stages only ever
//! *queue* damage; the outcome system here is the single place health
//! actually changes.

use bevy::prelude::*;

pub mod events;
pub mod game_state;
pub mod log;
pub mod systems;

use crate::sim::SimPhase;
use events::*;

/// Plugin registering combat events, the game-state authority, and the
/// outcome stage.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Combat events
            .add_event::<DamageEvent>()
            .add_event::<MeleeAttackEvent>()
            .add_event::<ProjectileHitEvent>()
            // Resources
            .init_resource::<game_state::GameState>()
            .init_resource::<log::FightLog>()
            .init_resource::<crate::sim::components::DamageFlash>()
            // Outcome stage
            .add_systems(
                Update,
                systems::apply_damage_events.in_set(SimPhase::Outcome),
            );
    }
}

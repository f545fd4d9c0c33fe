//! Combat events
//!
//! Events emitted by the per-tick combat stages and drained, in send
//! order, by the outcome stage at the end of each tick.

use bevy::prelude::*;

use crate::sim::components::ActorKind;

/// Where a damage event originated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageSource {
    /// Player melee swing, with the charge level it resolved at.
    Melee { charge_level: f32 },
    /// Projectile hit, with the projectile id.
    Projectile { id: u64 },
    /// Proximity contact damage.
    Contact,
}

impl DamageSource {
    pub fn label(&self) -> &'static str {
        match self {
            DamageSource::Melee { .. } => "Melee",
            DamageSource::Projectile { .. } => "Projectile",
            DamageSource::Contact => "Contact",
        }
    }
}

/// Damage queued against an actor. Applied through `GameState` in the
/// outcome stage; the phase guards there decide whether it lands.
#[derive(Event)]
pub struct DamageEvent {
    pub target: ActorKind,
    pub amount: f32,
    pub source: DamageSource,
}

/// Emitted by the movement controller when a held attack is released
/// (a quick tap still resolves at ~0 charge).
#[derive(Event)]
pub struct MeleeAttackEvent {
    pub charge_level: f32,
    pub charged: bool,
}

/// Emitted when a projectile connects, for logging and presentation
/// (hit-effect) consumers.
#[derive(Event)]
pub struct ProjectileHitEvent {
    pub id: u64,
    pub owner: ActorKind,
    pub target: ActorKind,
    pub damage: f32,
    pub position: Vec3,
}

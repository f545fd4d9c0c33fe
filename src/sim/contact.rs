//! Proximity contact damage
//!
//! Incidental "bumping" damage when the two actors occupy the same
//! space, independent of the deliberate melee and projectile paths.
//! Checks are throttled, and applications have their own cooldown so a
//! sustained overlap ticks rather than drains.

use bevy::prelude::*;

use crate::combat::events::{DamageEvent, DamageSource};
use crate::combat::game_state::{GameState, Phase};
use crate::combat::log::{FightLog, FightLogEventType};

use super::components::{Actor, Automaton, PlayerBody, SimClock};
use super::constants::*;

/// Throttle bookkeeping for the contact check.
#[derive(Resource)]
pub struct ContactState {
    pub last_check: f64,
    pub last_applied: f64,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            last_check: 0.0,
            // Negative so an immediate overlap can damage right away.
            last_applied: -(CONTACT_DAMAGE_COOLDOWN as f64),
        }
    }
}

/// Contact damage grows linearly with session time, capped at 2x base.
pub fn contact_damage_scale(elapsed: f64) -> f32 {
    ((1.0 + elapsed / CONTACT_SCALE_PERIOD as f64) as f32).min(CONTACT_SCALE_CAP)
}

/// Throttled proximity check between the two actors.
pub fn check_contact_damage(
    clock: Res<SimClock>,
    game_state: Res<GameState>,
    mut state: ResMut<ContactState>,
    mut damage: EventWriter<DamageEvent>,
    mut log: ResMut<FightLog>,
    players: Query<&Transform, With<PlayerBody>>,
    automatons: Query<(&Actor, &Transform), With<Automaton>>,
) {
    let now = clock.now();

    if now - state.last_check < CONTACT_CHECK_INTERVAL as f64 {
        return;
    }
    state.last_check = now;

    if game_state.phase != Phase::Playing {
        return;
    }

    let (Ok(player_transform), Ok((automaton, automaton_transform))) =
        (players.get_single(), automatons.get_single())
    else {
        return;
    };
    if !automaton.kind.deals_contact_damage() {
        return;
    }

    let distance = player_transform
        .translation
        .distance(automaton_transform.translation);
    if distance >= CONTACT_THRESHOLD {
        return;
    }

    if now - state.last_applied < CONTACT_DAMAGE_COOLDOWN as f64 {
        return;
    }
    state.last_applied = now;

    let amount = CONTACT_BASE_DAMAGE * contact_damage_scale(now);
    damage.send(DamageEvent {
        target: crate::sim::components::ActorKind::Player,
        amount,
        source: DamageSource::Contact,
    });
    log.log(
        FightLogEventType::ContactDamage,
        format!("Contact at {:.2} units for {:.1}", distance, amount),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_starts_at_one() {
        assert!((contact_damage_scale(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_is_capped_at_two() {
        assert_eq!(contact_damage_scale(10_000.0), CONTACT_SCALE_CAP);
    }

    #[test]
    fn test_scale_is_monotone() {
        let mut prev = contact_damage_scale(0.0);
        for i in 1..50 {
            let s = contact_damage_scale(i as f64 * 20.0);
            assert!(s >= prev);
            prev = s;
        }
    }
}

//! Melee combat resolution
//!
//! Pure functions computing charge-scaled damage and radius, plus the
//! system that turns released attacks into damage events. The hit test
//! is omnidirectional by default; the earlier directional variant (a
//! forward-facing cone gated on a dot product) is kept behind
//! [`SimSettings::directional_melee`](super::components::SimSettings).

use bevy::prelude::*;

use crate::combat::events::{DamageEvent, DamageSource, MeleeAttackEvent};
use crate::combat::log::{FightLog, FightLogEventType};

use super::components::{Actor, AttackState, Automaton, PlayerBody, SimClock, SimSettings};
use super::constants::*;

/// Damage for a charge level in [0, 1]. Monotonically non-decreasing:
/// base damage at zero charge, `base * MELEE_MAX_MULTIPLIER` at full.
pub fn charged_damage(charge_level: f32) -> f32 {
    MELEE_BASE_DAMAGE * (1.0 + charge_level * (MELEE_MAX_MULTIPLIER - 1.0))
}

/// Hit radius for a charge level in [0, 1]; grows up to 1.5x base.
pub fn charged_radius(charge_level: f32) -> f32 {
    MELEE_BASE_RADIUS * (1.0 + charge_level * 0.5)
}

/// Omnidirectional hit test: strict Euclidean distance check, so a
/// defender at exactly `radius` is a miss.
pub fn melee_hit(attacker: Vec3, defender: Vec3, radius: f32) -> bool {
    attacker.distance(defender) < radius
}

/// Optional directional gate: the defender must be within the attacker's
/// forward cone (dot product against the facing direction above 0.3).
pub fn facing_gate(attacker: Vec3, facing: f32, defender: Vec3) -> bool {
    let forward = Vec3::new(facing.sin(), 0.0, facing.cos());
    let to_defender = (defender - attacker).normalize_or_zero();
    forward.dot(to_defender) > MELEE_FACING_DOT_THRESHOLD
}

/// Resolve released melee attacks against the automaton.
///
/// Cooldown-gated: releases inside the 0.5 s window are dropped. A
/// resolved swing always stamps the attack time and the transient
/// attack-effect flag, hit or miss.
pub fn resolve_melee_attacks(
    clock: Res<SimClock>,
    settings: Res<SimSettings>,
    mut events: EventReader<MeleeAttackEvent>,
    mut damage: EventWriter<DamageEvent>,
    mut log: ResMut<FightLog>,
    mut players: Query<(&Transform, &Actor, &mut PlayerBody, &mut AttackState), Without<Automaton>>,
    automatons: Query<(&Transform, &Actor), With<Automaton>>,
) {
    let now = clock.now();

    for event in events.read() {
        let Ok((player_transform, player, mut body, mut attack)) = players.get_single_mut() else {
            return;
        };

        if now - attack.last_attack < MELEE_COOLDOWN as f64 {
            continue;
        }
        attack.last_attack = now;

        let charge = if event.charged { event.charge_level } else { 0.0 };
        let effect = if charge > KNOCKBACK_CHARGE_THRESHOLD {
            CHARGED_ATTACK_EFFECT_SECS
        } else {
            ATTACK_EFFECT_SECS
        };
        attack.effect_until = now + effect as f64;

        let Ok((automaton_transform, automaton)) = automatons.get_single() else {
            continue;
        };
        if !automaton.kind.takes_melee_damage() {
            continue;
        }

        let attacker_pos = player_transform.translation;
        let defender_pos = automaton_transform.translation;
        let radius = charged_radius(charge);

        let mut hit = melee_hit(attacker_pos, defender_pos, radius);
        if hit && settings.directional_melee {
            hit = facing_gate(attacker_pos, player.facing, defender_pos);
        }

        if hit {
            let final_damage = charged_damage(charge);
            damage.send(DamageEvent {
                target: automaton.kind,
                amount: final_damage,
                source: DamageSource::Melee {
                    charge_level: charge,
                },
            });

            // Heavy swings push the attacker back, opposite to facing.
            if charge > KNOCKBACK_CHARGE_THRESHOLD {
                let forward = Vec3::new(player.facing.sin(), 0.0, player.facing.cos());
                body.velocity += -forward * KNOCKBACK_SPEED * charge;
            }

            log.log(
                FightLogEventType::MeleeAttack,
                format!(
                    "Melee hit at charge {:.2} for {:.0} damage",
                    charge, final_damage
                ),
            );
        } else {
            log.log(
                FightLogEventType::MeleeAttack,
                format!("Melee swing missed (charge {:.2})", charge),
            );
        }
    }
}

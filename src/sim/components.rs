//! Component Definitions for the Simulation
//!
//! This module contains the ECS components and resources used by the
//! boss-fight simulation: the two actors, the player's attack charge
//! sub-state, the automaton's movement-pattern state machine, and
//! in-flight projectiles.

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

use super::constants::*;

// ============================================================================
// Resources
// ============================================================================

/// Simulation clock advanced once per tick, before all other systems.
///
/// Every timer in the simulation (attack cooldown, charge, pattern
/// duration, projectile lifespan) is re-evaluated against `elapsed`
/// each tick rather than scheduled as a callback.
#[derive(Resource)]
pub struct SimClock {
    /// Seconds since session start.
    pub elapsed: f64,
    /// Fixed timestep applied each tick.
    pub dt: f32,
    /// Ticks elapsed since session start.
    pub tick: u64,
}

impl SimClock {
    pub fn new(dt: f32) -> Self {
        Self {
            elapsed: 0.0,
            dt,
            tick: 0,
        }
    }

    /// Current session time in seconds.
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(TICK_DT)
    }
}

/// Seeded random number generator for deterministic session simulation.
///
/// When a seed is provided (e.g., via headless config), the same seed will
/// always produce the same session. Without a seed, uses system entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Generate a random usize in [0, bound)
    pub fn random_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Feature toggles for the simulation.
#[derive(Resource, Clone, Copy, Default)]
pub struct SimSettings {
    /// Gate melee hits behind a forward-facing cone (dot threshold 0.3).
    /// The default hit test is omnidirectional.
    pub directional_melee: bool,
}

/// Monotonic projectile id allocator.
#[derive(Resource, Default)]
pub struct ProjectileIds {
    next: u64,
}

impl ProjectileIds {
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Timestamps of the most recent health loss per actor, used for the
/// published damage-flash flags.
#[derive(Resource, Default)]
pub struct DamageFlash {
    pub player_hit_at: Option<f64>,
    pub automaton_hit_at: Option<f64>,
}

impl DamageFlash {
    pub fn player_flashing(&self, now: f64) -> bool {
        self.player_hit_at
            .is_some_and(|t| now - t < DAMAGE_FLASH_SECS as f64)
    }

    pub fn automaton_flashing(&self, now: f64) -> bool {
        self.automaton_hit_at
            .is_some_and(|t| now - t < DAMAGE_FLASH_SECS as f64)
    }
}

// ============================================================================
// Actors
// ============================================================================

/// Which of the two actors an entity (or projectile owner) is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ActorKind {
    Player,
    Automaton,
}

impl ActorKind {
    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Player => "Player",
            ActorKind::Automaton => "Automaton",
        }
    }

    /// The opposing actor.
    pub fn opponent(self) -> Self {
        match self {
            ActorKind::Player => ActorKind::Automaton,
            ActorKind::Automaton => ActorKind::Player,
        }
    }

    pub fn takes_melee_damage(self) -> bool {
        matches!(self, ActorKind::Automaton)
    }

    pub fn takes_projectile_damage(self) -> bool {
        // Both actors are valid projectile targets; the final combat
        // design only has the automaton shooting, but the capability
        // is symmetric.
        true
    }

    pub fn deals_contact_damage(self) -> bool {
        matches!(self, ActorKind::Automaton)
    }

    pub fn deals_projectile_damage(self) -> bool {
        matches!(self, ActorKind::Automaton)
    }
}

/// Shared per-actor state. Both the player and the automaton carry this;
/// actors are never despawned during a session (death sets a flag in
/// `GameState`), which keeps respawn cheap.
#[derive(Component)]
pub struct Actor {
    pub kind: ActorKind,
    /// Y-axis heading in radians.
    pub facing: f32,
}

impl Actor {
    pub fn new(kind: ActorKind) -> Self {
        Self { kind, facing: 0.0 }
    }
}

/// Player-only kinematic state. The automaton has no velocity; it moves
/// by direct position interpolation.
#[derive(Component, Default)]
pub struct PlayerBody {
    pub velocity: Vec3,
    pub grounded: bool,
}

/// The player's attack-charge sub-state.
///
/// `charge_level` only increases while `charging` and is reset to zero
/// when the attack resolves.
#[derive(Component)]
pub struct AttackState {
    pub charging: bool,
    pub charge_level: f32,
    pub charge_started: f64,
    pub last_attack: f64,
    /// Transient attack-effect flag for presentation; set until this
    /// session time after each resolved attack.
    pub effect_until: f64,
}

impl Default for AttackState {
    fn default() -> Self {
        Self {
            charging: false,
            charge_level: 0.0,
            charge_started: 0.0,
            // Negative so the very first attack is never cooldown-gated.
            last_attack: -(MELEE_COOLDOWN as f64),
            effect_until: 0.0,
        }
    }
}

// ============================================================================
// Automaton
// ============================================================================

/// Discriminant for [`MovementPattern`], used for reselection and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Orbit,
    Chase,
    Zigzag,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Orbit, PatternKind::Chase, PatternKind::Zigzag];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::Orbit => "Orbit",
            PatternKind::Chase => "Chase",
            PatternKind::Zigzag => "Zigzag",
        }
    }
}

/// The automaton's current movement behavior, with per-variant parameters.
///
/// Transitions are time-driven: every [`PATTERN_DURATION`] seconds a new
/// pattern is picked uniformly at random from the two other variants
/// (never an immediate repeat).
#[derive(Debug, Clone, Copy)]
pub enum MovementPattern {
    Orbit {
        center: Vec3,
        radius: f32,
        angular_speed: f32,
    },
    Chase {
        standoff: f32,
    },
    Zigzag {
        freq_x: f32,
        freq_z: f32,
        amplitude: f32,
    },
}

impl MovementPattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            MovementPattern::Orbit { .. } => PatternKind::Orbit,
            MovementPattern::Chase { .. } => PatternKind::Chase,
            MovementPattern::Zigzag { .. } => PatternKind::Zigzag,
        }
    }

    /// Default parameter set for a pattern kind.
    pub fn with_defaults(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Orbit => MovementPattern::Orbit {
                center: Vec3::ZERO,
                radius: 8.0,
                angular_speed: 0.8,
            },
            PatternKind::Chase => MovementPattern::Chase { standoff: 6.0 },
            PatternKind::Zigzag => MovementPattern::Zigzag {
                freq_x: 0.7,
                freq_z: 0.4,
                amplitude: 12.0,
            },
        }
    }

    /// Pick a new pattern uniformly at random, excluding `current`.
    pub fn reselect(rng: &mut GameRng, current: PatternKind) -> Self {
        let options: Vec<PatternKind> = PatternKind::ALL
            .into_iter()
            .filter(|k| *k != current)
            .collect();
        let kind = options[rng.random_index(options.len())];
        Self::with_defaults(kind)
    }
}

/// The automaton's behavioral state.
#[derive(Component)]
pub struct Automaton {
    pub pattern: MovementPattern,
    pub pattern_started: f64,
    pub target_position: Vec3,
    /// Angle accumulator for the orbit pattern.
    pub orbit_angle: f32,
    pub last_shot: f64,
    pub shots_fired: u32,
    /// Session time at which the defeat sequence began.
    pub defeated_at: Option<f64>,
    /// Interpolated to zero during the defeat sequence (presentation).
    pub scale: f32,
    /// Interpolated to zero during the defeat sequence (presentation).
    pub opacity: f32,
}

impl Default for Automaton {
    fn default() -> Self {
        Self {
            pattern: MovementPattern::with_defaults(PatternKind::Orbit),
            pattern_started: 0.0,
            target_position: Vec3::from_array(AUTOMATON_SPAWN),
            orbit_angle: 0.0,
            // Negative so the first burst fires as soon as the startup
            // delay has passed.
            last_shot: -(SHOT_COOLDOWN as f64),
            shots_fired: 0,
            defeated_at: None,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

// ============================================================================
// Projectiles
// ============================================================================

/// An in-flight projectile. Direction is computed once at spawn;
/// projectiles do not re-track their target.
#[derive(Component)]
pub struct Projectile {
    pub id: u64,
    /// Unit travel direction.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    pub owner: ActorKind,
    pub spawned_at: f64,
    pub lifespan_ms: u32,
    /// Each projectile hits at most once.
    pub has_hit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reselect_never_repeats_current() {
        let mut rng = GameRng::from_seed(7);
        for current in PatternKind::ALL {
            for _ in 0..50 {
                let next = MovementPattern::reselect(&mut rng, current);
                assert_ne!(next.kind(), current);
            }
        }
    }

    #[test]
    fn test_reselect_reaches_both_alternatives() {
        let mut rng = GameRng::from_seed(11);
        let mut seen_chase = false;
        let mut seen_zigzag = false;
        for _ in 0..100 {
            match MovementPattern::reselect(&mut rng, PatternKind::Orbit).kind() {
                PatternKind::Chase => seen_chase = true,
                PatternKind::Zigzag => seen_zigzag = true,
                PatternKind::Orbit => unreachable!(),
            }
        }
        assert!(seen_chase && seen_zigzag);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = GameRng::from_seed(42);
        let mut b = GameRng::from_seed(42);
        for _ in 0..20 {
            assert_eq!(a.random_f32(), b.random_f32());
        }
    }

    #[test]
    fn test_projectile_ids_are_monotonic() {
        let mut ids = ProjectileIds::default();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_capability_flags() {
        assert!(ActorKind::Automaton.takes_melee_damage());
        assert!(!ActorKind::Player.takes_melee_damage());
        assert!(ActorKind::Player.takes_projectile_damage());
        assert!(ActorKind::Automaton.deals_projectile_damage());
        assert!(!ActorKind::Player.deals_contact_damage());
        assert_eq!(ActorKind::Player.opponent(), ActorKind::Automaton);
    }
}

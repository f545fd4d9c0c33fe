//! Simulation Constants
//!
//! Centralized location for magic numbers used throughout the simulation.
//! This makes it easier to tune balance and ensures consistency.

// ============================================================================
// Tick
// ============================================================================

/// Fixed simulation timestep in seconds (60 Hz).
pub const TICK_DT: f32 = 1.0 / 60.0;

// ============================================================================
// Player Movement
// ============================================================================

/// Base horizontal movement speed in units/second.
pub const BASE_SPEED: f32 = 8.0;

/// Multiplier applied to base speed while sprinting.
pub const SPRINT_MULTIPLIER: f32 = 1.6;

/// Fraction of base speed available while airborne.
pub const AIR_CONTROL: f32 = 0.5;

/// Jump impulse scalar. The applied upward velocity is
/// `max(JUMP_FORCE * 7.5, |prior vertical velocity|)`.
pub const JUMP_FORCE: f32 = 2.0;

/// Gravity acceleration in units/second^2, at 3x scale for a snappier
/// jump arc.
pub const GRAVITY: f32 = 9.81 * 3.0;

/// Blend factor for new horizontal velocity while grounded
/// (0.25 new / 0.75 old, avoids instantaneous direction snaps).
pub const GROUND_VELOCITY_BLEND: f32 = 0.25;

/// Per-tick interpolation factor for the player's facing angle.
pub const PLAYER_FACING_LERP: f32 = 0.2;

/// Horizontal speed above which the facing angle starts tracking velocity.
pub const FACING_SPEED_THRESHOLD: f32 = 0.1;

/// Horizontal speed above which the player counts as moving (published state).
pub const MOVING_SPEED_THRESHOLD: f32 = 0.5;

/// Joystick magnitude below which analog input is ignored.
pub const JOYSTICK_DEADZONE: f32 = 0.2;

// ============================================================================
// Ground Detection
// ============================================================================

/// Length of the downward ground-detection ray cast from the player's feet.
pub const GROUND_RAY_LENGTH: f32 = 1.5;

/// Heuristic fallback when the ground ray misses: grounded if below this
/// height with small vertical velocity.
pub const GROUND_FALLBACK_HEIGHT: f32 = 1.0;

/// Vertical speed bound for the heuristic grounded fallback.
pub const GROUND_FALLBACK_MAX_VSPEED: f32 = 3.0;

// ============================================================================
// Melee Combat
// ============================================================================

/// Minimum time between melee attacks in seconds.
pub const MELEE_COOLDOWN: f32 = 0.5;

/// Melee damage at zero charge.
pub const MELEE_BASE_DAMAGE: f32 = 20.0;

/// Damage multiplier at full charge.
pub const MELEE_MAX_MULTIPLIER: f32 = 3.0;

/// Melee hit radius at zero charge.
pub const MELEE_BASE_RADIUS: f32 = 3.0;

/// Time in seconds to reach full charge while holding attack.
pub const MAX_CHARGE_TIME: f32 = 1.5;

/// Charge level above which a released attack knocks the attacker back.
pub const KNOCKBACK_CHARGE_THRESHOLD: f32 = 0.5;

/// Knockback speed at full charge, applied opposite to facing.
pub const KNOCKBACK_SPEED: f32 = 10.0;

/// Duration of the transient attack-effect flag (presentation only).
pub const ATTACK_EFFECT_SECS: f32 = 0.2;

/// Attack-effect duration for charged attacks.
pub const CHARGED_ATTACK_EFFECT_SECS: f32 = 0.3;

/// Dot-product threshold for the optional directional melee gate.
pub const MELEE_FACING_DOT_THRESHOLD: f32 = 0.3;

// ============================================================================
// Automaton
// ============================================================================

/// Seconds each movement pattern runs before a new one is selected.
pub const PATTERN_DURATION: f32 = 8.0;

/// Per-tick exponential approach factor toward the pattern target.
pub const AUTOMATON_POSITION_LERP: f32 = 0.05;

/// Per-tick facing interpolation factor (slower than the player's 0.2
/// for a heavier feel).
pub const AUTOMATON_FACING_LERP: f32 = 0.1;

/// Seconds after session start before the automaton starts shooting.
pub const SHOT_STARTUP_DELAY: f32 = 2.0;

/// Minimum seconds between ranged bursts.
pub const SHOT_COOLDOWN: f32 = 1.0;

/// Projectiles per burst.
pub const PROJECTILES_PER_SHOT: u32 = 3;

/// Total yaw spread of a burst in degrees (offsets of ±spread/count).
pub const BURST_SPREAD_DEGREES: f32 = 15.0;

/// Vertical offset added to the player position when aiming (body height).
pub const BODY_HEIGHT_OFFSET: f32 = 1.0;

/// Hover height of the automaton above the arena floor.
pub const AUTOMATON_HOVER_HEIGHT: f32 = 2.0;

/// Amplitude of the automaton's vertical bobbing.
pub const AUTOMATON_BOB_AMPLITUDE: f32 = 0.2;

/// Duration of the defeat descent/fade sequence in seconds.
pub const DEFEAT_SEQUENCE_SECS: f32 = 2.0;

/// How far the automaton sinks during the defeat sequence.
pub const DEFEAT_SINK_DEPTH: f32 = 3.0;

// ============================================================================
// Projectiles
// ============================================================================

/// Default projectile damage.
pub const PROJECTILE_DAMAGE: f32 = 10.0;

/// Default projectile speed in units/second.
pub const PROJECTILE_SPEED: f32 = 15.0;

/// Projectile lifespan in milliseconds.
pub const PROJECTILE_LIFESPAN_MS: u32 = 3000;

/// Projectile collision radius.
pub const PROJECTILE_RADIUS: f32 = 0.3;

/// Hit margin when testing projectiles against the player.
pub const PLAYER_HIT_MARGIN: f32 = 0.8;

/// Hit margin against the automaton (larger target).
pub const AUTOMATON_HIT_MARGIN: f32 = 1.5;

/// Speed factor applied to player-owned projectiles.
pub const PLAYER_SHOT_SPEED_FACTOR: f32 = 1.0;

/// Speed factor applied to automaton-owned projectiles. Automaton shots
/// fly at 60% of nominal speed so they stay dodgeable.
pub const AUTOMATON_SHOT_SPEED_FACTOR: f32 = 0.6;

/// Degenerate-direction guard: below this length, aim falls back to +Z.
pub const MIN_AIM_LENGTH: f32 = 0.01;

// ============================================================================
// Contact Damage
// ============================================================================

/// Distance under which the two actors count as colliding.
pub const CONTACT_THRESHOLD: f32 = 2.5;

/// Minimum interval between proximity checks in seconds.
pub const CONTACT_CHECK_INTERVAL: f32 = 0.2;

/// Minimum interval between contact damage applications in seconds.
pub const CONTACT_DAMAGE_COOLDOWN: f32 = 1.0;

/// Contact damage at session start.
pub const CONTACT_BASE_DAMAGE: f32 = 10.0;

/// Seconds of session time per +100% contact damage (attrition curve).
pub const CONTACT_SCALE_PERIOD: f32 = 180.0;

/// Maximum contact damage multiplier.
pub const CONTACT_SCALE_CAP: f32 = 2.0;

// ============================================================================
// Arena
// ============================================================================

/// Arena side length. The automaton target is clamped to
/// `±(ARENA_SIZE / 2 - ARENA_MARGIN)` on both horizontal axes.
pub const ARENA_SIZE: f32 = 40.0;

/// Inner margin kept between the automaton target and the arena edge.
pub const ARENA_MARGIN: f32 = 2.0;

/// Player spawn position.
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 8.0, 10.0];

/// Automaton spawn position.
pub const AUTOMATON_SPAWN: [f32; 3] = [0.0, 2.0, 0.0];

// ============================================================================
// Health & Score
// ============================================================================

/// Player starting/maximum health.
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Automaton starting/maximum health.
pub const AUTOMATON_MAX_HEALTH: f32 = 500.0;

/// Score bonus awarded when the automaton is defeated.
pub const VICTORY_BONUS: u32 = 500;

/// How long the published damage flash stays set after a health loss.
pub const DAMAGE_FLASH_SECS: f32 = 0.3;

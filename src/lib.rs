//! bossarena - Single-Arena Boss Fight Simulation Core
//!
//! The real-time simulation core of a one-on-one boss fight: a
//! controllable player versus an AI-driven automaton, resolved through
//! physics-driven movement, charge-based melee, ranged projectiles, and
//! a single health/score/outcome authority. Presentation (rendering,
//! input capture, audio) consumes the published per-tick snapshot and
//! writes abstracted intent; it holds no decision logic.
//!
//! This library exposes the core modules for embedding and testing.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod sim;

// Re-export commonly used types
pub use combat::game_state::{GameState, Phase};
pub use combat::log::{FightLog, FightLogEventType};
pub use headless::{run_headless_session, HeadlessSessionConfig, SessionOutcome};
pub use sim::intent::PlayerIntent;
pub use sim::publish::FrameSnapshot;

//! Headless session execution
//!
//! Runs a boss-fight session without any graphical output, suitable for
//! automated testing and agent integration. The session ends on player
//! death, on victory (after the defeat descent completes), or on
//! timeout; the fight log is saved and a [`SessionResult`] is returned.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::combat::game_state::{GameState, Phase};
use crate::combat::log::{FightLog, FightLogEventType, SessionMetadata};
use crate::combat::CombatPlugin;
use crate::sim::components::{GameRng, SimSettings};
use crate::sim::constants::DEFEAT_SEQUENCE_SECS;
use crate::sim::intent::PlayerIntent;
use crate::sim::{self, SimPhase, SimPlugin};

use super::config::{HeadlessSessionConfig, ScriptStep};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Automaton destroyed
    Victory,
    /// Player died
    Defeat,
    /// Maximum duration reached
    Timeout,
}

impl SessionOutcome {
    pub fn label(self) -> &'static str {
        match self {
            SessionOutcome::Victory => "Victory",
            SessionOutcome::Defeat => "PlayerDead",
            SessionOutcome::Timeout => "Timeout",
        }
    }
}

/// Result of a completed headless session
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub outcome: SessionOutcome,
    /// Session duration in seconds
    pub duration_secs: f64,
    pub score: u32,
    pub player_health: f32,
    pub automaton_health: f32,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Resource tracking headless session state
#[derive(Resource)]
pub struct SessionState {
    /// Maximum session duration before declaring a timeout
    pub max_duration: f32,
    /// Custom output path for the fight log
    pub output_path: Option<String>,
    /// Whether the session has completed
    pub complete: bool,
    /// Session end time, once scheduled (lets the defeat descent play out)
    pub end_at: Option<f64>,
    /// Random seed for deterministic simulation (if provided)
    pub random_seed: Option<u64>,
    /// Session result (populated when the session completes)
    pub result: Option<SessionResult>,
}

/// Scripted intent timeline driving the player in headless mode.
#[derive(Resource, Default)]
pub struct IntentScript {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl IntentScript {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps, cursor: 0 }
    }
}

/// Plugin for headless session execution
pub struct HeadlessPlugin {
    pub config: HeadlessSessionConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        let game_rng = match self.config.random_seed {
            Some(seed) => {
                info!("Using deterministic RNG with seed: {}", seed);
                GameRng::from_seed(seed)
            }
            None => GameRng::from_entropy(),
        };

        app.insert_resource(GameState::new(
            self.config.player_health,
            self.config.automaton_health,
        ))
        .insert_resource(game_rng)
        .insert_resource(SimSettings {
            directional_melee: self.config.directional_melee,
        })
        .insert_resource(IntentScript::new(self.config.script.clone()))
        .insert_resource(SessionState {
            max_duration: self.config.max_duration_secs,
            output_path: self.config.output_path.clone(),
            complete: false,
            end_at: None,
            random_seed: self.config.random_seed,
            result: None,
        });

        app.add_systems(Startup, headless_setup_session)
            .add_systems(
                Update,
                drive_scripted_intent
                    .in_set(SimPhase::Clock)
                    .after(sim::advance_clock),
            )
            .add_systems(
                Update,
                check_session_end.after(SimPhase::Outcome).before(SimPhase::Publish),
            )
            .add_systems(PostUpdate, exit_on_complete);
    }
}

/// Spawn the actors and start the log.
fn headless_setup_session(mut commands: Commands, mut log: ResMut<FightLog>) {
    log.clear();
    log.log(
        FightLogEventType::SessionEvent,
        "Session started (headless mode)".to_string(),
    );
    sim::spawn_actors(&mut commands);
}

/// Apply the latest script step whose time has come.
fn drive_scripted_intent(
    clock: Res<crate::sim::components::SimClock>,
    mut script: ResMut<IntentScript>,
    mut intent: ResMut<PlayerIntent>,
) {
    let now = clock.now();
    while script.cursor < script.steps.len() && (script.steps[script.cursor].at_secs as f64) <= now
    {
        *intent = script.steps[script.cursor].intent;
        script.cursor += 1;
    }
}

/// Detect session end: defeat immediately, victory once the descent has
/// played out, or timeout.
fn check_session_end(
    clock: Res<crate::sim::components::SimClock>,
    game_state: Res<GameState>,
    log: Res<FightLog>,
    mut session: ResMut<SessionState>,
) {
    if session.complete {
        return;
    }
    let now = clock.now();

    let outcome = match game_state.phase {
        Phase::PlayerDead => Some(SessionOutcome::Defeat),
        Phase::Victory => {
            // Let the defeat descent finish before ending the session.
            let end_at = *session
                .end_at
                .get_or_insert(now + DEFEAT_SEQUENCE_SECS as f64);
            (now >= end_at).then_some(SessionOutcome::Victory)
        }
        Phase::Playing => (now >= session.max_duration as f64).then_some(SessionOutcome::Timeout),
    };

    let Some(outcome) = outcome else {
        return;
    };

    let result = SessionResult {
        outcome,
        duration_secs: now,
        score: game_state.score,
        player_health: game_state.player_health,
        automaton_health: game_state.automaton_health,
        random_seed: session.random_seed,
    };
    info!(
        "Session ended: {} after {:.1}s (score {})",
        outcome.label(),
        now,
        result.score
    );

    let metadata = SessionMetadata {
        outcome: outcome.label().to_string(),
        duration_secs: now,
        score: result.score,
        player_health: result.player_health,
        automaton_health: result.automaton_health,
        random_seed: session.random_seed,
    };
    match log.save_to_file(&metadata, session.output_path.as_deref()) {
        Ok(filename) => println!("Session complete. Log saved to: {}", filename),
        Err(e) => eprintln!("Failed to save fight log: {}", e),
    }

    session.result = Some(result);
    session.complete = true;
}

/// Exit the app when the session is complete
fn exit_on_complete(session: Res<SessionState>, mut exit: EventWriter<AppExit>) {
    if session.complete {
        exit.send(AppExit::Success);
    }
}

/// Build a session app without a runner, for embedding and tests.
/// Callers step it with `app.update()`.
pub fn build_session_app(config: HeadlessSessionConfig) -> App {
    let mut app = App::new();
    app.add_plugins((SimPlugin, CombatPlugin, HeadlessPlugin { config }));
    app
}

/// Run a headless session with the given configuration.
pub fn run_headless_session(config: HeadlessSessionConfig) -> Result<SessionResult, String> {
    config.validate()?;

    println!("Starting headless boss-fight session...");
    println!("  Player health: {:.0}", config.player_health);
    println!("  Automaton health: {:.0}", config.automaton_health);
    println!("  Max duration: {:.0}s", config.max_duration_secs);
    if let Some(seed) = config.random_seed {
        println!("  Seed: {}", seed);
    }

    // Free-running by default; 60 Hz wall-clock pacing on request. The
    // simulation step itself is a fixed 60 Hz tick either way.
    let interval = if config.realtime {
        Duration::from_secs_f64(1.0 / 60.0)
    } else {
        Duration::ZERO
    };

    let mut app = build_session_app(config);
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(interval)));
    app.run();

    app.world()
        .resource::<SessionState>()
        .result
        .clone()
        .ok_or_else(|| "Session ended without a result".to_string())
}

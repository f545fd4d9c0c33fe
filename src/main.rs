//! bossarena - Single-Arena Boss Fight Simulation Core
//!
//! Runs a headless boss-fight session from a JSON config and prints the
//! outcome. Rendering, input capture, and audio are external
//! collaborators that embed the library instead of this binary.

use std::process::ExitCode;

use bossarena::cli;
use bossarena::headless::{run_headless_session, HeadlessSessionConfig};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let mut config = match args.config {
        Some(path) => match HeadlessSessionConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => HeadlessSessionConfig::default(),
    };

    // CLI overrides
    if let Some(output) = args.output {
        config.output_path = Some(output.to_string_lossy().into_owned());
    }
    if let Some(max_duration) = args.max_duration {
        config.max_duration_secs = max_duration;
    }
    if let Some(seed) = args.seed {
        config.random_seed = Some(seed);
    }
    if args.realtime {
        config.realtime = true;
    }

    match run_headless_session(config) {
        Ok(result) => {
            println!(
                "Outcome: {} | duration {:.1}s | score {} | player {:.0} hp | automaton {:.0} hp",
                result.outcome.label(),
                result.duration_secs,
                result.score,
                result.player_health,
                result.automaton_health,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! Command-line interface for the boss-arena simulator
//!
//! The binary always runs headless; presentation collaborators embed
//! the library instead.

use clap::Parser;
use std::path::PathBuf;

/// Single-arena boss fight simulator
#[derive(Parser, Debug)]
#[command(name = "bossarena")]
#[command(about = "Single-arena boss fight simulator")]
#[command(version)]
pub struct Args {
    /// JSON session config file (defaults apply when omitted)
    pub config: Option<PathBuf>,

    /// Output path for the fight log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum session duration in seconds (overrides config)
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Random seed for deterministic session reproduction (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pace the session at 60 Hz wall-clock instead of free-running
    #[arg(long)]
    pub realtime: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

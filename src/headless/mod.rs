//! Headless mode for agentic testing
//!
//! This module provides functionality to run boss-fight sessions without
//! any graphical output, suitable for automated testing and AI agent
//! integration.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless session
//! cargo run --release -- session_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "max_duration_secs": 60,
//!   "random_seed": 42,
//!   "script": [
//!     { "at_secs": 0.0, "forward": true, "sprint": true },
//!     { "at_secs": 2.0, "attack": true },
//!     { "at_secs": 3.0 }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessSessionConfig;
pub use runner::{build_session_app, run_headless_session, SessionOutcome, SessionResult};

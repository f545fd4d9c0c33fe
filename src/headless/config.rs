//! JSON configuration parsing for headless sessions
//!
//! Parses JSON session configurations: initial health pools, duration,
//! RNG seed, feature toggles, and an optional scripted intent timeline
//! that stands in for live input so sessions are reproducible.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sim::intent::PlayerIntent;

/// One step of the scripted intent timeline. The intent becomes active
/// at `at_secs` and stays active until the next step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Session time at which this intent takes effect
    pub at_secs: f32,
    #[serde(flatten)]
    pub intent: PlayerIntent,
}

/// Headless session configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessSessionConfig {
    /// Maximum session duration in seconds before declaring a timeout
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for deterministic session reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Player starting/maximum health
    #[serde(default = "default_player_health")]
    pub player_health: f32,
    /// Automaton starting/maximum health
    #[serde(default = "default_automaton_health")]
    pub automaton_health: f32,
    /// Gate melee hits behind the forward-facing cone variant
    #[serde(default)]
    pub directional_melee: bool,
    /// Custom output path for the fight log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Pace the loop at 60 Hz wall-clock instead of free-running
    #[serde(default)]
    pub realtime: bool,
    /// Scripted intent timeline (empty = idle player)
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

fn default_max_duration() -> f32 {
    300.0
}

fn default_player_health() -> f32 {
    crate::sim::constants::PLAYER_MAX_HEALTH
}

fn default_automaton_health() -> f32 {
    crate::sim::constants::AUTOMATON_MAX_HEALTH
}

impl Default for HeadlessSessionConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration(),
            random_seed: None,
            player_health: default_player_health(),
            automaton_health: default_automaton_health(),
            directional_melee: false,
            output_path: None,
            realtime: false,
            script: Vec::new(),
        }
    }
}

impl HeadlessSessionConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessSessionConfig =
            serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }
        if self.player_health <= 0.0 {
            return Err("player_health must be positive".to_string());
        }
        if self.automaton_health <= 0.0 {
            return Err("automaton_health must be positive".to_string());
        }

        let mut prev = 0.0f32;
        for (i, step) in self.script.iter().enumerate() {
            if step.at_secs < 0.0 {
                return Err(format!("script step {} has negative at_secs", i));
            }
            if step.at_secs < prev {
                return Err(format!(
                    "script step {} is out of order ({} < {})",
                    i, step.at_secs, prev
                ));
            }
            prev = step.at_secs;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(HeadlessSessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_minimal_json_parses_with_defaults() {
        let config: HeadlessSessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_duration_secs, 300.0);
        assert_eq!(config.player_health, 100.0);
        assert_eq!(config.automaton_health, 500.0);
        assert!(config.script.is_empty());
    }

    #[test]
    fn test_script_parses_flattened_intent() {
        let json = r#"{
            "script": [
                { "at_secs": 0.0, "forward": true, "sprint": true },
                { "at_secs": 2.0, "attack": true },
                { "at_secs": 2.5 }
            ]
        }"#;
        let config: HeadlessSessionConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.script.len(), 3);
        assert!(config.script[0].intent.forward);
        assert!(config.script[1].intent.attack);
        assert!(!config.script[2].intent.attack);
    }

    #[test]
    fn test_out_of_order_script_is_rejected() {
        let json = r#"{
            "script": [
                { "at_secs": 5.0 },
                { "at_secs": 1.0 }
            ]
        }"#;
        let config: HeadlessSessionConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_duration_is_rejected() {
        let config = HeadlessSessionConfig {
            max_duration_secs: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

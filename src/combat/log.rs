//! Fight logging
//!
//! Records all session events for post-run analysis. Entries carry a
//! timestamp, a type for filtering, a human-readable message, and
//! (for damage) structured data so damage can be aggregated by cause.
//! The whole log can be exported to JSON together with session metadata.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Serialize;

/// A single entry in the fight log
#[derive(Debug, Clone, Serialize)]
pub struct FightLogEntry {
    /// Timestamp in session time (seconds since session start)
    pub timestamp: f64,
    /// The type of event
    pub event_type: FightLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Structured payload for damage entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<DamageData>,
}

/// Types of fight log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FightLogEventType {
    /// Damage dealt
    Damage,
    /// Healing done
    Healing,
    /// Player melee swing resolved (hit or miss)
    MeleeAttack,
    /// Automaton burst fired
    ProjectileFired,
    /// Projectile connected
    ProjectileHit,
    /// Proximity contact damage
    ContactDamage,
    /// Automaton movement pattern switch
    PatternChange,
    /// Playing / PlayerDead / Victory transition
    PhaseChange,
    /// Session event (start, end, reset)
    SessionEvent,
}

/// Structured payload attached to damage entries
#[derive(Debug, Clone, Serialize)]
pub struct DamageData {
    /// Actor that dealt the damage ("Player" or "Automaton")
    pub source: String,
    /// Actor that took the damage
    pub target: String,
    /// What caused it ("Melee", "Projectile", "Contact")
    pub cause: String,
    /// Health actually removed (after clamping and phase guards)
    pub amount: f32,
}

/// Session metadata written alongside the entries on export
#[derive(Debug, Clone, Serialize)]
pub struct SessionMetadata {
    /// "Victory", "PlayerDead", or "Timeout"
    pub outcome: String,
    /// Session duration in seconds
    pub duration_secs: f64,
    pub score: u32,
    pub player_health: f32,
    pub automaton_health: f32,
    /// Seed used, if the session was deterministic
    pub random_seed: Option<u64>,
}

/// The fight log resource storing all events
#[derive(Resource, Default)]
pub struct FightLog {
    /// All log entries in chronological order
    pub entries: Vec<FightLogEntry>,
    /// Current session time, advanced by the clock system
    pub session_time: f64,
}

impl FightLog {
    /// Clear the log for a new session
    pub fn clear(&mut self) {
        self.entries.clear();
        self.session_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: FightLogEventType, message: String) {
        self.entries.push(FightLogEntry {
            timestamp: self.session_time,
            event_type,
            message,
            damage: None,
        });
    }

    /// Add a damage entry with structured data for aggregation
    pub fn log_damage(&mut self, source: &str, target: &str, cause: &str, amount: f32, message: String) {
        self.entries.push(FightLogEntry {
            timestamp: self.session_time,
            event_type: FightLogEventType::Damage,
            message,
            damage: Some(DamageData {
                source: source.to_string(),
                target: target.to_string(),
                cause: cause.to_string(),
                amount,
            }),
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: FightLogEventType) -> Vec<&FightLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Total damage dealt by a source, grouped by cause
    pub fn damage_by_cause(&self, source: &str) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(data) = &entry.damage {
                if data.source == source {
                    *totals.entry(data.cause.clone()).or_insert(0.0) += data.amount;
                }
            }
        }
        totals
    }

    /// Total damage taken by a target
    pub fn total_damage_taken(&self, target: &str) -> f32 {
        self.entries
            .iter()
            .filter_map(|e| e.damage.as_ref())
            .filter(|d| d.target == target)
            .map(|d| d.amount)
            .sum()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&FightLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Save the log and metadata as JSON. Uses `output_path` when given,
    /// otherwise a timestamped `fight_log_<unix_secs>.json` in the
    /// working directory. Returns the path written.
    pub fn save_to_file(
        &self,
        metadata: &SessionMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        #[derive(Serialize)]
        struct Export<'a> {
            metadata: &'a SessionMetadata,
            entries: &'a [FightLogEntry],
        }

        let filename = match output_path {
            Some(path) => path.to_string(),
            None => {
                let unix_secs = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map_err(|e| format!("System clock error: {}", e))?
                    .as_secs();
                format!("fight_log_{}.json", unix_secs)
            }
        };

        let export = Export {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| format!("Failed to serialize fight log: {}", e))?;
        std::fs::write(&filename, json)
            .map_err(|e| format!("Failed to write {}: {}", filename, e))?;

        Ok(filename)
    }
}

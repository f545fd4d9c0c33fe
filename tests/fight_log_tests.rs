//! Tests for fight log export
//!
//! Verifies the JSON export path end to end: explicit output paths,
//! the timestamped default filename, and the exported structure.

use regex::Regex;

use bossarena::combat::log::{FightLog, FightLogEventType, SessionMetadata};

fn metadata() -> SessionMetadata {
    SessionMetadata {
        outcome: "Timeout".to_string(),
        duration_secs: 12.5,
        score: 40,
        player_health: 80.0,
        automaton_health: 460.0,
        random_seed: Some(7),
    }
}

fn sample_log() -> FightLog {
    let mut log = FightLog::default();
    log.log(
        FightLogEventType::SessionEvent,
        "Session started (headless mode)".to_string(),
    );
    log.log_damage("Player", "Automaton", "Melee", 40.0, "hit".to_string());
    log.log_damage("Automaton", "Player", "Projectile", 10.0, "hit".to_string());
    log.log_damage("Automaton", "Player", "Contact", 10.0, "bump".to_string());
    log
}

#[test]
fn test_save_to_explicit_path() {
    let path = std::env::temp_dir().join(format!(
        "bossarena_log_test_{}.json",
        std::process::id()
    ));
    let path_str = path.to_string_lossy().into_owned();

    let written = sample_log()
        .save_to_file(&metadata(), Some(&path_str))
        .expect("save should succeed");
    assert_eq!(written, path_str);

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["metadata"]["outcome"], "Timeout");
    assert_eq!(parsed["metadata"]["score"], 40);
    assert_eq!(parsed["metadata"]["random_seed"], 7);
    assert_eq!(parsed["entries"].as_array().unwrap().len(), 4);
    // Damage entries carry their structured payload; plain entries omit it.
    assert!(parsed["entries"][0].get("damage").is_none());
    assert_eq!(parsed["entries"][1]["damage"]["cause"], "Melee");
    assert_eq!(parsed["entries"][1]["damage"]["amount"], 40.0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_default_filename_is_timestamped() {
    let dir = std::env::temp_dir().join(format!(
        "bossarena_log_default_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&dir).unwrap();

    let written = sample_log().save_to_file(&metadata(), None).unwrap();

    std::env::set_current_dir(original).unwrap();

    let pattern = Regex::new(r"^fight_log_\d+\.json$").unwrap();
    assert!(
        pattern.is_match(&written),
        "unexpected default filename: {}",
        written
    );
    assert!(dir.join(&written).exists());

    std::fs::remove_file(dir.join(&written)).unwrap();
    std::fs::remove_dir(&dir).unwrap();
}

#[test]
fn test_aggregation_matches_export() {
    let log = sample_log();
    assert_eq!(log.total_damage_taken("Player"), 20.0);
    assert_eq!(log.total_damage_taken("Automaton"), 40.0);
    let by_cause = log.damage_by_cause("Automaton");
    assert_eq!(by_cause["Projectile"], 10.0);
    assert_eq!(by_cause["Contact"], 10.0);
}

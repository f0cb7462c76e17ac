//! Integration tests for headless match execution
//!
//! These tests verify that:
//! - Headless matches run to completion
//! - Match results are accessible programmatically
//! - Seeded RNG produces deterministic results

use duelist::headless::{run_headless_match, HeadlessMatchConfig};
use duelist::Corner;

/// Helper to create a basic match config
fn create_config(blue: &str, red: &str, seed: Option<u64>) -> HeadlessMatchConfig {
    HeadlessMatchConfig {
        blue: blue.to_string(),
        red: red.to_string(),
        output_path: None,
        max_duration_secs: 60.0, // Short duration for tests
        random_seed: seed,
    }
}

#[test]
fn test_headless_match_finishes() {
    let result = run_headless_match(&create_config("Hero", "Boss", Some(42)))
        .expect("match should run");

    // The timeout is noticed on the first frame at or past the limit
    assert!(result.match_time < 60.0 + 2.0 / 60.0);
    assert!(result.frames > 0);
    assert_eq!(result.random_seed, Some(42));
    assert_eq!(result.blue.name, "Hero");
    assert_eq!(result.red.name, "Boss");

    if result.timed_out {
        assert_eq!(result.winner, None);
    } else {
        // A finished bout always has somebody on the floor
        assert!(!result.blue.survived || !result.red.survived);
    }
}

#[test]
fn test_seeded_matches_are_deterministic() {
    let config = create_config("Hero", "Rival", Some(42));
    let first = run_headless_match(&config).expect("first run");
    let second = run_headless_match(&config).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn test_vitals_stay_in_range() {
    let result = run_headless_match(&create_config("Rival", "Boss", Some(7))).expect("match should run");
    for corner in Corner::all() {
        let fighter = result.fighter(corner);
        assert!((0..=fighter.max_health).contains(&fighter.final_health));
        assert!(fighter.final_energy >= 0);
        assert!(fighter.damage_taken >= 0);
    }
}

#[test]
fn test_log_written_to_output_path() {
    let path = std::env::temp_dir().join(format!("duelist_headless_{}.json", std::process::id()));
    let mut config = create_config("Hero", "Boss", Some(3));
    config.output_path = Some(path.to_string_lossy().into_owned());

    run_headless_match(&config).expect("match should run");

    let contents = std::fs::read_to_string(&path).expect("log file written");
    let json: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(json["metadata"]["random_seed"], 3);
    assert!(json["entries"].as_array().is_some_and(|entries| !entries.is_empty()));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_unknown_fighter_is_rejected() {
    let err = run_headless_match(&create_config("Hero", "Goblin", None)).unwrap_err();
    assert!(err.contains("Goblin"));
}

#[test]
fn test_config_from_json_defaults() {
    let config = HeadlessMatchConfig::from_json(r#"{ "random_seed": 5 }"#).expect("valid config");
    assert_eq!(config.blue, "Hero");
    assert_eq!(config.red, "Boss");
    assert_eq!(config.max_duration_secs, 300.0);
    assert_eq!(config.random_seed, Some(5));
}

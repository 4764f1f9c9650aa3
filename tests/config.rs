//! Integration tests for environment configuration.

use penguin_cup::GameConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> Result<GameConfig, penguin_cup::ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    GameConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.field_size, 16);
    assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
    assert_eq!(config.load_roster().unwrap().len(), 20);
}

#[test]
fn reads_every_variable() {
    let config = config_from(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "9000"),
        ("CUP_FIELD_SIZE", "8"),
        ("QUICK_MATCH_TEAM_ID", "7"),
        ("FRAME_RATE", "30"),
        ("SESSION_IDLE_HOURS", "2"),
        ("ROSTER_CSV", "teams.csv"),
        ("RNG_SEED", "42"),
    ])
    .unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.field_size, 8);
    assert_eq!(config.quick_match_team_id, 7);
    assert_eq!(config.frame_rate, 30);
    assert_eq!(config.session_idle, Duration::from_secs(2 * 3600));
    assert_eq!(config.roster_csv, Some(PathBuf::from("teams.csv")));
    assert_eq!(config.rng_seed, Some(42));
}

#[test]
fn empty_values_keep_defaults() {
    let config = config_from(&[("PORT", ""), ("RNG_SEED", "  ")]).unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.rng_seed, None);
}

#[test]
fn rejects_bad_values() {
    for (key, value) in [
        ("CUP_FIELD_SIZE", "12"),
        ("CUP_FIELD_SIZE", "32"),
        ("CUP_FIELD_SIZE", "many"),
        ("PORT", "70000"),
        ("FRAME_RATE", "0"),
        ("SESSION_IDLE_HOURS", "0"),
        ("RNG_SEED", "-1"),
    ] {
        let err = config_from(&[(key, value)]).unwrap_err();
        assert_eq!(err.key, key);
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear_env() {
    for key in [
        "HOTTUB_CONFIG",
        "HOTTUB_STATE_DIR",
        "HOTTUB_LOG_DIR",
        "HOTTUB_WEBHOOK_BASE_URL",
        "HOTTUB_HEALTHCHECK_BASE_URL",
        "HOTTUB_HEALTHCHECK_API_KEY",
        "HOTTUB_SENSOR_POLL_INTERVAL_ON_S",
        "HOTTUB_SENSOR_POLL_INTERVAL_OFF_S",
        "HOTTUB_REQUEST_TIMEOUT_MS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_apply_with_no_file_and_no_env() {
    clear_env();
    let config = HotTubConfig::load(Some(Path::new("/nonexistent/path.toml"))).unwrap();
    assert_eq!(config.sensor_poll_interval_on_s, 60);
    assert_eq!(config.sensor_poll_interval_off_s, 300);
}

#[test]
#[serial]
fn env_override_wins_over_default() {
    clear_env();
    std::env::set_var("HOTTUB_SENSOR_POLL_INTERVAL_ON_S", "42");
    let config = HotTubConfig::load(Some(Path::new("/nonexistent/path.toml"))).unwrap();
    assert_eq!(config.sensor_poll_interval_on_s, 42);
    clear_env();
}

#[test]
#[serial]
fn env_override_wins_over_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "sensor_poll_interval_on_s = 10\n").unwrap();
    std::env::set_var("HOTTUB_SENSOR_POLL_INTERVAL_ON_S", "99");
    let config = HotTubConfig::load(Some(&path)).unwrap();
    assert_eq!(config.sensor_poll_interval_on_s, 99);
    clear_env();
}

#[test]
#[serial]
fn invalid_numeric_env_value_is_an_error_not_a_panic() {
    clear_env();
    std::env::set_var("HOTTUB_REQUEST_TIMEOUT_MS", "not-a-number");
    let result = HotTubConfig::load(Some(Path::new("/nonexistent/path.toml")));
    assert!(matches!(result, Err(ConfigError::Invalid { key: "HOTTUB_REQUEST_TIMEOUT_MS", .. })));
    clear_env();
}

#[test]
fn secret_debug_never_prints_the_value() {
    let secret = Secret::from(Some("super-secret-key".to_string()));
    let printed = format!("{secret:?}");
    assert!(!printed.contains("super-secret-key"));
}

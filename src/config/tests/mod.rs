//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and serialization.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;

use crate::config::{ChangeDetection, Config, ConfigError, LogLevel};

#[test]
fn config_default_points_at_local_player() {
    let config = Config::default();

    assert_eq!(config.player.host, "127.0.0.1");
    assert_eq!(config.player.port, 8080);
    assert!(config.player.password.is_empty());
    assert!(!config.player.high_resolution);
    assert_eq!(config.player.base_url(), "http://127.0.0.1:8080");
    assert!(config.player.is_configured());
}

#[test]
fn config_default_polling_cadence() {
    let polling = Config::default().polling;

    assert_eq!(polling.playlist_interval_ms, 500);
    assert_eq!(polling.playback_interval_ms, 100);
    assert_eq!(polling.throttle_divisor, 5);
    assert_eq!(polling.playlist_change_detection, ChangeDetection::Heuristic);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(toml_str.contains("[polling]"));
    assert!(toml_str.contains("[display]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [player]
        host = "10.0.0.5"
        port = 9090
        password = "secret"
        high_resolution = true

        [polling]
        playlist_change_detection = "strict"

        [display]
        use_tenths = true
    "#;

    let config = Config::from_toml_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.player.endpoint(), "10.0.0.5:9090");
    assert_eq!(config.player.password, "secret");
    assert!(config.player.high_resolution);
    assert_eq!(config.polling.playlist_change_detection, ChangeDetection::Strict);
    assert_eq!(config.polling.playback_interval_ms, 100);
    assert!(config.display.use_tenths);
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_empty_host_is_unconfigured_not_invalid() {
    let config = Config::from_toml_str("[player]\nhost = \"  \"\n").unwrap();

    assert!(!config.player.is_configured());
}

#[test]
fn config_rejects_zero_interval() {
    let err = Config::from_toml_str("[polling]\nplayback_interval_ms = 0\n").unwrap_err();

    match err {
        ConfigError::InvalidField { field, .. } => assert_eq!(field, "playback_interval_ms"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_rejects_zero_divisor() {
    let result = Config::from_toml_str("[polling]\nthrottle_divisor = 0\n");

    assert!(matches!(result, Err(ConfigError::InvalidField { .. })));
}

#[test]
fn config_rejects_misspelled_key() {
    let err = Config::from_toml_str("[player]\nhi_res = true\n").unwrap_err();

    match err {
        ConfigError::TomlParse { details, .. } => assert!(details.contains("hi_res")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_rejects_unknown_section() {
    let result = Config::from_toml_str("[mpris]\nenabled = true\n");

    assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
}

#[test]
fn config_invalid_toml_reports_location() {
    let err = Config::from_toml_str("[player\nhost = ").unwrap_err();

    match err {
        ConfigError::TomlParse { location, .. } => assert_eq!(location, "string"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_load_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();

    let config = Config::load(&temp.path().join("config.toml")).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_load_reads_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[player]\nport = 4212\n").unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.player.port, 4212);
    assert_eq!(config.player.host, "127.0.0.1");
}

#[test]
fn config_serialize_roundtrip() {
    let mut original = Config::default();
    original.player.password = "pw".to_string();
    original.display.use_tenths = true;

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::from_toml_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

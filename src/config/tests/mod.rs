//! Unit tests for config module
//!
//! Tests configuration types, defaults, and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::time::Duration;

use crate::{
    config::{BluezConfig, Config, LogLevel, WaitStrategyKind},
    core::Error,
};

#[test]
fn config_defaults() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.bluez.poll_interval(), Duration::from_millis(50));
    assert_eq!(config.bluez.read_timeout(), Duration::from_secs(5));
    assert_eq!(config.bluez.property_timeout(), Duration::from_secs(10));
    assert_eq!(config.bluez.wait_strategy, WaitStrategyKind::Poll);
}

#[test]
fn config_serialize_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[bluez]"));
    assert!(toml_str.contains("poll_interval_ms = 50"));
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = Config::parse(
        r#"
        [bluez]
        read_timeout_ms = 250
        wait_strategy = "signal"
        "#,
        None,
    )
    .unwrap();

    assert_eq!(config.bluez.read_timeout(), Duration::from_millis(250));
    assert_eq!(config.bluez.wait_strategy, WaitStrategyKind::Signal);
    assert_eq!(config.bluez.poll_interval_ms, 50);
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn config_minimal_toml() {
    let config = Config::parse("[general]\nlog_level = \"debug\"\n", None).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.bluez, BluezConfig::default());
}

#[test]
fn zero_poll_interval_is_rejected() {
    let result = Config::parse("[bluez]\npoll_interval_ms = 0\n", None);

    match result {
        Err(Error::ConfigValidation { component, .. }) => assert_eq!(component, "bluez"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn malformed_toml_reports_location() {
    let result = Config::parse("[bluez\n", None);

    match result {
        Err(Error::TomlParseError { location, .. }) => assert_eq!(location, "string"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn unknown_wait_strategy_is_a_parse_error() {
    let result = Config::parse("[bluez]\nwait_strategy = \"busy\"\n", None);

    assert!(matches!(result, Err(Error::TomlParseError { .. })));
}

#[test]
fn schema_lists_bluez_settings() {
    let schema = Config::json_schema().unwrap();

    assert!(schema.contains("poll_interval_ms"));
    assert!(schema.contains("wait_strategy"));
}

//! Integration tests for configuration loading from disk.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{fs, time::Duration};

use bluez_helpers::{
    Error,
    config::{Config, ConfigPaths, LogLevel, WaitStrategyKind},
};
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();

    let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn loads_all_sections() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[general]
log_level = "trace"

[bluez]
poll_interval_ms = 20
read_timeout_ms = 1500
property_timeout_ms = 3000
wait_strategy = "signal"
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Trace);
    assert_eq!(config.bluez.poll_interval(), Duration::from_millis(20));
    assert_eq!(config.bluez.read_timeout(), Duration::from_millis(1500));
    assert_eq!(config.bluez.property_timeout(), Duration::from_secs(3));
    assert_eq!(config.bluez.wait_strategy, WaitStrategyKind::Signal);
}

#[test]
fn parse_error_names_the_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[bluez]\npoll_interval_ms = \"fast\"\n");

    let error = Config::load_from(&path).unwrap_err();

    match error {
        Error::TomlParseError { location, .. } => assert!(location.ends_with("config.toml")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn main_config_follows_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("bluez-helpers");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[bluez]\nread_timeout_ms = 750\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp.path());
    }

    assert_eq!(
        ConfigPaths::main_config().unwrap(),
        config_dir.join("config.toml")
    );
    let config = Config::load().unwrap();
    assert_eq!(config.bluez.read_timeout(), Duration::from_millis(750));
}

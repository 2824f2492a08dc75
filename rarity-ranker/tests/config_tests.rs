//! Integration tests for configuration resolution
//!
//! Priority: command line → environment → TOML file → built-in default

use clap::Parser;
use rarity_common::config::{write_toml_config, LoggingConfig, TomlConfig};
use rarity_ranker::config::{Args, RankerConfig};
use rarity_ranker::services::Schedule;
use serial_test::serial;
use std::time::Duration;
use tempfile::TempDir;

const ENV_VARS: [&str; 8] = [
    "RARITY_COLLECTION_NAME",
    "RARITY_BASE_URL",
    "RARITY_ITEM_COUNT",
    "RARITY_MAX_TASKS",
    "RARITY_SCHEDULE",
    "RARITY_TOP",
    "RARITY_TIMEOUT_SECS",
    "RARITY_CONFIG",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let config = TomlConfig {
        collection_name: Some("from-toml".to_string()),
        base_url: Some("http://toml.example".to_string()),
        item_count: Some(300),
        max_tasks: Some(12),
        schedule: Some("batched".to_string()),
        top: Some(7),
        timeout_secs: Some(9),
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    };
    write_toml_config(&config, &path).unwrap();
    path
}

#[test]
#[serial]
fn test_toml_values_used_when_no_cli_or_env() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir);

    let args = Args::try_parse_from(["rarity-ranker", "--config", path.to_str().unwrap()]).unwrap();
    let config = RankerConfig::resolve(&args).unwrap();

    assert_eq!(config.collection_name, "from-toml");
    assert_eq!(config.base_url, "http://toml.example");
    assert_eq!(config.item_count, 300);
    assert_eq!(config.max_tasks, 12);
    assert_eq!(config.schedule, Schedule::Batched);
    assert_eq!(config.top, 7);
    assert_eq!(config.timeout, Some(Duration::from_secs(9)));
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_toml_and_cli_overrides_env() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir);

    std::env::set_var("RARITY_CONFIG", &path);
    std::env::set_var("RARITY_COLLECTION_NAME", "from-env");
    std::env::set_var("RARITY_MAX_TASKS", "4");
    std::env::set_var("RARITY_SCHEDULE", "pool");

    let args = Args::try_parse_from(["rarity-ranker", "-t", "2"]).unwrap();
    let config = RankerConfig::resolve(&args);
    clear_env();
    let config = config.unwrap();

    assert_eq!(config.collection_name, "from-env");
    assert_eq!(config.max_tasks, 2);
    assert_eq!(config.schedule, Schedule::Pool);
    assert_eq!(config.item_count, 300);
}

#[test]
#[serial]
fn test_malformed_env_number_rejected() {
    clear_env();
    std::env::set_var("RARITY_ITEM_COUNT", "ten thousand");

    let parsed = Args::try_parse_from(["rarity-ranker"]);
    clear_env();

    assert!(parsed.is_err());
}

#[test]
#[serial]
fn test_missing_explicit_config_is_error() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let args = Args::try_parse_from(["rarity-ranker", "--config", missing.to_str().unwrap()]).unwrap();

    assert!(RankerConfig::resolve(&args).is_err());
}

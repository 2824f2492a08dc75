//! Integration tests for TOML bootstrap configuration

use rarity_common::config::{
    load_bootstrap_config, load_toml_config, write_toml_config, LoggingConfig, TomlConfig,
};
use rarity_common::Error;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
collection_name = "azuki1"
base_url = "http://localhost:8080"
item_count = 250
max_tasks = 16
schedule = "batched"
top = 10
timeout_secs = 30

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.collection_name.as_deref(), Some("azuki1"));
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(config.item_count, Some(250));
    assert_eq!(config.max_tasks, Some(16));
    assert_eq!(config.schedule.as_deref(), Some("batched"));
    assert_eq!(config.top, Some(10));
    assert_eq!(config.timeout_secs, Some(30));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_numeric_value_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "item_count = \"lots\"\n").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let err = load_bootstrap_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_write_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("config.toml");

    let config = TomlConfig {
        collection_name: Some("doodles".to_string()),
        max_tasks: Some(8),
        logging: LoggingConfig {
            level: "warn".to_string(),
        },
        ..Default::default()
    };

    write_toml_config(&config, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("collection_name = \"doodles\""));
    assert!(!content.contains("base_url"), "unset keys are omitted");

    let loaded = load_bootstrap_config(Some(&path)).unwrap();
    assert_eq!(loaded, config);
}

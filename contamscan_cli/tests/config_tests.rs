//! Tests for layered configuration loading from files

use contamscan_cli::config::{AppConfig, ConfigManager};
use contamscan_cli::output::OutputFormat;
use contamscan_core::MatchMode;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

    let config = manager.load().unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[discovery]
follow_links = false
max_depth = 3
exclude_patterns = ["**/tmp/**"]

[matching]
mode = "exact"

[output]
default_format = "json"
"#,
    )
    .unwrap();

    let config = ConfigManager::with_path(path.clone()).load().unwrap();

    assert!(!config.discovery.follow_links);
    assert!(!config.discovery.include_hidden);
    assert_eq!(config.discovery.max_depth, Some(3));
    assert_eq!(config.discovery.exclude_patterns, ["**/tmp/**".to_string()]);
    assert_eq!(config.matching.mode, MatchMode::Exact);
    assert_eq!(config.output.default_format, OutputFormat::Json);
    assert!(config.output.color_enabled);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[output]\ncolor_enabled = false\n").unwrap();

    let config = ConfigManager::with_path(path).load().unwrap();

    assert!(!config.output.color_enabled);
    assert_eq!(config.output.default_format, OutputFormat::Text);
    assert_eq!(config.matching.mode, MatchMode::Substring);
}

#[test]
fn test_malformed_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[matching]\nmode = \"fuzzy\"\n").unwrap();

    let error = ConfigManager::with_path(path).load().unwrap_err();
    assert!(error.to_string().contains("Failed to load configuration"));
}

#[test]
fn test_printed_config_loads_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.discovery.include_hidden = true;
    config.matching.mode = MatchMode::Exact;
    fs::write(&path, config.to_toml().unwrap()).unwrap();

    let loaded = ConfigManager::with_path(path).load().unwrap();
    assert_eq!(loaded, config);
}

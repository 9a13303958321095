//! Configuration loading integration tests.
//!
//! Tests the config loading APIs:
//! - from_toml_file() / from_yaml_file() / from_json_file()
//! - discover_from() for searching parent directories
//! - Error handling for invalid configs

use hiword::core::config::{CONFIG_FILE_NAME, DEFAULT_MIN_SUPPORT};
use hiword::{ExtractorConfig, HiwordError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test loading config from TOML file.
#[test]
fn test_from_toml_file_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("hiword.toml");

    let toml_content = r#"
min_support = 2
max_keywords = 20
min_score = 0.25

[resources]
dict_path = "data/dict.txt"
idf_path = "data/idf.txt"
"#;

    fs::write(&config_path, toml_content).unwrap();

    let config = ExtractorConfig::from_toml_file(&config_path).unwrap();
    assert_eq!(config.min_support, 2);
    assert_eq!(config.max_keywords, Some(20));
    assert_eq!(config.min_score, 0.25);
    assert_eq!(config.max_short_keywords, 500, "unset fields keep defaults");
    assert_eq!(config.resources.dict_path, Some(PathBuf::from("data/dict.txt")));
    assert!(config.resources.stopwords_path.is_none());
}

/// Test loading config from YAML file.
#[test]
fn test_from_yaml_file_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");

    let yaml_content = r#"
subsumption_tolerance: 1
min_word_chars: 2
sanitize: false
resources:
  stopwords_path: stopwords/
"#;

    fs::write(&config_path, yaml_content).unwrap();

    let config = ExtractorConfig::from_yaml_file(&config_path).unwrap();
    assert_eq!(config.subsumption_tolerance, 1);
    assert_eq!(config.min_word_chars, 2);
    assert!(!config.sanitize);
    assert!(config.normalize_script);
    assert_eq!(config.resources.stopwords_path, Some(PathBuf::from("stopwords/")));
}

/// Test loading config from JSON file.
#[test]
fn test_from_json_file_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");

    fs::write(&config_path, r#"{"max_input_chars": 100000, "max_short_keywords": 200}"#).unwrap();

    let config = ExtractorConfig::from_json_file(&config_path).unwrap();
    assert_eq!(config.max_input_chars, Some(100_000));
    assert_eq!(config.max_short_keywords, 200);
    assert_eq!(config.min_support, DEFAULT_MIN_SUPPORT);
}

/// Test that invalid TOML is reported as a serialization error.
#[test]
fn test_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "min_support = [unclosed").unwrap();

    let result = ExtractorConfig::from_toml_file(&config_path);
    assert!(matches!(result, Err(HiwordError::Serialization { .. })));
}

/// Test that a missing config file is an error, not a default config.
#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = ExtractorConfig::from_toml_file(temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

/// Test that discovery walks up to a parent directory.
#[test]
fn test_discover_from_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "min_support = 4\n").unwrap();

    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let config = ExtractorConfig::discover_from(&nested).unwrap();
    assert_eq!(config.map(|c| c.min_support), Some(4));
}

/// Test that loaded values still go through validation.
#[test]
fn test_loaded_config_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("hiword.toml");
    fs::write(&config_path, "min_support = 0\n").unwrap();

    let config = ExtractorConfig::from_toml_file(&config_path).unwrap();
    assert!(config.validate().is_err());
}

//! Tests for config file loading and saving

use pretty_assertions::assert_eq;
use sprintboard::config::{self, Config};

#[test]
fn test_explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = config::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut original = Config::default();
    original.api.token = Some("secret".to_string());
    original.report.empty_message = "Nothing to show".to_string();
    original.ui.tick_rate_ms = 100;

    config::save(&original, &path).unwrap();
    assert_eq!(config::load(Some(&path)).unwrap(), original);
}

#[cfg(unix)]
#[test]
fn test_saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    config::save(&Config::default(), &path).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_invalid_toml_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = 3").unwrap();

    let err = config::load(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

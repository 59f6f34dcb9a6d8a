//! Unit tests for the SettingsEngine public API: default loading, value
//! persistence, clamping, and reset behavior.

use tempfile::TempDir;
use webstack::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use webstack::types::settings::{BrowserSettings, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};

/// Helper: create a SettingsEngine backed by a temp directory that lives for
/// the duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(
        settings,
        BrowserSettings::default(),
        "Loading without a config file must return default settings"
    );
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    // First engine: load defaults, then change the homepage.
    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("homepage", serde_json::json!("https://example.org"))
            .unwrap();
    }

    // Second engine reading the same file must see the update.
    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.homepage, "https://example.org");
}

#[test]
fn test_sidebar_width_is_clamped_on_set() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .set_value("sidebar_width", serde_json::json!(10_000.0))
        .unwrap();
    assert_eq!(engine.get_settings().sidebar_width, SIDEBAR_MAX_WIDTH);

    engine
        .set_value("sidebar_width", serde_json::json!(1.0))
        .unwrap();
    assert_eq!(engine.get_settings().sidebar_width, SIDEBAR_MIN_WIDTH);
}

#[test]
fn test_update_value_changes_memory_without_saving() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .update_value("sidebar_width", serde_json::json!(300.0))
        .unwrap();
    assert_eq!(engine.get_settings().sidebar_width, 300.0);
    // No file written: streamed updates stay in memory until the caller
    // commits through set_value.
    assert!(!dir.path().join("settings.json").exists());

    engine
        .set_value("sidebar_width", serde_json::json!(320.0))
        .unwrap();
    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap().sidebar_width, 320.0);
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(engine
        .set_value("no_such_setting", serde_json::json!(true))
        .is_err());
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    assert!(engine
        .set_value("sidebar_visible", serde_json::json!("yes"))
        .is_err());
}

#[test]
fn test_reset_restores_defaults_and_saves() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine
        .set_value("sidebar_visible", serde_json::json!(false))
        .unwrap();

    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &BrowserSettings::default());

    // The reset must also be on disk.
    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), BrowserSettings::default());
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = SettingsEngine::new(Some(path.to_string_lossy().to_string()));
    assert!(engine.load().is_err());
}

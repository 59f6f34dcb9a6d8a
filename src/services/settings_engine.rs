// WebStack Settings Engine
// Manages user settings: loading, saving, updating individual values, and resetting to defaults.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::BrowserSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn update_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: BrowserSettings::default(),
        }
    }

    fn expect_f64(key: &str, value: &serde_json::Value) -> Result<f64, SettingsError> {
        value
            .as_f64()
            .ok_or_else(|| SettingsError::SerializationError(format!("{} expects a number", key)))
    }

    fn expect_bool(key: &str, value: &serde_json::Value) -> Result<bool, SettingsError> {
        value
            .as_bool()
            .ok_or_else(|| SettingsError::SerializationError(format!("{} expects a bool", key)))
    }

    fn expect_str(key: &str, value: &serde_json::Value) -> Result<String, SettingsError> {
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| SettingsError::SerializationError(format!("{} expects a string", key)))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = BrowserSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: BrowserSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config dir: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, content)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Updates a single settings value by key in memory, without touching
    /// disk. Used for high-frequency updates (sidebar resize drags) where
    /// the caller commits once at the end.
    ///
    /// Sidebar width values are clamped to the allowed range before storing.
    fn update_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        match key {
            "homepage" => self.settings.homepage = Self::expect_str(key, &value)?,
            "sidebar_visible" => self.settings.sidebar_visible = Self::expect_bool(key, &value)?,
            "sidebar_width" => {
                let width = Self::expect_f64(key, &value)?;
                self.settings.sidebar_width = BrowserSettings::clamped_sidebar_width(width);
            }
            "search_query_url" => {
                self.settings.search_query_url = Self::expect_str(key, &value)?
            }
            _ => return Err(SettingsError::InvalidKey(key.to_string())),
        }
        Ok(())
    }

    /// Updates a single settings value by key and saves immediately.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        self.update_value(key, value)?;
        self.save()
    }

    /// Restores defaults and saves.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BrowserSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

//! App Core for WebStack.
//!
//! Central struct holding the managers and services, managing application lifecycle.

use log::{info, warn};

use crate::managers::shortcut_manager::ShortcutManager;
use crate::managers::tab_manager::TabManager;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct holding all managers and services.
pub struct App {
    pub tab_manager: TabManager,
    pub settings_engine: SettingsEngine,
    pub shortcut_manager: ShortcutManager,
}

impl App {
    /// Creates a new App.
    ///
    /// If `config_path` is `Some`, the settings engine persists there instead
    /// of the platform config directory.
    pub fn new(config_path: Option<String>) -> Self {
        Self {
            tab_manager: TabManager::new(),
            settings_engine: SettingsEngine::new(config_path),
            shortcut_manager: ShortcutManager::new(),
        }
    }

    /// Startup sequence: load persisted settings.
    pub fn startup(&mut self) {
        match self.settings_engine.load() {
            Ok(settings) => info!(
                "settings loaded from {} (homepage {})",
                self.settings_engine.get_config_path(),
                settings.homepage
            ),
            Err(e) => warn!("falling back to default settings: {}", e),
        }
    }

    /// Shutdown sequence: flush settings to disk.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.settings_engine.save() {
            warn!("failed to save settings on shutdown: {}", e);
        }
    }
}

use std::fmt;

// === TabError ===

/// Errors related to tab management operations.
#[derive(Debug)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// An operation required an active tab but none exists.
    NoActiveTab,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::NoActiveTab => write!(f, "No active tab"),
        }
    }
}

impl std::error::Error for TabError {}

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the config file failed.
    IoError(String),
    /// The config file could not be parsed or serialized.
    SerializationError(String),
    /// The settings key does not exist.
    InvalidKey(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
        }
    }
}

impl std::error::Error for SettingsError {}

// === ShortcutError ===

/// Errors related to keyboard shortcut management.
#[derive(Debug)]
pub enum ShortcutError {
    /// No binding registered for the given action.
    NotFound(String),
    /// The key combination is already bound to another action.
    Conflict(String),
    /// The key combination is malformed or empty.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::NotFound(action) => write!(f, "Shortcut not found: {}", action),
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(msg) => write!(f, "Invalid shortcut keys: {}", msg),
        }
    }
}

impl std::error::Error for ShortcutError {}

// WebStack platform paths for Linux
// Config: ~/.config/webstack

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for WebStack on Linux.
/// Uses `$XDG_CONFIG_HOME/webstack` if set, otherwise `~/.config/webstack`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("webstack")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("webstack")
    }
}

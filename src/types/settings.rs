use serde::{Deserialize, Serialize};

/// Sidebar width limits in logical pixels, enforced on resize drags.
pub const SIDEBAR_MIN_WIDTH: f64 = 200.0;
pub const SIDEBAR_MAX_WIDTH: f64 = 400.0;

/// Top-level browser settings container, persisted as JSON in the
/// platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrowserSettings {
    /// URL loaded into a freshly created tab.
    pub homepage: String,
    pub sidebar_visible: bool,
    pub sidebar_width: f64,
    /// Prefix the search query is appended to when the URL field input
    /// does not look like an address.
    pub search_query_url: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            homepage: "https://apple.com".to_string(),
            sidebar_visible: true,
            sidebar_width: 255.0,
            search_query_url: "https://www.google.com/search?q=".to_string(),
        }
    }
}

impl BrowserSettings {
    /// Returns the sidebar width clamped to the allowed range.
    pub fn clamped_sidebar_width(width: f64) -> f64 {
        width.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
    }
}

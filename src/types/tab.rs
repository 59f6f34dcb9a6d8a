use serde::{Deserialize, Serialize};

/// Represents a browser tab with its current state.
///
/// The webview handle belonging to a tab is owned by the UI layer, keyed by
/// `id`. The fields here mirror what the rendering surface last reported
/// (last callback wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Favicon as a `data:` URL, fetched best-effort after page load.
    pub favicon: Option<String>,
    pub loading: bool,
    /// Coarse load progress in `0.0..=1.0`.
    pub progress: f64,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub created_at: i64,
}

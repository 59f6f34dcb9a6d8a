//! Chrome page assembly for the sidebar webview.
//!
//! The sidebar is a plain HTML/CSS/JS page served over the `wstk://` custom
//! protocol. Rust pushes state into it with `evaluate_script` and receives
//! user actions back as IPC JSON messages.

use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::types::settings::{BrowserSettings, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};
use crate::types::tab::Tab;

const SIDEBAR_CSS: &str = include_str!("../../resources/ui/sidebar.css");
const SIDEBAR_BODY: &str = include_str!("../../resources/ui/sidebar.html");
const SIDEBAR_JS: &str = include_str!("../../resources/ui/sidebar.js");
const BRIDGE_JS: &str = include_str!("../../resources/ui/bridge.js");

/// Builds the full HTML document for the sidebar page.
pub fn chrome_page() -> String {
    let mut html = String::with_capacity(
        SIDEBAR_CSS.len() + SIDEBAR_BODY.len() + SIDEBAR_JS.len() + 256,
    );
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><style>");
    html.push_str(SIDEBAR_CSS);
    html.push_str("</style></head><body>");
    html.push_str(SIDEBAR_BODY);
    html.push_str("<script>");
    html.push_str(SIDEBAR_JS);
    html.push_str("</script></body></html>");
    html
}

/// Builds the initialization script injected into every page: the shortcut
/// keymap generated from the [`ShortcutManager`] plus the key listener that
/// forwards matches over IPC.
pub fn keymap_script(shortcuts: &ShortcutManager) -> String {
    let keymap = serde_json::to_string(shortcuts.list_shortcuts()).unwrap_or_else(|_| "{}".into());
    format!("window.__WS_KEYMAP={};\n{}", keymap, BRIDGE_JS)
}

/// Builds the `evaluate_script` payload that re-renders the sidebar from the
/// current tab model and settings.
pub fn state_script(tabs: &[Tab], active_id: Option<&str>, settings: &BrowserSettings) -> String {
    let active = active_id.and_then(|id| tabs.iter().find(|t| t.id == id));
    let state = serde_json::json!({
        "tabs": tabs,
        "activeId": active_id,
        "url": active.map(|t| t.url.as_str()).unwrap_or(""),
        "title": active.map(|t| t.title.as_str()).unwrap_or(""),
        "loading": active.map(|t| t.loading).unwrap_or(false),
        "progress": active.map(|t| t.progress).unwrap_or(0.0),
        "canGoBack": active.map(|t| t.can_go_back).unwrap_or(false),
        "canGoForward": active.map(|t| t.can_go_forward).unwrap_or(false),
        "sidebarVisible": settings.sidebar_visible,
        "sidebarWidth": settings.sidebar_width,
        "sidebarMinWidth": SIDEBAR_MIN_WIDTH,
        "sidebarMaxWidth": SIDEBAR_MAX_WIDTH,
    });
    format!("if(window.__ws_update)__ws_update({})", state)
}

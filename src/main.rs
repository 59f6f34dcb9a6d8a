//! WebStack — a minimal sidebar-tabbed browser shell over the platform webview.
//!
//! Entry point: opens the main browser window. When built without the `gui`
//! feature, runs a short console demo of the non-UI components instead.

#[cfg(feature = "gui")]
fn main() {
    env_logger::init();
    webstack::ui::shell::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    env_logger::init();

    println!("WebStack v{} — demo mode (built without `gui`)", env!("CARGO_PKG_VERSION"));
    println!();

    demo_tabs();
    demo_navigation();
    demo_settings();
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("── {} ──", name);
}

#[cfg(not(feature = "gui"))]
fn demo_tabs() {
    use webstack::managers::tab_manager::{TabManager, TabManagerTrait};
    section("Tab Model");

    let mut mgr = TabManager::new();
    let a = mgr.create_tab(Some("https://apple.com"), true);
    let b = mgr.create_tab(Some("https://example.org"), true);
    println!("  {} tabs open, active = {}", mgr.tab_count(), b);

    mgr.close_tab(&b).expect("close tab");
    println!(
        "  closed active tab, neighbor {} took over",
        mgr.get_active_tab().map(|t| t.id.as_str()).unwrap_or("-")
    );
    assert_eq!(mgr.active_tab_id(), Some(a.as_str()));
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation() {
    use webstack::services::navigation::normalize_url;
    section("URL Normalization");

    let search = "https://www.google.com/search?q=";
    for input in ["apple.com", "localhost:8080", "rust borrow checker"] {
        println!("  {:24} -> {}", input, normalize_url(input, search));
    }
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_settings() {
    use webstack::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    section("Settings");

    let mut engine = SettingsEngine::new(Some("demo_settings.json".to_string()));
    let settings = engine.load().expect("load settings");
    println!("  homepage: {}", settings.homepage);
    println!("  sidebar:  {}px, visible={}", settings.sidebar_width, settings.sidebar_visible);
}

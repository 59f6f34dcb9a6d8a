//! Main window shell: event loop, chrome webview, IPC dispatch and the
//! navigation facade over the active tab's webview.
//!
//! Architecture:
//! - The window is undecorated; the sidebar page draws its own window
//!   controls and drag region.
//! - The sidebar lives in its own webview served via the `wstk://` custom
//!   protocol; every user action arrives as an IPC JSON message parsed by
//!   [`parse_ipc`] into a [`UserEvent`].
//! - All state mutation happens on the event loop thread, so no locking is
//!   needed around the [`App`] core.

use std::collections::HashMap;

use log::{info, warn};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use wry::{Rect, WebView, WebViewBuilder};

use crate::app::App;
use crate::managers::tab_manager::TabManagerTrait;
use crate::types::errors::TabError;
use crate::services::navigation::{self, NavHistory};
use crate::services::settings_engine::SettingsEngineTrait;

use super::chrome;
use super::surface;

/// Content-area padding around the active webview, in logical pixels.
const CONTENT_PADDING: f64 = 10.0;

/// Progress shown while a page load is in flight; wry reports no estimated
/// progress, so this is coarse.
const PROGRESS_STARTED: f64 = 0.15;

#[derive(Debug)]
pub enum WindowCommand {
    Close,
    Minimize,
    Zoom,
}

/// Events flowing into the event loop: chrome IPC commands and observation
/// callbacks from the per-tab webviews.
#[derive(Debug)]
pub enum UserEvent {
    NewTab { url: Option<String>, activate: bool },
    /// `None` closes the active tab.
    CloseTab(Option<String>),
    SwitchTab(String),
    /// Raw URL-field input, normalized before loading.
    Navigate(String),
    GoBack,
    GoForward,
    ReloadOrStop,
    ToggleSidebar,
    /// Streamed during a resize drag with `commit: false`; the final width
    /// arrives once with `commit: true` and is the only one persisted.
    SidebarWidth { width: f64, commit: bool },
    DragWindow,
    FocusUrlField,
    CopyUrl,
    Window(WindowCommand),
    ChromeReady,
    PageStarted { tab: String, url: String },
    PageFinished { tab: String, url: String },
    TitleChanged { tab: String, title: String },
    FaviconLoaded { tab: String, data_url: String },
}

/// Parses one chrome/content IPC message into a [`UserEvent`].
pub fn parse_ipc(message: &str) -> Option<UserEvent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;
    let str_field = |key: &str| msg.get(key).and_then(|v| v.as_str()).map(|s| s.to_string());

    match cmd {
        "ui_ready" => Some(UserEvent::ChromeReady),
        "new_tab" => Some(UserEvent::NewTab {
            url: None,
            activate: true,
        }),
        "close_tab" => Some(UserEvent::CloseTab(str_field("id"))),
        "switch_tab" => Some(UserEvent::SwitchTab(str_field("id")?)),
        "navigate" => Some(UserEvent::Navigate(str_field("url")?)),
        "back" => Some(UserEvent::GoBack),
        "forward" => Some(UserEvent::GoForward),
        "reload_or_stop" => Some(UserEvent::ReloadOrStop),
        "toggle_sidebar" => Some(UserEvent::ToggleSidebar),
        "set_sidebar_width" => {
            let width = msg.get("width")?.as_f64()?;
            let commit = msg.get("commit").and_then(|v| v.as_bool()).unwrap_or(false);
            Some(UserEvent::SidebarWidth { width, commit })
        }
        "drag_window" => Some(UserEvent::DragWindow),
        "window_control" => match msg.get("action")?.as_str()? {
            "close" => Some(UserEvent::Window(WindowCommand::Close)),
            "minimize" => Some(UserEvent::Window(WindowCommand::Minimize)),
            "zoom" => Some(UserEvent::Window(WindowCommand::Zoom)),
            _ => None,
        },
        "shortcut" => match msg.get("action")?.as_str()? {
            "new_tab" => Some(UserEvent::NewTab {
                url: None,
                activate: true,
            }),
            "close_tab" => Some(UserEvent::CloseTab(None)),
            "toggle_sidebar" => Some(UserEvent::ToggleSidebar),
            "address_bar" => Some(UserEvent::FocusUrlField),
            "reload" => Some(UserEvent::ReloadOrStop),
            "back" => Some(UserEvent::GoBack),
            "forward" => Some(UserEvent::GoForward),
            "copy_url" => Some(UserEvent::CopyUrl),
            _ => None,
        },
        _ => None,
    }
}

/// Visibility rule for per-tab surfaces: only the active tab's webview is
/// shown, everything else (background tabs included, from the moment they
/// are built) stays hidden.
pub fn surface_visible(active_tab_id: Option<&str>, tab_id: &str) -> bool {
    active_tab_id == Some(tab_id)
}

fn logical_rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect {
        position: wry::dpi::LogicalPosition::new(x, y).into(),
        size: wry::dpi::LogicalSize::new(w.max(0.0), h.max(0.0)).into(),
    }
}

struct Shell {
    window: Window,
    chrome: WebView,
    surfaces: HashMap<String, WebView>,
    histories: HashMap<String, NavHistory>,
    app: App,
    proxy: EventLoopProxy<UserEvent>,
}

impl Shell {
    fn window_size(&self) -> (f64, f64) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        (size.width, size.height)
    }

    fn sidebar_visible(&self) -> bool {
        self.app.settings_engine.get_settings().sidebar_visible
    }

    fn sidebar_width(&self) -> f64 {
        self.app.settings_engine.get_settings().sidebar_width
    }

    fn chrome_bounds(&self) -> Rect {
        let (_, h) = self.window_size();
        let w = if self.sidebar_visible() {
            self.sidebar_width()
        } else {
            0.0
        };
        logical_rect(0.0, 0.0, w, h)
    }

    /// Content bounds match the original layout: padded on all sides except
    /// flush against a visible sidebar.
    fn content_bounds(&self) -> Rect {
        let (w, h) = self.window_size();
        let x = if self.sidebar_visible() {
            self.sidebar_width()
        } else {
            CONTENT_PADDING
        };
        logical_rect(
            x,
            CONTENT_PADDING,
            w - x - CONTENT_PADDING,
            h - 2.0 * CONTENT_PADDING,
        )
    }

    fn layout(&self) {
        let _ = self.chrome.set_bounds(self.chrome_bounds());
        let _ = self.chrome.set_visible(self.sidebar_visible());
        let content = self.content_bounds();
        for surface in self.surfaces.values() {
            let _ = surface.set_bounds(content.clone());
        }
    }

    /// Shows only the active tab's webview.
    fn apply_visibility(&self) {
        let active = self.app.tab_manager.active_tab_id();
        for (tab_id, surface) in &self.surfaces {
            let visible = surface_visible(active, tab_id);
            let _ = surface.set_visible(visible);
            if visible {
                let _ = surface.focus();
            }
        }
    }

    /// Pushes the current tab model and settings into the sidebar page.
    fn sync_chrome(&self) {
        let settings = self.app.settings_engine.get_settings();
        let script = chrome::state_script(
            self.app.tab_manager.get_all_tabs(),
            self.app.tab_manager.active_tab_id(),
            settings,
        );
        if let Err(e) = self.chrome.evaluate_script(&script) {
            warn!("chrome sync failed: {}", e);
        }
    }

    fn active_surface(&self) -> Option<&WebView> {
        self.app
            .tab_manager
            .active_tab_id()
            .and_then(|id| self.surfaces.get(id))
    }

    fn eval_on_active(&self, js: &str) {
        if let Some(surface) = self.active_surface() {
            if let Err(e) = surface.evaluate_script(js) {
                warn!("script dispatch failed: {}", e);
            }
        }
    }

    fn open_tab(&mut self, url: Option<String>, activate: bool) {
        let id = self.app.tab_manager.create_tab(url.as_deref(), activate);
        self.build_missing_surfaces();
        // Unconditional: a background tab's surface must stay behind the
        // active one.
        self.apply_visibility();
        // A fresh blank tab wants the URL field.
        if activate && url.is_none() {
            let _ = self.chrome.evaluate_script("if(window.__ws_focusUrl)__ws_focusUrl()");
        }
        info!("opened tab {}", id);
        self.sync_chrome();
    }

    /// Creates webviews for model tabs that don't have one yet. Covers both
    /// explicit creation and the auto-created replacement after the last tab
    /// is closed.
    fn build_missing_surfaces(&mut self) {
        let keymap = chrome::keymap_script(&self.app.shortcut_manager);
        let bounds = self.content_bounds();
        let active = self.app.tab_manager.active_tab_id().map(|s| s.to_string());
        let missing: Vec<(String, String)> = self
            .app
            .tab_manager
            .get_all_tabs()
            .iter()
            .filter(|t| !self.surfaces.contains_key(&t.id))
            .map(|t| (t.id.clone(), t.url.clone()))
            .collect();

        for (tab_id, url) in missing {
            match surface::build_surface(
                &self.window,
                self.proxy.clone(),
                &tab_id,
                &url,
                bounds.clone(),
                surface_visible(active.as_deref(), &tab_id),
                &keymap,
            ) {
                Ok(webview) => {
                    self.surfaces.insert(tab_id.clone(), webview);
                    self.histories.insert(tab_id, NavHistory::new());
                }
                Err(e) => warn!("failed to create webview for tab {}: {}", tab_id, e),
            }
        }
    }

    fn close_tab(&mut self, tab_id: Option<String>) {
        let target = match tab_id.or_else(|| {
            self.app.tab_manager.active_tab_id().map(|s| s.to_string())
        }) {
            Some(t) => t,
            None => return,
        };

        if let Err(e) = self.app.tab_manager.close_tab(&target) {
            warn!("close tab: {}", e);
            return;
        }
        // Dropping the webview tears the surface down.
        self.surfaces.remove(&target);
        self.histories.remove(&target);

        self.build_missing_surfaces();
        self.apply_visibility();
        self.sync_chrome();
    }

    fn switch_tab(&mut self, tab_id: &str) {
        if let Err(e) = self.app.tab_manager.switch_tab(tab_id) {
            warn!("switch tab: {}", e);
            return;
        }
        self.apply_visibility();
        self.sync_chrome();
    }

    fn navigate(&mut self, input: &str) -> Result<(), TabError> {
        let search = self
            .app
            .settings_engine
            .get_settings()
            .search_query_url
            .clone();
        let url = navigation::normalize_url(input, &search);

        let tab_id = self
            .app
            .tab_manager
            .active_tab_id()
            .ok_or(TabError::NoActiveTab)?
            .to_string();
        let title = navigation::display_title(&url);
        self.app.tab_manager.update_tab_url(&tab_id, &url)?;
        self.app.tab_manager.update_tab_title(&tab_id, &title)?;

        if let Some(surface) = self.surfaces.get(&tab_id) {
            info!("navigate {} -> {}", tab_id, url);
            if let Err(e) = surface.load_url(&url) {
                warn!("load failed: {}", e);
            }
        }
        self.sync_chrome();
        Ok(())
    }

    fn go_back(&mut self) {
        let tab = match self.app.tab_manager.get_active_tab() {
            Some(t) if t.can_go_back => t.id.clone(),
            _ => return,
        };
        if let Some(history) = self.histories.get_mut(&tab) {
            history.note_back();
        }
        self.eval_on_active("history.back()");
    }

    fn go_forward(&mut self) {
        let tab = match self.app.tab_manager.get_active_tab() {
            Some(t) if t.can_go_forward => t.id.clone(),
            _ => return,
        };
        if let Some(history) = self.histories.get_mut(&tab) {
            history.note_forward();
        }
        self.eval_on_active("history.forward()");
    }

    /// The reload button doubles as stop while loading.
    fn reload_or_stop(&mut self) -> Result<(), TabError> {
        let (tab_id, loading) = match self.app.tab_manager.get_active_tab() {
            Some(t) => (t.id.clone(), t.loading),
            None => return Err(TabError::NoActiveTab),
        };
        if loading {
            self.eval_on_active("window.stop()");
            // No callback fires for a script-issued stop.
            self.app.tab_manager.update_loading(&tab_id, false, 0.0)?;
            self.sync_chrome();
        } else {
            self.eval_on_active("location.reload()");
        }
        Ok(())
    }

    fn page_started(&mut self, tab: &str, url: &str) {
        let (can_back, can_forward) = self
            .histories
            .entry(tab.to_string())
            .or_default()
            .record_load(url);
        let _ = self.app.tab_manager.update_tab_url(tab, url);
        let _ = self
            .app
            .tab_manager
            .update_loading(tab, true, PROGRESS_STARTED);
        let _ = self
            .app
            .tab_manager
            .update_navigation_state(tab, can_back, can_forward);
        self.sync_chrome();
    }

    fn page_finished(&mut self, tab: &str, url: &str) {
        let _ = self.app.tab_manager.update_tab_url(tab, url);
        let _ = self.app.tab_manager.update_loading(tab, false, 1.0);
        self.spawn_favicon_fetch(tab, url);
        self.sync_chrome();
    }

    #[cfg(feature = "network")]
    fn spawn_favicon_fetch(&self, tab: &str, url: &str) {
        let proxy = self.proxy.clone();
        let tab = tab.to_string();
        let url = url.to_string();
        std::thread::spawn(move || {
            if let Some(data_url) = crate::services::favicon::fetch_page_favicon(&url) {
                let _ = proxy.send_event(UserEvent::FaviconLoaded { tab, data_url });
            }
        });
    }

    #[cfg(not(feature = "network"))]
    fn spawn_favicon_fetch(&self, _tab: &str, _url: &str) {}

    fn toggle_sidebar(&mut self) {
        let visible = !self.sidebar_visible();
        if let Err(e) = self
            .app
            .settings_engine
            .set_value("sidebar_visible", serde_json::json!(visible))
        {
            warn!("failed to persist sidebar visibility: {}", e);
        }
        self.layout();
        self.sync_chrome();
    }

    fn set_sidebar_width(&mut self, width: f64, commit: bool) {
        // Streamed drag widths only touch memory; one disk write on drag end.
        let result = if commit {
            self.app
                .settings_engine
                .set_value("sidebar_width", serde_json::json!(width))
        } else {
            self.app
                .settings_engine
                .update_value("sidebar_width", serde_json::json!(width))
        };
        if let Err(e) = result {
            warn!("failed to persist sidebar width: {}", e);
        }
        self.layout();
    }

    fn handle(&mut self, event: UserEvent, control_flow: &mut ControlFlow) {
        match event {
            UserEvent::NewTab { url, activate } => self.open_tab(url, activate),
            UserEvent::CloseTab(id) => self.close_tab(id),
            UserEvent::SwitchTab(id) => self.switch_tab(&id),
            UserEvent::Navigate(input) => {
                if let Err(e) = self.navigate(&input) {
                    warn!("navigate: {}", e);
                }
            }
            UserEvent::GoBack => self.go_back(),
            UserEvent::GoForward => self.go_forward(),
            UserEvent::ReloadOrStop => {
                if let Err(e) = self.reload_or_stop() {
                    warn!("reload: {}", e);
                }
            }
            UserEvent::ToggleSidebar => self.toggle_sidebar(),
            UserEvent::SidebarWidth { width, commit } => self.set_sidebar_width(width, commit),
            UserEvent::DragWindow => {
                if let Err(e) = self.window.drag_window() {
                    warn!("window drag failed: {}", e);
                }
            }
            UserEvent::FocusUrlField => {
                let _ = self.chrome.evaluate_script("if(window.__ws_focusUrl)__ws_focusUrl()");
            }
            UserEvent::CopyUrl => {
                let _ = self.chrome.evaluate_script("if(window.__ws_copyUrl)__ws_copyUrl()");
            }
            UserEvent::Window(WindowCommand::Close) => {
                self.app.shutdown();
                *control_flow = ControlFlow::Exit;
            }
            UserEvent::Window(WindowCommand::Minimize) => self.window.set_minimized(true),
            UserEvent::Window(WindowCommand::Zoom) => {
                self.window.set_maximized(!self.window.is_maximized())
            }
            UserEvent::ChromeReady => self.sync_chrome(),
            UserEvent::PageStarted { tab, url } => self.page_started(&tab, &url),
            UserEvent::PageFinished { tab, url } => self.page_finished(&tab, &url),
            UserEvent::TitleChanged { tab, title } => {
                if !title.is_empty() {
                    let _ = self.app.tab_manager.update_tab_title(&tab, &title);
                    self.sync_chrome();
                }
            }
            UserEvent::FaviconLoaded { tab, data_url } => {
                let _ = self.app.tab_manager.update_tab_favicon(&tab, &data_url);
                self.sync_chrome();
            }
        }
    }
}

fn build_chrome(
    window: &Window,
    proxy: EventLoopProxy<UserEvent>,
    bounds: Rect,
    keymap: &str,
) -> wry::Result<WebView> {
    WebViewBuilder::new()
        .with_bounds(bounds)
        .with_custom_protocol("wstk".into(), move |_wv_id, _request| {
            let html = chrome::chrome_page();
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(html.into_bytes().into())
                .unwrap()
        })
        .with_initialization_script(keymap)
        .with_url("wstk://localhost/chrome")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            if let Some(event) = parse_ipc(msg.body().as_str()) {
                let _ = proxy.send_event(event);
            }
        })
        .build_as_child(window)
}

/// Main entry point for the GUI.
pub fn run() {
    let mut app = App::new(None);
    app.startup();

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("WebStack")
        .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
        .with_decorations(false)
        .build(&event_loop)
        .expect("Failed to create window");

    let keymap = chrome::keymap_script(&app.shortcut_manager);
    let settings = app.settings_engine.get_settings().clone();
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let chrome_bounds = logical_rect(
        0.0,
        0.0,
        if settings.sidebar_visible {
            settings.sidebar_width
        } else {
            0.0
        },
        size.height,
    );
    let chrome = build_chrome(&window, proxy.clone(), chrome_bounds, &keymap)
        .expect("Failed to create chrome webview");

    let mut shell = Shell {
        window,
        chrome,
        surfaces: HashMap::new(),
        histories: HashMap::new(),
        app,
        proxy,
    };

    shell.open_tab(Some(settings.homepage), true);
    shell.layout();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                shell.app.shutdown();
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => shell.layout(),

            Event::UserEvent(user_event) => shell.handle(user_event, control_flow),

            _ => {}
        }
    });
}

//! Per-tab rendering surfaces.
//!
//! Each tab owns one child webview positioned over the content area. The
//! observation bridge lives here: page-load, title-change and new-window
//! callbacks are converted to [`UserEvent`]s and sent through the event-loop
//! proxy; the shell mirrors them into the tab model.

use log::debug;
use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use super::shell::{self, UserEvent};

/// Builds the webview for one tab as a child of the main window.
///
/// `visible` is false for background tabs so a freshly built surface never
/// covers the active one. `init_script` is the shortcut-keymap bridge
/// injected into every page.
pub fn build_surface(
    window: &Window,
    proxy: EventLoopProxy<UserEvent>,
    tab_id: &str,
    url: &str,
    bounds: Rect,
    visible: bool,
    init_script: &str,
) -> wry::Result<WebView> {
    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    let title_proxy = proxy.clone();
    let nw_proxy = proxy;

    let load_id = tab_id.to_string();
    let title_id = tab_id.to_string();
    let nav_id = tab_id.to_string();

    WebViewBuilder::new()
        .with_bounds(bounds)
        .with_visible(visible)
        .with_initialization_script(init_script)
        .with_url(url)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            if let Some(event) = shell::parse_ipc(msg.body().as_str()) {
                let _ = ipc_proxy.send_event(event);
            }
        })
        .with_navigation_handler(move |url| {
            debug!("[{}] navigation to {}", nav_id, url);
            true
        })
        .with_on_page_load_handler(move |event, url| {
            let event = match event {
                PageLoadEvent::Started => UserEvent::PageStarted {
                    tab: load_id.clone(),
                    url,
                },
                PageLoadEvent::Finished => UserEvent::PageFinished {
                    tab: load_id.clone(),
                    url,
                },
            };
            let _ = load_proxy.send_event(event);
        })
        .with_document_title_changed_handler(move |title| {
            let _ = title_proxy.send_event(UserEvent::TitleChanged {
                tab: title_id.clone(),
                title,
            });
        })
        .with_new_window_req_handler(move |url, _features| {
            // Popups become background tabs.
            if url.starts_with("http://") || url.starts_with("https://") {
                let _ = nw_proxy.send_event(UserEvent::NewTab {
                    url: Some(url),
                    activate: false,
                });
            }
            wry::NewWindowResponse::Deny
        })
        .build_as_child(window)
}

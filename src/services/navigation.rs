//! Pure navigation logic: URL-field input parsing and per-tab history
//! bookkeeping. No webview imports here so everything is unit testable.

use std::net::IpAddr;

use url::Url;

/// Turns URL-field input into a navigable URL.
///
/// Heuristics, in order:
/// 1. empty input loads a blank page;
/// 2. implicit localhost/IP gets `http://`;
/// 3. input with a known scheme is taken as-is;
/// 4. a dotted token without spaces is treated as a bare domain and gets `https://`;
/// 5. anything else becomes a query against `search_query_url`.
///
/// Purely local string work. No DNS resolution, no prefetch; the only network
/// request happens when the caller actually commits the navigation.
pub fn normalize_url(input: &str, search_query_url: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return "about:blank".to_string();
    }

    let has_scheme_separator = trimmed.contains("://");
    let is_localhost = trimmed == "localhost"
        || trimmed.starts_with("localhost:")
        || trimmed.starts_with("localhost/");
    let host_part = trimmed.split(&[':', '/'][..]).next().unwrap_or(trimmed);
    let is_ip = host_part.parse::<IpAddr>().is_ok();

    if (is_localhost || is_ip) && !has_scheme_separator {
        let candidate = format!("http://{}", trimmed);
        if let Ok(u) = Url::parse(&candidate) {
            return u.to_string();
        }
    }

    if let Ok(u) = Url::parse(trimmed) {
        let s = u.scheme();
        // Only accept known web schemes so "rust.something" is not read as
        // a URL with scheme "rust".
        if s == "http" || s == "https" || s == "file" || s == "about" || s == "data" {
            return u.to_string();
        }
    }

    if !trimmed.contains(' ') && trimmed.contains('.') && !trimmed.ends_with('.') {
        let candidate = format!("https://{}", trimmed);
        if let Ok(u) = Url::parse(&candidate) {
            if u.host().is_some() {
                return u.to_string();
            }
        }
    }

    let query: String = url::form_urlencoded::byte_serialize(trimmed.as_bytes()).collect();
    format!("{}{}", search_query_url, query)
}

/// Placeholder title shown for a tab until the page reports its real title.
pub fn display_title(url: &str) -> String {
    if url.starts_with("about:") {
        return "New Tab".to_string();
    }
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| url.to_string())
}

/// Direction set on a [`NavHistory`] before the facade asks the webview
/// to move through its session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMove {
    Back,
    Forward,
}

/// Per-tab visited-page bookkeeping.
///
/// The webview layer exposes no canGoBack/canGoForward state, so the
/// observation bridge keeps its own list of visited URLs and a cursor.
/// The facade calls [`NavHistory::note_back`]/[`NavHistory::note_forward`]
/// right before dispatching `history.back()`/`history.forward()`; the next
/// load start then moves the cursor instead of pushing a new entry.
#[derive(Debug, Default)]
pub struct NavHistory {
    entries: Vec<String>,
    cursor: usize,
    pending: Option<PendingMove>,
}

impl NavHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the next load as the result of a back navigation.
    pub fn note_back(&mut self) {
        self.pending = Some(PendingMove::Back);
    }

    /// Marks the next load as the result of a forward navigation.
    pub fn note_forward(&mut self) {
        self.pending = Some(PendingMove::Forward);
    }

    /// Records a started page load and returns the updated
    /// (can_go_back, can_go_forward) pair.
    pub fn record_load(&mut self, url: &str) -> (bool, bool) {
        let pending = self.pending.take();

        match pending {
            Some(PendingMove::Back) if self.cursor > 0 => {
                self.cursor -= 1;
                // Redirects can land somewhere other than the recorded URL.
                self.entries[self.cursor] = url.to_string();
            }
            Some(PendingMove::Forward) if self.cursor + 1 < self.entries.len() => {
                self.cursor += 1;
                self.entries[self.cursor] = url.to_string();
            }
            _ => {
                // A reload of the current page keeps the cursor put.
                if self.current() != Some(url) {
                    if !self.entries.is_empty() {
                        self.entries.truncate(self.cursor + 1);
                    }
                    self.entries.push(url.to_string());
                    self.cursor = self.entries.len() - 1;
                }
            }
        }

        (self.can_go_back(), self.can_go_forward())
    }

    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// URL currently shown, if any load was ever recorded.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

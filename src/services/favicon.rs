//! Best-effort favicon retrieval.
//!
//! One GET of `scheme://host/favicon.ico` per finished page load, run on a
//! worker thread by the UI layer. Failures are silent; there is no retry and
//! no cache.

use url::Url;

/// Derives the conventional favicon URL for a page, or `None` for pages
/// without an http(s) host (about:, data:, file:).
pub fn favicon_url(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}/favicon.ico", parsed.scheme(), host, port)),
        None => Some(format!("{}://{}/favicon.ico", parsed.scheme(), host)),
    }
}

/// Fetches the favicon for a page and returns it as a `data:` URL suitable
/// for an `<img src>` in the chrome webview. Any failure yields `None`.
#[cfg(feature = "network")]
pub fn fetch_page_favicon(page_url: &str) -> Option<String> {
    use base64::Engine;

    let icon_url = favicon_url(page_url)?;
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .ok()?;
    let response = client.get(&icon_url).send().ok()?;
    if !response.status().is_success() {
        return None;
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| v.starts_with("image/"))
        .unwrap_or_else(|| "image/x-icon".to_string());

    let bytes = response.bytes().ok()?;
    if bytes.is_empty() {
        return None;
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Some(format!("data:{};base64,{}", mime, encoded))
}

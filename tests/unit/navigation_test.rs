//! Unit tests for URL-field input parsing and per-tab navigation history.

use rstest::rstest;
use webstack::services::navigation::{display_title, normalize_url, NavHistory};

const SEARCH: &str = "https://www.google.com/search?q=";

#[rstest]
#[case("apple.com", "https://apple.com/")]
#[case("  https://example.com  ", "https://example.com/")]
#[case("example.com/path?x=1", "https://example.com/path?x=1")]
#[case("about:blank", "about:blank")]
#[case("localhost", "http://localhost/")]
#[case("localhost:8080", "http://localhost:8080/")]
#[case("127.0.0.1", "http://127.0.0.1/")]
fn normalize_url_addresses(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(input, SEARCH), expected);
}

#[rstest]
#[case("rust borrow checker", "https://www.google.com/search?q=rust+borrow+checker")]
#[case("hello", "https://www.google.com/search?q=hello")]
#[case("what is rust?", "https://www.google.com/search?q=what+is+rust%3F")]
fn normalize_url_searches(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(input, SEARCH), expected);
}

#[test]
fn normalize_url_empty_input_is_blank_page() {
    assert_eq!(normalize_url("", SEARCH), "about:blank");
    assert_eq!(normalize_url("   ", SEARCH), "about:blank");
}

#[test]
fn normalize_url_keeps_data_urls() {
    assert_eq!(
        normalize_url("data:text/html,hi", SEARCH),
        "data:text/html,hi"
    );
}

#[test]
fn normalize_url_rejects_unknown_schemes() {
    // "rust.something" must not be read as a URL with scheme "rust"
    let result = normalize_url("rust:something", SEARCH);
    assert!(result.starts_with(SEARCH), "got {}", result);
}

#[rstest]
#[case("https://www.apple.com/mac", "apple.com")]
#[case("https://github.com/", "github.com")]
#[case("about:blank", "New Tab")]
fn display_title_cases(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(display_title(url), expected);
}

// ── NavHistory ──

#[test]
fn history_starts_empty() {
    let history = NavHistory::new();
    assert!(history.is_empty());
    assert!(!history.can_go_back());
    assert!(!history.can_go_forward());
    assert_eq!(history.current(), None);
}

#[test]
fn loads_push_entries() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    assert!(!history.can_go_back());

    let (can_back, can_forward) = history.record_load("https://b.dev/");
    assert!(can_back);
    assert!(!can_forward);
    assert_eq!(history.current(), Some("https://b.dev/"));
    assert_eq!(history.len(), 2);
}

#[test]
fn reload_does_not_push() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    history.record_load("https://a.dev/");
    assert_eq!(history.len(), 1);
}

#[test]
fn back_moves_cursor_without_truncating() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    history.record_load("https://b.dev/");

    history.note_back();
    let (can_back, can_forward) = history.record_load("https://a.dev/");
    assert!(!can_back);
    assert!(can_forward);
    assert_eq!(history.current(), Some("https://a.dev/"));
    assert_eq!(history.len(), 2);
}

#[test]
fn forward_after_back_restores_position() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    history.record_load("https://b.dev/");
    history.note_back();
    history.record_load("https://a.dev/");

    history.note_forward();
    let (can_back, can_forward) = history.record_load("https://b.dev/");
    assert!(can_back);
    assert!(!can_forward);
    assert_eq!(history.current(), Some("https://b.dev/"));
}

#[test]
fn new_load_after_back_truncates_forward_entries() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    history.record_load("https://b.dev/");
    history.note_back();
    history.record_load("https://a.dev/");

    history.record_load("https://c.dev/");
    assert_eq!(history.len(), 2);
    assert!(!history.can_go_forward());
    assert_eq!(history.current(), Some("https://c.dev/"));
}

#[test]
fn back_load_records_redirect_target() {
    let mut history = NavHistory::new();
    history.record_load("https://a.dev/");
    history.record_load("https://b.dev/");

    // Engine lands on a different URL than the one recorded (redirect).
    history.note_back();
    history.record_load("https://a.dev/welcome");
    assert_eq!(history.current(), Some("https://a.dev/welcome"));
    assert_eq!(history.len(), 2);
}

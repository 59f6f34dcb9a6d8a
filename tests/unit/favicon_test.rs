//! Unit tests for favicon URL derivation. The network fetch itself is
//! best-effort by design and not exercised here.

use rstest::rstest;
use webstack::services::favicon::favicon_url;

#[rstest]
#[case("https://example.com/a/b", "https://example.com/favicon.ico")]
#[case("http://example.com", "http://example.com/favicon.ico")]
#[case("https://www.apple.com/mac?x=1#frag", "https://www.apple.com/favicon.ico")]
#[case("http://localhost:8080/p", "http://localhost:8080/favicon.ico")]
fn derives_conventional_location(#[case] page: &str, #[case] expected: &str) {
    assert_eq!(favicon_url(page).as_deref(), Some(expected));
}

#[rstest]
#[case("about:blank")]
#[case("data:text/html,hi")]
#[case("file:///tmp/page.html")]
#[case("not a url")]
fn no_favicon_for_hostless_pages(#[case] page: &str) {
    assert_eq!(favicon_url(page), None);
}

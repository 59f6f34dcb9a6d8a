//! Property-based tests for settings JSON serialization.
//!
//! Any `BrowserSettings` value written to JSON must read back identical,
//! since the settings engine persists and reloads this structure verbatim.

use proptest::prelude::*;
use webstack::types::settings::{BrowserSettings, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};

fn arb_settings() -> impl Strategy<Value = BrowserSettings> {
    (
        "[a-z]{1,12}\\.(com|org|dev)",
        any::<bool>(),
        SIDEBAR_MIN_WIDTH..=SIDEBAR_MAX_WIDTH,
        "[a-z]{1,12}",
    )
        .prop_map(|(host, sidebar_visible, sidebar_width, engine)| BrowserSettings {
            homepage: format!("https://{}", host),
            sidebar_visible,
            sidebar_width,
            search_query_url: format!("https://{}.example/search?q=", engine),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn settings_roundtrip_through_json(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: BrowserSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, settings);
    }

    #[test]
    fn clamp_is_idempotent_and_in_range(width in -1.0e6..1.0e6f64) {
        let clamped = BrowserSettings::clamped_sidebar_width(width);
        prop_assert!((SIDEBAR_MIN_WIDTH..=SIDEBAR_MAX_WIDTH).contains(&clamped));
        prop_assert_eq!(BrowserSettings::clamped_sidebar_width(clamped), clamped);
    }
}

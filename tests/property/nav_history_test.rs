//! Property-based tests for the per-tab navigation history.
//!
//! `NavHistory` is checked against an independent model of session-history
//! semantics: a list of entries and a cursor, where a new load truncates the
//! forward entries and back/forward only move the cursor.

use proptest::prelude::*;
use webstack::services::navigation::NavHistory;

#[derive(Debug, Clone)]
enum NavOp {
    Load(usize), // index into a small URL pool
    Back,
    Forward,
}

fn arb_nav_ops() -> impl Strategy<Value = Vec<NavOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0..6usize).prop_map(NavOp::Load),
            2 => Just(NavOp::Back),
            2 => Just(NavOp::Forward),
        ],
        1..50,
    )
}

fn url_pool(idx: usize) -> String {
    format!("https://site{}.dev/", idx)
}

/// Reference model of session-history bookkeeping.
#[derive(Default)]
struct Model {
    entries: Vec<String>,
    cursor: usize,
}

impl Model {
    fn load(&mut self, url: &str) {
        if self.entries.get(self.cursor).map(|s| s.as_str()) == Some(url) {
            return; // reload
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(url.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(|s| s.as_str())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn history_matches_session_semantics(ops in arb_nav_ops()) {
        let mut history = NavHistory::new();
        let mut model = Model::default();

        for op in &ops {
            match op {
                NavOp::Load(idx) => {
                    let url = url_pool(*idx);
                    history.record_load(&url);
                    model.load(&url);
                }
                NavOp::Back => {
                    // The shell only dispatches back when the mirror says it
                    // can; the engine then reports a load of the previous page.
                    if model.can_go_back() {
                        model.cursor -= 1;
                        let url = model.entries[model.cursor].clone();
                        history.note_back();
                        history.record_load(&url);
                    }
                }
                NavOp::Forward => {
                    if model.can_go_forward() {
                        model.cursor += 1;
                        let url = model.entries[model.cursor].clone();
                        history.note_forward();
                        history.record_load(&url);
                    }
                }
            }

            prop_assert_eq!(history.current(), model.current());
            prop_assert_eq!(history.can_go_back(), model.can_go_back());
            prop_assert_eq!(history.can_go_forward(), model.can_go_forward());
            prop_assert_eq!(history.len(), model.entries.len());
        }
    }

    // Whatever the operation sequence, a non-empty history always has a
    // current entry and an empty one never reports movement.
    #[test]
    fn history_cursor_stays_in_bounds(ops in arb_nav_ops()) {
        let mut history = NavHistory::new();

        for op in &ops {
            match op {
                NavOp::Load(idx) => {
                    history.record_load(&url_pool(*idx));
                }
                NavOp::Back => {
                    if history.can_go_back() {
                        history.note_back();
                        history.record_load(&url_pool(99));
                    }
                }
                NavOp::Forward => {
                    if history.can_go_forward() {
                        history.note_forward();
                        history.record_load(&url_pool(98));
                    }
                }
            }

            if history.is_empty() {
                prop_assert!(history.current().is_none());
                prop_assert!(!history.can_go_back());
                prop_assert!(!history.can_go_forward());
            } else {
                prop_assert!(history.current().is_some());
            }
            prop_assert!(!(history.can_go_back() && history.len() < 2));
        }
    }
}

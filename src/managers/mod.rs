// WebStack state managers
// Managers handle stateful bookkeeping: the tab list and keyboard shortcuts.

pub mod shortcut_manager;
pub mod tab_manager;

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::errors::TabError;
use crate::types::tab::Tab;

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self, url: Option<&str>, active: bool) -> String;
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab>;
    fn get_all_tabs(&self) -> &[Tab];
    fn get_active_tab(&self) -> Option<&Tab>;
    fn active_tab_id(&self) -> Option<&str>;
    fn tab_count(&self) -> usize;
    fn update_tab_url(&mut self, tab_id: &str, url: &str) -> Result<(), TabError>;
    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError>;
    fn update_tab_favicon(&mut self, tab_id: &str, favicon: &str) -> Result<(), TabError>;
    fn update_loading(&mut self, tab_id: &str, loading: bool, progress: f64)
        -> Result<(), TabError>;
    fn update_navigation_state(
        &mut self,
        tab_id: &str,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> Result<(), TabError>;
}

/// In-memory tab manager for the browser shell.
///
/// Insertion order of `tabs` is the display order. Whenever the list is
/// non-empty, `active_tab_id` names exactly one tab in it.
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
}

impl TabManager {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn find_tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TabManagerTrait for TabManager {
    /// Create a new tab, optionally with a URL and active state.
    /// Returns the new tab's ID.
    fn create_tab(&mut self, url: Option<&str>, active: bool) -> String {
        let id = Uuid::new_v4().to_string();
        let tab = Tab {
            id: id.clone(),
            url: url.unwrap_or("about:blank").to_string(),
            title: "New Tab".to_string(),
            favicon: None,
            loading: false,
            progress: 0.0,
            can_go_back: false,
            can_go_forward: false,
            created_at: Self::now(),
        };
        self.tabs.push(tab);
        if active || self.active_tab_id.is_none() {
            self.active_tab_id = Some(id.clone());
        }
        id
    }

    /// Close a tab. If it's the active tab, switch to the next tab at the
    /// same index, else the previous tab. If it's the last tab, create a
    /// new empty tab automatically.
    fn close_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        let tab_idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        let need_switch = self.active_tab_id.as_deref() == Some(tab_id);
        self.tabs.remove(tab_idx);

        if self.tabs.is_empty() {
            let new_id = self.create_tab(None, true);
            self.active_tab_id = Some(new_id);
            return Ok(());
        }

        if need_switch {
            let new_idx = tab_idx.min(self.tabs.len() - 1);
            self.active_tab_id = Some(self.tabs[new_idx].id.clone());
        }

        Ok(())
    }

    /// Switch the active tab to the given tab_id.
    fn switch_tab(&mut self, tab_id: &str) -> Result<(), TabError> {
        if self.find_tab_index(tab_id).is_none() {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.active_tab_id = Some(tab_id.to_string());
        Ok(())
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn get_all_tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id
            .as_ref()
            .and_then(|id| self.tabs.iter().find(|t| t.id == *id))
    }

    fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn update_tab_url(&mut self, tab_id: &str, url: &str) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.url = url.to_string();
        Ok(())
    }

    fn update_tab_title(&mut self, tab_id: &str, title: &str) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.title = title.to_string();
        Ok(())
    }

    fn update_tab_favicon(&mut self, tab_id: &str, favicon: &str) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.favicon = Some(favicon.to_string());
        Ok(())
    }

    fn update_loading(
        &mut self,
        tab_id: &str,
        loading: bool,
        progress: f64,
    ) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.loading = loading;
        tab.progress = progress.clamp(0.0, 1.0);
        Ok(())
    }

    fn update_navigation_state(
        &mut self,
        tab_id: &str,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> Result<(), TabError> {
        let tab = self.find_tab_mut(tab_id)?;
        tab.can_go_back = can_go_back;
        tab.can_go_forward = can_go_forward;
        Ok(())
    }
}

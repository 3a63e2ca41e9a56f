use uuid::Uuid;

/// Navigation bookkeeping: a displayed title/icon associated with a path,
/// independent of domain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub server_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub icon: &'static str,
    pub path: String,
    pub is_preview: bool,
}

pub struct TabsState {
    pub tabs: Vec<Tab>,
    pub active_path: Option<String>,
}

impl Default for TabsState {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            active_path: None,
        }
    }
}

impl TabsState {
    /// Open (or refresh) the tab for a path and make it active. An existing
    /// tab keeps its preview flag; new tabs open as previews.
    pub fn open_tab(&mut self, tab: Tab) {
        if let Some(existing) = self.tabs.iter_mut().find(|t| t.path == tab.path) {
            existing.title = tab.title;
            existing.server_id = tab.server_id;
            existing.user_id = tab.user_id;
            existing.icon = tab.icon;
        } else {
            self.tabs.push(tab.clone());
        }
        self.active_path = Some(tab.path);
    }

    pub fn update_tab(&mut self, path: &str, is_preview: bool) {
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.path == path) {
            tab.is_preview = is_preview;
        }
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_path
            .as_deref()
            .and_then(|path| self.tabs.iter().find(|t| t.path == path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(path: &str) -> Tab {
        Tab {
            title: "general".to_string(),
            server_id: None,
            user_id: None,
            icon: "inbox",
            path: path.to_string(),
            is_preview: true,
        }
    }

    #[test]
    fn reopening_a_path_updates_in_place() {
        let mut tabs = TabsState::default();
        tabs.open_tab(tab("/channels/1"));
        let mut renamed = tab("/channels/1");
        renamed.title = "renamed".to_string();
        tabs.open_tab(renamed);

        assert_eq!(tabs.tabs.len(), 1);
        assert_eq!(tabs.tabs[0].title, "renamed");
        assert_eq!(tabs.active_path.as_deref(), Some("/channels/1"));
    }

    #[test]
    fn sending_promotes_preview_tab() {
        let mut tabs = TabsState::default();
        tabs.open_tab(tab("/channels/1"));
        assert!(tabs.active_tab().unwrap().is_preview);

        tabs.update_tab("/channels/1", false);
        assert!(!tabs.active_tab().unwrap().is_preview);
    }
}

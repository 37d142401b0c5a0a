//! Open tabs and shell visibility, shared through context.
//!
//! Tabs stand in for routes: the active tab key is mirrored into `?active=`
//! so a reload lands on the same screen.

use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

/// Key of the tab to show after `closing` is removed from `tabs`.
/// Closing an inactive tab keeps the current one.
pub fn next_active_after_close(tabs: &[Tab], closing: &str, active: Option<&str>) -> Option<String> {
    if active != Some(closing) {
        return active.map(str::to_string);
    }
    tabs.iter()
        .rev()
        .find(|t| t.key != closing)
        .map(|t| t.key.clone())
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore `?active=` on startup and keep the URL in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

        match params.get("active").filter(|k| !k.is_empty()) {
            Some(key) => {
                let title = tab_label_for_key(key);
                let title = if title.is_empty() { key.as_str() } else { title };
                self.open_tab(key, title);
            }
            None => self.open_tab("d400_fleet_summary", tab_label_for_key("d400_fleet_summary")),
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([("active", active_key)]))
                .unwrap_or_default();
            let new_url = format!("?{}", query);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("close_tab: key='{}'", key);
        let next = self.opened.with_untracked(|tabs| {
            self.active
                .with_untracked(|active| next_active_after_close(tabs, key, active.as_deref()))
        });
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        self.active.set(next);
    }

    /// Drop every tab, used on logout.
    pub fn reset(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_closing_active_moves_to_last_remaining() {
        let t = tabs(&["a", "b", "c"]);
        assert_eq!(next_active_after_close(&t, "c", Some("c")), Some("b".into()));
        assert_eq!(next_active_after_close(&t, "a", Some("a")), Some("c".into()));
    }

    #[test]
    fn test_closing_inactive_keeps_active() {
        let t = tabs(&["a", "b"]);
        assert_eq!(next_active_after_close(&t, "a", Some("b")), Some("b".into()));
    }

    #[test]
    fn test_closing_last_tab() {
        let t = tabs(&["a"]);
        assert_eq!(next_active_after_close(&t, "a", Some("a")), None);
    }
}

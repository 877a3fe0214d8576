//! Update loop and operations of the search input.

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use tracing::{debug, trace, warn};

use super::fetch::fetch_cmd;
use super::model::Model;
use super::types::{
    ClearMsg, ClickItemMsg, DebounceMsg, FetchKey, FocusMsg, MouseEnterItemMsg, NavigateMsg,
    PointerDownMsg, PointerTarget, SubmitMsg, SuggestionsMsg,
};
use crate::key::matches_binding;
use crate::provider::is_fetchable;
use crate::spinner;
use crate::subscription::ListenerKind;
use crate::suggestion::Suggestion;

impl Model {
    /// Current field text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Field text as of the last settled debounce.
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    /// Whether the dropdown is considered open.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Whether the text field has keyboard focus.
    pub fn focused(&self) -> bool {
        self.field_focus
    }

    /// Whether a keystroke is waiting for the debounce delay to pass.
    pub fn is_debouncing(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether suggestions may be requested right now.
    pub fn fetch_enabled(&self) -> bool {
        self.show_suggestions && self.is_focused && is_fetchable(&self.debounced_query)
    }

    /// Key of the list that should be displayed, if fetching is enabled.
    pub fn current_key(&self) -> Option<FetchKey> {
        self.fetch_enabled().then(|| FetchKey {
            query: self.debounced_query.clone(),
            locale: self.locale.clone(),
            limit: self.limit,
        })
    }

    /// Suggestions for the current key, empty while none are known.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.current_key()
            .and_then(|key| self.cache.get(&key))
            .unwrap_or(&[])
    }

    /// Whether the dropdown is rendered.
    pub fn dropdown_visible(&self) -> bool {
        !self.suggestions().is_empty()
    }

    /// Whether the current key is being fetched and has no result yet.
    pub fn is_loading(&self) -> bool {
        match self.current_key() {
            Some(key) => self.cache.get(&key).is_none() && self.cache.is_pending(&key),
            None => false,
        }
    }

    /// Highlighted row of the displayed list.
    pub fn selected_index(&self) -> Option<usize> {
        if self.selection_key != self.current_key() {
            return None;
        }
        self.selected_index.filter(|&i| i < self.suggestions().len())
    }

    /// Drops a selection that no longer points into the displayed list.
    pub(super) fn sync_selection(&mut self) {
        let key = self.current_key();
        if self.selection_key != key {
            self.selection_key = key;
            self.selected_index = None;
        } else if let Some(i) = self.selected_index {
            if i >= self.suggestions().len() {
                self.selected_index = None;
            }
        }
    }

    fn select(&mut self, index: usize) {
        self.selection_key = self.current_key();
        self.selected_index = Some(index);
    }

    /// Overwrites the field text from the host. `on_change` is not called.
    pub fn set_value(&mut self, value: &str) -> Option<Cmd> {
        if self.value() == value {
            return None;
        }
        self.value = value.chars().collect();
        self.pos = self.value.len();
        self.selected_index = None;
        Some(self.debouncer.schedule())
    }

    /// Records a user edit: updates the text, reports it and re-arms the debounce.
    ///
    /// The returned command resolves into the debounce tick; only the tick of
    /// the last call in a burst is accepted.
    pub fn on_query_change(&mut self, value: &str) -> Cmd {
        self.value = value.chars().collect();
        self.pos = self.value.len();
        self.selected_index = None;
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
        self.debouncer.schedule()
    }

    pub(super) fn focus_field(&mut self) {
        self.field_focus = true;
        self.is_focused = true;
        if self.key_listener.is_none() {
            self.key_listener = Some(self.subscriptions.subscribe(ListenerKind::KeyDown));
        }
    }

    /// Opens the dropdown and requests suggestions for the debounced query if needed.
    pub fn on_focus(&mut self) -> Option<Cmd> {
        self.focus_field();
        let cmd = self.request_suggestions();
        self.sync_selection();
        cmd
    }

    /// Closes the dropdown. The field keeps keyboard focus.
    pub fn close(&mut self) {
        self.is_focused = false;
        self.key_listener = None;
        self.sync_selection();
    }

    fn blur_field(&mut self) {
        self.close();
        self.field_focus = false;
    }

    /// Handles a pointer press anywhere on screen.
    ///
    /// Presses on this input's field or dropdown change nothing, so a click on
    /// a row that follows the press still finds the list open.
    pub fn on_pointer_down(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Input(id) | PointerTarget::Dropdown(id) | PointerTarget::Item { id, .. }
                if id == self.id => {}
            _ => {
                if self.is_focused || self.field_focus {
                    debug!(id = self.id, "pointer down outside, closing");
                    self.blur_field();
                }
            }
        }
    }

    /// Handles a key press while the field has focus.
    pub fn on_key_down(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if let Some(cmd) = self.handle_navigation_keys(key_msg) {
            return cmd;
        }
        if let Some(cmd) = self.handle_editing_keys(key_msg) {
            return cmd;
        }
        None
    }

    fn handle_navigation_keys(&mut self, key_msg: &KeyMsg) -> Option<Option<Cmd>> {
        let active = self.key_listener.is_some() && self.dropdown_visible();
        let n = self.suggestions().len();

        if matches_binding(key_msg, &self.key_map.select) {
            if active {
                if let Some(i) = self.selected_index() {
                    return Some(self.resolve(i));
                }
            }
            self.on_submit();
            return Some(None);
        }

        if !active {
            return None;
        }

        if matches_binding(key_msg, &self.key_map.next_suggestion) {
            let next = match self.selected_index() {
                Some(i) => (i + 1) % n,
                None => 0,
            };
            self.select(next);
        } else if matches_binding(key_msg, &self.key_map.prev_suggestion) {
            let prev = match self.selected_index() {
                Some(i) => (i + n - 1) % n,
                // Nothing selected counts as -1.
                None => (2 * n - 2) % n,
            };
            self.select(prev);
        } else if matches_binding(key_msg, &self.key_map.dismiss) {
            self.blur_field();
        } else {
            return None;
        }
        Some(None)
    }

    /// Highlights the row under the pointer.
    pub fn on_mouse_enter_item(&mut self, index: usize) {
        if index < self.suggestions().len() {
            self.select(index);
        }
    }

    /// Picks the clicked row.
    pub fn on_click_item(&mut self, index: usize) -> Option<Cmd> {
        if index < self.suggestions().len() {
            return self.resolve(index);
        }
        None
    }

    /// Runs the search for the typed text, if any and if a search callback is set.
    pub fn on_submit(&mut self) {
        let query = self.value();
        if query.trim().is_empty() {
            return;
        }
        if let Some(on_search) = self.on_search.as_mut() {
            on_search(&query);
            self.close();
        }
    }

    /// Empties the field and gives it focus again.
    pub fn on_clear(&mut self) -> Option<Cmd> {
        let cmd = self.on_query_change("");
        self.focus_field();
        self.sync_selection();
        Some(cmd)
    }

    /// Applies the suggestion at `index`: links are followed, anything else
    /// replaces the query and runs the search.
    fn resolve(&mut self, index: usize) -> Option<Cmd> {
        let suggestion = self.suggestions().get(index).cloned()?;

        let cmd = match suggestion.url {
            Some(url) => {
                debug!(id = self.id, url = %url, "navigating to suggestion");
                Some(navigate_cmd(self.id, url))
            }
            None => {
                let cmd = self.on_query_change(&suggestion.text);
                if let Some(on_search) = self.on_search.as_mut() {
                    on_search(&suggestion.text);
                }
                Some(cmd)
            }
        };
        self.close();
        cmd
    }

    fn request_suggestions(&mut self) -> Option<Cmd> {
        let key = self.current_key()?;
        if !self.cache.needs_fetch(&key) {
            return None;
        }
        debug!(id = self.id, query = %key.query, locale = %key.locale, "requesting suggestions");
        self.cache.begin(key.clone());
        Some(fetch_cmd(self.provider.clone(), self.id, key))
    }

    fn handle_suggestions(&mut self, msg: SuggestionsMsg) {
        let SuggestionsMsg { key, result, .. } = msg;
        match result {
            Ok(list) => {
                let current = self.current_key();
                if Some(&key) != current.as_ref() {
                    debug!(id = self.id, query = %key.query, "stale suggestions kept out of view");
                }
                self.cache.complete(key, list, current.as_ref());
                trace!(id = self.id, cached = self.cache.len(), "suggestions stored");
            }
            Err(err) => {
                warn!(id = self.id, query = %key.query, error = %err, "suggestion request failed");
                self.cache.fail(&key);
            }
        }
        self.sync_selection();
    }

    /// Update handles every message addressed to this input.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<SuggestionsMsg>() {
            Ok(suggestions) => {
                if suggestions.id == self.id {
                    self.handle_suggestions(*suggestions);
                }
                return None;
            }
            Err(msg) => msg,
        };

        if msg.downcast_ref::<spinner::TickMsg>().is_some() {
            return self.spinner.update(&msg);
        }

        if let Some(tick) = msg.downcast_ref::<DebounceMsg>() {
            if !self.debouncer.accept(tick) {
                trace!(id = self.id, "ignoring superseded debounce tick");
                return None;
            }
            self.debounced_query = self.value();
            debug!(id = self.id, query = %self.debounced_query, "debounce settled");
            let cmd = self.request_suggestions();
            self.sync_selection();
            return cmd;
        }

        if let Some(focus) = msg.downcast_ref::<FocusMsg>() {
            if focus.id == self.id {
                return self.on_focus();
            }
            return None;
        }

        if let Some(press) = msg.downcast_ref::<PointerDownMsg>() {
            self.on_pointer_down(press.target);
            return None;
        }

        if let Some(hover) = msg.downcast_ref::<MouseEnterItemMsg>() {
            if hover.id == self.id {
                self.on_mouse_enter_item(hover.index);
            }
            return None;
        }

        if let Some(click) = msg.downcast_ref::<ClickItemMsg>() {
            if click.id == self.id {
                return self.on_click_item(click.index);
            }
            return None;
        }

        if let Some(submit) = msg.downcast_ref::<SubmitMsg>() {
            if submit.id == self.id {
                self.on_submit();
            }
            return None;
        }

        if let Some(clear) = msg.downcast_ref::<ClearMsg>() {
            if clear.id == self.id {
                return self.on_clear();
            }
            return None;
        }

        if !self.field_focus {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key_down(key_msg);
        }
        None
    }
}

/// Command that hands a suggestion's link to the host.
pub(super) fn navigate_cmd(id: i64, url: String) -> Cmd {
    Box::pin(async move { Some(Msg::from(NavigateMsg { id, url })) })
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.on_focus()
    }

    fn blur(&mut self) {
        self.blur_field();
    }

    fn focused(&self) -> bool {
        self.field_focus
    }
}

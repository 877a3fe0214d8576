//! Text editing on the field value.
//!
//! Each edit computes the new text and cursor position and hands them to
//! [`Model::apply_edit`], which runs them through `on_query_change` so the
//! change callback and the debounce see every edit.

use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};

use super::model::Model;
use crate::key::matches_binding;

impl Model {
    /// Handles editing and cursor keys. Returns `None` if the key was not an editing key.
    pub(super) fn handle_editing_keys(&mut self, key_msg: &KeyMsg) -> Option<Option<Cmd>> {
        let km = &self.key_map;

        if matches_binding(key_msg, &km.delete_word_backward) {
            return Some(self.delete_word_backward());
        }
        if matches_binding(key_msg, &km.delete_character_backward) {
            if self.pos == 0 {
                return Some(None);
            }
            let mut value = self.value.clone();
            value.remove(self.pos - 1);
            return Some(self.apply_edit(value, self.pos - 1));
        }
        if matches_binding(key_msg, &km.delete_character_forward) {
            if self.pos >= self.value.len() {
                return Some(None);
            }
            let mut value = self.value.clone();
            value.remove(self.pos);
            return Some(self.apply_edit(value, self.pos));
        }
        if matches_binding(key_msg, &km.delete_before_cursor) {
            let value = self.value[self.pos..].to_vec();
            return Some(self.apply_edit(value, 0));
        }
        if matches_binding(key_msg, &km.delete_after_cursor) {
            let value = self.value[..self.pos].to_vec();
            let pos = self.pos;
            return Some(self.apply_edit(value, pos));
        }

        if matches_binding(key_msg, &km.character_backward) {
            self.set_cursor(self.pos.saturating_sub(1));
            return Some(None);
        }
        if matches_binding(key_msg, &km.character_forward) {
            self.set_cursor(self.pos + 1);
            return Some(None);
        }
        if matches_binding(key_msg, &km.line_start) {
            self.set_cursor(0);
            return Some(None);
        }
        if matches_binding(key_msg, &km.line_end) {
            self.set_cursor(self.value.len());
            return Some(None);
        }

        // Regular character input; shift is already folded into the char.
        if let KeyCode::Char(ch) = key_msg.key {
            if !key_msg.modifiers.contains(KeyModifiers::CONTROL)
                && !key_msg.modifiers.contains(KeyModifiers::ALT)
            {
                return Some(self.insert_chars(&[ch]));
            }
        }

        None
    }

    /// Inserts text at the cursor, as typed.
    pub fn insert_str(&mut self, s: &str) -> Option<Cmd> {
        let chars: Vec<char> = s.chars().collect();
        self.insert_chars(&chars)
    }

    fn insert_chars(&mut self, chars: &[char]) -> Option<Cmd> {
        if chars.is_empty() {
            return None;
        }
        let mut value = self.value[..self.pos].to_vec();
        value.extend_from_slice(chars);
        let pos = value.len();
        value.extend_from_slice(&self.value[self.pos..]);
        self.apply_edit(value, pos)
    }

    fn delete_word_backward(&mut self) -> Option<Cmd> {
        if self.pos == 0 {
            return None;
        }

        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }

        let mut value = self.value[..start].to_vec();
        value.extend_from_slice(&self.value[self.pos..]);
        self.apply_edit(value, start)
    }

    /// Moves the cursor, clamped to the text.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn apply_edit(&mut self, value: Vec<char>, pos: usize) -> Option<Cmd> {
        let text: String = value.iter().collect();
        let cmd = self.on_query_change(&text);
        self.set_cursor(pos);
        Some(cmd)
    }
}

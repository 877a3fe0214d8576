//! Key bindings for the search input.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Key bindings for dropdown navigation and text editing.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the next suggestion, wrapping to the first.
    pub next_suggestion: Binding,
    /// Highlight the previous suggestion, wrapping to the last.
    pub prev_suggestion: Binding,
    /// Pick the highlighted suggestion, or submit the query when none is highlighted.
    pub select: Binding,
    /// Close the dropdown and leave the field.
    pub dismiss: Binding,
    /// Move cursor one character left.
    pub character_backward: Binding,
    /// Move cursor one character right.
    pub character_forward: Binding,
    /// Move to start of line.
    pub line_start: Binding,
    /// Move to end of line.
    pub line_end: Binding,
    /// Delete one character backward.
    pub delete_character_backward: Binding,
    /// Delete one character forward.
    pub delete_character_forward: Binding,
    /// Delete the previous word.
    pub delete_word_backward: Binding,
    /// Delete from start of line to cursor.
    pub delete_before_cursor: Binding,
    /// Delete from cursor to end of line.
    pub delete_after_cursor: Binding,
}

/// The default bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next_suggestion: new_binding(vec![
            with_keys_str(&["down", "ctrl+n"]),
            with_help("↓/ctrl+n", "next"),
        ]),
        prev_suggestion: new_binding(vec![
            with_keys_str(&["up", "ctrl+p"]),
            with_help("↑/ctrl+p", "previous"),
        ]),
        select: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "search")]),
        dismiss: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "close")]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        delete_word_backward: new_binding(vec![with_keys_str(&["alt+backspace", "ctrl+w"])]),
        delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        delete_after_cursor: new_binding(vec![with_keys_str(&["ctrl+k"])]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.next_suggestion,
            &self.prev_suggestion,
            &self.select,
            &self.dismiss,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![
                &self.next_suggestion,
                &self.prev_suggestion,
                &self.select,
                &self.dismiss,
            ],
            vec![
                &self.character_backward,
                &self.character_forward,
                &self.line_start,
                &self.line_end,
            ],
            vec![
                &self.delete_character_backward,
                &self.delete_character_forward,
                &self.delete_word_backward,
                &self.delete_before_cursor,
                &self.delete_after_cursor,
            ],
        ]
    }
}

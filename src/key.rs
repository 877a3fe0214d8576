//! Type-safe key bindings.
//!
//! A [`Binding`] groups one or more [`KeyPress`] combinations under a single
//! action together with the help text shown to the user. Components expose
//! their bindings through a struct implementing [`KeyMap`], which lets help
//! views list them without knowing the component.
//!
//! ```rust
//! use search_autocomplete::key::{matches_binding, new_binding, with_help, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = new_binding(vec![with_keys_str(&["down", "ctrl+n"]), with_help("↓", "next")]);
//! let msg = KeyMsg { key: KeyCode::Char('n'), modifiers: KeyModifiers::CONTROL };
//! assert!(matches_binding(&msg, &next));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Parses a key description such as `"enter"`, `"ctrl+n"` or `"alt+backspace"`.
    ///
    /// Returns `None` for names this module does not know.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = s;
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = r;
            } else {
                break;
            }
        }

        let code = match rest {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self { code, modifiers })
    }

    /// Returns true if the key message is this exact combination.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.code == msg.key && self.modifiers == msg.modifiers
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↓/ctrl+n"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A named action and the key presses that trigger it.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from anything convertible to [`KeyPress`].
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Returns true if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Builder options for [`new_binding`].
pub enum BindingOpt {
    /// Adds key presses.
    Keys(Vec<KeyPress>),
    /// Sets help text.
    Help(Help),
    /// Disables the binding.
    Disabled,
}

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys.extend(keys),
            BindingOpt::Help(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Key presses given as strings; unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().filter_map(|k| KeyPress::parse(k)).collect())
}

/// Help text option.
pub fn with_help(key: impl Into<String>, desc: impl Into<String>) -> BindingOpt {
    BindingOpt::Help(Help {
        key: key.into(),
        desc: desc.into(),
    })
}

/// Disabled option.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Returns true if `msg` triggers `binding`.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Returns true if `msg` triggers any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Implemented by component key maps so help views can list their bindings.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

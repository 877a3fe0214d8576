#![warn(missing_docs)]

//! # search-autocomplete
//!
//! A search field with debounced autocomplete for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, plus the suggestion sources that feed it.
//!
//! ## Overview
//!
//! The [`searchinput`] component follows the Elm Architecture: it is created
//! once, mutated through `update()` and rendered with `view()`. Typing is
//! debounced, suggestions are requested from a [`provider::SuggestionProvider`]
//! and shown in a dropdown that can be driven with the keyboard or the pointer.
//!
//! Two providers are included:
//!
//! - [`provider::HttpSuggestionProvider`] calls `GET /api/search/autocomplete`.
//! - [`provider::SuggestionIndex`] is an in-memory prefix index.
//!
//! ## Focus Management
//!
//! The search input implements the [`Component`] trait:
//!
//! ```rust
//! use search_autocomplete::prelude::*;
//! use bubbletea_rs::Cmd;
//!
//! fn handle_focus<T: Component>(component: &mut T) {
//!     let _cmd: Option<Cmd> = component.focus();
//!     assert!(component.focused());
//!     component.blur();
//!     assert!(!component.focused());
//! }
//!
//! let mut input = SearchInput::default();
//! handle_focus(&mut input);
//! ```
//!
//! ## Configuration
//!
//! [`config::SearchConfig`] is read from `search.toml` and `SEARCH_*`
//! environment variables:
//!
//! ```rust,no_run
//! use search_autocomplete::config::SearchConfig;
//! use search_autocomplete::searchinput::Model;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), search_autocomplete::error::ConfigError> {
//! let config = SearchConfig::load()?;
//! let provider = Arc::new(config.http_provider()?);
//! let input = Model::from_config(provider, &config);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod provider;
pub mod searchinput;
pub mod spinner;
pub mod subscription;
pub mod suggestion;

use bubbletea_rs::Cmd;

/// Focus management shared by interactive components.
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command to run, such as a pending request.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use config::SearchConfig;
pub use error::{ConfigError, ProviderError};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use provider::{HttpSuggestionProvider, SuggestionIndex, SuggestionProvider};
pub use searchinput::{Model as SearchInput, NavigateMsg, PointerTarget};
pub use spinner::{Model as Spinner, TickMsg as SpinnerTickMsg};
pub use suggestion::Suggestion;

/// Prelude module for convenient imports.
///
/// ```rust
/// use search_autocomplete::prelude::*;
/// use std::sync::Arc;
///
/// let input = SearchInput::new(Arc::new(SuggestionIndex::new()));
/// assert!(!input.focused());
/// ```
pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::provider::{HttpSuggestionProvider, SuggestionIndex, SuggestionProvider};
    pub use crate::searchinput::{
        ClearMsg, ClickItemMsg, FocusMsg, Model as SearchInput, MouseEnterItemMsg, NavigateMsg,
        PointerDownMsg, PointerTarget, SubmitMsg,
    };
    pub use crate::spinner::{Model as Spinner, TickMsg as SpinnerTickMsg};
    pub use crate::suggestion::Suggestion;
    pub use crate::Component;
}

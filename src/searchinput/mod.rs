//! Search field with a debounced autocomplete dropdown.
//!
//! The model keeps the raw field text and a debounced copy that trails it by
//! the debounce delay (300 ms by default). Suggestions are fetched for the
//! debounced copy while the field is focused, suggestions are enabled and the
//! query has at least two characters. Each response is tagged with the key it
//! was requested for, so a slow answer for an old query never replaces the
//! list of the current one.
//!
//! # Basic Usage
//!
//! ```rust
//! use search_autocomplete::provider::SuggestionIndex;
//! use search_autocomplete::searchinput::{new, PointerTarget};
//! use std::sync::Arc;
//!
//! let mut index = SuggestionIndex::new();
//! index.add_defaults();
//!
//! let mut input = new(Arc::new(index)).with_autofocus(true);
//! assert!(input.is_focused());
//!
//! // A press anywhere else closes the dropdown.
//! input.on_pointer_down(PointerTarget::Elsewhere);
//! assert!(!input.is_focused());
//! ```
//!
//! # Picking Suggestions
//!
//! Picking a suggestion that has a URL emits a [`NavigateMsg`] for the host;
//! any other suggestion replaces the query through `on_change` and runs
//! `on_search`.

mod debounce;
mod editing;
mod fetch;
pub mod keymap;
mod methods;
pub mod model;
pub mod types;
mod view;


pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
pub use types::{
    ChangeFunc, ClearMsg, ClickItemMsg, DebounceMsg, FetchKey, FocusMsg, MouseEnterItemMsg,
    NavigateMsg, PointerDownMsg, PointerTarget, SearchFunc, SubmitMsg, SuggestionsMsg,
};

//! Messages and callback types for the search input.

use bubbletea_rs::Msg;

use crate::error::ProviderError;
use crate::suggestion::Suggestion;

/// Called with the new field text whenever the user edits it or picks a suggestion.
/// Add Send to satisfy the bubbletea-rs Model: Send bound transitively.
pub type ChangeFunc = Box<dyn FnMut(&str) + Send>;

/// Called with the query on explicit submission or when a suggestion is picked.
pub type SearchFunc = Box<dyn FnMut(&str) + Send>;

/// Identifies one suggestion request. A response is only shown while its key
/// is still the input's current key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    /// Debounced query text.
    pub query: String,
    /// Locale sent to the provider.
    pub locale: String,
    /// Maximum number of suggestions requested.
    pub limit: usize,
}

/// Fired when the debounce delay after a keystroke has elapsed.
#[derive(Debug, Clone)]
pub struct DebounceMsg {
    /// Search input the tick belongs to.
    pub id: i64,
    pub(crate) tag: u64,
}

/// Result of a suggestion request.
#[derive(Debug)]
pub struct SuggestionsMsg {
    /// Search input that issued the request.
    pub id: i64,
    /// Key the request was made for.
    pub key: FetchKey,
    /// Provider answer.
    pub result: Result<Vec<Suggestion>, ProviderError>,
}

/// Emitted when the user picks a suggestion that links somewhere.
///
/// Leaving the current screen is up to the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateMsg {
    /// Search input the suggestion was picked from.
    pub id: i64,
    /// Target of the suggestion.
    pub url: String,
}

/// Where a pointer press landed, as resolved by the host's hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The text field of the search input with this id.
    Input(i64),
    /// The dropdown of the search input with this id, outside any row.
    Dropdown(i64),
    /// A dropdown row of the search input with this id.
    Item {
        /// Search input id.
        id: i64,
        /// Row index.
        index: usize,
    },
    /// Anywhere else.
    Elsewhere,
}

/// A pointer press anywhere on screen.
#[derive(Debug, Clone, Copy)]
pub struct PointerDownMsg {
    /// Hit-tested target.
    pub target: PointerTarget,
}

/// The pointer moved over a dropdown row.
#[derive(Debug, Clone, Copy)]
pub struct MouseEnterItemMsg {
    /// Search input id.
    pub id: i64,
    /// Row index.
    pub index: usize,
}

/// A dropdown row was clicked.
#[derive(Debug, Clone, Copy)]
pub struct ClickItemMsg {
    /// Search input id.
    pub id: i64,
    /// Row index.
    pub index: usize,
}

/// The submit affordance was activated.
#[derive(Debug, Clone, Copy)]
pub struct SubmitMsg {
    /// Search input id.
    pub id: i64,
}

/// The clear affordance was activated.
#[derive(Debug, Clone, Copy)]
pub struct ClearMsg {
    /// Search input id.
    pub id: i64,
}

/// The text field received focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusMsg {
    /// Search input id.
    pub id: i64,
}

impl From<NavigateMsg> for Msg {
    fn from(msg: NavigateMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<PointerDownMsg> for Msg {
    fn from(msg: PointerDownMsg) -> Self {
        Box::new(msg) as Msg
    }
}

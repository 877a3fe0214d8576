//! Core model for the search input.

use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::debounce::Debouncer;
use super::fetch::SuggestionCache;
use super::keymap::{default_key_map, KeyMap};
use super::types::{ChangeFunc, SearchFunc};
use crate::config::{SearchConfig, DEFAULT_DEBOUNCE};
use crate::provider::{SuggestionIndex, SuggestionProvider, DEFAULT_LIMIT};
use crate::spinner;
use crate::subscription::{ListenerKind, Subscription, Subscriptions};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A single-line search field with a debounced autocomplete dropdown.
///
/// The field text is controlled: the host may overwrite it with
/// [`Model::set_value`], and every user edit or suggestion pick is reported
/// through the `on_change` callback. Suggestions are requested from the
/// provider once typing pauses for the debounce delay, and only while the
/// field is focused and the debounced query has at least two characters.
///
/// # Examples
///
/// ```rust
/// use search_autocomplete::provider::SuggestionIndex;
/// use search_autocomplete::searchinput::Model;
/// use std::sync::Arc;
///
/// let mut index = SuggestionIndex::new();
/// index.add_defaults();
///
/// let mut input = Model::new(Arc::new(index))
///     .with_placeholder("Search Dubai...")
///     .with_on_change(|q| println!("query is now {q}"))
///     .with_on_search(|q| println!("search for {q}"));
///
/// let _ = input.on_focus();
/// let _debounce = input.on_query_change("marina");
/// assert_eq!(input.value(), "marina");
/// assert_eq!(input.debounced_query(), "");
/// ```
pub struct Model {
    /// Text before the field.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style of the typed text.
    pub text_style: Style,
    /// Placeholder shown while the field is empty.
    pub placeholder: String,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the cursor block.
    pub cursor_style: Style,
    /// Style for dropdown rows.
    pub item_style: Style,
    /// Style for the highlighted dropdown row.
    pub selected_item_style: Style,
    /// Style for the category shown under each suggestion.
    pub kind_style: Style,
    /// Width of the text area in cells; 0 means as wide as the content.
    pub width: usize,
    /// Key bindings.
    pub key_map: KeyMap,
    /// Loading indicator.
    pub spinner: spinner::Model,

    pub(super) id: i64,
    pub(super) value: Vec<char>,
    pub(super) pos: usize,
    pub(super) field_focus: bool,
    pub(super) is_focused: bool,
    pub(super) debounced_query: String,
    pub(super) selected_index: Option<usize>,
    pub(super) selection_key: Option<super::types::FetchKey>,
    pub(super) show_suggestions: bool,
    pub(super) locale: String,
    pub(super) limit: usize,
    pub(super) debouncer: Debouncer,
    pub(super) cache: SuggestionCache,
    pub(super) provider: Arc<dyn SuggestionProvider>,
    pub(super) on_change: Option<ChangeFunc>,
    pub(super) on_search: Option<SearchFunc>,
    pub(super) subscriptions: Subscriptions,
    /// Held for the model's lifetime.
    pub(super) _pointer_listener: Subscription,
    pub(super) key_listener: Option<Subscription>,
}

/// Creates a search input backed by `provider`.
pub fn new(provider: Arc<dyn SuggestionProvider>) -> Model {
    Model::new(provider)
}

impl Model {
    /// Creates an unfocused, empty search input.
    pub fn new(provider: Arc<dyn SuggestionProvider>) -> Self {
        let id = next_id();
        let subscriptions = Subscriptions::new();
        let pointer_listener = subscriptions.subscribe(ListenerKind::PointerDown);

        Self {
            prompt: "⌕ ".to_string(),
            prompt_style: Style::new().foreground(Color::from("240")),
            text_style: Style::new(),
            placeholder: "Search...".to_string(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            cursor_style: Style::new().reverse(true),
            item_style: Style::new(),
            selected_item_style: Style::new().reverse(true),
            kind_style: Style::new().foreground(Color::from("245")),
            width: 0,
            key_map: default_key_map(),
            spinner: spinner::Model::new(),
            id,
            value: Vec::new(),
            pos: 0,
            field_focus: false,
            is_focused: false,
            debounced_query: String::new(),
            selected_index: None,
            selection_key: None,
            show_suggestions: true,
            locale: "en".to_string(),
            limit: DEFAULT_LIMIT,
            debouncer: Debouncer::new(id, DEFAULT_DEBOUNCE),
            cache: SuggestionCache::default(),
            provider,
            on_change: None,
            on_search: None,
            subscriptions,
            _pointer_listener: pointer_listener,
            key_listener: None,
        }
    }

    /// Creates a search input configured from `config`.
    pub fn from_config(provider: Arc<dyn SuggestionProvider>, config: &SearchConfig) -> Self {
        Self::new(provider)
            .with_placeholder(&config.placeholder)
            .with_locale(&config.locale)
            .with_limit(config.limit)
            .with_debounce(config.debounce())
            .with_show_suggestions(config.show_suggestions)
    }

    /// Sets the initial field text without reporting it through `on_change`.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.chars().collect();
        self.pos = self.value.len();
        self.debounced_query = value.to_string();
        self
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Sets the change callback.
    pub fn with_on_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Sets the search callback.
    pub fn with_on_search(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_search = Some(Box::new(f));
        self
    }

    /// Starts focused, as if the user had just entered the field.
    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        if autofocus {
            self.focus_field();
        }
        self
    }

    /// Enables or disables the dropdown. Disabled inputs still submit.
    pub fn with_show_suggestions(mut self, show: bool) -> Self {
        self.show_suggestions = show;
        self
    }

    /// Locale sent to the provider.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// Maximum number of suggestions requested.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Delay between the last keystroke and the request.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer.set_delay(delay);
        self
    }

    /// Width of the text area in cells.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Replaces the provider and drops cached results from the old one.
    pub fn set_provider(&mut self, provider: Arc<dyn SuggestionProvider>) {
        self.provider = provider;
        self.cache.clear();
        self.sync_selection();
    }

    /// Unique id of this input, carried by all of its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current debounce delay.
    pub fn debounce(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Listener registry of this input.
    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    /// Starts the loading spinner's animation.
    pub fn init(&self) -> Cmd {
        self.spinner.tick()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new(Arc::new(SuggestionIndex::new()))
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Model::default();
        let cmd = Model::init(&model);
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

//! Suggestion providers.
//!
//! The search input only depends on [`SuggestionProvider`]: an asynchronous
//! function from `(query, locale, limit)` to a ranked suggestion list. Two
//! implementations ship with the crate:
//!
//! - [`HttpSuggestionProvider`] calls the site's autocomplete endpoint.
//! - [`SuggestionIndex`] keeps suggestions in memory and ranks them the same
//!   way the endpoint does; handy offline and in tests.

pub mod http;
pub mod index;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::suggestion::Suggestion;

pub use http::HttpSuggestionProvider;
pub use index::{ContentEntry, SuggestionIndex, TermMeta};

/// Queries shorter than this never reach a provider.
pub const MIN_QUERY_LEN: usize = 2;

/// Number of suggestions requested when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 8;

/// Source of ranked autocomplete suggestions.
///
/// Implementations must be cheap to share: the search input holds them as
/// `Arc<dyn SuggestionProvider>` and calls them from command futures.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Returns suggestions for `query`, best first, at most `limit` of them.
    async fn suggest(
        &self,
        query: &str,
        locale: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ProviderError>;
}

/// Returns true if `query` is long enough to be sent to a provider.
pub fn is_fetchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

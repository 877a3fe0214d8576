//! Search input configuration.
//!
//! Values are merged from, in increasing priority: built-in defaults,
//! `search.toml` in the working directory, then `SEARCH_*` environment
//! variables (`SEARCH_ENDPOINT`, `SEARCH_LOCALE`, `SEARCH_DEBOUNCE_MS`, ...).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::provider::{HttpSuggestionProvider, DEFAULT_LIMIT};

/// Delay between the last keystroke and the suggestion request.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Settings for a search input and its HTTP provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the site serving `/api/search/autocomplete`.
    pub endpoint: String,
    /// Locale sent with every request.
    pub locale: String,
    /// Maximum suggestions requested.
    pub limit: usize,
    /// Debounce delay in milliseconds.
    pub debounce_ms: u64,
    /// Placeholder shown in an empty field.
    pub placeholder: String,
    /// Whether the dropdown is enabled at all.
    pub show_suggestions: bool,
    /// Give up on a suggestion request after this many seconds. Unset means wait forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            locale: "en".to_string(),
            limit: DEFAULT_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            placeholder: "Search...".to_string(),
            show_suggestions: true,
            request_timeout_secs: None,
        }
    }
}

impl SearchConfig {
    /// Loads `search.toml` and `SEARCH_*` variables over the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("search.toml")
    }

    /// Like [`SearchConfig::load`] with an explicit file path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment(path).extract().map_err(ConfigError::from)
    }

    /// The merged configuration sources.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(SearchConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SEARCH_"))
    }

    /// Debounce delay.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parsed endpoint.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.endpoint).map_err(|source| ConfigError::Endpoint {
            value: self.endpoint.clone(),
            source,
        })
    }

    /// Builds the HTTP provider described by this configuration.
    pub fn http_provider(&self) -> Result<HttpSuggestionProvider, ConfigError> {
        let base = self.endpoint_url()?;
        match self.request_timeout_secs {
            Some(secs) => Ok(HttpSuggestionProvider::with_timeout(
                base,
                Duration::from_secs(secs),
            )?),
            None => Ok(HttpSuggestionProvider::new(base)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.limit, 8);
        assert_eq!(cfg.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.locale, "en");
        assert!(cfg.show_suggestions);
        assert_eq!(cfg.request_timeout_secs, None);
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "search.toml",
                r#"
                    endpoint = "https://travi.example"
                    locale = "ar"
                    debounce_ms = 150
                "#,
            )?;
            jail.set_env("SEARCH_LOCALE", "fr");

            let cfg = SearchConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.endpoint, "https://travi.example");
            assert_eq!(cfg.locale, "fr");
            assert_eq!(cfg.debounce_ms, 150);
            assert_eq!(cfg.limit, 8);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = SearchConfig::load_from("nope.toml").map_err(|e| e.to_string())?;
            assert_eq!(cfg, SearchConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_bad_endpoint_is_reported() {
        let cfg = SearchConfig {
            endpoint: "not a url".into(),
            ..SearchConfig::default()
        };
        assert!(matches!(
            cfg.http_provider(),
            Err(ConfigError::Endpoint { .. })
        ));
    }

    #[test]
    fn test_http_provider_uses_endpoint() {
        let cfg = SearchConfig {
            request_timeout_secs: Some(5),
            ..SearchConfig::default()
        };
        let provider = cfg.http_provider().unwrap();
        assert_eq!(provider.base_url().as_str(), "http://localhost:5000/");
    }
}

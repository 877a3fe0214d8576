//! Error types.

/// Errors from a suggestion provider.
///
/// The search input swallows these and treats them as "no suggestions";
/// they are surfaced for callers using a provider directly.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Request line, e.g. `GET /api/search/autocomplete`.
        endpoint: String,
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// The endpoint returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        /// Request line.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// Response body was not a suggestion list.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Request line.
        endpoint: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },
    /// The request URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or a value had the wrong type.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
    /// `endpoint` is not a valid base URL.
    #[error("invalid endpoint {value}: {source}")]
    Endpoint {
        /// The configured value.
        value: String,
        /// Why it did not parse.
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}

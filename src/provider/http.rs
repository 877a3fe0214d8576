//! HTTP client for the autocomplete endpoint.
//!
//! `GET {base}/api/search/autocomplete?q=<query>&locale=<locale>&limit=<n>`
//! answers `{ "suggestions": [...] }`.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{is_fetchable, SuggestionProvider};
use crate::error::ProviderError;
use crate::suggestion::{Suggestion, SuggestionsResponse};

const AUTOCOMPLETE_PATH: &str = "api/search/autocomplete";

/// Suggestion provider backed by the site's autocomplete API.
#[derive(Debug, Clone)]
pub struct HttpSuggestionProvider {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSuggestionProvider {
    /// Creates a provider for `base_url` with a default client and no request timeout.
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a provider with a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Creates a provider around an existing client.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the request URL; the query is percent-encoded.
    pub fn request_url(&self, query: &str, locale: &str, limit: usize) -> Result<Url, ProviderError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base.join(AUTOCOMPLETE_PATH)?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("locale", locale)
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SuggestionProvider for HttpSuggestionProvider {
    async fn suggest(
        &self,
        query: &str,
        locale: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        if !is_fetchable(query) {
            return Ok(Vec::new());
        }

        let endpoint = "GET /api/search/autocomplete";
        let url = self.request_url(query, locale, limit)?;
        debug!(%url, "requesting suggestions");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let body: SuggestionsResponse =
            resp.json().await.map_err(|e| ProviderError::Decode {
                endpoint: endpoint.into(),
                source: e,
            })?;

        Ok(body.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HttpSuggestionProvider {
        HttpSuggestionProvider::new(Url::parse(&server.uri()).unwrap())
    }

    #[test]
    fn test_request_url_encodes_query() {
        let p = HttpSuggestionProvider::new(Url::parse("http://example.test/site").unwrap());
        let url = p.request_url("burj & co", "ar", 8).unwrap();

        assert_eq!(url.path(), "/site/api/search/autocomplete");
        assert_eq!(url.query(), Some("q=burj+%26+co&locale=ar&limit=8"));
    }

    #[tokio::test]
    async fn test_suggest_decodes_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/autocomplete"))
            .and(query_param("q", "dubai"))
            .and(query_param("locale", "en"))
            .and(query_param("limit", "8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "suggestions": [
                    {"text": "dubai marina", "displayText": "Dubai Marina", "type": "location", "score": 50},
                    {"text": "dubai mall", "displayText": "Dubai Mall", "type": "location", "url": "/attractions/dubai-mall", "score": 40}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let got = provider(&server).suggest("dubai", "en", 8).await.unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].display_text, "Dubai Marina");
        assert_eq!(got[1].url.as_deref(), Some("/attractions/dubai-mall"));
    }

    #[tokio::test]
    async fn test_short_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let got = provider(&server).suggest("d", "en", 8).await.unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = provider(&server).suggest("dubai", "en", 8).await.unwrap_err();
        match err {
            ProviderError::Status { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).suggest("dubai", "en", 8).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }
}

//! In-memory suggestion index.
//!
//! Terms are stored normalized (trimmed, lowercase) and matched by prefix.
//! Ranking is weight first, then how often the term was searched; the score
//! reported to the UI is `weight + search_count * 0.1`.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::{is_fetchable, SuggestionProvider};
use crate::error::ProviderError;
use crate::suggestion::Suggestion;

const DEFAULT_LOCALE: &str = "en";

/// Metadata stored alongside a term.
#[derive(Debug, Clone, Default)]
pub struct TermMeta {
    /// Label; defaults to the term as given.
    pub display_text: Option<String>,
    /// Category tag; defaults to `"content"`.
    pub kind: Option<String>,
    /// Navigation target.
    pub url: Option<String>,
    /// Glyph.
    pub icon: Option<String>,
    /// Ranking weight.
    pub weight: i64,
    /// Locale the term belongs to; defaults to `"en"`.
    pub locale: Option<String>,
}

/// A piece of published content to derive suggestions from.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Content identifier used in the URL.
    pub id: String,
    /// Title shown to users.
    pub title: String,
    /// Content kind such as `hotel`, `district` or `article`.
    pub kind: String,
    /// Extra terms that should lead to this content.
    pub search_terms: Vec<String>,
    /// Popularity used as the weight of the title.
    pub popularity: i64,
}

#[derive(Debug, Clone)]
struct Entry {
    display_text: String,
    kind: String,
    url: Option<String>,
    icon: Option<String>,
    weight: i64,
    search_count: u64,
    locale: String,
}

/// Prefix-matching suggestion store.
#[derive(Debug, Clone, Default)]
pub struct SuggestionIndex {
    terms: BTreeMap<String, Entry>,
}

impl SuggestionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Adds or replaces a term. Terms shorter than two characters are ignored.
    ///
    /// Replacing keeps the term's search count.
    pub fn add_term(&mut self, term: &str, meta: TermMeta) {
        let normalized = normalize(term);
        if !is_fetchable(&normalized) {
            return;
        }

        let search_count = self
            .terms
            .get(&normalized)
            .map(|e| e.search_count)
            .unwrap_or(0);

        let entry = Entry {
            display_text: meta.display_text.unwrap_or_else(|| term.to_string()),
            kind: meta.kind.unwrap_or_else(|| "content".to_string()),
            url: meta.url,
            icon: meta.icon,
            weight: meta.weight,
            search_count,
            locale: meta.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        };
        self.terms.insert(normalized, entry);
    }

    /// Records one search for `term`. Unknown terms are ignored.
    pub fn increment_count(&mut self, term: &str) {
        if let Some(entry) = self.terms.get_mut(&normalize(term)) {
            entry.search_count += 1;
        }
    }

    /// Returns up to `limit` terms in `locale` starting with `prefix`, best first.
    pub fn lookup(&self, prefix: &str, locale: &str, limit: usize) -> Vec<Suggestion> {
        if !is_fetchable(prefix) {
            return Vec::new();
        }
        let prefix = normalize(prefix);

        let mut hits: Vec<(&String, &Entry)> = self
            .terms
            .range(prefix.clone()..)
            .take_while(|(term, _)| term.starts_with(&prefix))
            .filter(|(_, e)| e.locale == locale)
            .collect();

        hits.sort_by(|a, b| {
            b.1.weight
                .cmp(&a.1.weight)
                .then(b.1.search_count.cmp(&a.1.search_count))
        });

        hits.into_iter()
            .take(limit)
            .map(|(term, e)| Suggestion {
                text: term.clone(),
                display_text: e.display_text.clone(),
                kind: e.kind.clone(),
                url: e.url.clone(),
                icon: e.icon.clone(),
                score: e.weight as f64 + e.search_count as f64 * 0.1,
            })
            .collect()
    }

    /// Adds suggestions for published content, then the fixed category and
    /// location suggestions.
    pub fn index_content(&mut self, entries: &[ContentEntry]) {
        for entry in entries {
            let url = content_url(&entry.kind, &entry.id);

            self.add_term(
                &entry.title.to_lowercase(),
                TermMeta {
                    display_text: Some(entry.title.clone()),
                    kind: Some("content".into()),
                    url: Some(url.clone()),
                    icon: Some(type_icon(&entry.kind).into()),
                    weight: entry.popularity,
                    locale: None,
                },
            );

            for term in &entry.search_terms {
                if term.chars().count() >= 3 {
                    self.add_term(
                        term,
                        TermMeta {
                            display_text: Some(term.clone()),
                            kind: Some("content".into()),
                            url: Some(url.clone()),
                            icon: None,
                            weight: entry.popularity / 2,
                            locale: None,
                        },
                    );
                }
            }
        }

        self.add_defaults();
    }

    /// Adds the category shortcuts and popular locations.
    pub fn add_defaults(&mut self) {
        let categories = [
            ("hotels", "Hotels", "/hotels", "🏨"),
            ("attractions", "Attractions", "/attractions", "🎢"),
            ("dining", "Dining", "/dining", "🍽️"),
            ("districts", "Districts", "/districts", "🏙️"),
            ("articles", "Articles", "/articles", "📰"),
        ];
        for (term, display, url, icon) in categories {
            self.add_term(
                term,
                TermMeta {
                    display_text: Some(display.into()),
                    kind: Some("category".into()),
                    url: Some(url.into()),
                    icon: Some(icon.into()),
                    weight: 100,
                    locale: None,
                },
            );
        }

        let locations = [
            "Downtown Dubai",
            "Dubai Marina",
            "Palm Jumeirah",
            "Burj Khalifa",
            "Dubai Mall",
            "Business Bay",
            "JBR",
            "Jumeirah Beach",
        ];
        for loc in locations {
            self.add_term(
                &loc.to_lowercase(),
                TermMeta {
                    display_text: Some(loc.into()),
                    kind: Some("location".into()),
                    url: None,
                    icon: Some("📍".into()),
                    weight: 50,
                    locale: None,
                },
            );
        }
    }
}

#[async_trait]
impl SuggestionProvider for SuggestionIndex {
    async fn suggest(
        &self,
        query: &str,
        locale: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, ProviderError> {
        Ok(self.lookup(query, locale, limit))
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Public URL of a content item.
pub fn content_url(kind: &str, id: &str) -> String {
    match kind {
        "hotel" => format!("/hotels/{id}"),
        "attraction" => format!("/attractions/{id}"),
        "article" => format!("/articles/{id}"),
        "dining" => format!("/dining/{id}"),
        "district" => format!("/districts/{id}"),
        "transport" => format!("/transport/{id}"),
        other => format!("/{other}s/{id}"),
    }
}

/// Glyph for a content kind.
pub fn type_icon(kind: &str) -> &'static str {
    match kind {
        "hotel" => "🏨",
        "attraction" => "🎢",
        "article" => "📰",
        "dining" => "🍽️",
        "district" => "🏙️",
        "transport" => "🚇",
        _ => "📄",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(weight: i64) -> TermMeta {
        TermMeta {
            weight,
            ..TermMeta::default()
        }
    }

    #[test]
    fn test_short_terms_are_ignored() {
        let mut idx = SuggestionIndex::new();
        idx.add_term(" a ", meta(1));
        assert!(idx.is_empty());

        idx.add_term("ab", meta(1));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_insensitive_prefix_match() {
        let mut idx = SuggestionIndex::new();
        idx.add_term("Dubai Marina", meta(10));
        idx.add_term("Dubai Mall", meta(20));
        idx.add_term("Deira", meta(30));

        let got = idx.lookup("DUB", "en", 8);
        let texts: Vec<_> = got.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["dubai mall", "dubai marina"]);
        assert_eq!(got[0].display_text, "Dubai Mall");
    }

    #[test]
    fn test_lookup_short_prefix_is_empty() {
        let mut idx = SuggestionIndex::new();
        idx.add_term("dubai", meta(1));
        assert!(idx.lookup("d", "en", 8).is_empty());
    }

    #[test]
    fn test_ranking_uses_search_count_as_tiebreak() {
        let mut idx = SuggestionIndex::new();
        idx.add_term("jumeirah beach", meta(50));
        idx.add_term("jumeirah lakes", meta(50));
        idx.increment_count("Jumeirah Lakes");
        idx.increment_count("jumeirah lakes ");

        let got = idx.lookup("jum", "en", 8);
        assert_eq!(got[0].text, "jumeirah lakes");
        assert!((got[0].score - 50.2).abs() < 1e-9);
        assert_eq!(got[1].score, 50.0);
    }

    #[test]
    fn test_limit_and_locale() {
        let mut idx = SuggestionIndex::new();
        for (i, t) in ["burj al arab", "burj khalifa", "burjuman"].iter().enumerate() {
            idx.add_term(t, meta(i as i64));
        }
        idx.add_term(
            "burj khalifa ar",
            TermMeta {
                locale: Some("ar".into()),
                ..meta(99)
            },
        );

        let got = idx.lookup("burj", "en", 2);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].text, "burjuman");

        let ar = idx.lookup("burj", "ar", 8);
        assert_eq!(ar.len(), 1);
    }

    #[test]
    fn test_replacing_a_term_keeps_its_count() {
        let mut idx = SuggestionIndex::new();
        idx.add_term("marina", meta(1));
        idx.increment_count("marina");
        idx.add_term(
            "Marina",
            TermMeta {
                url: Some("/districts/marina".into()),
                ..meta(5)
            },
        );

        let got = idx.lookup("mar", "en", 8);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].url.as_deref(), Some("/districts/marina"));
        assert!((got[0].score - 5.1).abs() < 1e-9);
    }

    #[test]
    fn test_index_content_adds_titles_terms_and_defaults() {
        let mut idx = SuggestionIndex::new();
        idx.index_content(&[ContentEntry {
            id: "atlantis".into(),
            title: "Atlantis The Palm".into(),
            kind: "hotel".into(),
            search_terms: vec!["aquaventure".into(), "ap".into()],
            popularity: 80,
        }]);

        let title = idx.lookup("atlantis", "en", 8);
        assert_eq!(title[0].display_text, "Atlantis The Palm");
        assert_eq!(title[0].url.as_deref(), Some("/hotels/atlantis"));
        assert_eq!(title[0].icon.as_deref(), Some("🏨"));

        let term = idx.lookup("aqua", "en", 8);
        assert_eq!(term[0].score, 40.0);
        assert_eq!(term[0].url.as_deref(), Some("/hotels/atlantis"));

        let hotels = idx.lookup("hot", "en", 8);
        assert_eq!(hotels[0].kind, "category");

        let jbr = idx.lookup("jb", "en", 8);
        assert_eq!(jbr[0].display_text, "JBR");
        assert_eq!(jbr[0].url, None);
    }

    #[test]
    fn test_content_urls_and_icons() {
        assert_eq!(content_url("district", "marina"), "/districts/marina");
        assert_eq!(content_url("transport", "metro"), "/transport/metro");
        assert_eq!(content_url("event", "nye"), "/events/nye");
        assert_eq!(type_icon("dining"), "🍽️");
        assert_eq!(type_icon("event"), "📄");
    }

    #[tokio::test]
    async fn test_provider_impl_delegates_to_lookup() {
        let mut idx = SuggestionIndex::new();
        idx.add_defaults();
        let got = idx.suggest("dubai", "en", 8).await.unwrap();
        assert_eq!(got.len(), 2);
    }
}

//! Suggestion records exchanged with suggestion providers.

use serde::{Deserialize, Serialize};

/// A single autocomplete candidate.
///
/// Providers return suggestions already ranked; the search input never
/// re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Value written into the field when the suggestion is selected.
    pub text: String,
    /// Label shown in the dropdown.
    pub display_text: String,
    /// Free-form category tag such as `"location"` or `"category"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When set, selecting the suggestion navigates here instead of filling the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Short glyph shown before the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Relevance score assigned by the provider.
    #[serde(default)]
    pub score: f64,
}

impl Suggestion {
    /// Creates a suggestion whose display text equals its text.
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display_text: text.clone(),
            text,
            kind: kind.into(),
            url: None,
            icon: None,
            score: 0.0,
        }
    }

    /// Sets the display label.
    pub fn with_display_text(mut self, display_text: impl Into<String>) -> Self {
        self.display_text = display_text.into();
        self
    }

    /// Sets the navigation target.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

/// Response body of the autocomplete endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    /// Ranked suggestions; empty is a valid answer.
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_shape() {
        let body = r#"{
            "suggestions": [
                {"text": "dubai marina", "displayText": "Dubai Marina", "type": "location", "icon": "📍", "score": 50},
                {"text": "hotels", "displayText": "Hotels", "type": "category", "url": "/hotels", "score": 100.5}
            ]
        }"#;
        let resp: SuggestionsResponse = serde_json::from_str(body).unwrap();

        assert_eq!(resp.suggestions.len(), 2);
        assert_eq!(resp.suggestions[0].display_text, "Dubai Marina");
        assert_eq!(resp.suggestions[0].kind, "location");
        assert_eq!(resp.suggestions[0].url, None);
        assert_eq!(resp.suggestions[1].url.as_deref(), Some("/hotels"));
        assert_eq!(resp.suggestions[1].score, 100.5);
    }

    #[test]
    fn test_missing_suggestions_field_is_empty() {
        let resp: SuggestionsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.suggestions.is_empty());
    }

    #[test]
    fn test_encode_skips_absent_optionals() {
        let json = serde_json::to_value(Suggestion::new("jbr", "location")).unwrap();
        assert_eq!(json["type"], "location");
        assert_eq!(json["displayText"], "jbr");
        assert!(json.get("url").is_none());
        assert!(json.get("icon").is_none());
    }
}

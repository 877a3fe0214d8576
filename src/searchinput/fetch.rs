//! Suggestion requests and their per-input result cache.

use bubbletea_rs::{Cmd, Msg};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use super::types::{FetchKey, SuggestionsMsg};
use crate::provider::SuggestionProvider;
use crate::suggestion::Suggestion;

/// Number of answered keys kept per input.
pub(crate) const CACHE_CAPACITY: usize = 32;

/// Results by key plus the keys still waiting for an answer.
///
/// Holds at most `capacity` answered keys; the oldest answer is evicted
/// first, except for the key currently on display.
#[derive(Debug)]
pub(crate) struct SuggestionCache {
    results: HashMap<FetchKey, Vec<Suggestion>>,
    order: VecDeque<FetchKey>,
    in_flight: HashSet<FetchKey>,
    capacity: usize,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }
}

impl SuggestionCache {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            results: HashMap::new(),
            order: VecDeque::new(),
            in_flight: HashSet::new(),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.results.len()
    }

    pub(crate) fn get(&self, key: &FetchKey) -> Option<&[Suggestion]> {
        self.results.get(key).map(Vec::as_slice)
    }

    pub(crate) fn is_pending(&self, key: &FetchKey) -> bool {
        self.in_flight.contains(key)
    }

    /// Whether a request for `key` should be started.
    pub(crate) fn needs_fetch(&self, key: &FetchKey) -> bool {
        !self.results.contains_key(key) && !self.in_flight.contains(key)
    }

    pub(crate) fn begin(&mut self, key: FetchKey) {
        self.in_flight.insert(key);
    }

    /// Stores an answer, then evicts the oldest answers other than `keep`
    /// until the cache is back within capacity.
    pub(crate) fn complete(
        &mut self,
        key: FetchKey,
        suggestions: Vec<Suggestion>,
        keep: Option<&FetchKey>,
    ) {
        self.in_flight.remove(&key);
        if self.results.insert(key.clone(), suggestions).is_some() {
            self.order.retain(|k| k != &key);
        }
        self.order.push_back(key);

        while self.results.len() > self.capacity {
            let Some(pos) = self.order.iter().position(|k| Some(k) != keep) else {
                break;
            };
            if let Some(old) = self.order.remove(pos) {
                self.results.remove(&old);
            }
        }
    }

    /// Forgets the request without storing a result, so the key can be retried.
    pub(crate) fn fail(&mut self, key: &FetchKey) {
        self.in_flight.remove(key);
    }

    pub(crate) fn clear(&mut self) {
        self.results.clear();
        self.order.clear();
        self.in_flight.clear();
    }
}

/// Calls the provider and reports the answer tagged with its key.
pub(crate) fn fetch_cmd(provider: Arc<dyn SuggestionProvider>, id: i64, key: FetchKey) -> Cmd {
    Box::pin(async move {
        let result = provider.suggest(&key.query, &key.locale, key.limit).await;
        Some(Box::new(SuggestionsMsg { id, key, result }) as Msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(q: &str) -> FetchKey {
        FetchKey {
            query: q.to_string(),
            locale: "en".to_string(),
            limit: 8,
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut cache = SuggestionCache::default();
        assert!(cache.needs_fetch(&key("dubai")));

        cache.begin(key("dubai"));
        assert!(cache.is_pending(&key("dubai")));
        assert!(!cache.needs_fetch(&key("dubai")));
        assert!(cache.get(&key("dubai")).is_none());

        cache.complete(key("dubai"), vec![Suggestion::new("dubai mall", "location")], None);
        assert!(!cache.is_pending(&key("dubai")));
        assert_eq!(cache.get(&key("dubai")).map(<[_]>::len), Some(1));
        assert!(!cache.needs_fetch(&key("dubai")));
    }

    #[test]
    fn test_failed_key_can_be_retried() {
        let mut cache = SuggestionCache::default();
        cache.begin(key("jbr"));
        cache.fail(&key("jbr"));
        assert!(cache.needs_fetch(&key("jbr")));
        assert!(cache.get(&key("jbr")).is_none());
    }

    #[test]
    fn test_keys_differ_by_locale_and_limit() {
        let mut cache = SuggestionCache::default();
        cache.complete(key("marina"), Vec::new(), None);
        let ar = FetchKey {
            locale: "ar".into(),
            ..key("marina")
        };
        let five = FetchKey {
            limit: 5,
            ..key("marina")
        };
        assert!(cache.needs_fetch(&ar));
        assert!(cache.needs_fetch(&five));
    }

    #[test]
    fn test_oldest_answers_are_evicted() {
        let mut cache = SuggestionCache::with_capacity(3);
        for i in 0..10_000 {
            let k = key(&format!("q{i}"));
            cache.begin(k.clone());
            cache.complete(k, Vec::new(), None);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get(&key("q9999")).is_some());
        assert!(cache.get(&key("q9997")).is_some());
        assert!(cache.needs_fetch(&key("q0")));
    }

    #[test]
    fn test_displayed_key_survives_eviction() {
        let mut cache = SuggestionCache::with_capacity(2);
        let shown = key("marina");
        cache.complete(shown.clone(), Vec::new(), None);
        cache.complete(key("jbr"), Vec::new(), Some(&shown));
        cache.complete(key("palm"), Vec::new(), Some(&shown));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&shown).is_some());
        assert!(cache.get(&key("jbr")).is_none());
    }

    #[test]
    fn test_repeated_answer_refreshes_position() {
        let mut cache = SuggestionCache::with_capacity(2);
        cache.complete(key("aa"), Vec::new(), None);
        cache.complete(key("bb"), Vec::new(), None);
        cache.complete(key("aa"), Vec::new(), None);
        cache.complete(key("cc"), Vec::new(), None);

        assert!(cache.get(&key("aa")).is_some());
        assert!(cache.get(&key("bb")).is_none());
    }

    #[tokio::test]
    async fn test_fetch_cmd_tags_result_with_key() {
        let mut index = crate::provider::SuggestionIndex::new();
        index.add_defaults();

        let cmd = fetch_cmd(Arc::new(index), 42, key("palm"));
        let msg = cmd.await.unwrap();
        let msg = msg.downcast::<SuggestionsMsg>().unwrap();

        assert_eq!(msg.id, 42);
        assert_eq!(msg.key, key("palm"));
        let list = msg.result.unwrap();
        assert_eq!(list[0].display_text, "Palm Jumeirah");
    }
}

//! Analysis history storage and management.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::types::{ComprehensiveAnalysis, SentimentResponse};

pub const HISTORY_KEY: &str = "sentiment_analysis_history";
pub const MAX_HISTORY: usize = 50;

/// A single past single-text analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHistoryItem {
    pub id: String,
    pub text: String,
    pub result: SentimentResponse,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl AnalysisHistoryItem {
    /// New entry whose id is derived from its creation time.
    pub fn new(text: impl Into<String>, result: SentimentResponse, timestamp: i64) -> Self {
        Self {
            id: timestamp.to_string(),
            text: text.into(),
            result,
            timestamp,
        }
    }

    pub fn from_analysis(analysis: &ComprehensiveAnalysis) -> Self {
        Self::new(analysis.text.clone(), analysis.sentiment.clone(), analysis.timestamp)
    }

    pub fn confidence(&self) -> f64 {
        self.result.confidence()
    }
}

/// Bounded, most-recent-first history persisted under [`HISTORY_KEY`].
///
/// Every mutation reads the current list, edits a copy and writes it back in
/// a single call.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Load history. Missing or corrupt data reads as empty.
    pub fn get_all(&self) -> Vec<AnalysisHistoryItem> {
        let Some(raw) = self.storage.get(HISTORY_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("Ignoring unreadable analysis history: {}", e);
                Vec::new()
            }
        }
    }

    /// Add an entry at the front, evicting anything beyond [`MAX_HISTORY`].
    pub fn save(&mut self, item: AnalysisHistoryItem) -> Result<(), StorageError> {
        let mut items = self.get_all();
        items.insert(0, item);
        items.truncate(MAX_HISTORY);
        self.write(&items)
    }

    /// Remove every entry with this id.
    pub fn remove_by_id(&mut self, id: &str) -> Result<(), StorageError> {
        let mut items = self.get_all();
        items.retain(|item| item.id != id);
        self.write(&items)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        debug!("Clearing analysis history");
        self.storage.remove(HISTORY_KEY)
    }

    pub fn len(&self) -> usize {
        self.get_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.get_all().is_empty()
    }

    fn write(&mut self, items: &[AnalysisHistoryItem]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(items)?;
        self.storage.set(HISTORY_KEY, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::{Sentiment, SentimentScores};

    fn item(n: i64) -> AnalysisHistoryItem {
        AnalysisHistoryItem::new(
            format!("text {}", n),
            SentimentResponse::new(Sentiment::Positive, SentimentScores::new(0.7, 0.2, 0.1)),
            n,
        )
    }

    #[test]
    fn test_keeps_newest_fifty() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        for n in 1..=75 {
            store.save(item(n)).unwrap();
        }

        let all = store.get_all();
        assert_eq!(all.len(), MAX_HISTORY);
        assert_eq!(all[0].timestamp, 75);
        assert_eq!(all[49].timestamp, 26);
        assert!(all.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn test_save_is_single_write() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        store.save(item(1)).unwrap();
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn test_remove_by_id_keeps_order() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        for n in 1..=5 {
            store.save(item(n)).unwrap();
        }
        // A duplicate id is removed along with the original
        let mut dup = item(3);
        dup.text = "again".to_string();
        store.save(dup).unwrap();

        store.remove_by_id("3").unwrap();

        let ids: Vec<_> = store.get_all().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["5", "4", "2", "1"]);
    }

    #[test]
    fn test_remove_missing_id_still_writes() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        store.save(item(1)).unwrap();
        store.remove_by_id("nope").unwrap();

        assert_eq!(store.storage().write_count(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        store.save(item(1)).unwrap();
        store.clear().unwrap();

        assert!(store.get_all().is_empty());
        assert!(store.storage().get(HISTORY_KEY).is_none());
    }

    #[test]
    fn test_absent_or_corrupt_reads_empty() {
        let store = HistoryStore::new(MemoryStorage::new());
        assert!(store.get_all().is_empty());

        let mut storage = MemoryStorage::new();
        storage.set(HISTORY_KEY, "{not json").unwrap();
        let store = HistoryStore::new(storage);
        assert!(store.get_all().is_empty());

        let mut storage = MemoryStorage::new();
        storage.set(HISTORY_KEY, r#"[{"id": 5}]"#).unwrap();
        let mut store = HistoryStore::new(storage);
        assert!(store.get_all().is_empty());

        // Writing over corrupt data starts a fresh list
        store.save(item(9)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_persisted_shape() {
        let mut store = HistoryStore::new(MemoryStorage::new());
        store.save(item(1700000000000)).unwrap();

        let raw = store.storage().get(HISTORY_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "1700000000000");
        assert_eq!(value[0]["result"]["sentiment"], "positive");
        assert_eq!(value[0]["result"]["scores"]["neutral"], 0.2);
        assert_eq!(value[0]["timestamp"], 1700000000000i64);
    }
}

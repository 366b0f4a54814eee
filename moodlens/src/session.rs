//! An API client, a history store and a clock wired together.

use tracing::{debug, warn};

use crate::analyze;
use crate::api::AnalysisApi;
use crate::error::Result;
use crate::history::{AnalysisHistoryItem, HistoryStore};
use crate::storage::KeyValueStore;
use crate::types::{BulkAnalysisResponse, ComprehensiveAnalysis, SentimentResponse};

/// Milliseconds since the Unix epoch.
pub type Clock = fn() -> i64;

/// Runs analyses and records the successful ones in history.
///
/// A failed history write is logged and does not fail the analysis.
pub struct Session<A, S> {
    api: A,
    history: HistoryStore<S>,
    clock: Clock,
}

impl<A: AnalysisApi, S: KeyValueStore> Session<A, S> {
    pub fn new(api: A, storage: S, clock: Clock) -> Self {
        Self {
            api,
            history: HistoryStore::new(storage),
            clock,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore<S> {
        &mut self.history
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Sentiment only; recorded in history on success.
    pub async fn analyze_sentiment(&mut self, text: &str) -> Result<SentimentResponse> {
        let result = analyze::analyze_sentiment(&self.api, text).await?;
        let item = AnalysisHistoryItem::new(text.trim(), result.clone(), self.now());
        self.record(item);
        Ok(result)
    }

    /// Full analysis of free-form input; recorded in history on success.
    pub async fn analyze(&mut self, input: &str) -> Result<ComprehensiveAnalysis> {
        let analysis = analyze::analyze_comprehensive(&self.api, input, self.now()).await?;
        self.record(AnalysisHistoryItem::from_analysis(&analysis));
        Ok(analysis)
    }

    /// Full analysis of a fetched page; recorded in history on success.
    pub async fn analyze_url(&mut self, url: &str) -> Result<ComprehensiveAnalysis> {
        let analysis = analyze::analyze_url(&self.api, url, self.now()).await?;
        self.record(AnalysisHistoryItem::from_analysis(&analysis));
        Ok(analysis)
    }

    /// Batch analysis. Batches are not recorded in history.
    pub async fn analyze_bulk(&self, texts: &[String]) -> Result<BulkAnalysisResponse> {
        analyze::analyze_bulk(&self.api, texts).await
    }

    fn record(&mut self, item: AnalysisHistoryItem) {
        debug!(id = %item.id, "Recording analysis in history");
        if let Err(e) = self.history.save(item) {
            warn!("Analysis succeeded but could not be saved to history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tests::MockApi;
    use crate::display::percent;
    use crate::error::{AnalysisError, StorageError};
    use crate::storage::MemoryStorage;
    use futures::executor::block_on;

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    /// Storage whose writes always fail.
    #[derive(Default)]
    struct FullStorage;

    impl KeyValueStore for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::WriteError("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_successful_sentiment_is_recorded() {
        let mut session = Session::new(MockApi::positive(), MemoryStorage::new(), fixed_clock);

        let result = block_on(session.analyze_sentiment("I love this product!")).unwrap();
        assert_eq!(percent(result.confidence(), 1), "95.0%");

        let history = session.history().get_all();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "I love this product!");
        assert_eq!(history[0].id, "1700000000000");
    }

    #[test]
    fn test_failed_sentiment_is_not_recorded() {
        let api = MockApi {
            fail_sentiment: Some("API Error".to_string()),
            ..MockApi::positive()
        };
        let mut session = Session::new(api, MemoryStorage::new(), fixed_clock);

        let err = block_on(session.analyze_sentiment("I love this product!")).unwrap_err();
        assert_eq!(err, AnalysisError::Request("API Error".to_string()));
        assert_eq!(err.to_string(), "API Error");
        assert_eq!(session.history().storage().write_count(), 0);
    }

    #[test]
    fn test_rejected_input_makes_no_call() {
        let mut session = Session::new(MockApi::positive(), MemoryStorage::new(), fixed_clock);

        let err = block_on(session.analyze_sentiment("  \t ")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter some text to analyze");
        assert_eq!(session.api().calls.get(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_comprehensive_records_sentiment() {
        let mut session = Session::new(MockApi::positive(), MemoryStorage::new(), fixed_clock);

        let analysis = block_on(session.analyze("Great battery, poor screen")).unwrap();
        assert_eq!(analysis.text, "Great battery");

        let history = session.history().get_all();
        assert_eq!(history[0].text, "Great battery");
        assert_eq!(history[0].result, analysis.sentiment);
    }

    #[test]
    fn test_partial_failure_records_nothing() {
        let api = MockApi {
            fail_emotion: Some("Failed to analyze emotion".to_string()),
            ..MockApi::positive()
        };
        let mut session = Session::new(api, MemoryStorage::new(), fixed_clock);

        assert!(block_on(session.analyze("hello world")).is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_fail_analysis() {
        let mut session = Session::new(MockApi::positive(), FullStorage, fixed_clock);
        let result = block_on(session.analyze_sentiment("fine")).unwrap();
        assert_eq!(result.sentiment, crate::types::Sentiment::Positive);
    }

    #[test]
    fn test_bulk_is_not_recorded() {
        let session = Session::new(MockApi::positive(), MemoryStorage::new(), fixed_clock);
        let texts = vec!["a".to_string(), "b".to_string()];
        block_on(session.analyze_bulk(&texts)).unwrap();
        assert!(session.history().is_empty());
    }
}

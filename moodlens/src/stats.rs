//! Aggregate statistics over the stored history.

use serde::Serialize;

use crate::history::AnalysisHistoryItem;
use crate::types::Sentiment;

/// Entries shown in the "recent analyses" list.
pub const RECENT_LIMIT: usize = 5;

/// Per-label counts, keyed the way exported reports spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn add(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub counts: SentimentCounts,
    /// Mean of each entry's confidence, 0 for an empty history.
    pub average_confidence: f64,
}

impl HistoryStats {
    pub fn from_items(items: &[AnalysisHistoryItem]) -> Self {
        let mut counts = SentimentCounts::default();
        let mut confidence_sum = 0.0;
        for item in items {
            counts.add(item.result.sentiment);
            confidence_sum += item.confidence();
        }

        let average_confidence = if items.is_empty() {
            0.0
        } else {
            confidence_sum / items.len() as f64
        };

        Self {
            total: items.len(),
            counts,
            average_confidence,
        }
    }

    /// Share of entries with this label, in percent.
    pub fn percentage(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.counts.get(sentiment) as f64 / self.total as f64 * 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Newest entries first, at most `limit` of them.
pub fn recent(items: &[AnalysisHistoryItem], limit: usize) -> &[AnalysisHistoryItem] {
    &items[..items.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SentimentResponse, SentimentScores};

    fn item(id: i64, sentiment: Sentiment, top: f64) -> AnalysisHistoryItem {
        let rest = (1.0 - top) / 2.0;
        let scores = match sentiment {
            Sentiment::Positive => SentimentScores::new(top, rest, rest),
            Sentiment::Neutral => SentimentScores::new(rest, top, rest),
            Sentiment::Negative => SentimentScores::new(rest, rest, top),
        };
        AnalysisHistoryItem::new("t", SentimentResponse::new(sentiment, scores), id)
    }

    #[test]
    fn test_empty_history() {
        let stats = HistoryStats::from_items(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.average_confidence, 0.0);
        assert_eq!(stats.percentage(Sentiment::Positive), 0.0);
    }

    #[test]
    fn test_counts_and_average() {
        let items = vec![
            item(4, Sentiment::Positive, 0.9),
            item(3, Sentiment::Positive, 0.7),
            item(2, Sentiment::Negative, 0.8),
            item(1, Sentiment::Neutral, 0.6),
        ];
        let stats = HistoryStats::from_items(&items);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.counts.positive, 2);
        assert_eq!(stats.counts.get(Sentiment::Neutral), 1);
        assert_eq!(stats.percentage(Sentiment::Positive), 50.0);
        assert!((stats.average_confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let items: Vec<_> = (1..=8).rev().map(|n| item(n, Sentiment::Neutral, 0.5)).collect();
        let ids: Vec<_> = recent(&items, RECENT_LIMIT).iter().map(|i| i.timestamp).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        assert_eq!(recent(&items[..2], RECENT_LIMIT).len(), 2);
    }
}

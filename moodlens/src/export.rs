//! JSON documents generated locally for download or saving to disk.

use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

use crate::display::truncate_chars;
use crate::error::ExportError;
use crate::history::AnalysisHistoryItem;
use crate::stats::SentimentCounts;
use crate::types::{
    BulkAnalysisItem, ComprehensiveAnalysis, Sentiment, SentimentResponse, SentimentScores,
};

pub const REPORT_EXAMPLE_LIMIT: usize = 5;
pub const REPORT_TEXT_LIMIT: usize = 100;

const CONFLICT_TERMS: [&str; 3] = ["fight", "violence", "attack"];
const ABUSE_TERMS: [&str; 3] = ["worthless", "nobody cares", "hate"];
const DISTRESS_TERMS: [&str; 3] = ["nothing matters", "exhausted", "can't focus"];

const RECOMMENDATIONS: [&str; 4] = [
    "Continue monitoring sentiment trends for early conflict detection",
    "Review flagged content with qualified professionals",
    "Use batch processing for large-scale social media monitoring",
    "Integrate with human review workflows for high-priority flags",
];

pub const REPORT_DISCLAIMER: &str = "This system provides automated early-signal detection to support human decision-makers. It is not a replacement for clinical or legal evaluation.";

/// A finished export: where it should be saved and what goes in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub filename: String,
    pub contents: String,
}

impl Export {
    fn json<T: Serialize>(prefix: &str, now_ms: i64, value: &T) -> Result<Self, ExportError> {
        Ok(Self {
            filename: format!("{}-{}.json", prefix, now_ms),
            contents: serde_json::to_string_pretty(value)?,
        })
    }
}

/// Milliseconds since the epoch as ISO-8601 UTC, e.g. `2023-11-14T22:13:20.000Z`.
pub fn iso_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

// =============================================================================
// Single result and history
// =============================================================================

#[derive(Debug, Serialize)]
struct ResultExport<'a> {
    text: &'a str,
    sentiment: Sentiment,
    confidence: f64,
    scores: SentimentScores,
    timestamp: String,
}

/// One sentiment result, as `sentiment-analysis-<ms>.json`.
pub fn export_result(text: &str, result: &SentimentResponse, now_ms: i64) -> Result<Export, ExportError> {
    let doc = ResultExport {
        text,
        sentiment: result.sentiment,
        confidence: result.confidence(),
        scores: result.scores,
        timestamp: iso_timestamp(now_ms),
    };
    Export::json("sentiment-analysis", now_ms, &doc)
}

/// The whole history array, as `sentiment-history-<ms>.json`.
pub fn export_history(items: &[AnalysisHistoryItem], now_ms: i64) -> Result<Export, ExportError> {
    if items.is_empty() {
        return Err(ExportError::EmptyHistory);
    }
    Export::json("sentiment-history", now_ms, &items)
}

#[derive(Debug, Serialize)]
struct BatchExport<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    results: &'a [BulkAnalysisItem],
    timestamp: String,
    total: usize,
}

/// Batch results, as `unified-analysis-<ms>.json`.
pub fn export_batch(results: &[BulkAnalysisItem], now_ms: i64) -> Result<Export, ExportError> {
    let doc = BatchExport {
        kind: "unified_analysis",
        results,
        timestamp: iso_timestamp(now_ms),
        total: results.len(),
    };
    Export::json("unified-analysis", now_ms, &doc)
}

// =============================================================================
// Impact report
// =============================================================================

/// Texts matching each keyword screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFlags {
    pub conflict_escalation: usize,
    pub abuse_patterns: usize,
    pub mental_health_signals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_analyses: usize,
    pub sentiment_distribution: SentimentCounts,
    pub flags_detected: ReportFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeaceMetrics {
    pub conflict_escalation_flags: usize,
    pub abuse_pattern_flags: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub mental_health_signals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalAlignment<M> {
    pub title: &'static str,
    pub contributions: Vec<&'static str>,
    pub metrics: M,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SdgAlignment {
    pub sdg16: GoalAlignment<PeaceMetrics>,
    pub sdg3: GoalAlignment<HealthMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportExample {
    pub text: String,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub report_type: &'static str,
    pub generated_at: String,
    pub summary: ReportSummary,
    pub sdg_alignment: SdgAlignment,
    pub example_analyses: Vec<ReportExample>,
    pub recommendations: Vec<&'static str>,
    pub disclaimer: &'static str,
}

struct ReportEntry<'a> {
    text: &'a str,
    result: &'a SentimentResponse,
    timestamp: i64,
}

fn mentions_any(text: &str, terms: &[&str]) -> bool {
    let lower = text.to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}

impl ImpactReport {
    /// Summarize the current analysis (if any) followed by the history.
    pub fn build(
        current: Option<&ComprehensiveAnalysis>,
        history: &[AnalysisHistoryItem],
        now_ms: i64,
    ) -> Self {
        let entries: Vec<ReportEntry<'_>> = current
            .map(|a| ReportEntry {
                text: &a.text,
                result: &a.sentiment,
                timestamp: a.timestamp,
            })
            .into_iter()
            .chain(history.iter().map(|h| ReportEntry {
                text: &h.text,
                result: &h.result,
                timestamp: h.timestamp,
            }))
            .collect();

        let mut distribution = SentimentCounts::default();
        for entry in &entries {
            distribution.add(entry.result.sentiment);
        }

        let flagged = |terms: &[&str]| entries.iter().filter(|e| mentions_any(e.text, terms)).count();
        let flags = ReportFlags {
            conflict_escalation: flagged(&CONFLICT_TERMS[..]),
            abuse_patterns: flagged(&ABUSE_TERMS[..]),
            mental_health_signals: flagged(&DISTRESS_TERMS[..]),
        };

        let example_analyses = entries
            .iter()
            .take(REPORT_EXAMPLE_LIMIT)
            .map(|e| ReportExample {
                text: truncate_chars(e.text, REPORT_TEXT_LIMIT),
                sentiment: e.result.sentiment,
                confidence: e.result.confidence(),
                timestamp: iso_timestamp(e.timestamp),
            })
            .collect();

        Self {
            report_type: "SDG Impact Report",
            generated_at: iso_timestamp(now_ms),
            summary: ReportSummary {
                total_analyses: entries.len(),
                sentiment_distribution: distribution,
                flags_detected: flags,
            },
            sdg_alignment: SdgAlignment {
                sdg16: GoalAlignment {
                    title: "Peace, Justice and Strong Institutions",
                    contributions: vec![
                        "Conflict escalation detection through sentiment and emotion analysis",
                        "Online abuse pattern identification for safer digital communities",
                        "Early warning system for potential violence or harassment",
                    ],
                    metrics: PeaceMetrics {
                        conflict_escalation_flags: flags.conflict_escalation,
                        abuse_pattern_flags: flags.abuse_patterns,
                    },
                },
                sdg3: GoalAlignment {
                    title: "Good Health and Well-being",
                    contributions: vec![
                        "Mental health signal detection through emotional analysis",
                        "Early identification of distress patterns",
                        "Support resource connection facilitation",
                    ],
                    metrics: HealthMetrics {
                        mental_health_signals: flags.mental_health_signals,
                    },
                },
            },
            example_analyses,
            recommendations: RECOMMENDATIONS.to_vec(),
            disclaimer: REPORT_DISCLAIMER,
        }
    }
}

/// History entries that are not `current` itself.
///
/// A fresh analysis is usually already the newest history entry; the report
/// should not count it twice.
pub fn history_without<'a>(
    current: Option<&ComprehensiveAnalysis>,
    history: &'a [AnalysisHistoryItem],
) -> &'a [AnalysisHistoryItem] {
    match (current, history.first()) {
        (Some(a), Some(first)) if first.id == a.timestamp.to_string() => &history[1..],
        _ => history,
    }
}

/// Impact report, as `sdg-impact-report-<ms>.json`.
pub fn export_impact_report(
    current: Option<&ComprehensiveAnalysis>,
    history: &[AnalysisHistoryItem],
    now_ms: i64,
) -> Result<Export, ExportError> {
    let report = ImpactReport::build(current, history, now_ms);
    Export::json("sdg-impact-report", now_ms, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Emotion;

    const NOW: i64 = 1_700_000_000_000;

    fn item(id: i64, text: &str, sentiment: Sentiment) -> AnalysisHistoryItem {
        AnalysisHistoryItem::new(
            text,
            SentimentResponse::new(sentiment, SentimentScores::new(0.6, 0.3, 0.1)),
            id,
        )
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(NOW), "2023-11-14T22:13:20.000Z");
        assert_eq!(iso_timestamp(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_export_result() {
        let result = SentimentResponse::new(Sentiment::Positive, SentimentScores::new(0.95, 0.02, 0.03));
        let export = export_result("I love this product!", &result, NOW).unwrap();

        assert_eq!(export.filename, "sentiment-analysis-1700000000000.json");
        assert!(export.contents.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(value["text"], "I love this product!");
        assert_eq!(value["sentiment"], "positive");
        assert_eq!(value["confidence"], 0.95);
        assert_eq!(value["scores"]["negative"], 0.03);
        assert_eq!(value["timestamp"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_export_history() {
        assert_eq!(export_history(&[], NOW), Err(ExportError::EmptyHistory));

        let items = vec![item(2, "b", Sentiment::Neutral), item(1, "a", Sentiment::Positive)];
        let export = export_history(&items, NOW).unwrap();
        assert_eq!(export.filename, "sentiment-history-1700000000000.json");

        let back: Vec<AnalysisHistoryItem> = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(back, items);
    }

    #[test]
    fn test_export_batch() {
        let results = vec![BulkAnalysisItem {
            text: "ok".to_string(),
            sentiment: Sentiment::Neutral,
            scores: SentimentScores::new(0.1, 0.8, 0.1),
            emotion: Emotion::Neutral,
            probabilities: Default::default(),
        }];
        let export = export_batch(&results, NOW).unwrap();
        assert_eq!(export.filename, "unified-analysis-1700000000000.json");

        let value: serde_json::Value = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(value["type"], "unified_analysis");
        assert_eq!(value["total"], 1);
    }

    #[test]
    fn test_impact_report_flags() {
        let long = "x".repeat(150);
        let history = vec![
            item(5, "If they keep pushing us, we'll take to the streets and fight back.", Sentiment::Negative),
            item(4, "You're worthless and nobody cares about you.", Sentiment::Negative),
            item(3, "Lately I feel like nothing matters. I can't focus and I'm exhausted all the time.", Sentiment::Negative),
            item(2, "I HATE waiting", Sentiment::Negative),
            item(1, "Lovely day", Sentiment::Positive),
            item(0, &long, Sentiment::Neutral),
        ];
        let report = ImpactReport::build(None, &history, NOW);

        assert_eq!(report.summary.total_analyses, 6);
        assert_eq!(report.summary.sentiment_distribution.negative, 4);
        assert_eq!(report.summary.flags_detected.conflict_escalation, 1);
        assert_eq!(report.summary.flags_detected.abuse_patterns, 2);
        assert_eq!(report.summary.flags_detected.mental_health_signals, 1);
        assert_eq!(report.sdg_alignment.sdg16.metrics.abuse_pattern_flags, 2);
        assert_eq!(report.example_analyses.len(), REPORT_EXAMPLE_LIMIT);
        assert_eq!(report.example_analyses[0].confidence, 0.6);
    }

    #[test]
    fn test_impact_report_document() {
        let long = "y".repeat(150);
        let history = vec![item(1, &long, Sentiment::Neutral)];
        let export = export_impact_report(None, &history, NOW).unwrap();
        assert_eq!(export.filename, "sdg-impact-report-1700000000000.json");

        let value: serde_json::Value = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(value["reportType"], "SDG Impact Report");
        assert_eq!(value["summary"]["flagsDetected"]["mentalHealthSignals"], 0);
        assert_eq!(value["sdgAlignment"]["sdg3"]["title"], "Good Health and Well-being");
        assert_eq!(value["exampleAnalyses"][0]["text"], format!("{}...", "y".repeat(100)));
        assert_eq!(value["recommendations"].as_array().unwrap().len(), 4);
        assert_eq!(value["disclaimer"], REPORT_DISCLAIMER);
    }

    #[test]
    fn test_history_without_current() {
        let history = vec![item(7, "newest", Sentiment::Positive), item(3, "older", Sentiment::Negative)];
        assert_eq!(history_without(None, &history).len(), 2);

        let analysis = ComprehensiveAnalysis {
            text: "newest".to_string(),
            texts: None,
            sentiment: history[0].result.clone(),
            emotion: crate::types::EmotionResponse {
                emotion: Emotion::Joy,
                probabilities: Default::default(),
            },
            aspects: crate::types::AspectAnalysisResponse {
                text: "newest".to_string(),
                aspects: vec![],
                overall_sentiment: crate::types::OverallSentiment {
                    sentiment: Sentiment::Positive,
                    confidence: 0.6,
                    probabilities: SentimentScores::new(0.6, 0.3, 0.1),
                },
                total_aspects: 0,
            },
            timestamp: 7,
        };
        let rest = history_without(Some(&analysis), &history);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "older");

        let unrelated = ComprehensiveAnalysis { timestamp: 99, ..analysis };
        assert_eq!(history_without(Some(&unrelated), &history).len(), 2);
    }
}

//! Request and response shapes exchanged with the analysis service.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Sentiment
// =============================================================================

/// Categorical sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability triple over sentiment labels.
///
/// The service does not guarantee the values sum to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScores {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self { positive, neutral, negative }
    }

    pub fn get(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// Highest of the three scores.
    pub fn confidence(&self) -> f64 {
        self.positive.max(self.neutral).max(self.negative)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Optional risk screening attached to a sentiment result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub has_risk: bool,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Human label for a risk flag identifier.
pub fn risk_flag_label(flag: &str) -> &str {
    match flag {
        "violence" => "Violence",
        "self_harm" => "Self-Harm",
        "hate_speech" => "Hate Speech",
        "extreme_negativity" => "Extreme Negativity",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub sentiment: Sentiment,
    pub scores: SentimentScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<RiskAnalysis>,
}

impl SentimentResponse {
    pub fn new(sentiment: Sentiment, scores: SentimentScores) -> Self {
        Self {
            sentiment,
            scores,
            risk_analysis: None,
        }
    }

    pub fn confidence(&self) -> f64 {
        self.scores.confidence()
    }
}

// =============================================================================
// Emotion
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Neutral,
    Sadness,
    Surprise,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Neutral,
        Emotion::Sadness,
        Emotion::Surprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Neutral => "neutral",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Emotion::Anger => "Anger",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Joy => "Joy",
            Emotion::Neutral => "Neutral",
            Emotion::Sadness => "Sadness",
            Emotion::Surprise => "Surprise",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability distribution over the seven emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionProbabilities {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub neutral: f64,
    pub sadness: f64,
    pub surprise: f64,
}

impl EmotionProbabilities {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Anger => self.anger,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Neutral => self.neutral,
            Emotion::Sadness => self.sadness,
            Emotion::Surprise => self.surprise,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(move |e| (e, self.get(e)))
    }

    /// Largest probability in the distribution.
    pub fn max(&self) -> f64 {
        self.iter().map(|(_, p)| p).fold(0.0, f64::max)
    }

    /// Emotions sorted by descending probability.
    pub fn ranked(&self) -> Vec<(Emotion, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResponse {
    pub emotion: Emotion,
    pub probabilities: EmotionProbabilities,
}

impl EmotionResponse {
    /// Probability assigned to the reported label.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.emotion)
    }
}

// =============================================================================
// Aspects
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// One extracted aspect term with its own sentiment distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSentiment {
    pub aspect: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub position: TextSpan,
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probabilities: SentimentScores,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSentiment {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probabilities: SentimentScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectAnalysisResponse {
    pub text: String,
    pub aspects: Vec<AspectSentiment>,
    pub overall_sentiment: OverallSentiment,
    pub total_aspects: usize,
}

// =============================================================================
// Bulk
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAnalysisItem {
    pub text: String,
    pub sentiment: Sentiment,
    pub scores: SentimentScores,
    pub emotion: Emotion,
    pub probabilities: EmotionProbabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAnalysisResponse {
    pub results: Vec<BulkAnalysisItem>,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

// =============================================================================
// URL content
// =============================================================================

/// Page text extracted by the service for "analyze by URL".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlContent {
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    pub length: usize,
}

// =============================================================================
// Combined result
// =============================================================================

/// Sentiment, emotion and aspects for one text, gathered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    pub text: String,
    /// Every text of a multi-text submission; only `text` was analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<String>>,
    pub sentiment: SentimentResponse,
    pub emotion: EmotionResponse,
    pub aspects: AspectAnalysisResponse,
    pub timestamp: i64,
}

//! Heuristic metrics derived on the client from a finished analysis.
//!
//! None of these come from the model. They are lightweight text statistics
//! blended with the returned probabilities, and every score is kept in
//! `[0, 1]`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::display::percent;
use crate::types::{
    AspectAnalysisResponse, AspectSentiment, ComprehensiveAnalysis, EmotionProbabilities,
    EmotionResponse, Sentiment, SentimentResponse,
};

/// Aspects listed as key phrases in the insights panel.
pub const KEY_PHRASE_LIMIT: usize = 8;

/// Aspects listed as key phrases in the aspect summary.
pub const SUMMARY_PHRASE_LIMIT: usize = 5;

/// Secondary emotions and tones at or below this are not shown.
pub const NOTABLE_THRESHOLD: f64 = 0.1;

const ARC_VARIATION: f64 = 0.1;

fn word_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("word pattern is a valid regex")
}

static CLAIM: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"\b(is|are|was|were|should|must|will|can)\b"));
static JUSTIFICATION: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"\b(because|since|due to|as a result|therefore)\b"));
static CRITIQUE: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"\b(but|however|although|despite|unfortunately)\b"));
static EXPLANATION: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"\b(for example|such as|including|specifically)\b"));
static EVIDENCE: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"\b(shows|proves|indicates|demonstrates|suggests)\b"));
static SUBJECTIVE: LazyLock<Regex> =
    LazyLock::new(|| word_pattern(r"(?i)\b(i|my|me|we|our|i'm|i've|i'll)\b"));

const FORMAL_WORDS: [&str; 4] = ["please", "thank you", "sincerely", "regards"];
const SARCASTIC_WORDS: [&str; 4] = ["sure", "obviously", "clearly", "of course"];

fn count_matches(pattern: &Regex, text: &str) -> usize {
    pattern.find_iter(text).count()
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Sentences of `text`, split on runs of `.`, `!` and `?`.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .collect()
}

// =============================================================================
// Emotional arc
// =============================================================================

/// Per-sentence emotion intensity: the strongest emotion probability with a
/// small sinusoidal variation across the text.
pub fn emotional_arc(text: &str, probabilities: &EmotionProbabilities) -> Vec<f64> {
    let count = sentences(text).len();
    let base = probabilities.max();

    (0..count)
        .map(|idx| {
            let phase = idx as f64 / count as f64 * std::f64::consts::TAU;
            clamp_unit(base + phase.sin() * ARC_VARIATION)
        })
        .collect()
}

// =============================================================================
// Rhetorical intent
// =============================================================================

/// Relative weight of each rhetorical move, normalized so the strongest is 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RhetoricalIntent {
    pub claim: f64,
    pub justification: f64,
    pub critique: f64,
    pub explanation: f64,
    pub evidence: f64,
}

impl RhetoricalIntent {
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let per_sentence = sentences(text).len().max(1) as f64;
        let rate = |pattern: &Regex| count_matches(pattern, &lower) as f64 / per_sentence;

        let raw = Self {
            claim: rate(&CLAIM),
            justification: rate(&JUSTIFICATION),
            critique: rate(&CRITIQUE),
            explanation: rate(&EXPLANATION),
            evidence: rate(&EVIDENCE),
        };

        let max = raw.entries().iter().map(|(_, v)| *v).fold(0.0, f64::max);
        if max <= 0.0 {
            return Self::default();
        }
        Self {
            claim: raw.claim / max,
            justification: raw.justification / max,
            critique: raw.critique / max,
            explanation: raw.explanation / max,
            evidence: raw.evidence / max,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("claim", self.claim),
            ("justification", self.justification),
            ("critique", self.critique),
            ("explanation", self.explanation),
            ("evidence", self.evidence),
        ]
    }
}

// =============================================================================
// Tone
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ToneMetrics {
    pub assertive: f64,
    pub polite: f64,
    pub sarcastic: f64,
    pub formal: f64,
    pub subjective: f64,
}

impl ToneMetrics {
    pub fn from_text(text: &str, sentiment: &SentimentResponse, emotion: &EmotionResponse) -> Self {
        let lower = text.to_lowercase();
        let exclamations = text.matches('!').count() as f64;
        let has_question = text.contains('?');
        let formal_words = FORMAL_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
        let sarcastic_words = SARCASTIC_WORDS.iter().filter(|w| lower.contains(*w)).count() as f64;
        let subjective_words = count_matches(&SUBJECTIVE, text) as f64;
        let total_words = text.split_whitespace().count().max(1) as f64;

        let confident_positive = if sentiment.scores.positive > 0.7 { 0.4 } else { 0.0 };
        let asks = if has_question { 0.2 } else { 0.0 };
        let mismatched_joy = if sentiment.sentiment == Sentiment::Negative && emotion.probabilities.joy > 0.3 {
            0.3
        } else {
            0.0
        };

        Self {
            assertive: clamp_unit(exclamations * 0.3 + confident_positive),
            polite: clamp_unit(formal_words * 0.3 + asks),
            sarcastic: clamp_unit(sarcastic_words * 0.4 + mismatched_joy),
            formal: clamp_unit(formal_words * 0.4),
            subjective: clamp_unit(subjective_words / total_words * 2.0),
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("Assertive", self.assertive),
            ("Polite", self.polite),
            ("Sarcastic", self.sarcastic),
            ("Formal", self.formal),
            ("Subjective", self.subjective),
        ]
    }

    /// Tones above [`NOTABLE_THRESHOLD`], strongest first.
    pub fn notable(&self) -> Vec<(&'static str, f64)> {
        notable(self.entries())
    }
}

// =============================================================================
// Secondary emotions
// =============================================================================

/// Blends of the primary probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SecondaryEmotions {
    pub confidence: f64,
    pub frustration: f64,
    pub admiration: f64,
    pub anxiety: f64,
    pub optimism: f64,
    pub skepticism: f64,
}

impl SecondaryEmotions {
    pub fn from_probabilities(p: &EmotionProbabilities) -> Self {
        Self {
            confidence: clamp_unit(p.joy.max(p.neutral) * 0.8),
            frustration: clamp_unit(p.anger * 0.9 + p.sadness * 0.3),
            admiration: clamp_unit(p.joy * 0.7 + p.surprise * 0.4),
            anxiety: clamp_unit(p.fear * 0.9 + p.sadness * 0.2),
            optimism: clamp_unit(p.joy * 0.8 + p.surprise * 0.3),
            skepticism: clamp_unit(p.disgust * 0.7 + p.fear * 0.3),
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("Confidence", self.confidence),
            ("Frustration", self.frustration),
            ("Admiration", self.admiration),
            ("Anxiety", self.anxiety),
            ("Optimism", self.optimism),
            ("Skepticism", self.skepticism),
        ]
    }

    /// Secondary emotions above [`NOTABLE_THRESHOLD`], strongest first.
    pub fn notable(&self) -> Vec<(&'static str, f64)> {
        notable(self.entries())
    }
}

fn notable<const N: usize>(entries: [(&'static str, f64); N]) -> Vec<(&'static str, f64)> {
    let mut kept: Vec<_> = entries.into_iter().filter(|(_, v)| *v > NOTABLE_THRESHOLD).collect();
    kept.sort_by(|a, b| b.1.total_cmp(&a.1));
    kept
}

// =============================================================================
// Explanation and aspects
// =============================================================================

/// One-paragraph plain-language summary of the three results.
pub fn confidence_explanation(
    sentiment: &SentimentResponse,
    emotion: &EmotionResponse,
    aspects: &AspectAnalysisResponse,
) -> String {
    let aspect_sentence = match aspects.total_aspects {
        0 => "No specific aspects were identified in this text.".to_string(),
        1 => "1 specific aspect was identified.".to_string(),
        n => format!("{} specific aspects were identified.", n),
    };

    format!(
        "The analysis shows {} sentiment with {} confidence. The dominant emotion is {} ({}). {}",
        sentiment.sentiment,
        percent(sentiment.confidence(), 1),
        emotion.emotion,
        percent(emotion.confidence(), 1),
        aspect_sentence
    )
}

/// Aspect terms with the highest confidence, best first.
pub fn key_phrases(aspects: &[AspectSentiment], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&AspectSentiment> = aspects.iter().collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked.into_iter().take(limit).map(|a| a.aspect.clone()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectGroup {
    pub key: String,
    pub aspects: Vec<AspectSentiment>,
}

/// Aspect counts by sentiment plus the aspects grouped by type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub key_phrases: Vec<String>,
    pub groups: Vec<AspectGroup>,
}

impl AspectSummary {
    /// Groups keep first-seen order; an aspect without a type is grouped by
    /// its sentiment.
    pub fn from_response(response: &AspectAnalysisResponse) -> Self {
        let count = |s: Sentiment| response.aspects.iter().filter(|a| a.sentiment == s).count();

        let mut groups: Vec<AspectGroup> = Vec::new();
        for aspect in &response.aspects {
            let key = if aspect.kind.is_empty() {
                aspect.sentiment.as_str().to_string()
            } else {
                aspect.kind.clone()
            };
            match groups.iter_mut().find(|g| g.key == key) {
                Some(group) => group.aspects.push(aspect.clone()),
                None => groups.push(AspectGroup {
                    key,
                    aspects: vec![aspect.clone()],
                }),
            }
        }

        Self {
            positive: count(Sentiment::Positive),
            negative: count(Sentiment::Negative),
            neutral: count(Sentiment::Neutral),
            key_phrases: key_phrases(&response.aspects, SUMMARY_PHRASE_LIMIT),
            groups,
        }
    }
}

/// Everything the insights views show for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub sentence_count: usize,
    pub emotional_arc: Vec<f64>,
    pub rhetorical_intent: RhetoricalIntent,
    pub tone: ToneMetrics,
    pub secondary_emotions: SecondaryEmotions,
    pub explanation: String,
    pub key_phrases: Vec<String>,
}

impl Insights {
    pub fn from_analysis(analysis: &ComprehensiveAnalysis) -> Self {
        let text = analysis.text.as_str();
        Self {
            sentence_count: sentences(text).len(),
            emotional_arc: emotional_arc(text, &analysis.emotion.probabilities),
            rhetorical_intent: RhetoricalIntent::from_text(text),
            tone: ToneMetrics::from_text(text, &analysis.sentiment, &analysis.emotion),
            secondary_emotions: SecondaryEmotions::from_probabilities(&analysis.emotion.probabilities),
            explanation: confidence_explanation(&analysis.sentiment, &analysis.emotion, &analysis.aspects),
            key_phrases: key_phrases(&analysis.aspects.aspects, KEY_PHRASE_LIMIT),
        }
    }
}

//! Formatting helpers shared by the terminal and browser views.

use crate::types::{Emotion, RiskLevel, Sentiment};

/// `0.95` → `"95.0%"` with `digits` decimals.
pub fn percent(value: f64, digits: usize) -> String {
    format!("{:.*}%", digits, value * 100.0)
}

/// At most `max` characters of `text`, with `...` appended when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn sentiment_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "😊",
        Sentiment::Negative => "😞",
        Sentiment::Neutral => "😐",
    }
}

/// Marker used next to aspect terms.
pub fn sentiment_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "✓",
        Sentiment::Negative => "✗",
        Sentiment::Neutral => "○",
    }
}

pub fn emotion_icon(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Joy => "😊",
        Emotion::Anger => "😠",
        Emotion::Sadness => "😢",
        Emotion::Fear => "😨",
        Emotion::Surprise => "😲",
        Emotion::Disgust => "🤢",
        Emotion::Neutral => "😐",
    }
}

pub fn risk_icon(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "🚨",
        RiskLevel::Medium => "⚠️",
        RiskLevel::Low => "ℹ️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.95, 1), "95.0%");
        assert_eq!(percent(0.876, 0), "88%");
        assert_eq!(percent(0.0, 1), "0.0%");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        // Multi-byte characters are never split
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }
}

//! Plain-text rendering of results for the terminal.

use moodlens::display::{emotion_icon, percent, risk_icon, sentiment_icon, sentiment_marker, truncate_chars};
use moodlens::insights::{AspectSummary, Insights};
use moodlens::samples::{IMPACT_EXAMPLES, TEXT_EXAMPLES};
use moodlens::stats::{HistoryStats, RECENT_LIMIT, recent};
use moodlens::types::risk_flag_label;
use moodlens::{
    AnalysisHistoryItem, AspectAnalysisResponse, BulkAnalysisResponse, ComprehensiveAnalysis,
    EmotionResponse, Sentiment, SentimentResponse,
};
use std::fmt::{self, Write};

const RULE: &str = "────────────────────────────────────────────";
const BAR_WIDTH: usize = 24;

fn bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Run a printer into a fresh string.
fn render(print: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    match print(&mut out) {
        Ok(()) => out,
        // String writes only fail through a broken Display impl
        Err(fmt::Error) => String::new(),
    }
}

fn local_time(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

pub fn sentiment(result: &SentimentResponse) -> String {
    render(|out| write_sentiment(out, result))
}

fn write_sentiment(out: &mut impl Write, result: &SentimentResponse) -> fmt::Result {
    writeln!(
        out,
        "{} {} ({} confidence)",
        sentiment_icon(result.sentiment),
        result.sentiment,
        percent(result.confidence(), 1)
    )?;
    for label in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        let score = result.scores.get(label);
        writeln!(out, "  {:<9} {} {:>6}", label.as_str(), bar(score), percent(score, 1))?;
    }

    if let Some(ref risk) = result.risk_analysis {
        if risk.has_risk {
            writeln!(
                out,
                "{} Risk level {} (score {})",
                risk_icon(risk.risk_level),
                risk.risk_level.as_str(),
                percent(risk.risk_score, 0)
            )?;
            let flags: Vec<&str> = risk.flags.iter().map(|f| risk_flag_label(f)).collect();
            if !flags.is_empty() {
                writeln!(out, "  Flags: {}", flags.join(", "))?;
            }
            for rec in &risk.recommendations {
                writeln!(out, "  - {}", rec)?;
            }
            writeln!(
                out,
                "  Automated early-signal detection only; not a substitute for professional evaluation."
            )?;
        }
    }
    Ok(())
}

pub fn emotion(result: &EmotionResponse) -> String {
    render(|out| write_emotion(out, result))
}

fn write_emotion(out: &mut impl Write, result: &EmotionResponse) -> fmt::Result {
    writeln!(
        out,
        "{} {} ({})",
        emotion_icon(result.emotion),
        result.emotion.display_name(),
        percent(result.confidence(), 1)
    )?;
    for (emotion, p) in result.probabilities.ranked() {
        writeln!(out, "  {:<9} {} {:>6}", emotion.display_name(), bar(p), percent(p, 1))?;
    }
    Ok(())
}

pub fn aspects(result: &AspectAnalysisResponse) -> String {
    render(|out| write_aspects(out, result))
}

fn write_aspects(out: &mut impl Write, result: &AspectAnalysisResponse) -> fmt::Result {
    if result.total_aspects == 0 {
        writeln!(out, "No specific aspects were identified.")?;
        return Ok(());
    }

    let summary = AspectSummary::from_response(result);
    writeln!(
        out,
        "{} aspects: {} positive, {} negative, {} neutral",
        result.total_aspects, summary.positive, summary.negative, summary.neutral
    )?;
    if !summary.key_phrases.is_empty() {
        writeln!(out, "Key phrases: {}", summary.key_phrases.join(", "))?;
    }
    for group in &summary.groups {
        writeln!(out, "[{}]", group.key)?;
        for aspect in &group.aspects {
            writeln!(
                out,
                "  {} {:<16} {:<8} {:>6}  \"{}\"",
                sentiment_marker(aspect.sentiment),
                aspect.aspect,
                aspect.sentiment.as_str(),
                percent(aspect.confidence, 1),
                truncate_chars(&aspect.context, 60)
            )?;
        }
    }
    Ok(())
}

pub fn comprehensive(analysis: &ComprehensiveAnalysis) -> String {
    render(|out| write_comprehensive(out, analysis))
}

fn write_comprehensive(out: &mut impl Write, analysis: &ComprehensiveAnalysis) -> fmt::Result {
    writeln!(out, "Text: \"{}\"", truncate_chars(&analysis.text, 80))?;
    if let Some(ref texts) = analysis.texts {
        writeln!(out, "(first of {} texts analyzed)", texts.len())?;
    }

    writeln!(out, "{}\nSentiment", RULE)?;
    write_sentiment(out, &analysis.sentiment)?;
    writeln!(out, "\n{}\nEmotion", RULE)?;
    write_emotion(out, &analysis.emotion)?;
    writeln!(out, "\n{}\nAspects", RULE)?;
    write_aspects(out, &analysis.aspects)?;
    writeln!(out, "\n{}\nInsights", RULE)?;
    write_insights(out, &Insights::from_analysis(analysis))
}

pub fn insights(insights: &Insights) -> String {
    render(|out| write_insights(out, insights))
}

fn write_insights(out: &mut impl Write, insights: &Insights) -> fmt::Result {
    writeln!(out, "{}", insights.explanation)?;

    let arc: Vec<String> = insights.emotional_arc.iter().map(|v| percent(*v, 0)).collect();
    writeln!(
        out,
        "Emotional arc over {} sentence(s): {}",
        insights.sentence_count,
        arc.join(" → ")
    )?;

    writeln!(out, "Rhetorical intent:")?;
    for (name, value) in insights.rhetorical_intent.entries() {
        writeln!(out, "  {:<13} {} {:>4}", name, bar(value), percent(value, 0))?;
    }

    let secondary = insights.secondary_emotions.notable();
    if !secondary.is_empty() {
        writeln!(out, "Secondary emotions:")?;
        for (name, value) in secondary {
            writeln!(out, "  {:<13} {} {:>6}", name, bar(value), percent(value, 1))?;
        }
    }

    let tones = insights.tone.notable();
    if !tones.is_empty() {
        writeln!(out, "Tone:")?;
        for (name, value) in tones {
            writeln!(out, "  {:<13} {} {:>4}", name, bar(value), percent(value, 0))?;
        }
    }

    if !insights.key_phrases.is_empty() {
        writeln!(out, "Key phrases: {}", insights.key_phrases.join(", "))?;
    }
    Ok(())
}

pub fn bulk(result: &BulkAnalysisResponse) -> String {
    render(|out| write_bulk(out, result))
}

fn write_bulk(out: &mut impl Write, result: &BulkAnalysisResponse) -> fmt::Result {
    writeln!(
        out,
        "{} analyzed, {} succeeded, {} failed",
        result.total, result.successful, result.failed
    )?;
    for (idx, item) in result.results.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} {:<8} {:>6}  {} {:<8}  {}",
            idx + 1,
            sentiment_icon(item.sentiment),
            item.sentiment.as_str(),
            percent(item.scores.confidence(), 1),
            emotion_icon(item.emotion),
            item.emotion.as_str(),
            truncate_chars(&item.text, 50)
        )?;
    }
    Ok(())
}

pub fn history(items: &[AnalysisHistoryItem]) -> String {
    render(|out| write_history(out, items))
}

fn write_history(out: &mut impl Write, items: &[AnalysisHistoryItem]) -> fmt::Result {
    if items.is_empty() {
        return writeln!(out, "No analyses yet.");
    }
    for item in items {
        writeln!(
            out,
            "{}  {}  {} {:<8} {:>6}  {}",
            item.id,
            local_time(item.timestamp),
            sentiment_icon(item.result.sentiment),
            item.result.sentiment.as_str(),
            percent(item.confidence(), 1),
            truncate_chars(&item.text, 50)
        )?;
    }
    Ok(())
}

pub fn stats(items: &[AnalysisHistoryItem]) -> String {
    render(|out| write_stats(out, items))
}

fn write_stats(out: &mut impl Write, items: &[AnalysisHistoryItem]) -> fmt::Result {
    let stats = HistoryStats::from_items(items);
    if stats.is_empty() {
        return writeln!(out, "No analyses yet.");
    }

    writeln!(out, "Total analyses: {}", stats.total)?;
    for label in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        let share = stats.percentage(label);
        writeln!(
            out,
            "  {:<9} {:>3}  {} {:.1}%",
            label.as_str(),
            stats.counts.get(label),
            bar(share / 100.0),
            share
        )?;
    }
    writeln!(out, "Average confidence: {}", percent(stats.average_confidence, 1))?;
    writeln!(out, "Recent:")?;
    for item in recent(items, RECENT_LIMIT) {
        writeln!(
            out,
            "  {} {}",
            sentiment_icon(item.result.sentiment),
            truncate_chars(&item.text, 60)
        )?;
    }
    Ok(())
}

pub fn examples() -> String {
    render(|out| write_examples(out))
}

fn write_examples(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Examples:")?;
    for example in TEXT_EXAMPLES {
        writeln!(out, "  {:<15} {}", example.label.to_lowercase(), example.text)?;
    }
    writeln!(out, "Real-world impact scenarios:")?;
    for example in IMPACT_EXAMPLES {
        writeln!(
            out,
            "  {:<15} [SDG {}] {}",
            example.area.slug(),
            example.area.sdg(),
            example.text
        )?;
    }
    Ok(())
}

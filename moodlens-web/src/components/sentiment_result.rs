//! Sentiment label, confidence, per-class scores and the risk alert.

use leptos::prelude::*;
use moodlens::display::{percent, risk_icon, sentiment_icon};
use moodlens::types::risk_flag_label;
use moodlens::{RiskAnalysis, Sentiment, SentimentResponse};

#[component]
pub fn SentimentResult(result: SentimentResponse) -> impl IntoView {
    let scores = result.scores;
    let label = result.sentiment;
    let confidence = percent(result.confidence(), 1);
    let risk = result.risk_analysis.filter(|r| r.has_risk);

    view! {
        <div class="result-card sentiment-card">
            <div class=format!("sentiment-headline sentiment-{}", label.as_str())>
                <span class="sentiment-icon">{sentiment_icon(label)}</span>
                <span class="sentiment-label">{label.as_str()}</span>
                <span class="sentiment-confidence">
                    {format!("{} confidence", confidence)}
                </span>
            </div>
            <div class="score-bars">
                {Sentiment::ALL.into_iter().map(|s| {
                    let score = scores.get(s);
                    view! {
                        <div class="score-row">
                            <span class="score-name">{s.as_str()}</span>
                            <div class="score-bar">
                                <div
                                    class=format!("score-fill sentiment-{}", s.as_str())
                                    style:width=percent(score, 1)
                                />
                            </div>
                            <span class="score-value">{percent(score, 1)}</span>
                        </div>
                    }
                }).collect_view()}
            </div>
            {risk.map(|risk| view! { <RiskAlert risk=risk /> })}
        </div>
    }
}

#[component]
fn RiskAlert(risk: RiskAnalysis) -> impl IntoView {
    let flags: Vec<&str> = risk.flags.iter().map(|f| risk_flag_label(f)).collect();
    let flags = flags.join(", ");
    let has_flags = !flags.is_empty();

    view! {
        <div class=format!("risk-alert risk-{}", risk.risk_level.as_str()) role="alert">
            <div class="risk-header">
                <span class="risk-icon">{risk_icon(risk.risk_level)}</span>
                <strong>{format!("Risk level: {}", risk.risk_level.as_str())}</strong>
                <span class="risk-score">{format!("score {}", percent(risk.risk_score, 0))}</span>
            </div>
            <Show when=move || has_flags>
                <p class="risk-flags">{format!("Detected: {}", flags)}</p>
            </Show>
            <ul class="risk-recommendations">
                {risk.recommendations.into_iter().map(|rec| view! { <li>{rec}</li> }).collect_view()}
            </ul>
            <p class="risk-disclaimer">
                "Automated early-signal detection only; not a substitute for professional evaluation."
            </p>
        </div>
    }
}

//! Client-side insights derived from a finished analysis.

use leptos::prelude::*;
use moodlens::display::percent;
use moodlens::{ComprehensiveAnalysis, Insights};

#[component]
pub fn InsightsPanel(analysis: ComprehensiveAnalysis) -> impl IntoView {
    let insights = Insights::from_analysis(&analysis);
    let arc_len = insights.emotional_arc.len();
    let secondary = insights.secondary_emotions.notable();
    let tones = insights.tone.notable();
    let key_phrases = insights.key_phrases;
    let has_phrases = !key_phrases.is_empty();

    view! {
        <div class="insights-panel">
            <section class="insight-card">
                <h3>"Why this result"</h3>
                <p class="insight-explanation">{insights.explanation}</p>
            </section>

            <section class="insight-card">
                <h3>{format!("Emotional arc ({} sentences)", insights.sentence_count)}</h3>
                <div class="emotional-arc">
                    {insights.emotional_arc.into_iter().enumerate().map(|(idx, value)| view! {
                        <div
                            class="arc-point"
                            title=format!("Sentence {} of {}: {}", idx + 1, arc_len, percent(value, 0))
                            style:height=percent(value, 0)
                        />
                    }).collect_view()}
                </div>
            </section>

            <section class="insight-card">
                <h3>"Rhetorical intent"</h3>
                <MetricBars entries=insights.rhetorical_intent.entries().to_vec() digits=0 />
            </section>

            <section class="insight-card">
                <h3>"Secondary emotions"</h3>
                {if secondary.is_empty() {
                    view! { <p class="empty-note">"No notable secondary emotions."</p> }.into_any()
                } else {
                    view! { <MetricBars entries=secondary digits=1 /> }.into_any()
                }}
            </section>

            <section class="insight-card">
                <h3>"Tone"</h3>
                {if tones.is_empty() {
                    view! { <p class="empty-note">"No distinctive tone detected."</p> }.into_any()
                } else {
                    view! { <MetricBars entries=tones digits=0 /> }.into_any()
                }}
            </section>

            <Show when=move || has_phrases>
                <section class="insight-card">
                    <h3>"Key phrases"</h3>
                    <div class="key-phrases">
                        {key_phrases.clone().into_iter().map(|phrase| view! {
                            <span class="key-phrase">{phrase}</span>
                        }).collect_view()}
                    </div>
                </section>
            </Show>
        </div>
    }
}

#[component]
fn MetricBars(entries: Vec<(&'static str, f64)>, digits: usize) -> impl IntoView {
    view! {
        <div class="metric-bars">
            {entries.into_iter().map(|(name, value)| view! {
                <div class="score-row">
                    <span class="score-name">{name}</span>
                    <div class="score-bar">
                        <div class="score-fill metric-fill" style:width=percent(value, 1) />
                    </div>
                    <span class="score-value">{percent(value, digits)}</span>
                </div>
            }).collect_view()}
        </div>
    }
}

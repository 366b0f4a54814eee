//! Aspect-level sentiment grouped by aspect type.

use leptos::prelude::*;
use moodlens::display::{percent, sentiment_marker, truncate_chars};
use moodlens::{AspectAnalysisResponse, AspectSentiment, AspectSummary};

const CONTEXT_PREVIEW: usize = 80;

#[component]
pub fn AspectBreakdown(result: AspectAnalysisResponse) -> impl IntoView {
    if result.total_aspects == 0 || result.aspects.is_empty() {
        return view! {
            <div class="result-card aspect-card">
                <p class="empty-note">"No specific aspects were identified."</p>
            </div>
        }
        .into_any();
    }

    let summary = AspectSummary::from_response(&result);
    let key_phrases = summary.key_phrases;
    let has_phrases = !key_phrases.is_empty();

    view! {
        <div class="result-card aspect-card">
            <div class="aspect-counts">
                <span class="count positive">{format!("{} positive", summary.positive)}</span>
                <span class="count negative">{format!("{} negative", summary.negative)}</span>
                <span class="count neutral">{format!("{} neutral", summary.neutral)}</span>
            </div>
            <Show when=move || has_phrases>
                <div class="key-phrases">
                    {key_phrases.clone().into_iter().map(|phrase| view! {
                        <span class="key-phrase">{phrase}</span>
                    }).collect_view()}
                </div>
            </Show>
            {summary.groups.into_iter().map(|group| view! {
                <div class="aspect-group">
                    <h4 class="aspect-group-title">{group.key}</h4>
                    {group.aspects.into_iter().map(|aspect| view! { <AspectRow aspect=aspect /> }).collect_view()}
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn AspectRow(aspect: AspectSentiment) -> impl IntoView {
    let context = truncate_chars(&aspect.context, CONTEXT_PREVIEW);

    view! {
        <div class=format!("aspect-row sentiment-{}", aspect.sentiment.as_str())>
            <span class="aspect-marker">{sentiment_marker(aspect.sentiment)}</span>
            <span class="aspect-term">{aspect.aspect}</span>
            <span class="aspect-confidence">{percent(aspect.confidence, 1)}</span>
            <span class="aspect-context" title=aspect.context>{context}</span>
        </div>
    }
}

use leptos::prelude::*;
use moodlens::EmotionResponse;
use moodlens::display::{emotion_icon, percent};

#[component]
pub fn EmotionSpectrum(result: EmotionResponse) -> impl IntoView {
    let top = result.emotion;
    let confidence = percent(result.confidence(), 1);

    view! {
        <div class="result-card emotion-card">
            <div class="emotion-headline">
                <span class="emotion-icon">{emotion_icon(top)}</span>
                <span class="emotion-label">{top.display_name()}</span>
                <span class="emotion-confidence">{confidence}</span>
            </div>
            <div class="emotion-bars">
                {result.probabilities.ranked().into_iter().map(|(emotion, p)| {
                    view! {
                        <div class="score-row" class:dominant=emotion == top>
                            <span class="score-name">
                                {emotion_icon(emotion)}" "{emotion.display_name()}
                            </span>
                            <div class="score-bar">
                                <div
                                    class=format!("score-fill emotion-{}", emotion.as_str())
                                    style:width=percent(p, 1)
                                />
                            </div>
                            <span class="score-value">{percent(p, 1)}</span>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}

use leptos::prelude::*;
use moodlens::display::{percent, sentiment_icon, truncate_chars};
use moodlens::stats::{RECENT_LIMIT, recent};
use moodlens::{AnalysisHistoryItem, HistoryStats, Sentiment};

#[component]
pub fn Statistics(history: Signal<Vec<AnalysisHistoryItem>>) -> impl IntoView {
    let stats = Memo::new(move |_| history.with(|items| HistoryStats::from_items(items)));

    view! {
        <div class="statistics">
            <h3 class="section-title">"Statistics"</h3>
            {move || {
                let stats = stats.get();
                if stats.is_empty() {
                    return view! { <p class="empty-note">"Analyze some text to see statistics."</p> }.into_any();
                }
                view! {
                    <div class="stat-total">{format!("{} analyses", stats.total)}</div>
                    <div class="stat-distribution">
                        {Sentiment::ALL.into_iter().map(|s| {
                            let share = stats.percentage(s);
                            view! {
                                <div class="score-row">
                                    <span class="score-name">
                                        {sentiment_icon(s)}" "{format!("{} ({})", s.as_str(), stats.counts.get(s))}
                                    </span>
                                    <div class="score-bar">
                                        <div
                                            class=format!("score-fill sentiment-{}", s.as_str())
                                            style:width=format!("{:.1}%", share)
                                        />
                                    </div>
                                    <span class="score-value">{format!("{:.1}%", share)}</span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                    <div class="stat-confidence">
                        {format!("Average confidence: {}", percent(stats.average_confidence, 1))}
                    </div>
                }
                .into_any()
            }}
            <div class="stat-recent">
                {move || history.with(|items| {
                    recent(items, RECENT_LIMIT)
                        .iter()
                        .map(|item| view! {
                            <div class="recent-item">
                                {sentiment_icon(item.result.sentiment)}" "{truncate_chars(&item.text, 40)}
                            </div>
                        })
                        .collect_view()
                })}
            </div>
        </div>
    }
}

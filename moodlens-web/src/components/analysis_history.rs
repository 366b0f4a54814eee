//! Stored analyses with reuse, removal and export.

use leptos::prelude::*;
use moodlens::AnalysisHistoryItem;
use moodlens::display::{percent, sentiment_icon, truncate_chars};
use wasm_bindgen::JsValue;

const PREVIEW_CHARS: usize = 50;

fn local_time(ms: i64) -> String {
    js_sys::Date::new(&JsValue::from_f64(ms as f64))
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

#[component]
pub fn AnalysisHistory(
    history: Signal<Vec<AnalysisHistoryItem>>,
    #[prop(into)] on_reuse: Callback<AnalysisHistoryItem>,
    #[prop(into)] on_delete: Callback<String>,
    #[prop(into)] on_clear: Callback<()>,
    #[prop(into)] on_export: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="history-section">
            <div class="history-header">
                <h3 class="section-title">{move || format!("History ({})", history.get().len())}</h3>
                <Show when=move || !history.get().is_empty()>
                    <button class="history-btn" on:click=move |_| on_export.run(()) title="Download history as JSON">
                        "Export"
                    </button>
                    <button class="history-btn clear-btn" on:click=move |_| on_clear.run(()) title="Delete all history">
                        "Clear"
                    </button>
                </Show>
            </div>
            <div class="history-list">
                {move || {
                    let items = history.get();
                    if items.is_empty() {
                        view! { <p class="history-empty">"No analyses yet"</p> }.into_any()
                    } else {
                        items.into_iter().map(|item| view! {
                            <HistoryItem item=item on_reuse=on_reuse on_delete=on_delete />
                        }).collect_view().into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn HistoryItem(
    item: AnalysisHistoryItem,
    #[prop(into)] on_reuse: Callback<AnalysisHistoryItem>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let sentiment = item.result.sentiment;
    let preview = truncate_chars(&item.text, PREVIEW_CHARS);
    let confidence = percent(item.confidence(), 1);
    let when = local_time(item.timestamp);
    let id = item.id.clone();
    let full_text = item.text.clone();

    view! {
        <div class=format!("history-entry sentiment-{}", sentiment.as_str())>
            <div class="history-entry-text" title=full_text>
                {sentiment_icon(sentiment)}" "{preview}
            </div>
            <div class="history-entry-meta">
                <span class="history-sentiment">{sentiment.as_str()}</span>
                " · "
                <span class="history-confidence">{confidence}</span>
                " · "
                <span class="history-time">{when}</span>
            </div>
            <div class="history-entry-actions">
                <button
                    class="history-btn reuse-btn"
                    on:click=move |_| on_reuse.run(item.clone())
                    title="Load this text into the editor"
                >
                    "Reuse"
                </button>
                <button
                    class="history-btn delete-btn"
                    on:click=move |_| on_delete.run(id.clone())
                    title="Delete from history"
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

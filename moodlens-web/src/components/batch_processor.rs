//! Batch analysis of many texts, one per line.

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use moodlens::analyze::MAX_TEXTS;
use moodlens::display::{emotion_icon, percent, sentiment_icon, truncate_chars};
use moodlens::export;
use moodlens::{BulkAnalysisItem, BulkAnalysisResponse, Sentiment};
use wasm_bindgen::JsCast;

use crate::api::client::open_session;
use crate::components::export_buttons::save_export;
use crate::components::toast::{ToastKind, ToastMessage, show_toast};

const PREVIEW_CHARS: usize = 60;

/// Non-blank lines, i.e. the texts a batch would send.
fn count_texts(input: &str) -> usize {
    input.lines().filter(|l| !l.trim().is_empty()).count()
}

fn is_over_limit(count: usize) -> bool {
    count > MAX_TEXTS
}

#[component]
pub fn BatchProcessor(api_url: Signal<String>, toasts: RwSignal<Vec<ToastMessage>>) -> impl IntoView {
    let input_text = RwSignal::new(String::new());
    let response = RwSignal::new(None::<BulkAnalysisResponse>);
    let is_processing = RwSignal::new(false);
    let error_message = RwSignal::new(None::<String>);

    // Count non-empty lines
    let line_count = Memo::new(move |_| input_text.with(|text| count_texts(text)));

    let process_all = move |_| {
        let url = api_url.get_untracked();
        let texts: Vec<String> = input_text.get_untracked().lines().map(str::to_string).collect();

        is_processing.set(true);
        error_message.set(None);

        spawn_local(async move {
            let session = open_session(&url);
            let result = session.analyze_bulk(&texts).await;
            is_processing.set(false);

            match result {
                Ok(bulk) => {
                    show_toast(
                        toasts,
                        format!("Analyzed {} of {} texts", bulk.successful, bulk.total),
                        ToastKind::Success,
                    );
                    response.set(Some(bulk));
                }
                Err(e) => {
                    if !e.is_validation() {
                        logging::error!("Batch analysis failed: {}", e);
                    }
                    error_message.set(Some(e.to_string()));
                }
            }
        });
    };

    let export_results = move |_| {
        if let Some(bulk) = response.get_untracked() {
            save_export(toasts, |now| export::export_batch(&bulk.results, now));
        }
    };

    let clear_items = move |_| {
        response.set(None);
        input_text.set(String::new());
        error_message.set(None);
    };

    view! {
        <div class="batch-processor">
            <h3 class="section-title">"Batch Analysis"</h3>

            <div class="batch-input">
                <textarea
                    rows="8"
                    placeholder="Enter one text per line..."
                    prop:value=move || input_text.get()
                    disabled=move || is_processing.get()
                    on:input=move |ev: web_sys::Event| {
                        if let Some(ta) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok()) {
                            input_text.set(ta.value());
                        }
                    }
                />
                <span class="batch-count" class:over-limit=move || { is_over_limit(line_count.get()) }>
                    {move || format!("{} / {} texts", line_count.get(), MAX_TEXTS)}
                </span>
            </div>

            <div class="batch-actions">
                <button
                    class="batch-process-btn"
                    on:click=process_all
                    disabled=move || line_count.get() == 0 || is_processing.get()
                >
                    {move || if is_processing.get() { "Analyzing..." } else { "Analyze All" }}
                </button>
                <Show when=move || response.with(Option::is_some)>
                    <button class="batch-export" on:click=export_results>"Export JSON"</button>
                    <button class="batch-clear" on:click=clear_items>"Clear"</button>
                </Show>
            </div>

            {move || error_message.get().map(|msg| view! {
                <div class="error-message">{msg}</div>
            })}

            {move || response.get().map(|bulk| view! { <BatchResults bulk=bulk /> })}
        </div>
    }
}

#[component]
fn BatchResults(bulk: BulkAnalysisResponse) -> impl IntoView {
    let count = |s: Sentiment| bulk.results.iter().filter(|r| r.sentiment == s).count();
    let positive = count(Sentiment::Positive);
    let negative = count(Sentiment::Negative);
    let neutral = count(Sentiment::Neutral);
    let failed = bulk.failed;

    view! {
        <div class="batch-results">
            <div class="batch-summary">
                <span>{format!("{} analyzed", bulk.total)}</span>
                <span class="count positive">{format!("{} positive", positive)}</span>
                <span class="count negative">{format!("{} negative", negative)}</span>
                <span class="count neutral">{format!("{} neutral", neutral)}</span>
                <Show when=move || { failed > 0 }>
                    <span class="count failed">{format!("{} failed", failed)}</span>
                </Show>
            </div>
            <div class="batch-items">
                {bulk.results.into_iter().enumerate().map(|(idx, item)| view! {
                    <BatchRow index=idx + 1 item=item />
                }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn BatchRow(index: usize, item: BulkAnalysisItem) -> impl IntoView {
    let preview = truncate_chars(&item.text, PREVIEW_CHARS);

    view! {
        <div class=format!("batch-item sentiment-{}", item.sentiment.as_str())>
            <span class="batch-item-num">{index}"."</span>
            <span class="batch-item-text" title=item.text>{preview}</span>
            <span class="batch-item-sentiment">
                {sentiment_icon(item.sentiment)}" "{item.sentiment.as_str()}
                " "{percent(item.scores.confidence(), 1)}
            </span>
            <span class="batch-item-emotion">
                {emotion_icon(item.emotion)}" "{item.emotion.display_name()}
            </span>
        </div>
    }
}

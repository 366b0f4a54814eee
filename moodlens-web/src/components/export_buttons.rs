//! JSON download buttons and the Blob download helper.

use leptos::logging;
use leptos::prelude::*;
use moodlens::export::{self, Export};
use moodlens::{AnalysisHistoryItem, ComprehensiveAnalysis};
use wasm_bindgen::{JsCast, JsValue};

use crate::components::toast::{ToastKind, ToastMessage, show_toast};
use crate::storage;

/// Save `export` through a temporary object URL and a synthetic link click.
pub fn download_export(export: &Export) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&export.contents));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let a: web_sys::HtmlAnchorElement = document.create_element("a")?.unchecked_into();
    a.set_href(&url);
    a.set_download(&export.filename);
    a.click();

    web_sys::Url::revoke_object_url(&url)
}

/// Download the result of `build`, reporting the outcome in a toast.
pub fn save_export<E: std::fmt::Display>(
    toasts: RwSignal<Vec<ToastMessage>>,
    build: impl FnOnce(i64) -> Result<Export, E>,
) {
    let export = match build(storage::now_millis()) {
        Ok(export) => export,
        Err(e) => {
            show_toast(toasts, e.to_string(), ToastKind::Error);
            return;
        }
    };
    match download_export(&export) {
        Ok(()) => show_toast(toasts, format!("Saved {}", export.filename), ToastKind::Success),
        Err(e) => {
            logging::error!("Download of {} failed: {:?}", export.filename, e);
            show_toast(toasts, "Download failed", ToastKind::Error);
        }
    }
}

/// Export actions for the analysis on screen and for the stored history.
#[component]
pub fn ExportButtons(
    current: Signal<Option<ComprehensiveAnalysis>>,
    history: Signal<Vec<AnalysisHistoryItem>>,
    toasts: RwSignal<Vec<ToastMessage>>,
) -> impl IntoView {
    let export_result = move |_| {
        if let Some(analysis) = current.get_untracked() {
            save_export(toasts, |now| export::export_result(&analysis.text, &analysis.sentiment, now));
        }
    };

    let export_report = move |_| {
        let analysis = current.get_untracked();
        let items = history.get_untracked();
        let items = export::history_without(analysis.as_ref(), &items);
        save_export(toasts, |now| export::export_impact_report(analysis.as_ref(), items, now));
    };

    view! {
        <div class="export-buttons">
            <button
                class="export-btn"
                on:click=export_result
                disabled=move || current.get().is_none()
            >
                "Export result"
            </button>
            <button
                class="export-btn report-btn"
                on:click=export_report
                disabled=move || current.get().is_none() && history.get().is_empty()
            >
                "SDG impact report"
            </button>
        </div>
    }
}

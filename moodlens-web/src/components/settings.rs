//! Service settings dialog.

use leptos::prelude::*;
use moodlens::ClientConfig;
use moodlens::api::DEFAULT_API_URL;
use wasm_bindgen::JsCast;

use crate::components::modal::Modal;
use crate::components::toast::{ToastKind, ToastMessage, show_toast};
use crate::storage::{self, BrowserStorage};

#[component]
pub fn Settings(
    is_open: RwSignal<bool>,
    api_url: RwSignal<String>,
    toasts: RwSignal<Vec<ToastMessage>>,
) -> impl IntoView {
    let draft = RwSignal::new(api_url.get_untracked());
    let error_message = RwSignal::new(None::<String>);

    // Start from the live value whenever the dialog opens
    Effect::new(move || {
        if is_open.get() {
            draft.set(api_url.get_untracked());
            error_message.set(None);
        }
    });

    let on_save = move |_| {
        let url = draft.get_untracked().trim().to_string();
        match ClientConfig::default().with_api_url(url) {
            Ok(config) => match storage::save_api_url(&mut BrowserStorage, &config.api_url) {
                Ok(()) => {
                    api_url.set(config.api_url);
                    is_open.set(false);
                    show_toast(toasts, "Settings saved", ToastKind::Success);
                }
                Err(e) => {
                    let message = format!("Could not save settings: {}", e);
                    error_message.set(Some(message.clone()));
                    show_toast(toasts, message, ToastKind::Error);
                }
            },
            Err(e) => error_message.set(Some(e.to_string())),
        }
    };

    let on_reset = move |_| {
        draft.set(DEFAULT_API_URL.to_string());
        error_message.set(None);
    };

    view! {
        <Modal is_open=is_open title="Settings">
            <div class="config-section">
                <label for="api-url">"Analysis service URL"</label>
                <input
                    type="text"
                    id="api-url"
                    placeholder=DEFAULT_API_URL
                    prop:value=move || draft.get()
                    on:input=move |ev: web_sys::Event| {
                        if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
                            draft.set(input.value());
                        }
                    }
                />
                {move || error_message.get().map(|msg| view! {
                    <p class="field-error">{msg}</p>
                })}
            </div>
            <div class="modal-actions">
                <button class="secondary-btn" on:click=on_reset>"Reset to default"</button>
                <button class="primary-btn" on:click=on_save>"Save"</button>
            </div>
        </Modal>
    }
}

//! Transient notifications for finished analyses, exports and failures.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicUsize, Ordering};

const DISMISS_AFTER_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToastMessage {
    pub id: usize,
    pub message: String,
    pub kind: ToastKind,
}

static TOAST_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Push a toast; it removes itself after a few seconds.
pub fn show_toast(toasts: RwSignal<Vec<ToastMessage>>, message: impl Into<String>, kind: ToastKind) {
    let id = TOAST_COUNTER.fetch_add(1, Ordering::SeqCst);
    toasts.update(|t| {
        t.push(ToastMessage {
            id,
            message: message.into(),
            kind,
        })
    });

    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
        toasts.update(|t| t.retain(|m| m.id != id));
    });
}

#[component]
pub fn ToastContainer(toasts: RwSignal<Vec<ToastMessage>>) -> impl IntoView {
    view! {
        <div class="toast-container" role="status" aria-live="polite">
            {move || toasts.get().into_iter().map(|toast| {
                let id = toast.id;
                view! {
                    <div class=toast.kind.class()>
                        <span class="toast-message">{toast.message}</span>
                        <button
                            class="toast-dismiss"
                            aria-label="Dismiss"
                            on:click=move |_| toasts.update(|t| t.retain(|m| m.id != id))
                        >
                            "×"
                        </button>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use moodlens::export;
use moodlens::prefs;
use moodlens::{AnalysisHistoryItem, ComprehensiveAnalysis, HistoryStore};

use crate::api::client::open_session;
use crate::components::about::About;
use crate::components::analysis_history::AnalysisHistory;
use crate::components::aspect_breakdown::AspectBreakdown;
use crate::components::batch_processor::BatchProcessor;
use crate::components::emotion_spectrum::EmotionSpectrum;
use crate::components::export_buttons::{ExportButtons, save_export};
use crate::components::insights_panel::InsightsPanel;
use crate::components::sentiment_result::SentimentResult;
use crate::components::settings::Settings;
use crate::components::sidebar::Sidebar;
use crate::components::statistics::Statistics;
use crate::components::text_input::TextInput;
use crate::components::toast::{ToastContainer, ToastKind, ToastMessage, show_toast};
use crate::storage::{self, BrowserStorage};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
    Analyze,
    Batch,
    Insights,
    About,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Analyze, Tab::Batch, Tab::Insights, Tab::About];

    fn label(&self) -> &'static str {
        match self {
            Tab::Analyze => "Analyze",
            Tab::Batch => "Batch",
            Tab::Insights => "Insights",
            Tab::About => "Impact",
        }
    }
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|m| m.matches())
}

fn apply_theme(dark: bool) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", dark);
    }
}

fn load_history() -> Vec<AnalysisHistoryItem> {
    HistoryStore::new(BrowserStorage).get_all()
}

#[component]
pub fn App() -> impl IntoView {
    let initial_dark = prefs::dark_mode(&BrowserStorage).unwrap_or_else(prefers_dark);

    // State signals
    let api_url = RwSignal::new(storage::load_api_url());
    let dark_mode = RwSignal::new(initial_dark);
    let tab = RwSignal::new(Tab::Analyze);
    let text = RwSignal::new(String::new());
    let url = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let current = RwSignal::new(None::<ComprehensiveAnalysis>);
    let error_message = RwSignal::new(None::<String>);
    let history = RwSignal::new(load_history());

    // UI state
    let sidebar_open = RwSignal::new(true);
    let settings_open = RwSignal::new(false);
    let toasts = RwSignal::new(Vec::<ToastMessage>::new());

    Effect::new(move || apply_theme(dark_mode.get()));

    let toggle_dark_mode = move |_| {
        let enabled = !dark_mode.get_untracked();
        dark_mode.set(enabled);
        if let Err(e) = prefs::set_dark_mode(&mut BrowserStorage, enabled) {
            logging::warn!("Dark mode preference not saved: {}", e);
        }
    };

    let run_analysis = move |by_url: bool| {
        let input = if by_url { url.get_untracked() } else { text.get_untracked() };
        let service = api_url.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let mut session = open_session(&service);
            let result = if by_url {
                session.analyze_url(&input).await
            } else {
                session.analyze(&input).await
            };
            is_loading.set(false);

            match result {
                Ok(analysis) => {
                    current.set(Some(analysis));
                    history.set(session.history().get_all());
                    show_toast(toasts, "Analysis complete", ToastKind::Success);
                }
                Err(e) => {
                    if !e.is_validation() {
                        logging::error!("Analysis via {} failed: {}", service, e);
                    }
                    show_toast(toasts, e.to_string(), ToastKind::Error);
                    error_message.set(Some(e.to_string()));
                }
            }
        });
    };

    let on_analyze = Callback::new(move |_: ()| run_analysis(false));
    let on_analyze_url = Callback::new(move |_: ()| run_analysis(true));

    let on_reuse = Callback::new(move |item: AnalysisHistoryItem| {
        text.set(item.text);
        tab.set(Tab::Analyze);
    });

    let on_delete = Callback::new(move |id: String| {
        let mut store = HistoryStore::new(BrowserStorage);
        if let Err(e) = store.remove_by_id(&id) {
            show_toast(toasts, e.to_string(), ToastKind::Error);
        }
        history.set(store.get_all());
    });

    let on_clear = Callback::new(move |_: ()| {
        let mut store = HistoryStore::new(BrowserStorage);
        match store.clear() {
            Ok(()) => show_toast(toasts, "History cleared", ToastKind::Info),
            Err(e) => show_toast(toasts, e.to_string(), ToastKind::Error),
        }
        history.set(store.get_all());
    });

    let on_export_history = Callback::new(move |_: ()| {
        let items = history.get_untracked();
        save_export(toasts, |now| export::export_history(&items, now));
    });

    view! {
        <div class="app-container">
            <header class="app-header">
                <div class="logo-section">
                    <h1 class="app-title">"MoodLens"</h1>
                    <p class="tagline">"Sentiment, emotion and aspect analysis"</p>
                </div>
                <div class="header-actions">
                    <button class="settings-btn" on:click=move |_| settings_open.set(true) title="Service settings">
                        "Settings"
                    </button>
                    <button
                        class="theme-toggle"
                        on:click=toggle_dark_mode
                        title=move || if dark_mode.get() { "Switch to light mode" } else { "Switch to dark mode" }
                    >
                        {move || if dark_mode.get() { "☀" } else { "☾" }}
                    </button>
                </div>
            </header>

            <div class="main-layout">
                <Sidebar is_open=sidebar_open title="History">
                    <Statistics history=history.into() />
                    <AnalysisHistory
                        history=history.into()
                        on_reuse=on_reuse
                        on_delete=on_delete
                        on_clear=on_clear
                        on_export=on_export_history
                    />
                </Sidebar>

                <main class="main-content">
                    <nav class="tabs">
                        {Tab::ALL.into_iter().map(|t| view! {
                            <button
                                class="tab-btn"
                                class:active=move || tab.get() == t
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }).collect_view()}
                    </nav>

                    {move || match tab.get() {
                        Tab::Analyze => view! {
                            <div class="panel input-panel">
                                <TextInput
                                    text=text
                                    url=url
                                    is_loading=is_loading.into()
                                    on_analyze=on_analyze
                                    on_analyze_url=on_analyze_url
                                />
                                {move || error_message.get().map(|msg| view! {
                                    <div class="error-message">{msg}</div>
                                })}
                            </div>
                            <ExportButtons current=current.into() history=history.into() toasts=toasts />
                            {move || current.get().map(|analysis| view! { <AnalysisResults analysis=analysis /> })}
                        }.into_any(),
                        Tab::Batch => view! {
                            <div class="panel">
                                <BatchProcessor api_url=api_url.into() toasts=toasts />
                            </div>
                        }.into_any(),
                        Tab::Insights => match current.get() {
                            Some(analysis) => view! { <InsightsPanel analysis=analysis /> }.into_any(),
                            None => view! {
                                <p class="empty-note">"Run an analysis to see insights."</p>
                            }.into_any(),
                        },
                        Tab::About => view! { <About /> }.into_any(),
                    }}
                </main>
            </div>

            <Settings is_open=settings_open api_url=api_url toasts=toasts />

            <ToastContainer toasts=toasts />

            <footer class="app-footer">
                <p>{move || format!("Service: {}", api_url.get())}</p>
            </footer>
        </div>
    }
}

#[component]
fn AnalysisResults(analysis: ComprehensiveAnalysis) -> impl IntoView {
    let note = analysis
        .texts
        .as_ref()
        .map(|texts| format!("Showing the first of {} texts.", texts.len()));

    view! {
        <div class="results">
            {note.map(|n| view! { <p class="multi-text-note">{n}</p> })}
            <h2 class="results-title">"Sentiment"</h2>
            <SentimentResult result=analysis.sentiment />
            <h2 class="results-title">"Emotion"</h2>
            <EmotionSpectrum result=analysis.emotion />
            <h2 class="results-title">"Aspects"</h2>
            <AspectBreakdown result=analysis.aspects />
        </div>
    }
}

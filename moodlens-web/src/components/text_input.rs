use leptos::prelude::*;
use moodlens::analyze::MAX_TEXTS;
use moodlens::samples::{IMPACT_EXAMPLES, TEXT_EXAMPLES};
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
enum InputMode {
    Text,
    Url,
}

#[component]
pub fn TextInput(
    text: RwSignal<String>,
    url: RwSignal<String>,
    is_loading: Signal<bool>,
    #[prop(into)] on_analyze: Callback<()>,
    #[prop(into)] on_analyze_url: Callback<()>,
) -> impl IntoView {
    let mode = RwSignal::new(InputMode::Text);

    let on_text_input = move |ev: web_sys::Event| {
        if let Some(area) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok()) {
            text.set(area.value());
        }
    };

    let on_url_input = move |ev: web_sys::Event| {
        if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
            url.set(input.value());
        }
    };

    let on_submit = move |_| match mode.get_untracked() {
        InputMode::Text => on_analyze.run(()),
        InputMode::Url => on_analyze_url.run(()),
    };

    view! {
        <div class="text-section">
            <div class="input-mode">
                <button
                    class="mode-btn"
                    class:active=move || mode.get() == InputMode::Text
                    on:click=move |_| mode.set(InputMode::Text)
                >
                    "Text"
                </button>
                <button
                    class="mode-btn"
                    class:active=move || mode.get() == InputMode::Url
                    on:click=move |_| mode.set(InputMode::Url)
                >
                    "URL"
                </button>
            </div>

            {move || match mode.get() {
                InputMode::Text => view! {
                    <label for="analysis-text">"Text to analyze"</label>
                    <textarea
                        id="analysis-text"
                        rows="5"
                        placeholder=format!(
                            "Enter text to analyze. Separate up to {} texts with ';', ',' or new lines; the first one is analyzed.",
                            MAX_TEXTS
                        )
                        prop:value=move || text.get()
                        on:input=on_text_input
                    />
                    <div class="examples">
                        <span class="examples-label">"Try an example:"</span>
                        {TEXT_EXAMPLES.iter().map(|example| {
                            let sample = example.text;
                            view! {
                                <button class="example-btn" on:click=move |_| text.set(sample.to_string())>
                                    {example.label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                    <div class="examples impact-examples">
                        <span class="examples-label">"Real-world scenarios:"</span>
                        {IMPACT_EXAMPLES.iter().map(|example| {
                            let sample = example.text;
                            view! {
                                <button
                                    class="example-btn impact-btn"
                                    title=example.area.description()
                                    on:click=move |_| text.set(sample.to_string())
                                >
                                    {format!("{} (SDG {})", example.area.title(), example.area.sdg())}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }.into_any(),
                InputMode::Url => view! {
                    <label for="analysis-url">"Page URL"</label>
                    <input
                        type="url"
                        id="analysis-url"
                        placeholder="https://example.com/article"
                        prop:value=move || url.get()
                        on:input=on_url_input
                    />
                }.into_any(),
            }}

            <button
                class="analyze-btn"
                on:click=on_submit
                disabled=move || is_loading.get()
            >
                {move || if is_loading.get() { "Analyzing..." } else { "Analyze" }}
            </button>
        </div>
    }
}

//! Collapsible side panel holding history and statistics.

use leptos::prelude::*;

#[component]
pub fn Sidebar(
    is_open: RwSignal<bool>,
    #[prop(into)] title: String,
    children: Children,
) -> impl IntoView {
    view! {
        <aside
            class="sidebar"
            class:sidebar-open=move || is_open.get()
            class:sidebar-collapsed=move || !is_open.get()
        >
            <div class="sidebar-header">
                <Show when=move || is_open.get()>
                    <h2 class="sidebar-title">{title.clone()}</h2>
                </Show>
                <button
                    class="sidebar-toggle"
                    on:click=move |_| is_open.update(|o| *o = !*o)
                    title=move || if is_open.get() { "Hide history" } else { "Show history" }
                >
                    {move || if is_open.get() { "«" } else { "»" }}
                </button>
            </div>
            <div class="sidebar-content" class:hidden=move || !is_open.get()>
                {children()}
            </div>
        </aside>
    }
}

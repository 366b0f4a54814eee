use leptos::prelude::*;
use moodlens::export::REPORT_DISCLAIMER;
use moodlens::samples::IMPACT_EXAMPLES;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <div class="about-panel">
            <h2>"Real-world impact"</h2>
            <p>
                "Sentiment, emotion and aspect signals can support early detection of conflict, "
                "abuse and distress. Each scenario below maps to a UN Sustainable Development Goal."
            </p>
            <div class="impact-areas">
                {IMPACT_EXAMPLES.iter().map(|example| {
                    let area = example.area;
                    view! {
                        <section class=format!("impact-area impact-{}", area.slug())>
                            <h3>{area.title()}</h3>
                            <p class="impact-sdg">{format!("SDG {}: {}", area.sdg(), area.sdg_title())}</p>
                            <p>{area.description()}</p>
                            <blockquote class="impact-example">{example.text}</blockquote>
                        </section>
                    }
                }).collect_view()}
            </div>
            <p class="disclaimer">{REPORT_DISCLAIMER}</p>
        </div>
    }
}

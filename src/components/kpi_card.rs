//! Single-number stat card for the analytics grid.

use leptos::prelude::*;

/// One KPI tile: a label, a big value, and an optional secondary line.
#[component]
pub fn KpiCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <span class="kpi-card__label">{label}</span>
            <span class="kpi-card__value">{move || value.get()}</span>
            {hint.map(|hint| view! { <span class="kpi-card__hint">{move || hint.get()}</span> })}
        </div>
    }
}

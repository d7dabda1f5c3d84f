//! Shared page header with a back link to the dashboard.

use leptos::prelude::*;

#[component]
pub fn PageHeader(
    title: &'static str,
    #[prop(optional)] children: Option<ChildrenFn>,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <a class="page-header__back" href="/dashboard">
                "< Dashboard"
            </a>
            <h1 class="page-header__title">{title}</h1>
            <div class="page-header__actions">{children.map(|children| children())}</div>
        </header>
    }
}

//! Public landing page.

use leptos::prelude::*;

use crate::state::session::SessionState;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <div class="landing-page">
            <h1>"Blaze"</h1>
            <p>"Rides, rentals and deliveries for Gabon."</p>
            <Show
                when=move || session.get().is_authenticated()
                fallback=|| {
                    view! {
                        <a class="btn btn--primary" href="/login">
                            "Staff sign in"
                        </a>
                    }
                }
            >
                <a class="btn btn--primary" href="/dashboard">
                    "Open the dashboard"
                </a>
            </Show>
        </div>
    }
}

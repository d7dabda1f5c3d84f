//! Render-level guard around authenticated pages.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

/// Wraps page content that requires a session.
///
/// While the background restore is still running the children are held
/// behind a loading placeholder; once it settles without a user, the
/// guard replaces the current history entry with `/login`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = session.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    view! {
        <Show
            when=move || session.get().is_authenticated()
            fallback=|| view! { <p class="page-loading">"Loading..."</p> }
        >
            {children()}
        </Show>
    }
}

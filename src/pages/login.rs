//! Staff login form.

use leptos::prelude::*;

use crate::net::session::SessionManager;
use crate::state::session::SessionState;
use crate::util::nav;

/// Email/password form. A successful login does a hard redirect to the
/// dashboard so every page starts from the fresh session.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let manager = expect_context::<SessionManager>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Already signed in: nothing to do here.
    Effect::new(move || {
        let state = session.get();
        if !state.loading && state.user.is_some() {
            nav::redirect("/dashboard");
        }
    });

    let submit = Callback::new(move |()| {
        if busy.get() {
            return;
        }
        let address = email.get().trim().to_owned();
        let secret = password.get();
        if address.is_empty() || secret.is_empty() {
            error.set(Some("Email and password are required".to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);
        let manager = manager.clone();
        leptos::task::spawn_local(async move {
            match manager.login(&address, &secret).await {
                Ok(profile) => {
                    session.update(|s| {
                        s.user = profile;
                        s.loading = false;
                    });
                    nav::redirect("/dashboard");
                }
                Err(e) => {
                    busy.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <div class="login-page">
            <h1>"Blaze Admin"</h1>
            <form
                class="login-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <label class="login-form__label">
                    "Email"
                    <input
                        class="login-form__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-form__label">
                    "Password"
                    <input
                        class="login-form__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="login-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
